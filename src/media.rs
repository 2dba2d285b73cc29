//! Media type negotiation based on the Accept header

use std::str::FromStr;

use crate::error::{NegotiationError, NegotiationResult};
use crate::parser::{self, RangeToken};
use crate::range::{Pattern, Range, Specificity, WILDCARD};
use crate::selector::{self, RangeMatcher};

/// Ranges parsed from an `Accept` header.
///
/// Built once per request and queried for single candidates with
/// [`accepts`](Self::accepts) or for the best of several with
/// [`preferred`](Self::preferred).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaTypeAcceptor {
	ranges: Vec<Range>,
}

impl MediaTypeAcceptor {
	/// Parses an optional `Accept` header value.
	///
	/// An absent or empty header accepts every media type.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::MalformedMediaRange`] if a range is not of
	/// the form `type/subtype` (the bare legacy `*` is allowed).
	///
	/// # Examples
	///
	/// ```
	/// use conneg::{MediaTypeAcceptor, NegotiationError};
	///
	/// let accept = MediaTypeAcceptor::new(Some("image/*, text/plain;q=0.5")).unwrap();
	/// assert!(accept.accepts("image/png"));
	/// assert!(!accept.accepts("application/json"));
	///
	/// let liberal = MediaTypeAcceptor::new(None).unwrap();
	/// assert!(liberal.accepts("anyold/thing"));
	///
	/// let err = MediaTypeAcceptor::new(Some("image;q=0.9")).unwrap_err();
	/// assert!(matches!(err, NegotiationError::MalformedMediaRange { .. }));
	/// ```
	pub fn new(header: Option<&str>) -> NegotiationResult<Self> {
		let ranges = parser::parse(header)
			.iter()
			.map(media_range)
			.collect::<NegotiationResult<Vec<_>>>()?;
		Ok(Self { ranges })
	}

	/// Creates an acceptor that accepts everything, as if no header was sent.
	pub fn any() -> Self {
		Self::default()
	}

	/// Ranges in header declaration order.
	pub fn ranges(&self) -> &[Range] {
		&self.ranges
	}

	/// True when the header was absent or empty.
	pub fn is_universal(&self) -> bool {
		self.ranges.is_empty()
	}

	/// Returns true if the `type/subtype` candidate is acceptable.
	pub fn accepts(&self, candidate: &str) -> bool {
		selector::accepts(self, candidate)
	}

	/// Returns the most acceptable candidate, or `None` if no candidate is
	/// acceptable.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::MediaTypeAcceptor;
	///
	/// let accept = MediaTypeAcceptor::new(Some("application/json;q=0.9,text/html;q=0.8")).unwrap();
	/// assert_eq!(accept.preferred(&["text/html", "application/json"]), Some("application/json"));
	/// assert_eq!(accept.preferred(&["image/png"]), None);
	/// ```
	pub fn preferred<'c, S: AsRef<str>>(&self, candidates: &'c [S]) -> Option<&'c str> {
		selector::preferred(self, candidates)
	}
}

impl FromStr for MediaTypeAcceptor {
	type Err = NegotiationError;

	fn from_str(header: &str) -> NegotiationResult<Self> {
		Self::new(Some(header))
	}
}

impl RangeMatcher for MediaTypeAcceptor {
	/// `(type, subtype)`; a candidate without `/` has an empty subtype.
	type Candidate<'c> = (&'c str, &'c str);

	fn split_candidate(candidate: &str) -> (&str, &str) {
		candidate.split_once('/').unwrap_or((candidate, ""))
	}

	fn specificity(range: &Range, candidate: &Self::Candidate<'_>) -> Option<Specificity> {
		let (ty, subtype) = *candidate;
		match (&range.primary, &range.secondary) {
			// `*/*` ignores the subtype
			(Pattern::Any, _) => Some(Specificity::Wildcard),
			(Pattern::Exact(range_ty), _) if range_ty != ty => None,
			(_, Some(Pattern::Exact(range_subtype))) => {
				(range_subtype == subtype).then_some(Specificity::Exact)
			}
			_ => Some(Specificity::Partial),
		}
	}

	fn ranges(&self) -> &[Range] {
		&self.ranges
	}
}

fn media_range(token: &RangeToken<'_>) -> NegotiationResult<Range> {
	if token.main == WILDCARD {
		return Ok(Range::new(
			Pattern::Any,
			Some(Pattern::Any),
			token.quality,
			token.order,
		));
	}

	match token.main.split_once('/') {
		Some((ty, subtype)) if !ty.is_empty() && !subtype.is_empty() && !subtype.contains('/') => {
			Ok(Range::new(
				Pattern::parse(ty),
				Some(Pattern::parse(subtype)),
				token.quality,
				token.order,
			))
		}
		_ => {
			tracing::debug!(range = token.main, position = token.order, "rejecting malformed media range");
			Err(NegotiationError::MalformedMediaRange {
				range: token.main.to_string(),
				position: token.order,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn acceptor(header: &str) -> MediaTypeAcceptor {
		header.parse().unwrap()
	}

	#[rstest]
	fn test_parse_media_ranges() {
		let accept = acceptor("text/*;q=0.5, application/json");
		assert_eq!(accept.ranges().len(), 2);
		assert_eq!(accept.ranges()[0].primary, Pattern::parse("text"));
		assert_eq!(accept.ranges()[0].secondary, Some(Pattern::Any));
		assert_eq!(accept.ranges()[0].quality, 0.5);
		assert_eq!(accept.ranges()[1].order, 1);
	}

	#[rstest]
	fn test_bare_wildcard_is_full_wildcard() {
		let accept = acceptor("*");
		assert_eq!(accept.ranges()[0].primary, Pattern::Any);
		assert_eq!(accept.ranges()[0].secondary, Some(Pattern::Any));
	}

	#[rstest]
	#[case("image;q=0.9,image/jpeg", "image", 0)]
	#[case("text/html, /json", "/json", 1)]
	#[case("text/", "text/", 0)]
	#[case("a/b/c", "a/b/c", 0)]
	#[case("text/html, ;q=0.5", "", 1)]
	fn test_malformed_ranges(#[case] header: &str, #[case] range: &str, #[case] position: usize) {
		let err = MediaTypeAcceptor::from_str(header).unwrap_err();
		assert_eq!(
			err,
			NegotiationError::MalformedMediaRange {
				range: range.to_string(),
				position,
			}
		);
	}

	#[rstest]
	#[case("text/html", "text/html", Some(Specificity::Exact))]
	#[case("text/*", "text/html", Some(Specificity::Partial))]
	#[case("*/*", "text/html", Some(Specificity::Wildcard))]
	#[case("*/html", "image/png", Some(Specificity::Wildcard))]
	#[case("text/plain", "text/html", None)]
	#[case("image/*", "text/html", None)]
	#[case("text/html", "text", None)]
	fn test_specificity(
		#[case] header: &str,
		#[case] candidate: &str,
		#[case] expected: Option<Specificity>,
	) {
		let accept = acceptor(header);
		let split = MediaTypeAcceptor::split_candidate(candidate);
		assert_eq!(
			MediaTypeAcceptor::specificity(&accept.ranges()[0], &split),
			expected
		);
	}

	#[rstest]
	fn test_matching_is_case_sensitive() {
		let accept = acceptor("text/html");
		assert!(!accept.accepts("Text/HTML"));
	}

	#[rstest]
	fn test_explicit_rejection() {
		let accept = acceptor("text/html;q=0, text/*;q=0.4");
		assert!(accept.accepts("text/html"));
		assert!(accept.accepts("text/plain"));

		let reject_all = acceptor("*/*;q=0");
		assert!(!reject_all.is_universal());
		assert!(!reject_all.accepts("text/html"));
		assert_eq!(reject_all.preferred(&["text/html"]), None);
	}

	#[rstest]
	fn test_preferred_with_owned_candidates() {
		let accept = acceptor("text/html;q=0.3, application/json");
		let offered = vec!["text/html".to_string(), "application/json".to_string()];
		assert_eq!(accept.preferred(&offered), Some("application/json"));
	}

	#[rstest]
	fn test_any_is_universal() {
		let accept = MediaTypeAcceptor::any();
		assert!(accept.is_universal());
		assert_eq!(accept.preferred(&["b/b", "a/a"]), Some("b/b"));
	}
}
