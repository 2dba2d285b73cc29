//! Language negotiation based on Accept-Language header

use crate::parser::{self, RangeToken};
use crate::range::{Pattern, Range, Specificity};
use crate::selector::{self, RangeMatcher};

/// Ranges parsed from an `Accept-Language` header.
///
/// Tags are matched on their primary subtag and optional region. A range and
/// a candidate match when their primary subtags agree and either side omits
/// the region, so `en` accepts `en-US` and `en-US` accepts `en`, while
/// `en-US` does not accept `en-GB`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LanguageAcceptor {
	ranges: Vec<Range>,
}

impl LanguageAcceptor {
	/// Parses an optional `Accept-Language` header value.
	///
	/// Parsing never fails: a token that is not a well-formed tag is kept as
	/// an opaque primary subtag.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::LanguageAcceptor;
	///
	/// let accept = LanguageAcceptor::new(Some("en-US, fr;q=0.9"));
	/// assert!(accept.accepts("en"));
	/// assert!(accept.accepts("fr-CA"));
	/// assert!(!accept.accepts("en-GB"));
	/// assert_eq!(accept.ranges().len(), 2);
	/// ```
	pub fn new(header: Option<&str>) -> Self {
		let ranges = parser::parse(header).iter().map(language_range).collect();
		Self { ranges }
	}

	/// Parses an `Accept-Language` header value.
	pub fn parse(header: &str) -> Self {
		Self::new(Some(header))
	}

	/// Creates an acceptor that accepts every language.
	pub fn any() -> Self {
		Self::default()
	}

	pub fn ranges(&self) -> &[Range] {
		&self.ranges
	}

	pub fn is_universal(&self) -> bool {
		self.ranges.is_empty()
	}

	/// Returns true if the language tag is acceptable.
	pub fn accepts(&self, candidate: &str) -> bool {
		selector::accepts(self, candidate)
	}

	/// Returns the most acceptable language tag, or `None` if no candidate is
	/// acceptable.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::LanguageAcceptor;
	///
	/// let accept = LanguageAcceptor::parse("ja;q=0.5, en;q=0.9");
	/// assert_eq!(accept.preferred(&["ja", "en-GB", "fr"]), Some("en-GB"));
	/// assert_eq!(accept.preferred(&["de"]), None);
	/// ```
	pub fn preferred<'c, S: AsRef<str>>(&self, candidates: &'c [S]) -> Option<&'c str> {
		selector::preferred(self, candidates)
	}
}

impl From<&str> for LanguageAcceptor {
	fn from(header: &str) -> Self {
		Self::parse(header)
	}
}

impl RangeMatcher for LanguageAcceptor {
	/// `(primary, region)`
	type Candidate<'c> = (&'c str, Option<&'c str>);

	fn split_candidate(candidate: &str) -> (&str, Option<&str>) {
		split_tag(candidate)
	}

	fn specificity(range: &Range, candidate: &Self::Candidate<'_>) -> Option<Specificity> {
		let (primary, region) = *candidate;
		match &range.primary {
			// A bare `*` ignores the region entirely
			Pattern::Any => Some(Specificity::Wildcard),
			Pattern::Exact(range_primary) if range_primary != primary => None,
			Pattern::Exact(_) => match (&range.secondary, region) {
				(None, None) => Some(Specificity::Exact),
				(Some(Pattern::Exact(range_region)), Some(region)) => {
					(range_region == region).then_some(Specificity::Exact)
				}
				_ => Some(Specificity::Partial),
			},
		}
	}

	fn ranges(&self) -> &[Range] {
		&self.ranges
	}
}

/// Splits a tag at its first hyphen.
fn split_tag(tag: &str) -> (&str, Option<&str>) {
	match tag.split_once('-') {
		Some((primary, region)) => (primary, Some(region)),
		None => (tag, None),
	}
}

fn language_range(token: &RangeToken<'_>) -> Range {
	let (primary, region) = split_tag(token.main);
	Range::new(
		Pattern::parse(primary),
		region.map(Pattern::parse),
		token.quality,
		token.order,
	)
}
