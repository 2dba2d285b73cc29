//! Parsed acceptability ranges

use std::cmp::Ordering;
use std::fmt;

/// The wildcard marker used in media and language ranges.
pub const WILDCARD: &str = "*";

/// One side of a range: either the `*` wildcard or a literal token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
	/// Matches any token.
	Any,
	/// Matches exactly this token (case-sensitive).
	Exact(String),
}

impl Pattern {
	/// Parses a token, recognising the wildcard marker.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::Pattern;
	///
	/// assert_eq!(Pattern::parse("*"), Pattern::Any);
	/// assert_eq!(Pattern::parse("html"), Pattern::Exact("html".to_string()));
	/// ```
	pub fn parse(token: &str) -> Self {
		if token == WILDCARD {
			Self::Any
		} else {
			Self::Exact(token.to_string())
		}
	}

	/// Returns true for the wildcard pattern.
	pub fn is_any(&self) -> bool {
		matches!(self, Self::Any)
	}

	/// Returns the token text, `*` for the wildcard.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Any => WILDCARD,
			Self::Exact(token) => token,
		}
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One parsed entry from an `Accept` or `Accept-Language` header.
///
/// For media ranges `primary` is the type and `secondary` the subtype; for
/// language ranges they are the primary language subtag and the region.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
	/// Media type or primary language subtag.
	pub primary: Pattern,
	/// Media subtype or region subtag, absent for a bare language.
	pub secondary: Option<Pattern>,
	/// Quality factor (0.0 to 1.0)
	pub quality: f32,
	/// Zero-based position within the header.
	pub order: usize,
}

impl Range {
	/// Creates a range from its parts.
	pub fn new(primary: Pattern, secondary: Option<Pattern>, quality: f32, order: usize) -> Self {
		Self {
			primary,
			secondary,
			quality,
			order,
		}
	}

	/// Returns false for ranges the client explicitly rejected with `q=0`.
	pub fn is_acceptable(&self) -> bool {
		self.quality > 0.0
	}
}

/// How exactly a range matched a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
	/// `*/*` or `*`
	Wildcard = 0,
	/// `type/*`, or a language range and candidate where one side has no region.
	Partial = 1,
	/// Every token matched literally.
	Exact = 2,
}

/// Ranking of one range against one candidate.
///
/// Higher quality wins, then higher specificity, then the range declared
/// earlier in the header.
#[derive(Debug, Clone, Copy)]
pub struct Score {
	/// Quality of the matching range.
	pub quality: f32,
	/// How specifically the range matched.
	pub specificity: Specificity,
	/// Position of the matching range in the header.
	pub order: usize,
}

impl Score {
	/// Scores `range` given the specificity of its match.
	pub fn new(range: &Range, specificity: Specificity) -> Self {
		Self {
			quality: range.quality,
			specificity,
			order: range.order,
		}
	}
}

impl Ord for Score {
	fn cmp(&self, other: &Self) -> Ordering {
		self.quality
			.total_cmp(&other.quality)
			.then(self.specificity.cmp(&other.specificity))
			.then(other.order.cmp(&self.order))
	}
}

impl PartialOrd for Score {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Score {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Score {}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn score(quality: f32, specificity: Specificity, order: usize) -> Score {
		Score {
			quality,
			specificity,
			order,
		}
	}

	#[rstest]
	fn test_pattern_display() {
		assert_eq!(Pattern::Any.to_string(), "*");
		assert_eq!(Pattern::parse("en").to_string(), "en");
		assert!(Pattern::parse("*").is_any());
		assert!(!Pattern::parse("**").is_any());
	}

	#[rstest]
	fn test_zero_quality_is_not_acceptable() {
		let rejected = Range::new(Pattern::parse("text"), Some(Pattern::Any), 0.0, 0);
		assert!(!rejected.is_acceptable());

		let barely = Range::new(Pattern::parse("text"), Some(Pattern::Any), 0.001, 1);
		assert!(barely.is_acceptable());
	}

	#[rstest]
	#[case(score(0.9, Specificity::Wildcard, 5), score(0.8, Specificity::Exact, 0))]
	#[case(score(0.5, Specificity::Exact, 5), score(0.5, Specificity::Partial, 0))]
	#[case(score(0.5, Specificity::Partial, 1), score(0.5, Specificity::Partial, 2))]
	fn test_score_ordering(#[case] better: Score, #[case] worse: Score) {
		assert!(better > worse);
		assert!(worse < better);
	}

	#[rstest]
	fn test_equal_scores() {
		assert_eq!(
			score(1.0, Specificity::Exact, 3),
			score(1.0, Specificity::Exact, 3)
		);
	}
}
