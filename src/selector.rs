//! Candidate selection shared by every acceptor.
//!
//! An acceptor only has to say whether a range matches a candidate and how
//! specifically; ranking and tie-breaking live here.

use crate::range::{Range, Score, Specificity};

/// Matching strategy of one negotiation domain.
pub trait RangeMatcher {
	/// A candidate split into the parts the domain matches on.
	type Candidate<'c>;

	/// Splits a candidate identifier such as `text/html` or `en-US`.
	fn split_candidate(candidate: &str) -> Self::Candidate<'_>;

	/// Returns how specifically `range` matches `candidate`, or `None` if it
	/// does not match at all. Quality is not considered here.
	fn specificity(range: &Range, candidate: &Self::Candidate<'_>) -> Option<Specificity>;

	/// Ranges in header declaration order.
	fn ranges(&self) -> &[Range];

	/// True when the header was absent or empty: everything is acceptable.
	fn is_universal(&self) -> bool {
		self.ranges().is_empty()
	}
}

/// Returns the best score any acceptable range gives `candidate`.
pub fn best_score<M>(matcher: &M, candidate: &str) -> Option<Score>
where
	M: RangeMatcher + ?Sized,
{
	let split = M::split_candidate(candidate);
	matcher
		.ranges()
		.iter()
		.filter(|range| range.is_acceptable())
		.filter_map(|range| M::specificity(range, &split).map(|s| Score::new(range, s)))
		.max()
}

/// Returns true if `candidate` is acceptable to `matcher`.
pub fn accepts<M>(matcher: &M, candidate: &str) -> bool
where
	M: RangeMatcher + ?Sized,
{
	matcher.is_universal() || best_score(matcher, candidate).is_some()
}

/// Picks the most acceptable of `candidates`.
///
/// Candidates are compared by their best score; the earlier candidate wins a
/// tie. A universal matcher prefers the first candidate.
pub fn preferred<'c, M, S>(matcher: &M, candidates: &'c [S]) -> Option<&'c str>
where
	M: RangeMatcher + ?Sized,
	S: AsRef<str>,
{
	if matcher.is_universal() {
		return candidates.first().map(AsRef::as_ref);
	}

	let mut best: Option<(Score, &'c str)> = None;
	for candidate in candidates {
		let candidate = candidate.as_ref();
		let Some(score) = best_score(matcher, candidate) else {
			continue;
		};
		if best.is_none_or(|(current, _)| score > current) {
			best = Some((score, candidate));
		}
	}

	tracing::trace!(
		offered = candidates.len(),
		chosen = best.map(|(_, candidate)| candidate),
		"selected preferred candidate"
	);
	best.map(|(_, candidate)| candidate)
}
