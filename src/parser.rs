//! Header range tokenizer shared by the media type and language acceptors.
//!
//! The tokenizer only knows about the list syntax common to `Accept` and
//! `Accept-Language`: comma-separated clauses, `;`-separated parameters and the
//! `q` quality parameter. Interpreting the main part of each clause is left to
//! the acceptor, since media ranges are validated strictly while language
//! ranges are not.

/// Quality assumed when a range carries no (or an unusable) `q` parameter.
pub const DEFAULT_QUALITY: f32 = 1.0;

/// A range clause before domain-specific interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeToken<'h> {
	/// The range itself, trimmed, without parameters.
	pub main: &'h str,
	/// Value of the `q` parameter, or [`DEFAULT_QUALITY`].
	pub quality: f32,
	/// Zero-based position among all tokens of the header.
	pub order: usize,
}

/// Splits a header value into ordered range tokens.
///
/// An absent or blank header produces no tokens. Clauses that are entirely
/// blank (for example after a trailing comma) are skipped. A clause whose main
/// part holds several whitespace-separated ranges yields one token per range,
/// all sharing the clause's quality.
///
/// # Examples
///
/// ```
/// use conneg::parser::parse;
///
/// let tokens = parse(Some("text/html, application/json;q=0.5"));
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1].main, "application/json");
/// assert_eq!(tokens[1].quality, 0.5);
/// assert_eq!(tokens[1].order, 1);
///
/// assert!(parse(None).is_empty());
/// assert!(parse(Some("  ")).is_empty());
/// ```
pub fn parse(header: Option<&str>) -> Vec<RangeToken<'_>> {
	let Some(header) = header else {
		return Vec::new();
	};

	let mut tokens = Vec::new();
	for clause in header.split(',') {
		if clause.trim().is_empty() {
			continue;
		}

		let mut parts = clause.split(';');
		let main = parts.next().unwrap_or_default().trim();
		let quality = parse_quality(parts);

		if main.is_empty() {
			// Parameters with no range; the acceptor decides whether that is fatal.
			tokens.push(RangeToken {
				main,
				quality,
				order: tokens.len(),
			});
			continue;
		}

		for range in main.split_whitespace() {
			tokens.push(RangeToken {
				main: range,
				quality,
				order: tokens.len(),
			});
		}
	}

	tracing::trace!(header, ranges = tokens.len(), "parsed header ranges");
	tokens
}

/// Extracts the quality from `key=value` parameters.
///
/// Only the key `q` (case-sensitive) is considered. A later `q` overrides an
/// earlier one. Values that are not finite numbers within [0, 1] fall back to
/// [`DEFAULT_QUALITY`].
fn parse_quality<'h>(params: impl Iterator<Item = &'h str>) -> f32 {
	let mut quality = DEFAULT_QUALITY;
	for param in params {
		let Some((key, value)) = param.split_once('=') else {
			continue;
		};
		if key.trim() != "q" {
			continue;
		}

		let value = value.trim();
		quality = match value.parse::<f32>() {
			Ok(q) if q.is_finite() && (0.0..=1.0).contains(&q) => q,
			_ => {
				tracing::debug!(value, "ignoring malformed quality value");
				DEFAULT_QUALITY
			}
		};
	}
	quality
}
