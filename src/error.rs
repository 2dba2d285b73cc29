//! Error types for content negotiation.
//!
//! Only two things can go wrong: an `Accept` header that cannot be parsed, and
//! a request for which none of the offered representations is acceptable.
//! Acceptors themselves report the second case as `false`/`None`; the error
//! variant exists for callers (such as [`crate::Negotiator`]) that prefer a
//! `Result`.

use thiserror::Error;

/// Errors that can occur while negotiating a representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
	/// A media range in an `Accept` header has no `type/subtype` separator.
	#[error("Malformed media range {range:?} at position {position}")]
	MalformedMediaRange {
		/// The offending range, trimmed and without parameters.
		range: String,
		/// Zero-based position of the range within the header.
		position: usize,
	},

	/// None of the offered representations satisfies the client.
	#[error("No acceptable representation among {offered} offered")]
	NoAcceptableRepresentation {
		/// Number of candidates that were offered.
		offered: usize,
	},
}

impl NegotiationError {
	/// Returns the HTTP status a server should answer with for this error.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::NegotiationError;
	/// use http::StatusCode;
	///
	/// let err = NegotiationError::NoAcceptableRepresentation { offered: 2 };
	/// assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
	/// ```
	#[cfg(feature = "http")]
	pub fn status_code(&self) -> http::StatusCode {
		match self {
			Self::MalformedMediaRange { .. } => http::StatusCode::BAD_REQUEST,
			Self::NoAcceptableRepresentation { .. } => http::StatusCode::NOT_ACCEPTABLE,
		}
	}
}

/// Result type alias for negotiation operations.
pub type NegotiationResult<T> = Result<T, NegotiationError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_malformed_media_range_message() {
		let error = NegotiationError::MalformedMediaRange {
			range: "image".to_string(),
			position: 0,
		};
		assert_eq!(
			error.to_string(),
			"Malformed media range \"image\" at position 0"
		);
	}

	#[rstest]
	fn test_no_acceptable_representation_message() {
		let error = NegotiationError::NoAcceptableRepresentation { offered: 3 };
		assert_eq!(error.to_string(), "No acceptable representation among 3 offered");
	}

	#[cfg(feature = "http")]
	#[rstest]
	fn test_status_codes() {
		let malformed = NegotiationError::MalformedMediaRange {
			range: "text".to_string(),
			position: 1,
		};
		assert_eq!(malformed.status_code(), http::StatusCode::BAD_REQUEST);

		let unacceptable = NegotiationError::NoAcceptableRepresentation { offered: 0 };
		assert_eq!(unacceptable.status_code(), http::StatusCode::NOT_ACCEPTABLE);
	}
}
