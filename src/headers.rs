//! Building acceptors from request headers.
//!
//! A header field may be sent as several lines; they are combined with `,`
//! before parsing, which is equivalent for comma-separated list headers.

use http::HeaderMap;
use http::header::{ACCEPT, ACCEPT_LANGUAGE};

use crate::error::{NegotiationError, NegotiationResult};
use crate::language::LanguageAcceptor;
use crate::media::MediaTypeAcceptor;

/// Combined value of every `Accept` line, or `None` if there is none.
///
/// # Errors
///
/// A value that is not visible ASCII cannot hold a media range and is
/// reported as [`NegotiationError::MalformedMediaRange`].
pub(crate) fn accept_value(headers: &HeaderMap) -> NegotiationResult<Option<String>> {
	let mut lines = Vec::new();
	for value in headers.get_all(ACCEPT) {
		let line = value
			.to_str()
			.map_err(|_| NegotiationError::MalformedMediaRange {
				range: String::from_utf8_lossy(value.as_bytes()).into_owned(),
				position: 0,
			})?;
		lines.push(line);
	}
	Ok((!lines.is_empty()).then(|| lines.join(",")))
}

/// Combined value of every decodable `Accept-Language` line.
pub(crate) fn accept_language_value(headers: &HeaderMap) -> Option<String> {
	let lines: Vec<&str> = headers
		.get_all(ACCEPT_LANGUAGE)
		.iter()
		.filter_map(|value| match value.to_str() {
			Ok(line) => Some(line),
			Err(_) => {
				tracing::debug!("skipping undecodable Accept-Language value");
				None
			}
		})
		.collect();
	(!lines.is_empty()).then(|| lines.join(","))
}

impl MediaTypeAcceptor {
	/// Builds an acceptor from the request's `Accept` header.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::MediaTypeAcceptor;
	/// use http::{HeaderMap, HeaderValue, header::ACCEPT};
	///
	/// let mut headers = HeaderMap::new();
	/// headers.insert(ACCEPT, HeaderValue::from_static("image/*"));
	///
	/// let accept = MediaTypeAcceptor::from_headers(&headers).unwrap();
	/// assert!(accept.accepts("image/webp"));
	/// assert!(MediaTypeAcceptor::from_headers(&HeaderMap::new()).unwrap().is_universal());
	/// ```
	pub fn from_headers(headers: &HeaderMap) -> NegotiationResult<Self> {
		Self::new(accept_value(headers)?.as_deref())
	}
}

impl LanguageAcceptor {
	/// Builds an acceptor from the request's `Accept-Language` header.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		Self::new(accept_language_value(headers).as_deref())
	}
}

/// Returns the media type acceptor for a request.
pub fn acceptable_media_types(headers: &HeaderMap) -> NegotiationResult<MediaTypeAcceptor> {
	MediaTypeAcceptor::from_headers(headers)
}

/// Returns the language acceptor for a request.
pub fn acceptable_languages(headers: &HeaderMap) -> LanguageAcceptor {
	LanguageAcceptor::from_headers(headers)
}
