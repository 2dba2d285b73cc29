//! Request-level negotiation with cached acceptors.

use std::sync::Arc;

use http::HeaderMap;

use crate::cache::{AcceptorCache, CacheStatistics};
use crate::error::{NegotiationError, NegotiationResult};
use crate::headers::{accept_language_value, accept_value};
use crate::language::LanguageAcceptor;
use crate::media::MediaTypeAcceptor;
use crate::settings::NegotiationSettings;

/// Chooses representations for requests.
///
/// Holds one cache of parsed `Accept` headers and one of parsed
/// `Accept-Language` headers; share it between requests behind an `Arc`.
///
/// # Examples
///
/// ```
/// use conneg::{Negotiator, NegotiationSettings};
/// use http::{HeaderMap, HeaderValue, StatusCode, header::ACCEPT};
///
/// let negotiator = Negotiator::new(NegotiationSettings::default());
///
/// let mut headers = HeaderMap::new();
/// headers.insert(ACCEPT, HeaderValue::from_static("application/json;q=0.9,text/html;q=0.8"));
/// assert_eq!(
///     negotiator.media_type(&headers, &["text/html", "application/json"]).unwrap(),
///     "application/json"
/// );
///
/// let err = negotiator.media_type(&headers, &["image/png"]).unwrap_err();
/// assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
/// ```
#[derive(Debug)]
pub struct Negotiator {
	settings: NegotiationSettings,
	media: AcceptorCache<MediaTypeAcceptor>,
	languages: AcceptorCache<LanguageAcceptor>,
}

impl Negotiator {
	pub fn new(settings: NegotiationSettings) -> Self {
		Self {
			media: AcceptorCache::new(settings.cache_capacity),
			languages: AcceptorCache::new(settings.cache_capacity),
			settings,
		}
	}

	pub fn settings(&self) -> &NegotiationSettings {
		&self.settings
	}

	/// Returns the (possibly cached) acceptor for the request's `Accept` header.
	pub fn media_acceptor(&self, headers: &HeaderMap) -> NegotiationResult<Arc<MediaTypeAcceptor>> {
		let value = accept_value(headers)?;
		self.media.get_or_parse(value.as_deref(), MediaTypeAcceptor::new)
	}

	/// Returns the (possibly cached) acceptor for the request's
	/// `Accept-Language` header.
	pub fn language_acceptor(&self, headers: &HeaderMap) -> Arc<LanguageAcceptor> {
		let value = accept_language_value(headers);
		self.languages.get_or_build(value.as_deref(), LanguageAcceptor::new)
	}

	/// Picks the media type to respond with.
	///
	/// # Errors
	///
	/// [`NegotiationError::MalformedMediaRange`] for an unparseable `Accept`
	/// header, [`NegotiationError::NoAcceptableRepresentation`] when no
	/// candidate is acceptable.
	pub fn media_type<'c, S: AsRef<str>>(
		&self,
		headers: &HeaderMap,
		candidates: &'c [S],
	) -> NegotiationResult<&'c str> {
		let chosen = self.media_acceptor(headers)?.preferred(candidates);
		tracing::debug!(offered = candidates.len(), chosen, "negotiated media type");
		chosen.ok_or(NegotiationError::NoAcceptableRepresentation {
			offered: candidates.len(),
		})
	}

	/// Picks the language to respond in.
	///
	/// When no candidate is acceptable, the configured fallback language is
	/// chosen if it is among the candidates.
	///
	/// # Errors
	///
	/// [`NegotiationError::NoAcceptableRepresentation`] when neither a
	/// candidate nor the fallback can be served.
	pub fn language<'c, S: AsRef<str>>(
		&self,
		headers: &HeaderMap,
		candidates: &'c [S],
	) -> NegotiationResult<&'c str> {
		let chosen = self
			.language_acceptor(headers)
			.preferred(candidates)
			.or_else(|| self.fallback_language(candidates));
		tracing::debug!(offered = candidates.len(), chosen, "negotiated language");
		chosen.ok_or(NegotiationError::NoAcceptableRepresentation {
			offered: candidates.len(),
		})
	}

	fn fallback_language<'c, S: AsRef<str>>(&self, candidates: &'c [S]) -> Option<&'c str> {
		let fallback = self.settings.fallback_language.as_deref()?;
		candidates
			.iter()
			.map(|candidate| candidate.as_ref())
			.find(|candidate| *candidate == fallback)
	}

	pub fn media_cache_statistics(&self) -> CacheStatistics {
		self.media.statistics()
	}

	pub fn language_cache_statistics(&self) -> CacheStatistics {
		self.languages.statistics()
	}
}

impl Default for Negotiator {
	fn default() -> Self {
		Self::new(NegotiationSettings::default())
	}
}
