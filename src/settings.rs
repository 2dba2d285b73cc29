//! Negotiation settings
//!
//! Settings can be built in code or loaded from a TOML document:
//!
//! ```toml
//! cache_capacity = 512
//! fallback_language = "en"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of distinct header values remembered per acceptor cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Settings for a [`Negotiator`](crate::Negotiator).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationSettings {
	/// Maximum number of parsed headers kept per cache; 0 disables caching.
	#[serde(default = "default_cache_capacity")]
	pub cache_capacity: usize,

	/// Language served when none of the offered languages is acceptable,
	/// provided it is itself one of the offered languages.
	#[serde(default)]
	pub fallback_language: Option<String>,
}

fn default_cache_capacity() -> usize {
	DEFAULT_CACHE_CAPACITY
}

impl Default for NegotiationSettings {
	fn default() -> Self {
		Self {
			cache_capacity: DEFAULT_CACHE_CAPACITY,
			fallback_language: None,
		}
	}
}

impl NegotiationSettings {
	/// Loads settings from a TOML document. Missing keys take their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::NegotiationSettings;
	///
	/// let settings = NegotiationSettings::from_toml_str("fallback_language = \"ja\"").unwrap();
	/// assert_eq!(settings.fallback_language.as_deref(), Some("ja"));
	/// assert_eq!(settings.cache_capacity, 256);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Sets the cache capacity
	pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
		self.cache_capacity = capacity;
		self
	}

	/// Sets the fallback language
	pub fn with_fallback_language(mut self, tag: impl Into<String>) -> Self {
		self.fallback_language = Some(tag.into());
		self
	}
}

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The document is not valid TOML or has mistyped values.
	#[error("Invalid negotiation settings: {0}")]
	Toml(#[from] toml::de::Error),
}
