//! # conneg
//!
//! HTTP content negotiation following RFC 2616 §14.1 and §14.4.
//!
//! An acceptor is built once from a request's `Accept` or `Accept-Language`
//! value and then answers two questions:
//!
//! - [`accepts`](MediaTypeAcceptor::accepts): is this representation
//!   acceptable at all?
//! - [`preferred`](MediaTypeAcceptor::preferred): which of these
//!   representations suits the client best?
//!
//! Candidates are ranked by the quality of their best matching range, then by
//! how specific that range is (`text/html` over `text/*` over `*/*`), then by
//! where the range was declared in the header. A range with `q=0` never
//! matches. An absent or empty header accepts everything.
//!
//! ```
//! use conneg::{LanguageAcceptor, MediaTypeAcceptor};
//!
//! let chromium = MediaTypeAcceptor::new(Some(
//!     "application/xml,application/xhtml+xml,text/html;q=0.9,text/plain;q=0.8,image/png,*/*;q=0.5",
//! ))
//! .unwrap();
//! assert_eq!(
//!     chromium.preferred(&["image/jpeg", "image/png", "text/plain"]),
//!     Some("image/png")
//! );
//!
//! let english = LanguageAcceptor::new(Some("en-US"));
//! assert!(english.accepts("en"));
//! assert!(!english.accepts("en-GB"));
//! ```
//!
//! A malformed media range (one without `/`) is rejected when the acceptor is
//! built; callers should answer such requests with 400 Bad Request. When
//! `preferred` finds nothing acceptable the answer is 406 Not Acceptable.
//!
//! ## Feature Flags
//!
//! - `http` (default): [`MediaTypeAcceptor::from_headers`],
//!   [`LanguageAcceptor::from_headers`], status-code mapping and the
//!   [`Negotiator`], built on the `http` crate.

pub mod cache;
pub mod error;
#[cfg(feature = "http")]
pub mod headers;
pub mod language;
pub mod media;
#[cfg(feature = "http")]
pub mod negotiator;
pub mod parser;
pub mod range;
pub mod selector;
pub mod settings;

pub use cache::{AcceptorCache, CacheStatistics};
pub use error::{NegotiationError, NegotiationResult};
#[cfg(feature = "http")]
pub use headers::{acceptable_languages, acceptable_media_types};
pub use language::LanguageAcceptor;
pub use media::MediaTypeAcceptor;
#[cfg(feature = "http")]
pub use negotiator::Negotiator;
pub use range::{Pattern, Range, Score, Specificity};
pub use selector::RangeMatcher;
pub use settings::{NegotiationSettings, SettingsError};
