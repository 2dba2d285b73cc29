//! Bounded memo of parsed acceptors.
//!
//! Browsers send a handful of distinct `Accept` values, so a server that
//! negotiates on every request can parse each distinct value once and share
//! the immutable acceptor between requests.

use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Hit and miss counters of an [`AcceptorCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatistics {
	pub hits: u64,
	pub misses: u64,
	pub entries: usize,
}

impl CacheStatistics {
	/// Fraction of lookups served from the cache, 0.0 before any lookup.
	pub fn hit_rate(&self) -> f64 {
		let total = self.hits + self.misses;
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}
}

#[derive(Debug)]
struct Store<A> {
	entries: HashMap<String, Arc<A>>,
	insertion: VecDeque<String>,
}

/// Acceptors keyed by the raw header value, evicted oldest first.
///
/// An absent header and an empty header share one entry since they parse to
/// the same acceptor. Parse failures are never stored.
#[derive(Debug)]
pub struct AcceptorCache<A> {
	capacity: usize,
	store: RwLock<Store<A>>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl<A> AcceptorCache<A> {
	/// Creates a cache holding at most `capacity` acceptors.
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			store: RwLock::new(Store {
				entries: HashMap::new(),
				insertion: VecDeque::new(),
			}),
			hits: AtomicU64::new(0),
			misses: AtomicU64::new(0),
		}
	}

	/// Returns the cached acceptor for `header`, parsing and storing it on a
	/// miss.
	///
	/// # Examples
	///
	/// ```
	/// use conneg::{AcceptorCache, MediaTypeAcceptor};
	/// use std::sync::Arc;
	///
	/// let cache = AcceptorCache::new(16);
	/// let first = cache.get_or_parse(Some("text/html"), MediaTypeAcceptor::new).unwrap();
	/// let second = cache.get_or_parse(Some("text/html"), MediaTypeAcceptor::new).unwrap();
	/// assert!(Arc::ptr_eq(&first, &second));
	/// assert_eq!(cache.statistics().hits, 1);
	/// ```
	pub fn get_or_parse<E, F>(&self, header: Option<&str>, parse: F) -> Result<Arc<A>, E>
	where
		F: FnOnce(Option<&str>) -> Result<A, E>,
	{
		let key = header.unwrap_or_default();
		if let Some(acceptor) = self.store.read().entries.get(key) {
			self.hits.fetch_add(1, Ordering::Relaxed);
			return Ok(Arc::clone(acceptor));
		}

		self.misses.fetch_add(1, Ordering::Relaxed);
		let acceptor = Arc::new(parse(header)?);
		if self.capacity == 0 {
			return Ok(acceptor);
		}

		let mut store = self.store.write();
		if let Some(existing) = store.entries.get(key) {
			// Another thread parsed the same header meanwhile
			return Ok(Arc::clone(existing));
		}
		while store.entries.len() >= self.capacity {
			let Some(oldest) = store.insertion.pop_front() else {
				break;
			};
			store.entries.remove(&oldest);
			tracing::trace!(header = %oldest, "evicted cached acceptor");
		}
		store.insertion.push_back(key.to_string());
		store.entries.insert(key.to_string(), Arc::clone(&acceptor));
		Ok(acceptor)
	}

	/// Like [`get_or_parse`](Self::get_or_parse) for acceptors whose parsing
	/// cannot fail.
	pub fn get_or_build<F>(&self, header: Option<&str>, build: F) -> Arc<A>
	where
		F: FnOnce(Option<&str>) -> A,
	{
		let Ok(acceptor) = self.get_or_parse(header, |header| Ok::<_, Infallible>(build(header)));
		acceptor
	}

	/// Maximum number of stored acceptors.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.store.read().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every stored acceptor. Statistics are kept.
	pub fn clear(&self) {
		let mut store = self.store.write();
		store.entries.clear();
		store.insertion.clear();
	}

	pub fn statistics(&self) -> CacheStatistics {
		CacheStatistics {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			entries: self.len(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::NegotiationError;
	use crate::language::LanguageAcceptor;
	use crate::media::MediaTypeAcceptor;
	use rstest::rstest;

	#[rstest]
	fn test_hits_and_misses() {
		let cache = AcceptorCache::new(4);
		cache.get_or_build(Some("en"), LanguageAcceptor::new);
		cache.get_or_build(Some("en"), LanguageAcceptor::new);
		cache.get_or_build(Some("fr"), LanguageAcceptor::new);

		let stats = cache.statistics();
		assert_eq!(stats.hits, 1);
		assert_eq!(stats.misses, 2);
		assert_eq!(stats.entries, 2);
		assert_eq!(stats.hit_rate(), 1.0 / 3.0);
	}

	#[rstest]
	fn test_absent_and_empty_share_an_entry() {
		let cache = AcceptorCache::new(4);
		let absent = cache.get_or_build(None, LanguageAcceptor::new);
		let empty = cache.get_or_build(Some(""), LanguageAcceptor::new);
		assert!(Arc::ptr_eq(&absent, &empty));
		assert!(empty.is_universal());
	}

	#[rstest]
	fn test_oldest_entry_is_evicted() {
		let cache = AcceptorCache::new(2);
		cache.get_or_build(Some("a"), LanguageAcceptor::new);
		cache.get_or_build(Some("b"), LanguageAcceptor::new);
		cache.get_or_build(Some("c"), LanguageAcceptor::new);
		assert_eq!(cache.len(), 2);

		// "a" was evicted and is parsed again
		cache.get_or_build(Some("a"), LanguageAcceptor::new);
		assert_eq!(cache.statistics().misses, 4);
		cache.get_or_build(Some("c"), LanguageAcceptor::new);
		assert_eq!(cache.statistics().hits, 1);
	}

	#[rstest]
	fn test_zero_capacity_never_stores() {
		let cache = AcceptorCache::new(0);
		let first = cache.get_or_build(Some("en"), LanguageAcceptor::new);
		let second = cache.get_or_build(Some("en"), LanguageAcceptor::new);
		assert!(!Arc::ptr_eq(&first, &second));
		assert!(cache.is_empty());
		assert_eq!(cache.statistics().misses, 2);
	}

	#[rstest]
	fn test_failures_are_not_cached() {
		let cache: AcceptorCache<MediaTypeAcceptor> = AcceptorCache::new(4);
		let result = cache.get_or_parse(Some("html"), MediaTypeAcceptor::new);
		assert!(matches!(
			result,
			Err(NegotiationError::MalformedMediaRange { .. })
		));
		assert!(cache.is_empty());
	}

	#[rstest]
	fn test_clear() {
		let cache = AcceptorCache::new(4);
		cache.get_or_build(Some("en"), LanguageAcceptor::new);
		cache.clear();
		assert!(cache.is_empty());
		assert_eq!(cache.statistics().misses, 1);
	}
}
