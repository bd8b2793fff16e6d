//! State holders for data that arrives asynchronously from the API.
//!
//! `Remote` tracks a single fetch. `KeyedQuery` tracks a fetch that depends on
//! some input (e.g. barber and date): it remembers the key it was started
//! with and refuses results for any other key, so a slow response for an old
//! input can never overwrite the current one.

/// Outcome of feeding a response into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response matched the in-flight request and was stored.
    Applied,
    /// The response belonged to a request that is no longer current.
    Stale,
}

/// Lifecycle of a single remote value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Remote<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// True when a fetch should be issued: nothing loaded yet or the last one failed.
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Remote::Idle | Remote::Failed(_))
    }

    pub fn resolve(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => Remote::Ready(value),
            Err(message) => Remote::Failed(message),
        };
    }
}

/// A remote value keyed on the input that produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum KeyedQuery<K, T> {
    #[default]
    Idle,
    Loading(K),
    Ready { key: K, value: T },
    Failed { key: K, message: String },
}

impl<K: Clone + PartialEq, T> KeyedQuery<K, T> {
    /// Start a query for `key`, dropping whatever was there before.
    pub fn begin(&mut self, key: K) {
        *self = KeyedQuery::Loading(key);
    }

    pub fn reset(&mut self) {
        *self = KeyedQuery::Idle;
    }

    /// Store `result` only if `key` is the key currently being loaded.
    pub fn resolve(&mut self, key: &K, result: Result<T, String>) -> Resolution {
        match self {
            KeyedQuery::Loading(current) if current == key => {}
            _ => return Resolution::Stale,
        }
        *self = match result {
            Ok(value) => KeyedQuery::Ready {
                key: key.clone(),
                value,
            },
            Err(message) => KeyedQuery::Failed {
                key: key.clone(),
                message,
            },
        };
        Resolution::Applied
    }

    pub fn key(&self) -> Option<&K> {
        match self {
            KeyedQuery::Idle => None,
            KeyedQuery::Loading(key)
            | KeyedQuery::Ready { key, .. }
            | KeyedQuery::Failed { key, .. } => Some(key),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, KeyedQuery::Loading(_))
    }

    /// The loaded value, but only if it was produced for `key`.
    pub fn value_for(&self, key: &K) -> Option<&T> {
        match self {
            KeyedQuery::Ready { key: k, value } if k == key => Some(value),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            KeyedQuery::Ready { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            KeyedQuery::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Settled (ready or failed) for exactly this key, or loading it.
    pub fn tracks(&self, key: &K) -> bool {
        self.key() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_lifecycle() {
        let mut remote: Remote<u32> = Remote::Idle;
        assert!(remote.needs_fetch());
        remote = Remote::Loading;
        assert!(!remote.needs_fetch());
        remote.resolve(Err("boom".to_string()));
        assert_eq!(remote.error(), Some("boom"));
        assert!(remote.needs_fetch());
        remote.resolve(Ok(5));
        assert_eq!(remote.value(), Some(&5));
    }

    #[test]
    fn test_late_response_for_old_key_is_dropped() {
        let mut query: KeyedQuery<u8, &str> = KeyedQuery::Idle;
        query.begin(1);
        query.begin(2);

        assert_eq!(query.resolve(&1, Ok("first")), Resolution::Stale);
        assert!(query.is_loading());

        assert_eq!(query.resolve(&2, Ok("second")), Resolution::Applied);
        assert_eq!(query.value_for(&2), Some(&"second"));

        // Arriving after the current key settled still changes nothing.
        assert_eq!(query.resolve(&1, Ok("first")), Resolution::Stale);
        assert_eq!(query.value(), Some(&"second"));
    }

    #[test]
    fn test_duplicate_response_for_settled_key_is_dropped() {
        let mut query: KeyedQuery<u8, u8> = KeyedQuery::Idle;
        query.begin(1);
        assert_eq!(query.resolve(&1, Ok(10)), Resolution::Applied);
        assert_eq!(query.resolve(&1, Ok(20)), Resolution::Stale);
        assert_eq!(query.value(), Some(&10));
    }

    #[test]
    fn test_failure_keeps_key() {
        let mut query: KeyedQuery<u8, u8> = KeyedQuery::Idle;
        query.begin(3);
        query.resolve(&3, Err("timeout".to_string()));
        assert_eq!(query.error(), Some("timeout"));
        assert!(query.tracks(&3));
        assert!(query.value_for(&3).is_none());
    }

    #[test]
    fn test_resolve_after_reset_is_stale() {
        let mut query: KeyedQuery<u8, u8> = KeyedQuery::Idle;
        query.begin(1);
        query.reset();
        assert_eq!(query.resolve(&1, Ok(1)), Resolution::Stale);
        assert_eq!(query, KeyedQuery::Idle);
    }
}
