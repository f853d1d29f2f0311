//! Thread-local mapped diagnostic context.
//!
//! Loggers copy the calling thread's context into every event they record.

use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    static CONTEXT: RefCell<BTreeMap<String, String>> = const { RefCell::new(BTreeMap::new()) };
}

/// Associate `value` with `key`; an absent value is stored as `"null"`.
pub fn put(key: impl Into<String>, value: Option<&str>) {
    let value = value.unwrap_or("null").to_owned();
    CONTEXT.with_borrow_mut(|ctx| ctx.insert(key.into(), value));
}

pub fn get(key: &str) -> Option<String> {
    CONTEXT.with_borrow(|ctx| ctx.get(key).cloned())
}

pub fn remove(key: &str) {
    CONTEXT.with_borrow_mut(|ctx| ctx.remove(key));
}

pub fn clear() {
    CONTEXT.with_borrow_mut(BTreeMap::clear);
}

/// Snapshot of the calling thread's context.
pub fn copy_of_context_map() -> BTreeMap<String, String> {
    CONTEXT.with_borrow(Clone::clone)
}

/// Replace the calling thread's context with a copy of `map`.
pub fn set_context_map<K, V>(map: impl IntoIterator<Item = (K, V)>)
where
    K: Into<String>,
    V: Into<String>,
{
    let map = map.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    CONTEXT.set(map);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_thread_local() {
        clear();
        put("request", Some("42"));
        let remote = std::thread::spawn(|| get("request"))
            .join()
            .expect("worker thread panicked");
        assert_eq!(remote, None);
        assert_eq!(get("request").as_deref(), Some("42"));
        clear();
    }

    #[test]
    fn absent_value_is_stored_as_null() {
        clear();
        put("user", None);
        assert_eq!(get("user").as_deref(), Some("null"));
        remove("user");
        assert!(copy_of_context_map().is_empty());
    }

    #[test]
    fn snapshot_is_detached() {
        set_context_map([("a", "1")]);
        let snapshot = copy_of_context_map();
        put("a", Some("2"));
        assert_eq!(snapshot.get("a").map(String::as_str), Some("1"));
        clear();
    }
}
