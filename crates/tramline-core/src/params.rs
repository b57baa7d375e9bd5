//! Layered route parameters
//!
//! Bindings form a persistent singly linked list, newest layer first. Pushing
//! a binding allocates one layer whose tail is the previous head; nothing
//! already in the chain is touched. Clones share every layer, so a clone taken
//! before a push keeps reporting exactly what it reported before.
//!
//! Names are not deduplicated. Binding `id` twice yields two layers: lookups
//! see the newer value, enumeration reports `id` twice.

use std::fmt;
use std::sync::Arc;

struct Layer {
    name: Box<str>,
    value: Box<str>,
    next: Option<Arc<Layer>>,
}

/// Route parameters bound to one request
#[derive(Clone, Default)]
pub struct Params {
    head: Option<Arc<Layer>>,
    len: usize,
}

impl Params {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value` on top of the current chain
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let layer = Layer {
            name: name.into().into_boxed_str(),
            value: value.into().into_boxed_str(),
            next: self.head.take(),
        };
        self.head = Some(Arc::new(layer));
        self.len += 1;
    }

    /// Return a new chain with one more binding, leaving `self` as it was
    pub fn with(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = self.clone();
        params.push(name, value);
        params
    }

    /// Value most recently bound to `name`, if any
    ///
    /// ```
    /// use tramline_core::Params;
    ///
    /// let mut params = Params::new();
    /// params.push("id", "1");
    /// params.push("id", "2");
    /// assert_eq!(params.get("id"), Some("2"));
    /// assert_eq!(params.get("name"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Whether `name` has been bound at least once
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bound names, most recently pushed first, duplicates included
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(name, _)| name)
    }

    /// `(name, value)` pairs, most recently pushed first
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Number of bindings, counting shadowed ones
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// Unlink iteratively; a long exclusively-owned chain would otherwise recurse
// once per layer on drop.
impl Drop for Params {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(layer) = next {
            next = Arc::into_inner(layer).and_then(|mut layer| layer.next.take());
        }
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Pushes pairs in iteration order, so the last pair ends up on top.
impl<N, V> FromIterator<(N, V)> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<N, V> Extend<(N, V)> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.push(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over `(name, value)` bindings, newest first
pub struct Iter<'a> {
    next: Option<&'a Layer>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let layer = self.next?;
        self.next = layer.next.as_deref();
        Some((&*layer.name, &*layer.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
        assert_eq!(params.get("id"), None);
        assert_eq!(params.names().count(), 0);
    }

    #[test]
    fn test_names_newest_first() {
        let mut params = Params::new();
        params.push("id", "42");
        params.push("name", "bob");

        assert_eq!(params.names().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("name"), Some("bob"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_shadowing_keeps_duplicates() {
        let mut params = Params::new();
        params.push("id", "1");
        params.push("id", "2");

        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["id", "id"]);
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("id", "2"), ("id", "1")]
        );
    }

    #[test]
    fn test_empty_value_is_present() {
        let mut params = Params::new();
        params.push("tag", "");

        assert_eq!(params.get("tag"), Some(""));
        assert!(params.contains("tag"));
        assert!(!params.contains("other"));
    }

    #[test]
    fn test_clone_is_isolated_from_push() {
        let mut params = Params::new();
        params.push("id", "42");
        let before = params.clone();

        params.push("id", "43");
        params.push("page", "2");

        assert_eq!(before.get("id"), Some("42"));
        assert_eq!(before.get("page"), None);
        assert_eq!(before.names().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["page", "id", "id"]);
    }

    #[test]
    fn test_with_leaves_original() {
        let base: Params = [("org", "acme")].into_iter().collect();
        let extended = base.with("team", "core");

        assert_eq!(base.len(), 1);
        assert_eq!(base.get("team"), None);
        assert_eq!(extended.get("team"), Some("core"));
        assert_eq!(extended.get("org"), Some("acme"));
    }

    #[test]
    fn test_from_iter_match_order() {
        let params: Params = vec![
            ("orgId".to_string(), "org1".to_string()),
            ("teamId".to_string(), "team2".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.names().collect::<Vec<_>>(), vec!["teamId", "orgId"]);
    }

    #[test]
    fn test_debug_lists_pairs() {
        let params: Params = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(format!("{:?}", params), r#"[("b", "2"), ("a", "1")]"#);
    }

    #[test]
    fn test_long_chain_drops() {
        let mut params = Params::new();
        for i in 0..200_000 {
            params.push("n", i.to_string());
        }
        assert_eq!(params.get("n"), Some("199999"));
        drop(params);
    }

    #[test]
    fn test_drop_keeps_shared_tail() {
        let mut params = Params::new();
        params.push("a", "1");
        let snapshot = params.clone();
        params.push("b", "2");
        drop(params);

        assert_eq!(snapshot.get("a"), Some("1"));
    }

    #[test]
    fn test_shared_long_tail_dropped_concurrently() {
        let mut base = Params::new();
        for i in 0..200_000 {
            base.push("n", i.to_string());
        }
        let left = base.with("side", "left");
        let right = base.with("side", "right");
        drop(base);

        let barrier = std::sync::Arc::new(std::sync::Barrier::new(2));
        let handles: Vec<_> = [left, right]
            .into_iter()
            .map(|params| {
                let barrier = std::sync::Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    drop(params);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_snapshot_across_threads() {
        let mut params = Params::new();
        params.push("id", "7");
        let snapshot = params.clone();

        let handle = std::thread::spawn(move || {
            (snapshot.get("id").map(str::to_string), snapshot.len())
        });
        params.push("id", "8");

        assert_eq!(handle.join().unwrap(), (Some("7".to_string()), 1));
        assert_eq!(params.get("id"), Some("8"));
    }
}
