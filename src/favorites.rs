//! In-memory favorite-countries set
//!
//! Process-wide volatile state: created empty at startup, cleared on
//! restart. Names are stored in canonical title-cased form; callers
//! canonicalize before touching the set. The mutex is held only for the
//! set operation itself, never across an await point.

use std::collections::BTreeSet;
use std::sync::Mutex;

/// Lock-guarded set of favorited country names
#[derive(Debug, Default)]
pub struct Favorites {
    inner: Mutex<BTreeSet<String>>,
}

impl Favorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a canonical name; true if it was newly added, false if it
    /// was already present. Set semantics, so adding twice never
    /// duplicates.
    pub fn add(&self, name: &str) -> bool {
        self.lock().insert(name.to_string())
    }

    /// Remove a canonical name; false when it was not present — an
    /// ordinary negative result, not an error.
    pub fn remove(&self, name: &str) -> bool {
        self.lock().remove(name)
    }

    /// Current membership, in sorted order
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.inner.lock().expect("favorites mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let favorites = Favorites::new();
        assert!(favorites.add("Belgium"));
        assert!(!favorites.add("Belgium"));
        assert_eq!(favorites.list(), vec!["Belgium".to_string()]);
    }

    #[test]
    fn test_remove_absent_is_false() {
        let favorites = Favorites::new();
        assert!(!favorites.remove("Belgium"));
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let favorites = Favorites::new();
        favorites.add("France");
        let before = favorites.list();

        favorites.add("Belgium");
        assert!(favorites.remove("Belgium"));
        assert_eq!(favorites.list(), before);
    }

    #[test]
    fn test_list_is_sorted() {
        let favorites = Favorites::new();
        favorites.add("Peru");
        favorites.add("Belgium");
        favorites.add("France");
        assert_eq!(
            favorites.list(),
            vec![
                "Belgium".to_string(),
                "France".to_string(),
                "Peru".to_string()
            ]
        );
    }

    #[test]
    fn test_concurrent_adds_do_not_lose_updates() {
        use std::sync::Arc;

        let favorites = Arc::new(Favorites::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let favorites = Arc::clone(&favorites);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        favorites.add(&format!("Country {i}-{j}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(favorites.list().len(), 8 * 50);
    }
}
