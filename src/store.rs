//! The in-memory user store.
//!
//! Ordered, append-only, process-lifetime. There is no update, no delete,
//! and no persistence — restarting the process resets the store to its two
//! seed records.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A user record.
///
/// `age` is a raw JSON number rather than a fixed integer type: the API
/// accepts any numeric age and echoes it back exactly as it was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: Number,
}

/// The shared user store.
///
/// Handlers receive it as an `Arc<UserStore>`; the record list lives behind
/// a single mutex. [`create`](UserStore::create) computes the next id and
/// appends under one lock acquisition, so concurrent creates always produce
/// unique, sequential ids.
pub struct UserStore {
    users: Mutex<Vec<User>>,
}

impl UserStore {
    /// A store holding the two fixed seed records.
    pub fn seeded() -> Self {
        Self {
            users: Mutex::new(vec![
                User { id: "1".to_owned(), name: "John".to_owned(), age: Number::from(20) },
                User { id: "2".to_owned(), name: "Jane".to_owned(), age: Number::from(21) },
            ]),
        }
    }

    /// Returns the first record whose id equals `id`.
    ///
    /// Ids are unique, so "first" is also "only"; a linear scan over a store
    /// this size beats maintaining an index.
    pub fn get(&self, id: &str) -> Option<User> {
        self.lock().iter().find(|user| user.id == id).cloned()
    }

    /// Appends a new record and returns it.
    ///
    /// The id is the stringified 1-based insertion position. Records are
    /// never removed, so the position is `len + 1` at append time.
    pub fn create(&self, name: String, age: Number) -> User {
        let mut users = self.lock();
        let user = User { id: (users.len() + 1).to_string(), name, age };
        users.push(user.clone());
        user
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        // A poisoned lock means a panic mid-append; the list itself is still
        // structurally sound, so keep serving.
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn seeds_john_and_jane() {
        let store = UserStore::seeded();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("1"),
            Some(User { id: "1".into(), name: "John".into(), age: Number::from(20) }),
        );
        assert_eq!(store.get("2").map(|u| u.name), Some("Jane".to_owned()));
    }

    #[test]
    fn get_miss_is_none() {
        assert_eq!(UserStore::seeded().get("299"), None);
    }

    #[test]
    fn create_assigns_sequential_string_ids() {
        let store = UserStore::seeded();
        let third = store.create("testUser".into(), Number::from(99));
        assert_eq!(third.id, "3");
        let fourth = store.create("another".into(), Number::from(30));
        assert_eq!(fourth.id, "4");
        assert_eq!(store.get("3"), Some(third));
    }

    #[test]
    fn concurrent_creates_never_collide() {
        let store = Arc::new(UserStore::seeded());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|j| store.create(format!("u{i}-{j}"), Number::from(i)).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("writer thread"))
            .collect();
        ids.sort_unstable_by_key(|id| id.parse::<usize>().expect("numeric id"));
        ids.dedup();

        // 2 seeds + 200 creates, every id distinct and the range contiguous.
        assert_eq!(ids.len(), 200);
        assert_eq!(store.len(), 202);
        assert_eq!(ids.first().map(String::as_str), Some("3"));
        assert_eq!(ids.last().map(String::as_str), Some("202"));
    }

    #[test]
    fn age_round_trips_integers_exactly() {
        let user = User { id: "1".into(), name: "John".into(), age: Number::from(20) };
        let json = serde_json::to_string(&user).expect("serialize");
        assert_eq!(json, r#"{"id":"1","name":"John","age":20}"#);
    }
}
