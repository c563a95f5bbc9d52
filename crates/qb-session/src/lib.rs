//! Keyed, concurrency-safe session storage.
//!
//! Sessions own the player state between requests; the engine itself
//! only ever sees a borrowed state. Callers must serialize the
//! get-modify-put cycle per session key (at most one in-flight
//! resolution per session), or concurrent writers will lose updates;
//! the store guarantees atomicity per operation, not per cycle.

mod memory;

pub use memory::MemoryStore;

/// A keyed value store for session state.
pub trait Store<T> {
    /// Retrieve a value by ID, if present.
    fn get(&self, id: &str) -> Option<T>;

    /// Store a value under the given ID, replacing any previous value.
    fn put(&self, id: &str, value: T);

    /// Generate a new collision-resistant unique session ID.
    fn new_id(&self) -> String;
}
