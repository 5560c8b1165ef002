//! Key-value persistence behind the option store.
//!
//! The store only needs string values under string keys, the shape of the
//! browser's `localStorage`. Tests and native builds use
//! [`InMemoryKeyValueStore`]; wasm builds with the `browser` feature use
//! [`LocalStorageBackend`].

mod in_memory;
#[cfg(feature = "browser")]
mod local;
mod store;

pub use in_memory::InMemoryKeyValueStore;
#[cfg(feature = "browser")]
pub use local::LocalStorageBackend;
pub use store::KeyValueStore;
