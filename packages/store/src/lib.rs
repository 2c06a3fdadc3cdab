pub mod cache;
pub mod config;
pub mod session;

mod memory;
pub use memory::MemorySessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageSessionStore;

pub use cache::{CacheHit, CachePolicy, Freshness, QueryCache, QueryKey, Resource};
pub use config::{AdminConfig, ConfigError};
pub use session::{SessionStore, TOKEN_STORAGE_KEY};
