pub mod key_cache;

pub use key_cache::{CachedKeyHandle, KeyCache};
