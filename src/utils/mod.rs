// Utils compartidos

pub mod constants;
pub mod latency;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use latency::simulate_latency;
pub use storage::{load_json, save_json, KeyValueStore, LocalStorageStore, MemoryStore};
