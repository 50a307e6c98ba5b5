//! Local storage implementations - JSON file and in-memory fallback.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
