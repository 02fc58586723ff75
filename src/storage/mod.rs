pub mod base;
pub mod memory;

// Re-export the primary Storage items so code outside can do
// "use crate::storage::{Storage, create_storage};"
pub use base::{Storage, StorageError, create_storage, seed_storage};
pub use memory::MemStorage;
