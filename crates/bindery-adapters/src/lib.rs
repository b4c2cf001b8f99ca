//! Infrastructure adapters for Bindery.
//!
//! This crate implements the ports defined in `bindery-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_services;
pub mod filesystem;
pub mod renderer;
pub mod service_loader;
pub mod service_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsRenderer;
pub use service_loader::FilesystemServiceLoader;
pub use service_store::InMemoryServiceStore;
