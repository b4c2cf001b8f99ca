//! Service definition storage adapters.

mod memory;

pub use memory::InMemoryServiceStore;
