//! autoposter domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `derive`: Title, slug and cross-post text derivation
//! - `usecases`: Application use cases / business logic

pub mod derive;
pub mod model;
pub mod ports;
pub mod usecases;

pub use model::*;
pub use ports::*;
