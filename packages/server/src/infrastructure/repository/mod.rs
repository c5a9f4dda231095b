//! Repository implementations.

mod inmemory;

pub use inmemory::{InMemoryGameRepository, InMemoryMotdRepository, InMemoryPlayerRepository};
