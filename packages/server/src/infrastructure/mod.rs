//! Infrastructure layer: concrete implementations of the domain
//! interfaces plus the HTTP response DTOs.

pub mod dto;
pub mod provider;
pub mod repository;
