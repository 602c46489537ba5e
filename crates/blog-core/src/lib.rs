//! # Blog Core
//!
//! The domain layer of the blog API.
//! This crate contains the post/tag model, the ownership rules and the port
//! traits, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, DomainResult, RepoError};
pub use service::PostService;
