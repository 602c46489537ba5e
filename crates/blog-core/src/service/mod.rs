//! Application services - orchestrate ports into use-cases.

mod post_service;

pub use post_service::PostService;
