//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! Storage goes through SeaORM; PostgreSQL and SQLite are both supported and
//! the database URL picks the driver.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Storage only
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{
    DatabaseConfig, DbHandle, SeaOrmPostRepository, SeaOrmTagResolver, SeaOrmUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
