//! Database access: storage handle, entities, repositories and tag resolution.

mod error;
mod handle;
mod post_repo;
mod user_repo;

pub mod entity;
pub mod tags;

pub use handle::{DatabaseConfig, DbHandle};
pub use post_repo::SeaOrmPostRepository;
pub use tags::SeaOrmTagResolver;
pub use user_repo::SeaOrmUserRepository;
