//! Domain entities - the core business objects.

mod post;
mod tag;
mod user;

pub use post::{Post, PostDraft, PostId};
pub use tag::{Tag, TagId};
pub use user::{NewUser, User, UserId};
