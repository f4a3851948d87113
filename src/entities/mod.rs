//! Blog entities
//!
//! Each entity is declared with [`impl_entity!`](crate::impl_entity) and comes
//! with named specification constructors in its module.

#[macro_use]
pub mod macros;

pub mod blog;
pub mod comment;
pub mod message;
pub mod post;
pub mod profile;
pub mod tag;

pub use blog::BlogServices;
pub use comment::Comment;
pub use message::Message;
pub use post::Post;
pub use profile::Profile;
pub use tag::{PostTag, Tag};
