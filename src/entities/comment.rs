//! Comments left on posts

use crate::core::specification::Specification;
use uuid::Uuid;

crate::impl_entity!(
    Comment,
    "comment",
    "comments",
    {
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    }
);

/// Comments whose body contains `text` (case-sensitive)
pub fn body_contains(text: impl Into<String>) -> Specification<Comment> {
    let text = text.into();
    Specification::named(format!("comment body contains {:?}", text), move |c: &Comment| {
        c.body.contains(text.as_str())
    })
}

/// Comments attached to one post
pub fn on_post(post_id: Uuid) -> Specification<Comment> {
    Specification::named("comment on post", move |c: &Comment| c.post_id == post_id)
}

pub fn by_author(author_id: Uuid) -> Specification<Comment> {
    Specification::named("comment by author", move |c: &Comment| c.author_id == author_id)
}
