//! Tags and the post/tag join entity

use crate::core::specification::Specification;
use uuid::Uuid;

crate::impl_entity!(
    Tag,
    "tag",
    "tags",
    {
        name: String,
    }
);

crate::impl_entity!(
    PostTag,
    "post_tag",
    "post_tags",
    {
        post_id: Uuid,
        tag_id: Uuid,
    }
);

/// Tag with exactly this name
pub fn name_is(name: impl Into<String>) -> Specification<Tag> {
    let name = name.into();
    Specification::named(format!("tag named {:?}", name), move |t: &Tag| t.name == name)
}

pub fn name_starts_with(prefix: impl Into<String>) -> Specification<Tag> {
    let prefix = prefix.into();
    Specification::named(format!("tag starts with {:?}", prefix), move |t: &Tag| {
        t.name.starts_with(prefix.as_str())
    })
}

/// Join rows for one post
pub fn tags_of_post(post_id: Uuid) -> Specification<PostTag> {
    Specification::named("post_tag for post", move |pt: &PostTag| pt.post_id == post_id)
}

/// Join rows for one tag
pub fn posts_with_tag(tag_id: Uuid) -> Specification<PostTag> {
    Specification::named("post_tag for tag", move |pt: &PostTag| pt.tag_id == tag_id)
}
