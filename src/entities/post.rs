//! Blog posts and their relation loaders

use crate::core::error::StoreError;
use crate::core::specification::Specification;
use crate::core::store::QueryableStore;
use crate::entities::comment::Comment;
use crate::entities::tag::{PostTag, Tag};
use std::collections::HashMap;
use uuid::Uuid;

crate::impl_entity!(
    Post,
    "post",
    "posts",
    {
        author_id: Uuid,
        title: String,
        body: String,
        published: bool,
        view_count: i64,
    },
    relations {
        comments: Vec<Comment>,
        tags: Vec<Tag>,
    }
);

pub fn published() -> Specification<Post> {
    Specification::named("published post", |p: &Post| p.published)
}

pub fn by_author(author_id: Uuid) -> Specification<Post> {
    Specification::named("post by author", move |p: &Post| p.author_id == author_id)
}

/// Posts whose title contains `text` (case-sensitive)
pub fn title_contains(text: impl Into<String>) -> Specification<Post> {
    let text = text.into();
    Specification::named(format!("post title contains {:?}", text), move |p: &Post| {
        p.title.contains(text.as_str())
    })
}

/// Posts viewed at least `views` times
pub fn min_views(views: i64) -> Specification<Post> {
    Specification::named(format!("post with at least {} views", views), move |p: &Post| {
        p.view_count >= views
    })
}

/// Loader for the `comments` include.
///
/// Each post receives its comments oldest first.
pub fn load_comments<S>(comments: S) -> impl Fn(&mut [Post]) -> Result<(), StoreError> + Send + Sync + 'static
where
    S: QueryableStore<Comment> + 'static,
{
    move |posts: &mut [Post]| {
        let mut by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in comments.list_all()? {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        for post in posts.iter_mut() {
            let mut attached = by_post.remove(&post.id).unwrap_or_default();
            attached.sort_by_key(|c| (c.created_at, c.id));
            post.comments = attached;
        }
        Ok(())
    }
}

/// Loader for the `tags` include, resolved through the post/tag join rows.
///
/// A join row pointing at a missing tag is a [`StoreError::Relation`].
pub fn load_tags<J, S>(post_tags: J, tags: S) -> impl Fn(&mut [Post]) -> Result<(), StoreError> + Send + Sync + 'static
where
    J: QueryableStore<PostTag> + 'static,
    S: QueryableStore<Tag> + 'static,
{
    move |posts: &mut [Post]| {
        let tags_by_id: HashMap<Uuid, Tag> = tags.list_all()?.into_iter().map(|t| (t.id, t)).collect();

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for link in post_tags.list_all()? {
            let tag = tags_by_id.get(&link.tag_id).ok_or_else(|| StoreError::Relation {
                path: "tags".to_string(),
                message: format!("post_tag {} references missing tag {}", link.id, link.tag_id),
            })?;
            by_post.entry(link.post_id).or_default().push(tag.clone());
        }

        for post in posts.iter_mut() {
            let mut attached = by_post.remove(&post.id).unwrap_or_default();
            attached.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            post.tags = attached;
        }
        Ok(())
    }
}
