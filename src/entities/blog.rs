//! Wiring for the blog's entity services

use crate::config::QueryConfig;
use crate::core::service::EntityService;
use crate::entities::comment::Comment;
use crate::entities::message::Message;
use crate::entities::post::{self, Post};
use crate::entities::profile::{self, Profile};
use crate::entities::tag::{PostTag, Tag};
use crate::storage::in_memory::InMemoryRepository;
use std::sync::Arc;

pub type PostService = EntityService<Post, InMemoryRepository<Post>>;
pub type CommentService = EntityService<Comment, InMemoryRepository<Comment>>;
pub type TagService = EntityService<Tag, InMemoryRepository<Tag>>;
pub type PostTagService = EntityService<PostTag, InMemoryRepository<PostTag>>;
pub type MessageService = EntityService<Message, InMemoryRepository<Message>>;
pub type ProfileService = EntityService<Profile, InMemoryRepository<Profile>>;

/// One service per blog entity, all backed by in-memory repositories.
///
/// Relation includes are registered here:
/// - posts: `comments`, `tags`
/// - profiles: `posts`
#[derive(Clone)]
pub struct BlogServices {
    pub posts: PostService,
    pub comments: CommentService,
    pub tags: TagService,
    pub post_tags: PostTagService,
    pub messages: MessageService,
    pub profiles: ProfileService,
}

impl BlogServices {
    pub fn in_memory(config: QueryConfig) -> Self {
        let comments = InMemoryRepository::<Comment>::with_config(config.clone());
        let tags = InMemoryRepository::<Tag>::with_config(config.clone());
        let post_tags = InMemoryRepository::<PostTag>::with_config(config.clone());
        let messages = InMemoryRepository::<Message>::with_config(config.clone());

        let posts = InMemoryRepository::<Post>::with_config(config.clone())
            .with_include("comments", post::load_comments(comments.clone()))
            .with_include("tags", post::load_tags(post_tags.clone(), tags.clone()));

        let profiles = InMemoryRepository::<Profile>::with_config(config.clone())
            .with_include("posts", profile::load_posts(posts.clone()));

        tracing::debug!(
            post_includes = ?posts.include_paths(),
            profile_includes = ?profiles.include_paths(),
            "Initialized in-memory blog services"
        );

        Self {
            posts: EntityService::new(Arc::new(posts), config.clone()),
            comments: EntityService::new(Arc::new(comments), config.clone()),
            tags: EntityService::new(Arc::new(tags), config.clone()),
            post_tags: EntityService::new(Arc::new(post_tags), config.clone()),
            messages: EntityService::new(Arc::new(messages), config.clone()),
            profiles: EntityService::new(Arc::new(profiles), config),
        }
    }
}

impl Default for BlogServices {
    fn default() -> Self {
        Self::in_memory(QueryConfig::default())
    }
}
