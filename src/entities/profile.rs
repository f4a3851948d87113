//! User profiles

use crate::core::error::StoreError;
use crate::core::specification::Specification;
use crate::core::store::QueryableStore;
use crate::entities::post::Post;
use std::collections::HashMap;
use uuid::Uuid;

crate::impl_entity!(
    Profile,
    "profile",
    "profiles",
    {
        user_name: String,
        display_name: String,
        email: String,
        bio: Option<String>,
    },
    relations {
        posts: Vec<Post>,
    }
);

pub fn user_name_is(user_name: impl Into<String>) -> Specification<Profile> {
    let user_name = user_name.into();
    Specification::named(format!("profile {:?}", user_name), move |p: &Profile| {
        p.user_name == user_name
    })
}

/// Case-insensitive match on the display name
pub fn display_name_contains(text: impl Into<String>) -> Specification<Profile> {
    let needle = text.into().to_lowercase();
    Specification::named(format!("display name contains {:?}", needle), move |p: &Profile| {
        p.display_name.to_lowercase().contains(needle.as_str())
    })
}

pub fn has_bio() -> Specification<Profile> {
    Specification::named("profile with bio", |p: &Profile| {
        p.bio.as_deref().is_some_and(|bio| !bio.trim().is_empty())
    })
}

/// Loader for the `posts` include: every post authored by the profile, newest first
pub fn load_posts<S>(posts: S) -> impl Fn(&mut [Profile]) -> Result<(), StoreError> + Send + Sync + 'static
where
    S: QueryableStore<Post> + 'static,
{
    move |profiles: &mut [Profile]| {
        let mut by_author: HashMap<Uuid, Vec<Post>> = HashMap::new();
        for post in posts.list_all()? {
            by_author.entry(post.author_id).or_default().push(post);
        }

        for profile in profiles.iter_mut() {
            let mut authored = by_author.remove(&profile.id).unwrap_or_default();
            authored.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
            profile.posts = authored;
        }
        Ok(())
    }
}
