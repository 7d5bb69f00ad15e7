//! Platform discovery, filtering and per-platform counts.

use std::collections::HashSet;

use crate::post::Post;

/// Every platform named by any post, in first-seen order. Case-sensitive.
pub fn distinct_platforms<'a, I>(posts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut seen = HashSet::new();
    let mut platforms = Vec::new();

    for post in posts {
        for platform in &post.platforms {
            if seen.insert(platform.as_str()) {
                platforms.push(platform.clone());
            }
        }
    }

    platforms
}

/// Does this post pass the platform filter? `None` lets everything through.
pub fn matches_platform(post: &Post, selected: Option<&str>) -> bool {
    selected.is_none_or(|platform| post.has_platform(platform))
}

pub fn filter_by_platform<'a>(posts: &'a [Post], selected: Option<&str>) -> Vec<&'a Post> {
    posts.iter().filter(|p| matches_platform(p, selected)).collect()
}

/// Posts on `platform` that are also visible under the `selected` filter.
///
/// With a filter on some other platform this is 0, so a badge never shows
/// more posts than the list below it.
pub fn platform_post_count(platform: &str, posts: &[Post], selected: Option<&str>) -> usize {
    if selected.is_some_and(|s| s != platform) {
        return 0;
    }
    posts.iter().filter(|p| p.has_platform(platform)).count()
}

/// (platform, count) for each platform in `platforms`, counting over `posts`.
pub fn platform_counts(
    platforms: &[String],
    posts: &[Post],
    selected: Option<&str>,
) -> Vec<(String, usize)> {
    platforms
        .iter()
        .map(|p| (p.clone(), platform_post_count(p, posts, selected)))
        .collect()
}
