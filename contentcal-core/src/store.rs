//! Loading a client's posts from month documents.

use tracing::{debug, info, warn};

use crate::constants::MONTH_FILE_NAMES;
use crate::error::ContentCalError;
use crate::month::CalendarMonth;
use crate::post::{Post, parse_month_document};
use crate::source::PostSource;

/// Read-only view of a client's month documents.
///
/// Nothing here fails: a month that can't be fetched or parsed contributes no
/// posts and is logged, so the worst case is an empty calendar.
pub struct PostStore<S> {
    source: S,
}

impl<S: PostSource> PostStore<S> {
    pub fn new(source: S) -> Self {
        PostStore { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every month document for the client, January through December, concatenated.
    /// Returns nothing without fetching when there is no client.
    pub async fn load_all(&self, client: Option<&str>) -> Vec<Post> {
        let Some(client) = client else {
            return Vec::new();
        };

        let mut posts = Vec::new();
        for month in MONTH_FILE_NAMES {
            posts.extend(self.load_document(client, month).await);
        }

        info!(client, count = posts.len(), "loaded posts for all months");
        posts
    }

    /// The month document for the displayed month only.
    ///
    /// Documents are keyed by month name alone, so this is the same document
    /// whatever `month.year` is.
    pub async fn load_month(&self, client: Option<&str>, month: CalendarMonth) -> Vec<Post> {
        let Some(client) = client else {
            return Vec::new();
        };

        let posts = self.load_document(client, month.file_name()).await;
        info!(client, month = %month, count = posts.len(), "loaded posts for month");
        posts
    }

    async fn load_document(&self, client: &str, month: &str) -> Vec<Post> {
        let text = match self.source.fetch_month(client, month).await {
            Ok(text) => text,
            Err(ContentCalError::MissingDocument { .. }) => {
                debug!(client, month, "no month document");
                return Vec::new();
            }
            Err(e) => {
                warn!(client, month, error = %e, "could not fetch month document");
                return Vec::new();
            }
        };

        match parse_month_document(&text) {
            Ok(posts) => posts,
            Err(e) => {
                warn!(client, month, error = %e, "could not parse month document");
                Vec::new()
            }
        }
    }
}
