//! Loaded post collections for one client, with stale-load protection.
//!
//! Every load is stamped with a [`LoadTicket`] when it starts. When it
//! finishes, its result is kept only if no newer load of the same slot was
//! started in the meantime, so a slow response for a previous month or client
//! can't overwrite a fresher one.

use tracing::debug;

use crate::month::CalendarMonth;
use crate::platforms::distinct_platforms;
use crate::post::Post;
use crate::source::PostSource;
use crate::store::PostStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    AllMonths,
    CurrentMonth,
}

/// Issued when a load starts; handed back with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    slot: Slot,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    client: Option<String>,
    all_posts: Vec<Post>,
    month_posts: Vec<Post>,
    platforms: Vec<String>,
    all_generation: u64,
    month_generation: u64,
}

impl Session {
    pub fn new(client: Option<String>) -> Self {
        Session {
            client,
            ..Default::default()
        }
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    /// Switch client. Drops loaded posts and invalidates loads in flight.
    pub fn set_client(&mut self, client: Option<String>) {
        self.client = client;
        self.all_posts.clear();
        self.month_posts.clear();
        self.platforms.clear();
        self.all_generation += 1;
        self.month_generation += 1;
    }

    /// Posts from every month document.
    pub fn all_posts(&self) -> &[Post] {
        &self.all_posts
    }

    /// Posts from the displayed month's document.
    pub fn month_posts(&self) -> &[Post] {
        &self.month_posts
    }

    /// Platforms across all months, for the filter bar.
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn begin_all_load(&mut self) -> LoadTicket {
        self.all_generation += 1;
        LoadTicket {
            slot: Slot::AllMonths,
            generation: self.all_generation,
        }
    }

    pub fn begin_month_load(&mut self) -> LoadTicket {
        self.month_generation += 1;
        LoadTicket {
            slot: Slot::CurrentMonth,
            generation: self.month_generation,
        }
    }

    /// Store a finished load. Returns false (and drops `posts`) if it's stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, posts: Vec<Post>) -> bool {
        let latest = match ticket.slot {
            Slot::AllMonths => self.all_generation,
            Slot::CurrentMonth => self.month_generation,
        };
        if ticket.generation != latest {
            debug!(
                slot = ?ticket.slot,
                generation = ticket.generation,
                latest,
                "discarding stale load"
            );
            return false;
        }

        match ticket.slot {
            Slot::AllMonths => {
                self.platforms = distinct_platforms(&posts);
                self.all_posts = posts;
            }
            Slot::CurrentMonth => self.month_posts = posts,
        }
        true
    }

    /// Load every month for the current client.
    pub async fn refresh_all<S: PostSource>(&mut self, store: &PostStore<S>) -> bool {
        let ticket = self.begin_all_load();
        let posts = store.load_all(self.client()).await;
        self.finish_load(ticket, posts)
    }

    /// Load the displayed month for the current client.
    pub async fn refresh_month<S: PostSource>(
        &mut self,
        store: &PostStore<S>,
        month: CalendarMonth,
    ) -> bool {
        let ticket = self.begin_month_load();
        let posts = store.load_month(self.client(), month).await;
        self.finish_load(ticket, posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::tests::post;
    use crate::store::tests::{ACME_MARCH, MemorySource};

    #[test]
    fn stale_month_load_is_discarded() {
        let mut session = Session::new(Some("acme".into()));

        let march = session.begin_month_load();
        let april = session.begin_month_load();

        assert!(session.finish_load(april, vec![post("a1", "2024-04-02", &["Facebook"])]));
        assert!(!session.finish_load(march, vec![post("m1", "2024-03-05", &["Instagram"])]));

        assert_eq!(session.month_posts()[0].id, "a1");
    }

    #[test]
    fn slots_are_independent() {
        let mut session = Session::new(Some("acme".into()));

        let all = session.begin_all_load();
        let month = session.begin_month_load();

        assert!(session.finish_load(month, vec![post("m1", "2024-03-05", &["Instagram"])]));
        assert!(session.finish_load(
            all,
            vec![
                post("m1", "2024-03-05", &["Instagram"]),
                post("a1", "2024-04-02", &["Facebook"]),
            ]
        ));

        assert_eq!(session.all_posts().len(), 2);
        assert_eq!(session.month_posts().len(), 1);
        assert_eq!(session.platforms(), ["Instagram", "Facebook"]);
    }

    #[test]
    fn switching_client_invalidates_loads_in_flight() {
        let mut session = Session::new(Some("acme".into()));
        let ticket = session.begin_all_load();

        session.set_client(Some("globex".into()));

        assert!(!session.finish_load(ticket, vec![post("x", "2024-03-05", &["X"])]));
        assert!(session.all_posts().is_empty());
        assert_eq!(session.client(), Some("globex"));
    }

    #[tokio::test]
    async fn refresh_from_store() {
        let store = PostStore::new(MemorySource::default().with("acme", "march", ACME_MARCH));
        let mut session = Session::new(Some("acme".into()));

        assert!(session.refresh_all(&store).await);
        assert!(session.refresh_month(&store, CalendarMonth::new(2024, 2).unwrap()).await);

        assert_eq!(session.all_posts().len(), 2);
        assert_eq!(session.month_posts().len(), 2);
        assert_eq!(session.platforms(), ["Instagram", "Facebook"]);
    }
}
