//! Config, source and client resolved once per invocation.

use anyhow::Result;
use contentcal_core::config::ContentCalConfig;
use contentcal_core::session::Session;
use contentcal_core::source::Source;
use contentcal_core::store::PostStore;
use contentcal_core::{CalendarMonth, Post};
use tracing::debug;

use crate::utils::tui::create_spinner;

pub struct Context {
    pub config: ContentCalConfig,
    pub store: PostStore<Source>,
    client: Option<String>,
}

impl Context {
    pub fn load(source: Option<String>, client: Option<String>) -> Result<Self> {
        let mut config = ContentCalConfig::load()?;
        if let Some(source) = source {
            config.source = source;
        }

        let store = PostStore::new(config.post_source()?);
        let client = client.or_else(|| config.default_client.clone());
        debug!(source = %config.source, client = ?client, "resolved context");

        Ok(Context {
            config,
            store,
            client,
        })
    }

    /// The selected client. Nothing is fetched without one.
    pub fn client(&self) -> Result<&str> {
        match self.client.as_deref() {
            Some(client) => Ok(client),
            None => {
                let path = ContentCalConfig::config_path()?;
                anyhow::bail!(
                    "No client selected.\n\n\
                    Pass one with:\n  \
                    contentcal --client <name> calendar\n\n\
                    or set default_client in {}",
                    path.display()
                )
            }
        }
    }

    /// Load every month plus the given month's document for the client.
    pub async fn load_session(&self, month: CalendarMonth) -> Result<Session> {
        let client = self.client()?;
        let mut session = Session::new(Some(client.to_string()));

        let spinner = create_spinner(format!("Loading {client}"));
        session.refresh_all(&self.store).await;
        session.refresh_month(&self.store, month).await;
        spinner.finish_and_clear();

        Ok(session)
    }

    /// Reload only the displayed month, e.g. after navigating.
    pub async fn reload_month(&self, session: &mut Session, month: CalendarMonth) {
        let spinner = create_spinner(format!("Loading {}", month.label()));
        session.refresh_month(&self.store, month).await;
        spinner.finish_and_clear();
    }

    /// Find a post by id across every month.
    pub async fn find_post(&self, id: &str) -> Result<Post> {
        let client = self.client()?;

        let spinner = create_spinner(format!("Loading {client}"));
        let posts = self.store.load_all(Some(client)).await;
        spinner.finish_and_clear();

        posts
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow::anyhow!("Post '{}' not found for {}", id, client))
    }
}
