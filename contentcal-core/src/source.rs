//! Where month documents come from.
//!
//! A month document for client `C` and month `M` lives at `{location}/C/M.json`
//! where `M` is the lowercase English month name. The location is either an
//! http(s) base URL or a local directory.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ContentCalError, ContentCalResult};

/// Fetches the raw JSON text of one month document.
pub trait PostSource {
    fn fetch_month(
        &self,
        client: &str,
        month: &str,
    ) -> impl Future<Output = ContentCalResult<String>> + Send;
}

// ============================================================================
// HTTP
// ============================================================================

pub struct HttpSource {
    http: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Option<Duration>) -> ContentCalResult<Self> {
        let base = Url::parse(base)
            .map_err(|e| ContentCalError::Config(format!("Invalid source URL '{base}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ContentCalError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpSource { http, base })
    }

    pub fn document_url(&self, client: &str, month: &str) -> ContentCalResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ContentCalError::Config(format!("'{}' cannot be a base URL", self.base)))?
            .pop_if_empty()
            .push(client)
            .push(&format!("{month}.json"));
        Ok(url)
    }
}

impl PostSource for HttpSource {
    async fn fetch_month(&self, client: &str, month: &str) -> ContentCalResult<String> {
        let url = self.document_url(client, month)?;
        let fetch_error = |reason: String| ContentCalError::Fetch {
            month: month.to_string(),
            reason,
        };

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentCalError::MissingDocument {
                client: client.to_string(),
                month: month.to_string(),
            });
        }
        if !status.is_success() {
            return Err(fetch_error(format!("{url} returned {status}")));
        }

        resp.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}

// ============================================================================
// Local directory
// ============================================================================

pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// `root` may start with `~`.
    pub fn new(root: &str) -> Self {
        DirSource {
            root: PathBuf::from(shellexpand::tilde(root).into_owned()),
        }
    }

    pub fn document_path(&self, client: &str, month: &str) -> PathBuf {
        self.root.join(client).join(format!("{month}.json"))
    }
}

impl PostSource for DirSource {
    async fn fetch_month(&self, client: &str, month: &str) -> ContentCalResult<String> {
        let path = self.document_path(client, month);

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ContentCalError::MissingDocument {
                    client: client.to_string(),
                    month: month.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Either
// ============================================================================

/// The source picked from a configured location string.
pub enum Source {
    Http(HttpSource),
    Dir(DirSource),
}

impl Source {
    /// http(s) locations are fetched over the network, anything else is a directory.
    pub fn from_location(location: &str, timeout: Option<Duration>) -> ContentCalResult<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ContentCalError::Config("No post source configured".into()));
        }

        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(Source::Http(HttpSource::new(location, timeout)?))
        } else {
            Ok(Source::Dir(DirSource::new(location)))
        }
    }
}

impl PostSource for Source {
    async fn fetch_month(&self, client: &str, month: &str) -> ContentCalResult<String> {
        match self {
            Source::Http(http) => http.fetch_month(client, month).await,
            Source::Dir(dir) => dir.fetch_month(client, month).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_document_url() {
        for base in ["https://cdn.example.com/posts", "https://cdn.example.com/posts/"] {
            let source = HttpSource::new(base, None).unwrap();
            assert_eq!(
                source.document_url("acme", "march").unwrap().as_str(),
                "https://cdn.example.com/posts/acme/march.json"
            );
        }
    }

    #[test]
    fn http_document_url_encodes_client() {
        let source = HttpSource::new("https://cdn.example.com", None).unwrap();
        assert_eq!(
            source.document_url("acme co", "may").unwrap().as_str(),
            "https://cdn.example.com/acme%20co/may.json"
        );
    }

    #[test]
    fn location_picks_source_kind() {
        assert!(matches!(
            Source::from_location("https://example.com/posts", None).unwrap(),
            Source::Http(_)
        ));
        assert!(matches!(
            Source::from_location("./public/posts", None).unwrap(),
            Source::Dir(_)
        ));
        assert!(Source::from_location("  ", None).is_err());
        assert!(Source::from_location("https://", None).is_err());
    }

    #[tokio::test]
    async fn dir_source_reads_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("acme")).unwrap();
        std::fs::write(dir.path().join("acme/march.json"), "[]").unwrap();

        let source = DirSource::new(dir.path().to_str().unwrap());
        assert_eq!(source.fetch_month("acme", "march").await.unwrap(), "[]");

        let missing = source.fetch_month("acme", "april").await;
        assert!(matches!(missing, Err(ContentCalError::MissingDocument { .. })));
    }
}
