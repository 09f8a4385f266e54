//! REST client for the seat planner server.
//!
//! `HttpRooms` is the CLI side of the persistence collaborator: it speaks the
//! `/api/rooms` transport so an edit session can load and save layouts
//! exactly as it would against local storage.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use layout::doc::Layout;
use layout::repo::{LayoutRepository, PersistenceError};
use reqwest::{StatusCode, Url};
use tracing::debug;

pub struct HttpRooms {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRooms {
    /// Client rooted at `base_url` (scheme, host and optional path prefix).
    ///
    /// # Errors
    ///
    /// Returns the rejected input if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, String> {
        let url = Url::parse(base_url).map_err(|e| format!("{base_url}: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("{base_url}: expected http or https"));
        }
        Ok(Self { client: reqwest::Client::new(), base_url: url })
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, PersistenceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PersistenceError::Transport(format!("cannot use {} as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Returns `Transport` or `Status` if the server is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), PersistenceError> {
        let response = self.client.get(self.endpoint(&["healthz"])?).send().await.map_err(transport)?;
        ensure_success(response).await.map(drop)
    }
}

#[async_trait]
impl LayoutRepository for HttpRooms {
    async fn read_layout(&self, id: &str) -> Result<Option<Layout>, PersistenceError> {
        let url = self.endpoint(&["api", "rooms", id])?;
        debug!(%url, "fetching layout");
        let response = self.client.get(url).send().await.map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        Ok(Some(response.json::<Layout>().await.map_err(transport)?))
    }

    async fn write_layout(&self, layout: Layout) -> Result<Layout, PersistenceError> {
        let url = self.endpoint(&["api", "rooms"])?;
        debug!(%url, room = %layout.id, blocks = layout.blocks.len(), "saving layout");
        let response = self.client.post(url).json(&layout).send().await.map_err(transport)?;
        let response = ensure_success(response).await?;
        response.json::<Layout>().await.map_err(transport)
    }

    async fn list_layouts(&self) -> Result<Vec<Layout>, PersistenceError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "rooms"])?)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response).await?;
        response.json::<Vec<Layout>>().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> PersistenceError {
    PersistenceError::Transport(err.to_string())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, PersistenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PersistenceError::Status { status: status.as_u16(), message: error_message(&body) })
}

/// Pull `error` out of a `{"error": "..."}` body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}
