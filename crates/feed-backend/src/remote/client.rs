//! Hosted-backend JSON API client
//!
//! Implements `FeedItemSource` and `EngagementStore` over the backend's REST
//! endpoints. Transport failures map to `DomainError::BackendError`; the
//! engine decides whether a failure is surfaced or swallowed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tracing::instrument;
use url::Url;

use feed_common::config::BackendConfig;
use feed_core::entities::{Comment, ContactEvent, FeedItem, Reaction, ReactionKind, ViewEvent};
use feed_core::error::DomainError;
use feed_core::traits::{BackendResult, EngagementStore, FeedItemSource};
use feed_core::value_objects::FeedId;

use crate::models::{CommentRecord, EngagementEventRecord, ItemRecord, ReactionRecord};

/// Convert a transport error to a DomainError
fn map_http_error(e: reqwest::Error) -> DomainError {
    DomainError::BackendError(e.to_string())
}

/// Hosted backend client
#[derive(Clone)]
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RemoteBackend {
    /// Create a new RemoteBackend from configuration
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DomainError::ValidationError(format!("invalid backend url: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(map_http_error)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Resolve an endpoint path against the base URL
    fn endpoint(&self, path: &str) -> BackendResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DomainError::InternalError(format!("invalid endpoint {path}: {e}")))
    }

    /// Attach the API key header when configured
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl FeedItemSource for RemoteBackend {
    #[instrument(skip(self))]
    async fn fetch_active_items(
        &self,
        limit: usize,
        now: DateTime<Utc>,
    ) -> BackendResult<Vec<FeedItem>> {
        let url = self.endpoint("items")?;
        let response = self
            .authorize(self.http.get(url))
            .query(&[
                ("limit", limit.to_string()),
                ("activeAfter", now.to_rfc3339()),
                ("order", "createdAt.desc".to_string()),
            ])
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;

        let records: Vec<ItemRecord> = response.json().await.map_err(map_http_error)?;
        records.into_iter().map(FeedItem::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, id: FeedId) -> BackendResult<()> {
        let url = self.endpoint(&format!("items/{id}"))?;
        let response = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(map_http_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::ItemNotFound(id));
        }
        response.error_for_status().map_err(map_http_error)?;
        Ok(())
    }
}

#[async_trait]
impl EngagementStore for RemoteBackend {
    #[instrument(skip(self, event))]
    async fn insert_view(&self, event: &ViewEvent) -> BackendResult<()> {
        let url = self.endpoint("events")?;
        self.authorize(self.http.post(url))
            .json(&EngagementEventRecord::from(event))
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;
        Ok(())
    }

    #[instrument(skip(self, event))]
    async fn insert_contact(&self, event: &ContactEvent) -> BackendResult<()> {
        let url = self.endpoint("events")?;
        self.authorize(self.http.post(url))
            .json(&EngagementEventRecord::from(event))
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_reaction(
        &self,
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
    ) -> BackendResult<Option<Reaction>> {
        let url = self.endpoint("reactions")?;
        let records: Vec<ReactionRecord> = self
            .authorize(self.http.get(url))
            .query(&[
                ("itemId", item_id.to_string()),
                ("viewerId", viewer_id.to_string()),
                ("kind", kind.to_string()),
            ])
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?
            .json()
            .await
            .map_err(map_http_error)?;

        records.into_iter().next().map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, reaction))]
    async fn upsert_reaction(&self, reaction: &Reaction) -> BackendResult<()> {
        let url = self.endpoint("reactions")?;
        self.authorize(self.http.put(url))
            .json(&ReactionRecord::from(reaction))
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_reaction(
        &self,
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
    ) -> BackendResult<()> {
        let url = self.endpoint("reactions")?;
        self.authorize(self.http.delete(url))
            .query(&[
                ("itemId", item_id.to_string()),
                ("viewerId", viewer_id.to_string()),
                ("kind", kind.to_string()),
            ])
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;
        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn insert_comment(&self, comment: &Comment) -> BackendResult<()> {
        let url = self.endpoint("comments")?;
        self.authorize(self.http.post(url))
            .json(&CommentRecord::from(comment))
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_comment(&self, id: FeedId) -> BackendResult<Option<Comment>> {
        let url = self.endpoint(&format!("comments/{id}"))?;
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(map_http_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record: CommentRecord = response
            .error_for_status()
            .map_err(map_http_error)?
            .json()
            .await
            .map_err(map_http_error)?;

        Ok(Some(Comment::from(record)))
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, id: FeedId) -> BackendResult<()> {
        let url = self.endpoint(&format!("comments/{id}"))?;
        let response = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(map_http_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::CommentNotFound(id));
        }
        response.error_for_status().map_err(map_http_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_comments(&self, item_id: FeedId) -> BackendResult<Vec<Comment>> {
        let url = self.endpoint(&format!("items/{item_id}/comments"))?;
        let records: Vec<CommentRecord> = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?
            .json()
            .await
            .map_err(map_http_error)?;

        Ok(records.into_iter().map(Comment::from).collect())
    }
}
