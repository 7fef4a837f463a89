//! # API Client
//!
//! HTTP implementation of the data-access layer. Holds a `reqwest::Client` built
//! once with the configured timeout and a base URL fixed at construction.

use super::{ClientBuildError, FetchCause, FetchError, ResourceFetcher};
use crate::config::Config;
use crate::model::{Education, Experience, Profile, Project, Technology};
use crate::resource::{
    EducationResource, ExperiencesResource, ProfileResource, ProjectsResource, Resource,
    ResourceKind, ResourcePayload, TechnologiesResource,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Typed, read-only client for the portfolio API.
///
/// Cheap to clone; clones share the underlying connection pool and nothing else.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Timeout applied to every request unless configured otherwise.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client for `base_url`, an absolute `http`/`https` URL such as
    /// `http://localhost:8000/api`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientBuildError> {
        let base_url = base_url.into();
        check_base_url(&base_url).map_err(|reason| ClientBuildError::InvalidBaseUrl {
            url: base_url.clone(),
            reason,
        })?;

        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Creates a client from the `api_url` and `request_timeout` settings.
    pub fn from_config(config: &Config) -> Result<Self, ClientBuildError> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a kind: the base URL followed by [`ResourceKind::path`].
    pub fn endpoint(&self, kind: ResourceKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    /// Fetches and decodes one resource.
    #[instrument(skip(self), fields(kind = %R::KIND))]
    pub async fn fetch<R: Resource>(&self) -> Result<R::Output, FetchError> {
        let body = self.get_body(R::KIND).await?;
        R::decode(&body).map_err(|e| FetchError::new(R::KIND, e.into()))
    }

    pub async fn profile(&self) -> Result<Profile, FetchError> {
        self.fetch::<ProfileResource>().await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, FetchError> {
        self.fetch::<ProjectsResource>().await
    }

    pub async fn experiences(&self) -> Result<Vec<Experience>, FetchError> {
        self.fetch::<ExperiencesResource>().await
    }

    pub async fn education(&self) -> Result<Vec<Education>, FetchError> {
        self.fetch::<EducationResource>().await
    }

    pub async fn technologies(&self) -> Result<Vec<Technology>, FetchError> {
        self.fetch::<TechnologiesResource>().await
    }

    async fn get_body(&self, kind: ResourceKind) -> Result<Vec<u8>, FetchError> {
        let url = self.endpoint(kind);
        let fail = |cause: FetchCause| FetchError::new(kind, cause);
        debug!(%url, "Making request");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| fail(e.into()))?;

        let status = response.status();
        info!(status = status.as_u16(), "Response received");

        if status == StatusCode::NOT_FOUND {
            return Err(fail(FetchCause::NotFound));
        }
        if !status.is_success() {
            // The body is diagnostic only; losing it is not worth a second failure.
            let body = response.text().await.unwrap_or_default();
            return Err(fail(FetchCause::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let bytes = response.bytes().await.map_err(|e| fail(e.into()))?;
        Ok(bytes.to_vec())
    }
}

/// Checks that `raw` is an absolute `http`/`https` URL with a host.
pub(crate) fn check_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[async_trait]
impl ResourceFetcher for ApiClient {
    #[instrument(skip(self, kind), fields(kind = %kind))]
    async fn fetch_kind(&self, kind: ResourceKind) -> Result<ResourcePayload, FetchError> {
        let body = self.get_body(kind).await?;
        kind.decode(&body).map_err(|e| FetchError::new(kind, e.into()))
    }
}
