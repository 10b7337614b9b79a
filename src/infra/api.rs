//! HTTP gateway to the Silent Whistle platform API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;
use whistle_api_types::UserFeedResponse;

use crate::application::gateway::{FeedGateway, GatewayError, ModerationGateway};
use crate::config::ApiSettings;

use super::error::InfraError;

/// reqwest-backed implementation of the gateway traits.
///
/// Performs exactly one request per call: retry and backoff are the caller's
/// concern, and a timed-out response is simply never merged.
#[derive(Debug)]
pub struct HttpFeedGateway {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpFeedGateway {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        // Url::join treats a path without a trailing slash as a file and
        // would drop its last segment.
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|err| InfraError::configuration(format!("invalid api base url: {err}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|err| {
                InfraError::configuration(format!("failed to build http client: {err}"))
            })?;

        Ok(Self {
            client,
            base_url,
            token: settings.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::transport(format!("invalid endpoint `{path}`: {err}")))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute_mutation(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(), GatewayError> {
        let url = self.endpoint(path)?;
        let response = self
            .request(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        check_status(response.status())
    }
}

fn check_status(status: StatusCode) -> Result<(), GatewayError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(GatewayError::Status {
            status: status.as_u16(),
        })
    }
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    reason: &'a str,
}

#[async_trait]
impl FeedGateway for HttpFeedGateway {
    async fn fetch_user_feed(
        &self,
        user_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<UserFeedResponse, GatewayError> {
        let url = self.endpoint(&format!("users/{user_id}/feed"))?;

        debug!(user_id = %user_id, page, limit, "Fetching user feed");

        let response = self
            .request(self.client.get(url))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        check_status(response.status())?;

        response
            .json::<UserFeedResponse>()
            .await
            .map_err(|err| GatewayError::malformed(err.to_string()))
    }
}

#[async_trait]
impl ModerationGateway for HttpFeedGateway {
    async fn ban_user(&self, user_id: Uuid, reason: &str) -> Result<(), GatewayError> {
        self.execute_mutation(&format!("users/{user_id}/ban"), &ReasonBody { reason })
            .await
    }

    async fn warn_user(&self, user_id: Uuid, reason: &str) -> Result<(), GatewayError> {
        self.execute_mutation(&format!("users/{user_id}/warn"), &ReasonBody { reason })
            .await
    }

    async fn remove_shout(&self, user_id: Uuid, shout_id: Uuid) -> Result<(), GatewayError> {
        let url = self.endpoint(&format!("users/{user_id}/shouts/{shout_id}"))?;
        let response = self
            .request(self.client.delete(url))
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        check_status(response.status())
    }
}
