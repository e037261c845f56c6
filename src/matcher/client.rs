use async_trait::async_trait;
use serde_json::Value;

use super::catalog::OptionCatalog;
use super::payload::RecommendationRequest;
use crate::config::ScoringConfig;

/// Failure modes of a single call to the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("scoring service unreachable: {0}")]
    Transport(String),
    #[error("scoring service returned status {0}")]
    Status(u16),
    #[error("scoring service response was not valid JSON: {0}")]
    Decode(String),
}

impl GatewayError {
    /// True when a response was received but could not be read: the
    /// protocol-error class, as opposed to transport failures.
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Network seam in front of the scoring service so the session flow can be
/// exercised against in-memory doubles.
#[async_trait]
pub trait ScoringGateway: Send + Sync {
    /// `GET /dropdowns`, the selectable-options catalog.
    async fn fetch_catalog(&self) -> Result<OptionCatalog, GatewayError>;

    /// `POST /recommend`. Returns the raw response body; interpretation is
    /// strategy-dependent and happens in the session.
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Value, GatewayError>;
}

/// reqwest-backed gateway talking to the configured endpoints.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    http: reqwest::Client,
    config: ScoringConfig,
}

impl HttpScoringClient {
    pub fn new(config: ScoringConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: ScoringConfig) -> Self {
        Self { http, config }
    }

    fn map_transport(err: reqwest::Error) -> GatewayError {
        GatewayError::Transport(err.to_string())
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl ScoringGateway for HttpScoringClient {
    async fn fetch_catalog(&self) -> Result<OptionCatalog, GatewayError> {
        let response = self
            .http
            .get(self.config.catalog_endpoint())
            .send()
            .await
            .map_err(Self::map_transport)?;
        let response = Self::check_status(response)?;

        response
            .json::<OptionCatalog>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn recommend(&self, request: &RecommendationRequest) -> Result<Value, GatewayError> {
        let response = self
            .http
            .post(self.config.recommend_endpoint())
            .json(request)
            .send()
            .await
            .map_err(Self::map_transport)?;
        let response = Self::check_status(response)?;

        response
            .json::<Value>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}
