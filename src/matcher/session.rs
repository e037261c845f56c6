use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::catalog::OptionCatalog;
use super::client::ScoringGateway;
use super::domain::{FoundedYearBucket, MultiSelectField, SelectionState, StrategyType};
use super::payload::assemble;
use super::results::{decode_recommendations, MatchResult};

/// User-visible diagnostic classes. All are recoverable: the selection
/// state is never touched, so the user retries without re-entering filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CatalogUnavailable,
    UnexpectedResponse,
    ServerUnreachable,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CatalogUnavailable => "Catalog Unavailable",
            Self::UnexpectedResponse => "Unexpected Response",
            Self::ServerUnreachable => "Server Unreachable",
        }
    }
}

/// Dismissible notification surfaced to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results replaced; carries the number of rendered-ready items.
    Matched(usize),
    /// Request settled with a diagnostic; results were cleared.
    Failed(NotificationKind),
    /// A request is already outstanding; nothing was sent.
    Busy,
}

#[derive(Debug)]
struct SessionInner {
    strategy: StrategyType,
    state: SelectionState,
    catalog: OptionCatalog,
    results: Vec<MatchResult>,
    notifications: Vec<Notification>,
    notification_sequence: u64,
    in_flight: bool,
}

impl Default for SessionInner {
    fn default() -> Self {
        Self {
            strategy: StrategyType::default(),
            state: SelectionState::default(),
            catalog: OptionCatalog::default(),
            results: Vec::new(),
            notifications: Vec::new(),
            notification_sequence: 0,
            in_flight: false,
        }
    }
}

/// The single owner of all mutable configurator state: current selections,
/// strategy, catalog, results, notifications, and the in-flight flag.
///
/// Handles may be shared across tasks, so the flag check-and-set happens
/// under the interior lock; the lock is never held across the network
/// await. One scoring request is outstanding at a time: `submit` returns
/// [`SubmitOutcome::Busy`] instead of overlapping, and front-ends disable
/// the submit affordance while [`MatchSession::is_loading`] reports true.
pub struct MatchSession<G> {
    gateway: G,
    inner: Mutex<SessionInner>,
}

impl<G> MatchSession<G>
where
    G: ScoringGateway,
{
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            inner: Mutex::new(SessionInner::default()),
        }
    }

    /// The underlying gateway, e.g. for front-ends that need direct access.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().expect("session mutex poisoned")
    }

    fn push_notification(inner: &mut SessionInner, kind: NotificationKind, message: String) {
        inner.notification_sequence += 1;
        inner.notifications.push(Notification {
            id: inner.notification_sequence,
            kind,
            message,
            raised_at: Utc::now(),
        });
    }

    /// One-shot catalog fetch at startup. Failure is non-fatal: the catalog
    /// keeps its empty defaults and a [`NotificationKind::CatalogUnavailable`]
    /// diagnostic is raised; a restart is the recovery path.
    pub async fn load_catalog(&self) {
        match self.gateway.fetch_catalog().await {
            Ok(catalog) => {
                debug!("option catalog loaded");
                self.lock().catalog = catalog;
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed; filter options will render empty");
                let mut inner = self.lock();
                Self::push_notification(
                    &mut inner,
                    NotificationKind::CatalogUnavailable,
                    err.to_string(),
                );
            }
        }
    }

    pub fn catalog(&self) -> OptionCatalog {
        self.lock().catalog.clone()
    }

    pub fn strategy(&self) -> StrategyType {
        self.lock().strategy
    }

    pub fn set_strategy(&self, strategy: StrategyType) {
        self.lock().strategy = strategy;
    }

    pub fn selection(&self) -> SelectionState {
        self.lock().state.clone()
    }

    /// Flip membership of `value` in one of the set-valued filters.
    pub fn toggle(&self, field: MultiSelectField, value: &str) {
        self.lock().state.toggle(field, value);
    }

    pub fn set_team_size(&self, value: impl Into<String>) {
        self.lock().state.team_size = value.into();
    }

    pub fn set_founded_year(&self, bucket: Option<FoundedYearBucket>) {
        self.lock().state.founded_year = bucket;
    }

    pub fn set_location(&self, value: impl Into<String>) {
        self.lock().state.location = value.into();
    }

    pub fn set_business_model(&self, value: impl Into<String>) {
        self.lock().state.business_model = value.into();
    }

    pub fn set_revenue_stage(&self, value: impl Into<String>) {
        self.lock().state.revenue_stage = value.into();
    }

    pub fn set_customer_segment(&self, value: impl Into<String>) {
        self.lock().state.customer_segment = value.into();
    }

    pub fn set_activity_weight(&self, value: f64) {
        self.lock().state.activity_weight = value;
    }

    pub fn set_investment_weight(&self, value: f64) {
        self.lock().state.investment_weight = value;
    }

    /// Whether a scoring request is outstanding. Front-ends must treat this
    /// as the gate disabling the submit affordance, not as cosmetics.
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight
    }

    pub fn results(&self) -> Vec<MatchResult> {
        self.lock().results.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    /// Remove one notification; returns false when the id is unknown.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut inner = self.lock();
        let before = inner.notifications.len();
        inner.notifications.retain(|notification| notification.id != id);
        inner.notifications.len() != before
    }

    /// Assemble the payload from the current selections and strategy, send
    /// it, and replace the result set with the response. Single-flight: a
    /// call while another is outstanding returns [`SubmitOutcome::Busy`]
    /// without sending anything. Every settled path resets the in-flight
    /// flag before returning.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, strategy) = {
            let mut inner = self.lock();
            if inner.in_flight {
                return SubmitOutcome::Busy;
            }
            inner.in_flight = true;
            (assemble(&inner.state, inner.strategy), inner.strategy)
        };

        debug!(strategy = strategy.as_str(), "submitting recommendation request");
        let response = self.gateway.recommend(&request).await;

        let mut inner = self.lock();
        inner.in_flight = false;

        match response {
            Ok(body) => match decode_recommendations(body, strategy) {
                Ok(results) => {
                    let count = results.len();
                    inner.results = results;
                    info!(count, strategy = strategy.as_str(), "recommendations updated");
                    SubmitOutcome::Matched(count)
                }
                Err(err) => {
                    warn!(error = %err, "scoring response was not in the expected shape");
                    inner.results.clear();
                    Self::push_notification(
                        &mut inner,
                        NotificationKind::UnexpectedResponse,
                        err.to_string(),
                    );
                    SubmitOutcome::Failed(NotificationKind::UnexpectedResponse)
                }
            },
            Err(err) => {
                let kind = if err.is_protocol() {
                    NotificationKind::UnexpectedResponse
                } else {
                    NotificationKind::ServerUnreachable
                };
                warn!(error = %err, "scoring request failed");
                inner.results.clear();
                Self::push_notification(&mut inner, kind, err.to_string());
                SubmitOutcome::Failed(kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::client::GatewayError;
    use crate::matcher::payload::RecommendationRequest;
    use async_trait::async_trait;
    use serde_json::Value;

    #[derive(Default)]
    struct IdleGateway;

    #[async_trait]
    impl ScoringGateway for IdleGateway {
        async fn fetch_catalog(&self) -> Result<OptionCatalog, GatewayError> {
            Ok(OptionCatalog::default())
        }

        async fn recommend(&self, _request: &RecommendationRequest) -> Result<Value, GatewayError> {
            Ok(serde_json::json!({ "recommendations": [] }))
        }
    }

    #[test]
    fn mutations_are_immediately_visible() {
        let session = MatchSession::new(IdleGateway);
        session.toggle(MultiSelectField::Industries, "FinTech");
        session.set_location("Nairobi");
        session.set_activity_weight(0.9);

        let state = session.selection();
        assert!(state.industries.contains("FinTech"));
        assert_eq!(state.location, "Nairobi");
        assert_eq!(state.activity_weight, 0.9);
    }

    #[test]
    fn session_starts_idle_with_hybrid_strategy() {
        let session = MatchSession::new(IdleGateway);
        assert_eq!(session.strategy(), StrategyType::Hybrid);
        assert!(!session.is_loading());
        assert!(session.results().is_empty());
        assert!(session.notifications().is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_named_notification() {
        let session = MatchSession::new(IdleGateway);
        {
            let mut inner = session.lock();
            MatchSession::<IdleGateway>::push_notification(
                &mut inner,
                NotificationKind::ServerUnreachable,
                "connection refused".to_string(),
            );
            MatchSession::<IdleGateway>::push_notification(
                &mut inner,
                NotificationKind::UnexpectedResponse,
                "no recommendations".to_string(),
            );
        }

        let first_id = session.notifications()[0].id;
        assert!(session.dismiss(first_id));
        assert!(!session.dismiss(first_id));

        let remaining = session.notifications();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, NotificationKind::UnexpectedResponse);
    }

    #[test]
    fn out_of_range_weights_are_accepted_as_is() {
        let session = MatchSession::new(IdleGateway);
        session.set_investment_weight(1.7);
        assert_eq!(session.selection().investment_weight, 1.7);
    }
}
