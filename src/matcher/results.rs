use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::StrategyType;

/// A field the service emits either as one string or as a list of strings,
/// depending on how the underlying dataset row was ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn values(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values.as_slice(),
        }
    }

    pub const fn is_collection(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }
}

/// Profile-match result row. Every descriptive field is optional; the
/// service varies what it returns per strategy and per dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorProfile {
    #[serde(rename = "Investor Name")]
    pub name: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Investor Bio")]
    pub bio: Option<String>,
    #[serde(rename = "Investment Stages")]
    pub investment_stages: Option<OneOrMany>,
    #[serde(rename = "Past Investment Types")]
    pub past_investment_types: Option<OneOrMany>,
    #[serde(rename = "Score")]
    pub score: Option<f64>,
    #[serde(rename = "Ticket Size")]
    pub ticket_size: Option<String>,
    #[serde(rename = "Recent Activity Year")]
    pub recent_activity_year: Option<i32>,
    #[serde(rename = "Number of Investments")]
    pub investment_count: Option<i64>,
}

/// Similarity-match result row: a peer startup and the investor it shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarStartup {
    #[serde(rename = "Startup Name")]
    pub startup_name: Option<String>,
    #[serde(rename = "Industry")]
    pub industry: Option<String>,
    #[serde(rename = "Funding Stage")]
    pub funding_stage: Option<String>,
    #[serde(rename = "Score")]
    pub score: Option<f64>,
    #[serde(rename = "Investor")]
    pub investor: Option<String>,
}

/// One scored result, tagged with the shape the active strategy implies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchResult {
    Profile(InvestorProfile),
    Similarity(SimilarStartup),
}

/// Response body shapes this client refuses to interpret.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("scoring service reported: {0}")]
    ServiceError(String),
    #[error("response has no recommendations field")]
    MissingRecommendations,
    #[error("recommendations is not an array")]
    NotAnArray,
    #[error("recommendation item {index} is malformed: {source}")]
    MalformedItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Map a raw response body into the tagged result sequence for `strategy`.
///
/// Order is preserved exactly as returned; the client never re-sorts or
/// filters. A `{"error": ...}` body and any body without a recognizable
/// `recommendations` array are both protocol errors.
pub fn decode_recommendations(
    body: Value,
    strategy: StrategyType,
) -> Result<Vec<MatchResult>, DecodeError> {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(DecodeError::ServiceError(message.to_string()));
    }

    let items = match body.get("recommendations") {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => return Err(DecodeError::NotAnArray),
        None => return Err(DecodeError::MissingRecommendations),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_item(item, strategy, index))
        .collect()
}

fn decode_item(item: Value, strategy: StrategyType, index: usize) -> Result<MatchResult, DecodeError> {
    match strategy {
        StrategyType::StartupSimilarity => serde_json::from_value::<SimilarStartup>(item)
            .map(MatchResult::Similarity)
            .map_err(|source| DecodeError::MalformedItem { index, source }),
        _ => serde_json::from_value::<InvestorProfile>(item)
            .map(MatchResult::Profile)
            .map_err(|source| DecodeError::MalformedItem { index, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_rows_decode_with_sparse_fields() {
        let body = json!({
            "recommendations": [
                {"Investor Name": "Acme Capital", "Score": 0.82}
            ]
        });

        let results =
            decode_recommendations(body, StrategyType::Content).expect("profile decodes");
        assert_eq!(results.len(), 1);
        match &results[0] {
            MatchResult::Profile(profile) => {
                assert_eq!(profile.name.as_deref(), Some("Acme Capital"));
                assert_eq!(profile.score, Some(0.82));
                assert!(profile.location.is_none());
                assert!(profile.investment_stages.is_none());
            }
            other => panic!("expected profile result, got {other:?}"),
        }
    }

    #[test]
    fn similarity_strategy_selects_the_similarity_shape() {
        let body = json!({
            "recommendations": [
                {"Startup Name": "Foo", "Industry": "FinTech", "Score": 0.5, "Investor": "Bar"}
            ]
        });

        let results = decode_recommendations(body, StrategyType::StartupSimilarity)
            .expect("similarity decodes");
        match &results[0] {
            MatchResult::Similarity(row) => {
                assert_eq!(row.startup_name.as_deref(), Some("Foo"));
                assert_eq!(row.investor.as_deref(), Some("Bar"));
                assert!(row.funding_stage.is_none());
            }
            other => panic!("expected similarity result, got {other:?}"),
        }
    }

    #[test]
    fn stage_fields_accept_one_or_many() {
        let body = json!({
            "recommendations": [
                {"Investor Name": "A", "Investment Stages": ["Seed", "Series A"]},
                {"Investor Name": "B", "Investment Stages": "Growth"}
            ]
        });

        let results = decode_recommendations(body, StrategyType::Hybrid).expect("decodes");
        let stages = |result: &MatchResult| match result {
            MatchResult::Profile(profile) => profile.investment_stages.clone().expect("stages"),
            other => panic!("expected profile, got {other:?}"),
        };

        let many = stages(&results[0]);
        assert!(many.is_collection());
        assert_eq!(many.values(), ["Seed", "Series A"]);

        let one = stages(&results[1]);
        assert!(!one.is_collection());
        assert_eq!(one.values(), ["Growth"]);
    }

    #[test]
    fn integer_scores_decode_as_floats() {
        let body = json!({
            "recommendations": [{"Investor Name": "A", "Score": 7}]
        });
        let results =
            decode_recommendations(body, StrategyType::Collaborative).expect("decodes");
        match &results[0] {
            MatchResult::Profile(profile) => assert_eq!(profile.score, Some(7.0)),
            other => panic!("expected profile, got {other:?}"),
        }
    }

    #[test]
    fn empty_object_is_a_protocol_error() {
        let err = decode_recommendations(json!({}), StrategyType::Hybrid)
            .expect_err("missing recommendations");
        assert!(matches!(err, DecodeError::MissingRecommendations));
    }

    #[test]
    fn error_body_surfaces_service_message() {
        let err = decode_recommendations(
            json!({"error": "Invalid rs_type"}),
            StrategyType::Content,
        )
        .expect_err("error body");
        match err {
            DecodeError::ServiceError(message) => assert_eq!(message, "Invalid rs_type"),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn non_array_recommendations_is_a_protocol_error() {
        let err = decode_recommendations(
            json!({"recommendations": "lots"}),
            StrategyType::Content,
        )
        .expect_err("non-array");
        assert!(matches!(err, DecodeError::NotAnArray));
    }

    #[test]
    fn ordering_is_preserved_verbatim() {
        let body = json!({
            "recommendations": [
                {"Investor Name": "Z", "Score": 0.1},
                {"Investor Name": "A", "Score": 0.9}
            ]
        });
        let results = decode_recommendations(body, StrategyType::Content).expect("decodes");
        let names: Vec<_> = results
            .iter()
            .map(|result| match result {
                MatchResult::Profile(profile) => profile.name.clone().expect("name"),
                other => panic!("expected profile, got {other:?}"),
            })
            .collect();
        assert_eq!(names, ["Z", "A"]);
    }
}
