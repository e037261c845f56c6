use serde::Serialize;

use super::domain::{SelectionState, StrategyType};

/// Request body for the scoring endpoint. Key presence is strategy
/// dependent: `rs_type` is omitted for startup-similarity scoring and the
/// two weights are carried only for the hybrid blend. Scalar filters are
/// always present; an empty string tells the service "no filter".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub industries: Vec<String>,
    pub stages: Vec<String>,
    #[serde(rename = "rs_type", skip_serializing_if = "Option::is_none")]
    pub rs_type: Option<StrategyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_weight: Option<f64>,
    pub team_size: String,
    pub founded_year: String,
    pub location: String,
    pub business_model: String,
    pub revenue_stage: String,
    pub customer_segment: String,
}

/// Build the request body for the current selections. Pure: the same state
/// and strategy always produce an identical payload.
pub fn assemble(state: &SelectionState, strategy: StrategyType) -> RecommendationRequest {
    let weights_included = strategy.takes_weights();

    RecommendationRequest {
        industries: state.industries.iter().cloned().collect(),
        stages: state.stages.iter().cloned().collect(),
        rs_type: match strategy {
            StrategyType::StartupSimilarity => None,
            tagged => Some(tagged),
        },
        activity_weight: weights_included.then_some(state.activity_weight),
        investment_weight: weights_included.then_some(state.investment_weight),
        team_size: state.team_size.clone(),
        founded_year: state
            .founded_year
            .map(|bucket| bucket.label().to_string())
            .unwrap_or_default(),
        location: state.location.clone(),
        business_model: state.business_model.clone(),
        revenue_stage: state.revenue_stage.clone(),
        customer_segment: state.customer_segment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::domain::{FoundedYearBucket, MultiSelectField};
    use serde_json::Value;

    fn sample_state() -> SelectionState {
        let mut state = SelectionState::default();
        state.toggle(MultiSelectField::Industries, "FinTech");
        state.toggle(MultiSelectField::Industries, "AgriTech");
        state.toggle(MultiSelectField::Stages, "Seed");
        state.team_size = "11-50".to_string();
        state.founded_year = Some(FoundedYearBucket::Growing);
        state.location = "Nairobi".to_string();
        state.business_model = "B2B SaaS".to_string();
        state.revenue_stage = "Pre-revenue".to_string();
        state.customer_segment = "SMEs".to_string();
        state.activity_weight = 0.7;
        state.investment_weight = 0.3;
        state
    }

    fn keys(payload: &RecommendationRequest) -> Vec<String> {
        let value = serde_json::to_value(payload).expect("payload serializes");
        match value {
            Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("payload must serialize to an object, got {other}"),
        }
    }

    #[test]
    fn hybrid_carries_weights_and_rs_type() {
        let payload = assemble(&sample_state(), StrategyType::Hybrid);
        let value = serde_json::to_value(&payload).expect("payload serializes");

        assert_eq!(value["rs_type"], "hybrid");
        assert_eq!(value["activityWeight"], 0.7);
        assert_eq!(value["investmentWeight"], 0.3);
        assert_eq!(value["industries"], serde_json::json!(["AgriTech", "FinTech"]));
        assert_eq!(value["foundedYear"], "Growing");
    }

    #[test]
    fn non_hybrid_strategies_never_serialize_weight_keys() {
        for strategy in [
            StrategyType::Content,
            StrategyType::Collaborative,
            StrategyType::StartupSimilarity,
        ] {
            let payload = assemble(&sample_state(), strategy);
            let keys = keys(&payload);
            assert!(
                !keys.iter().any(|k| k == "activityWeight" || k == "investmentWeight"),
                "{strategy:?} leaked weight keys: {keys:?}"
            );
        }
    }

    #[test]
    fn startup_similarity_omits_rs_type_but_keeps_filters() {
        let payload = assemble(&sample_state(), StrategyType::StartupSimilarity);
        let keys = keys(&payload);

        assert!(!keys.iter().any(|k| k == "rs_type"));
        assert!(keys.iter().any(|k| k == "industries"));
        assert!(keys.iter().any(|k| k == "stages"));
        assert!(keys.iter().any(|k| k == "customerSegment"));
    }

    #[test]
    fn tagged_strategies_carry_their_wire_name() {
        for strategy in [
            StrategyType::Content,
            StrategyType::Collaborative,
            StrategyType::Hybrid,
        ] {
            let value =
                serde_json::to_value(assemble(&sample_state(), strategy)).expect("serializes");
            assert_eq!(value["rs_type"], strategy.as_str());
        }
    }

    #[test]
    fn empty_scalars_are_sent_as_empty_strings() {
        let payload = assemble(&SelectionState::default(), StrategyType::Content);
        let value = serde_json::to_value(&payload).expect("serializes");

        assert_eq!(value["teamSize"], "");
        assert_eq!(value["foundedYear"], "");
        assert_eq!(value["location"], "");
        assert_eq!(value["businessModel"], "");
        assert_eq!(value["revenueStage"], "");
        assert_eq!(value["customerSegment"], "");
    }

    #[test]
    fn assemble_is_pure() {
        let state = sample_state();
        let first = serde_json::to_value(assemble(&state, StrategyType::Hybrid)).expect("first");
        let second = serde_json::to_value(assemble(&state, StrategyType::Hybrid)).expect("second");
        assert_eq!(first, second);
    }
}
