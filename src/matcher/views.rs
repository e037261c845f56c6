use serde::Serialize;

use super::results::{InvestorProfile, MatchResult, OneOrMany, SimilarStartup};

/// Placeholder for optional fields that did not arrive, so card layout
/// stays uniform across items.
pub const PLACEHOLDER: &str = "—";

/// The original card shows a dedicated fallback for a missing location.
pub const LOCATION_PLACEHOLDER: &str = "Location N/A";

/// Chip rendering of a one-or-many field. A field that arrived as a list
/// renders as a labeled collection with one chip per entry; a single bare
/// string renders as one unlabeled chip; a missing field renders one
/// placeholder chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipStrip {
    pub chips: Vec<String>,
    pub labeled: bool,
}

impl ChipStrip {
    fn from_field(field: Option<&OneOrMany>) -> Self {
        match field {
            Some(OneOrMany::Many(values)) => Self {
                chips: values.clone(),
                labeled: true,
            },
            Some(OneOrMany::One(value)) => Self {
                chips: vec![value.clone()],
                labeled: false,
            },
            None => Self {
                chips: vec![PLACEHOLDER.to_string()],
                labeled: false,
            },
        }
    }
}

/// Displayable card for a profile match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub name: String,
    pub location: String,
    pub bio: String,
    pub investment_stages: ChipStrip,
    pub past_investment_types: ChipStrip,
    pub score: String,
    pub ticket_size: String,
    pub recent_activity_year: String,
    pub investment_count: String,
}

/// Displayable card for a similarity match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarityCard {
    pub startup_name: String,
    pub industry: String,
    pub funding_stage: String,
    pub score: String,
    pub investor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResultCard {
    Profile(ProfileCard),
    Similarity(SimilarityCard),
}

/// Produce one displayable card per result, in service order.
pub fn render(results: &[MatchResult]) -> Vec<ResultCard> {
    results
        .iter()
        .map(|result| match result {
            MatchResult::Profile(profile) => ResultCard::Profile(profile_card(profile)),
            MatchResult::Similarity(row) => ResultCard::Similarity(similarity_card(row)),
        })
        .collect()
}

fn profile_card(profile: &InvestorProfile) -> ProfileCard {
    ProfileCard {
        name: text_or_placeholder(profile.name.as_deref()),
        location: profile
            .location
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| LOCATION_PLACEHOLDER.to_string()),
        bio: text_or_placeholder(profile.bio.as_deref()),
        investment_stages: ChipStrip::from_field(profile.investment_stages.as_ref()),
        past_investment_types: ChipStrip::from_field(profile.past_investment_types.as_ref()),
        score: score_text(profile.score),
        ticket_size: text_or_placeholder(profile.ticket_size.as_deref()),
        recent_activity_year: profile
            .recent_activity_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        investment_count: profile
            .investment_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}

fn similarity_card(row: &SimilarStartup) -> SimilarityCard {
    SimilarityCard {
        startup_name: text_or_placeholder(row.startup_name.as_deref()),
        industry: text_or_placeholder(row.industry.as_deref()),
        funding_stage: text_or_placeholder(row.funding_stage.as_deref()),
        score: score_text(row.score),
        investor: text_or_placeholder(row.investor.as_deref()),
    }
}

fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn score_text(score: Option<f64>) -> String {
    score
        .map(|value| value.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
