use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Default slider position for both preference weights.
pub const DEFAULT_WEIGHT: f64 = 0.5;

/// Slider step granularity surfaced to front-ends. Values are transmitted
/// as-is; the scoring service owns clamping and rejection.
pub const WEIGHT_STEP: f64 = 0.1;

/// Recommendation algorithm variant requested from the scoring service.
/// Determines both the request payload shape and the result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    Content,
    Collaborative,
    Hybrid,
    StartupSimilarity,
}

impl StrategyType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Content,
            Self::Collaborative,
            Self::Hybrid,
            Self::StartupSimilarity,
        ]
    }

    /// Wire name sent as `rs_type`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Collaborative => "collaborative",
            Self::Hybrid => "hybrid",
            Self::StartupSimilarity => "startup_similarity",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::Collaborative => "Collaborative",
            Self::Hybrid => "Hybrid",
            Self::StartupSimilarity => "Startup Similarity",
        }
    }

    /// Weights are tunable for the hybrid blend only.
    pub const fn takes_weights(self) -> bool {
        matches!(self, Self::Hybrid)
    }
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::Hybrid
    }
}

impl std::str::FromStr for StrategyType {
    type Err = UnknownStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "collaborative" => Ok(Self::Collaborative),
            "hybrid" => Ok(Self::Hybrid),
            "startup_similarity" => Ok(Self::StartupSimilarity),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}'; expected one of content, collaborative, hybrid, startup_similarity",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

/// Company-maturity bucket offered alongside the catalog-backed filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoundedYearBucket {
    New,
    Growing,
    Established,
    Unknown,
}

impl FoundedYearBucket {
    pub const fn ordered() -> [Self; 4] {
        [Self::New, Self::Growing, Self::Established, Self::Unknown]
    }

    /// Wire label sent as `foundedYear`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Growing => "Growing",
            Self::Established => "Established",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::str::FromStr for FoundedYearBucket {
    type Err = UnknownBucket;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "growing" => Ok(Self::Growing),
            "established" => Ok(Self::Established),
            "unknown" => Ok(Self::Unknown),
            other => Err(UnknownBucket(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBucket(pub String);

impl fmt::Display for UnknownBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown maturity bucket '{}'; expected New, Growing, Established, or Unknown",
            self.0
        )
    }
}

impl std::error::Error for UnknownBucket {}

/// The two set-valued filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSelectField {
    Industries,
    Stages,
}

/// Current value of every filter control. Mutated only through the setters
/// and `toggle`; the network layer never writes back into it, so a failed
/// submission leaves the user's selections intact for a retry.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub industries: BTreeSet<String>,
    pub stages: BTreeSet<String>,
    pub team_size: String,
    pub founded_year: Option<FoundedYearBucket>,
    pub location: String,
    pub business_model: String,
    pub revenue_stage: String,
    pub customer_segment: String,
    pub activity_weight: f64,
    pub investment_weight: f64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            industries: BTreeSet::new(),
            stages: BTreeSet::new(),
            team_size: String::new(),
            founded_year: None,
            location: String::new(),
            business_model: String::new(),
            revenue_stage: String::new(),
            customer_segment: String::new(),
            activity_weight: DEFAULT_WEIGHT,
            investment_weight: DEFAULT_WEIGHT,
        }
    }
}

impl SelectionState {
    /// Flip membership of `value` in the named set field: present values are
    /// removed, absent values inserted. Toggling twice restores the set.
    pub fn toggle(&mut self, field: MultiSelectField, value: &str) {
        let set = match field {
            MultiSelectField::Industries => &mut self.industries,
            MultiSelectField::Stages => &mut self.stages,
        };
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}
