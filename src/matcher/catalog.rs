use serde::{Deserialize, Serialize};

/// Read-only lookup data for every dropdown and chip group, fetched once per
/// session from the catalog endpoint. Each category defaults to an empty
/// list when the response omits its key, so front-ends render an empty
/// control instead of failing on a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCatalog {
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub stages: Vec<String>,
    #[serde(default)]
    pub team_sizes: Vec<String>,
    #[serde(default)]
    pub revenue_stages: Vec<String>,
    #[serde(default)]
    pub customer_segments: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl OptionCatalog {
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
            && self.stages.is_empty()
            && self.team_sizes.is_empty()
            && self.revenue_stages.is_empty()
            && self.customer_segments.is_empty()
            && self.locations.is_empty()
    }

    /// (category name, values) pairs in display order.
    pub fn categories(&self) -> [(&'static str, &[String]); 6] {
        [
            ("industries", self.industries.as_slice()),
            ("stages", self.stages.as_slice()),
            ("team_sizes", self.team_sizes.as_slice()),
            ("revenue_stages", self.revenue_stages.as_slice()),
            ("customer_segments", self.customer_segments.as_slice()),
            ("locations", self.locations.as_slice()),
        ]
    }
}
