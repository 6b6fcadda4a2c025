use serde::{Deserialize, Serialize};

/// Straight-line depreciation length of each component, in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepreciationDurations {
    #[serde(alias = "duree_amort_bati", alias = "amortissement_bien_duree")]
    pub building: u32,

    #[serde(alias = "duree_amort_mobilier", alias = "amortissement_mobilier_duree")]
    pub furnishings: u32,

    #[serde(alias = "duree_amort_travaux", alias = "amortissement_travaux_duree")]
    pub works: u32,

    #[serde(alias = "duree_amort_frais")]
    pub fees: u32,
}

impl Default for DepreciationDurations {
    fn default() -> Self {
        Self {
            building: 30,
            furnishings: 7,
            works: 10,
            fees: 5,
        }
    }
}
