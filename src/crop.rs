use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Error;

/// Crop growth stages with a tabulated crop coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    WinterDormancy,
    Development,
    FruitSet,
    Ripening,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 4] = [
        GrowthStage::WinterDormancy,
        GrowthStage::Development,
        GrowthStage::FruitSet,
        GrowthStage::Ripening,
    ];

    /// Label used by the weather station records.
    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::WinterDormancy => "parada_invernal",
            GrowthStage::Development => "desarrollo",
            GrowthStage::FruitSet => "cuajado",
            GrowthStage::Ripening => "maduración",
        }
    }

    pub fn coefficient(self) -> f64 {
        match self {
            GrowthStage::WinterDormancy => 0.4,
            GrowthStage::Development => 0.6,
            GrowthStage::FruitSet => 0.9,
            GrowthStage::Ripening => 0.7,
        }
    }
}

impl FromStr for GrowthStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.to_lowercase();
        GrowthStage::ALL
            .into_iter()
            .find(|stage| stage.label() == label)
            .ok_or_else(|| {
                let valid: Vec<&str> =
                    GrowthStage::ALL.iter().map(|stage| stage.label()).collect();
                Error::UnknownGrowthStage(s.to_string(), valid.join(", "))
            })
    }
}

/// Result of a crop coefficient lookup.
///
/// Unknown labels are kept distinct from known ones so callers can tell a
/// real zero demand from a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CropCoefficient {
    Known(GrowthStage),
    Unknown,
}

impl CropCoefficient {
    /// The dimensionless coefficient; `0.0` for unknown stages.
    pub fn value(self) -> f64 {
        match self {
            CropCoefficient::Known(stage) => stage.coefficient(),
            CropCoefficient::Unknown => 0.,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, CropCoefficient::Known(_))
    }
}

/// Case-insensitive lookup, falling back to [`CropCoefficient::Unknown`].
pub fn crop_coefficient(growth_stage: &str) -> CropCoefficient {
    growth_stage
        .parse()
        .map_or(CropCoefficient::Unknown, CropCoefficient::Known)
}
