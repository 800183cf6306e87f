//! # Design Settings
//!
//! Defaults applied when a scenario or catalog row does not say otherwise:
//! steel grade, partial factor, elastic modulus, density, carbon factor and
//! deflection limit. Settings are plain JSON so a team can keep one file per
//! office standard.
//!
//! ## Example
//!
//! ```rust
//! use carbeam_core::settings::DesignSettings;
//!
//! // Fields left out of the file keep their defaults
//! let settings = DesignSettings::from_json_str(r#"{ "deflection_limit_divisor": 360.0 }"#).unwrap();
//! assert_eq!(settings.deflection_limit_divisor, 360.0);
//! assert_eq!(settings.density_kg_per_m3, 7850.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::SteelGrade;

/// Young's modulus of structural steel (MPa)
pub const E_STEEL_MPA: f64 = 210_000.0;

/// Density of structural steel (kg/m³)
pub const STEEL_DENSITY_KG_PER_M3: f64 = 7850.0;

/// Embodied carbon of structural steel (kg CO₂-eq per kg)
pub const STEEL_CO2_KG_PER_KG: f64 = 1.9;

/// Global design settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Steel grade used when the caller does not pick one
    pub default_grade: SteelGrade,

    /// Material partial factor γ_M0
    pub gamma_m0: f64,

    /// Modulus of elasticity E (MPa)
    pub e_mpa: f64,

    /// Material density used to derive mass from area (kg/m³)
    pub density_kg_per_m3: f64,

    /// Carbon factor for catalog rows without their own (kg CO₂-eq / kg)
    pub carbon_factor: f64,

    /// Deflection limit divisor n in L/n
    pub deflection_limit_divisor: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            default_grade: SteelGrade::S355,
            gamma_m0: 1.0,
            e_mpa: E_STEEL_MPA,
            density_kg_per_m3: STEEL_DENSITY_KG_PER_M3,
            carbon_factor: STEEL_CO2_KG_PER_KG,
            deflection_limit_divisor: 250.0,
        }
    }
}

impl DesignSettings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: DesignSettings = serde_json::from_str(json)
            .map_err(|e| CalcError::serialization(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load_from_file(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Self::from_json_str(&contents)
    }

    /// Check that every numeric setting is finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("gamma_m0", self.gamma_m0)?;
        require_positive("e_mpa", self.e_mpa)?;
        require_positive("density_kg_per_m3", self.density_kg_per_m3)?;
        require_positive("carbon_factor", self.carbon_factor)?;
        require_positive("deflection_limit_divisor", self.deflection_limit_divisor)?;
        Ok(())
    }
}
