//! # Materials and Section Catalogs
//!
//! Structural steel grades, material properties and the catalog of candidate
//! sections the selection runs over.
//!
//! ## Contents
//!
//! - [`SteelGrade`] / [`SteelMaterial`] - yield strength, partial factor, modulus
//! - [`Section`] / [`Catalog`] - candidate sections with embodied-carbon data
//! - [`ipe`] - built-in European IPE profile table
//!
//! ## Example
//!
//! ```rust
//! use carbeam_core::materials::{SteelGrade, SteelMaterial};
//! use carbeam_core::settings::DesignSettings;
//!
//! let steel = SteelMaterial::from_grade(SteelGrade::S355, &DesignSettings::default());
//! assert_eq!(steel.fy_mpa, 355.0);
//! assert_eq!(steel.design_strength_mpa(), 355.0);
//! ```

pub mod ipe;
pub mod sections;

pub use ipe::{ipe_catalog, DEFAULT_IPE_CATALOG};
pub use sections::{Catalog, Section};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Structural steel grade (EN 10025-2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    S235,
    S275,
    S355,
}

impl SteelGrade {
    /// All supported grades
    pub const ALL: [SteelGrade; 3] = [SteelGrade::S235, SteelGrade::S275, SteelGrade::S355];

    /// Nominal yield strength fy (MPa) for thickness ≤ 40 mm
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::S235 => 235.0,
            SteelGrade::S275 => 275.0,
            SteelGrade::S355 => 355.0,
        }
    }

    /// Grade designation (e.g. "S355")
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::S235 => "S235",
            SteelGrade::S275 => "S275",
            SteelGrade::S355 => "S355",
        }
    }
}

impl fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SteelGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SteelGrade::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::validation("steel_grade", s, "Unknown steel grade (expected S235, S275 or S355)"))
    }
}

/// Steel properties used by the bending and deflection checks.
///
/// Stored as plain numbers so a scenario can carry a non-catalog grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Grade label for reports (e.g. "S355")
    pub grade: String,

    /// Yield strength fy (MPa)
    pub fy_mpa: f64,

    /// Partial factor γ_M0
    pub gamma_m0: f64,

    /// Modulus of elasticity E (MPa)
    pub e_mpa: f64,
}

impl SteelMaterial {
    /// Material for a standard grade, with γ_M0 and E from settings
    pub fn from_grade(grade: SteelGrade, settings: &DesignSettings) -> Self {
        SteelMaterial {
            grade: grade.code().to_string(),
            fy_mpa: grade.fy_mpa(),
            gamma_m0: settings.gamma_m0,
            e_mpa: settings.e_mpa,
        }
    }

    /// Material with explicit properties
    pub fn custom(grade: impl Into<String>, fy_mpa: f64, gamma_m0: f64, e_mpa: f64) -> Self {
        SteelMaterial {
            grade: grade.into(),
            fy_mpa,
            gamma_m0,
            e_mpa,
        }
    }

    /// Design yield strength fy / γ_M0 (MPa)
    pub fn design_strength_mpa(&self) -> f64 {
        self.fy_mpa / self.gamma_m0
    }

    /// Validate material properties
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("material.fy_mpa", self.fy_mpa)?;
        require_positive("material.gamma_m0", self.gamma_m0)?;
        require_positive("material.e_mpa", self.e_mpa)?;
        Ok(())
    }
}

impl Default for SteelMaterial {
    fn default() -> Self {
        let settings = DesignSettings::default();
        SteelMaterial::from_grade(settings.default_grade, &settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing() {
        assert_eq!("S355".parse::<SteelGrade>().unwrap(), SteelGrade::S355);
        assert_eq!(" s275 ".parse::<SteelGrade>().unwrap(), SteelGrade::S275);
        assert!("S460".parse::<SteelGrade>().is_err());
    }

    #[test]
    fn test_grade_strengths() {
        assert_eq!(SteelGrade::S235.fy_mpa(), 235.0);
        assert_eq!(SteelGrade::S275.fy_mpa(), 275.0);
        assert_eq!(SteelGrade::S355.fy_mpa(), 355.0);
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&SteelGrade::S235).unwrap();
        assert_eq!(json, "\"S235\"");
    }

    #[test]
    fn test_design_strength_applies_partial_factor() {
        let steel = SteelMaterial::custom("S355", 355.0, 1.1, 210_000.0);
        assert!((steel.design_strength_mpa() - 322.727).abs() < 0.01);
    }

    #[test]
    fn test_material_validation() {
        assert!(SteelMaterial::default().validate().is_ok());
        let bad = SteelMaterial::custom("X", 355.0, 0.0, 210_000.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_from_grade_uses_settings() {
        let settings = DesignSettings {
            gamma_m0: 1.05,
            e_mpa: 200_000.0,
            ..DesignSettings::default()
        };
        let steel = SteelMaterial::from_grade(SteelGrade::S275, &settings);
        assert_eq!(steel.gamma_m0, 1.05);
        assert_eq!(steel.e_mpa, 200_000.0);
        assert_eq!(steel.grade, "S275");
    }
}
