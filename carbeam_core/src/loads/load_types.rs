//! Load patterns for a simply-supported span
//!
//! The set of patterns is closed: each variant owns exactly one formula set
//! (see [`crate::calculations::beam`]). Magnitudes are positive downward.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, CalcResult};

/// Load pattern acting on a simply-supported beam.
///
/// # Example
/// ```
/// use carbeam_core::loads::LoadPattern;
///
/// let p = LoadPattern::central_point(50.0);
/// assert_eq!(p.magnitude(), 50.0);
/// assert_eq!(p.code(), "P");
///
/// let json = serde_json::to_string(&LoadPattern::uniform(15.0)).unwrap();
/// assert_eq!(json, r#"{"pattern":"uniform","w_kn_per_m":15.0}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum LoadPattern {
    /// Single concentrated load at midspan (kN)
    CentralPoint { p_kn: f64 },
    /// Uniformly distributed load over the full span (kN/m)
    Uniform { w_kn_per_m: f64 },
}

impl LoadPattern {
    /// Midspan point load in kN
    pub fn central_point(p_kn: f64) -> Self {
        LoadPattern::CentralPoint { p_kn }
    }

    /// Full-span uniform load in kN/m
    pub fn uniform(w_kn_per_m: f64) -> Self {
        LoadPattern::Uniform { w_kn_per_m }
    }

    /// Raw magnitude (kN for point loads, kN/m for uniform loads)
    pub fn magnitude(&self) -> f64 {
        match self {
            LoadPattern::CentralPoint { p_kn } => *p_kn,
            LoadPattern::Uniform { w_kn_per_m } => *w_kn_per_m,
        }
    }

    /// Short code used in reports
    pub fn code(&self) -> &'static str {
        match self {
            LoadPattern::CentralPoint { .. } => "P",
            LoadPattern::Uniform { .. } => "w",
        }
    }

    /// Same pattern with the magnitude multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        match self {
            LoadPattern::CentralPoint { p_kn } => LoadPattern::CentralPoint { p_kn: p_kn * factor },
            LoadPattern::Uniform { w_kn_per_m } => LoadPattern::Uniform {
                w_kn_per_m: w_kn_per_m * factor,
            },
        }
    }

    /// Total vertical load carried by the span (kN)
    pub fn total_kn(&self, span_m: f64) -> f64 {
        match self {
            LoadPattern::CentralPoint { p_kn } => *p_kn,
            LoadPattern::Uniform { w_kn_per_m } => w_kn_per_m * span_m,
        }
    }

    /// Magnitude must be finite and non-negative.
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        require_non_negative(field, self.magnitude())
    }
}

impl fmt::Display for LoadPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPattern::CentralPoint { p_kn } => write!(f, "P = {:.2} kN @ midspan", p_kn),
            LoadPattern::Uniform { w_kn_per_m } => write!(f, "w = {:.2} kN/m", w_kn_per_m),
        }
    }
}
