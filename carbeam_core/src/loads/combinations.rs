//! Load cases and linear load combinations
//!
//! A [`LoadCase`] groups the patterns of one action (permanent, imposed, ...)
//! together with its partial factor γ. [`combine_load_cases`] builds a single
//! factored case from several, e.g. 1.35·G + 1.5·Q.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::LoadPattern;
use crate::errors::{require_non_negative, CalcError, CalcResult};

/// A single load case (e.g. "G", "Q1") with partial factor gamma.
///
/// # Example
/// ```
/// use carbeam_core::loads::{LoadCase, LoadPattern};
///
/// let g = LoadCase::new("G")
///     .with_load(LoadPattern::uniform(4.0))
///     .with_gamma(1.35);
///
/// assert_eq!(g.loads.len(), 1);
/// assert_eq!(g.gamma, 1.35);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Case identifier used to look up combination factors
    pub name: String,

    /// Load patterns in this case
    #[serde(default)]
    pub loads: Vec<LoadPattern>,

    /// Partial factor applied on top of the combination factor
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_gamma() -> f64 {
    1.0
}

impl LoadCase {
    /// Create an empty case with gamma = 1.0
    pub fn new(name: impl Into<String>) -> Self {
        LoadCase {
            name: name.into(),
            loads: Vec::new(),
            gamma: default_gamma(),
        }
    }

    /// Add a load pattern (builder pattern)
    pub fn with_load(mut self, load: LoadPattern) -> Self {
        self.loads.push(load);
        self
    }

    /// Set the partial factor (builder pattern)
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }
}

/// Linear combination of load cases.
///
/// Each case contributes its loads scaled by `factors[name] × gamma`. Cases
/// without a factor, or with a zero factor, are skipped. The returned case
/// has gamma = 1.0.
///
/// # Example
/// ```
/// use carbeam_core::loads::{combine_load_cases, LoadCase, LoadPattern};
/// use std::collections::HashMap;
///
/// let g = LoadCase::new("G").with_load(LoadPattern::uniform(10.0));
/// let q = LoadCase::new("Q").with_load(LoadPattern::central_point(20.0));
///
/// let factors: HashMap<String, f64> = [("G".to_string(), 1.35), ("Q".to_string(), 1.5)]
///     .into_iter()
///     .collect();
///
/// let uls = combine_load_cases(&[g, q], &factors, "ULS").unwrap();
/// assert_eq!(uls.loads.len(), 2);
/// assert!((uls.loads[0].magnitude() - 13.5).abs() < 1e-9);
/// assert!((uls.loads[1].magnitude() - 30.0).abs() < 1e-9);
/// ```
pub fn combine_load_cases(
    cases: &[LoadCase],
    factors: &HashMap<String, f64>,
    name: impl Into<String>,
) -> CalcResult<LoadCase> {
    if cases.is_empty() {
        return Err(CalcError::configuration("No load cases provided"));
    }

    let mut combined = LoadCase::new(name);

    for case in cases {
        require_non_negative(&format!("gamma[{}]", case.name), case.gamma)?;

        let psi = factors.get(&case.name).copied().unwrap_or(0.0);
        require_non_negative(&format!("factors[{}]", case.name), psi)?;
        if psi == 0.0 {
            continue;
        }

        let factor = psi * case.gamma;
        combined
            .loads
            .extend(case.loads.iter().map(|load| load.scaled(factor)));
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_gamma_and_factor_multiply() {
        let g = LoadCase::new("G")
            .with_load(LoadPattern::uniform(10.0))
            .with_gamma(1.35);
        let combo = combine_load_cases(&[g], &factors(&[("G", 1.0)]), "ULS").unwrap();
        assert!((combo.loads[0].magnitude() - 13.5).abs() < 1e-9);
        assert_eq!(combo.gamma, 1.0);
        assert_eq!(combo.name, "ULS");
    }

    #[test]
    fn test_missing_factor_skips_case() {
        let g = LoadCase::new("G").with_load(LoadPattern::uniform(10.0));
        let w = LoadCase::new("W").with_load(LoadPattern::uniform(3.0));
        let combo = combine_load_cases(&[g, w], &factors(&[("G", 1.0)]), "C").unwrap();
        assert_eq!(combo.loads.len(), 1);
    }

    #[test]
    fn test_no_cases_is_configuration_error() {
        let err = combine_load_cases(&[], &HashMap::new(), "C").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_negative_factor_rejected() {
        let g = LoadCase::new("G").with_load(LoadPattern::uniform(10.0));
        let err = combine_load_cases(&[g], &factors(&[("G", -1.0)]), "C").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_gamma_defaults_in_json() {
        let case: LoadCase = serde_json::from_str(r#"{ "name": "Q" }"#).unwrap();
        assert_eq!(case.gamma, 1.0);
        assert!(case.loads.is_empty());
    }
}
