//! Loads on a simply-supported beam
//!
//! # Overview
//!
//! - [`LoadPattern`] - Closed set of load patterns (midspan point, full-span uniform)
//! - [`LoadCase`] - Named group of patterns with a partial factor
//! - [`combine_load_cases`] - Linear combination of load cases
//!
//! # Example
//!
//! ```
//! use carbeam_core::loads::{LoadCase, LoadPattern, combine_load_cases};
//! use std::collections::HashMap;
//!
//! let permanent = LoadCase::new("G").with_load(LoadPattern::uniform(6.0));
//! let imposed = LoadCase::new("Q").with_load(LoadPattern::central_point(20.0));
//!
//! let factors: HashMap<String, f64> =
//!     [("G".to_string(), 1.35), ("Q".to_string(), 1.5)].into_iter().collect();
//!
//! let uls = combine_load_cases(&[permanent, imposed], &factors, "ULS").unwrap();
//! println!("ULS loads: {:?}", uls.loads);
//! ```

pub mod combinations;
pub mod load_types;

pub use combinations::{combine_load_cases, LoadCase};
pub use load_types::LoadPattern;

use crate::errors::{CalcError, CalcResult};

/// Validate a load list: non-empty, every magnitude finite and non-negative.
///
/// `field` names the list in error messages (e.g. "loads", "service_loads").
pub fn validate_loads(field: &str, loads: &[LoadPattern]) -> CalcResult<()> {
    if loads.is_empty() {
        return Err(CalcError::validation(field, "[]", "At least one load is required"));
    }
    for (i, load) in loads.iter().enumerate() {
        load.validate(&format!("{}[{}]", field, i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_loads() {
        assert!(validate_loads("loads", &[LoadPattern::uniform(1.0)]).is_ok());
        assert!(validate_loads("loads", &[]).is_err());

        let err = validate_loads(
            "loads",
            &[LoadPattern::uniform(1.0), LoadPattern::central_point(-2.0)],
        )
        .unwrap_err();
        match err {
            CalcError::Validation { field, .. } => assert_eq!(field, "loads[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
