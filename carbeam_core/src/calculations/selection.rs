//! # Low-Carbon Section Selection
//!
//! Checks every catalog section against bending and deflection, computes
//! embodied CO₂ for the sections that pass both, and picks the lowest.
//!
//! ## Rules
//!
//! - Checks are non-strict: capacity equal to demand passes.
//! - CO₂ is only compared among feasible sections; an infeasible section is
//!   never selected however light it is.
//! - CO₂ ties go to the earliest catalog entry.
//! - When nothing passes, the result is [`SelectionResult::Infeasible`] with
//!   signed margins for every candidate. That is a normal outcome, not an error.
//!
//! ## Example
//!
//! ```rust
//! use carbeam_core::calculations::{evaluate, Scenario, SelectionResult};
//! use carbeam_core::loads::LoadPattern;
//! use carbeam_core::materials::{SteelMaterial, DEFAULT_IPE_CATALOG};
//!
//! let scenario = Scenario::new("B-1", 6.0, SteelMaterial::default(), 250.0)
//!     .with_load(LoadPattern::uniform(15.0))
//!     .with_load(LoadPattern::central_point(30.0));
//!
//! match evaluate(&scenario, &DEFAULT_IPE_CATALOG).unwrap() {
//!     SelectionResult::Selected { section, co2_kg, .. } => {
//!         println!("{} -> {:.1} kg CO2", section.id, co2_kg);
//!     }
//!     SelectionResult::Infeasible { failures, .. } => {
//!         println!("{} candidates, none pass", failures.len());
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::beam::{midspan_deflection, moment_capacity, LoadEffects, Scenario};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{Catalog, Section};
use crate::units::{Cm3, Cm4, MegaPascals};

/// The two checks every section goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Ultimate limit state: M_Ed ≤ M_Rd
    Bending,
    /// Serviceability: δ ≤ L/n
    Deflection,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Bending => write!(f, "Bending"),
            CheckKind::Deflection => write!(f, "Deflection"),
        }
    }
}

/// Per-section check record.
///
/// Margins are signed `demand - capacity`: negative means reserve, positive
/// means the check fails by that amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Section identifier
    pub section_id: String,

    /// Position in the catalog (tie-break key)
    pub index: usize,

    // === Bending ===
    /// Moment demand M_Ed (kN·m)
    pub moment_demand_knm: f64,

    /// Moment capacity M_Rd (kN·m)
    pub moment_capacity_knm: f64,

    /// M_Ed - M_Rd (kN·m)
    pub moment_margin_knm: f64,

    /// M_Ed / M_Rd
    pub bending_unity: f64,

    /// M_Rd ≥ M_Ed
    pub bending_ok: bool,

    // === Deflection ===
    /// Midspan deflection under service loads (mm)
    pub deflection_demand_mm: f64,

    /// Allowable deflection L/n (mm)
    pub deflection_limit_mm: f64,

    /// δ - δ_lim (mm)
    pub deflection_margin_mm: f64,

    /// δ / δ_lim
    pub deflection_unity: f64,

    /// δ ≤ δ_lim
    pub deflection_ok: bool,

    // === Summary ===
    /// Maximum shear V_Ed (kN), reported for reference only
    pub shear_demand_kn: f64,

    /// Both checks pass
    pub feasible: bool,

    /// Member mass over the span (kg)
    pub mass_kg: f64,

    /// Embodied CO₂ (kg CO₂-eq); present only for feasible sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_kg: Option<f64>,
}

impl CheckResult {
    /// Get the governing (highest) unity ratio
    pub fn governing_unity(&self) -> f64 {
        self.bending_unity.max(self.deflection_unity)
    }

    /// Which check governs the design
    pub fn governing_check(&self) -> CheckKind {
        if self.bending_unity >= self.deflection_unity {
            CheckKind::Bending
        } else {
            CheckKind::Deflection
        }
    }

    /// First reported quantity that is NaN or infinite, by field name
    pub fn non_finite_value(&self) -> Option<(&'static str, f64)> {
        let mut values = [
            ("moment_demand_knm", self.moment_demand_knm),
            ("moment_capacity_knm", self.moment_capacity_knm),
            ("moment_margin_knm", self.moment_margin_knm),
            ("bending_unity", self.bending_unity),
            ("deflection_demand_mm", self.deflection_demand_mm),
            ("deflection_limit_mm", self.deflection_limit_mm),
            ("deflection_margin_mm", self.deflection_margin_mm),
            ("deflection_unity", self.deflection_unity),
            ("shear_demand_kn", self.shear_demand_kn),
            ("mass_kg", self.mass_kg),
        ]
        .into_iter()
        .chain(self.co2_kg.map(|co2| ("co2_kg", co2)));
        values.find(|(_, value)| !value.is_finite())
    }

    /// Failed checks with their demands, capacities and margins
    pub fn failures(&self) -> Vec<CheckFailure> {
        let mut failed = Vec::new();
        if !self.bending_ok {
            failed.push(CheckFailure {
                check: CheckKind::Bending,
                demand: self.moment_demand_knm,
                capacity: self.moment_capacity_knm,
                margin: self.moment_margin_knm,
            });
        }
        if !self.deflection_ok {
            failed.push(CheckFailure {
                check: CheckKind::Deflection,
                demand: self.deflection_demand_mm,
                capacity: self.deflection_limit_mm,
                margin: self.deflection_margin_mm,
            });
        }
        failed
    }
}

/// One failed check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub check: CheckKind,
    /// Demand (kN·m for bending, mm for deflection)
    pub demand: f64,
    /// Capacity or limit, same unit as `demand`
    pub capacity: f64,
    /// demand - capacity (positive)
    pub margin: f64,
}

/// Why one candidate was rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub section_id: String,
    pub index: usize,
    pub failed: Vec<CheckFailure>,
}

impl From<&CheckResult> for CandidateFailure {
    fn from(check: &CheckResult) -> Self {
        CandidateFailure {
            section_id: check.section_id.clone(),
            index: check.index,
            failed: check.failures(),
        }
    }
}

/// Outcome of a selection run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "status": "selected",
///   "section": { "id": "IPE 300", "...": "..." },
///   "check": { "section_id": "IPE 300", "feasible": true, "...": "..." },
///   "co2_kg": 481.08,
///   "checks": [ "..." ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectionResult {
    /// Lowest-CO₂ feasible section
    Selected {
        section: Section,
        check: CheckResult,
        co2_kg: f64,
        /// Every candidate, in catalog order
        checks: Vec<CheckResult>,
    },
    /// No candidate passes both checks
    Infeasible {
        /// Every candidate, in catalog order
        checks: Vec<CheckResult>,
        /// Failed checks per candidate, in catalog order
        failures: Vec<CandidateFailure>,
    },
}

impl SelectionResult {
    /// True when a section was selected
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionResult::Selected { .. })
    }

    /// Identifier of the selected section, if any
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            SelectionResult::Selected { section, .. } => Some(&section.id),
            SelectionResult::Infeasible { .. } => None,
        }
    }

    /// Embodied CO₂ of the selected section, if any
    pub fn co2_kg(&self) -> Option<f64> {
        match self {
            SelectionResult::Selected { co2_kg, .. } => Some(*co2_kg),
            SelectionResult::Infeasible { .. } => None,
        }
    }

    /// Check records for every candidate in catalog order
    pub fn checks(&self) -> &[CheckResult] {
        match self {
            SelectionResult::Selected { checks, .. } => checks,
            SelectionResult::Infeasible { checks, .. } => checks,
        }
    }

    /// Number of candidates passing both checks
    pub fn feasible_count(&self) -> usize {
        self.checks().iter().filter(|c| c.feasible).count()
    }
}

/// Check one section against a validated scenario.
///
/// `index` is the section's catalog position. Call [`evaluate`] for the
/// validating entry point; this function trusts its inputs.
pub fn check_section(scenario: &Scenario, section: &Section, index: usize) -> CheckResult {
    check_with_effects(scenario, &scenario.load_effects(), section, index)
}

fn check_with_effects(scenario: &Scenario, effects: &LoadEffects, section: &Section, index: usize) -> CheckResult {
    let span = scenario.span();

    // Bending
    let moment_demand = effects.moment_knm;
    let moment_capacity = moment_capacity(Cm3(section.section_modulus_cm3), &scenario.material).value();
    let bending_ok = moment_capacity >= moment_demand;

    // Deflection
    let deflection_demand = midspan_deflection(
        span,
        scenario.deflection_loads(),
        MegaPascals(scenario.material.e_mpa),
        Cm4(section.second_moment_cm4),
    )
    .value();
    let deflection_limit = scenario.deflection_limit().value();
    let deflection_ok = deflection_demand <= deflection_limit;

    let feasible = bending_ok && deflection_ok;
    let co2_kg = feasible.then(|| section.embodied_co2_kg(span));

    CheckResult {
        section_id: section.id.clone(),
        index,
        moment_demand_knm: moment_demand,
        moment_capacity_knm: moment_capacity,
        moment_margin_knm: moment_demand - moment_capacity,
        bending_unity: moment_demand / moment_capacity,
        bending_ok,
        deflection_demand_mm: deflection_demand,
        deflection_limit_mm: deflection_limit,
        deflection_margin_mm: deflection_demand - deflection_limit,
        deflection_unity: deflection_demand / deflection_limit,
        deflection_ok,
        shear_demand_kn: effects.shear_kn,
        feasible,
        mass_kg: section.mass_kg(span),
        co2_kg,
    }
}

/// Select the lowest-embodied-CO₂ section that passes bending and deflection.
///
/// # Errors
///
/// * `Validation` - non-positive span, negative load, non-positive section
///   property, etc. Raised before any check is computed.
/// * `Configuration` - empty catalog or duplicate section identifiers.
/// * `Validation` - inputs so large that a demand, capacity or CO₂ value
///   overflows to infinity or NaN.
///
/// # Example
///
/// ```rust
/// use carbeam_core::calculations::{evaluate, Scenario};
/// use carbeam_core::loads::LoadPattern;
/// use carbeam_core::materials::{Catalog, Section, SteelMaterial};
///
/// let scenario = Scenario::new("B-1", 6.0, SteelMaterial::custom("S355", 355.0, 1.0, 200_000.0), 360.0)
///     .with_load(LoadPattern::central_point(50.0));
///
/// let catalog = Catalog::new(vec![
///     Section::from_mass_per_metre("IPE 220", 26.2, 2772.0, 252.0, 7850.0, 1.9),
///     Section::from_mass_per_metre("IPE 300", 42.2, 8356.0, 557.0, 7850.0, 1.9),
///     Section::from_mass_per_metre("IPE 360", 57.1, 16270.0, 904.0, 7850.0, 1.9),
/// ]);
///
/// let result = evaluate(&scenario, &catalog).expect("valid inputs");
/// assert_eq!(result.selected_id(), Some("IPE 300"));
/// ```
pub fn evaluate(scenario: &Scenario, catalog: &Catalog) -> CalcResult<SelectionResult> {
    scenario.validate()?;
    catalog.validate()?;

    let effects = scenario.load_effects();
    let mut checks = Vec::with_capacity(catalog.len());
    for (i, section) in catalog.iter().enumerate() {
        let check = check_with_effects(scenario, &effects, section, i);
        // Overflow here would otherwise surface as `null` in the JSON result
        if let Some((name, value)) = check.non_finite_value() {
            return Err(CalcError::validation(
                format!("checks[{}].{} ({})", i, name, section.id),
                value.to_string(),
                "Result is not finite; span, loads or section properties are out of range",
            ));
        }
        checks.push(check);
    }

    let mut best: Option<(usize, f64)> = None;
    for check in &checks {
        let Some(co2) = check.co2_kg else { continue };
        // Strict comparison keeps the earliest entry on ties
        if best.map_or(true, |(_, best_co2)| co2 < best_co2) {
            best = Some((check.index, co2));
        }
    }

    let result = match best {
        Some((index, co2_kg)) => SelectionResult::Selected {
            section: catalog.sections()[index].clone(),
            check: checks[index].clone(),
            co2_kg,
            checks,
        },
        None => SelectionResult::Infeasible {
            failures: checks.iter().map(CandidateFailure::from).collect(),
            checks,
        },
    };

    Ok(result)
}

/// Feasible candidates ordered by CO₂ ascending, catalog order on ties.
pub fn rank_feasible(result: &SelectionResult) -> Vec<&CheckResult> {
    let mut ranked: Vec<&CheckResult> = result.checks().iter().filter(|c| c.feasible).collect();
    ranked.sort_by(|a, b| {
        let a_co2 = a.co2_kg.unwrap_or(f64::INFINITY);
        let b_co2 = b.co2_kg.unwrap_or(f64::INFINITY);
        a_co2.total_cmp(&b_co2).then(a.index.cmp(&b.index))
    });
    ranked
}
