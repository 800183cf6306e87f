//! # Simply-Supported Steel Beam
//!
//! Scenario definition and the closed-form formulas the section checks use.
//!
//! ## Assumptions
//!
//! - Simply-supported (pin-roller) boundary conditions
//! - Loads from the closed set in [`LoadPattern`]; every pattern peaks at
//!   midspan, so maxima of several patterns add directly
//! - Linear elastic behavior, elastic section modulus for bending resistance
//! - Laterally restrained compression flange (no lateral-torsional buckling)
//!
//! ## Formulas
//!
//! | Pattern | M_max | V_max | δ_max |
//! |---|---|---|---|
//! | Central point P | PL/4 | P/2 | PL³/(48EI) |
//! | Uniform w | wL²/8 | wL/2 | 5wL⁴/(384EI) |
//!
//! Resistance: M_Rd = W·fy/γ_M0. Deflection limit: L/n.
//!
//! ## Example
//!
//! ```rust
//! use carbeam_core::calculations::beam::Scenario;
//! use carbeam_core::loads::LoadPattern;
//! use carbeam_core::materials::SteelMaterial;
//!
//! let scenario = Scenario::new("B-1", 6.0, SteelMaterial::custom("S355", 355.0, 1.0, 200_000.0), 360.0)
//!     .with_load(LoadPattern::central_point(50.0));
//!
//! let effects = scenario.load_effects();
//! assert!((effects.moment_knm - 75.0).abs() < 1e-9);
//! assert!((scenario.deflection_limit().value() - 16.6667).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};
use crate::loads::{validate_loads, LoadPattern};
use crate::materials::SteelMaterial;
use crate::settings::DesignSettings;
use crate::units::{Cm3, Cm4, KiloNewtons, KnM, KnPerM, MegaPascals, Meters, Millimeters, Mm3, Mm4, NMm, NPerMm, Newtons};

/// Support condition. Only simply-supported spans are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SupportCondition {
    /// Pin at one end, roller at the other
    #[default]
    SimplySupported,
}

/// Structural scenario: span, loads, material and serviceability limit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "span_m": 6.0,
///   "support": "SimplySupported",
///   "loads": [
///     { "pattern": "uniform", "w_kn_per_m": 15.0 },
///     { "pattern": "central_point", "p_kn": 30.0 }
///   ],
///   "material": { "grade": "S355", "fy_mpa": 355.0, "gamma_m0": 1.0, "e_mpa": 210000.0 },
///   "deflection_limit_divisor": 250.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// User label (e.g. "B-1", "Floor beam grid A")
    #[serde(default)]
    pub label: String,

    /// Span length (m)
    pub span_m: f64,

    /// Support condition
    #[serde(default)]
    pub support: SupportCondition,

    /// Design (ultimate) loads used for the bending check
    pub loads: Vec<LoadPattern>,

    /// Service loads used for the deflection check; design loads when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_loads: Option<Vec<LoadPattern>>,

    /// Steel properties
    #[serde(default)]
    pub material: SteelMaterial,

    /// Deflection limit divisor n in L/n (e.g. 360)
    pub deflection_limit_divisor: f64,
}

impl Scenario {
    /// Create a scenario with no loads
    pub fn new(label: impl Into<String>, span_m: f64, material: SteelMaterial, deflection_limit_divisor: f64) -> Self {
        Scenario {
            label: label.into(),
            span_m,
            support: SupportCondition::SimplySupported,
            loads: Vec::new(),
            service_loads: None,
            material,
            deflection_limit_divisor,
        }
    }

    /// Create a scenario using the default grade, γ_M0, E and divisor from settings
    pub fn from_settings(label: impl Into<String>, span_m: f64, settings: &DesignSettings) -> Self {
        Scenario::new(
            label,
            span_m,
            SteelMaterial::from_grade(settings.default_grade, settings),
            settings.deflection_limit_divisor,
        )
    }

    /// Add a design load (builder pattern)
    pub fn with_load(mut self, load: LoadPattern) -> Self {
        self.loads.push(load);
        self
    }

    /// Add a service load (builder pattern)
    pub fn with_service_load(mut self, load: LoadPattern) -> Self {
        self.service_loads.get_or_insert_with(Vec::new).push(load);
        self
    }

    /// Validate span, loads, material and divisor.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("span_m", self.span_m)?;
        validate_loads("loads", &self.loads)?;
        if let Some(service) = &self.service_loads {
            validate_loads("service_loads", service)?;
        }
        self.material.validate()?;
        require_positive("deflection_limit_divisor", self.deflection_limit_divisor)?;
        Ok(())
    }

    /// Span as a typed length
    pub fn span(&self) -> Meters {
        Meters(self.span_m)
    }

    /// Loads that drive the deflection check
    pub fn deflection_loads(&self) -> &[LoadPattern] {
        self.service_loads.as_deref().unwrap_or(&self.loads)
    }

    /// Section-independent effects of the design loads
    pub fn load_effects(&self) -> LoadEffects {
        LoadEffects::from_loads(self.span(), &self.loads)
    }

    /// Allowable deflection L/n (mm)
    pub fn deflection_limit(&self) -> Millimeters {
        deflection_limit(self.span(), self.deflection_limit_divisor)
    }
}

/// Maximum internal forces from a set of design loads.
///
/// These do not depend on the section, so the evaluator computes them once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadEffects {
    /// Maximum bending moment M_Ed (kN·m), at midspan
    pub moment_knm: f64,

    /// Maximum shear V_Ed (kN), at the supports
    pub shear_kn: f64,

    /// Support reaction R_A = R_B (kN)
    pub reaction_kn: f64,
}

impl LoadEffects {
    /// Superpose the effects of every load pattern
    pub fn from_loads(span: Meters, loads: &[LoadPattern]) -> Self {
        let moment = loads
            .iter()
            .fold(KnM(0.0), |acc, load| acc + load.max_moment(span));
        let shear = loads
            .iter()
            .fold(KiloNewtons(0.0), |acc, load| acc + load.max_shear(span));

        // Symmetric patterns only, so each support takes half the total
        let total_kn: f64 = loads.iter().map(|load| load.total_kn(span.value())).sum();

        LoadEffects {
            moment_knm: moment.value(),
            shear_kn: shear.value(),
            reaction_kn: total_kn / 2.0,
        }
    }
}

impl LoadPattern {
    /// Maximum bending moment: PL/4 or wL²/8
    pub fn max_moment(&self, span: Meters) -> KnM {
        let l: Millimeters = span.into();
        let m = match *self {
            LoadPattern::CentralPoint { p_kn } => {
                let p: Newtons = KiloNewtons(p_kn).into();
                NMm(p.value() * l.value() / 4.0)
            }
            LoadPattern::Uniform { w_kn_per_m } => {
                let w: NPerMm = KnPerM(w_kn_per_m).into();
                NMm(w.value() * l.value().powi(2) / 8.0)
            }
        };
        m.into()
    }

    /// Maximum shear: P/2 or wL/2
    pub fn max_shear(&self, span: Meters) -> KiloNewtons {
        match *self {
            LoadPattern::CentralPoint { p_kn } => KiloNewtons(p_kn / 2.0),
            LoadPattern::Uniform { w_kn_per_m } => KiloNewtons(w_kn_per_m * span.value() / 2.0),
        }
    }

    /// Maximum (midspan) deflection: PL³/(48EI) or 5wL⁴/(384EI)
    pub fn max_deflection(&self, span: Meters, e: MegaPascals, i: Cm4) -> Millimeters {
        let l: Millimeters = span.into();
        let i: Mm4 = i.into();
        let ei = e.value() * i.value();
        match *self {
            LoadPattern::CentralPoint { p_kn } => {
                let p: Newtons = KiloNewtons(p_kn).into();
                Millimeters(p.value() * l.value().powi(3) / (48.0 * ei))
            }
            LoadPattern::Uniform { w_kn_per_m } => {
                let w: NPerMm = KnPerM(w_kn_per_m).into();
                Millimeters(5.0 * w.value() * l.value().powi(4) / (384.0 * ei))
            }
        }
    }
}

/// Midspan deflection of a set of loads (superposition)
pub fn midspan_deflection(span: Meters, loads: &[LoadPattern], e: MegaPascals, i: Cm4) -> Millimeters {
    loads
        .iter()
        .fold(Millimeters(0.0), |acc, load| acc + load.max_deflection(span, e, i))
}

/// Elastic bending resistance M_Rd = W·fy/γ_M0
pub fn moment_capacity(w: Cm3, material: &SteelMaterial) -> KnM {
    let w: Mm3 = w.into();
    NMm(w.value() * material.design_strength_mpa()).into()
}

/// Allowable deflection L/n
pub fn deflection_limit(span: Meters, divisor: f64) -> Millimeters {
    let l: Millimeters = span.into();
    l / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel() -> SteelMaterial {
        SteelMaterial::custom("S355", 355.0, 1.0, 200_000.0)
    }

    #[test]
    fn test_point_load_moment() {
        // M = PL/4 = 50 × 6 / 4 = 75 kN·m
        let m = LoadPattern::central_point(50.0).max_moment(Meters(6.0));
        assert!((m.value() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_load_moment() {
        // M = wL²/8 = 15 × 36 / 8 = 67.5 kN·m
        let m = LoadPattern::uniform(15.0).max_moment(Meters(6.0));
        assert!((m.value() - 67.5).abs() < 1e-9);
    }

    #[test]
    fn test_point_load_deflection() {
        // δ = PL³/(48EI) = 50e3 × 6000³ / (48 × 200e3 × 8356e4) = 13.46 mm
        let d = LoadPattern::central_point(50.0).max_deflection(Meters(6.0), MegaPascals(200_000.0), Cm4(8356.0));
        let expected = 50.0e3 * 6000.0_f64.powi(3) / (48.0 * 200_000.0 * 8356.0e4);
        assert!((d.value() - expected).abs() < 1e-9);
        assert!((d.value() - 13.46).abs() < 0.01);
    }

    #[test]
    fn test_uniform_load_deflection() {
        // δ = 5wL⁴/(384EI), w = 15 N/mm
        let d = LoadPattern::uniform(15.0).max_deflection(Meters(6.0), MegaPascals(210_000.0), Cm4(8356.0));
        let expected = 5.0 * 15.0 * 6000.0_f64.powi(4) / (384.0 * 210_000.0 * 8356.0e4);
        assert!((d.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_superposition() {
        let span = Meters(6.0);
        let loads = [LoadPattern::uniform(15.0), LoadPattern::central_point(30.0)];
        let effects = LoadEffects::from_loads(span, &loads);
        // 67.5 + 45 = 112.5 kN·m
        assert!((effects.moment_knm - 112.5).abs() < 1e-9);
        // 45 + 15 = 60 kN
        assert!((effects.shear_kn - 60.0).abs() < 1e-9);
        assert!((effects.reaction_kn - 60.0).abs() < 1e-9);

        let e = MegaPascals(210_000.0);
        let i = Cm4(5790.0);
        let total = midspan_deflection(span, &loads, e, i);
        let parts = loads[0].max_deflection(span, e, i) + loads[1].max_deflection(span, e, i);
        assert!((total.value() - parts.value()).abs() < 1e-12);
    }

    #[test]
    fn test_moment_capacity() {
        // IPE 200: W = 194 cm³, fy = 355 MPa → 68.87 kN·m
        let m = moment_capacity(Cm3(194.0), &steel());
        assert!((m.value() - 68.87).abs() < 0.001);

        let reduced = moment_capacity(Cm3(194.0), &SteelMaterial::custom("S355", 355.0, 1.1, 200_000.0));
        assert!(reduced.value() < m.value());
    }

    #[test]
    fn test_deflection_limit() {
        let d = deflection_limit(Meters(6.0), 360.0);
        assert!((d.value() - 16.6667).abs() < 1e-3);
    }

    #[test]
    fn test_service_loads_default_to_design_loads() {
        let scenario = Scenario::new("B", 6.0, steel(), 360.0).with_load(LoadPattern::uniform(10.0));
        assert_eq!(scenario.deflection_loads(), &[LoadPattern::uniform(10.0)]);

        let scenario = scenario.with_service_load(LoadPattern::uniform(7.0));
        assert_eq!(scenario.deflection_loads(), &[LoadPattern::uniform(7.0)]);
    }

    #[test]
    fn test_validation() {
        let ok = Scenario::new("B", 6.0, steel(), 360.0).with_load(LoadPattern::central_point(0.0));
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.span_m = 0.0;
        assert!(bad.validate().is_err());

        let bad = ok.clone().with_load(LoadPattern::uniform(-5.0));
        assert!(bad.validate().is_err());

        let mut bad = ok.clone();
        bad.deflection_limit_divisor = -360.0;
        assert!(bad.validate().is_err());

        let bad = Scenario::new("B", 6.0, steel(), 360.0);
        assert!(bad.validate().is_err());

        let bad = ok.with_service_load(LoadPattern::central_point(f64::NAN));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_from_settings() {
        let scenario = Scenario::from_settings("B", 5.0, &DesignSettings::default());
        assert_eq!(scenario.material.fy_mpa, 355.0);
        assert_eq!(scenario.material.e_mpa, 210_000.0);
        assert_eq!(scenario.deflection_limit_divisor, 250.0);
    }

    #[test]
    fn test_scenario_json() {
        let json = r#"{
            "span_m": 6.0,
            "loads": [{ "pattern": "central_point", "p_kn": 50.0 }],
            "deflection_limit_divisor": 360.0
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.support, SupportCondition::SimplySupported);
        assert_eq!(scenario.material, SteelMaterial::default());
        assert!(scenario.service_loads.is_none());
        assert!(scenario.validate().is_ok());
    }
}
