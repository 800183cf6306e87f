//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the beam checks. These are
//! plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Unit Conventions
//!
//! Inputs and reported results use the magnitudes engineers read off section
//! tables and load schedules:
//! - Length: metres (m) for spans, millimetres (mm) for deflections
//! - Force: kilonewtons (kN)
//! - Distributed load: kN/m (numerically equal to N/mm)
//! - Stress / modulus: MPa (N/mm²)
//! - Moment: kN·m
//! - Section properties: cm⁴, cm³, cm² (as tabulated for IPE profiles)
//!
//! The closed-form formulas run in N and mm; conversions live here.
//!
//! ## Example
//!
//! ```rust
//! use carbeam_core::units::{Meters, Millimeters, KiloNewtons, Newtons};
//!
//! let span = Meters(6.0);
//! let span_mm: Millimeters = span.into();
//! assert_eq!(span_mm.0, 6000.0);
//!
//! let p: Newtons = KiloNewtons(50.0).into();
//! assert_eq!(p.0, 50_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Distributed load in kN/m
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM(pub f64);

/// Distributed load in N/mm
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NPerMm(pub f64);

impl From<KnPerM> for NPerMm {
    fn from(w: KnPerM) -> Self {
        // 1 kN/m = 1000 N / 1000 mm
        NPerMm(w.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kN·m
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnM(pub f64);

/// Moment in N·mm
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NMm(pub f64);

impl From<KnM> for NMm {
    fn from(m: KnM) -> Self {
        NMm(m.0 * 1.0e6)
    }
}

impl From<NMm> for KnM {
    fn from(m: NMm) -> Self {
        KnM(m.0 / 1.0e6)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress or modulus in MPa (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

// ============================================================================
// Section Properties
// ============================================================================

/// Second moment of area in cm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm4(pub f64);

/// Second moment of area in mm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm4(pub f64);

impl From<Cm4> for Mm4 {
    fn from(i: Cm4) -> Self {
        Mm4(i.0 * 1.0e4)
    }
}

/// Section modulus in cm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm3(pub f64);

/// Section modulus in mm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm3(pub f64);

impl From<Cm3> for Mm3 {
    fn from(w: Cm3) -> Self {
        Mm3(w.0 * 1.0e3)
    }
}

/// Area in cm²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm2(pub f64);

/// Area in m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<Cm2> for SqM {
    fn from(a: Cm2) -> Self {
        SqM(a.0 * 1.0e-4)
    }
}

impl From<SqM> for Cm2 {
    fn from(a: SqM) -> Self {
        Cm2(a.0 * 1.0e4)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(KnPerM);
impl_arithmetic!(NPerMm);
impl_arithmetic!(KnM);
impl_arithmetic!(NMm);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(Cm4);
impl_arithmetic!(Mm4);
impl_arithmetic!(Cm3);
impl_arithmetic!(Mm3);
impl_arithmetic!(Cm2);
impl_arithmetic!(SqM);
