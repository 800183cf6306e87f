//! # carbeam_core - Low-Carbon Steel Beam Selection Engine
//!
//! `carbeam_core` picks the steel section with the lowest embodied CO₂ that
//! still passes the bending and deflection checks for a simply-supported
//! beam. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `evaluate` is a pure function of its inputs
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: Same inputs, same section, ties to the first catalog entry
//!
//! ## Quick Start
//!
//! ```rust
//! use carbeam_core::{evaluate, DesignSettings, Scenario};
//! use carbeam_core::loads::LoadPattern;
//! use carbeam_core::materials::DEFAULT_IPE_CATALOG;
//!
//! let scenario = Scenario::from_settings("B-1", 6.0, &DesignSettings::default())
//!     .with_load(LoadPattern::uniform(15.0));
//!
//! let result = evaluate(&scenario, &DEFAULT_IPE_CATALOG).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"status\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Beam formulas, section checks and selection
//! - [`loads`] - Load patterns and load combinations
//! - [`materials`] - Steel grades, sections and catalogs
//! - [`settings`] - Design defaults (γ_M0, E, density, carbon factor)
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CheckResult, Scenario, SelectionResult};
pub use errors::{CalcError, CalcResult};
pub use materials::{Catalog, Section, SteelGrade, SteelMaterial};
pub use settings::DesignSettings;
