//! # Beam Checks and Section Selection
//!
//! Each calculation follows the same shape:
//!
//! - Input types (JSON-serializable): [`Scenario`], [`Catalog`](crate::materials::Catalog)
//! - Result types (JSON-serializable): [`CheckResult`], [`SelectionResult`]
//! - A pure function returning `Result<_, CalcError>`: [`evaluate`]
//!
//! ## Available Calculations
//!
//! - [`beam`] - Simply-supported beam formulas and the design scenario
//! - [`selection`] - Bending/deflection checks and lowest-CO₂ selection

pub mod beam;
pub mod selection;

pub use beam::{
    deflection_limit, midspan_deflection, moment_capacity, LoadEffects, Scenario, SupportCondition,
};
pub use selection::{
    check_section, evaluate, rank_feasible, CandidateFailure, CheckFailure, CheckKind, CheckResult,
    SelectionResult,
};
