//! # CarBeam CLI
//!
//! Picks the lowest-embodied-carbon steel section for a simply-supported
//! beam from the command line.
//!
//! ```text
//! carbeam --span 6 --udl 15 --point-load 30 --grade S355 --deflection-divisor 250
//! carbeam --span 8 --udl 22 --service-udl 15 --catalog sections.csv --json
//! ```
//!
//! Exit status is 0 whether or not a section passes, 2 for invalid inputs
//! (validation or configuration errors) and 1 for anything else. Errors are
//! printed to stderr with their structured JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use carbeam_core::calculations::{evaluate, rank_feasible, Scenario, SelectionResult};
use carbeam_core::loads::LoadPattern;
use carbeam_core::materials::{ipe_catalog, Catalog, SteelGrade, SteelMaterial};
use carbeam_core::{CalcError, DesignSettings};

#[derive(Parser, Debug)]
#[command(name = "carbeam")]
#[command(about = "Lowest-carbon steel section for a simply-supported beam")]
struct Cli {
    /// Beam span (m)
    #[arg(long)]
    span: f64,

    /// Design point load at midspan (kN), repeatable
    #[arg(long = "point-load")]
    point_loads: Vec<f64>,

    /// Design uniform load over the full span (kN/m), repeatable
    #[arg(long = "udl")]
    udls: Vec<f64>,

    /// Service point load at midspan for the deflection check (kN), repeatable
    #[arg(long = "service-point-load")]
    service_point_loads: Vec<f64>,

    /// Service uniform load for the deflection check (kN/m), repeatable
    #[arg(long = "service-udl")]
    service_udls: Vec<f64>,

    /// Steel grade (S235, S275, S355); settings default when omitted
    #[arg(long)]
    grade: Option<SteelGrade>,

    /// Deflection limit divisor n in L/n; settings default when omitted
    #[arg(long)]
    deflection_divisor: Option<f64>,

    /// Section catalog CSV; built-in IPE range when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Design settings JSON
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Beam label shown in the report
    #[arg(long, default_value = "Beam")]
    label: String,

    /// Print the result as JSON instead of a report
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn load_settings(&self) -> Result<DesignSettings> {
        let settings = match &self.settings {
            Some(path) => DesignSettings::load_from_file(path)?,
            None => DesignSettings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn load_catalog(&self, settings: &DesignSettings) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load_from_csv(path, settings)
                .with_context(|| format!("loading catalog {}", path.display())),
            None => Ok(ipe_catalog(settings)),
        }
    }

    fn scenario(&self, settings: &DesignSettings) -> Scenario {
        let grade = self.grade.unwrap_or(settings.default_grade);
        let mut scenario = Scenario::new(
            self.label.clone(),
            self.span,
            SteelMaterial::from_grade(grade, settings),
            self.deflection_divisor.unwrap_or(settings.deflection_limit_divisor),
        );

        scenario.loads = self
            .point_loads
            .iter()
            .map(|&p| LoadPattern::central_point(p))
            .chain(self.udls.iter().map(|&w| LoadPattern::uniform(w)))
            .collect();

        let service: Vec<LoadPattern> = self
            .service_point_loads
            .iter()
            .map(|&p| LoadPattern::central_point(p))
            .chain(self.service_udls.iter().map(|&w| LoadPattern::uniform(w)))
            .collect();
        if !service.is_empty() {
            scenario.service_loads = Some(service);
        }

        scenario
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 for errors the caller can fix by changing inputs, 1 otherwise
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CalcError>() {
        Some(calc) if calc.is_input_error() => 2,
        _ => 1,
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.load_settings()?;
    let catalog = cli.load_catalog(&settings)?;
    let scenario = cli.scenario(&settings);

    let result = evaluate(&scenario, &catalog)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&scenario, &catalog, &result);
    }
    Ok(())
}

fn print_report(scenario: &Scenario, catalog: &Catalog, result: &SelectionResult) {
    println!("═══════════════════════════════════════");
    println!("  CARBEAM SECTION SELECTION");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Label:      {}", scenario.label);
    println!("  Span:       {:.2} m", scenario.span_m);
    for load in &scenario.loads {
        println!("  Load:       {}", load);
    }
    if let Some(service) = &scenario.service_loads {
        for load in service {
            println!("  Service:    {}", load);
        }
    }
    println!(
        "  Material:   {} (fy = {:.0} MPa, γ_M0 = {:.2}, E = {:.0} MPa)",
        scenario.material.grade, scenario.material.fy_mpa, scenario.material.gamma_m0, scenario.material.e_mpa
    );
    println!(
        "  Limit:      L/{:.0} = {:.2} mm",
        scenario.deflection_limit_divisor,
        scenario.deflection_limit().value()
    );
    println!("  Candidates: {}", catalog.len());
    println!();

    let ranked = rank_feasible(result);
    if !ranked.is_empty() {
        println!("Passing sections (lowest CO₂ first):");
        println!(
            "  {:<14} {:>10} {:>10} {:>8} {:>8} {:>12}",
            "Section", "M_Rd kNm", "δ mm", "UR_M", "UR_δ", "CO₂ kg"
        );
        println!("  {}", "-".repeat(66));
        for check in &ranked {
            println!(
                "  {:<14} {:>10.1} {:>10.2} {:>8.2} {:>8.2} {:>12.1}",
                check.section_id,
                check.moment_capacity_knm,
                check.deflection_demand_mm,
                check.bending_unity,
                check.deflection_unity,
                check.co2_kg.unwrap_or_default()
            );
        }
        println!();
    }

    match result {
        SelectionResult::Selected { section, check, co2_kg, .. } => {
            println!("═══════════════════════════════════════");
            println!("  SELECTED: {} (governs: {})", section.id, check.governing_check());
            println!("═══════════════════════════════════════");
            println!(
                "  M_Ed = {:.1} kN·m ≤ M_Rd = {:.1} kN·m {}",
                check.moment_demand_knm,
                check.moment_capacity_knm,
                status_icon(check.bending_ok)
            );
            println!(
                "  δ    = {:.2} mm ≤ δ_lim = {:.2} mm {}",
                check.deflection_demand_mm,
                check.deflection_limit_mm,
                status_icon(check.deflection_ok)
            );
            println!("  Mass = {:.1} kg", check.mass_kg);
            println!("  CO₂  = {:.1} kg CO₂-eq", co2_kg);
        }
        SelectionResult::Infeasible { failures, .. } => {
            println!("═══════════════════════════════════════");
            println!("  NO SECTION PASSES ({} candidates)", failures.len());
            println!("═══════════════════════════════════════");
            for failure in failures {
                let reasons: Vec<String> = failure
                    .failed
                    .iter()
                    .map(|f| format!("{} over by {:.2}", f.check, f.margin))
                    .collect();
                println!("  {:<14} {}", failure.section_id, reasons.join(", "));
            }
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
