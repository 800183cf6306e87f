//! Candidate sections and the catalog they live in
//!
//! A [`Section`] carries the geometric properties the checks need plus the
//! data for embodied carbon: area, density and a carbon factor. Mass per
//! metre is always derived as area × density.
//!
//! ## CSV Format
//!
//! Catalogs load from a header-driven CSV (column order does not matter):
//!
//! | Column | Required | Unit |
//! |---|---|---|
//! | `profile` | yes | |
//! | `I_cm4` or `I_mm4` | yes | cm⁴ / mm⁴ |
//! | `W_cm3` or `W_mm3` | yes | cm³ / mm³ |
//! | `A_cm2` or `mass_kg_per_m` | one of | cm² / kg/m |
//! | `rho_kg_per_m3` | no | kg/m³ |
//! | `co2_kg_per_kg` | no | kg CO₂-eq / kg |
//!
//! Missing optional values fall back to [`DesignSettings`]. When only
//! `mass_kg_per_m` is given the area is derived as mass / density.
//!
//! ```text
//! profile,mass_kg_per_m,I_cm4,W_cm3
//! IPE 200,22.4,1943,194
//! IPE 220,26.2,2772,252
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::units::{Cm2, Meters, SqM};

/// A candidate beam section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Profile identifier (e.g. "IPE 300")
    pub id: String,

    /// Second moment of area about the strong axis (cm⁴)
    pub second_moment_cm4: f64,

    /// Elastic section modulus about the strong axis (cm³)
    pub section_modulus_cm3: f64,

    /// Cross-sectional area (cm²)
    pub area_cm2: f64,

    /// Material density (kg/m³)
    pub density_kg_per_m3: f64,

    /// Embodied carbon factor (kg CO₂-eq per kg of material)
    pub carbon_factor: f64,
}

impl Section {
    /// Section from area and density
    pub fn new(
        id: impl Into<String>,
        second_moment_cm4: f64,
        section_modulus_cm3: f64,
        area_cm2: f64,
        density_kg_per_m3: f64,
        carbon_factor: f64,
    ) -> Self {
        Section {
            id: id.into(),
            second_moment_cm4,
            section_modulus_cm3,
            area_cm2,
            density_kg_per_m3,
            carbon_factor,
        }
    }

    /// Section from a tabulated mass per metre; area is derived as mass / density.
    ///
    /// ```rust
    /// use carbeam_core::materials::Section;
    ///
    /// let ipe300 = Section::from_mass_per_metre("IPE 300", 42.2, 8356.0, 557.0, 7850.0, 1.9);
    /// assert!((ipe300.area_cm2 - 53.76).abs() < 0.01);
    /// assert!((ipe300.mass_per_m_kg() - 42.2).abs() < 1e-9);
    /// ```
    pub fn from_mass_per_metre(
        id: impl Into<String>,
        mass_kg_per_m: f64,
        second_moment_cm4: f64,
        section_modulus_cm3: f64,
        density_kg_per_m3: f64,
        carbon_factor: f64,
    ) -> Self {
        let area: Cm2 = SqM(mass_kg_per_m / density_kg_per_m3).into();
        Section::new(
            id,
            second_moment_cm4,
            section_modulus_cm3,
            area.value(),
            density_kg_per_m3,
            carbon_factor,
        )
    }

    /// Mass per unit length (kg/m) = area × density
    pub fn mass_per_m_kg(&self) -> f64 {
        let area: SqM = Cm2(self.area_cm2).into();
        area.value() * self.density_kg_per_m3
    }

    /// Total mass of a member of the given length (kg)
    pub fn mass_kg(&self, length: Meters) -> f64 {
        self.mass_per_m_kg() * length.value()
    }

    /// Embodied CO₂ of a member of the given length (kg CO₂-eq)
    pub fn embodied_co2_kg(&self, length: Meters) -> f64 {
        self.mass_kg(length) * self.carbon_factor
    }

    /// Every property must be finite and strictly positive.
    pub fn validate(&self, index: usize) -> CalcResult<()> {
        if self.id.trim().is_empty() {
            return Err(CalcError::validation(
                format!("catalog[{}].id", index),
                "\"\"",
                "Section identifier must not be empty",
            ));
        }
        let field = |name: &str| format!("catalog[{}].{} ({})", index, name, self.id);
        require_positive(&field("second_moment_cm4"), self.second_moment_cm4)?;
        require_positive(&field("section_modulus_cm3"), self.section_modulus_cm3)?;
        require_positive(&field("area_cm2"), self.area_cm2)?;
        require_positive(&field("density_kg_per_m3"), self.density_kg_per_m3)?;
        require_positive(&field("carbon_factor"), self.carbon_factor)?;
        Ok(())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (I={:.0} cm⁴, W={:.1} cm³, {:.1} kg/m)",
            self.id,
            self.second_moment_cm4,
            self.section_modulus_cm3,
            self.mass_per_m_kg()
        )
    }
}

/// Ordered collection of candidate sections.
///
/// Order matters: it breaks CO₂ ties during selection (first occurrence wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// Wrap a list of sections (not validated until [`Catalog::validate`])
    pub fn new(sections: Vec<Section>) -> Self {
        Catalog { sections }
    }

    /// Append a section
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// All sections in catalog order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate sections in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the catalog holds no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by identifier (case-insensitive)
    pub fn get(&self, id: &str) -> CalcResult<&Section> {
        let key = id_key(id);
        self.sections
            .iter()
            .find(|s| id_key(&s.id) == key)
            .ok_or_else(|| CalcError::section_not_found(id))
    }

    /// Identifiers in catalog order
    pub fn ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// Check the catalog is usable for a selection run.
    ///
    /// - empty catalog → `Configuration`
    /// - duplicate identifier (case-insensitive) → `Configuration`
    /// - non-positive or non-finite property → `Validation`
    pub fn validate(&self) -> CalcResult<()> {
        if self.sections.is_empty() {
            return Err(CalcError::configuration("no candidates supplied"));
        }

        let mut seen = HashSet::new();
        for (i, section) in self.sections.iter().enumerate() {
            section.validate(i)?;
            if !seen.insert(id_key(&section.id)) {
                return Err(CalcError::configuration(format!(
                    "duplicate section identifier '{}' at catalog index {}",
                    section.id, i
                )));
            }
        }
        Ok(())
    }

    /// Load a catalog from a CSV file.
    pub fn load_from_csv(path: &Path, settings: &DesignSettings) -> CalcResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("open", path.display().to_string(), format!("Failed to open CSV: {}", e))
        })?;
        Self::from_csv_str(&text, &path.display().to_string(), settings)
    }

    /// Parse a catalog from CSV text. `source` names the input in errors.
    pub fn from_csv_str(text: &str, source: &str, settings: &DesignSettings) -> CalcResult<Self> {
        let mut lines = text.lines().enumerate();

        let header_line = lines
            .next()
            .map(|(_, line)| line)
            .ok_or_else(|| CalcError::file_error("read", source, "CSV file is empty"))?;

        // Spreadsheet exports often start with a UTF-8 byte order mark
        let header_line = header_line.strip_prefix('\u{feff}').unwrap_or(header_line);
        let headers = split_record(header_line)
            .ok_or_else(|| CalcError::file_error("parse", source, "Line 1: unterminated quoted field"))?;
        let col_index = |name: &str| -> Option<usize> {
            headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let profile_idx = col_index("profile")
            .ok_or_else(|| CalcError::file_error("parse", source, "Missing 'profile' column"))?;
        let i_idx = col_index("I_cm4")
            .map(|i| (i, 1.0))
            .or_else(|| col_index("I_mm4").map(|i| (i, 1.0e-4)))
            .ok_or_else(|| CalcError::file_error("parse", source, "Missing 'I_cm4' or 'I_mm4' column"))?;
        let w_idx = col_index("W_cm3")
            .map(|i| (i, 1.0))
            .or_else(|| col_index("W_mm3").map(|i| (i, 1.0e-3)))
            .ok_or_else(|| CalcError::file_error("parse", source, "Missing 'W_cm3' or 'W_mm3' column"))?;
        let area_idx = col_index("A_cm2");
        let mass_idx = col_index("mass_kg_per_m");
        if area_idx.is_none() && mass_idx.is_none() {
            return Err(CalcError::file_error(
                "parse",
                source,
                "Missing 'A_cm2' or 'mass_kg_per_m' column",
            ));
        }
        let rho_idx = col_index("rho_kg_per_m3");
        let co2_idx = col_index("co2_kg_per_kg");

        let mut catalog = Catalog::default();

        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            let line_num = line_no + 1;
            let fields = split_record(line).ok_or_else(|| {
                CalcError::file_error("parse", source, format!("Line {}: unterminated quoted field", line_num))
            })?;

            let id = fields.get(profile_idx).map(|s| s.trim()).unwrap_or("");
            if id.is_empty() {
                continue; // Skip rows without a profile name
            }

            let number = |idx: Option<usize>, name: &str| -> CalcResult<Option<f64>> {
                let Some(raw) = idx.and_then(|i| fields.get(i)) else {
                    return Ok(None);
                };
                parse_optional_f64(raw).map_err(|_| {
                    CalcError::file_error(
                        "parse",
                        source,
                        format!("Line {}: invalid {} value '{}' for '{}'", line_num, name, raw.trim(), id),
                    )
                })
            };
            let required = |idx: Option<usize>, name: &str| -> CalcResult<f64> {
                number(idx, name)?.ok_or_else(|| {
                    CalcError::file_error(
                        "parse",
                        source,
                        format!("Line {}: missing {} value for '{}'", line_num, name, id),
                    )
                })
            };

            let i_cm4 = required(Some(i_idx.0), "second moment of area")? * i_idx.1;
            let w_cm3 = required(Some(w_idx.0), "section modulus")? * w_idx.1;
            let density = number(rho_idx, "density")?.unwrap_or(settings.density_kg_per_m3);
            let carbon = number(co2_idx, "carbon factor")?.unwrap_or(settings.carbon_factor);

            let section = match number(area_idx, "area")? {
                Some(area_cm2) => Section::new(id, i_cm4, w_cm3, area_cm2, density, carbon),
                None => {
                    let mass = required(mass_idx, "mass per metre")?;
                    Section::from_mass_per_metre(id, mass, i_cm4, w_cm3, density, carbon)
                }
            };

            catalog.push(section);
        }

        Ok(catalog)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl FromIterator<Section> for Catalog {
    fn from_iter<T: IntoIterator<Item = Section>>(iter: T) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

/// Key used for case-insensitive identifier comparison
fn id_key(id: &str) -> String {
    id.trim().to_uppercase()
}

/// Split one CSV record into fields.
///
/// A field starting with `"` runs to the closing quote and may contain commas;
/// `""` inside it is a literal quote. Returns `None` for an unterminated quote.
/// Quoted line breaks are not supported.
fn split_record(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

/// Parse an optional f64 from a CSV field
///
/// Empty strings and dashes are `Ok(None)`; anything else must be a number.
fn parse_optional_f64(s: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return Ok(None);
    }
    f64::from_str(trimmed).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str) -> Section {
        Section::new(id, 1000.0, 100.0, 20.0, 7850.0, 1.9)
    }

    #[test]
    fn test_mass_and_co2() {
        let s = Section::new("T", 1000.0, 100.0, 50.0, 8000.0, 2.0);
        // 50 cm² = 0.005 m², × 8000 = 40 kg/m
        assert!((s.mass_per_m_kg() - 40.0).abs() < 1e-9);
        assert!((s.mass_kg(Meters(5.0)) - 200.0).abs() < 1e-9);
        assert!((s.embodied_co2_kg(Meters(5.0)) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_section_validation() {
        assert!(section("A").validate(0).is_ok());

        let mut bad = section("A");
        bad.second_moment_cm4 = 0.0;
        assert_eq!(bad.validate(0).unwrap_err().error_code(), "VALIDATION_ERROR");

        let mut bad = section("A");
        bad.carbon_factor = -1.0;
        assert!(bad.validate(0).is_err());

        let mut bad = section("A");
        bad.area_cm2 = f64::NAN;
        assert!(bad.validate(0).is_err());

        assert!(section("  ").validate(0).is_err());
    }

    #[test]
    fn test_empty_catalog_is_configuration_error() {
        let err = Catalog::default().validate().unwrap_err();
        assert_eq!(err, CalcError::configuration("no candidates supplied"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalog = Catalog::new(vec![section("IPE 200"), section("ipe 200")]);
        let err = catalog.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_lookup() {
        let catalog: Catalog = vec![section("IPE 200"), section("IPE 220")].into_iter().collect();
        assert_eq!(catalog.get("ipe 220").unwrap().id, "IPE 220");
        assert_eq!(catalog.get("IPE 999").unwrap_err().error_code(), "SECTION_NOT_FOUND");
        assert_eq!(catalog.ids(), vec!["IPE 200", "IPE 220"]);
    }

    #[test]
    fn test_csv_with_mass_column() {
        let csv = "profile,mass_kg_per_m,I_cm4,W_cm3\nIPE 200,22.4,1943,194\n\nIPE 220,26.2,2772,252\n";
        let catalog = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap();
        assert_eq!(catalog.len(), 2);

        let ipe200 = catalog.get("IPE 200").unwrap();
        assert!((ipe200.mass_per_m_kg() - 22.4).abs() < 1e-9);
        assert_eq!(ipe200.carbon_factor, 1.9);
        assert_eq!(ipe200.density_kg_per_m3, 7850.0);
    }

    #[test]
    fn test_csv_with_area_and_overrides() {
        let csv = "profile,A_cm2,rho_kg_per_m3,co2_kg_per_kg,W_cm3,I_cm4\nHEA 200,53.8,7850,0.9,389,3692\n";
        let catalog = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap();
        let hea = catalog.get("HEA 200").unwrap();
        assert_eq!(hea.area_cm2, 53.8);
        assert_eq!(hea.carbon_factor, 0.9);
        assert_eq!(hea.section_modulus_cm3, 389.0);
    }

    #[test]
    fn test_csv_with_mm_units() {
        let csv = "profile,mass_kg_per_m,I_mm4,W_mm3\nIPE 300,42.2,83560000,557000\n";
        let catalog = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap();
        let ipe = catalog.get("IPE 300").unwrap();
        assert!((ipe.second_moment_cm4 - 8356.0).abs() < 1e-6);
        assert!((ipe.section_modulus_cm3 - 557.0).abs() < 1e-9);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let csv = "\"profile\",\"mass_kg_per_m\",I_cm4,W_cm3\n\"IPE 200\",22.4,1943,194\n\"Plate girder, \"\"PG1\"\"\",30.0,3000,300\n";
        let catalog = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap();
        assert_eq!(catalog.ids(), vec!["IPE 200", "Plate girder, \"PG1\""]);
        assert!(catalog.get("ipe 200").is_ok());
        assert_eq!(catalog.sections()[1].section_modulus_cm3, 300.0);
    }

    #[test]
    fn test_csv_bom_header() {
        let csv = "\u{feff}profile,mass_kg_per_m,I_cm4,W_cm3\r\nIPE 200,22.4,1943,194\r\n";
        let catalog = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap();
        assert_eq!(catalog.ids(), vec!["IPE 200"]);
    }

    #[test]
    fn test_csv_unterminated_quote() {
        let csv = "profile,mass_kg_per_m,I_cm4,W_cm3\n\"IPE 200,22.4,1943,194\n";
        let err = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap_err();
        match err {
            CalcError::FileError { reason, .. } => assert!(reason.contains("Line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split_record("a,b,,c").unwrap(), vec!["a", "b", "", "c"]);
        assert_eq!(split_record(" \"x, y\" ,z").unwrap(), vec!["x, y ", "z"]);
        assert_eq!(split_record("\"say \"\"hi\"\"\"").unwrap(), vec!["say \"hi\""]);
        assert_eq!(split_record("12\",3").unwrap(), vec!["12\"", "3"]);
        assert!(split_record("\"open").is_none());
    }

    #[test]
    fn test_non_ascii_ids_compare_consistently() {
        let catalog = Catalog::new(vec![section("Träger A")]);
        assert_eq!(catalog.get("TRÄGER a").unwrap().id, "Träger A");

        let catalog = Catalog::new(vec![section("Träger A"), section("TRÄGER A")]);
        assert_eq!(catalog.validate().unwrap_err().error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "profile,mass_kg_per_m,W_cm3\nIPE 200,22.4,194\n";
        let err = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_csv_bad_number() {
        let csv = "profile,mass_kg_per_m,I_cm4,W_cm3\nIPE 200,heavy,1943,194\n";
        let err = Catalog::from_csv_str(csv, "test.csv", &DesignSettings::default()).unwrap_err();
        match err {
            CalcError::FileError { reason, .. } => assert!(reason.contains("Line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_csv_empty_input() {
        assert!(Catalog::from_csv_str("", "test.csv", &DesignSettings::default()).is_err());
    }

    #[test]
    fn test_load_from_csv_file() {
        let path = std::env::temp_dir().join(format!("carbeam_catalog_{}.csv", std::process::id()));
        fs::write(&path, "profile,mass_kg_per_m,I_cm4,W_cm3\nIPE 240,30.7,3892,324\n").unwrap();
        let catalog = Catalog::load_from_csv(&path, &DesignSettings::default()).unwrap();
        assert_eq!(catalog.ids(), vec!["IPE 240"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("123.45"), Ok(Some(123.45)));
        assert_eq!(parse_optional_f64("  456  "), Ok(Some(456.0)));
        assert_eq!(parse_optional_f64(""), Ok(None));
        assert_eq!(parse_optional_f64("-"), Ok(None));
        assert!(parse_optional_f64("not a number").is_err());
    }
}
