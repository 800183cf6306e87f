//! Built-in European IPE profiles
//!
//! Strong-axis properties for the IPE 80 - IPE 600 range (EN 10365), so a
//! selection can run without a CSV catalog. Mass per metre is the tabulated
//! value; area is derived from it using the configured density.

use once_cell::sync::Lazy;

use super::sections::{Catalog, Section};
use crate::settings::DesignSettings;

/// IPE catalog built with [`DesignSettings::default`]
pub static DEFAULT_IPE_CATALOG: Lazy<Catalog> = Lazy::new(|| ipe_catalog(&DesignSettings::default()));

/// (profile, mass kg/m, Iy cm⁴, Wel,y cm³)
const IPE_PROFILES: [(&str, f64, f64, f64); 18] = [
    ("IPE 80", 6.0, 80.1, 20.0),
    ("IPE 100", 8.1, 171.0, 34.2),
    ("IPE 120", 10.4, 318.0, 53.0),
    ("IPE 140", 12.9, 541.0, 77.3),
    ("IPE 160", 15.8, 869.0, 109.0),
    ("IPE 180", 18.8, 1317.0, 146.0),
    ("IPE 200", 22.4, 1943.0, 194.0),
    ("IPE 220", 26.2, 2772.0, 252.0),
    ("IPE 240", 30.7, 3892.0, 324.0),
    ("IPE 270", 36.1, 5790.0, 429.0),
    ("IPE 300", 42.2, 8356.0, 557.0),
    ("IPE 330", 49.1, 11770.0, 713.0),
    ("IPE 360", 57.1, 16270.0, 904.0),
    ("IPE 400", 66.3, 23130.0, 1160.0),
    ("IPE 450", 77.6, 33740.0, 1500.0),
    ("IPE 500", 90.7, 48200.0, 1930.0),
    ("IPE 550", 106.0, 67120.0, 2440.0),
    ("IPE 600", 122.0, 92080.0, 3070.0),
];

/// IPE catalog in ascending size order, using the density and carbon factor from `settings`.
///
/// ```rust
/// use carbeam_core::materials::ipe_catalog;
/// use carbeam_core::settings::DesignSettings;
///
/// let catalog = ipe_catalog(&DesignSettings::default());
/// assert_eq!(catalog.len(), 18);
/// assert_eq!(catalog.sections()[0].id, "IPE 80");
/// ```
pub fn ipe_catalog(settings: &DesignSettings) -> Catalog {
    IPE_PROFILES
        .iter()
        .map(|&(id, mass, i_cm4, w_cm3)| {
            Section::from_mass_per_metre(
                id,
                mass,
                i_cm4,
                w_cm3,
                settings.density_kg_per_m3,
                settings.carbon_factor,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = ipe_catalog(&DesignSettings::default());
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), IPE_PROFILES.len());
    }

    #[test]
    fn test_properties_increase_with_size() {
        let catalog = &*DEFAULT_IPE_CATALOG;
        for pair in catalog.sections().windows(2) {
            assert!(pair[1].second_moment_cm4 > pair[0].second_moment_cm4);
            assert!(pair[1].section_modulus_cm3 > pair[0].section_modulus_cm3);
            assert!(pair[1].mass_per_m_kg() > pair[0].mass_per_m_kg());
        }
    }

    #[test]
    fn test_ipe300_lookup() {
        let ipe300 = DEFAULT_IPE_CATALOG.get("IPE 300").unwrap();
        assert!((ipe300.mass_per_m_kg() - 42.2).abs() < 1e-9);
        // Tabulated area is 53.8 cm²
        assert!((ipe300.area_cm2 - 53.8).abs() < 0.1);
    }

    #[test]
    fn test_settings_carbon_factor_applied() {
        let settings = DesignSettings {
            carbon_factor: 0.5,
            ..DesignSettings::default()
        };
        let catalog = ipe_catalog(&settings);
        assert!(catalog.iter().all(|s| s.carbon_factor == 0.5));
    }
}
