//! Location and property-type lookup tables.
//!
//! Tables are built once at startup (defaults, optionally merged with the
//! `[codes]` section of the daemon config) and shared read-only afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use super::error::CodeError;
use super::property_code::{is_location_code, is_type_code};

/// Built-in location mappings.
pub const DEFAULT_LOCATION_CODES: &[(&str, &str)] = &[
    ("Bangalore", "BLR"),
    ("Mumbai", "MUM"),
    ("Delhi", "DEL"),
    ("Hyderabad", "HYD"),
    ("Chennai", "CHN"),
    ("Pune", "PUN"),
    ("Gurgaon", "GUR"),
    ("Noida", "NOI"),
    ("Kolkata", "KOL"),
    ("Ahmedabad", "AMD"),
    ("Kochi", "KOC"),
    ("Coimbatore", "COI"),
    ("Indore", "IND"),
    ("Jaipur", "JAI"),
    ("Lucknow", "LCK"),
    ("Nagpur", "NAG"),
    ("Surat", "SUR"),
    ("Vadodara", "VAD"),
    ("Visakhapatnam", "VIZ"),
    ("Bhubaneswar", "BBR"),
];

/// Built-in property type mappings.
pub const DEFAULT_TYPE_CODES: &[(&str, &str)] =
    &[("Office", "O"), ("Retail", "R"), ("Co-Working", "C")];

/// A single name → code table keyed by the case-folded name.
///
/// One entry per folded name, so every spelling of a name resolves to the
/// same code; a later insert replaces an earlier one regardless of case.
#[derive(Debug, Clone, Default)]
struct CodeTable {
    /// folded name → (display name, code)
    entries: HashMap<String, (String, String)>,
}

impl CodeTable {
    fn insert(&mut self, name: &str, code: &str) {
        self.entries
            .insert(name.to_lowercase(), (name.to_string(), code.to_string()));
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_lowercase())
            .map(|(_, code)| code.as_str())
    }

    fn names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self.entries.values().map(|(name, _)| name.as_str()).collect();
        names.into_iter().collect()
    }
}

/// Immutable location and type tables used by code derivation.
#[derive(Debug, Clone)]
pub struct CodeTables {
    locations: CodeTable,
    types: CodeTable,
}

impl Default for CodeTables {
    fn default() -> Self {
        let mut locations = CodeTable::default();
        for (name, code) in DEFAULT_LOCATION_CODES {
            locations.insert(name, code);
        }
        let mut types = CodeTable::default();
        for (name, code) in DEFAULT_TYPE_CODES {
            types.insert(name, code);
        }
        Self { locations, types }
    }
}

impl CodeTables {
    /// Default tables with deploy-time overrides merged on top.
    ///
    /// Override codes must already be well-formed (2 to 4 uppercase letters
    /// for locations, one uppercase letter for types).
    pub fn with_overrides(
        locations: &BTreeMap<String, String>,
        types: &BTreeMap<String, String>,
    ) -> Result<Self, CodeError> {
        let mut tables = Self::default();

        for (name, code) in locations {
            if !is_location_code(code) || name.trim().is_empty() {
                return Err(CodeError::InvalidMapping {
                    kind: "location",
                    name: name.clone(),
                    code: code.clone(),
                });
            }
            tables.locations.insert(name.trim(), code);
        }

        for (name, code) in types {
            if !is_type_code(code) || name.trim().is_empty() {
                return Err(CodeError::InvalidMapping {
                    kind: "type",
                    name: name.clone(),
                    code: code.clone(),
                });
            }
            tables.types.insert(name.trim(), code);
        }

        Ok(tables)
    }

    /// Map a free-text location to its 2 to 4 letter code.
    ///
    /// Unmapped locations fall back to their first three non-whitespace
    /// characters, uppercased. Distinct locations sharing those characters
    /// collide on the same prefix, so each fallback is logged.
    pub fn derive_location_code(&self, location: &str) -> Result<String, CodeError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(CodeError::invalid_input("location is required"));
        }

        if let Some(code) = self.locations.lookup(location) {
            return Ok(code.to_string());
        }

        let generated: String = location
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(3)
            .collect::<String>()
            .to_uppercase();
        warn!(
            location = %location,
            generated = %generated,
            "Location code not found, generated fallback"
        );
        Ok(generated)
    }

    /// Map a free-text property type to its single-letter code.
    ///
    /// Unmapped types fall back to their first character, uppercased.
    pub fn derive_type_code(&self, kind: &str) -> Result<String, CodeError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(CodeError::invalid_input("type is required"));
        }

        if let Some(code) = self.types.lookup(kind) {
            return Ok(code.to_string());
        }

        let generated: String = kind
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        warn!(
            kind = %kind,
            generated = %generated,
            "Type code not found, generated fallback"
        );
        Ok(generated)
    }

    /// Known location names, sorted.
    #[must_use]
    pub fn location_names(&self) -> Vec<&str> {
        self.locations.names()
    }

    /// Known type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        self.types.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_location_match() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_location_code("Bangalore").unwrap(), "BLR");
        assert_eq!(tables.derive_location_code("Visakhapatnam").unwrap(), "VIZ");
    }

    #[test]
    fn test_location_match_is_case_insensitive() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_location_code("bangalore").unwrap(), "BLR");
        assert_eq!(tables.derive_location_code("BANGALORE").unwrap(), "BLR");
        assert_eq!(tables.derive_location_code("bAnGaLoRe").unwrap(), "BLR");
    }

    #[test]
    fn test_location_input_is_trimmed() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_location_code("  Mumbai \n").unwrap(), "MUM");
    }

    #[test]
    fn test_unmapped_location_falls_back_to_first_three() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_location_code("Timbuktu").unwrap(), "TIM");
    }

    #[test]
    fn test_fallback_strips_inner_whitespace() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_location_code("New Delhi").unwrap(), "NEW");
        assert_eq!(tables.derive_location_code("N e w Town").unwrap(), "NEW");
    }

    #[test]
    fn test_fallback_collides_on_shared_prefix() {
        let tables = CodeTables::default();
        assert_eq!(
            tables.derive_location_code("Thane").unwrap(),
            tables.derive_location_code("Thanjavur").unwrap()
        );
    }

    #[test]
    fn test_short_unmapped_location_keeps_its_length() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_location_code("Ri").unwrap(), "RI");
    }

    #[test]
    fn test_blank_location_is_invalid_input() {
        let tables = CodeTables::default();
        for blank in ["", "   ", "\t\n"] {
            assert!(matches!(
                tables.derive_location_code(blank),
                Err(CodeError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_type_lookup() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_type_code("Office").unwrap(), "O");
        assert_eq!(tables.derive_type_code("Retail").unwrap(), "R");
        assert_eq!(tables.derive_type_code("Co-Working").unwrap(), "C");
        assert_eq!(tables.derive_type_code("co-working").unwrap(), "C");
    }

    #[test]
    fn test_unmapped_type_falls_back_to_first_letter() {
        let tables = CodeTables::default();
        assert_eq!(tables.derive_type_code("Warehouse").unwrap(), "W");
        assert_eq!(tables.derive_type_code("industrial").unwrap(), "I");
    }

    #[test]
    fn test_blank_type_is_invalid_input() {
        let tables = CodeTables::default();
        assert!(matches!(
            tables.derive_type_code("  "),
            Err(CodeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_overrides_add_and_replace() {
        let locations = BTreeMap::from([
            ("Thane".to_string(), "THN".to_string()),
            ("Pune".to_string(), "PNQ".to_string()),
        ]);
        let types = BTreeMap::from([("Warehouse".to_string(), "W".to_string())]);
        let tables = CodeTables::with_overrides(&locations, &types).unwrap();

        assert_eq!(tables.derive_location_code("thane").unwrap(), "THN");
        assert_eq!(tables.derive_location_code("Pune").unwrap(), "PNQ");
        assert_eq!(tables.derive_location_code("Mumbai").unwrap(), "MUM");
        assert!(tables.type_names().contains(&"Warehouse"));
    }

    #[test]
    fn test_case_variant_override_replaces_default_for_every_spelling() {
        let locations = BTreeMap::from([("pune".to_string(), "PNQ".to_string())]);
        let tables = CodeTables::with_overrides(&locations, &BTreeMap::new()).unwrap();

        for spelling in ["Pune", "PUNE", "pune", " pUnE "] {
            assert_eq!(tables.derive_location_code(spelling).unwrap(), "PNQ", "{spelling}");
        }
        assert_eq!(tables.location_names().len(), DEFAULT_LOCATION_CODES.len());
    }

    #[test]
    fn test_overrides_reject_malformed_codes() {
        let bad_location = BTreeMap::from([("Thane".to_string(), "thn".to_string())]);
        assert!(matches!(
            CodeTables::with_overrides(&bad_location, &BTreeMap::new()),
            Err(CodeError::InvalidMapping { kind: "location", .. })
        ));

        let bad_type = BTreeMap::from([("Warehouse".to_string(), "WH".to_string())]);
        assert!(matches!(
            CodeTables::with_overrides(&BTreeMap::new(), &bad_type),
            Err(CodeError::InvalidMapping { kind: "type", .. })
        ));
    }

    #[test]
    fn test_default_names_are_sorted() {
        let tables = CodeTables::default();
        let names = tables.location_names();
        assert_eq!(names.len(), DEFAULT_LOCATION_CODES.len());
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(tables.type_names(), vec!["Co-Working", "Office", "Retail"]);
    }
}
