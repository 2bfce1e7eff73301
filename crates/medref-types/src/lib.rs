//! # medref-types
//!
//! Type definitions for the medication reference and interaction checker.
//!
//! This crate provides the plain data types shared by the loader and the
//! service: curated medication records, canonical medication identities,
//! interaction severities and interaction results.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use medref_types::{CanonicalMedication, InteractionResult, Severity};
//!
//! let a = CanonicalMedication::new("linezolid", "Linezolid");
//! let b = CanonicalMedication::new("sertraline", "Sertraline (Zoloft)");
//!
//! let severity = Severity::parse("MAJOR");
//! assert_eq!(severity, Severity::Major);
//! assert!(Severity::Major < Severity::Moderate);
//!
//! let result = InteractionResult::flagged(&a, &b, severity);
//! assert_eq!(result.drugs, ["Linezolid".to_string(), "Sertraline (Zoloft)".to_string()]);
//! ```

#![warn(missing_docs)]

mod interaction;
mod medication;
mod severity;

// Re-export all public types at crate root
pub use interaction::{InteractionResult, ADVISORY_SUFFIX};
pub use medication::{CanonicalMedication, MedicationRecord};
pub use severity::Severity;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _severity = Severity::Unknown;
        let _canonical = CanonicalMedication::new("apixaban", "Apixaban (Eliquis)");
        let _suffix: &str = ADVISORY_SUFFIX;
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_record_roundtrip() {
        let json = r#"{
            "slug": "linezolid",
            "name": "Linezolid",
            "class": "Oxazolidinone antibiotic",
            "summary": "MRSA/VRE agent.",
            "dose": "600 mg q12h",
            "renal": "No adjustment.",
            "monitoring": "CBC weekly.",
            "pearls": ["MAOI washout"],
            "tags": ["Infectious Disease"],
            "keywords": ["linezolid", "zyvox"]
        }"#;

        let record: MedicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.slug, "linezolid");
        assert_eq!(record.keywords, vec!["linezolid", "zyvox"]);

        let back = serde_json::to_string(&record).unwrap();
        let parsed: MedicationRecord = serde_json::from_str(&back).unwrap();
        assert_eq!(record, parsed);
    }
}
