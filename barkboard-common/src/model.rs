//! Canonical catalog record types
//!
//! One immutable record shape per browsing surface: adoptable dogs, breed
//! short posts, and proposed record changes. Upstream feeds name these
//! fields differently from snapshot to snapshot; the `ingest` module adapts
//! each observed shape into the types here, so the normalizer, filter, and
//! sort layers never see a raw wire shape.
//!
//! Records are fetched as an immutable batch and held in memory. Nothing in
//! the core mutates a record after ingest; display values are derived fresh
//! on every request (see `catalog::view`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ========================================
// Field enums
// ========================================

/// Dog gender as reported by the shelter feed
///
/// Input casing varies ("Male", "MALE", "male"); anything that is not
/// recognizably male or female maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse a raw gender string, case-insensitively
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

/// Physical shelter facility a record belongs to
///
/// The feed carries these as short site codes. Unrecognized codes become
/// `None` on the record rather than an error, so a new facility in the feed
/// degrades to "no site" instead of breaking ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelterSite {
    #[serde(rename = "DCAS")]
    Dcas,
    #[serde(rename = "FCAS")]
    Fcas,
    #[serde(rename = "CAC")]
    Cac,
}

impl ShelterSite {
    /// Parse a feed site code; unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "DCAS" => Some(ShelterSite::Dcas),
            "FCAS" => Some(ShelterSite::Fcas),
            "CAC" => Some(ShelterSite::Cac),
            _ => None,
        }
    }

    /// Canonical wire form of the site code
    pub fn code(&self) -> &'static str {
        match self {
            ShelterSite::Dcas => "DCAS",
            ShelterSite::Fcas => "FCAS",
            ShelterSite::Cac => "CAC",
        }
    }
}

/// Weight-derived size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
            SizeCategory::Large => "Large",
        }
    }
}

// ========================================
// Dog records
// ========================================

/// Behavioral trait observations from the shelter's evaluation sheet
///
/// Each field holds a descriptive string when the trait was evaluated.
/// "Not tested" style sentinels are normalized to `None` at ingest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitSheet {
    pub cuddle_meter: Option<String>,
    pub kid_interaction: Option<String>,
    pub cat_interaction: Option<String>,
    pub dog_interaction: Option<String>,
    pub potty_skills: Option<String>,
    pub crate_trained: Option<String>,
    pub energy_level: Option<String>,
    pub leash_skills: Option<String>,
}

/// One shelter dog, in canonical form
///
/// Invariants established at ingest:
/// - `id` is unique within a batch and is the sole identity key.
/// - `images` never contains empty strings or the literal "N/A".
/// - `breeds` holds the non-empty breed sub-fields in feed order.
///
/// Derived display values (normalized breed, formatted location, age in
/// months, size category) are never stored here; they are recomputed from
/// the raw fields by `catalog::view`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DogRecord {
    /// Shelter-issued animal id, unique per batch
    pub id: String,
    /// Display name, possibly carrying trailing foster annotations
    pub name: String,
    /// Free-text AI breed description, comma-separated candidate phrases
    pub breed_raw: String,
    /// Ordered non-empty breed sub-fields (up to three)
    pub breeds: Vec<String>,
    /// Weight in pounds; `None` when the feed reported 0 or nothing
    pub weight_lbs: Option<f64>,
    /// Free-text age, "<N> yr <M> mo" family
    pub approx_age: String,
    /// Handling level 1..=3; `None` when unreported
    pub level: Option<u8>,
    pub gender: Gender,
    /// Raw kennel code (shelter naming conventions, see `normalize`)
    pub kennel: String,
    /// Raw room code
    pub room: String,
    /// Foster flag from the feed's explicit status column
    pub foster: bool,
    /// Facility the record belongs to; `None` for unrecognized codes
    pub site: Option<ShelterSite>,
    /// Up to three photo URLs, pre-filtered of empties and "N/A"
    pub images: Vec<String>,
    /// Adoption listing link; may be empty or the "Dog Not Found" sentinel
    pub adoption_url: String,
    /// Dogs For The Day program eligibility
    pub dftd_eligible: bool,
    /// Days in shelter care; `None` when unreported
    pub days_in_care: Option<u32>,
    pub intake_date: Option<NaiveDate>,
    pub dob: Option<NaiveDate>,
    pub color_primary: Option<String>,
    pub color_secondary: Option<String>,
    pub heartworm: Option<String>,
    pub spay_neuter: Option<String>,
    pub traits: TraitSheet,
}

impl DogRecord {
    /// Whether the dog is currently in a foster placement
    ///
    /// Foster membership is detected from the location text, not the
    /// explicit status column: some snapshots of the feed only mark fosters
    /// via kennel/room naming.
    pub fn in_foster(&self) -> bool {
        let k = self.kennel.to_lowercase();
        let r = self.room.to_lowercase();
        k.contains("foster") || r.contains("foster")
    }

    /// Whether the adoption link is usable
    ///
    /// The feed uses an empty string or the literal "Dog Not Found" when a
    /// listing has been taken down.
    pub fn has_adoption_link(&self) -> bool {
        !self.adoption_url.trim().is_empty() && self.adoption_url != "Dog Not Found"
    }
}

// ========================================
// Review surfaces
// ========================================

/// One generated breed-resemblance short post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortPost {
    pub animal_id: String,
    pub name: String,
    /// Breed description the post was generated from
    pub breed_raw: String,
    /// Generated post body; empty when generation has not run yet
    pub post_text: String,
    pub adoption_url: String,
    /// Link back to the review task
    pub asana_url: String,
    pub kennel: String,
    pub room: String,
    pub site: Option<ShelterSite>,
    pub images: Vec<String>,
}

impl ShortPost {
    /// Foster detection, same location-text rule as `DogRecord::in_foster`
    pub fn in_foster(&self) -> bool {
        let k = self.kennel.to_lowercase();
        let r = self.room.to_lowercase();
        k.contains("foster") || r.contains("foster")
    }
}

/// One proposed record change awaiting review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposedChange {
    /// Comment id from the task tracker, unique per change
    pub comment_gid: i64,
    pub animal_id: String,
    pub name: String,
    pub site: Option<ShelterSite>,
    pub created_at: Option<DateTime<Utc>>,
    /// Change category assigned by the reviewer bot
    pub category: String,
    /// Sanitized comment text
    pub comment: String,
    pub current_value: String,
    pub proposed_value: String,
    pub foster: bool,
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(Gender::from_raw("Male"), Gender::Male);
        assert_eq!(Gender::from_raw("FEMALE"), Gender::Female);
        assert_eq!(Gender::from_raw(" female "), Gender::Female);
        assert_eq!(Gender::from_raw("spayed"), Gender::Unknown);
        assert_eq!(Gender::from_raw(""), Gender::Unknown);
    }

    #[test]
    fn site_codes_round_trip() {
        for code in ["DCAS", "FCAS", "CAC"] {
            let site = ShelterSite::from_code(code).unwrap();
            assert_eq!(site.code(), code);
        }
        assert_eq!(ShelterSite::from_code("dcas"), Some(ShelterSite::Dcas));
        assert_eq!(ShelterSite::from_code("NEWSITE"), None);
        assert_eq!(ShelterSite::from_code(""), None);
    }

    #[test]
    fn foster_detection_uses_location_text() {
        let mut dog = sample_dog();
        assert!(!dog.in_foster());

        dog.kennel = "Foster Care".to_string();
        assert!(dog.in_foster());

        dog.kennel = "A12".to_string();
        dog.room = "FOSTER overflow".to_string();
        assert!(dog.in_foster());
    }

    #[test]
    fn adoption_link_sentinels_rejected() {
        let mut dog = sample_dog();
        dog.adoption_url = "https://adopt.example.org/d/123".to_string();
        assert!(dog.has_adoption_link());

        dog.adoption_url = String::new();
        assert!(!dog.has_adoption_link());

        dog.adoption_url = "   ".to_string();
        assert!(!dog.has_adoption_link());

        dog.adoption_url = "Dog Not Found".to_string();
        assert!(!dog.has_adoption_link());
    }

    fn sample_dog() -> DogRecord {
        DogRecord {
            id: "A100".to_string(),
            name: "Bella".to_string(),
            breed_raw: "Labrador Mix".to_string(),
            breeds: vec!["Labrador Mix".to_string()],
            weight_lbs: Some(40.0),
            approx_age: "2 yr".to_string(),
            level: Some(1),
            gender: Gender::Female,
            kennel: "A12".to_string(),
            room: "Adopt Dogs".to_string(),
            foster: false,
            site: Some(ShelterSite::Dcas),
            images: vec![],
            adoption_url: String::new(),
            dftd_eligible: false,
            days_in_care: Some(10),
            intake_date: None,
            dob: None,
            color_primary: None,
            color_secondary: None,
            heartworm: None,
            spay_neuter: None,
            traits: TraitSheet::default(),
        }
    }
}
