//! Upstream feed adapters
//!
//! The hosted feed has shipped the same records under two shapes: a
//! spreadsheet-derived export with spaced/Pascal keys ("Dog ID",
//! "Breed AI") and a database export with snake_case keys (dog_id,
//! breed_ai). Both carry the same semantic content, so each shape gets one
//! row struct here and a conversion into the canonical `model` types; the
//! rest of the crate never sees a wire shape.
//!
//! Per-field parsing is tolerant: numbers may arrive as JSON numbers or as
//! numeric strings, zero means "unknown" for weight and level, dates and
//! timestamps that fail to parse become `None`. Whole-batch decoding is
//! not tolerant: a batch that fails to decode is rejected outright, never
//! partially ingested.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::model::{DogRecord, Gender, ProposedChange, ShelterSite, ShortPost, TraitSheet};

// ========================================
// Field helpers
// ========================================

/// A numeric field that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumOrStr {
    Num(f64),
    Str(String),
}

impl NumOrStr {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumOrStr::Num(n) => Some(*n),
            NumOrStr::Str(s) => s.trim().parse().ok(),
        }
    }

    /// Render an id field as its canonical string form
    fn into_id(self) -> String {
        match self {
            NumOrStr::Num(n) if n.fract() == 0.0 => format!("{}", n as i64),
            NumOrStr::Num(n) => n.to_string(),
            NumOrStr::Str(s) => s.trim().to_string(),
        }
    }
}

/// Weight in pounds; zero and non-numeric input mean "unknown"
fn weight_from(raw: Option<NumOrStr>) -> Option<f64> {
    raw.and_then(|v| v.as_f64()).filter(|w| *w > 0.0)
}

/// Handling level; zero and out-of-range input mean "unknown"
fn level_from(raw: Option<NumOrStr>) -> Option<u8> {
    raw.and_then(|v| v.as_f64())
        .filter(|l| *l > 0.0 && *l <= u8::MAX as f64)
        .map(|l| l as u8)
}

fn days_from(raw: Option<NumOrStr>) -> Option<u32> {
    raw.and_then(|v| v.as_f64())
        .filter(|d| *d >= 0.0 && *d <= u32::MAX as f64)
        .map(|d| d as u32)
}

/// Trim free text to `None` when empty or a "not recorded" sentinel
fn opt_text(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower == "n/a" || lower == "not tested" || lower == "unknown" {
        return None;
    }
    Some(trimmed.to_string())
}

fn yes_flag(raw: &str) -> bool {
    raw.trim() == "Yes"
}

/// Photo fields, dropping empties and the "N/A" placeholder
fn images_from(candidates: [String; 3]) -> Vec<String> {
    candidates
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && p != "N/A")
        .collect()
}

/// Best-effort date parse across the formats the feed has used
fn date_from(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Timestamp forms carry the date up front
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .ok()
}

fn timestamp_from(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    trimmed
        .parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// ========================================
// Dog rows
// ========================================

/// Spreadsheet-export dog row (spaced/Pascal keys)
///
/// "Dog ID" is the discriminating required field; everything else
/// defaults. The feed's own column-name typos (Color_pimary) are the wire
/// truth, with the corrected spellings accepted as aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetDogRow {
    #[serde(rename = "Dog ID")]
    pub id: NumOrStr,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Breed AI", default)]
    pub breed_raw: String,
    #[serde(default, alias = "Photo_1")]
    pub mini_pic_1: String,
    #[serde(default, alias = "Photo_2")]
    pub mini_pic_2: String,
    #[serde(default, alias = "Photo_3")]
    pub mini_pic_3: String,
    #[serde(rename = "Gender", default)]
    pub gender: String,
    #[serde(rename = "Approx_Age", default)]
    pub approx_age: String,
    #[serde(rename = "Weight", default)]
    pub weight: Option<NumOrStr>,
    #[serde(rename = "Level", default)]
    pub level: Option<NumOrStr>,
    #[serde(rename = "Location_kennel", default)]
    pub kennel: String,
    #[serde(rename = "Location_room", default)]
    pub room: String,
    #[serde(rename = "Breed_AI_1", default)]
    pub breed_1: String,
    #[serde(rename = "Breed_AI_2", default)]
    pub breed_2: String,
    #[serde(rename = "Breed_AI_3", default)]
    pub breed_3: String,
    #[serde(rename = "DOB", default)]
    pub dob: String,
    #[serde(rename = "Intake_Date", default)]
    pub intake_date: String,
    #[serde(rename = "Days_in_DCAS", default)]
    pub days_in_care: Option<NumOrStr>,
    #[serde(rename = "Color_pimary", alias = "Color_primary", default)]
    pub color_primary: String,
    #[serde(rename = "Color_seconday", alias = "Color_secondary", default)]
    pub color_secondary: String,
    #[serde(rename = "Foster_status", default)]
    pub foster_status: String,
    #[serde(rename = "Heartworm_Status", default)]
    pub heartworm: String,
    #[serde(rename = "Spay_Neuter_status", default)]
    pub spay_neuter: String,
    #[serde(rename = "Adopets_url", default)]
    pub adoption_url: String,
    #[serde(rename = "DFTD_eligibility", default)]
    pub dftd: String,
    #[serde(rename = "Shelter_Location", alias = "shelter_location", default)]
    pub site: String,
    #[serde(rename = "Cuddle_Meter", default)]
    pub cuddle_meter: String,
    #[serde(rename = "Kid_Interaction", default)]
    pub kid_interaction: String,
    #[serde(rename = "Cat_Interaction", default)]
    pub cat_interaction: String,
    #[serde(rename = "Dog_Interaction", default)]
    pub dog_interaction: String,
    #[serde(rename = "Potty_Skills", default)]
    pub potty_skills: String,
    #[serde(rename = "Crate_Trained", default)]
    pub crate_trained: String,
    #[serde(rename = "Energy_Level", alias = "Energy_Activity_Level", default)]
    pub energy_level: String,
    #[serde(rename = "Leash_Skills", default)]
    pub leash_skills: String,
}

/// Database-export dog row (snake_case keys, except the quoted trait
/// columns which stayed Pascal)
#[derive(Debug, Clone, Deserialize)]
pub struct DbDogRow {
    pub dog_id: NumOrStr,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed_ai: String,
    #[serde(default)]
    pub mini_pic_1: String,
    #[serde(default)]
    pub mini_pic_2: String,
    #[serde(default)]
    pub mini_pic_3: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub approx_age: String,
    #[serde(default)]
    pub weight: Option<NumOrStr>,
    #[serde(default)]
    pub level: Option<NumOrStr>,
    #[serde(default)]
    pub location_kennel: String,
    #[serde(default)]
    pub location_room: String,
    #[serde(default)]
    pub breed_ai_1: String,
    #[serde(default)]
    pub breed_ai_2: String,
    #[serde(default)]
    pub breed_ai_3: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub intake_date: String,
    #[serde(default)]
    pub days_in_dcas: Option<NumOrStr>,
    #[serde(default)]
    pub color_pimary: String,
    #[serde(default)]
    pub color_seconday: String,
    #[serde(default)]
    pub foster_status: String,
    #[serde(default)]
    pub heartworm_status: String,
    #[serde(default)]
    pub spay_neuter_status: String,
    #[serde(default)]
    pub adopets_url: String,
    #[serde(default)]
    pub dftd_eligibility: String,
    #[serde(default)]
    pub shelter_location: String,
    #[serde(rename = "Cuddle_Meter", default)]
    pub cuddle_meter: String,
    #[serde(rename = "Kid_Interaction", default)]
    pub kid_interaction: String,
    #[serde(rename = "Cat_Interaction", default)]
    pub cat_interaction: String,
    #[serde(rename = "Dog_Interaction", default)]
    pub dog_interaction: String,
    #[serde(rename = "Potty_Skills", default)]
    pub potty_skills: String,
    #[serde(rename = "Crate_Trained", default)]
    pub crate_trained: String,
    #[serde(rename = "Energy_Activity_Level", alias = "Energy_Level", default)]
    pub energy_level: String,
    #[serde(rename = "Leash_Skills", default)]
    pub leash_skills: String,
}

/// Either observed dog-row shape
///
/// Untagged: a row is tried as a sheet export first (required "Dog ID"
/// key), then as a database export (required `dog_id`). A row matching
/// neither fails the whole batch decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDogRow {
    Sheet(SheetDogRow),
    Db(DbDogRow),
}

impl RawDogRow {
    /// Convert into the canonical record. Total per row; tolerant fields
    /// degrade to their unknown form.
    pub fn into_record(self) -> DogRecord {
        match self {
            RawDogRow::Sheet(row) => DogRecord {
                id: row.id.into_id(),
                name: row.name.trim().to_string(),
                breed_raw: row.breed_raw,
                breeds: breeds_from([row.breed_1, row.breed_2, row.breed_3]),
                weight_lbs: weight_from(row.weight),
                approx_age: row.approx_age,
                level: level_from(row.level),
                gender: Gender::from_raw(&row.gender),
                kennel: row.kennel,
                room: row.room,
                foster: yes_flag(&row.foster_status),
                site: ShelterSite::from_code(&row.site),
                images: images_from([row.mini_pic_1, row.mini_pic_2, row.mini_pic_3]),
                adoption_url: row.adoption_url.trim().to_string(),
                dftd_eligible: yes_flag(&row.dftd),
                days_in_care: days_from(row.days_in_care),
                intake_date: date_from(&row.intake_date),
                dob: date_from(&row.dob),
                color_primary: opt_text(row.color_primary),
                color_secondary: opt_text(row.color_secondary),
                heartworm: opt_text(row.heartworm),
                spay_neuter: opt_text(row.spay_neuter),
                traits: TraitSheet {
                    cuddle_meter: opt_text(row.cuddle_meter),
                    kid_interaction: opt_text(row.kid_interaction),
                    cat_interaction: opt_text(row.cat_interaction),
                    dog_interaction: opt_text(row.dog_interaction),
                    potty_skills: opt_text(row.potty_skills),
                    crate_trained: opt_text(row.crate_trained),
                    energy_level: opt_text(row.energy_level),
                    leash_skills: opt_text(row.leash_skills),
                },
            },
            RawDogRow::Db(row) => DogRecord {
                id: row.dog_id.into_id(),
                name: row.name.trim().to_string(),
                breed_raw: row.breed_ai,
                breeds: breeds_from([row.breed_ai_1, row.breed_ai_2, row.breed_ai_3]),
                weight_lbs: weight_from(row.weight),
                approx_age: row.approx_age,
                level: level_from(row.level),
                gender: Gender::from_raw(&row.gender),
                kennel: row.location_kennel,
                room: row.location_room,
                foster: yes_flag(&row.foster_status),
                site: ShelterSite::from_code(&row.shelter_location),
                images: images_from([row.mini_pic_1, row.mini_pic_2, row.mini_pic_3]),
                adoption_url: row.adopets_url.trim().to_string(),
                dftd_eligible: yes_flag(&row.dftd_eligibility),
                days_in_care: days_from(row.days_in_dcas),
                intake_date: date_from(&row.intake_date),
                dob: date_from(&row.dob),
                color_primary: opt_text(row.color_pimary),
                color_secondary: opt_text(row.color_seconday),
                heartworm: opt_text(row.heartworm_status),
                spay_neuter: opt_text(row.spay_neuter_status),
                traits: TraitSheet {
                    cuddle_meter: opt_text(row.cuddle_meter),
                    kid_interaction: opt_text(row.kid_interaction),
                    cat_interaction: opt_text(row.cat_interaction),
                    dog_interaction: opt_text(row.dog_interaction),
                    potty_skills: opt_text(row.potty_skills),
                    crate_trained: opt_text(row.crate_trained),
                    energy_level: opt_text(row.energy_level),
                    leash_skills: opt_text(row.leash_skills),
                },
            },
        }
    }
}

/// Ordered non-empty breed sub-fields
fn breeds_from(candidates: [String; 3]) -> Vec<String> {
    candidates
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

/// Convert a decoded dog batch, applying feed hygiene.
///
/// Rows with an empty name, or a URL where the name should be (a recurring
/// feed artifact), are dropped.
pub fn dog_batch(rows: Vec<RawDogRow>) -> Vec<DogRecord> {
    rows.into_iter()
        .map(RawDogRow::into_record)
        .filter(|dog| !dog.name.is_empty() && !dog.name.starts_with("http"))
        .collect()
}

// ========================================
// Short post rows
// ========================================

/// Short-post row as served by the feed (snake_case)
#[derive(Debug, Clone, Deserialize)]
pub struct ShortPostRow {
    pub animal_id: NumOrStr,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed_ai: String,
    /// Generated post body
    #[serde(default)]
    pub chuya_breed_ai: String,
    #[serde(default)]
    pub adopets_url: String,
    #[serde(default)]
    pub asana_permalink_url: String,
    #[serde(default)]
    pub location_kennel: String,
    #[serde(default)]
    pub location_room: String,
    #[serde(default)]
    pub shelter_location: String,
    #[serde(default)]
    pub mini_pic_1: String,
    #[serde(default)]
    pub mini_pic_2: String,
    #[serde(default)]
    pub mini_pic_3: String,
}

impl ShortPostRow {
    pub fn into_post(self) -> ShortPost {
        ShortPost {
            animal_id: self.animal_id.into_id(),
            name: self.name.trim().to_string(),
            breed_raw: self.breed_ai,
            post_text: self.chuya_breed_ai,
            adoption_url: self.adopets_url.trim().to_string(),
            asana_url: self.asana_permalink_url.trim().to_string(),
            kennel: self.location_kennel,
            room: self.location_room,
            site: ShelterSite::from_code(&self.shelter_location),
            images: images_from([self.mini_pic_1, self.mini_pic_2, self.mini_pic_3]),
        }
    }
}

/// Convert a decoded short-post batch, dropping rows with no animal id
pub fn short_batch(rows: Vec<ShortPostRow>) -> Vec<ShortPost> {
    rows.into_iter()
        .map(ShortPostRow::into_post)
        .filter(|post| !post.animal_id.is_empty())
        .collect()
}

// ========================================
// Proposed change rows
// ========================================

/// Proposed-change row as served by the feed (snake_case)
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRow {
    pub comment_gid: NumOrStr,
    #[serde(default)]
    pub animal_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shelter_location: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub asana_category: String,
    #[serde(default)]
    pub comments_sanitized: String,
    #[serde(default)]
    pub current_value: String,
    #[serde(default)]
    pub proposed_value: String,
    #[serde(default)]
    pub foster_status: String,
}

impl ChangeRow {
    pub fn into_change(self) -> ProposedChange {
        ProposedChange {
            comment_gid: self
                .comment_gid
                .as_f64()
                .filter(|g| g.fract() == 0.0)
                .map(|g| g as i64)
                .unwrap_or(0),
            animal_id: self.animal_id.trim().to_string(),
            name: self.name.trim().to_string(),
            site: ShelterSite::from_code(&self.shelter_location),
            created_at: timestamp_from(&self.created_at),
            category: self.asana_category.trim().to_string(),
            comment: self.comments_sanitized,
            current_value: self.current_value,
            proposed_value: self.proposed_value,
            foster: yes_flag(&self.foster_status),
        }
    }
}

/// Convert a decoded change batch
pub fn change_batch(rows: Vec<ChangeRow>) -> Vec<ProposedChange> {
    rows.into_iter().map(ChangeRow::into_change).collect()
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_row_converts_to_canonical_record() {
        let json = r#"{
            "Dog ID": 58123,
            "Name": "Bella - in foster",
            "Breed AI": "Labrador Retriever, Boxer",
            "mini_pic_1": "https://www.petango.com/photos/1.jpg",
            "mini_pic_2": "N/A",
            "mini_pic_3": "",
            "Gender": "Female",
            "Approx_Age": "2 yr 3 mo",
            "Weight": "42.5",
            "Level": 2,
            "Location_kennel": "C39",
            "Location_room": "Adopt Dogs",
            "Breed_AI_1": "Labrador Retriever",
            "Breed_AI_2": "Boxer",
            "Breed_AI_3": "",
            "DOB": "2022-04-01",
            "Intake_Date": "03/15/2025",
            "Days_in_DCAS": "163",
            "Color_pimary": "Black",
            "Color_seconday": "N/A",
            "Foster_status": "Yes",
            "Heartworm_Status": "Negative",
            "Spay_Neuter_status": "Yes",
            "Adopets_url": "https://adopt.example.org/58123",
            "DFTD_eligibility": "Yes",
            "Cuddle_Meter": "Loves cuddles",
            "Kid_Interaction": "not tested",
            "Energy_Level": "Medium"
        }"#;

        let row: RawDogRow = serde_json::from_str(json).unwrap();
        let dog = row.into_record();

        assert_eq!(dog.id, "58123");
        assert_eq!(dog.name, "Bella - in foster");
        assert_eq!(dog.breeds, vec!["Labrador Retriever", "Boxer"]);
        assert_eq!(dog.weight_lbs, Some(42.5));
        assert_eq!(dog.level, Some(2));
        assert_eq!(dog.gender, Gender::Female);
        assert!(dog.foster);
        assert!(dog.dftd_eligible);
        assert_eq!(dog.days_in_care, Some(163));
        assert_eq!(dog.images, vec!["https://www.petango.com/photos/1.jpg"]);
        assert_eq!(dog.intake_date, Some(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
        assert_eq!(dog.dob, Some(NaiveDate::from_ymd_opt(2022, 4, 1).unwrap()));
        assert_eq!(dog.color_primary.as_deref(), Some("Black"));
        // Sentinels normalize to unknown
        assert_eq!(dog.color_secondary, None);
        assert_eq!(dog.traits.kid_interaction, None);
        assert_eq!(dog.traits.cuddle_meter.as_deref(), Some("Loves cuddles"));
        assert_eq!(dog.traits.energy_level.as_deref(), Some("Medium"));
    }

    #[test]
    fn db_row_converts_to_the_same_canonical_form() {
        let json = r#"{
            "dog_id": "58123",
            "name": "Bella",
            "breed_ai": "Labrador Retriever",
            "gender": "female",
            "approx_age": "2 yr",
            "weight": 0,
            "level": 0,
            "location_kennel": "Foster Care",
            "location_room": "",
            "breed_ai_1": "Labrador Retriever",
            "days_in_dcas": 12,
            "foster_status": "No",
            "shelter_location": "FCAS",
            "adopets_url": "",
            "dftd_eligibility": "No",
            "Energy_Activity_Level": "High"
        }"#;

        let row: RawDogRow = serde_json::from_str(json).unwrap();
        let dog = row.into_record();

        assert_eq!(dog.id, "58123");
        // Zero means unknown for weight and level
        assert_eq!(dog.weight_lbs, None);
        assert_eq!(dog.level, None);
        assert_eq!(dog.site, Some(ShelterSite::Fcas));
        assert_eq!(dog.days_in_care, Some(12));
        assert!(!dog.foster);
        assert!(dog.in_foster());
        assert_eq!(dog.traits.energy_level.as_deref(), Some("High"));
    }

    #[test]
    fn mixed_shape_batch_decodes() {
        let json = r#"[
            {"Dog ID": 1, "Name": "Rex", "Breed AI": "Boxer"},
            {"dog_id": 2, "name": "Nova", "breed_ai": "Husky"}
        ]"#;
        let rows: Vec<RawDogRow> = serde_json::from_str(json).unwrap();
        let dogs = dog_batch(rows);
        assert_eq!(dogs.len(), 2);
        assert_eq!(dogs[0].id, "1");
        assert_eq!(dogs[1].name, "Nova");
    }

    #[test]
    fn hygiene_drops_nameless_and_url_named_rows() {
        let json = r#"[
            {"Dog ID": 1, "Name": "Rex"},
            {"Dog ID": 2, "Name": ""},
            {"Dog ID": 3},
            {"Dog ID": 4, "Name": "https://example.org/row-artifact"}
        ]"#;
        let rows: Vec<RawDogRow> = serde_json::from_str(json).unwrap();
        let dogs = dog_batch(rows);
        assert_eq!(dogs.len(), 1);
        assert_eq!(dogs[0].name, "Rex");
    }

    #[test]
    fn malformed_batch_is_rejected_whole() {
        // Second row matches neither shape (no id key of either kind)
        let json = r#"[
            {"Dog ID": 1, "Name": "Rex"},
            {"Name": "Shapeless"}
        ]"#;
        assert!(serde_json::from_str::<Vec<RawDogRow>>(json).is_err());
    }

    #[test]
    fn short_rows_convert_and_filter() {
        let json = r#"[
            {
                "animal_id": "58123",
                "name": "Bella",
                "breed_ai": "Labrador Retriever, Golden Retriever",
                "chuya_breed_ai": "Bella moves like a lab at the lake.",
                "adopets_url": "https://adopt.example.org/58123",
                "asana_permalink_url": "https://app.asana.com/t/1",
                "location_kennel": "A01",
                "location_room": "Adopt Dogs",
                "shelter_location": "DCAS",
                "mini_pic_1": "https://www.petango.com/photos/1.jpg"
            },
            {"animal_id": ""}
        ]"#;
        let rows: Vec<ShortPostRow> = serde_json::from_str(json).unwrap();
        let posts = short_batch(rows);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].animal_id, "58123");
        assert_eq!(posts[0].post_text, "Bella moves like a lab at the lake.");
        assert_eq!(posts[0].site, Some(ShelterSite::Dcas));
    }

    #[test]
    fn change_rows_convert_with_tolerant_timestamps() {
        let json = r#"[
            {
                "comment_gid": "1211892341",
                "animal_id": "58123",
                "name": "Bella - foster",
                "shelter_location": "DCAS",
                "created_at": "2025-08-01T14:30:00Z",
                "asana_category": "Weight",
                "comments_sanitized": "Scale says 44",
                "current_value": "42",
                "proposed_value": "44",
                "foster_status": "Yes"
            },
            {
                "comment_gid": 7,
                "created_at": "not a date"
            }
        ]"#;
        let rows: Vec<ChangeRow> = serde_json::from_str(json).unwrap();
        let changes = change_batch(rows);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].comment_gid, 1211892341);
        assert!(changes[0].created_at.is_some());
        assert!(changes[0].foster);
        assert_eq!(changes[1].comment_gid, 7);
        assert_eq!(changes[1].created_at, None);
    }

    #[test]
    fn numeric_fields_accept_strings_and_numbers() {
        let weight_str = weight_from(Some(NumOrStr::Str(" 42.5 ".to_string())));
        assert_eq!(weight_str, Some(42.5));
        assert_eq!(weight_from(Some(NumOrStr::Num(0.0))), None);
        assert_eq!(weight_from(Some(NumOrStr::Str("heavy".to_string()))), None);
        assert_eq!(weight_from(None), None);

        assert_eq!(level_from(Some(NumOrStr::Num(3.0))), Some(3));
        assert_eq!(level_from(Some(NumOrStr::Str("2".to_string()))), Some(2));
        assert_eq!(level_from(Some(NumOrStr::Num(900.0))), None);
    }
}
