//! Catalog view derivation
//!
//! Composes the normalizers, filter, and sorter into the list a client
//! renders. Views are re-derived from the raw batch on every call; no
//! intermediate result is cached, so a change to any input (batch,
//! criteria, sort key) can never leak stale state into the output.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::catalog::filter::{filter_catalog, FilterCriteria};
use crate::catalog::sort::{sort_catalog, SortKey};
use crate::model::{DogRecord, Gender, ProposedChange, ShortPost, TraitSheet};
use crate::normalize::{
    clean_name, format_location, gender_info, level_style, normalize_breed, parse_age_months,
    resolve_image_url, size_category, split_breeds, GenderInfo,
};

// ========================================
// Dog projection
// ========================================

/// Display projection of one dog record
///
/// Every derived field here is recomputed from the raw record at build
/// time. The raw location/age/breed text rides along so clients can show
/// the original value in detail panes.
#[derive(Debug, Clone, Serialize)]
pub struct DogView {
    pub id: String,
    /// Name with trailing foster annotations stripped
    pub name: String,
    /// Canonical breed display name
    pub breed: String,
    /// Consolidated distinct breeds from the raw description
    pub breeds: Vec<String>,
    /// Human-readable location
    pub location: String,
    pub in_foster: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<&'static str>,
    pub age_text: String,
    pub age_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_lbs: Option<f64>,
    /// Size bucket label; absent when the weight is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub level_style: &'static str,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_info: Option<GenderInfo>,
    /// Resolved, fetchable photo URLs
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption_url: Option<String>,
    pub dftd_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_care: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intake_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartworm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spay_neuter: Option<String>,
    pub traits: TraitSheet,
}

impl DogView {
    /// Build the display projection for one record
    pub fn project(dog: &DogRecord) -> Self {
        DogView {
            id: dog.id.clone(),
            name: clean_name(&dog.name),
            breed: normalize_breed(&dog.breed_raw),
            breeds: split_breeds(&dog.breed_raw),
            location: format_location(&dog.kennel, &dog.room),
            in_foster: dog.in_foster(),
            site: dog.site.map(|s| s.code()),
            age_text: dog.approx_age.clone(),
            age_months: parse_age_months(&dog.approx_age),
            weight_lbs: dog.weight_lbs,
            size: dog.weight_lbs.map(|w| size_category(w).label()),
            level: dog.level,
            level_style: level_style(dog.level),
            gender: dog.gender,
            gender_info: gender_info(dog.gender),
            images: dog.images.iter().filter_map(|raw| resolve_image_url(raw)).collect(),
            adoption_url: dog.has_adoption_link().then(|| dog.adoption_url.clone()),
            dftd_eligible: dog.dftd_eligible,
            days_in_care: dog.days_in_care,
            intake_date: dog.intake_date,
            dob: dog.dob,
            color_primary: dog.color_primary.clone(),
            color_secondary: dog.color_secondary.clone(),
            heartworm: dog.heartworm.clone(),
            spay_neuter: dog.spay_neuter.clone(),
            traits: dog.traits.clone(),
        }
    }
}

/// Derived catalog response
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    /// Batch size before filtering, so clients can tell "no data" from
    /// "nothing matched"
    pub total: usize,
    /// Survivor count after filtering
    pub matched: usize,
    pub dogs: Vec<DogView>,
}

/// Filter, sort, and project a record batch in one pass.
///
/// `sort_catalog(filter_catalog(records, criteria), key)`, then a display
/// projection of every survivor.
pub fn derive_view(records: &[DogRecord], criteria: &FilterCriteria, key: SortKey) -> CatalogView {
    let survivors = sort_catalog(filter_catalog(records, criteria), key);
    CatalogView {
        total: records.len(),
        matched: survivors.len(),
        dogs: survivors.into_iter().map(DogView::project).collect(),
    }
}

/// Distinct breed options for the filter dropdown.
///
/// Every non-empty breed sub-field mapped through `normalize_breed`,
/// deduplicated and sorted. Uses the same normalizer as display code, so a
/// dropdown entry always matches the records it came from.
pub fn breed_options(records: &[DogRecord]) -> Vec<String> {
    let mut options: BTreeSet<String> = BTreeSet::new();
    for dog in records {
        for sub in &dog.breeds {
            if !sub.trim().is_empty() {
                options.insert(normalize_breed(sub));
            }
        }
    }
    options.into_iter().collect()
}

// ========================================
// Short post projection
// ========================================

/// Display projection of one short post
#[derive(Debug, Clone, Serialize)]
pub struct ShortView {
    pub animal_id: String,
    pub name: String,
    pub breed_raw: String,
    /// Consolidated distinct breeds from the post's breed text
    pub breeds: Vec<String>,
    pub post_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asana_url: Option<String>,
    pub location: String,
    pub in_foster: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<&'static str>,
    pub images: Vec<String>,
}

impl ShortView {
    pub fn project(post: &ShortPost) -> Self {
        let non_empty = |s: &String| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        ShortView {
            animal_id: post.animal_id.clone(),
            name: clean_name(&post.name),
            breed_raw: post.breed_raw.clone(),
            breeds: split_breeds(&post.breed_raw),
            post_text: post.post_text.clone(),
            adoption_url: non_empty(&post.adoption_url),
            asana_url: non_empty(&post.asana_url),
            location: format_location(&post.kennel, &post.room),
            in_foster: post.in_foster(),
            site: post.site.map(|s| s.code()),
            images: post.images.iter().filter_map(|raw| resolve_image_url(raw)).collect(),
        }
    }
}

/// Distinct consolidated breeds across all short posts, for the dropdown
pub fn short_breed_options(posts: &[ShortPost]) -> Vec<String> {
    let mut options: BTreeSet<String> = BTreeSet::new();
    for post in posts {
        for breed in split_breeds(&post.breed_raw) {
            options.insert(breed);
        }
    }
    options.into_iter().collect()
}

// ========================================
// Proposed change projection
// ========================================

/// Display projection of one proposed change
#[derive(Debug, Clone, Serialize)]
pub struct ChangeView {
    pub comment_gid: i64,
    pub animal_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub category: String,
    pub comment: String,
    pub current_value: String,
    pub proposed_value: String,
    pub foster: bool,
}

impl ChangeView {
    pub fn project(change: &ProposedChange) -> Self {
        ChangeView {
            comment_gid: change.comment_gid,
            animal_id: change.animal_id.clone(),
            name: clean_name(&change.name),
            site: change.site.map(|s| s.code()),
            created_at: change.created_at,
            category: change.category.clone(),
            comment: change.comment.clone(),
            current_value: change.current_value.clone(),
            proposed_value: change.proposed_value.clone(),
            foster: change.foster,
        }
    }
}

/// Distinct non-empty change categories, sorted, for the dropdown
pub fn category_options(changes: &[ProposedChange]) -> Vec<String> {
    let mut options: BTreeSet<String> = BTreeSet::new();
    for change in changes {
        let trimmed = change.category.trim();
        if !trimmed.is_empty() {
            options.insert(trimmed.to_string());
        }
    }
    options.into_iter().collect()
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::BreedChoice;
    use crate::model::ShelterSite;

    fn dog(name: &str, breed: &str, weight: Option<f64>, age: &str) -> DogRecord {
        DogRecord {
            id: name.to_string(),
            name: name.to_string(),
            breed_raw: breed.to_string(),
            breeds: vec![breed.to_string()],
            weight_lbs: weight,
            approx_age: age.to_string(),
            level: Some(2),
            gender: Gender::Male,
            kennel: "C39".to_string(),
            room: "Adopt Dogs".to_string(),
            foster: false,
            site: Some(ShelterSite::Dcas),
            images: vec!["N/A".to_string(), "https://example.org/a.jpg".to_string()],
            adoption_url: "Dog Not Found".to_string(),
            dftd_eligible: false,
            days_in_care: Some(7),
            intake_date: None,
            dob: None,
            color_primary: None,
            color_secondary: None,
            heartworm: None,
            spay_neuter: None,
            traits: TraitSheet::default(),
        }
    }

    fn three_dogs() -> Vec<DogRecord> {
        vec![
            dog("Bella", "Labrador Mix", Some(40.0), "2 yr"),
            dog("Zeus", "Pit Bull Terrier", Some(70.0), "1 yr 6 mo"),
            dog("Apollo", "Husky", Some(45.0), "3 yr"),
        ]
    }

    #[test]
    fn projection_derives_display_fields() {
        let record = dog("Rex - in foster", "Labrador Mix", Some(61.0), "2 yr 3 mo");
        let view = DogView::project(&record);

        assert_eq!(view.name, "Rex");
        assert_eq!(view.breed, "Labrador Retriever");
        assert_eq!(view.location, "C - 39");
        assert_eq!(view.age_months, 27);
        assert_eq!(view.size, Some("Large"));
        assert_eq!(view.level_style, "level-yellow");
        assert_eq!(view.gender_info.unwrap().glyph, "♂");
        // The "N/A" placeholder entry is dropped during resolution
        assert_eq!(view.images, vec!["https://example.org/a.jpg".to_string()]);
        // The sentinel adoption link is withheld
        assert_eq!(view.adoption_url, None);
        assert_eq!(view.site, Some("DCAS"));
    }

    #[test]
    fn unknown_weight_has_no_size_bucket() {
        let record = dog("Ghost", "Husky", None, "");
        let view = DogView::project(&record);
        assert_eq!(view.size, None);
        assert_eq!(view.weight_lbs, None);
    }

    #[test]
    fn end_to_end_filter_and_sorts() {
        let batch = three_dogs();

        let pit_bulls = FilterCriteria {
            breed: BreedChoice::Named("Pit Bull / Staffordshire".to_string()),
            ..Default::default()
        };
        let view = derive_view(&batch, &pit_bulls, SortKey::Unsorted);
        assert_eq!(view.total, 3);
        assert_eq!(view.matched, 1);
        assert_eq!(view.dogs[0].name, "Zeus");

        let by_name = derive_view(&batch, &FilterCriteria::default(), SortKey::Name);
        let names: Vec<&str> = by_name.dogs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Apollo", "Bella", "Zeus"]);

        let by_weight = derive_view(&batch, &FilterCriteria::default(), SortKey::Weight);
        let names: Vec<&str> = by_weight.dogs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bella", "Apollo", "Zeus"]);

        let by_age = derive_view(&batch, &FilterCriteria::default(), SortKey::Age);
        let names: Vec<&str> = by_age.dogs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeus", "Bella", "Apollo"]);
    }

    #[test]
    fn derivation_holds_no_state_between_calls() {
        let batch = three_dogs();
        let first = derive_view(&batch, &FilterCriteria::default(), SortKey::Name);
        // A different criteria object with the same content produces the
        // same output; nothing from the previous call leaks
        let second = derive_view(&batch, &FilterCriteria::default(), SortKey::Name);
        let a: Vec<&str> = first.dogs.iter().map(|d| d.name.as_str()).collect();
        let b: Vec<&str> = second.dogs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(a, b);
        assert_eq!(first.total, second.total);
    }

    #[test]
    fn breed_options_are_normalized_and_deduped() {
        let mut batch = three_dogs();
        batch[0].breeds = vec!["Labrador Retriever".to_string(), "Lab Mix".to_string()];
        batch[1].breeds = vec!["Pit Bull Terrier".to_string(), "".to_string()];
        batch[2].breeds = vec!["Siberian Husky".to_string()];

        let options = breed_options(&batch);
        assert_eq!(
            options,
            vec!["Husky / Northern Breed", "Labrador Retriever", "Pit Bull / Staffordshire"]
        );
    }

    #[test]
    fn short_view_and_options() {
        let posts = vec![ShortPost {
            animal_id: "A1".to_string(),
            name: "Bella (foster)".to_string(),
            breed_raw: "Labrador Retriever, Golden Retriever".to_string(),
            post_text: "A very good dog".to_string(),
            adoption_url: "  ".to_string(),
            asana_url: "https://app.asana.com/t/1".to_string(),
            kennel: "Foster Care".to_string(),
            room: String::new(),
            site: Some(ShelterSite::Fcas),
            images: vec!["".to_string()],
        }];

        let view = ShortView::project(&posts[0]);
        assert_eq!(view.name, "Bella");
        assert_eq!(view.breeds, vec!["Labrador Retriever", "Retriever"]);
        assert_eq!(view.location, "In Foster");
        assert!(view.in_foster);
        assert_eq!(view.adoption_url, None);
        assert_eq!(view.asana_url.as_deref(), Some("https://app.asana.com/t/1"));
        assert!(view.images.is_empty());

        assert_eq!(
            short_breed_options(&posts),
            vec!["Labrador Retriever", "Retriever"]
        );
    }

    #[test]
    fn change_categories_sorted_nonempty() {
        let change = |category: &str| ProposedChange {
            comment_gid: 0,
            animal_id: String::new(),
            name: String::new(),
            site: None,
            created_at: None,
            category: category.to_string(),
            comment: String::new(),
            current_value: String::new(),
            proposed_value: String::new(),
            foster: false,
        };
        let changes = vec![change("Weight"), change("  "), change("Level"), change("Weight")];
        assert_eq!(category_options(&changes), vec!["Level", "Weight"]);
    }
}
