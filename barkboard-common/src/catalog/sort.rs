//! Catalog sorting
//!
//! Stable, total comparators over record references. Sorting never fails:
//! missing numeric fields compare as zero, and an unrecognized sort key is
//! a no-op rather than an error, so any wire string is acceptable.

use std::cmp::Ordering;

use crate::model::{DogRecord, ShortPost};
use crate::normalize::parse_age_months;

// ========================================
// Dog catalog keys
// ========================================

/// Sort key for the main dog catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    /// Ascending by parsed age in months
    Age,
    /// Ascending by weight ("size" on the wire)
    Weight,
    /// Ascending by handling level
    Level,
    /// Descending by days in care
    LongestStay,
    /// Ascending by days in care
    ShortestStay,
    /// Program-eligible records first, otherwise stable
    DftdFirst,
    /// Leave the input order untouched
    #[default]
    Unsorted,
}

impl SortKey {
    /// Parse the wire form. Total: unknown strings mean "don't sort".
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "name" => SortKey::Name,
            "age" => SortKey::Age,
            "weight" | "size" => SortKey::Weight,
            "level" => SortKey::Level,
            "longest-stay" | "longest_stay" => SortKey::LongestStay,
            "shortest-stay" | "shortest_stay" => SortKey::ShortestStay,
            "dftd" => SortKey::DftdFirst,
            _ => SortKey::Unsorted,
        }
    }
}

/// Case-insensitive name ordering.
///
/// Unicode lowercase fold in place of locale collation; identical on the
/// ASCII names the feed carries and deterministic everywhere else.
fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort a filtered record list by the given key.
///
/// The sort is stable: records that compare equal keep their relative
/// input order. `Unsorted` returns the input unchanged.
pub fn sort_catalog<'a>(mut records: Vec<&'a DogRecord>, key: SortKey) -> Vec<&'a DogRecord> {
    match key {
        SortKey::Name => records.sort_by(|a, b| name_order(&a.name, &b.name)),
        SortKey::Age => records.sort_by_key(|d| parse_age_months(&d.approx_age)),
        SortKey::Weight => records.sort_by(|a, b| {
            let aw = a.weight_lbs.unwrap_or(0.0);
            let bw = b.weight_lbs.unwrap_or(0.0);
            aw.total_cmp(&bw)
        }),
        SortKey::Level => records.sort_by_key(|d| d.level.unwrap_or(0)),
        SortKey::LongestStay => {
            records.sort_by(|a, b| {
                let ad = a.days_in_care.unwrap_or(0);
                let bd = b.days_in_care.unwrap_or(0);
                bd.cmp(&ad)
            });
        }
        SortKey::ShortestStay => records.sort_by_key(|d| d.days_in_care.unwrap_or(0)),
        SortKey::DftdFirst => {
            records.sort_by(|a, b| b.dftd_eligible.cmp(&a.dftd_eligible));
        }
        SortKey::Unsorted => {}
    }
    records
}

// ========================================
// Short post keys
// ========================================

/// Column to sort the short-post table by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortSortKey {
    #[default]
    Name,
    AnimalId,
    Breed,
}

impl ShortSortKey {
    /// Parse the wire form; unknown strings fall back to name order.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "animal_id" | "id" => ShortSortKey::AnimalId,
            "breed" => ShortSortKey::Breed,
            _ => ShortSortKey::Name,
        }
    }
}

/// Sort direction for the short-post table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Sort short posts by a table column, in either direction. Stable.
pub fn sort_shorts<'a>(
    mut posts: Vec<&'a ShortPost>,
    key: ShortSortKey,
    order: SortOrder,
) -> Vec<&'a ShortPost> {
    posts.sort_by(|a, b| {
        let ordering = match key {
            ShortSortKey::Name => name_order(&a.name, &b.name),
            ShortSortKey::AnimalId => name_order(&a.animal_id, &b.animal_id),
            ShortSortKey::Breed => name_order(&a.breed_raw, &b.breed_raw),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    posts
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, ShelterSite, TraitSheet};

    fn dog(name: &str, age: &str, weight: Option<f64>, days: Option<u32>, dftd: bool) -> DogRecord {
        DogRecord {
            id: name.to_string(),
            name: name.to_string(),
            breed_raw: String::new(),
            breeds: vec![],
            weight_lbs: weight,
            approx_age: age.to_string(),
            level: None,
            gender: Gender::Unknown,
            kennel: "A01".to_string(),
            room: String::new(),
            foster: false,
            site: Some(ShelterSite::Dcas),
            images: vec![],
            adoption_url: String::new(),
            dftd_eligible: dftd,
            days_in_care: days,
            intake_date: None,
            dob: None,
            color_primary: None,
            color_secondary: None,
            heartworm: None,
            spay_neuter: None,
            traits: TraitSheet::default(),
        }
    }

    fn names(records: &[&DogRecord]) -> Vec<String> {
        records.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let batch = vec![
            dog("zeus", "1 yr", None, None, false),
            dog("Apollo", "1 yr", None, None, false),
            dog("bella", "1 yr", None, None, false),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        let sorted = sort_catalog(refs, SortKey::Name);
        assert_eq!(names(&sorted), vec!["Apollo", "bella", "zeus"]);
    }

    #[test]
    fn age_sort_uses_parsed_months() {
        let batch = vec![
            dog("Bella", "2 yr", None, None, false),
            dog("Zeus", "1 yr 6 mo", None, None, false),
            dog("Apollo", "3 yr", None, None, false),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        let sorted = sort_catalog(refs, SortKey::Age);
        assert_eq!(names(&sorted), vec!["Zeus", "Bella", "Apollo"]);
    }

    #[test]
    fn weight_sort_treats_unknown_as_zero() {
        let batch = vec![
            dog("Bella", "", Some(40.0), None, false),
            dog("Ghost", "", None, None, false),
            dog("Zeus", "", Some(70.0), None, false),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        let sorted = sort_catalog(refs, SortKey::Weight);
        assert_eq!(names(&sorted), vec!["Ghost", "Bella", "Zeus"]);
    }

    #[test]
    fn stay_sorts_run_both_directions() {
        let batch = vec![
            dog("Bella", "", None, Some(12), false),
            dog("Zeus", "", None, Some(90), false),
            dog("Apollo", "", None, None, false),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        let longest = sort_catalog(refs.clone(), SortKey::LongestStay);
        assert_eq!(names(&longest), vec!["Zeus", "Bella", "Apollo"]);

        let shortest = sort_catalog(refs, SortKey::ShortestStay);
        assert_eq!(names(&shortest), vec!["Apollo", "Bella", "Zeus"]);
    }

    #[test]
    fn dftd_sort_is_stable_among_equals() {
        let batch = vec![
            dog("Bella", "", None, None, false),
            dog("Zeus", "", None, None, true),
            dog("Apollo", "", None, None, false),
            dog("Nova", "", None, None, true),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        let sorted = sort_catalog(refs, SortKey::DftdFirst);
        // Eligible first, input order preserved within each group
        assert_eq!(names(&sorted), vec!["Zeus", "Nova", "Bella", "Apollo"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let batch = vec![
            dog("Bella", "2 yr", Some(40.0), None, false),
            dog("Zeus", "1 yr 6 mo", Some(70.0), None, false),
            dog("Apollo", "3 yr", Some(45.0), None, false),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        for key in [SortKey::Name, SortKey::Age, SortKey::Weight, SortKey::DftdFirst] {
            let once = sort_catalog(refs.clone(), key);
            let twice = sort_catalog(once.clone(), key);
            assert_eq!(names(&once), names(&twice));
        }
    }

    #[test]
    fn unsorted_and_unknown_keys_are_noops() {
        let batch = vec![
            dog("Zeus", "", None, None, false),
            dog("Apollo", "", None, None, false),
        ];
        let refs: Vec<&DogRecord> = batch.iter().collect();
        let out = sort_catalog(refs.clone(), SortKey::Unsorted);
        assert_eq!(names(&out), vec!["Zeus", "Apollo"]);

        assert_eq!(SortKey::parse("bogus"), SortKey::Unsorted);
        assert_eq!(SortKey::parse(""), SortKey::Unsorted);
    }

    #[test]
    fn sort_key_wire_forms() {
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("AGE"), SortKey::Age);
        assert_eq!(SortKey::parse("size"), SortKey::Weight);
        assert_eq!(SortKey::parse("weight"), SortKey::Weight);
        assert_eq!(SortKey::parse("level"), SortKey::Level);
        assert_eq!(SortKey::parse("longest-stay"), SortKey::LongestStay);
        assert_eq!(SortKey::parse("shortest_stay"), SortKey::ShortestStay);
        assert_eq!(SortKey::parse("dftd"), SortKey::DftdFirst);
    }

    #[test]
    fn short_post_sorting() {
        let post = |id: &str, name: &str, breed: &str| ShortPost {
            animal_id: id.to_string(),
            name: name.to_string(),
            breed_raw: breed.to_string(),
            post_text: String::new(),
            adoption_url: String::new(),
            asana_url: String::new(),
            kennel: String::new(),
            room: String::new(),
            site: None,
            images: vec![],
        };
        let posts = vec![
            post("A2", "zeus", "Husky"),
            post("A1", "Bella", "Boxer"),
            post("A3", "apollo", "Akita"),
        ];
        let refs: Vec<&ShortPost> = posts.iter().collect();

        let by_name = sort_shorts(refs.clone(), ShortSortKey::Name, SortOrder::Asc);
        let got: Vec<&str> = by_name.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(got, vec!["apollo", "Bella", "zeus"]);

        let by_id_desc = sort_shorts(refs.clone(), ShortSortKey::AnimalId, SortOrder::Desc);
        let got: Vec<&str> = by_id_desc.iter().map(|p| p.animal_id.as_str()).collect();
        assert_eq!(got, vec!["A3", "A2", "A1"]);

        let by_breed = sort_shorts(refs, ShortSortKey::Breed, SortOrder::Asc);
        let got: Vec<&str> = by_breed.iter().map(|p| p.breed_raw.as_str()).collect();
        assert_eq!(got, vec!["Akita", "Boxer", "Husky"]);
    }
}
