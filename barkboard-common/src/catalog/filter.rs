//! Catalog filtering
//!
//! Pure, order-preserving matching of records against user criteria. All
//! criteria fields are AND-combined; each field's empty/`All` value matches
//! everything, so the default criteria are the identity filter. Missing or
//! unknown record fields are treated as non-matching, never as an error.

use serde::{Deserialize, Serialize};

use crate::model::{DogRecord, ProposedChange, ShelterSite, ShortPost};
use crate::normalize::{normalize_breed, split_breeds};

// ========================================
// Criteria vocabulary
// ========================================

/// Breed dropdown selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BreedChoice {
    /// The "all" sentinel
    #[default]
    All,
    /// A canonical breed name as produced by `normalize_breed`
    Named(String),
}

impl BreedChoice {
    /// Parse the wire form: empty or "all" is the sentinel, anything else
    /// is a breed name.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            BreedChoice::All
        } else {
            BreedChoice::Named(trimmed.to_string())
        }
    }
}

/// Shelter vs foster placement half of a location bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    InShelter,
    InFoster,
}

/// Location dropdown selection
///
/// Foster membership is a substring test on the location text ("foster",
/// case-insensitive), not the feed's explicit foster column; some feed
/// snapshots only mark fosters through kennel naming. Site membership is an
/// exact site-code comparison, so a record with an unrecognized site never
/// matches a site bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationBucket {
    /// The "all" sentinel, matches every record
    #[default]
    All,
    AllInShelter,
    AllInFoster,
    Site(ShelterSite, Placement),
}

impl LocationBucket {
    /// Parse the wire form ("all", "all_in_foster", "DCAS_in_shelter", ...).
    ///
    /// Unknown values degrade to `All` so a stale client cannot make the
    /// filter reject everything.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return LocationBucket::All;
        }
        if trimmed.eq_ignore_ascii_case("all_in_shelter") {
            return LocationBucket::AllInShelter;
        }
        if trimmed.eq_ignore_ascii_case("all_in_foster") {
            return LocationBucket::AllInFoster;
        }
        let placement = if let Some(site_code) = trimmed.strip_suffix("_in_shelter") {
            Some((site_code, Placement::InShelter))
        } else {
            trimmed
                .strip_suffix("_in_foster")
                .map(|site_code| (site_code, Placement::InFoster))
        };
        if let Some((site_code, placement)) = placement {
            if let Some(site) = ShelterSite::from_code(site_code) {
                return LocationBucket::Site(site, placement);
            }
        }
        LocationBucket::All
    }

    /// Whether a record with the given foster state and site falls in this
    /// bucket.
    pub fn contains(&self, in_foster: bool, site: Option<ShelterSite>) -> bool {
        match self {
            LocationBucket::All => true,
            LocationBucket::AllInShelter => !in_foster,
            LocationBucket::AllInFoster => in_foster,
            LocationBucket::Site(wanted, Placement::InShelter) => {
                !in_foster && site == Some(*wanted)
            }
            LocationBucket::Site(wanted, Placement::InFoster) => {
                in_foster && site == Some(*wanted)
            }
        }
    }
}

/// Explicit foster-status column filter (distinct from the location
/// buckets' substring detection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FosterChoice {
    #[default]
    All,
    FosterOnly,
    NotFoster,
}

impl FosterChoice {
    /// Parse the wire form; unknown values degrade to `All`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "foster" => FosterChoice::FosterOnly,
            "not-foster" | "not_foster" => FosterChoice::NotFoster,
            _ => FosterChoice::All,
        }
    }

    fn matches(&self, foster: bool) -> bool {
        match self {
            FosterChoice::All => true,
            FosterChoice::FosterOnly => foster,
            FosterChoice::NotFoster => !foster,
        }
    }
}

// ========================================
// Dog catalog
// ========================================

/// Filter criteria for the main dog catalog, AND-combined
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring over name, breed text (raw and
    /// normalized), and the canonical id; empty matches all
    pub search: String,
    pub breed: BreedChoice,
    pub location: LocationBucket,
    /// Filter on the feed's explicit foster column
    pub foster: FosterChoice,
    /// Drop records whose adoption link is empty or the "Dog Not Found"
    /// sentinel
    pub require_adoption_link: bool,
}

impl FilterCriteria {
    /// Whether one record satisfies every criterion
    pub fn matches(&self, dog: &DogRecord) -> bool {
        if !self.search.trim().is_empty() {
            let needle = self.search.trim().to_lowercase();
            let in_name = dog.name.to_lowercase().contains(&needle);
            let in_breed = dog.breed_raw.to_lowercase().contains(&needle)
                || normalize_breed(&dog.breed_raw).to_lowercase().contains(&needle);
            let in_id = dog.id.to_lowercase().contains(&needle);
            if !in_name && !in_breed && !in_id {
                return false;
            }
        }

        if let BreedChoice::Named(wanted) = &self.breed {
            if !dog.breeds.iter().any(|sub| normalize_breed(sub) == *wanted) {
                return false;
            }
        }

        if !self.location.contains(dog.in_foster(), dog.site) {
            return false;
        }

        if !self.foster.matches(dog.foster) {
            return false;
        }

        if self.require_adoption_link && !dog.has_adoption_link() {
            return false;
        }

        true
    }
}

/// Filter a record batch, preserving input order among survivors.
///
/// Never mutates the input; returns a fresh vector of references.
pub fn filter_catalog<'a>(records: &'a [DogRecord], criteria: &FilterCriteria) -> Vec<&'a DogRecord> {
    records.iter().filter(|dog| criteria.matches(dog)).collect()
}

// ========================================
// Short posts
// ========================================

/// Filter criteria for the breed short-post review surface
#[derive(Debug, Clone, Default)]
pub struct ShortFilter {
    /// Substring over name, animal id, breed text, and post body
    pub search: String,
    /// Matched against the consolidated breed list of each post
    pub breed: BreedChoice,
    pub location: LocationBucket,
}

impl ShortFilter {
    pub fn matches(&self, post: &ShortPost) -> bool {
        if !self.search.trim().is_empty() {
            let needle = self.search.trim().to_lowercase();
            let hit = post.name.to_lowercase().contains(&needle)
                || post.animal_id.to_lowercase().contains(&needle)
                || post.breed_raw.to_lowercase().contains(&needle)
                || post.post_text.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let BreedChoice::Named(wanted) = &self.breed {
            if !split_breeds(&post.breed_raw).iter().any(|b| b == wanted) {
                return false;
            }
        }

        self.location.contains(post.in_foster(), post.site)
    }
}

/// Filter short posts, preserving input order among survivors
pub fn filter_shorts<'a>(posts: &'a [ShortPost], criteria: &ShortFilter) -> Vec<&'a ShortPost> {
    posts.iter().filter(|post| criteria.matches(post)).collect()
}

// ========================================
// Proposed changes
// ========================================

/// Filter criteria for the proposed-change review surface
#[derive(Debug, Clone, Default)]
pub struct ChangeFilter {
    /// Substring over name, animal id, comment, and proposed value
    pub search: String,
    /// Exact category, `None` = all
    pub category: Option<String>,
    /// Exact site, `None` = all (this surface has no foster split)
    pub site: Option<ShelterSite>,
}

impl ChangeFilter {
    pub fn matches(&self, change: &ProposedChange) -> bool {
        if !self.search.trim().is_empty() {
            let needle = self.search.trim().to_lowercase();
            let hit = change.name.to_lowercase().contains(&needle)
                || change.animal_id.to_lowercase().contains(&needle)
                || change.comment.to_lowercase().contains(&needle)
                || change.proposed_value.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(wanted) = &self.category {
            if change.category != *wanted {
                return false;
            }
        }

        if let Some(wanted) = self.site {
            if change.site != Some(wanted) {
                return false;
            }
        }

        true
    }
}

/// Filter proposed changes, preserving input order among survivors
pub fn filter_changes<'a>(
    changes: &'a [ProposedChange],
    criteria: &ChangeFilter,
) -> Vec<&'a ProposedChange> {
    changes.iter().filter(|change| criteria.matches(change)).collect()
}

// ========================================
// Tests
// ========================================
