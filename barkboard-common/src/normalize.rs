//! Field normalizers
//!
//! Pure, total functions that map raw shelter-feed fields to display-ready
//! values or canonical categories. Every function here is safe to call on
//! arbitrary input: malformed values degrade to a defined fallback (`0`,
//! `None`, or unchanged passthrough) and never panic.
//!
//! The breed consolidation table and the location rules encode shelter
//! naming conventions observed in the live feed. Rule order is significant
//! and deliberate: rules are tested top to bottom, first match wins, so
//! specific rules (labrador, german shepherd) sit above their generic
//! cousins (retriever, shepherd).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::{Gender, SizeCategory};

// ========================================
// Breed consolidation
// ========================================

/// Ordered consolidation rules: (lowercase keywords, canonical display name).
///
/// First match wins. The generic terrier/retriever/shepherd rules must stay
/// below the specific breeds that contain those words, and the mixed-breed
/// rule must stay below every "<breed> mix" phrasing it would otherwise
/// swallow.
const BREED_RULES: &[(&[&str], &str)] = &[
    (
        &["pit bull", "pitbull", "american pit bull", "staffordshire"],
        "Pit Bull / Staffordshire",
    ),
    (&["boxer"], "Boxer"),
    (&["labrador", "lab mix"], "Labrador Retriever"),
    (&["german shepherd"], "German Shepherd"),
    (&["husky", "alaskan malamute"], "Husky / Northern Breed"),
    (&["bulldog"], "Bulldog"),
    (&["belgian malinois", "belgian shepherd"], "Belgian Malinois"),
    (&["rottweiler"], "Rottweiler"),
    (&["cane corso"], "Cane Corso"),
    (&["border collie"], "Border Collie"),
    (&["chihuahua"], "Chihuahua"),
    (&["great dane"], "Great Dane"),
    (&["terrier"], "Terrier"),
    (&["retriever"], "Retriever"),
    (&["shepherd"], "Shepherd"),
    (&["mixed breed", "mix"], "Mixed Breed"),
    (&["akita"], "Akita"),
];

/// Look up a lowercased breed phrase in the consolidation table
fn consolidate(lower: &str) -> Option<&'static str> {
    BREED_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, name)| *name)
}

/// Normalize a raw breed description to its canonical display name.
///
/// Accepts either a single breed phrase or an entire comma-separated AI
/// breed description. When no rule matches, the first comma-separated
/// segment of the original string (trimmed, original casing) is returned;
/// when that is empty too, "Mixed Breed".
///
/// Display code and dropdown-option building both go through this function
/// so the two can never disagree about the same input.
pub fn normalize_breed(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    if let Some(name) = consolidate(&lower) {
        return name.to_string();
    }
    let first = raw.split(',').next().unwrap_or("").trim();
    if first.is_empty() {
        "Mixed Breed".to_string()
    } else {
        first.to_string()
    }
}

/// Split a comma-separated breed description into consolidated breed names.
///
/// Each segment is trimmed, inner whitespace collapsed, and run through the
/// consolidation table (unmatched segments keep their own text). Duplicates
/// are dropped while preserving first-seen order.
pub fn split_breeds(raw: &str) -> Vec<String> {
    static WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

    let mut seen: Vec<String> = Vec::new();
    for segment in raw.split(',') {
        let cleaned = WS.replace_all(segment.trim(), " ").trim().to_string();
        if cleaned.is_empty() {
            continue;
        }
        let name = match consolidate(&cleaned.to_lowercase()) {
            Some(canonical) => canonical.to_string(),
            None => cleaned,
        };
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

// ========================================
// Location formatting
// ========================================

static CAT_KENNEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Cat Holding \((\d+)\) (\d+)").unwrap());
static CAT_ROOM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Cat Hold\((\d+)\)").unwrap());
static BONDING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Bonding Rooms ([A-Z]\d+)([A-Z])").unwrap());
static HALL_DUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Hall Crate\s+Hall Crate\s+").unwrap());
static CRATE_DASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)-([A-Z])").unwrap());
static ADOPT_KENNEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z])(\d+)").unwrap());

/// Format a kennel/room pair into one display location.
///
/// The shelter encodes location structure in kennel naming conventions
/// ("ISO16", "Hold15", "Bonding Rooms A1C"). Rules are tested in order and
/// the first applicable one returns; anything unmatched falls through to
/// the default "kennel • room" join. Extraction is literal substring work,
/// never locale-aware, and never fails: a malformed code just falls through.
pub fn format_location(kennel: &str, room: &str) -> String {
    if kennel == "Foster Care" {
        return "In Foster".to_string();
    }

    // ISO16 / ISO Dogs -> ISO Dogs 16
    if room == "ISO Dogs" {
        if let Some(number) = kennel.strip_prefix("ISO") {
            return format!("ISO Dogs {number}");
        }
    }

    // IsoP16 / ISO Puppies -> ISO Puppies 16
    if room == "ISO Puppies" {
        if let Some(number) = kennel.strip_prefix("IsoP") {
            return format!("ISO Puppies {number}");
        }
    }

    // Cat Holding (79) 06 / Cat Hold(79) -> Cat Holdings (79) - 06
    if kennel.contains("Cat Holding") && room.contains("Cat Hold") {
        let kennel_caps = CAT_KENNEL_RE.captures(kennel);
        let room_caps = CAT_ROOM_RE.captures(room);
        if let (Some(kc), Some(_)) = (kennel_caps, room_caps) {
            return format!("Cat Holdings ({}) - {}", &kc[1], &kc[2]);
        }
    }

    // Hold15 / Dog Hold -> Dog Holding 15
    if room == "Dog Hold" {
        if let Some(number) = kennel.strip_prefix("Hold") {
            return format!("Dog Holding {number}");
        }
    }

    // Bonding Rooms A1C -> Bonding Rooms A1 - C
    if kennel.starts_with("Bonding Rooms") && (room == "Bonding Rooms" || room.is_empty()) {
        if let Some(caps) = BONDING_RE.captures(kennel) {
            return format!("Bonding Rooms {} - {}", &caps[1], &caps[2]);
        }
        return kennel.to_string();
    }

    // Hall Crate Hall Crate 34-B -> Hall Crate 34 - B
    if kennel.contains("Hall Crate") && (room == "Hall Crate" || room.is_empty()) {
        let cleaned = HALL_DUP_RE.replace(kennel, "Hall Crate ");
        return CRATE_DASH_RE.replace_all(&cleaned, "$1 - $2").to_string();
    }

    // C39 / Adopt Dogs -> C - 39
    if room.contains("Adopt Dogs") && ADOPT_KENNEL_RE.is_match(kennel) {
        return ADOPT_KENNEL_RE.replace(kennel, "$1 - $2").to_string();
    }

    if !room.is_empty() && room != kennel {
        return format!("{kennel} • {room}");
    }
    kennel.to_string()
}

// ========================================
// Age parsing
// ========================================

/// Parse a free-text age description into total months.
///
/// Best-effort and deliberately permissive: the feed writes "2 yr 3 mo",
/// "2 yr", "6 mo", sometimes bare numbers. The first number counts as years
/// unless its unit token starts with "mo"; a second number counts as
/// months. Anything unparseable is 0 months, never an error.
pub fn parse_age_months(age: &str) -> u32 {
    static AGE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*([A-Za-z]*)").unwrap());

    let mut years: u32 = 0;
    let mut months: u32 = 0;
    let mut saw_leading = false;
    for caps in AGE_TOKEN_RE.captures_iter(age) {
        let value: u32 = caps[1].parse().unwrap_or(0);
        let unit = caps[2].to_lowercase();
        if unit.starts_with("mo") {
            months = value;
        } else if unit.starts_with('y') || !saw_leading {
            years = value;
            saw_leading = true;
        } else {
            months = value;
        }
    }
    years.saturating_mul(12).saturating_add(months)
}

// ========================================
// Size category
// ========================================

/// Bucket a weight in pounds into a size category.
///
/// Boundaries are inclusive: 25 lb is still Small, 60 lb is still Medium.
pub fn size_category(weight_lbs: f64) -> SizeCategory {
    if weight_lbs <= 25.0 {
        SizeCategory::Small
    } else if weight_lbs <= 60.0 {
        SizeCategory::Medium
    } else {
        SizeCategory::Large
    }
}

// ========================================
// Image URLs
// ========================================

/// Resolve a raw photo field to a fetchable URL.
///
/// Empty, whitespace-only, and the literal "N/A" yield `None`. Petango CDN
/// links pass through unchanged. Google Drive share links are rewritten to
/// their direct-content form; a share link whose file id cannot be found
/// yields `None`. Everything else passes through trimmed and opaque.
pub fn resolve_image_url(raw: &str) -> Option<String> {
    static DRIVE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").unwrap());

    let url = raw.trim();
    if url.is_empty() || url == "N/A" {
        return None;
    }
    if url.contains("petango.com") {
        return Some(url.to_string());
    }
    if url.contains("drive.google.com") {
        return DRIVE_ID_RE
            .captures(url)
            .map(|caps| format!("https://drive.google.com/uc?id={}", &caps[1]));
    }
    Some(url.to_string())
}

// ========================================
// Gender display
// ========================================

/// Display glyph and style class for a gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenderInfo {
    pub glyph: &'static str,
    pub css_class: &'static str,
}

/// Glyph/style pair for a gender, or `None` when nothing should render.
///
/// Unknown gender gets no default icon.
pub fn gender_info(gender: Gender) -> Option<GenderInfo> {
    match gender {
        Gender::Male => Some(GenderInfo {
            glyph: "♂",
            css_class: "gender-male",
        }),
        Gender::Female => Some(GenderInfo {
            glyph: "♀",
            css_class: "gender-female",
        }),
        Gender::Unknown => None,
    }
}

// ========================================
// Name hygiene
// ========================================

/// Strip trailing foster annotations from a display name.
///
/// The feed appends markers like "Rex - in foster", "Rex (foster)",
/// "Rex [foster]" when a dog moves to a foster home. Matching is
/// case-insensitive and only touches the end of the name.
pub fn clean_name(name: &str) -> String {
    static SUFFIX_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"(?i)\s*-\s*in\s+foster\s*$",
            r"(?i)\s*-\s*foster\s*$",
            r"(?i)\s*\(foster\)\s*$",
            r"(?i)\s*\[foster\]\s*$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
    });

    let mut cleaned = name.to_string();
    for re in SUFFIX_RES.iter() {
        cleaned = re.replace(&cleaned, "").to_string();
    }
    cleaned.trim().to_string()
}

// ========================================
// Level badge
// ========================================

/// Style class for a handling-level badge.
///
/// Levels run 1 (easiest) to 3; anything else renders neutral.
pub fn level_style(level: Option<u8>) -> &'static str {
    match level {
        Some(1) => "level-green",
        Some(2) => "level-yellow",
        Some(3) => "level-red",
        _ => "level-gray",
    }
}

// ========================================
// Tests
// ========================================
