//! Static label classification table.
//!
//! Rule: the label is lower-cased and tested for substring containment
//! against the keywords below, furniture first. The first table that
//! contains a match decides the class, so "floor lamp" and "wooden table"
//! both classify as [`SegmentClass::Furniture`].

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentClass {
    Floor,
    Furniture,
    Other,
}

pub const FURNITURE_KEYWORDS: &[&str] = &[
    "cabinet",
    "table",
    "chair",
    "sofa",
    "couch",
    "bed",
    "appliance",
    "desk",
    "shelf",
    "bookcase",
    "wardrobe",
    "dresser",
    "stool",
    "bench",
    "ottoman",
    "refrigerator",
    "fridge",
    "oven",
    "stove",
    "dishwasher",
    "washer",
    "counter",
    "chest",
    "cushion",
    "lamp",
    "plant",
    "pot",
    "box",
    "toilet",
    "bathtub",
    "sink",
    "television",
    "person",
];

pub const FLOOR_KEYWORDS: &[&str] = &[
    "floor",
    "ground",
    "pavement",
    "carpet",
    "rug",
    "tile",
    "wood",
    "parquet",
    "laminate",
];

/// Classify a segmentation label.
pub fn classify_label(label: &str) -> SegmentClass {
    let lower = label.to_lowercase();
    if FURNITURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        SegmentClass::Furniture
    } else if FLOOR_KEYWORDS.iter().any(|k| lower.contains(k)) {
        SegmentClass::Floor
    } else {
        SegmentClass::Other
    }
}
