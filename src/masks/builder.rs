use super::components::largest_component;
use super::decode::decode_segment_mask;
use super::morphology::{close, despeckle};
use super::vocabulary::{classify_label, SegmentClass};
use super::MaskOptions;
use crate::image::{BinaryMask, ImageViewMut, MASK_ON};
use crate::types::SegmentationResult;
use serde::Serialize;

/// Floor and furniture masks produced from a segmentation result list.
#[derive(Clone, Debug)]
pub struct SceneMasks {
    pub floor: BinaryMask,
    pub furniture: BinaryMask,
    pub stats: MaskBuildStats,
}

/// Bookkeeping for diagnostics.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskBuildStats {
    pub floor_segments: usize,
    pub furniture_segments: usize,
    pub other_segments: usize,
    pub low_score_segments: usize,
    pub skipped_segments: usize,
    pub used_floor_fallback: bool,
}

/// Build the floor / furniture mask pair with default options.
pub fn build_masks(segments: &[SegmentationResult], width: usize, height: usize) -> SceneMasks {
    build_masks_with(segments, width, height, &MaskOptions::default())
}

/// Build the floor / furniture mask pair.
///
/// Floor: union of floor-classified segments, despeckled, reduced to the
/// largest 4-connected component. Furniture: union of furniture-classified
/// segments closed with a 3×3 element. When no floor pixel survives, the
/// bottom band `(y + 0.5) / height > fallback_floor_start` becomes the floor.
pub fn build_masks_with(
    segments: &[SegmentationResult],
    width: usize,
    height: usize,
    options: &MaskOptions,
) -> SceneMasks {
    let mut floor = BinaryMask::new(width, height);
    let mut furniture = BinaryMask::new(width, height);
    let mut stats = MaskBuildStats::default();

    for (index, segment) in segments.iter().enumerate() {
        let class = classify_label(&segment.label);
        if class == SegmentClass::Other {
            stats.other_segments += 1;
            continue;
        }
        if segment.score < options.min_score {
            stats.low_score_segments += 1;
            continue;
        }
        let decoded = match decode_segment_mask(&segment.mask, width, height, options.threshold) {
            Ok(mask) => mask,
            Err(issue) => {
                log::warn!(
                    "build_masks: skipping segment #{index} '{}': {issue}",
                    segment.label
                );
                stats.skipped_segments += 1;
                continue;
            }
        };
        let (target, counter) = match class {
            SegmentClass::Floor => (&mut floor, &mut stats.floor_segments),
            _ => (&mut furniture, &mut stats.furniture_segments),
        };
        match target.union_with(&decoded) {
            Ok(()) => *counter += 1,
            Err(err) => {
                log::warn!(
                    "build_masks: skipping segment #{index} '{}': {err}",
                    segment.label
                );
                stats.skipped_segments += 1;
            }
        }
    }

    let mut floor = largest_component(&despeckle(&floor));
    if floor.count() == 0 {
        log::warn!(
            "build_masks: no floor pixels from {} segment(s), using bottom band fallback",
            segments.len()
        );
        floor = fallback_floor(width, height, options.fallback_floor_start);
        stats.used_floor_fallback = true;
    }
    let furniture = close(&furniture, 1);

    log::debug!(
        "build_masks: floor_segments={} furniture_segments={} skipped={} floor_coverage={:.3} furniture_coverage={:.3}",
        stats.floor_segments,
        stats.furniture_segments,
        stats.skipped_segments,
        floor.coverage(),
        furniture.coverage()
    );

    SceneMasks {
        floor,
        furniture,
        stats,
    }
}

/// Deterministic floor guess: every row whose centre lies below `start`
/// (as a fraction of the height) is floor.
pub fn fallback_floor(width: usize, height: usize, start: f32) -> BinaryMask {
    let mut mask = BinaryMask::new(width, height);
    for y in 0..height {
        if (y as f32 + 0.5) / height as f32 > start {
            mask.row_mut(y).fill(MASK_ON);
        }
    }
    mask
}
