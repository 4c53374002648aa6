mod common;

use common::init_logging;
use common::synthetic_scene::SyntheticRoom;
use floor_compositor::homography::{apply_homography, invert_homography};
use floor_compositor::image::{BinaryMask, ImageF32, RgbImageU8};
use floor_compositor::masks::morphology::{close, open};
use floor_compositor::masks::largest_component;
use floor_compositor::{
    build_masks, composite, compute_illumination, estimate_homography, fit_floor_plane,
    refine_occlusion_mask, HomographySource, Material, PatternKind, PatternParams, PlankSize,
};
use nalgebra::Matrix3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn stage_functions_chain_by_hand() {
    init_logging();
    let room = SyntheticRoom::default();
    let (w, h) = (room.w, room.h);
    let photo = room.photo();
    let depth = room.depth();

    let masks = build_masks(&room.segments(), w, h);
    let plane = fit_floor_plane(&depth, &masks.floor, w, h).unwrap();
    let hmtx = estimate_homography(HomographySource::Plane {
        plane: &plane,
        width: w,
        height: h,
    })
    .unwrap();
    let illum = compute_illumination(&photo, &masks.floor, w, h).unwrap();
    let occluder = refine_occlusion_mask(&masks.floor, &masks.furniture, &depth, &plane, 0.1).unwrap();

    assert!(masks.furniture.is_subset_of(&occluder));
    let (lo, hi) = illum.min_max().unwrap();
    assert!(lo >= 0.8 - 1e-6 && hi <= 1.2 + 1e-6);

    let out = composite(
        &photo,
        &hmtx,
        &illum,
        &masks.floor,
        &occluder,
        &Material::solid("oak", [168, 124, 82]),
        &PatternParams::default(),
    )
    .unwrap();
    assert_eq!((out.w, out.h), (w, h));
    for y in 0..h {
        for x in 0..w {
            if !masks.floor.is_set(x, y) || occluder.is_set(x, y) {
                assert_eq!(out.get(x, y), photo.get(x, y));
            }
        }
    }
}

#[test]
fn dlt_homographies_round_trip() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        // Random convex-ish quad around a 100×100 square.
        let src: Vec<[f64; 2]> = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]
            .iter()
            .map(|p| [p[0] + rng.gen_range(-15.0..15.0), p[1] + rng.gen_range(-15.0..15.0)])
            .collect();
        let dst = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let hmtx = estimate_homography(HomographySource::Correspondences {
            src: &src,
            dst: &dst,
        })
        .unwrap();
        let inv = invert_homography(&hmtx).unwrap();
        for _ in 0..10 {
            let p = [rng.gen_range(0.0..100.0f32), rng.gen_range(0.0..100.0f32)];
            let q = apply_homography(&hmtx, p).unwrap();
            let back = apply_homography(&inv, q).unwrap();
            assert!((back[0] - p[0]).abs() < 1e-2 && (back[1] - p[1]).abs() < 1e-2);
        }
    }
}

#[test]
fn morphology_and_components_hold_on_random_masks() {
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..8 {
        let m = BinaryMask::from_fn(31, 17, |_, _| rng.gen_bool(0.5));
        let opened = open(&m, 1);
        let closed = close(&m, 1);
        assert!(opened.is_subset_of(&m));
        assert!(m.is_subset_of(&closed));
        let once = largest_component(&m);
        assert_eq!(largest_component(&once), once);
    }
}

#[test]
fn solid_scenario_holds_for_every_pattern() {
    let photo = RgbImageU8::filled(4, 4, [12, 200, 90]);
    let floor = BinaryMask::full(4, 4);
    let furniture = BinaryMask::new(4, 4);
    let illum = ImageF32::filled(4, 4, 1.0);
    let material = Material::solid("grey", [128, 128, 128]);
    for kind in PatternKind::ALL {
        // 8×8 planks keep every pixel centre clear of the seam band; default planks darken the edge columns.
        let params = PatternParams {
            kind,
            plank_size: PlankSize {
                length: 8.0,
                width: 8.0,
            },
            ..Default::default()
        };
        let out = composite(
            &photo,
            &Matrix3::identity(),
            &illum,
            &floor,
            &furniture,
            &material,
            &params,
        )
        .unwrap();
        assert!(out.data.iter().all(|p| *p == [128, 128, 128]), "{kind:?}");
    }
}
