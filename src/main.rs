use floor_compositor::compositor::Material;
use floor_compositor::image::{DepthMap, RgbImageU8};
use floor_compositor::types::{PatternKind, PatternParams, SegmentMask, SegmentationResult};
use floor_compositor::{CompositorParams, FloorCompositor};

fn main() {
    // Demo stub: synthetic room with a tilted floor and one box on it.
    let (w, h) = (320usize, 240usize);
    let horizon = h / 3;
    let mut photo = RgbImageU8::filled(w, h, [200, 200, 210]);
    let mut depth = DepthMap::new(w, h);
    let mut floor = vec![0u8; w * h];
    let mut table = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if y >= horizon {
                floor[i] = 255;
                let shade = (90 + y / 4) as u8;
                photo.set(x, y, [shade, shade - 10, shade - 30]);
                depth.data[i] = 8.0 - 0.02 * y as f32;
            } else {
                depth.data[i] = 10.0;
            }
            if (140..180).contains(&x) && (150..200).contains(&y) {
                table[i] = 255;
                depth.data[i] -= 1.0;
                photo.set(x, y, [60, 40, 30]);
            }
        }
    }
    let segments = vec![
        SegmentationResult {
            label: "floor".into(),
            score: 0.97,
            mask: SegmentMask::Intensity {
                width: w,
                height: h,
                data: floor,
            },
        },
        SegmentationResult {
            label: "table".into(),
            score: 0.91,
            mask: SegmentMask::Intensity {
                width: w,
                height: h,
                data: table,
            },
        },
    ];

    let compositor = FloorCompositor::new(CompositorParams::default());
    let (scene, report) = match compositor.prepare_with_report(photo, &segments, &depth) {
        Ok(prepared) => prepared,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    println!("{}", report.summary());

    let material = Material::solid("walnut", [120, 82, 54]);
    for kind in PatternKind::ALL {
        let scene = scene.clone().with_pattern(PatternParams {
            kind,
            ..Default::default()
        });
        match compositor.render(&scene, &material) {
            Ok(out) => {
                let changed = out
                    .data
                    .iter()
                    .zip(&scene.photo.data)
                    .filter(|(a, b)| a != b)
                    .count();
                println!("{kind:?}: {changed} pixels shaded");
            }
            Err(err) => eprintln!("{kind:?}: {err}"),
        }
    }
}
