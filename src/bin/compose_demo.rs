use floor_compositor::config::{compose, load_segments};
use floor_compositor::diagnostics::PreparationReport;
use floor_compositor::image::io::{
    load_rgb_image, save_grayscale_f32, save_mask, save_rgb_image, write_json_file,
};
use floor_compositor::FloorCompositor;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = compose::load_config(Path::new(&config_path))?;

    let photo = load_rgb_image(&config.photo)?;
    let segments = load_segments(&config.segments)?;
    let depth = config.depth.load()?;
    let material = config.material.load()?;

    let compositor = FloorCompositor::new(config.params);
    let (scene, report) = compositor
        .prepare_with_report(photo, &segments, &depth)
        .map_err(|e| format!("Scene preparation failed: {e}"))?;
    let scene = scene
        .with_pattern(config.pattern)
        .with_material_id(material.id.clone());
    let output = compositor
        .render(&scene, &material)
        .map_err(|e| format!("Render failed: {e}"))?;

    save_rgb_image(&output, &config.output.composite)?;
    print_summary(&report);
    println!("Composite written to {}", config.output.composite.display());

    if let Some(dir) = &config.output.debug_dir {
        save_mask(&scene.floor, &dir.join("floor_mask.png"))?;
        save_mask(&scene.furniture, &dir.join("furniture_mask.png"))?;
        save_mask(&scene.occluder, &dir.join("occluder_mask.png"))?;
        save_grayscale_f32(&scene.illumination, &dir.join("illumination.png"))?;
        println!("Debug artifacts written to {}", dir.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_summary(report: &PreparationReport) {
    println!("Preparation summary");
    println!(
        "  input: {}x{} segments={}",
        report.input.width, report.input.height, report.input.segments
    );
    let m = &report.masks;
    println!(
        "  masks: floor={} furniture={} other={} skipped={} fallback={} floor_cov={:.3} furniture_cov={:.3}",
        m.stats.floor_segments,
        m.stats.furniture_segments,
        m.stats.other_segments,
        m.stats.skipped_segments,
        m.stats.used_floor_fallback,
        m.floor_coverage,
        m.furniture_coverage
    );
    let p = &report.plane;
    println!(
        "  plane: ({:.4}, {:.4}, {:.4}, {:.4}) inliers={}/{} fitted={}",
        p.plane.a, p.plane.b, p.plane.c, p.plane.d, p.inliers, p.scored_points, p.fitted
    );
    let h = &report.homography.matrix;
    println!(
        "  homography ({:?}):\n    [{:.5} {:.5} {:.3}]\n    [{:.5} {:.5} {:.3}]\n    [{:.6} {:.6} {:.4}]",
        report.homography.kind,
        h[(0, 0)],
        h[(0, 1)],
        h[(0, 2)],
        h[(1, 0)],
        h[(1, 1)],
        h[(1, 2)],
        h[(2, 0)],
        h[(2, 1)],
        h[(2, 2)]
    );
    println!(
        "  illumination: blurred range [{:.4}, {:.4}] flat={}",
        report.illumination.blurred_min, report.illumination.blurred_max, report.illumination.flat
    );
    println!(
        "  occlusion: depth_occluded={} occluder_cov={:.3} blend_floor_cov={:.3}",
        report.occlusion.stats.depth_occluded,
        report.occlusion.occluder_coverage,
        report.occlusion.blend_floor_coverage
    );
    let timings: Vec<String> = report
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    println!(
        "\nTimings (ms): {} total={:.3}",
        timings.join(" "),
        report.timings.total_ms
    );
}

fn usage() -> String {
    "Usage: compose_demo <config.json>".to_string()
}
