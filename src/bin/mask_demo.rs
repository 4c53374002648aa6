use floor_compositor::config::{load_segments, masks};
use floor_compositor::image::io::{load_rgb_image, save_mask, write_json_file};
use floor_compositor::masks::build_masks_with;
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
    let config = masks::load_config(Path::new(&config_path))?;

    let photo = load_rgb_image(&config.photo)?;
    let segments = load_segments(&config.segments)?;
    let scene = build_masks_with(&segments, photo.w, photo.h, &config.masks);

    save_mask(&scene.floor, &config.output.floor_mask)?;
    save_mask(&scene.furniture, &config.output.furniture_mask)?;
    println!(
        "floor: {:.1}% ({} segments{}), furniture: {:.1}% ({} segments), skipped={}",
        scene.floor.coverage() * 100.0,
        scene.stats.floor_segments,
        if scene.stats.used_floor_fallback {
            ", fallback band"
        } else {
            ""
        },
        scene.furniture.coverage() * 100.0,
        scene.stats.furniture_segments,
        scene.stats.skipped_segments
    );
    if let Some(path) = &config.output.stats_json {
        write_json_file(path, &scene.stats)?;
        println!("Mask stats written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: mask_demo <config.json>".to_string()
}
