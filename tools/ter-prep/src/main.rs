//! ter-prep: BeamNG terrain (.ter) export/import tool.
//!
//! Usage:
//!   ter-prep export --input scene.json --output level.ter
//!   ter-prep import --input level_Hills.ter --output scene.json
//!   ter-prep info --input level.ter
//!   ter-prep synthetic --output demo.ter --size 256 --seed 7

use std::path::PathBuf;
use std::process;

use log::{error, info};

use ter_core::constants::{FORMAT_VERSION, HEIGHT_SCALE};
use ter_core::{TerError, TerResult};
use ter_terrain::{export_meshes, import_terrain, read_ter, synthetic, write_ter, Scene};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "export" => cmd_export(&args[2..]),
        "import" => cmd_import(&args[2..]),
        "info" => cmd_info(&args[2..]),
        "synthetic" => cmd_synthetic(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            error!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "ter-prep: BeamNG terrain (.ter) conversion tool\n\
         \n\
         Commands:\n\
         \n\
         export    Write one .ter file per mesh object in a scene\n\
         \n\
           --input <path>     Scene JSON file\n\
           --output <path>    Target .ter path; object names are appended\n\
         \n\
         import    Add a .ter file to a scene as a new mesh object\n\
         \n\
           --input <path>     .ter file to import\n\
           --output <path>    Scene JSON file (created if missing)\n\
         \n\
         info      Print the header and material table of a .ter file\n\
         \n\
           --input <path>     .ter file\n\
         \n\
         synthetic Generate a demo terrain\n\
         \n\
           --output <path>    Output .ter file path\n\
           --size <N>         Grid size (default: 256)\n\
           --seed <S>         Random seed (default: 1)\n\
         \n\
         Set RUST_LOG=debug for conversion details.\n"
    );
}

/// Value following `flag`, if present.
fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn required_path(args: &[String], flag: &str) -> TerResult<PathBuf> {
    parse_flag(args, flag)
        .map(PathBuf::from)
        .ok_or_else(|| invalid_input(format!("{flag} <path> is required")))
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> TerResult<T> {
    match parse_flag(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid_input(format!("{flag} expects a number, got {raw:?}"))),
        None => Ok(default),
    }
}

fn invalid_input(msg: String) -> TerError {
    TerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, msg))
}

// --- Export command ---

fn cmd_export(args: &[String]) -> TerResult<()> {
    let input = required_path(args, "--input")?;
    let output = required_path(args, "--output")?;

    info!("Loading scene {}...", input.display());
    let scene = Scene::load(&input)?;

    let report = export_meshes(&scene, &output)?;
    info!(
        "Done! {} terrain file(s) written, {} failed",
        report.written.len(),
        report.failed.len()
    );
    for (name, e) in &report.failed {
        error!("Terrain data preparation failed for {name}: {e}");
    }

    report.ensure_any_written()?;
    Ok(())
}

// --- Import command ---

fn cmd_import(args: &[String]) -> TerResult<()> {
    let input = required_path(args, "--input")?;
    let output = required_path(args, "--output")?;

    let mut scene = Scene::load_or_default(&output)?;
    let name = import_terrain(&mut scene, &input)?;
    scene.save(&output)?;

    info!("Done! Added '{name}' to {}", output.display());
    Ok(())
}

// --- Info command ---

fn cmd_info(args: &[String]) -> TerResult<()> {
    let input = required_path(args, "--input")?;
    let doc = read_ter(&input)?;

    println!("File:      {}", input.display());
    println!(
        "Version:   {}{}",
        doc.version,
        if doc.version == FORMAT_VERSION {
            ""
        } else {
            " (unrecognized)"
        }
    );
    println!("Size:      {0}x{0} ({1} cells)", doc.size, doc.heights.len());
    if let Some((min, max)) = doc.height_range() {
        println!(
            "Heights:   {:.3}..{:.3} ({min}..{max} raw)",
            min as f32 / HEIGHT_SCALE,
            max as f32 / HEIGHT_SCALE
        );
    }
    println!("Materials: {}", doc.materials.len());
    for (i, name) in doc.materials.iter().enumerate() {
        let cells = doc.layers.iter().filter(|&&l| l as usize == i).count();
        println!("  [{i}] {name} ({cells} cells)");
    }
    Ok(())
}

// --- Synthetic terrain command ---

fn cmd_synthetic(args: &[String]) -> TerResult<()> {
    let output = parse_flag(args, "--output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("terrain_synth.ter"));
    let size: u32 = parse_number(args, "--size", 256)?;
    let seed: u64 = parse_number(args, "--seed", 1)?;

    info!("Generating {size}x{size} synthetic terrain (seed {seed})...");
    let doc = synthetic::generate(size, seed);

    info!("Writing .ter to {}...", output.display());
    write_ter(&output, &doc)?;
    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    info!("Done! Output: {} ({} bytes)", output.display(), file_size);
    Ok(())
}
