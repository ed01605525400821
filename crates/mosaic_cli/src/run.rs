//! The `run` and `check` subcommands.
//!
//! Both start the same way: load `mosaic.toml`, then parse the input
//! files it names. `check` stops there and reports what it found; `run`
//! continues into the search and writes the result report.
//!
//! Paths in the configuration are resolved relative to the configuration
//! file itself, so a project can be invoked from anywhere.

use std::error::Error;
use std::path::{Path, PathBuf};

use mosaic_config::FloorplanConfig;
use mosaic_diagnostics::DiagnosticSink;
use mosaic_floorplan::{AnnealSchedule, CostWeights, FloorplanParams};
use mosaic_geom::Design;
use mosaic_parser::{parse_block_file, parse_net_file};

use crate::{GlobalArgs, RunArgs};

/// Runs the full pipeline: parse, place, anneal, write the report.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let config_path = Path::new(&global.config);
    let config = mosaic_config::load_config(config_path)?;

    let sink = DiagnosticSink::new();
    let mut design = load_design(config_path, &config, &sink)?;

    let params = FloorplanParams {
        weights: CostWeights {
            area: config.cost.area_weight,
            adjacency: config.cost.adjacency_weight,
        },
        schedule: AnnealSchedule {
            temperature: config.anneal.temperature,
            cooling: config.anneal.cooling,
            iterations: config.anneal.iterations,
            deadline: None,
        },
        seed: args.seed.or(config.anneal.seed),
    };

    let result = mosaic_floorplan::floorplan(&mut design, &params, &sink)?;

    let output = match &args.output {
        Some(path) => PathBuf::from(path),
        None => resolve(config_path, &config.files.output),
    };
    result.write_to_file(&output)?;

    report_diagnostics(&sink, global.quiet);
    if !global.quiet {
        println!(
            "placed {} of {} blocks, cost {:.4}, wirelength {:.1}",
            design.placed_count(),
            design.block_count(),
            result.cost,
            result.wirelength,
        );
        println!("wrote {}", output.display());
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Validates the configuration and parses the input files, without
/// running the search.
pub fn check(global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let config_path = Path::new(&global.config);
    let config = mosaic_config::load_config(config_path)?;

    let sink = DiagnosticSink::new();
    let design = load_design(config_path, &config, &sink)?;

    report_diagnostics(&sink, global.quiet);
    if !global.quiet {
        println!(
            "{}: {} blocks, {} terminals, {} nets, outline {}x{}",
            global.config,
            design.block_count(),
            design.terminal_count(),
            design.net_count(),
            design.outline.width,
            design.outline.height,
        );
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Parses the `.block` and `.nets` files named by the configuration.
fn load_design(
    config_path: &Path,
    config: &FloorplanConfig,
    sink: &DiagnosticSink,
) -> Result<Design, Box<dyn Error>> {
    let blocks_path = resolve(config_path, &config.files.blocks);
    let nets_path = resolve(config_path, &config.files.nets);
    let mut design = parse_block_file(&blocks_path, sink)?;
    parse_net_file(&nets_path, &mut design, sink)?;
    Ok(design)
}

/// Resolves a config-relative path against the configuration file's
/// directory. Absolute paths pass through unchanged.
fn resolve(config_path: &Path, value: &str) -> PathBuf {
    let p = Path::new(value);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(p),
        _ => p.to_path_buf(),
    }
}

/// Prints collected diagnostics to stderr. Non-errors are dropped in
/// quiet mode.
fn report_diagnostics(sink: &DiagnosticSink, quiet: bool) {
    for diag in sink.snapshot() {
        if quiet && !diag.severity.is_error() {
            continue;
        }
        eprintln!("{diag}");
    }
}
