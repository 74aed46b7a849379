use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use globset::{Glob, GlobSet, GlobSetBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use yearcollage_core::discover::collect_images;
use yearcollage_core::{CollageConfig, CollageSummary, plan_paths, run_paths};

#[derive(Parser, Debug)]
#[command(
    name = "yearcollage",
    about = "Build a single grid collage from a folder of photos",
    version,
    author
)]
struct Cli {
    #[command(flatten)]
    args: CollageArgs,
    /// Show a progress bar (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Parser, Debug, Clone)]
struct CollageArgs {
    // Input/Output
    /// Input directory containing images (searched recursively)
    #[arg(short, long, help_heading = "Input/Output")]
    input: Option<PathBuf>,
    /// Output collage file path (.png writes PNG, anything else JPEG)
    #[arg(short, long, help_heading = "Input/Output")]
    output: Option<PathBuf>,
    /// YAML config file; flags given on the command line override it
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Target tile aspect ratio, e.g. 1:1, 3:2, 4:3 [default: 1:1]
    #[arg(long, help_heading = "Layout")]
    tile_aspect: Option<String>,
    /// Tile width in pixels [default: 400]
    #[arg(long, help_heading = "Layout")]
    tile_width: Option<u32>,
    /// Number of columns in the collage grid [default: 20]
    #[arg(long, allow_negative_numbers = true, help_heading = "Layout")]
    columns: Option<i64>,
    /// Target collage aspect ratio, e.g. 16:9 (overrides --tile-aspect and --columns)
    #[arg(long, help_heading = "Layout")]
    collage_aspect: Option<String>,
    /// Sort order: time | name | exif [default: time]
    #[arg(long, help_heading = "Layout")]
    sort: Option<String>,
    /// Background for empty cells as hex RRGGBB or RRGGBBAA [default: 00000000]
    #[arg(long, help_heading = "Layout")]
    background: Option<String>,

    // Export
    /// Export the run summary (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_summary: Option<PathBuf>,
    /// Print the merged configuration (after YAML/CLI) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute the layout but do not decode or write anything
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    run_collage(&cli.args, cli.progress && !cli.quiet)
}

fn run_collage(args: &CollageArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = merge_config(args)?;

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    cfg.validate()?;
    cfg.resolve_layout()?;

    let paths = gather_paths(&cfg.input_dir, &args.include, &args.exclude)?;
    if paths.is_empty() {
        anyhow::bail!("no images found in {}", cfg.input_dir.display());
    }

    let summary = if args.dry_run {
        let s = plan_paths(&cfg, paths)?;
        info!(
            columns = s.grid.columns,
            rows = s.grid.rows,
            width = s.canvas_width,
            height = s.canvas_height,
            "dry run: nothing written"
        );
        s
    } else {
        let bar = progress_bar(paths.len(), show_progress)?;
        let s = run_paths(&cfg, paths, |_, p| {
            if let Some(b) = &bar {
                let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
                b.set_message(msg.to_string());
                b.inc(1);
            }
        })
        .context("yearcollage failed")?;
        if let Some(b) = &bar {
            b.finish_and_clear();
        }
        s
    };

    info!("{}", summary.summary());
    if let Some(path) = &args.export_summary {
        write_summary(path, &summary)?;
    }
    Ok(())
}

/// Defaults, then the YAML file (if any), then explicit flags.
fn merge_config(args: &CollageArgs) -> anyhow::Result<CollageConfig> {
    let mut cfg = if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_yaml::from_str::<CollageConfig>(&file)
            .with_context(|| format!("parse config {}", path.display()))?
    } else {
        CollageConfig::default()
    };

    if let Some(v) = &args.input {
        cfg.input_dir = v.clone();
    }
    if let Some(v) = &args.output {
        cfg.output = v.clone();
    }
    if let Some(v) = &args.tile_aspect {
        cfg.tile_aspect = v.clone();
    }
    if let Some(v) = args.tile_width {
        cfg.tile_width = v;
    }
    if let Some(v) = args.columns {
        cfg.columns = v;
    }
    if let Some(v) = &args.collage_aspect {
        cfg.collage_aspect = Some(v.clone());
    }
    if let Some(v) = &args.sort {
        cfg.sort = v.clone();
    }
    if let Some(v) = &args.background {
        cfg.background = parse_background(v)?;
    }
    Ok(cfg)
}

fn parse_background(s: &str) -> anyhow::Result<[u8; 4]> {
    let hex = s.trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("invalid background {:?} (use RRGGBB or RRGGBBAA)", s);
    }
    let mut rgba = [0, 0, 0, 255];
    for (i, slot) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)?;
    }
    Ok(rgba)
}

fn gather_paths(root: &Path, include: &[String], exclude: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let list = collect_images(root)?
        .into_iter()
        .filter(|p| !should_skip(p, inc_set.as_ref(), exc_set.as_ref()))
        .collect();
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("invalid glob {pat:?}"))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn progress_bar(len: usize, show: bool) -> anyhow::Result<Option<ProgressBar>> {
    if !show {
        return Ok(None);
    }
    let b = ProgressBar::new(len as u64);
    b.set_style(ProgressStyle::with_template(
        "{spinner:.green} composing {pos}/{len} [{elapsed_precise}] {wide_msg}",
    )?);
    Ok(Some(b))
}

fn write_summary(path: &Path, summary: &CollageSummary) -> anyhow::Result<()> {
    let json = summary.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(?path, "summary written");
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
