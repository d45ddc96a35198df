use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use casemk_core::config::{CaseConfig, LabelDirection};
use casemk_core::{
    CaseLayout, LayoutRequest, SlotLayout, assemble_case, case_envelope,
    compute_layout, layout_to_json, parse_dimensions, parse_footprint, parse_items, write_scad,
};
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "casemk",
    about = "Generate divided storage case OpenSCAD models for 3D printing",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the layout, assemble the case and write a .scad file
    Build(BuildArgs),
    /// Layout-only export: compute slot placements and print them as JSON
    Layout(LayoutArgs),
}

#[derive(Args, Debug, Clone)]
struct BuildArgs {
    #[command(flatten)]
    case: CaseArgs,
    /// Output .scad file (suffix is forced to .scad)
    #[arg(short, long, default_value = "case.scad", help_heading = "Output")]
    output: PathBuf,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Output")]
    dry_run: bool,
}

#[derive(Args, Debug, Clone)]
struct LayoutArgs {
    #[command(flatten)]
    case: CaseArgs,
    /// Write the layout JSON to this file instead of stdout
    #[arg(long, help_heading = "Output")]
    json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("what").required(true).args(["item", "items"])))]
struct CaseArgs {
    // Items
    /// Single item dimensions WxLxH (e.g. 30x20x15); use --count for an exact slot count
    #[arg(long, help_heading = "Items")]
    item: Option<String>,
    /// Number of slots in single item mode; omitted = fill the footprint
    #[arg(long, requires = "item", help_heading = "Items")]
    count: Option<usize>,
    /// Multiple items: "30x20x15:4, 40x30x20:2(LABEL)" (dims:count(label) per item)
    #[arg(long, help_heading = "Items")]
    items: Option<String>,

    // Footprint
    /// Max footprint WxL in mm
    #[arg(long, default_value = "350x300", help_heading = "Footprint")]
    max: String,
    /// Fixed outer case dimensions WxL in mm (overrides --max)
    #[arg(long, help_heading = "Footprint")]
    case_size: Option<String>,
    /// YAML config file path (fields present in the file override flags)
    #[arg(long, help_heading = "Footprint")]
    config: Option<PathBuf>,

    // Walls
    /// Clearance per dimension in mm
    #[arg(long, default_value_t = 1.5, help_heading = "Walls")]
    clearance: f64,
    /// Wall thickness in mm
    #[arg(long, default_value_t = 2.0, help_heading = "Walls")]
    wall: f64,
    /// Divider thickness in mm
    #[arg(long, default_value_t = 1.5, help_heading = "Walls")]
    divider: f64,
    /// Base/floor height in mm
    #[arg(long, default_value_t = 2.0, help_heading = "Walls")]
    base: f64,
    /// Corner radius in mm, 0 = sharp
    #[arg(long, default_value_t = 0.0, help_heading = "Walls")]
    corner_radius: f64,

    // Stacking
    /// Add lip and foot for stacking cases
    #[arg(long, default_value_t = false, help_heading = "Stacking")]
    stackable: bool,
    /// Stack lip inner extent in mm
    #[arg(long, default_value_t = 2.0, help_heading = "Stacking")]
    stack_lip: f64,
    /// Stack lip height in mm
    #[arg(long, default_value_t = 2.0, help_heading = "Stacking")]
    stack_lip_height: f64,
    /// Stack fit clearance in mm
    #[arg(long, default_value_t = 0.3, help_heading = "Stacking")]
    stack_clearance: f64,

    // Labels
    /// Label area size WxL in mm for items with (LABEL) in --items
    #[arg(long, help_heading = "Labels")]
    label_size: Option<String>,
    /// Label placement: right | below (x / y accepted)
    #[arg(long, default_value = "right", help_heading = "Labels")]
    label_dir: String,
    /// Label text font size in mm
    #[arg(long, default_value_t = 4.0, help_heading = "Labels")]
    label_text_size: f64,
    /// Label engrave depth into the top surface in mm
    #[arg(long, default_value_t = 0.5, help_heading = "Labels")]
    label_text_depth: f64,

    /// Print the merged configuration (after flags/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Output")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Output")]
    print_config_format: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let result = match &cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Layout(args) => run_layout(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run_build(args: &BuildArgs) -> anyhow::Result<()> {
    let Some(cfg) = resolve_config(&args.case)? else {
        return Ok(());
    };
    let start = Instant::now();
    let layout = run_layout_engine(&args.case, &cfg)?;
    let stats = layout.stats();
    info!(elapsed = ?start.elapsed(), "{}", stats.summary());

    let env = case_envelope(&layout, &cfg);
    info!(
        width = env.width,
        length = env.length,
        height = env.height,
        "case envelope"
    );
    if args.dry_run {
        println!(
            "Dry run: {} slots, case {:.2}x{:.2}x{:.2}mm",
            stats.num_slots, env.width, env.length, env.height
        );
        return Ok(());
    }

    let case = assemble_case(&layout, &cfg);
    debug!(nodes = case.node_count(), "assembled case");
    let output = scad_path(&args.output);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    write_scad(&case, &output).with_context(|| format!("write {}", output.display()))?;
    println!("Wrote {} ({} slots)", output.display(), stats.num_slots);
    Ok(())
}

fn run_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let Some(cfg) = resolve_config(&args.case)? else {
        return Ok(());
    };
    let layout = run_layout_engine(&args.case, &cfg)?;
    info!("{}", layout.stats().summary());
    let text = serde_json::to_string_pretty(&layout_to_json(&layout, &cfg))?;
    match &args.json {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {} ({} slots)", path.display(), layout.slots().len());
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Builds and validates the configuration. `None` means it was printed and the
/// command is done.
fn resolve_config(args: &CaseArgs) -> anyhow::Result<Option<CaseConfig>> {
    let cfg = build_config(args).context("Config error")?;
    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(None);
    }
    Ok(Some(cfg))
}

fn build_config(args: &CaseArgs) -> anyhow::Result<CaseConfig> {
    let label_direction: LabelDirection = args
        .label_dir
        .parse()
        .map_err(|_| anyhow::anyhow!("label direction must be right or below, got {}", args.label_dir))?;
    let mut cfg = CaseConfig {
        max_footprint: parse_footprint(&args.max)?,
        case_size: args.case_size.as_deref().map(parse_footprint).transpose()?,
        clearance: args.clearance,
        wall_thickness: args.wall,
        divider_thickness: args.divider,
        base_height: args.base,
        corner_radius: args.corner_radius,
        stackable: args.stackable,
        stack_lip_inner: args.stack_lip,
        stack_lip_height: args.stack_lip_height,
        stack_clearance: args.stack_clearance,
        label_size: args.label_size.as_deref().map(parse_footprint).transpose()?,
        label_direction,
        label_text_size: args.label_text_size,
        label_text_depth: args.label_text_depth,
    };
    if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.into_case_config(cfg)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run_layout_engine(args: &CaseArgs, cfg: &CaseConfig) -> anyhow::Result<CaseLayout> {
    let request = match (&args.item, &args.items) {
        (Some(item), _) => LayoutRequest::Single {
            dims: parse_dimensions(item).context("Layout error")?,
            count: args.count,
        },
        (None, Some(items)) => LayoutRequest::Mixed(parse_items(items).context("Layout error")?),
        (None, None) => anyhow::bail!("Specify --item or --items"),
    };
    compute_layout(&request, cfg).map_err(|e| {
        let kind = if e.is_config() {
            "Config error"
        } else {
            "Layout error"
        };
        anyhow::Error::new(e).context(kind)
    })
}

fn scad_path(p: &Path) -> PathBuf {
    let is_scad = p
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("scad"));
    if is_scad {
        p.to_path_buf()
    } else {
        p.with_extension("scad")
    }
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
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    max_footprint: Option<(f64, f64)>,
    case_size: Option<(f64, f64)>,
    clearance: Option<f64>,
    wall_thickness: Option<f64>,
    divider_thickness: Option<f64>,
    base_height: Option<f64>,
    corner_radius: Option<f64>,
    stackable: Option<bool>,
    stack_lip_inner: Option<f64>,
    stack_lip_height: Option<f64>,
    stack_clearance: Option<f64>,
    label_size: Option<(f64, f64)>,
    label_direction: Option<String>,
    label_text_size: Option<f64>,
    label_text_depth: Option<f64>,
}

impl YamlConfig {
    fn into_case_config(self, mut cfg: CaseConfig) -> anyhow::Result<CaseConfig> {
        if let Some(v) = self.max_footprint {
            cfg.max_footprint = v;
        }
        if let Some(v) = self.case_size {
            cfg.case_size = Some(v);
        }
        if let Some(v) = self.clearance {
            cfg.clearance = v;
        }
        if let Some(v) = self.wall_thickness {
            cfg.wall_thickness = v;
        }
        if let Some(v) = self.divider_thickness {
            cfg.divider_thickness = v;
        }
        if let Some(v) = self.base_height {
            cfg.base_height = v;
        }
        if let Some(v) = self.corner_radius {
            cfg.corner_radius = v;
        }
        if let Some(v) = self.stackable {
            cfg.stackable = v;
        }
        if let Some(v) = self.stack_lip_inner {
            cfg.stack_lip_inner = v;
        }
        if let Some(v) = self.stack_lip_height {
            cfg.stack_lip_height = v;
        }
        if let Some(v) = self.stack_clearance {
            cfg.stack_clearance = v;
        }
        if let Some(v) = self.label_size {
            cfg.label_size = Some(v);
        }
        if let Some(v) = self.label_direction {
            cfg.label_direction = v.parse().map_err(|_| {
                anyhow::anyhow!("label_direction must be right or below, got {}", v)
            })?;
        }
        if let Some(v) = self.label_text_size {
            cfg.label_text_size = v;
        }
        if let Some(v) = self.label_text_depth {
            cfg.label_text_depth = v;
        }
        Ok(cfg)
    }
}
