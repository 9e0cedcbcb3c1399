//! Floorplan CLI
//!
//! Usage:
//!   floorplan [OPTIONS] [FILE]
//!
//! Reads a floor plan (TOML or JSON) from FILE or stdin and writes SVG or
//! the resolved layout as JSON. Resolution problems are reported on stderr
//! and do not stop rendering unless `--strict` is given.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use floorplan::layout::lint;
use floorplan::{
    layout_source, render_svg, LayoutConfig, LayoutResult, OriginPolicy, PlanFormat, RenderConfig,
    RenderError, SvgConfig, Stylesheet,
};

#[derive(Parser)]
#[command(name = "floorplan")]
#[command(about = "Resolve anchor-attached floor plans and render them to SVG")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Input format; guessed from the file extension when omitted
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Maximum number of resolution passes
    #[arg(long, default_value_t = 20)]
    max_iterations: usize,

    /// What to do when no room attaches to the origin
    #[arg(long, value_enum, default_value_t = OriginArg::Warn)]
    origin_policy: OriginArg,

    /// Viewport padding as a fraction of the larger plan dimension
    #[arg(long)]
    padding: Option<f64>,

    /// Output pixels per plan unit
    #[arg(long)]
    scale: Option<f64>,

    /// Report openings past their wall and overlapping parts
    #[arg(long)]
    lint: bool,

    /// Exit with status 2 when any resolution error was recorded
    #[arg(long)]
    strict: bool,

    /// Debug mode: log resolved rectangles and draw shared edges
    #[arg(short, long)]
    debug: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Toml,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OriginArg {
    Ignore,
    Warn,
    Require,
}

impl From<OriginArg> for OriginPolicy {
    fn from(arg: OriginArg) -> Self {
        match arg {
            OriginArg::Ignore => OriginPolicy::Ignore,
            OriginArg::Warn => OriginPolicy::Warn,
            OriginArg::Require => OriginPolicy::Require,
        }
    }
}

fn init_tracing(verbose: u8, debug: bool) {
    let verbose = if debug { verbose.max(2) } else { verbose };
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(format!("floorplan={level}")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => Stylesheet::default().merged_with(s),
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                return ExitCode::from(1);
            }
        },
        None => Stylesheet::default(),
    };

    let (source, filename) = match read_input(cli.input.as_deref()) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(1);
        }
    };

    let format = match cli.input_format {
        Some(InputFormat::Toml) => PlanFormat::Toml,
        Some(InputFormat::Json) => PlanFormat::Json,
        None => PlanFormat::from_extension(
            cli.input
                .as_deref()
                .and_then(Path::extension)
                .and_then(|e| e.to_str()),
        ),
    };

    let mut layout_config = LayoutConfig::default()
        .with_max_iterations(cli.max_iterations)
        .with_origin_policy(cli.origin_policy.into());
    if let Some(padding) = cli.padding {
        layout_config = layout_config.with_padding_ratio(padding);
    }
    let mut svg_config = SvgConfig::default().with_debug(cli.debug);
    if let Some(scale) = cli.scale {
        svg_config = svg_config.with_scale(scale);
    }
    let config = RenderConfig::new()
        .with_layout(layout_config)
        .with_svg(svg_config)
        .with_stylesheet(stylesheet)
        .with_format(format)
        .with_debug(cli.debug);

    let result = match layout_source(&source, &config) {
        Ok(result) => result,
        Err(RenderError::Load(errors)) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    if cli.lint {
        let warnings = lint::check(&result);
        for warning in &warnings {
            warn!("{}", warning);
        }
        info!(count = warnings.len(), "lint finished");
    }

    let output = match cli.format {
        OutputFormat::Svg => render_svg(&result, &config.svg, &config.stylesheet),
        OutputFormat::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: failed to serialize layout: {}", e);
                return ExitCode::from(1);
            }
        },
    };

    if let Err(message) = write_output(cli.output.as_deref(), &output) {
        eprintln!("{}", message);
        return ExitCode::from(1);
    }

    exit_status(&result, cli.strict)
}

fn read_input(path: Option<&Path>) -> Result<(String, String), String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(|content| (content, path.display().to_string()))
            .map_err(|e| format!("Error reading file '{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map(|_| (buffer, "<stdin>".to_string()))
                .map_err(|e| format!("Error reading from stdin: {}", e))
        }
    }
}

fn write_output(path: Option<&Path>, output: &str) -> Result<(), String> {
    match path {
        Some(path) => fs::write(path, output)
            .map_err(|e| format!("Error writing file '{}': {}", path.display(), e)),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}

fn exit_status(result: &LayoutResult, strict: bool) -> ExitCode {
    if strict && result.has_errors() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
