use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use icon_scale::cpu::ResampleFilter;
use logo_icon::assets::{background, data_uri, discover};
use logo_icon::batch;
use logo_icon::config::{GapThreshold, IconConfig, Rgb};
use logo_icon::{IconError, generate_icon, load_bitmap, save_png};
use tracing_subscriber::EnvFilter;

/// Cut the graphic mark out of a horizontal logo and turn it into a square app icon.
#[derive(Parser, Debug)]
#[command(name = "logo-icon", version)]
#[command(about = "Extract a logo's symbol and compose it onto a square icon")]
#[command(long_about = "Extract the graphic mark from a logo (mark on the left, text on the right, \
transparent background) and compose it, recolored, onto a solid square canvas.
The split between mark and text is a gap heuristic: tune --merge-gap when it picks the wrong region.")]
struct Cli {
    /// Log progress (info level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every stage decision (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one icon from one logo
    Icon(IconArgs),
    /// Build icons for many logos in parallel
    Batch(BatchArgs),
    /// Make near-white pixels transparent
    RemoveBg {
        input: PathBuf,
        output: PathBuf,
        /// Pixels with R, G and B all above this become transparent
        #[arg(short, long, default_value_t = background::DEFAULT_TOLERANCE)]
        tolerance: u8,
    },
    /// Print or write an image as a base64 data URI
    DataUri {
        input: PathBuf,
        /// Write the URI to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore an image embedded as `export const NAME = '...';` in a source file
    Restore {
        source: PathBuf,
        output: PathBuf,
        /// Name of the exported constant
        #[arg(short, long, default_value = data_uri::DEFAULT_CONSTANT)]
        name: String,
    },
}

/// Pipeline tuning shared by `icon` and `batch`.
#[derive(Args, Debug)]
struct TuningArgs {
    /// Canvas side length in pixels
    #[arg(short, long, default_value_t = 512)]
    size: u32,

    /// Canvas color: #RRGGBB, r,g,b, white or black
    #[arg(long, default_value = "#0047AB")]
    fill: Rgb,

    /// Color the symbol is redrawn in
    #[arg(long, default_value = "white")]
    stencil: Rgb,

    /// Largest share of the canvas the symbol may cover on either axis, (0, 1]
    #[arg(long, default_value_t = 0.70)]
    fraction: f64,

    /// Alpha above this value counts as visible
    #[arg(long, default_value_t = 10)]
    alpha_threshold: u8,

    /// Gap separating symbol from text: pixels (20, 20px) or percent of width (2%)
    #[arg(long, default_value = "2%")]
    merge_gap: GapThreshold,

    /// Resampling filter
    #[arg(long, value_enum, default_value_t = ResampleFilter::Lanczos3)]
    filter: ResampleFilter,
}

impl TuningArgs {
    fn to_config(&self) -> IconConfig {
        IconConfig {
            canvas_size: self.size,
            fill: self.fill,
            stencil: self.stencil,
            occupied_fraction: self.fraction,
            alpha_threshold: self.alpha_threshold,
            merge_gap: self.merge_gap,
            filter: self.filter,
        }
    }
}

#[derive(Args, Debug)]
struct IconArgs {
    /// Logo image (PNG with transparency; JPEG is treated as fully opaque)
    #[arg(required_unless_present = "find")]
    input: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "pwa-icon.png")]
    output: PathBuf,

    /// Also write the cropped symbol (with alpha) to this path
    #[arg(long)]
    save_symbol: Option<PathBuf>,

    /// Locate the input by a file-name fragment instead of passing a path
    #[arg(long, conflicts_with = "input")]
    find: Option<String>,

    /// Directories searched by --find, in order
    #[arg(long = "root", requires = "find")]
    roots: Vec<PathBuf>,

    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Directory receiving one `<stem>.png` per input
    #[arg(long)]
    out_dir: PathBuf,

    /// Write a JSON summary to this file
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    tuning: TuningArgs,
}

/// `RUST_LOG` decides the filter unless `-v`/`--debug` is given; with neither, WARN.
fn log_filter(rust_log: Option<&str>, verbose: bool, debug: bool) -> EnvFilter {
    let flag_level = if debug {
        Some(tracing::Level::DEBUG)
    } else if verbose {
        Some(tracing::Level::INFO)
    } else {
        None
    };
    let from_env = rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok());

    match (from_env, flag_level) {
        (Some(filter), Some(level)) => filter.add_directive(level.into()),
        (Some(filter), None) => filter,
        (None, Some(level)) => EnvFilter::new(level.to_string()),
        (None, None) => EnvFilter::new("warn"),
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose, debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<IconError>() {
                Some(icon_err) => eprintln!("error: {}", icon_err.report()),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Icon(args) => run_icon(args),
        Command::Batch(args) => run_batch(args),
        Command::RemoveBg {
            input,
            output,
            tolerance,
        } => {
            let bitmap = load_bitmap(&input)?;
            let cleared = background::remove_light_background(&bitmap, tolerance);
            save_png(&cleared, &output)?;
            println!("Saved transparent image to {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::DataUri { input, output } => {
            let bytes = std::fs::read(&input)
                .map_err(|e| IconError::io("read image", e).with_path(&input))?;
            let uri = data_uri::encode_data_uri(&bytes, data_uri::mime_for(&input));
            match output {
                Some(path) => {
                    std::fs::write(&path, uri)
                        .map_err(|e| IconError::io("write data uri", e).with_path(&path))?;
                    println!("Data URI saved to {}", path.display());
                }
                None => println!("{}", uri),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Restore {
            source,
            output,
            name,
        } => {
            let text = std::fs::read_to_string(&source)
                .map_err(|e| IconError::io("read source", e).with_path(&source))?;
            let bytes = data_uri::extract_embedded_image(&text, &name)
                .map_err(|e| e.with_path(&source))?;
            std::fs::write(&output, &bytes)
                .map_err(|e| IconError::io("write image", e).with_path(&output))?;
            println!("Restored {} ({} bytes)", output.display(), bytes.len());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_icon(args: IconArgs) -> Result<ExitCode> {
    let input = match (args.input, args.find) {
        (Some(path), _) => path,
        (None, Some(needle)) => {
            let roots: Vec<PathBuf> = if args.roots.is_empty() {
                discover::DEFAULT_ROOTS.iter().map(PathBuf::from).collect()
            } else {
                args.roots
            };
            let found = discover::find_by_name(&roots, &needle)?;
            println!("Processing source: {}", found.display());
            found
        }
        (None, None) => anyhow::bail!("an input path or --find is required"),
    };

    let config = args.tuning.to_config();
    let run = generate_icon(&input, &args.output, &config, args.save_symbol.as_deref())?;

    println!(
        "Symbol {}x{} at x={}..{}, icon saved to {}",
        run.symbol.width(),
        run.symbol.height(),
        run.symbol_box.left,
        run.symbol_box.right,
        args.output.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_batch(args: BatchArgs) -> Result<ExitCode> {
    let config = args.tuning.to_config();
    let inputs = batch::expand_inputs(&args.inputs)?;
    if inputs.is_empty() {
        anyhow::bail!("no input images matched {:?}", args.inputs);
    }

    let summary = batch::run_batch(&inputs, &args.out_dir, &config)?;

    for item in &summary.items {
        match &item.status {
            batch::ItemStatus::Ok { output, .. } => {
                println!("ok      {} -> {}", item.input.display(), output.display())
            }
            batch::ItemStatus::Failed { stage, message } => {
                eprintln!("{} failed: {} ({})", stage, message, item.input.display())
            }
        }
    }
    println!(
        "{} images: {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );

    if let Some(report) = &args.report {
        std::fs::write(report, summary.to_json()?)
            .with_context(|| format!("writing report {}", report.display()))?;
    }

    Ok(if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
