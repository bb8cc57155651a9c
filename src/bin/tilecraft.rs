use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tilecraft::HistoryStore as _;

#[derive(Parser, Debug)]
#[command(name = "tilecraft", version, about = "Slice an image or GIF into square emoji tiles")]
struct Cli {
    /// Source image path or http(s) URL (.png .jpg .jpeg .gif .bmp). Defaults to the last one used.
    source: Option<String>,

    /// Run name: output folder and file name prefix. Defaults to the source file name.
    #[arg(long)]
    name: Option<String>,

    /// Grid shape: `N` for N×N, or `W,H` / `WxH`.
    #[arg(long, default_value = "1")]
    grid: String,

    /// Edge length of one tile in pixels.
    #[arg(long, default_value_t = tilecraft::DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// How the source is fitted into the grid box.
    #[arg(long, value_enum, default_value_t = ResizeChoice::Cover)]
    resize: ResizeChoice,

    /// Filter to apply, as `name` or `name=value`; repeat to chain in order.
    #[arg(long = "filter", value_name = "NAME[=VALUE]")]
    filters: Vec<String>,

    /// Load the filter chain from a JSON array instead of `--filter`.
    #[arg(long, conflicts_with = "filters")]
    filters_json: Option<PathBuf>,

    /// Emit one output per mask instead of per grid cell.
    #[arg(long, conflicts_with = "grid")]
    masked: bool,

    /// Mask directory used with `--masked`.
    #[arg(long, default_value = tilecraft::DEFAULT_MASK_DIR)]
    mask_dir: PathBuf,

    /// Root folder for run outputs.
    #[arg(long, default_value = tilecraft::DEFAULT_OUT_ROOT)]
    out: PathBuf,

    /// Folder holding the last-used-source record.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// GIF quantizer speed shared by every animation of the run (1 = best, 30 = fastest).
    #[arg(long, default_value_t = tilecraft::DEFAULT_GIF_SPEED)]
    gif_speed: i32,

    /// Override encoder worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResizeChoice {
    Stretch,
    Cover,
    Contain,
}

impl From<ResizeChoice> for tilecraft::ResizeMode {
    fn from(choice: ResizeChoice) -> Self {
        match choice {
            ResizeChoice::Stretch => Self::Stretch,
            ResizeChoice::Cover => Self::Cover,
            ResizeChoice::Contain => Self::Contain,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut history = tilecraft::JsonHistoryStore::new(&cli.data_dir);
    let last = history.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable history");
        None
    });

    let Some(source) = cli.source.clone().or(last) else {
        eprintln!("no source image given");
        std::process::exit(2);
    };
    let locator = tilecraft::Locator::parse(&source)?;

    let mode = if cli.masked {
        tilecraft::RunMode::Masked {
            mask_dir: cli.mask_dir.clone(),
        }
    } else {
        let grid = cli
            .grid
            .parse::<tilecraft::GridShape>()
            .with_context(|| "parse --grid")?;
        tilecraft::RunMode::Grid { grid }
    };

    let filters = match &cli.filters_json {
        Some(path) => read_filters_json(path)?,
        None => parse_filter_flags(&cli.filters)?,
    };

    let name = match &cli.name {
        Some(n) => n.clone(),
        None => locator
            .file_stem()
            .context("cannot derive a run name from the source; pass --name")?,
    };

    let mut opts = tilecraft::RunOpts::new(source, name);
    opts.mode = mode;
    opts.cell_size = cli.cell_size;
    opts.resize_mode = cli.resize.into();
    opts.filters = filters;
    opts.out_root = cli.out.clone();
    opts.gif_speed = cli.gif_speed;
    opts.threads = cli.threads;
    opts.validate()?;

    if let Err(e) = history.save(&locator.as_string()) {
        tracing::warn!(error = %e, "could not save history");
    }

    let report = tilecraft::run(&opts)?;
    for path in &report.outputs {
        eprintln!("wrote {}", path.display());
    }

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("failed {}: {}", failure.file_name, failure.message);
        }
        anyhow::bail!(
            "{} of {} outputs failed",
            report.failures.len(),
            report.failures.len() + report.outputs.len()
        );
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_filter_flags(flags: &[String]) -> anyhow::Result<tilecraft::FilterSpec> {
    let pairs = flags.iter().map(|f| match f.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (f.as_str(), None),
    });
    Ok(tilecraft::FilterSpec::from_ui(pairs)?)
}

fn read_filters_json(path: &Path) -> anyhow::Result<tilecraft::FilterSpec> {
    let f = File::open(path).with_context(|| format!("open filters '{}'", path.display()))?;
    let spec: tilecraft::FilterSpec = serde_json::from_reader(BufReader::new(f))
        .with_context(|| "parse filters JSON")?;
    Ok(spec)
}
