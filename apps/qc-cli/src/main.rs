use clap::{Parser, Subcommand, ValueEnum};
use qc_app::{AppError, AppResult, GroupStatus};
use qc_config::{Preset, ReportConfig};
use qc_core::{AxisMode, BinMode, GroupingKey};
use qc_ingest::SerialSummary;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qc-cli")]
#[command(about = "qcplot CLI - limit-aware QC chart reports", long_about = None)]
struct Cli {
    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart per parameter group
    Report {
        /// Path to the measurement CSV export
        csv_path: PathBuf,
        #[command(flatten)]
        overrides: ReportArgs,
    },
    /// List the parameter groups of an export
    Groups {
        /// Path to the measurement CSV export
        csv_path: PathBuf,
        #[command(flatten)]
        overrides: ReportArgs,
    },
    /// Write a configuration file (YAML, or JSON by extension)
    InitConfig {
        /// Output configuration path
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = PresetArg::Default)]
        preset: PresetArg,
    },
    /// Load, migrate and validate a configuration file
    CheckConfig {
        /// Configuration path
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Configuration file; defaults to the selected preset
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Base preset when no configuration file is given
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Directory that receives the charts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    group_by: Option<GroupByArg>,
    /// Window padding as a fraction of the tolerance
    #[arg(long)]
    pad: Option<f64>,
    /// Fixed number of histogram bins
    #[arg(long, conflicts_with = "bin_fraction")]
    bin_count: Option<usize>,
    /// Histogram bin width as a fraction of the tolerance
    #[arg(long)]
    bin_fraction: Option<f64>,
    #[arg(long, value_enum)]
    axis: Option<AxisArg>,
    /// Render groups in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Default,
    Legacy,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => Preset::Default,
            PresetArg::Legacy => Preset::Legacy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupByArg {
    Parameter,
    ParameterDescription,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    Categorical,
    RankedIndex,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Report {
            csv_path,
            overrides,
        } => cmd_report(&csv_path, &overrides),
        Commands::Groups {
            csv_path,
            overrides,
        } => cmd_groups(&csv_path, &overrides),
        Commands::InitConfig { path, preset } => cmd_init_config(&path, preset),
        Commands::CheckConfig { path } => cmd_check_config(&path),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_config(args: &ReportArgs) -> AppResult<ReportConfig> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), None) => qc_config::load(path)?,
        (None, preset) => ReportConfig::preset(preset.map(Preset::from).unwrap_or_default()),
        (Some(_), Some(_)) => {
            return Err(AppError::InvalidInput(
                "--config and --preset cannot be combined".to_string(),
            ));
        }
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(group_by) = args.group_by {
        config.grouping = match group_by {
            GroupByArg::Parameter => GroupingKey::Parameter,
            GroupByArg::ParameterDescription => GroupingKey::ParameterDescription,
        };
    }
    if let Some(pad) = args.pad {
        config.pad_fraction = pad;
    }
    if let Some(count) = args.bin_count {
        config.bins = BinMode::FixedCount { count };
    }
    if let Some(fraction) = args.bin_fraction {
        config.bins = BinMode::ToleranceFraction { fraction };
    }
    if let Some(axis) = args.axis {
        config.axis = match axis {
            AxisArg::Categorical => AxisMode::Categorical,
            AxisArg::RankedIndex => AxisMode::RankedIndex,
        };
    }
    if args.parallel {
        config.parallel = true;
    }

    qc_config::validate_config(&config)?;
    Ok(config)
}

fn cmd_report(csv_path: &Path, args: &ReportArgs) -> AppResult<()> {
    let config = resolve_config(args)?;
    println!("Generating report for: {}", csv_path.display());
    tracing::info!(
        input = %csv_path.display(),
        output_dir = %config.output_dir.display(),
        "starting report"
    );

    let response = qc_app::generate_report(csv_path, &config)?;
    let ingest = &response.ingest;
    println!(
        "  Rows: {} read, {} skipped, {} filtered, {} non-numeric values",
        ingest.rows_read, ingest.rows_skipped, ingest.rows_filtered, ingest.non_numeric_values
    );
    print_serial_summary(&response.serials);

    let summary = &response.summary;
    for group in &summary.groups {
        if let GroupStatus::Failed { reason } = &group.status {
            println!("  ✗ {}: {}", group.identity, reason);
        }
    }
    println!(
        "  Groups: {} rendered, {} failed ({} with inverted limits, {} without data) in {:.2} s",
        summary.rendered(),
        summary.failed(),
        summary.inverted(),
        summary.no_data(),
        summary.elapsed_s
    );
    println!(
        "Charts have been saved to the folder: {}",
        response.output_dir.display()
    );
    tracing::info!(
        rendered = summary.rendered(),
        failed = summary.failed(),
        "report complete"
    );
    Ok(())
}

fn print_serial_summary(serials: &[SerialSummary]) {
    if serials.is_empty() {
        return;
    }
    println!();
    println!("  {:<20} {:<15} {:<15}", "Serial Number", "Total Tests", "Passing Tests");
    println!("  {}", "-".repeat(50));
    for serial in serials {
        println!(
            "  {:<20} {:<15} {:<15}",
            serial.serial_name, serial.total_tests, serial.passing_tests
        );
    }
    println!("  {}", "-".repeat(50));
    println!("  Unique serial numbers: {}", serials.len());
    println!();
}

fn cmd_groups(csv_path: &Path, args: &ReportArgs) -> AppResult<()> {
    let config = resolve_config(args)?;
    let groups = qc_app::list_groups(csv_path, &config)?;

    if groups.is_empty() {
        println!("No groups found in input");
        return Ok(());
    }
    println!("Groups in {}:", csv_path.display());
    for group in groups {
        let window = match group.window {
            Some(w) if w.inverted => format!(
                "[{}, {}] (limits inverted), window [{}, {}]",
                w.lower_limit, w.upper_limit, w.y_min, w.y_max
            ),
            Some(w) => format!(
                "[{}, {}], window [{}, {}]",
                w.lower_limit, w.upper_limit, w.y_min, w.y_max
            ),
            None => "no usable limits".to_string(),
        };
        println!(
            "  {} ({} records, {} numeric) limits {}",
            group.identity, group.record_count, group.numeric_count, window
        );
    }
    Ok(())
}

fn cmd_init_config(path: &Path, preset: PresetArg) -> AppResult<()> {
    let config = ReportConfig::preset(preset.into());
    qc_config::save(path, &config)?;
    println!("✓ Wrote configuration: {}", path.display());
    Ok(())
}

fn cmd_check_config(path: &Path) -> AppResult<()> {
    println!("Checking configuration: {}", path.display());
    let config = qc_config::load(path)?;
    println!("✓ Configuration is valid (version {})", config.version);
    println!("  Output directory: {}", config.output_dir.display());
    Ok(())
}
