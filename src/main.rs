use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use hw_pragma_scan::config::ScanConfig;
use hw_pragma_scan::constants::{DEFAULT_CONFIG_FILE, EXIT_SCAN_FAILED};
use hw_pragma_scan::logging::LogFormat;
use hw_pragma_scan::report::{exit_code, write_outcome, ReportFormat};
use hw_pragma_scan::scanner::Scanner;
use std::path::{Path, PathBuf};

/// HW Pragma Scan - inspect CDN cache diagnostics for a single URL
#[derive(Parser, Debug)]
#[command(name = "hw-pragma-scan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (stderr)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scans the target host (simple GET)
    Scan(ScanArgs),
}

#[derive(ClapArgs, Debug)]
struct ScanArgs {
    /// The full target URL (domain and uri) https://website.com/path/to/file.suffix
    #[arg(short, long)]
    url: String,

    /// Give up after this many seconds (default: wait indefinitely)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Report format (stdout)
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Exit with status 2 when any header failed to extract
    #[arg(long)]
    strict: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ScanConfig> {
    match path {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("loading config file {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            ScanConfig::from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("loading config file {}", DEFAULT_CONFIG_FILE))
        }
        None => Ok(ScanConfig::default()),
    }
}

async fn run_scan(config: ScanConfig, args: ScanArgs) -> anyhow::Result<i32> {
    let scanner = Scanner::new(&config)?;

    // Ctrl-C aborts the in-flight request
    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let result = scanner.scan_until(&args.url, cancel).await;
    let code = exit_code(&result, args.strict);
    match result {
        Ok(outcome) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_outcome(&outcome, args.format, chrono::Utc::now(), &mut out)
                .context("writing report")?;
        }
        Err(e) => {
            tracing::error!(url = %args.url, error = %e, "scan failed");
            eprintln!("{}", e);
        }
    }
    Ok(code)
}

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        std::process::exit(EXIT_SCAN_FAILED);
    });
    if let Some(format) = args.log_format {
        config.log_format = format;
    }
    let Command::Scan(scan_args) = args.command;
    if scan_args.timeout.is_some() {
        config.timeout_secs = scan_args.timeout;
    }
    if let Err(e) = config.validate() {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(EXIT_SCAN_FAILED);
    }

    // Initialize logging subsystem
    if let Err(e) = hw_pragma_scan::logging::init_subscriber(config.log_format, args.verbose) {
        eprintln!("Failed to initialize logging subsystem: {}", e);
        std::process::exit(EXIT_SCAN_FAILED);
    }

    tracing::info!(
        url = %scan_args.url,
        timeout_secs = ?config.timeout_secs,
        pragma = %config.pragma,
        "starting scan"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            std::process::exit(EXIT_SCAN_FAILED);
        }
    };

    let code = runtime
        .block_on(run_scan(config, scan_args))
        .unwrap_or_else(|e| {
            eprintln!("{:#}", e);
            EXIT_SCAN_FAILED
        });
    std::process::exit(code);
}
