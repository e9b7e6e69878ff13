//! sepolcheck CLI - SELinux neverallow compliance checker.

mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use sepolcheck_harness::{
    run_suite, AdbTransfer, StagedContext, VerifyOptions, REMOTE_POLICY_PATH,
};
use sepolcheck_suite::{cases, generate, RuleCatalog};

#[derive(Parser)]
#[command(name = "sepolcheck")]
#[command(version, about = "Check a device's SELinux policy against neverallow assertions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the rule catalog into a generated Rust test suite
    Generate {
        /// Rule catalog file
        #[arg(short, long)]
        rules: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stage the analyzer, pull the device policy and check every rule
    Check {
        /// Rule catalog file
        #[arg(short, long)]
        rules: PathBuf,

        /// sepolicy-analyze binary to stage
        #[arg(short, long)]
        analyzer: PathBuf,

        /// Device serial, passed to adb as -s
        #[arg(short, long)]
        serial: Option<String>,

        /// adb binary to drive (default: found in PATH)
        #[arg(long)]
        adb: Option<PathBuf>,

        /// Policy exposure path on the device
        #[arg(long, default_value = REMOTE_POLICY_PATH)]
        remote_path: String,

        /// Per-rule analyzer timeout in seconds (default: wait forever)
        #[arg(long)]
        timeout: Option<u64>,

        /// Emit the report as JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },

    /// List the parsed catalog as it would be checked
    Rules {
        /// Rule catalog file
        #[arg(short, long)]
        rules: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Generate { rules, output } => run_generate(&rules, output.as_deref())?,
        Commands::Check {
            rules,
            analyzer,
            serial,
            adb,
            remote_path,
            timeout,
            json,
        } => {
            let code = run_check(CheckConfig {
                rules,
                analyzer,
                serial,
                adb,
                remote_path,
                timeout: timeout.map(Duration::from_secs),
                json,
            })?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Rules { rules } => {
            let catalog = load_catalog(&rules)?;
            for case in cases(&catalog) {
                println!("{}  {}", case.name, case.rule);
            }
        }
    }

    Ok(())
}

fn load_catalog(path: &std::path::Path) -> Result<RuleCatalog> {
    RuleCatalog::load(path)
        .with_context(|| format!("failed to load rule catalog {}", path.display()))
}

fn run_generate(rules: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let catalog = load_catalog(rules)?;
    let document = generate(&catalog).context("failed to render test document")?;
    debug!("rendered {} checks", catalog.len());
    match output {
        Some(path) => std::fs::write(path, &document)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{document}"),
    }
    Ok(())
}

struct CheckConfig {
    rules: PathBuf,
    analyzer: PathBuf,
    serial: Option<String>,
    adb: Option<PathBuf>,
    remote_path: String,
    timeout: Option<Duration>,
    json: bool,
}

/// Run the whole compliance suite. Returns the process exit code: 0 when
/// every rule passed, 1 when at least one rule failed, 2 when setup failed
/// before any rule could be evaluated.
fn run_check(config: CheckConfig) -> Result<i32> {
    let catalog = load_catalog(&config.rules)?;
    let suite = cases(&catalog);

    let transfer = match config.adb {
        Some(path) => AdbTransfer::new(path, config.serial),
        None => match AdbTransfer::from_path_lookup(config.serial) {
            Ok(transfer) => transfer,
            Err(err) => {
                report::setup_failure(&err);
                return Ok(2);
            }
        },
    };

    let context =
        match StagedContext::stage_from_file(&config.analyzer, &transfer, &config.remote_path) {
            Ok(context) => context,
            Err(err) => {
                report::setup_failure(&err);
                return Ok(2);
            }
        };

    let options = VerifyOptions {
        timeout: config.timeout,
    };
    let suite_report = run_suite(&context, &suite, &options);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&suite_report)?);
    } else {
        report::print_human(&suite_report);
    }

    Ok(if suite_report.all_passed() { 0 } else { 1 })
}
