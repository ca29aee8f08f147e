//! Handle Hunt CLI Application
//!
//! Checks username availability across social platforms, either locally
//! from the command line or as an HTTP service.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use console::Term;
use futures::StreamExt;
use handle_hunt_lib::{
    load_env_config, parse_timeout_string, validate_handle, ConfigManager, EnvConfig, FileConfig,
    HandleHunter, HuntConfig,
};
use std::net::SocketAddr;
use std::process;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// CLI arguments for handle-hunt
#[derive(Parser, Debug)]
#[command(name = "handle-hunt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check username availability across social platforms")]
#[command(
    long_about = "Check whether a username is free on GitHub, Instagram, TikTok and other platforms.\n\nRun a one-off check from the terminal or serve the JSON API."
)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Use specific config file instead of automatic discovery
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Configuration"
    )]
    pub config: Option<String>,

    /// Per-platform timeout (e.g. 5s, 1m)
    #[arg(
        long = "timeout",
        value_name = "DURATION",
        global = true,
        help_heading = "Configuration"
    )]
    pub timeout: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true, help_heading = "Configuration")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen address (default: 0.0.0.0:3000)
        #[arg(long = "bind", value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Check a handle from the terminal
    Check(CheckArgs),

    /// List supported platform identifiers
    Platforms {
        /// Output as a JSON array
        #[arg(short = 'j', long = "json")]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Username to look for
    #[arg(value_name = "HANDLE")]
    pub handle: String,

    /// Platforms to check (comma-separated or multiple -P flags)
    #[arg(short = 'P', long = "platforms", value_name = "PLATFORM", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub platforms: Option<Vec<String>>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Enable grouped, structured output with a header
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Collect all results before displaying
    #[arg(long = "batch", help_heading = "Output Format")]
    pub batch: bool,
}

/// Effective settings after layering file, environment, and CLI.
#[derive(Debug, Clone)]
struct Settings {
    hunt: HuntConfig,
    bind: SocketAddr,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(args.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), "handle-hunt starting");

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "handle_hunt=debug,handle_hunt_lib=debug,tower_http=debug"
    } else {
        "handle_hunt=info,handle_hunt_lib=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;

    match args.command {
        Command::Serve { .. } => {
            let hunter = HandleHunter::with_config(settings.hunt)?;
            handle_hunt::serve(hunter, settings.bind).await?;
        }
        Command::Check(check_args) => {
            let hunter = HandleHunter::with_config(settings.hunt)?;
            run_check(&hunter, &check_args).await?;
        }
        Command::Platforms { json } => {
            let hunter = HandleHunter::with_config(settings.hunt)?;
            let platforms = hunter.supported_platforms();
            if json {
                println!("{}", serde_json::to_string_pretty(&platforms)?);
            } else {
                ui::print_platforms(&platforms);
            }
        }
    }

    Ok(())
}

/// Run the engine for one handle and print the verdicts.
async fn run_check(
    hunter: &HandleHunter,
    args: &CheckArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_handle(&args.handle)?;

    let platforms = args
        .platforms
        .as_ref()
        .map(|list| {
            list.iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| hunter.default_platforms());

    if args.json {
        let verdicts = hunter.check_all(&args.handle, &platforms).await?;
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
        return Ok(());
    }

    let start_time = Instant::now();
    if args.pretty {
        ui::print_header(&args.handle, platforms.len(), hunter.config().timeout);
    }

    let verdicts = if args.batch {
        let spinner = if args.pretty && Term::stderr().is_term() {
            Some(ui::Spinner::start(format!(
                "Checking {} platforms...",
                platforms.len()
            )))
        } else {
            None
        };

        let verdicts = hunter.check_all(&args.handle, &platforms).await?;

        if let Some(spinner) = spinner {
            spinner.stop().await;
        }

        if args.pretty {
            ui::print_grouped_results(&verdicts);
        } else {
            for verdict in &verdicts {
                ui::print_result(verdict, None);
            }
        }
        verdicts
    } else {
        let total = platforms.len();
        let mut stream = hunter.check_all_stream(&args.handle, &platforms)?;
        let mut verdicts = Vec::with_capacity(total);

        while let Some(verdict) = stream.next().await {
            let counter = args.pretty.then_some((verdicts.len() + 1, total));
            ui::print_result(&verdict, counter);
            verdicts.push(verdict);
        }
        verdicts
    };

    if args.pretty {
        println!();
    }
    ui::print_summary(&verdicts, start_time.elapsed());

    Ok(())
}

/// Build effective settings with precedence: defaults, config file, env, CLI.
fn build_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = Settings {
        hunt: HuntConfig::default(),
        bind: DEFAULT_BIND.parse()?,
    };

    let config_manager = ConfigManager::new();
    let env_config = load_env_config()?;

    // Step 1: Config files
    if let Some(explicit_config_path) = &args.config {
        debug!(path = %explicit_config_path, "using explicit config file (--config)");
        let file_config = config_manager
            .load_file(explicit_config_path)
            .map_err(|e| {
                format!(
                    "Failed to load config file '{}': {}",
                    explicit_config_path, e
                )
            })?;
        merge_file_config(&mut settings, file_config)?;
    } else if let Some(env_config_path) = &env_config.config {
        debug!(path = %env_config_path, "using explicit config file (HH_CONFIG)");
        let file_config = config_manager
            .load_file(env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?;
        merge_file_config(&mut settings, file_config)?;
    } else {
        let file_config = config_manager.discover_and_load()?;
        merge_file_config(&mut settings, file_config)?;
    }

    // Step 2: Environment variables (HH_*)
    apply_environment_config(&mut settings, &env_config)?;

    // Step 3: CLI arguments (highest precedence)
    apply_cli_args(&mut settings, args)?;

    Ok(settings)
}

fn merge_file_config(
    settings: &mut Settings,
    file_config: FileConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(defaults) = file_config.defaults {
        if let Some(timeout_str) = defaults.timeout {
            settings.hunt.timeout = timeout_from_str(&timeout_str)?;
        }
        if let Some(concurrency) = defaults.concurrency {
            settings.hunt = settings.hunt.clone().with_concurrency(concurrency);
        }
        if let Some(platforms) = defaults.platforms {
            settings.hunt.platforms = Some(platforms);
        }
        if let Some(user_agent) = defaults.user_agent {
            settings.hunt.user_agent = user_agent;
        }
    }

    if let Some(bind) = file_config.server.and_then(|server| server.bind) {
        settings.bind = bind.parse()?;
    }

    Ok(())
}

/// Environment values were already validated by `load_env_config`.
fn apply_environment_config(
    settings: &mut Settings,
    env_config: &EnvConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(timeout_str) = &env_config.timeout {
        settings.hunt.timeout = timeout_from_str(timeout_str)?;
    }
    if let Some(concurrency) = env_config.concurrency {
        settings.hunt = settings.hunt.clone().with_concurrency(concurrency);
    }
    if let Some(platforms) = &env_config.platforms {
        settings.hunt.platforms = Some(platforms.clone());
    }
    if let Some(user_agent) = &env_config.user_agent {
        settings.hunt.user_agent = user_agent.clone();
    }
    if let Some(bind) = &env_config.bind {
        settings.bind = bind.parse()?;
    }

    Ok(())
}

fn apply_cli_args(settings: &mut Settings, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(timeout_str) = &args.timeout {
        settings.hunt.timeout = timeout_from_str(timeout_str)?;
    }

    if let Command::Serve {
        bind: Some(bind), ..
    } = &args.command
    {
        settings.bind = bind
            .parse()
            .map_err(|_| format!("Invalid bind address '{}'", bind))?;
    }

    Ok(())
}

fn timeout_from_str(timeout_str: &str) -> Result<Duration, String> {
    parse_timeout_string(timeout_str)
        .map(Duration::from_secs)
        .ok_or_else(|| {
            format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout_str
            )
        })
}
