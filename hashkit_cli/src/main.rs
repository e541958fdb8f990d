use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use hashkit_cli::config::{AppConfig, ConfigManager, get_config};
use hashkit_cli::error::{CliError, ExitCode};
use hashkit_cli::output::{HashReport, OutputFormat, create_formatter};
use hashkit_cli::{progress, terminal};
use hashkit_core::{AlgorithmRegistry, Converter, HashAlgorithm, HashService};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hashkit")]
#[command(author, version, about = "Hashkit - file digests, checksums and string conversions", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the digest of a file
    File {
        /// File to hash
        path: PathBuf,

        #[command(flatten)]
        digest: DigestArgs,

        /// Bytes read per chunk
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,
    },

    /// Calculate the digest of a string's UTF-8 bytes
    Text {
        /// Text to hash
        input: String,

        #[command(flatten)]
        digest: DigestArgs,
    },

    /// Convert a string (dec-to-hex, hex-to-dec, string-to-base64,
    /// base64-to-string, epoch-to-date, date-to-epoch)
    Convert {
        /// Converter name
        converter: String,

        /// Input string
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// List supported algorithms and converters
    Algorithms {
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by the digest commands
#[derive(clap::Args)]
struct DigestArgs {
    /// Hash algorithm (md5, sha1, sha224, sha256, sha384, sha512, crc16, crc32)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Render the digest in uppercase
    #[arg(short = 'U', long)]
    upper: bool,

    /// Compare the digest with an expected value (case-insensitive)
    #[arg(short, long, value_name = "HEX")]
    expect: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file location
    Path,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hashing.chunk_size)
        key: String,
    },
}

/// How a successful run should end
enum Outcome {
    Done,
    Mismatch,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize logging based on debug flag
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("hashkit_core", log::LevelFilter::Debug)
            .filter_module("hashkit_cli", log::LevelFilter::Debug)
            .filter_module("hashkit", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(cli).await {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Mismatch) => std::process::exit(ExitCode::GeneralError as i32),
        Err(err) => {
            let cli_error = CliError::from(err);
            // Scripts watch stdout for the sentinel; details go to stderr
            println!("ERROR");
            eprint!("{}", cli_error.format_for_user(debug));
            std::process::exit(cli_error.exit_code() as i32);
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Commands::File {
            path,
            digest,
            chunk_size,
            no_progress,
        } => file_command(load_config()?, &path, digest, chunk_size, no_progress).await,
        Commands::Text { input, digest } => text_command(load_config()?, &input, digest),
        Commands::Convert { converter, input } => {
            convert_command(load_config()?, &converter, &input)?;
            Ok(Outcome::Done)
        }
        Commands::Algorithms { format } => {
            algorithms_command(load_config()?, format)?;
            Ok(Outcome::Done)
        }
        Commands::Config { command } => {
            config_command(command)?;
            Ok(Outcome::Done)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(Outcome::Done)
        }
    }
}

/// Load configuration and apply its color preference
fn load_config() -> Result<AppConfig> {
    let config = get_config()?;
    if !terminal::colors_enabled(config.output.color_enabled) {
        colored::control::set_override(false);
    }
    Ok(config)
}

/// Resolve the algorithm and output format, applying flags over configuration
fn resolve_digest_options(
    config: &AppConfig,
    digest: &DigestArgs,
) -> Result<(HashAlgorithm, OutputFormat)> {
    let algorithm = match &digest.algorithm {
        Some(name) => name.parse::<HashAlgorithm>()?,
        None => config.default_algorithm()?,
    };
    let format = match digest.format {
        Some(format) => format,
        None => config.default_format()?,
    };
    Ok((algorithm, format))
}

async fn file_command(
    mut config: AppConfig,
    path: &Path,
    digest: DigestArgs,
    chunk_size: Option<usize>,
    no_progress: bool,
) -> Result<Outcome> {
    let (algorithm, format) = resolve_digest_options(&config, &digest)?;
    config.apply_cli_overrides(chunk_size, digest.upper);
    log::debug!(
        "Hashing {} with {algorithm}, chunk size {}",
        path.display(),
        config.hashing.chunk_size
    );

    let show_progress = !no_progress
        && config.output.progress_enabled
        && terminal::should_show_progress_by_default();
    let service = HashService::new(config.hashing.clone());

    let mut job = service.spawn_file_hash(path, algorithm);
    let progress_rx = job.take_progress();
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let progress_handle = if show_progress {
        progress_rx.map(|rx| tokio::spawn(progress::render_progress(rx, label)))
    } else {
        None
    };

    // Ctrl-C cancels the hash between chunks
    let token = job.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::debug!("Interrupt received, cancelling hash");
            token.cancel();
        }
    });

    let result = job.wait().await;
    interrupt.abort();
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }
    let result = result.with_context(|| format!("Failed to hash {}", path.display()))?;

    let report = HashReport::new(path.display().to_string(), &result, service.render(&result))
        .with_expected(digest.expect);
    let use_color = terminal::colors_enabled(config.output.color_enabled);
    println!("{}", create_formatter(format, use_color).format_hash(&report)?);

    if format == OutputFormat::Text && terminal::is_interactive() {
        eprintln!(
            "{} {} ({})",
            "Size:".bold(),
            progress::format_bytes(report.size),
            report.size
        );
        eprintln!("{} {:.2}s", "Time:".bold(), result.duration.as_secs_f64());
        if let Some(mbps) = progress::throughput_mbps(report.size, result.duration) {
            eprintln!("{} {}", "Throughput:".bold(), progress::format_throughput(mbps));
        }
    }

    Ok(if report.is_match() {
        Outcome::Done
    } else {
        Outcome::Mismatch
    })
}

fn text_command(mut config: AppConfig, input: &str, digest: DigestArgs) -> Result<Outcome> {
    let (algorithm, format) = resolve_digest_options(&config, &digest)?;
    config.apply_cli_overrides(None, digest.upper);

    let service = HashService::new(config.hashing.clone());
    let result = service.calculator().calculate_str(algorithm, input)?;
    let report =
        HashReport::new("text", &result, service.render(&result)).with_expected(digest.expect);

    let use_color = terminal::colors_enabled(config.output.color_enabled);
    println!("{}", create_formatter(format, use_color).format_hash(&report)?);

    Ok(if report.is_match() {
        Outcome::Done
    } else {
        Outcome::Mismatch
    })
}

fn convert_command(config: AppConfig, converter: &str, input: &str) -> Result<()> {
    let converter: Converter = converter.parse()?;
    log::debug!("Running {converter} on {} bytes of input", input.len());

    let output = HashService::new(config.hashing).convert(converter, input)?;
    println!("{output}");
    Ok(())
}

fn algorithms_command(config: AppConfig, format: Option<OutputFormat>) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => config.default_format()?,
    };
    let use_color = terminal::colors_enabled(config.output.color_enabled);
    let listing =
        create_formatter(format, use_color).format_listing(&AlgorithmRegistry::global().list())?;
    println!("{listing}");
    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let manager = ConfigManager::new();
    match command {
        ConfigCommand::Show => {
            print!("{}", manager.to_toml_string()?);
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
    }
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
