use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use saju_pm::{
    api::{ApiClient, Gender, HttpApiClient},
    config,
    controller::{AnalysisController, BirthForm, ChatController, TextBuffer},
    probe::{FallbackNotice, apply_datetime_fallback},
    terminal::{PromptInput, StatusLine, StderrNotice, prompt},
};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Saju-based PM fit analysis and chat from the terminal"
)]
struct Args {
    /// Configuration file (defaults to $CONFIG_PATH or ./saju-pm.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (use multiple times for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print the result
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze PM fit from birth data
    Analyze {
        /// Birth date (YYYY-MM-DD); prompted for when omitted on a terminal
        #[arg(long)]
        date: Option<String>,
        /// Birth time (HH:MM); midnight when omitted
        #[arg(long)]
        time: Option<String>,
        /// Birth place
        #[arg(long, default_value = "")]
        location: String,
        /// M, F or N
        #[arg(long, default_value = "N")]
        gender: Gender,
    },
    /// Send a single chat message
    Chat {
        message: String,
    },
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn effective_log_level(configured: &str, verbose: u8, quiet: bool) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_tracing(level: &str, json: bool) -> Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration first (before logging setup)
    let config = match config::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    // RUST_LOG, when set, takes precedence inside init_tracing
    let log_level = effective_log_level(&config.logs.level, args.verbose, args.quiet);

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        return Ok(ExitCode::FAILURE);
    }

    init_tracing(&log_level, config.logs.json)?;
    debug!("Configuration loaded: {:?}", config);

    let client: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(config.api.clone()));

    let outcome = match args.command {
        Command::Analyze {
            date,
            time,
            location,
            gender,
        } => {
            let (date, time) = read_birth_moment(date, time, args.quiet)?;
            let form = BirthForm {
                date,
                time,
                location,
                gender,
            };

            let mut controller = AnalysisController::new(
                client,
                config.birth.zone()?,
                TextBuffer::new(),
                StatusLine::new("분석하기", args.quiet),
            );
            let outcome = controller.submit(&form).await;
            println!("{}", controller.output().text());
            outcome
        }
        Command::Chat { message } => {
            let mut controller = ChatController::new(
                client,
                config.chat.clone(),
                TextBuffer::new(),
                StatusLine::new("보내기", args.quiet),
            );
            let outcome = controller.send(&message).await;
            println!("{}", controller.output().text());
            outcome
        }
    };

    info!("Finished with outcome {:?}", outcome);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Birth date and time from the arguments, prompting for a missing date when
/// the terminal supports it.
fn read_birth_moment(
    date: Option<String>,
    time: Option<String>,
    quiet: bool,
) -> Result<(String, String)> {
    if let Some(date) = date {
        return Ok((date, time.unwrap_or_default()));
    }

    let mut input = PromptInput::detect();
    let mut notice = StderrNotice;
    let notice: Option<&mut dyn FallbackNotice> =
        if quiet { None } else { Some(&mut notice) };

    if !apply_datetime_fallback(&mut input, notice) {
        return Ok((String::new(), time.unwrap_or_default()));
    }

    let date = prompt("생년월일 (YYYY-MM-DD): ")?;
    let time = match time {
        Some(time) => time,
        None => prompt("출생 시각 (HH:MM, 모르면 Enter): ")?,
    };
    Ok((date, time))
}
