// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
mod format;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use format::OutputFormat;
use fs_config::{CommonConfig, load_config, validate_config};
use fs_error::{
    ClassifiedError, Classifier, ErrorType, RemoteErrorDescriptor, ServiceStatusCode,
    extract_classification,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fs-errors",
    version,
    about = "Classify service failures into tagged error messages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tag a plain message.
    Classify {
        /// Message body.
        message: String,

        /// Error type to tag with instead of the default.
        #[arg(long = "type", value_enum, requires = "code")]
        error_type: Option<TypeArg>,

        /// Status code to tag with, e.g. 2001.
        #[arg(long, requires = "error_type")]
        code: Option<u32>,
    },

    /// Re-classify a remote error descriptor given as JSON (`-` reads stdin).
    Remote {
        /// JSON payload such as `{"message": "[FS_SY_1001 ..."}`.
        payload: String,
    },

    /// Print the classification a tagged message carries.
    Extract {
        /// Tagged message.
        message: String,
    },

    /// List the status-code table.
    Codes,

    /// Validate and print the effective configuration.
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Error,
    System,
    Sql,
    Common,
    Excel,
}

impl From<TypeArg> for ErrorType {
    fn from(v: TypeArg) -> Self {
        match v {
            TypeArg::Error => ErrorType::Error,
            TypeArg::System => ErrorType::System,
            TypeArg::Sql => ErrorType::Sql,
            TypeArg::Common => ErrorType::Common,
            TypeArg::Excel => ErrorType::Excel,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("load config")?;

    let filter = if cli.debug {
        EnvFilter::new("fs_error=debug,fs_errors=debug")
    } else {
        let level = config.log_level.as_deref().unwrap_or("info");
        EnvFilter::new(format!("fs_error={level},fs_errors={level}"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let out = match cli.command {
        Commands::Classify {
            message,
            error_type,
            code,
        } => cmd_classify(&message, error_type, code, cli.format)?,
        Commands::Remote { payload } => cmd_remote(&config, &payload, cli.format)?,
        Commands::Extract { message } => {
            let (error_type, reason) = extract_classification(&message);
            format::render_pair(error_type, reason, cli.format)?
        }
        Commands::Codes => format::render_codes(cli.format)?,
        Commands::Config => cmd_config(&config, cli.format)?,
    };
    println!("{out}");
    Ok(())
}

fn cmd_classify(
    message: &str,
    error_type: Option<TypeArg>,
    code: Option<u32>,
    format: OutputFormat,
) -> Result<String> {
    let err = match (error_type, code) {
        (Some(t), Some(code)) => {
            let Some(reason) = ServiceStatusCode::from_code(code) else {
                bail!("unknown status code {code}; run `fs-errors codes` for the table");
            };
            ClassifiedError::with_reason(t.into(), reason, message)
        }
        _ => Classifier::default().classify_message(message),
    };
    format::render_error(&err, format)
}

fn cmd_remote(config: &CommonConfig, payload: &str, format: OutputFormat) -> Result<String> {
    let json = if payload == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read payload from stdin")?;
        buf
    } else {
        payload.to_string()
    };

    let descriptor =
        RemoteErrorDescriptor::from_json(&json).context("parse remote error descriptor")?;
    let err = Classifier::new(config.app_namespace.as_str()).classify_remote(&descriptor);
    format::render_error(&err, format)
}

fn cmd_config(config: &CommonConfig, format: OutputFormat) -> Result<String> {
    let warnings = validate_config(config).context("validate config")?;
    for w in &warnings {
        warn!("{w}");
    }
    format::render_config(config, &warnings, format)
}
