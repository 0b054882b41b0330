use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use fcmprep::cmd::{android, instant};
use fcmprep::domain::android::MessagePriority;
use fcmprep::domain::error::{AndroidError, InstantError};
use fcmprep::domain::report::{PipelineInput, PipelineInputSource, PipelineReport};
use fcmprep::io::{self as fcm_io, Format, IoError};
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fcmprep",
    version,
    about = "Validate Android messaging config and normalize timestamps"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    emit_pipeline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate Android configs and print their canonical wire mapping.
    Android(AndroidArgs),
    /// Normalize time values to UTC instants.
    Instant(InstantArgs),
}

#[derive(Debug, clap::Args)]
struct AndroidArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum)]
    from: Option<CliInputFormat>,

    #[arg(long, value_enum)]
    to: Option<CliOutputFormat>,

    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    sort_keys: bool,

    #[arg(long, default_value_t = false)]
    default_sound: bool,

    #[arg(long, value_enum)]
    priority: Option<CliPriority>,
}

#[derive(Debug, clap::Args)]
struct InstantArgs {
    #[arg(long, conflicts_with = "value")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, conflicts_with = "value")]
    from: Option<CliInputFormat>,

    #[arg(long, value_enum)]
    to: Option<CliOutputFormat>,

    /// Literal text to normalize instead of reading documents.
    #[arg(long)]
    value: Option<String>,

    /// RFC 3339 timestamp used as the current time.
    #[arg(long)]
    now: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInputFormat {
    Json,
    Jsonl,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Json,
    Jsonl,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPriority {
    Normal,
    High,
}

impl From<CliInputFormat> for Format {
    fn from(value: CliInputFormat) -> Self {
        match value {
            CliInputFormat::Json => Self::Json,
            CliInputFormat::Jsonl => Self::Jsonl,
            CliInputFormat::Yaml => Self::Yaml,
        }
    }
}

impl From<CliOutputFormat> for Format {
    fn from(value: CliOutputFormat) -> Self {
        match value {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Jsonl => Self::Jsonl,
        }
    }
}

impl From<CliPriority> for MessagePriority {
    fn from(value: CliPriority) -> Self {
        match value {
            CliPriority::Normal => Self::Normal,
            CliPriority::High => Self::High,
        }
    }
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    init_tracing();
    process::exit(run());
}

/// Structured logs go to stderr; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Fails only when a global subscriber is already installed.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    let emit_pipeline = cli.emit_pipeline;
    match cli.command {
        Commands::Android(args) => run_android(args, emit_pipeline),
        Commands::Instant(args) => run_instant(args, emit_pipeline),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_android(args: AndroidArgs, emit_pipeline: bool) -> i32 {
    let options = android::AndroidCommandOptions {
        sort_keys: args.sort_keys,
        default_sound: args.default_sound,
        priority: args.priority.map(Into::into),
    };
    let output_format = args.to.map(Into::into).unwrap_or(Format::Json);

    let input_format =
        match fcm_io::resolve_input_format(args.from.map(Into::into), args.input.as_deref()) {
            Ok(format) => format,
            Err(error) => {
                emit_error(
                    "input_usage_error",
                    error.to_string(),
                    json!({"command": "android"}),
                    3,
                );
                return 3;
            }
        };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let result = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => android::run(file, &mut output, input_format, output_format, options),
            Err(err) => {
                emit_error(
                    "input_usage_error",
                    format!("failed to open input file `{}`: {err}", path.display()),
                    json!({"command": "android", "input": path}),
                    3,
                );
                return 3;
            }
        },
        None => {
            let stdin = io::stdin();
            android::run(stdin.lock(), &mut output, input_format, output_format, options)
        }
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            let (exit_code, error_kind) = map_android_error(&error);
            emit_error(
                error_kind,
                error.to_string(),
                android_error_details(&error),
                exit_code,
            );
            exit_code
        }
    };

    if emit_pipeline {
        let source = input_source(args.input.as_ref(), input_format);
        emit_pipeline_report(&PipelineReport::new(
            "android",
            PipelineInput::new(vec![source]),
            android::pipeline_steps(options),
            android::deterministic_guards(options),
        ));
    }
    exit_code
}

fn run_instant(args: InstantArgs, emit_pipeline: bool) -> i32 {
    let options = match args.now.as_deref() {
        Some(now) => match instant::InstantCommandOptions::with_now(now) {
            Ok(options) => options,
            Err(error) => {
                emit_error(
                    "input_usage_error",
                    error.to_string(),
                    json!({"command": "instant"}),
                    3,
                );
                return 3;
            }
        },
        None => instant::InstantCommandOptions::default(),
    };
    let output_format = args.to.map(Into::into).unwrap_or(Format::Json);

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let (result, source) = if let Some(literal) = &args.value {
        (
            instant::run_literal(literal, &mut output, output_format, options),
            PipelineInputSource::argument("value"),
        )
    } else {
        let input_format =
            match fcm_io::resolve_input_format(args.from.map(Into::into), args.input.as_deref()) {
                Ok(format) => format,
                Err(error) => {
                    emit_error(
                        "input_usage_error",
                        error.to_string(),
                        json!({"command": "instant"}),
                        3,
                    );
                    return 3;
                }
            };
        let result = match &args.input {
            Some(path) => match File::open(path) {
                Ok(file) => instant::run(file, &mut output, input_format, output_format, options),
                Err(err) => {
                    emit_error(
                        "input_usage_error",
                        format!("failed to open input file `{}`: {err}", path.display()),
                        json!({"command": "instant", "input": path}),
                        3,
                    );
                    return 3;
                }
            },
            None => {
                let stdin = io::stdin();
                instant::run(stdin.lock(), &mut output, input_format, output_format, options)
            }
        };
        (result, input_source(args.input.as_ref(), input_format))
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            let (exit_code, error_kind) = map_instant_error(&error);
            emit_error(
                error_kind,
                error.to_string(),
                instant_error_details(&error),
                exit_code,
            );
            exit_code
        }
    };

    if emit_pipeline {
        emit_pipeline_report(&PipelineReport::new(
            "instant",
            PipelineInput::new(vec![source]),
            instant::pipeline_steps(args.value.is_some()),
            instant::deterministic_guards(options),
        ));
    }
    exit_code
}

fn input_source(path: Option<&PathBuf>, format: Format) -> PipelineInputSource {
    match path {
        Some(path) => {
            PipelineInputSource::path("input", path.display().to_string(), Some(format.as_str()))
        }
        None => PipelineInputSource::stdin("input", Some(format.as_str())),
    }
}

fn map_android_error(error: &AndroidError) -> (i32, &'static str) {
    match error {
        AndroidError::ReadInput { .. } | AndroidError::InvalidConfig { .. } => {
            (3, "input_usage_error")
        }
        AndroidError::Serialize { .. } => (1, "internal_error"),
        AndroidError::WriteOutput { source, .. } => map_write_error(source),
    }
}

fn map_instant_error(error: &InstantError) -> (i32, &'static str) {
    match error {
        InstantError::ReadInput { .. }
        | InstantError::InvalidNow { .. }
        | InstantError::InvalidValue { .. } => (3, "input_usage_error"),
        InstantError::WriteOutput { source, .. } => map_write_error(source),
    }
}

fn map_write_error(source: &IoError) -> (i32, &'static str) {
    match source {
        IoError::Io(_) | IoError::JsonParse(_) => (1, "internal_error"),
        _ => (3, "input_usage_error"),
    }
}

fn android_error_details(error: &AndroidError) -> Value {
    match error {
        AndroidError::InvalidConfig { index, source } => json!({
            "command": "android",
            "document": index,
            "field": source.field,
            "value": source.value,
        }),
        _ => json!({"command": "android"}),
    }
}

fn instant_error_details(error: &InstantError) -> Value {
    match error {
        InstantError::InvalidValue { index, source } => json!({
            "command": "instant",
            "document": index,
            "value": source.value,
        }),
        _ => json!({"command": "instant"}),
    }
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => emit_error(
            "internal_error",
            format!("failed to serialize pipeline report: {error}"),
            json!({"command": "emit_pipeline"}),
            1,
        ),
    }
}

fn emit_error(error: &'static str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
