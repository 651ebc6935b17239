//! Purpose: `oneshape` CLI entry point.
//! Role: Binary crate root; parses args, reads documents, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (human or JSON by command/flags).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logs go to stderr and are filtered by RUST_LOG (default: warn).
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::Highlighter;
use oneshape::api::{
    DecodeOptions, Decoder, Error, ErrorKind, MatchPolicy, Registry, ValidationReport,
    to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let options = DecodeOptions::new()
        .with_policy(cli.policy.into())
        .with_strict_document(cli.strict_document);
    let decoder = Decoder::new(Registry::standard(), options);

    command_dispatch::dispatch_command(cli.command, &decoder, color_mode)
        .map_err(add_shape_hint)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "oneshape",
    version,
    about = "Decode JSON documents whose entries take one of several mutually exclusive shapes",
    long_about = None,
    after_help = r#"EXAMPLES
  $ oneshape decode conf.json
  $ echo '{"name":"x","data":[{"static":{"key":"k"}}]}' | oneshape encode
  $ oneshape check a.json b.json --json
  $ oneshape roundtrip conf.json

Each entry of `data` must be exactly one of:
  {"static": {"key": <text>}}
  {"selector": {"selector": <text>}}"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize JSON output"
    )]
    color: ColorMode,
    #[arg(
        long,
        global = true,
        default_value = "exclusive",
        value_enum,
        help = "How to treat entries accepted by more than one shape"
    )]
    policy: PolicyCli,
    #[arg(
        long,
        global = true,
        help = "Reject unknown fields on the outer document"
    )]
    strict_document: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyCli {
    Exclusive,
    FirstMatch,
}

impl From<PolicyCli> for MatchPolicy {
    fn from(policy: PolicyCli) -> Self {
        match policy {
            PolicyCli::Exclusive => MatchPolicy::Exclusive,
            PolicyCli::FirstMatch => MatchPolicy::FirstMatch,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Decode a document and describe each resolved entry")]
    Decode {
        #[arg(help = "Document path (default: stdin; `-` for stdin)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    #[command(about = "Decode a document and print its canonical encoding")]
    Encode {
        #[arg(help = "Document path (default: stdin; `-` for stdin)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        #[arg(long, help = "Pretty-print even when stdout is not a terminal")]
        pretty: bool,
    },
    #[command(about = "Validate documents and report every bad entry")]
    Check {
        #[arg(help = "Document paths (default: stdin)", value_hint = ValueHint::FilePath)]
        inputs: Vec<PathBuf>,
        #[arg(long, help = "Emit JSON reports")]
        json: bool,
    },
    #[command(about = "Decode, re-encode, and verify the round trip")]
    Roundtrip {
        #[arg(help = "Document path (default: stdin; `-` for stdin)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    #[command(about = "List registered entry shapes")]
    Shapes {
        #[arg(long, help = "Emit JSON")]
        json: bool,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    #[command(about = "Print version")]
    Version,
}

struct Input {
    label: String,
    bytes: Vec<u8>,
}

fn read_input(path: Option<&Path>) -> Result<Input, Error> {
    match path {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|err| {
                let kind = if err.kind() == io::ErrorKind::NotFound {
                    ErrorKind::Usage
                } else {
                    ErrorKind::Io
                };
                Error::new(kind)
                    .with_message(format!("failed to read {}", path.display()))
                    .with_source(err)
            })?;
            Ok(Input {
                label: path.display().to_string(),
                bytes,
            })
        }
    }
}

fn read_stdin() -> Result<Input, Error> {
    let mut bytes = Vec::new();
    io::stdin().read_to_end(&mut bytes).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    Ok(Input {
        label: "<stdin>".to_string(),
        bytes,
    })
}

fn add_shape_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NoMatchingVariant => {
            err.with_hint("Run `oneshape shapes` to list the accepted entry shapes.")
        }
        ErrorKind::AmbiguousVariant => {
            err.with_hint("Retry with --policy first-match to accept the first shape in order.")
        }
        ErrorKind::MalformedInput => {
            err.with_hint("Expected {\"name\": <text>, \"data\": [<entry>, ...]}.")
        }
        _ => err,
    }
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::Usage => err.with_hint("Check the path, or pass the document on stdin."),
        ErrorKind::Io => err.with_hint("I/O error. Check the path and permissions."),
        _ => err,
    }
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share the input if it persists.",
    )
}

fn emit_json(
    value: Value,
    color_mode: ColorMode,
    force_pretty: bool,
    discriminators: &[&'static str],
) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let pretty = force_pretty || is_tty || use_color;
    let json = if pretty {
        Highlighter::new(use_color, discriminators).render(&value)
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
    Green,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::MalformedInput => "malformed input".to_string(),
        ErrorKind::NoMatchingVariant => "entry matches no registered shape".to_string(),
        ErrorKind::AmbiguousVariant => "entry matches more than one shape".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_shapes(err: &Error) -> Vec<String> {
    if !err.matched().is_empty() {
        return err.matched().iter().map(|name| name.to_string()).collect();
    }
    err.mismatches().iter().map(ToString::to_string).collect()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    let shapes = error_shapes(err);
    if !shapes.is_empty() {
        inner.insert("shapes".to_string(), json!(shapes));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(index) = err.index() {
        lines.push(format!(
            "{} {index}",
            colorize_label("entry:", use_color, AnsiColor::Yellow)
        ));
    }
    for shape in error_shapes(err) {
        lines.push(format!(
            "{} {shape}",
            colorize_label("shape:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn report_json(report: &ValidationReport) -> Value {
    let issues = report
        .issues
        .iter()
        .map(|issue| {
            json!({
                "code": issue.code,
                "message": issue.message,
                "index": issue.index,
                "shapes": issue.shapes,
            })
        })
        .collect::<Vec<_>>();
    json!({
        "source": report.source,
        "status": if report.is_ok() { "ok" } else { "invalid" },
        "entry_count": report.entry_count,
        "issue_count": report.issue_count,
        "issues": issues,
        "remediation_hints": report.remediation_hints,
    })
}

fn emit_report_human(report: &ValidationReport, use_color: bool) {
    let source = report.source.as_deref().unwrap_or("<document>");
    if report.is_ok() {
        println!(
            "{} {source} ({} entries)",
            colorize_label("ok", use_color, AnsiColor::Green),
            report.entry_count
        );
        return;
    }
    println!(
        "{} {source} ({} of {} entries rejected)",
        colorize_label("invalid", use_color, AnsiColor::Red),
        report.issue_count,
        report.entry_count
    );
    for issue in &report.issues {
        let at = issue
            .index
            .map(|index| format!("entry {index}"))
            .unwrap_or_else(|| "document".to_string());
        println!("  {at}: [{}] {}", issue.code, issue.message);
        for shape in &issue.shapes {
            println!("    {shape}");
        }
    }
    for hint in &report.remediation_hints {
        println!("  {} {hint}", colorize_label("hint:", use_color, AnsiColor::Yellow));
    }
}

fn report_exit_code(reports: &[ValidationReport]) -> i32 {
    let first_code = reports
        .iter()
        .flat_map(|report| report.issues.iter())
        .map(|issue| issue.code.as_str())
        .next();
    let kind = match first_code {
        None => return 0,
        Some("malformed-input") => ErrorKind::MalformedInput,
        Some("ambiguous-variant") => ErrorKind::AmbiguousVariant,
        Some(_) => ErrorKind::NoMatchingVariant,
    };
    to_exit_code(kind)
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);
    let Some(usage) = usage else {
        return "Try `oneshape --help`.".to_string();
    };
    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let subcommand = tokens
        .iter()
        .skip_while(|token| **token != "oneshape")
        .nth(1)
        .filter(|token| !token.starts_with(['-', '<', '[']));
    match subcommand {
        Some(name) => format!("Try `oneshape {name} --help`."),
        None => "Try `oneshape --help`.".to_string(),
    }
}
