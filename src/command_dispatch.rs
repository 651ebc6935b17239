//! Purpose: Hold top-level CLI command dispatch for `oneshape`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Library calls go through `oneshape::api`; no decode logic lives here.
//! Invariants: Successful commands write exactly one JSON value (or human report) to stdout.

use super::*;
use oneshape::api::{Document, parse_value, value_differences};

pub(super) fn dispatch_command(
    command: Command,
    decoder: &Decoder,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "oneshape", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_json(
                json!({ "name": "oneshape", "version": env!("CARGO_PKG_VERSION") }),
                color_mode,
                false,
                &[],
            );
            Ok(RunOutcome::ok())
        }
        Command::Shapes { json } => {
            let registry = decoder.registry();
            if json {
                let shapes = registry
                    .shapes()
                    .iter()
                    .map(|shape| json!({ "name": shape.name(), "fields": shape.fields() }))
                    .collect::<Vec<_>>();
                emit_json(json!({ "shapes": shapes }), color_mode, false, &[]);
            } else {
                for shape in registry.shapes() {
                    let fields = shape
                        .fields()
                        .iter()
                        .map(|field| format!("\"{field}\": <text>"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("{{\"{}\": {{{fields}}}}}", shape.name());
                }
            }
            Ok(RunOutcome::ok())
        }
        Command::Decode { input } => {
            let input = read_input(input.as_deref())?;
            let doc = decode_input(decoder, &input)?;
            emit_json(describe_document(&doc), color_mode, false, &[]);
            Ok(RunOutcome::ok())
        }
        Command::Encode { input, pretty } => {
            let input = read_input(input.as_deref())?;
            let doc = decode_input(decoder, &input)?;
            let names = decoder.registry().names();
            emit_json(doc.to_value()?, color_mode, pretty, &names);
            Ok(RunOutcome::ok())
        }
        Command::Check { inputs, json } => {
            let mut reports = Vec::new();
            if inputs.is_empty() {
                let input = read_stdin()?;
                reports.push(check_input(decoder, &input));
            } else {
                for path in &inputs {
                    let input = read_input(Some(path.as_path()))?;
                    reports.push(check_input(decoder, &input));
                }
            }

            if json {
                let values = reports.iter().map(report_json).collect::<Vec<_>>();
                emit_json(json!({ "reports": values }), color_mode, false, &[]);
            } else {
                let use_color = color_mode.use_color(io::stdout().is_terminal());
                for report in &reports {
                    emit_report_human(report, use_color);
                }
            }
            Ok(RunOutcome::with_code(report_exit_code(&reports)))
        }
        Command::Roundtrip { input } => {
            let input = read_input(input.as_deref())?;
            let original = parse_value(&input.bytes, &input.label)?;
            let doc = decoder.decode_document(&original)?;
            let encoded = doc.to_value()?;
            let again = decoder.decode_document(&encoded)?;
            if again != doc {
                return Err(Error::new(ErrorKind::Internal)
                    .with_message("re-decoded document differs from the decoded original"));
            }
            let differences = value_differences(&original, &encoded)
                .iter()
                .map(|diff| json!({ "op": diff.label(), "path": diff.path() }))
                .collect::<Vec<_>>();
            emit_json(
                json!({
                    "source": input.label,
                    "entries": doc.len(),
                    "equal": true,
                    "differences": differences,
                }),
                color_mode,
                false,
                &[],
            );
            Ok(RunOutcome::ok())
        }
    }
}

fn decode_input(decoder: &Decoder, input: &Input) -> Result<Document, Error> {
    let raw = parse_value(&input.bytes, &input.label)?;
    decoder.decode_document(&raw)
}

fn check_input(decoder: &Decoder, input: &Input) -> ValidationReport {
    decoder
        .validate_document_slice(&input.bytes)
        .with_source(input.label.clone())
}

fn describe_document(doc: &Document) -> Value {
    let entries = doc
        .variants()
        .enumerate()
        .map(|(index, variant)| {
            json!({
                "index": index,
                "kind": variant.discriminator(),
                "value": variant.value(),
            })
        })
        .collect::<Vec<_>>();
    json!({ "name": doc.name(), "entries": entries })
}
