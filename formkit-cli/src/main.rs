mod sample;

use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use formkit::prelude::*;
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

const LOG_FILE: &str = "formkit.log";
const USAGE: &str = "Usage: formkit [--verbose] [--spec <form.json>] [name=value ...]

Fills the form with the given values and submits it. File fields take a path.
Prints the submitted values as JSON, or the field errors when invalid.";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Args {
    verbose: bool,
    spec: Option<String>,
    assignments: Vec<(String, String)>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => parsed.verbose = true,
            "--spec" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--spec needs a path".to_string()))?;
                parsed.spec = Some(path);
            }
            "-h" | "--help" => return Err(CliError::Usage("Help requested".to_string())),
            _ => {
                let (name, value) = arg
                    .split_once('=')
                    .ok_or_else(|| CliError::Usage(format!("Expected name=value, got '{}'", arg)))?;
                parsed.assignments.push((name.to_string(), value.to_string()));
            }
        }
    }
    Ok(parsed)
}

fn init_logging(verbose: bool) {
    let result = if verbose {
        TermLogger::init(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
    } else {
        match File::create(LOG_FILE) {
            Ok(log_file) => WriteLogger::init(LevelFilter::Debug, Config::default(), log_file),
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", LOG_FILE, e);
                return;
            }
        }
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

fn read_file(path: &str) -> Result<FilePayload, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(FilePayload::new(name, bytes))
}

/// Convert a command-line string into a value fitting the field.
fn parse_value(form: &Form, name: &str, raw: &str) -> Result<FieldValue, CliError> {
    let input_type = form
        .field(name)
        .map(|f| f.input_type)
        .ok_or_else(|| FormError::unknown_field(name))?;
    let value = match input_type {
        InputType::Checkbox => FieldValue::Bool(matches!(raw, "true" | "1" | "on" | "yes")),
        InputType::File => FieldValue::File(read_file(raw)?),
        _ if raw.is_empty() => FieldValue::Empty,
        _ => FieldValue::from(raw),
    };
    Ok(value)
}

fn print_errors(form: &Form) {
    form.with_fields(|fields| {
        for field in fields {
            if let Some(message) = field.visible_error() {
                eprintln!("{}: {}", field.name, if message.is_empty() { "invalid" } else { message });
            }
        }
    });
}

fn run(args: Args) -> Result<ExitCode, CliError> {
    let spec = match &args.spec {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            FormSpec::from_json(&json)?
        }
        None => sample::add_post()?,
    };

    let scope = Scope::new();
    let form = Form::mount(spec, &scope);
    let notifier = |toast: Toast| eprintln!("[{:?}] {}", toast.level, toast.message);

    for (name, raw) in &args.assignments {
        let Some(value) = try_notify(&notifier, || parse_value(&form, name, raw)) else {
            return Ok(ExitCode::FAILURE);
        };
        form.set_value(name, value)?;
    }

    let submitted = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&submitted);
    let submit = form.handle_submit(move |values| {
        if let Ok(mut slot) = slot.lock() {
            *slot = Some(values);
        }
    });
    submit();

    let values = submitted.lock().ok().and_then(|mut slot| slot.take());
    let Some(values) = values else {
        print_errors(&form);
        return Ok(ExitCode::FAILURE);
    };

    info!("{} submitted {} values", form.id(), values.len());
    println!("{}", serde_json::to_string_pretty(&values)?);
    for part in values.to_form_data() {
        match part.body {
            PartBody::Text(text) => eprintln!("part {} = {}", part.name, text),
            PartBody::File(file) => eprintln!("part {} = <{} bytes, {}>", part.name, file.size(), file.mime()),
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_assignments() {
        let parsed = parse_args(args(&["-v", "body=Hello", "confirm=true"])).unwrap();
        assert!(parsed.verbose);
        assert_eq!(
            parsed.assignments,
            vec![
                ("body".to_string(), "Hello".to_string()),
                ("confirm".to_string(), "true".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bare_words() {
        assert!(matches!(parse_args(args(&["oops"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--spec"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_sample_form_requires_title_and_body() {
        let form = Form::new(sample::add_post().unwrap());
        form.set_value("confirm", parse_value(&form, "confirm", "yes").unwrap()).unwrap();
        assert!(form.submit().is_none());
        assert!(form.field("title").unwrap().is_error);
        assert!(form.field("body").unwrap().is_error);
        assert!(!form.field("confirm").unwrap().is_error);
    }

    #[test]
    fn test_repeated_logger_init_does_not_panic() {
        init_logging(true);
        init_logging(true);
        assert!(log::max_level() >= LevelFilter::Debug);
    }
}
