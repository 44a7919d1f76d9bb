//! Command-line entry point for `hashwalk`.
//!
//! Declares the option schema for [`WalkerConfig`], rebuilds the raw
//! command line from argv, and drives tokenize → help check → bind →
//! scan. Exit codes: 0 on success or `-h`, 1 on a schema/usage error
//! (printed with a context caret and the help text), 2 when the scan
//! itself fails.

use std::process::ExitCode;

use hashwalk_args::{
    ParseError, Schema, SchemaError, Strictness, annotate, render_help, tokenize,
};
use hashwalk_walker::{WalkerConfig, walk, write_duplicates, write_report};

const HELP_WIDTH: usize = 100;

const USAGE: &str = "hashwalk -i=FOLDER,... [-a=Algorithm] [-f=Format] [-o=Path] [-d=Path] \
                     [-m=Number] [-x=Number] [-n=Timespan] [-j=Number] [-s] [-e] [-h]";

const ABOUT: &str = "Walks the given folders, computes a digest for every file found, and \
                     writes one report line per file. Files sharing a digest can be written \
                     to a separate duplicates report.";

fn build_schema() -> Result<Schema<WalkerConfig>, SchemaError> {
    Schema::builder("hashwalk", USAGE, ABOUT)
        .array('i', Some("input"), "Folders to scan for files to hash.", |c: &mut WalkerConfig, v| {
            c.inputs = v
        })
        .required()
        .single('a', Some("algorithm"), "Digest algorithm: sha224, sha256, sha384, sha512, xxh32 or xxh64.", |c, v| {
            c.algorithm = v
        })
        .single('f', Some("format"), "Report format: csv, json or plain.", |c, v| {
            c.format = v
        })
        .single('o', Some("output"), "Write the report to this file instead of stdout.", |c, v| {
            c.output = Some(v)
        })
        .single('d', Some("duplicates"), "Write files sharing a digest to this file.", |c, v| {
            c.duplicates = Some(v)
        })
        .single('m', Some("minsize"), "Skip files smaller than this many bytes.", |c, v| {
            c.min_size = v
        })
        .single('x', Some("maxdepth"), "Descend at most this many folder levels; 0 means unlimited.", |c, v| {
            c.max_depth = v
        })
        .single('n', Some("newer"), "Only hash files modified within this time span.", |c, v| {
            c.newer_than = Some(v)
        })
        .single('j', Some("jobs"), "Number of hashing threads; 0 picks one per core.", |c, v| {
            c.jobs = v
        })
        .flag('s', Some("symlinks"), "Follow symbolic links while walking.", |c| {
            c.follow_symlinks = true
        })
        .flag('e', Some("errors"), "Report unreadable files instead of aborting on them.", |c| {
            c.show_errors = true
        })
        .flag('h', Some("help"), "Print this help text.", |c| c.help = true)
        .build()
}

fn main() -> ExitCode {
    init_tracing();
    let line = raw_command_line();
    run(&line)
}

fn run(line: &str) -> ExitCode {
    let schema = match build_schema() {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(err) => return usage_error(&schema, line, &ParseError::from(err)),
    };

    // Help wins before any other option is examined.
    if tokens.iter().any(|t| t.key == "h" || t.key == "help") {
        print!("{}", render_help(&schema, HELP_WIDTH));
        return ExitCode::SUCCESS;
    }

    let mut config = WalkerConfig::default();
    if let Err(err) = schema.bind(&tokens, &mut config, Strictness::Strict) {
        return usage_error(&schema, line, &ParseError::from(err));
    }

    match scan(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

fn scan(config: &WalkerConfig) -> hashwalk_walker::Result<()> {
    let report = walk(config)?;
    write_report(&report, config)?;
    write_duplicates(&report, config)?;
    for message in &report.errors {
        eprintln!("warning: {message}");
    }
    Ok(())
}

fn usage_error(schema: &Schema<WalkerConfig>, line: &str, err: &ParseError) -> ExitCode {
    eprintln!("Error: {err}");
    if let Some(position) = err.position() {
        eprintln!("{}", annotate(line, position));
    }
    eprint!("{}", render_help(schema, HELP_WIDTH));
    ExitCode::FAILURE
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Rebuilds a raw command line from argv.
///
/// The shell already stripped quoting, so arguments containing
/// whitespace are re-quoted here to keep the tokenizer's grammar intact.
/// For `-tag=value` arguments only the value side is quoted.
fn raw_command_line() -> String {
    std::env::args()
        .map(|arg| quote_arg(&arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if !arg.chars().any(char::is_whitespace) {
        return arg.to_string();
    }
    if let Some((tag, value)) = arg.split_once('=') {
        if tag.starts_with('-') && !tag.chars().any(char::is_whitespace) {
            return format!("{tag}={}", quoted(value));
        }
    }
    quoted(arg)
}

/// Wraps `text` in the first quote character it does not contain.
fn quoted(text: &str) -> String {
    for quote in ['"', '\'', '`'] {
        if !text.contains(quote) {
            return format!("{quote}{text}{quote}");
        }
    }
    // All three quote characters appear in the text; no lossless
    // rendition exists, so fall back to double quotes.
    format!("\"{text}\"")
}
