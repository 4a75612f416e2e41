//! `xenon`: run or check a Xenon source file.
//!
//! ```text
//! xenon program.xn            run
//! xenon -i program.xn         run
//! xenon --check program.xn    static checks only
//! ```
//!
//! Program output goes to stdout, diagnostics and logs to stderr. The exit
//! code is 0 on success, 1 for lex/parse/name/type/access errors (and for
//! unreadable input), 2 for runtime errors.

use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use xenon_interp::{
    Completion, Config, DEFAULT_MAX_CALL_DEPTH, MAX_CALL_DEPTH, check_source, run_source,
};
use xenon_log::{debug, info};
use xenon_syntax::{Diagnostic, DiagnosticBuilder, DiagnosticLevel, Emitter};

/// Required source file extension.
const EXTENSION: &str = "xn";

/// Xenon is a small statically-typed, class-based scripting language.
#[derive(Parser, Debug)]
#[command(name = "xenon", version, about, long_about = None)]
struct Args {
    /// Source file to run (`.xn`).
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Source file to run, as a positional argument.
    #[arg(value_name = "FILE", conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Run the static checks only; nothing is executed.
    #[arg(long)]
    check: bool,

    /// Deepest allowed nesting of method calls and object constructions.
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_CALL_DEPTH,
        value_parser = parse_call_depth
    )]
    max_call_depth: usize,

    /// Log level (error, warn, info, debug, trace); overrides `XENON_LOG`.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Disable ANSI colors in diagnostics and logs.
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn source_path(&self) -> Option<&Path> {
        self.input.as_deref().or(self.file.as_deref())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(message) = init_logging(&args) {
        eprintln!("xenon: {message}");
        return ExitCode::from(1);
    }

    let Some(path) = args.source_path() else {
        eprintln!("xenon: no input file (use `xenon <FILE>` or `xenon -i <FILE>`)");
        return ExitCode::from(1);
    };

    if let Err(message) = validate_extension(path) {
        eprintln!("xenon: {message}");
        return ExitCode::from(1);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("xenon: cannot read '{}': {err}", path.display());
            return ExitCode::from(1);
        }
    };

    info!("{} ({} bytes)", path.display(), source.len());
    let config = Config::default().with_max_call_depth(args.max_call_depth);

    let completion = execute(&source, args.check, config);
    debug!("completion: {completion:?}");

    if let Some(diagnostic) = diagnostic(&completion) {
        Emitter::new(!args.no_color)
            .with_filename(path.display().to_string())
            .emit(&diagnostic, &source);
    }

    ExitCode::from(u8::try_from(completion.exit_code()).unwrap_or(2))
}

fn init_logging(args: &Args) -> Result<(), String> {
    xenon_log::set_colors(!args.no_color);
    match &args.log_level {
        Some(level) => xenon_log::set_level_from_str(level),
        None => xenon_log::init_from_env().map(|_| ()),
    }
}

fn validate_extension(path: &Path) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(EXTENSION) => Ok(()),
        _ => Err(format!(
            "'{}' is not a Xenon source file (expected a .{EXTENSION} extension)",
            path.display()
        )),
    }
}

fn parse_call_depth(arg: &str) -> Result<usize, String> {
    let depth = arg.parse::<usize>().map_err(|err| err.to_string())?;
    if (1..=MAX_CALL_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("must be between 1 and {MAX_CALL_DEPTH}"))
    }
}

/// Runs the pipeline, streaming program output to stdout.
fn execute(source: &str, check_only: bool, config: Config) -> Completion {
    if check_only {
        return check_source(source);
    }

    let mut out = BufWriter::new(io::stdout());
    let completion = run_source(source, &mut out, &config);
    // Output written before a runtime error must still reach stdout.
    if let Err(message) = flush_output(&mut out) {
        eprintln!("xenon: {message}");
    }
    completion
}

fn flush_output<W: Write>(out: &mut W) -> Result<(), String> {
    out.flush()
        .map_err(|err| format!("cannot write program output: {err}"))
}

/// Diagnostic for a failed run.
fn diagnostic(completion: &Completion) -> Option<Diagnostic> {
    let (kind, message) = (completion.kind()?, completion.message()?);
    let builder = DiagnosticBuilder::new(DiagnosticLevel::Error, message).code(kind.label());
    let builder = match completion.span() {
        Some(span) => builder.span(span),
        None => builder,
    };
    Some(builder.build())
}
