// Command-line front end for templatemaker.
//
// Subcommands learn a template from two sample files, extract data from a
// third file with a stored template, and expose the matcher and marker for
// inspection.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::builder::{MARKER, Tolerance};
use crate::clean::CleanMode;
use crate::io as tio;
use crate::template::TemplateOptions;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DEFAULT_TOLERANCE: i64 = 0;

/// Field name that skips a hole in `extract --field`.
const SKIP_FIELD: &str = "-";

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Learn templates from sample pairs and extract data with them.
#[derive(Parser, Debug)]
#[command(
    name = "templatemaker",
    version,
    about = "Template learner and data extractor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Learn a template from two sample files.
    Make(MakeArgs),
    /// Extract the hole values of a file using a stored template.
    Extract(ExtractArgs),
    /// Print the longest run shared by two files.
    Match(MatchArgs),
    /// Print the hole marker byte.
    Marker,
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct MakeArgs {
    /// First sample; literal text in the template is copied from it.
    #[arg(value_hint = ValueHint::FilePath)]
    first: PathBuf,

    /// Second sample.
    #[arg(value_hint = ValueHint::FilePath)]
    second: PathBuf,

    /// Shared runs must be longer than this many bytes to be kept.
    #[arg(long, short = 't', default_value_t = DEFAULT_TOLERANCE, allow_negative_numbers = true)]
    tolerance: i64,

    /// Drop <script>, <style> and <noscript> elements before comparing.
    #[arg(long)]
    html: bool,

    /// Render holes as this text instead of the raw marker byte.
    #[arg(long = "hole-text", value_name = "TEXT")]
    hole_text: Option<String>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Template file produced by `make` (without --hole-text).
    #[arg(value_hint = ValueHint::FilePath)]
    template: PathBuf,

    /// File to extract data from.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Apply HTML cleaning to the input, as used when learning.
    #[arg(long)]
    html: bool,

    /// Name for the next hole (repeat in hole order; `-` skips a hole).
    #[arg(long = "field", value_name = "NAME", action = ArgAction::Append)]
    fields: Vec<String>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    first: PathBuf,

    #[arg(value_hint = ValueHint::FilePath)]
    second: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Make,
    Extract,
    Match,
    Marker,
    Config,
}

struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    tolerance: i64,
    clean: CleanMode,
    hole_text: Option<String>,
    fields: Vec<String>,
    first_file: Option<PathBuf>,
    second_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl Options {
    /// Options carrying only the global flags.
    fn global(command: Command, cli: &Cli) -> Self {
        Self {
            command,
            use_stdout: false,
            force: cli.force,
            quiet: cli.quiet,
            verbose: cli.verbose.min(2),
            json_output: cli.json_output,
            tolerance: DEFAULT_TOLERANCE,
            clean: CleanMode::Plain,
            hole_text: None,
            fields: Vec::new(),
            first_file: None,
            second_file: None,
            output_file: None,
        }
    }
}

fn clean_mode(html: bool) -> CleanMode {
    if html { CleanMode::Html } else { CleanMode::Plain }
}

fn resolve_options(cli: Cli) -> Options {
    let base = Options::global(Command::Config, &cli);

    match cli.command {
        Cmd::Make(args) => Options {
            command: Command::Make,
            use_stdout: args.stdout,
            tolerance: args.tolerance,
            clean: clean_mode(args.html),
            hole_text: args.hole_text,
            first_file: Some(args.first),
            second_file: Some(args.second),
            output_file: args.output.or(args.output_pos),
            ..base
        },
        Cmd::Extract(args) => Options {
            command: Command::Extract,
            clean: clean_mode(args.html),
            fields: args.fields,
            first_file: Some(args.template),
            second_file: Some(args.input),
            ..base
        },
        Cmd::Match(args) => Options {
            command: Command::Match,
            first_file: Some(args.first),
            second_file: Some(args.second),
            ..base
        },
        Cmd::Marker => Options {
            command: Command::Marker,
            ..base
        },
        Cmd::Config => base,
    }
}

/// Map `--field` values to hole names, `-` meaning "skip this hole".
fn field_names(fields: &[String]) -> Vec<Option<&str>> {
    fields
        .iter()
        .map(|f| (f != SKIP_FIELD).then_some(f.as_str()))
        .collect()
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("templatemaker".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn open_output(opts: &Options) -> Result<Box<dyn Write>, String> {
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        )) as Box<dyn Write>),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                return Err(format!(
                    "output file exists, use -f to overwrite: {}",
                    path.display()
                ));
            }
            File::create(path)
                .map(|f| Box::new(BufWriter::with_capacity(BUF_SIZE, f)) as Box<dyn Write>)
                .map_err(|e| format!("output file: {}: {e}", path.display()))
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("templatemaker: json error: {e}"),
    }
}

fn required<'a>(path: &'a Option<PathBuf>, what: &str) -> Result<&'a Path, String> {
    path.as_deref().ok_or_else(|| format!("{what} file is required"))
}

// ---------------------------------------------------------------------------
// Make command
// ---------------------------------------------------------------------------

fn cmd_make(opts: &Options) -> i32 {
    match run_make(opts) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("templatemaker: {e}");
            1
        }
    }
}

fn run_make(opts: &Options) -> Result<(), String> {
    let tolerance = Tolerance::try_from(opts.tolerance).map_err(|e| e.to_string())?;
    let first = required(&opts.first_file, "first sample")?;
    let second = required(&opts.second_file, "second sample")?;
    let template_opts = TemplateOptions {
        tolerance,
        clean: opts.clean,
    };

    let (template, stats) =
        tio::make_template_files(first, second, &template_opts).map_err(|e| e.to_string())?;

    let rendered = match &opts.hole_text {
        Some(text) => template.as_text(text.as_bytes()),
        None => template.into_bytes(),
    };

    let mut writer = open_output(opts)?;
    writer
        .write_all(&rendered)
        .and_then(|()| writer.flush())
        .map_err(|e| format!("write error: {e}"))?;

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "templatemaker: make: sizes: {} / {}, template: {} bytes, holes: {}, tolerance: {tolerance}",
            stats.a_size, stats.b_size, stats.template_size, stats.holes
        );
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "make",
            "first_size": stats.a_size,
            "second_size": stats.b_size,
            "template_size": stats.template_size,
            "holes": stats.holes,
            "literal_bytes": stats.literal_bytes,
            "tolerance": tolerance.get(),
        }));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Extract command
// ---------------------------------------------------------------------------

fn cmd_extract(opts: &Options) -> i32 {
    match run_extract(opts) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("templatemaker: {e}");
            1
        }
    }
}

fn lossy(bytes: &[u8]) -> serde_json::Value {
    serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
}

fn run_extract(opts: &Options) -> Result<(), String> {
    let template = required(&opts.first_file, "template")?;
    let input = required(&opts.second_file, "input")?;

    let (result, holes) = if opts.fields.is_empty() {
        let values = tio::extract_file(template, input, opts.clean).map_err(|e| e.to_string())?;
        let array = values.iter().map(|v| lossy(v)).collect();
        (serde_json::Value::Array(array), values.len())
    } else {
        let names = field_names(&opts.fields);
        let values = tio::extract_file_fields(template, input, opts.clean, &names)
            .map_err(|e| e.to_string())?;
        let object = values.iter().map(|(k, v)| (k.clone(), lossy(v))).collect();
        (serde_json::Value::Object(object), values.len())
    };

    let rendered = serde_json::to_string_pretty(&result).map_err(|e| format!("json error: {e}"))?;
    println!("{rendered}");

    if opts.verbose > 0 && !opts.quiet {
        eprintln!("templatemaker: extract: {holes} values from {}", input.display());
    }
    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "extract",
            "values": holes,
        }));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Match command
// ---------------------------------------------------------------------------

fn cmd_match(opts: &Options) -> i32 {
    match run_match(opts) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("templatemaker: {e}");
            1
        }
    }
}

fn run_match(opts: &Options) -> Result<(), String> {
    let first = required(&opts.first_file, "first")?;
    let second = required(&opts.second_file, "second")?;
    let found = tio::match_files(first, second).map_err(|e| e.to_string())?;

    match found {
        Some(m) => {
            println!("length:   {}", m.length);
            println!("a_offset: {}", m.a_offset);
            println!("b_offset: {}", m.b_offset);
        }
        None => println!("no common run"),
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "match",
            "length": found.map_or(0, |m| m.length),
            "a_offset": found.map(|m| m.a_offset),
            "b_offset": found.map(|m| m.b_offset),
        }));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Marker / config commands
// ---------------------------------------------------------------------------

fn cmd_marker() -> i32 {
    println!("0x{MARKER:02x}");
    0
}

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("templatemaker version {version} (Rust)");

    let cli = cfg!(feature = "cli") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("CLI={cli}");
    eprintln!("MARKER=0x{MARKER:02x}");
    eprintln!("DEFAULT_TOLERANCE={DEFAULT_TOLERANCE}");
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    let default_filter = match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout
        && !opts.quiet
        && let Some(path) = &opts.output_file
    {
        eprintln!(
            "templatemaker: warning: -c option overrides output filename: {}",
            path.display()
        );
    }
    if opts.use_stdout {
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::Make => cmd_make(&opts),
        Command::Extract => cmd_extract(&opts),
        Command::Match => cmd_match(&opts),
        Command::Marker => cmd_marker(),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
