//! quill: Parse and check quill programs.
//!
//! Usage:
//!   quill [options] [SOURCE]
//!
//! With no SOURCE and no files, a built-in sample program is parsed.

use clap::Parser as ClapParser;
use miette::IntoDiagnostic;
use quill_compiler::{emit_module, parse_config_file, CompilerOptions, EmitAst, Program, QuillConfig};
use quill_diagnostics::{ContextRenderer, Diagnostic};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

const SAMPLE_SOURCE: &str = "let a = 1;\nlet c = 2;\ntype t = number;\nlet b: t = c = false;\n";

/// File name shown for source text given on the command line.
const INLINE_FILE_NAME: &str = "<input>";

#[derive(ClapParser, Debug)]
#[command(name = "quill", about = "quill - parse and check quill programs", version)]
struct Cli {
    /// Source text to parse.
    #[arg(value_name = "SOURCE")]
    source: Option<String>,

    /// Source files to parse.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    files: Vec<String>,

    /// Path to quill.json.
    #[arg(short = 'p', long = "config", value_name = "PATH")]
    config: Option<String>,

    /// Print each syntax tree: none, json or source.
    #[arg(long = "emit-ast", value_name = "MODE")]
    emit_ast: Option<EmitAst>,

    /// Stop printing diagnostics after this many.
    #[arg(long = "max-errors", value_name = "N")]
    max_errors: Option<usize>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Print per-file timing and statement counts.
    #[arg(short = 'v', long)]
    verbose: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let exit_code = run(&cli)?;
    if exit_code != 0 {
        process::exit(exit_code);
    }
    Ok(())
}

fn run(cli: &Cli) -> miette::Result<i32> {
    let start = Instant::now();

    let config = load_config(cli)?;
    let mut options = config
        .as_ref()
        .and_then(|(_, cfg)| cfg.compiler_options.clone())
        .unwrap_or_default();

    // Command-line flags override quill.json
    options.merge(&CompilerOptions {
        pretty: cli.no_color.then_some(false),
        max_errors: cli.max_errors,
        emit_ast: cli.emit_ast,
    });

    let mut program = Program::new(options);
    if let Some(ref source) = cli.source {
        program.add_source(INLINE_FILE_NAME, source.as_str());
    }
    let files: Vec<PathBuf> = if cli.files.is_empty() {
        config
            .map(|(path, cfg)| {
                // Config file entries are relative to the config itself.
                let base = path.parent().unwrap_or(Path::new(""));
                cfg.files
                    .unwrap_or_default()
                    .iter()
                    .map(|file| base.join(file))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        cli.files.iter().map(PathBuf::from).collect()
    };
    for file in &files {
        program.load_file(file)?;
    }
    if program.sources().is_empty() {
        program.add_source(INLINE_FILE_NAME, SAMPLE_SOURCE);
    }

    let result = program.parse_all();
    let use_color = program.options.pretty() && atty_is_terminal();

    if cli.verbose {
        for file in &result.files {
            let message = format!(
                "{}: {} statement{}, {} error{} in {:.3}ms",
                file.file_name,
                file.result.module.len(),
                plural(file.result.module.len()),
                file.result.diagnostics.error_count(),
                plural(file.result.diagnostics.error_count()),
                file.elapsed.as_secs_f64() * 1000.0
            );
            print_note(&message, use_color);
        }
    }

    let limit = program.options.max_errors().unwrap_or(usize::MAX);
    for diag in result.diagnostics.iter().take(limit) {
        print_diagnostic(&program, diag, use_color);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for file in &result.files {
        if let Some(text) = emit_module(&file.result.module, program.options.emit_ast())? {
            if result.files.len() > 1 {
                writeln!(out, "// {}", file.file_name).into_diagnostic()?;
            }
            write!(out, "{}", text).into_diagnostic()?;
            if !text.ends_with('\n') {
                writeln!(out).into_diagnostic()?;
            }
        }
    }

    if cli.verbose {
        let message = format!("Parsed in {:.2}s.", start.elapsed().as_secs_f64());
        print_note(&message, use_color);
    }

    if result.has_errors() {
        let count = result.error_count();
        if use_color {
            eprintln!("\n{}Found {} error{}.{}", RED, count, plural(count), RESET);
        } else {
            eprintln!("\nFound {} error{}.", count, plural(count));
        }
        return Ok(2);
    }

    Ok(0)
}

/// Read the config named by `--config`, or quill.json in the working
/// directory when it exists. Returns the config with the path it came from.
fn load_config(cli: &Cli) -> miette::Result<Option<(PathBuf, QuillConfig)>> {
    let path = match cli.config {
        Some(ref path) => PathBuf::from(path),
        None if Path::new("quill.json").exists() => PathBuf::from("quill.json"),
        None => return Ok(None),
    };
    let config = parse_config_file(&path)?;
    Ok(Some((path, config)))
}

fn print_diagnostic(program: &Program, diag: &Diagnostic, use_color: bool) {
    let source = diag
        .file
        .as_deref()
        .and_then(|file| program.source(file));
    match source {
        Some(source) => {
            let rendered = ContextRenderer::new(&source.text)
                .with_color(use_color)
                .render(diag);
            eprint!("{}", rendered);
        }
        None => eprintln!("{}", diag),
    }
}

fn print_note(message: &str, use_color: bool) {
    if use_color {
        eprintln!("{}{}{}", GRAY, message, RESET);
    } else {
        eprintln!("{}", message);
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
