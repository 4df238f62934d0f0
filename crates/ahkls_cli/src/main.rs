//! ahkls: the AutoHotkey language-server driver.
//!
//! Usage:
//!   ahkls [options] [file...]
//!
//! Parses the given scripts and prints their diagnostics; `--lsp` serves the
//! editor protocol over stdio instead.

use ahkls_ast::SyntaxNode;
use clap::Parser as ClapParser;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "ahkls", about = "AutoHotkey language server and script checker")]
struct Cli {
    /// Script files to check.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Print each statement's reconstructed source lines.
    #[arg(long)]
    ast: bool,

    /// Print the raw include paths each script registers.
    #[arg(long)]
    includes: bool,

    /// Start the language server on stdio.
    #[arg(long)]
    lsp: bool,

    /// Print the version.
    #[arg(short = 'v', long)]
    version: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("ahkls {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if cli.lsp {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(ahkls_lsp::start_lsp_server());
        return;
    }

    if cli.files.is_empty() {
        print_error("No input files.");
        process::exit(1);
    }

    let mut error_count = 0usize;
    for file in &cli.files {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                print_error(&format!("Failed to read '{}': {}", file, e));
                error_count += 1;
                continue;
            }
        };

        let parsed = ahkls_parser::Parser::new(&source, file).parse();
        let use_color = stderr_is_terminal();

        let diagnostics = parsed.all_diagnostics();
        error_count += diagnostics.error_count();
        for diagnostic in diagnostics {
            print_diagnostic(file, &diagnostic, use_color);
        }

        if cli.ast {
            for stmt in &parsed.script.statements {
                for line in stmt.to_lines() {
                    println!("{}", line);
                }
            }
        }

        if cli.includes {
            for include in &parsed.script.includes {
                println!("{}: {}", file, include);
            }
        }
    }

    if error_count > 0 {
        eprintln!(
            "\nFound {} error{}.",
            error_count,
            if error_count == 1 { "" } else { "s" }
        );
        process::exit(2);
    }
}

fn print_diagnostic(file: &str, diag: &ahkls_diagnostics::Diagnostic, use_color: bool) {
    if use_color {
        let color = if diag.is_error() { RED } else { YELLOW };
        let category = if diag.is_error() { "error" } else { "warning" };
        eprintln!(
            "{}{}{}({}): {}{}{}{}: {}",
            CYAN,
            file,
            RESET,
            diag.range.start,
            BOLD,
            color,
            category,
            RESET,
            diag.message
        );
    } else {
        eprintln!("{}({}): {}: {}", file, diag.range.start, diag.severity, diag.message);
    }
}

fn print_error(msg: &str) {
    if stderr_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
