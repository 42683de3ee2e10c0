//! wispc-drv - the interpreter's command-line driver.
//!
//! Wires the three pipeline stages together: `wispc-lex` tokenizes,
//! `wispc-par` parses, `wispc-interp` evaluates. Per the external
//! interface contract, the driver reads a single fixed source file,
//! runs it to completion, and writes whatever `print` collected to
//! standard output, trimmed of leading and trailing blank lines.
//!
//! Nothing here is reusable library surface for another crate; it
//! exists to give `src/main.rs` a thin, testable `main` to call and to
//! let the e2e tests below exercise the whole pipeline through a single
//! binary rather than through any one stage's internals.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// The default source file the driver reads when no path is given on
/// the command line. Relative to the process's current directory.
pub const DEFAULT_SOURCE_PATH: &str = "run/interpret.txt";

/// Driver configuration: currently just which file to interpret. Kept
/// as its own type rather than a bare `PathBuf` parameter so a future
/// flag (`--verbose`, an alternate entry point) has somewhere to live
/// without changing every call site.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config { source_path: PathBuf::from(DEFAULT_SOURCE_PATH) }
    }
}

impl Config {
    /// Builds a `Config` from process arguments (excluding `argv[0]`).
    /// The only recognized form is a single positional path overriding
    /// [`DEFAULT_SOURCE_PATH`]; anything else falls back to the default
    /// rather than erroring, since the external interface names no
    /// other flags.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        match args.next() {
            Some(path) => Config { source_path: PathBuf::from(path) },
            None => Config::default(),
        }
    }
}

/// Reads, lexes, parses, and evaluates the file named by `config`,
/// returning the joined `print` output exactly as [`wispc_interp::Interpreter::run`]
/// produces it.
pub fn run(config: &Config) -> anyhow::Result<String> {
    let source = read_source(&config.source_path)?;
    interpret(&source)
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Runs the three pipeline stages over already-loaded source text.
/// Split out from [`run`] so tests can exercise it without touching the
/// filesystem.
pub fn interpret(source: &str) -> anyhow::Result<String> {
    let tokens = wispc_lex::Lexer::tokenize_source(source)?;
    let program = wispc_par::parse(tokens)?;
    let output = wispc_interp::Interpreter::new().run(&program)?;
    Ok(output)
}

/// Entry point called by `src/main.rs`. Parses the process's own
/// arguments, runs the pipeline, and prints the result to standard
/// output. Errors are returned rather than printed here so `main.rs`
/// controls the exit code and stderr formatting in one place.
pub fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args().skip(1));
    let output = run(&config)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interprets_source_text_directly() {
        assert_eq!(interpret("print(1 + 2)\n").unwrap(), "3");
    }

    #[test]
    fn default_config_points_at_the_fixed_relative_path() {
        let config = Config::default();
        assert_eq!(config.source_path, PathBuf::from("run/interpret.txt"));
    }

    #[test]
    fn from_args_with_no_arguments_uses_the_default() {
        let config = Config::from_args(std::iter::empty());
        assert_eq!(config.source_path, PathBuf::from("run/interpret.txt"));
    }

    #[test]
    fn from_args_takes_the_first_argument_as_an_override() {
        let config = Config::from_args(std::iter::once("demos/hello.txt".to_string()));
        assert_eq!(config.source_path, PathBuf::from("demos/hello.txt"));
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        let config = Config { source_path: PathBuf::from("/no/such/file/exists.txt") };
        assert!(run(&config).is_err());
    }

    #[test]
    fn propagates_a_lex_error_through_anyhow() {
        let err = interpret("x = #\n").unwrap_err();
        assert!(err.to_string().contains("LexError"));
    }

    #[test]
    fn propagates_a_name_error_through_anyhow() {
        let err = interpret("print(missing)\n").unwrap_err();
        assert!(err.to_string().contains("NameError"));
    }
}
