//! End‑to‑end pipeline for one chunk of source text:
//! scan → parse → resolve → interpret.
//!
//! A [`Session`] keeps one interpreter alive, so globals defined by one
//! `run` are visible to the next (the REPL feeds it one line at a time).
//! Each `run` gets its own [`Diagnostics`], so one bad line does not poison
//! the ones after it.

use std::io::{self, Stdout, Write};

use log::{debug, info};
use thiserror::Error;

use crate::error::{Diagnostics, LoxError};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;

/// Process exit code for scan, parse and resolve failures.
pub const EXIT_STATIC_ERROR: i32 = 65;

/// Process exit code for an uncaught runtime error.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Why a `run` failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// One or more static diagnostics; nothing was executed.
    #[error("{0}")]
    Static(Diagnostics),

    /// Execution started and stopped at this error.
    #[error("{0}")]
    Runtime(LoxError),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => EXIT_STATIC_ERROR,
            RunError::Runtime(_) => EXIT_RUNTIME_ERROR,
        }
    }
}

pub struct Session<W: Write = Stdout> {
    interpreter: Interpreter<W>,
}

impl Session<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Session<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Session<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
        }
    }

    pub fn interpreter(&mut self) -> &mut Interpreter<W> {
        &mut self.interpreter
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    /// Run `source`.  Any static diagnostic skips execution entirely.
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let mut diagnostics = Diagnostics::new();

        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens).parse(&mut diagnostics);

        // Resolving a partial AST still surfaces its own errors in the same run.
        let locals = Resolver::new(&mut diagnostics).resolve(&statements);

        if diagnostics.had_error() {
            debug!("{} diagnostic(s); skipping execution", diagnostics.len());

            return Err(RunError::Static(diagnostics));
        }

        // Only programs that will actually run leave entries behind.
        self.interpreter.add_locals(locals);

        debug!(
            "{} resolved local(s) held by the interpreter",
            self.interpreter.local_count()
        );

        info!("Running {} statement(s)", statements.len());

        self.interpreter
            .interpret(&statements)
            .map_err(RunError::Runtime)
    }
}
