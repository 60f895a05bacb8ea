//! Warning channel for move validation.
//!
//! The validator reports every rejected move here. The sink is injected so
//! embedders can route diagnostics wherever they like; tests and library
//! defaults stay silent.

use std::fmt;

/// Receives one warning per rejected move.
pub trait DiagnosticSink {
    fn warn(&self, message: fmt::Arguments<'_>);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _message: fmt::Arguments<'_>) {}
}

/// Writes each warning to standard error on its own line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn warn(&self, message: fmt::Arguments<'_>) {
        eprintln!("warning: {message}");
    }
}
