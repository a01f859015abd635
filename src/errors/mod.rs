// src/errors/mod.rs
//! Structured error reporting for the marten translator.
//!
//! Error codes: E3xxx are fatal to the declaration (or run), W3xxx are
//! collected warnings that never stop translation.

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, ThemeCharacters, ThemeStyles};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum TranspileError {
    /// The prototype text comes from the parser, so an empty return type
    /// is an internal contract violation, not bad user input.
    #[error("unable to extract the return type from '{prototype}'")]
    #[diagnostic(code(E3001))]
    MalformedPrototype { prototype: String },

    #[error("encountered {kind} while lowering {context}")]
    #[diagnostic(code(E3002))]
    UnsupportedNode {
        kind: &'static str,
        context: &'static str,
    },

    #[error("cannot resolve C type '{c_type}'")]
    #[diagnostic(code(W3101), severity(Warning))]
    UnknownType { c_type: String },

    #[error("cannot cast '{from}' to '{to}'")]
    #[diagnostic(
        code(W3102),
        severity(Warning),
        help("the value is replaced with nil so translation can continue")
    )]
    InvalidCast { from: String, to: String },

    #[error("call to '{name}' without a known prototype")]
    #[diagnostic(
        code(W3103),
        severity(Warning),
        help("a permissive int signature is assumed")
    )]
    UndeclaredFunction { name: String },
}

impl TranspileError {
    /// Warnings are collected and reported without stopping translation.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            TranspileError::UnknownType { .. }
                | TranspileError::InvalidCast { .. }
                | TranspileError::UndeclaredFunction { .. }
        )
    }
}

/// Create a handler for terminal output (unicode + colors).
pub fn terminal_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::unicode(),
        styles: ThemeStyles::ansi(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Create a handler for snapshot testing (ascii + no colors).
pub fn snapshot_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::ascii(),
        styles: ThemeStyles::none(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Render to a buffer without colors (for snapshots/testing).
pub fn render_to_string(report: &dyn Diagnostic) -> String {
    let mut output = String::new();
    let handler = snapshot_handler();
    let _ = handler.render_report(&mut output, report);
    output
}

/// Render to stderr with unicode/colors.
pub fn render_to_stderr(report: &dyn Diagnostic) {
    let handler = terminal_handler();
    let mut output = String::new();
    if handler.render_report(&mut output, report).is_ok() {
        eprint!("{}", output);
    }
}
