// src/program.rs
//
// Shared state for one translation run: the function registry, the Go
// import set, collected warnings and the output declaration list. Passed
// `&mut` through the lowering entry points; nothing here is global.

use rustc_hash::FxHashSet;

use crate::errors::TranspileError;
use crate::goast;
use crate::registry::FunctionRegistry;

#[derive(Debug, Clone)]
pub struct Program {
    pub registry: FunctionRegistry,
    /// Go declarations emitted so far, in source order.
    pub decls: Vec<goast::FuncDecl>,
    imports: FxHashSet<String>,
    warnings: Vec<TranspileError>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::with_builtins(),
            decls: Vec::new(),
            imports: FxHashSet::default(),
            warnings: Vec::new(),
        }
    }

    /// Record that the output program needs a Go import. Idempotent.
    pub fn add_import(&mut self, path: &str) {
        self.imports.insert(path.to_string());
    }

    pub fn has_import(&self, path: &str) -> bool {
        self.imports.contains(path)
    }

    /// Imports sorted for deterministic output.
    pub fn imports(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.imports.iter().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Collect a recoverable diagnostic without stopping translation.
    pub fn add_warning(&mut self, warning: TranspileError) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[TranspileError] {
        &self.warnings
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}
