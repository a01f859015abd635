// src/lib.rs
pub mod ast;
pub mod errors;
pub mod goast;
pub mod program;
pub mod registry;
pub mod transpile;
pub mod types;
