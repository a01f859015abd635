// src/transpile/well_known.rs
//
// Reserved names with special meaning during lowering, kept in one place
// instead of scattered through control flow.

/// The function program execution starts from; subject to signature and
/// argument rewriting.
pub const ENTRY_POINT: &str = "main";

/// Runtime-initialization call prepended to the entry point's body. Must
/// run before any user code.
pub const RUNTIME_INIT: &str = "__init";

/// Go package providing process arguments and `os.Exit`.
pub const OS_PACKAGE: &str = "os";

/// Process-exit primitive used for non-zero exits from the entry point.
pub const PROCESS_EXIT: &str = "os.Exit";

/// Loop variable used while rebuilding the argument vector.
pub const ARGV_LOOP_VAR: &str = "argvSingle";

/// Library-internal shims whose lowering is known to be unsupported.
/// Exact-match names, silently skipped to keep forward progress on the
/// rest of the file.
pub const UNSUPPORTED_FUNCTIONS: &[&str] = &[
    "__istype",
    "__isctype",
    "__wcwidth",
    "__sputc",
    "__inline_signbitf",
    "__inline_signbitd",
    "__inline_signbitl",
];

pub fn is_entry_point(name: &str) -> bool {
    name == ENTRY_POINT
}

pub fn is_unsupported(name: &str) -> bool {
    UNSUPPORTED_FUNCTIONS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_is_main_only() {
        assert!(is_entry_point("main"));
        assert!(!is_entry_point("Main"));
        assert!(!is_entry_point("__init"));
    }

    #[test]
    fn denylist_matches_exactly() {
        assert!(is_unsupported("__istype"));
        assert!(is_unsupported("__inline_signbitl"));
        assert!(!is_unsupported("istype"));
        assert!(!is_unsupported("main"));
    }
}
