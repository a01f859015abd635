// src/registry.rs
//
// Function signature registry. Signatures are captured from C prototypes
// the first time a name is seen and never overwritten, so a forward
// declaration followed by the definition stays consistent. Some libc
// names carry a substitution: a Go call name that replaces the whole
// definition at every call site.

use rustc_hash::FxHashMap;

use crate::errors::TranspileError;

/// A function's declared C signature plus its optional Go substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    /// C return type spelling.
    pub return_type: String,
    /// Positional C argument type spellings.
    pub argument_types: Vec<String>,
    /// Empty when the function has no direct Go substitute. Non-empty
    /// means no definition is emitted and call sites use this name.
    pub substitution: String,
}

/// libc entry points with a direct Go substitute. Lowering their bodies
/// would only shadow the runtime versions.
const BUILTIN_SIGNATURES: &[(&str, &str, &[&str], &str)] = &[
    ("exit", "void", &["int"], "os.Exit"),
    ("abs", "int", &["int"], "noarch.Abs"),
    ("printf", "int", &["const char *"], "noarch.Printf"),
    ("puts", "int", &["const char *"], "noarch.Puts"),
    ("malloc", "void *", &["size_t"], "noarch.Malloc"),
];

/// First-write-wins mapping from function name to signature. Owned by
/// `Program`; single writer, no global state.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, FunctionSignature>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the substituted libc builtins.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, return_type, argument_types, substitution) in BUILTIN_SIGNATURES {
            registry.register(FunctionSignature {
                name: (*name).to_string(),
                return_type: (*return_type).to_string(),
                argument_types: argument_types.iter().map(|t| t.to_string()).collect(),
                substitution: (*substitution).to_string(),
            });
        }
        registry
    }

    /// Insert if absent. Repeated registration of a name is a no-op, so
    /// registration order between prototype and definition is irrelevant.
    pub fn register(&mut self, signature: FunctionSignature) {
        self.functions
            .entry(signature.name.clone())
            .or_insert(signature);
    }

    /// Absence is recoverable: the caller warns and assumes a permissive
    /// default, since library prototypes may never have been declared.
    pub fn lookup(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub fn has_substitution(&self, name: &str) -> bool {
        self.lookup(name)
            .map(|sig| !sig.substitution.is_empty())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Extract the C return type from a full prototype spelling.
///
/// The prototype of `int f(float)` is spelled `int (float)`; the return
/// type is everything before the first `(`. An empty result means the
/// parser handed us garbage, which is an internal invariant violation
/// rather than bad input.
pub fn extract_return_type(prototype: &str) -> Result<String, TranspileError> {
    let return_type = prototype
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    if return_type.is_empty() {
        return Err(TranspileError::MalformedPrototype {
            prototype: prototype.to_string(),
        });
    }
    Ok(return_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str, return_type: &str) -> FunctionSignature {
        FunctionSignature {
            name: name.into(),
            return_type: return_type.into(),
            argument_types: vec![],
            substitution: String::new(),
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = FunctionRegistry::new();
        registry.register(sig("f", "int"));
        registry.register(sig("f", "double"));
        assert_eq!(registry.lookup("f").unwrap().return_type, "int");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_of_unknown_name_is_absent() {
        let registry = FunctionRegistry::new();
        assert!(registry.lookup("nope").is_none());
        assert!(!registry.has_substitution("nope"));
    }

    #[test]
    fn builtins_carry_substitutions() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.has_substitution("exit"));
        assert_eq!(registry.lookup("exit").unwrap().substitution, "os.Exit");
        assert!(!registry.is_empty());
    }

    #[test]
    fn return_type_from_prototype() {
        assert_eq!(extract_return_type("int (float)").unwrap(), "int");
        assert_eq!(
            extract_return_type("char * (int, char **)").unwrap(),
            "char *"
        );
        assert_eq!(extract_return_type("void (void)").unwrap(), "void");
    }

    #[test]
    fn empty_return_type_is_fatal() {
        let err = extract_return_type(" (int)").unwrap_err();
        assert!(matches!(err, TranspileError::MalformedPrototype { .. }));
        assert!(!err.is_warning());
    }
}
