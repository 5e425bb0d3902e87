//! Filter trait, declarative filter specs, and the builtin filter registry.
//!
//! Filters are total `Value -> Value` transforms applied before validation.
//! A schema names filters by kind tag; the registry resolves each tag to a
//! constructor once, at schema build time, so the `add` path only ever calls
//! already-constructed filters.

use crate::error::{GatewayError, Result};
use crate::schema::SpecArgs;
use crate::value::Value;
use std::collections::HashMap;

/// A deterministic, total value transform.
///
/// Filters never fail: a value a filter cannot meaningfully transform (for
/// example a digits filter given a boolean) passes through unchanged.
pub trait Filter: Send + Sync {
    fn apply(&self, value: Value) -> Value;
}

impl std::fmt::Debug for dyn Filter + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Filter")
    }
}

/// Constructor for a filter kind, invoked at schema build time.
pub type FilterCtor = fn(&SpecArgs) -> Box<dyn Filter>;

/// Declarative reference to a filter kind with optional constructor args.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub(crate) name: String,
    pub(crate) args: SpecArgs,
}

impl FilterSpec {
    /// Creates a spec naming a filter kind.
    pub fn new(name: impl Into<String>) -> Self {
        FilterSpec {
            name: name.into(),
            args: SpecArgs::new(),
        }
    }

    /// Adds a constructor argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args = self.args.set(key, value);
        self
    }
}

/// Registry mapping filter kind tags to constructors.
///
/// The registry is consulted only while building a schema; unknown tags
/// surface as [`GatewayError::UnresolvedFilter`] there, never during `add`.
pub struct FilterRegistry {
    ctors: HashMap<String, FilterCtor>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        FilterRegistry {
            ctors: HashMap::new(),
        }
    }

    /// Creates a registry preloaded with the builtin filter kinds:
    /// `digits`, `alpha`, `alnum`, and `trim`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("digits", |_| Box::new(DigitsFilter));
        registry.register("alpha", |args| {
            Box::new(AlphaFilter {
                allow_whitespace: args.get_bool("allow_whitespace").unwrap_or(false),
            })
        });
        registry.register("alnum", |args| {
            Box::new(AlnumFilter {
                allow_whitespace: args.get_bool("allow_whitespace").unwrap_or(false),
            })
        });
        registry.register("trim", |_| Box::new(TrimFilter));
        registry
    }

    /// Registers a filter constructor under a kind tag, replacing any
    /// previous registration for that tag.
    pub fn register(&mut self, name: impl Into<String>, ctor: FilterCtor) {
        self.ctors.insert(name.into(), ctor);
    }

    /// Resolves a spec to a constructed filter.
    pub fn resolve(&self, spec: &FilterSpec) -> Result<Box<dyn Filter>> {
        let ctor = self
            .ctors
            .get(&spec.name)
            .ok_or_else(|| GatewayError::UnresolvedFilter(spec.name.clone()))?;
        Ok(ctor(&spec.args))
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Keeps ASCII digits, dropping every other character.
pub struct DigitsFilter;

impl Filter for DigitsFilter {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::Str(s) => Value::Str(s.chars().filter(|c| c.is_ascii_digit()).collect()),
            other => other,
        }
    }
}

/// Keeps alphabetic characters, optionally whitespace.
pub struct AlphaFilter {
    pub allow_whitespace: bool,
}

impl Filter for AlphaFilter {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::Str(s) => Value::Str(
                s.chars()
                    .filter(|c| c.is_alphabetic() || (self.allow_whitespace && c.is_whitespace()))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Keeps alphanumeric characters, optionally whitespace.
pub struct AlnumFilter {
    pub allow_whitespace: bool,
}

impl Filter for AlnumFilter {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::Str(s) => Value::Str(
                s.chars()
                    .filter(|c| c.is_alphanumeric() || (self.allow_whitespace && c.is_whitespace()))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Trims leading and trailing whitespace.
pub struct TrimFilter;

impl Filter for TrimFilter {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::Str(s) => Value::Str(s.trim().to_string()),
            other => other,
        }
    }
}
