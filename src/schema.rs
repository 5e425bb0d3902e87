//! Declarative field schemas and their build-time resolution.
//!
//! A schema is authored as a set of [`FieldDecl`]s naming filter and
//! validator kinds, then built once against the registries into an immutable
//! [`Schema`] holding constructed trait objects. Built schemas are shared
//! across instances via `Arc` and never mutated.

use crate::error::Result;
use crate::filter::{Filter, FilterRegistry, FilterSpec};
use crate::validator::{Validator, ValidatorRegistry, ValidatorSpec};
use crate::value::Value;
use std::collections::BTreeMap;

/// Named constructor arguments for a filter or validator spec.
#[derive(Debug, Clone, Default)]
pub struct SpecArgs {
    args: BTreeMap<String, Value>,
}

impl SpecArgs {
    pub fn new() -> Self {
        SpecArgs {
            args: BTreeMap::new(),
        }
    }

    /// Sets an argument, consuming and returning self for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Looks up a boolean argument.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.args.get(key).and_then(Value::as_bool)
    }

    /// Looks up an integer argument.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.args.get(key).and_then(Value::as_int)
    }

    /// Looks up a string argument.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

/// Declarative configuration for one field.
///
/// Filters and validators run in declaration order. A field is optional
/// unless declared with [`FieldDecl::required`].
#[derive(Debug, Clone, Default)]
pub struct FieldDecl {
    required: bool,
    filters: Vec<FilterSpec>,
    validators: Vec<ValidatorSpec>,
    default: Option<Value>,
}

impl FieldDecl {
    /// Declares a required field.
    pub fn required() -> Self {
        FieldDecl {
            required: true,
            ..Default::default()
        }
    }

    /// Declares an optional field.
    pub fn optional() -> Self {
        FieldDecl::default()
    }

    /// Appends a filter to the field's filter chain.
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.push(spec);
        self
    }

    /// Appends a validator to the field's validator chain.
    pub fn validator(mut self, spec: ValidatorSpec) -> Self {
        self.validators.push(spec);
        self
    }

    /// Sets the fallback value served by `get` when the field was never set.
    /// Defaults bypass the filter chain: they are assumed already in final
    /// form. An empty default is never served.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A validator with its position-specific chain behavior.
pub(crate) struct ChainLink {
    pub(crate) validator: Box<dyn Validator>,
    pub(crate) break_on_failure: bool,
}

/// Resolved per-field schema entry.
pub(crate) struct FieldSchema {
    pub(crate) required: bool,
    pub(crate) filters: Vec<Box<dyn Filter>>,
    pub(crate) validators: Vec<ChainLink>,
    pub(crate) default: Option<Value>,
}

/// An immutable, resolved object schema.
///
/// Construction goes through [`Schema::builder`]; after `build` succeeds the
/// schema never changes, so one instance is safely shared read-only across
/// every object of a concrete type (and across threads).
pub struct Schema {
    fields: BTreeMap<String, FieldSchema>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Schema {
    /// Starts declaring a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// A schema declaring no fields. Objects built on it accept any field
    /// name and apply no filtering or validation.
    pub fn empty() -> Self {
        Schema {
            fields: BTreeMap::new(),
        }
    }

    /// Returns `true` if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if `name` is a declared field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if `name` is declared and required.
    pub fn is_required(&self, name: &str) -> bool {
        self.fields.get(name).map(|f| f.required).unwrap_or(false)
    }

    /// Returns `true` if `name` is declared and not required.
    pub fn is_optional(&self, name: &str) -> bool {
        self.fields.get(name).map(|f| !f.required).unwrap_or(false)
    }

    /// Names of all required fields, in sorted order.
    pub fn required_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| f.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Names of all optional fields, in sorted order.
    pub fn optional_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| !f.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The declared default for a field, if any.
    pub fn default_value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).and_then(|f| f.default.as_ref())
    }

    pub(crate) fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }
}

/// Builder resolving declarative field specs against the registries.
pub struct SchemaBuilder {
    fields: Vec<(String, FieldDecl)>,
}

impl SchemaBuilder {
    /// Declares a field. Re-declaring a name replaces the earlier entry.
    pub fn field(mut self, name: impl Into<String>, decl: FieldDecl) -> Self {
        self.fields.push((name.into(), decl));
        self
    }

    /// Resolves every named filter and validator and produces the immutable
    /// schema. Unknown kind tags fail here with `UnresolvedFilter` or
    /// `UnresolvedValidator`; nothing is resolved again at `add` time.
    pub fn build(
        self,
        filters: &FilterRegistry,
        validators: &ValidatorRegistry,
    ) -> Result<Schema> {
        let mut fields = BTreeMap::new();

        for (name, decl) in self.fields {
            let resolved_filters = decl
                .filters
                .iter()
                .map(|spec| filters.resolve(spec))
                .collect::<Result<Vec<_>>>()?;

            let resolved_validators = decl
                .validators
                .iter()
                .map(|spec| {
                    Ok(ChainLink {
                        validator: validators.resolve(spec)?,
                        break_on_failure: spec.break_on_failure,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            fields.insert(
                name,
                FieldSchema {
                    required: decl.required,
                    filters: resolved_filters,
                    validators: resolved_validators,
                    default: decl.default,
                },
            );
        }

        Ok(Schema { fields })
    }
}
