//! The validated property container.
//!
//! `ValidatedObject` holds three parallel stores per instance: the raw
//! values exactly as supplied, the filtered-and-validated current values,
//! and the messages from the most recent failed validation per field. The
//! schema governing the fields is shared read-only across instances.

use crate::error::{GatewayError, Result};
use crate::schema::Schema;
use crate::value::Value;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// A generic container of declared, validated fields.
///
/// # Write path
///
/// `add` always records the raw value first, then threads it through the
/// field's filter chain and validator chain. Only a value that passes the
/// whole chain reaches the processed store; a rejected value never does, so
/// a failed `add` leaves previously processed values untouched.
///
/// # Read-only objects
///
/// An instance can be frozen after construction; frozen instances reject
/// `add` and `remove`. Seeding happens before the flag is applied, so a
/// frozen object can still be born populated (see
/// [`ValidatedObject::read_only`]). There is no public unfreeze.
///
/// # Example
///
/// ```
/// use payment_gateway::{FieldDecl, FilterRegistry, FilterSpec, Schema,
///     ValidatedObject, ValidatorRegistry, ValidatorSpec};
/// use std::sync::Arc;
///
/// let schema = Schema::builder()
///     .field(
///         "number",
///         FieldDecl::required()
///             .filter(FilterSpec::new("digits"))
///             .validator(ValidatorSpec::new("digits").break_on_failure()),
///     )
///     .build(&FilterRegistry::with_builtins(), &ValidatorRegistry::with_builtins())
///     .unwrap();
///
/// let mut object = ValidatedObject::new(Arc::new(schema));
/// object.add("number", "4111 1111 1111 1111").unwrap();
/// assert_eq!(object.get("number").unwrap().as_str(), Some("4111111111111111"));
/// ```
#[derive(Debug)]
pub struct ValidatedObject {
    /// Shared, immutable field schema.
    schema: Arc<Schema>,

    /// Values exactly as supplied to `add`, kept even when validation fails.
    raw_values: HashMap<String, Value>,

    /// Filtered values that passed their validator chain.
    current_values: HashMap<String, Value>,

    /// Messages from the most recent failed validation, per field.
    validation_errors: HashMap<String, Vec<String>>,

    read_only: bool,
}

impl ValidatedObject {
    /// Creates an empty, unfrozen object governed by `schema`.
    pub fn new(schema: Arc<Schema>) -> Self {
        ValidatedObject {
            schema,
            raw_values: HashMap::new(),
            current_values: HashMap::new(),
            validation_errors: HashMap::new(),
            read_only: false,
        }
    }

    /// Creates an object seeded with the given field values.
    ///
    /// Each pair goes through the full `add` path; the first failure aborts
    /// construction.
    pub fn with_values<I, K, V>(schema: Arc<Schema>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut object = Self::new(schema);
        for (name, value) in values {
            object.add(name.as_ref(), value)?;
        }
        Ok(object)
    }

    /// Creates a frozen object seeded with the given field values.
    ///
    /// The seed is applied before the read-only flag takes effect, so this
    /// is the one way to populate an instance that rejects all later
    /// mutation.
    pub fn read_only<I, K, V>(schema: Arc<Schema>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut object = Self::with_values(schema, values)?;
        object.freeze();
        Ok(object)
    }

    /// The schema governing this object.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Adds a field value, filtering and validating it.
    ///
    /// The raw value is stored verbatim before filtering, even when
    /// validation later rejects it; [`get_raw`](Self::get_raw) recovers it
    /// for diagnostics. On rejection the processed store is not touched and
    /// the aggregated messages are available via
    /// [`last_validation_errors`](Self::last_validation_errors).
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.check_read_only(name)?;

        if !self.schema.is_empty() && !self.schema.contains(name) {
            return Err(GatewayError::UnknownField(name.to_string()));
        }

        let value = value.into();
        self.raw_values.insert(name.to_string(), value.clone());

        let filtered = self.apply_filters(name, value);

        // Each attempt overwrites the previous error history for the field.
        self.validation_errors.remove(name);

        match self.validate_field(name, &filtered) {
            Ok(store) => {
                if store {
                    self.current_values.insert(name.to_string(), filtered);
                    debug!("field '{}' set", name);
                } else {
                    debug!("field '{}' empty and optional, skipped", name);
                }
                Ok(self)
            }
            Err(messages) => {
                warn!(
                    "field '{}' rejected by {} validation message(s)",
                    name,
                    messages.len()
                );
                self.validation_errors
                    .insert(name.to_string(), messages.clone());
                Err(GatewayError::Validation {
                    field: name.to_string(),
                    messages,
                })
            }
        }
    }

    /// Gets a field's processed value, falling back to the schema default.
    ///
    /// Defaults bypass the filter chain: they are assumed already in final
    /// form. An empty default is treated as absent.
    pub fn get(&self, name: &str) -> Result<&Value> {
        if let Some(value) = self.current_values.get(name) {
            return Ok(value);
        }

        if let Some(default) = self.schema.default_value(name) {
            if !default.is_empty() {
                return Ok(default);
            }
        }

        Err(GatewayError::FieldNotSet(name.to_string()))
    }

    /// Gets the raw value last supplied to `add` for this field.
    ///
    /// Returns `None` only when the field was never added; a supplied
    /// `Value::Null` comes back as `Some(&Value::Null)`.
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.raw_values.get(name)
    }

    /// Removes a field's processed value.
    ///
    /// The raw value and any error history for the field are retained.
    pub fn remove(&mut self, name: &str) -> Result<&mut Self> {
        self.check_read_only(name)?;

        if self.current_values.remove(name).is_some() {
            debug!("field '{}' removed", name);
        }
        Ok(self)
    }

    /// Returns `true` if the field currently holds a processed value.
    pub fn contains(&self, name: &str) -> bool {
        self.current_values.contains_key(name)
    }

    /// Number of fields currently holding a processed value.
    pub fn count(&self) -> usize {
        self.current_values.len()
    }

    /// Messages from the most recent failed validation of the field.
    /// Empty when the field never failed, or when its latest attempt passed.
    pub fn last_validation_errors(&self, name: &str) -> &[String] {
        self.validation_errors
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Freezes the object: every later `add` or `remove` fails with
    /// [`GatewayError::ReadOnly`]. There is no public unfreeze.
    pub fn freeze(&mut self) {
        self.read_only = true;
    }

    /// Returns `true` if the object is frozen.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Names of the schema's required fields.
    pub fn required_field_names(&self) -> Vec<&str> {
        self.schema.required_field_names()
    }

    /// Names of the schema's optional fields.
    pub fn optional_field_names(&self) -> Vec<&str> {
        self.schema.optional_field_names()
    }

    /// String conversion is not part of the base contract. Concrete object
    /// types that have a sensible textual form provide their own rendering.
    pub fn to_display_string(&self) -> Result<String> {
        Err(GatewayError::Unsupported("string conversion"))
    }

    fn check_read_only(&self, name: &str) -> Result<()> {
        if self.read_only {
            return Err(GatewayError::ReadOnly(name.to_string()));
        }
        Ok(())
    }

    /// Threads the value through the field's filter chain in declared order.
    fn apply_filters(&self, name: &str, value: Value) -> Value {
        let Some(field) = self.schema.field(name) else {
            return value;
        };

        field
            .filters
            .iter()
            .fold(value, |value, filter| filter.apply(value))
    }

    /// Runs the field's validator chain against the filtered value.
    ///
    /// `Ok(true)` means store the value, `Ok(false)` means valid but skip
    /// the store (the optional-empty short-circuit), `Err` carries the
    /// aggregated rejection messages.
    ///
    /// A field with no validators is valid regardless of the required flag;
    /// required fields with empty values pass an empty chain too.
    fn validate_field(&self, name: &str, filtered: &Value) -> std::result::Result<bool, Vec<String>> {
        let Some(field) = self.schema.field(name) else {
            // Empty schema: free-form object, nothing to validate.
            return Ok(true);
        };

        if !field.required && filtered.is_empty() {
            return Ok(false);
        }

        let mut messages = Vec::new();
        for link in &field.validators {
            if let Err(mut rejection) = link.validator.validate(filtered) {
                messages.append(&mut rejection);
                if link.break_on_failure {
                    break;
                }
            }
        }

        if messages.is_empty() {
            Ok(true)
        } else {
            Err(messages)
        }
    }
}
