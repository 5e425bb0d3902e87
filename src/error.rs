//! Error types for the gateway object library.

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while building schemas or mutating objects.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Field name is not declared in the object's schema
    #[error("'{0}' is not a valid field for this object")]
    UnknownField(String),

    /// Filtered value was rejected by the field's validator chain
    #[error("'{field}' is invalid: {}", .messages.join(", "))]
    Validation {
        field: String,
        messages: Vec<String>,
    },

    /// Field holds no processed value and the schema declares no default
    #[error("'{0}' has not been set and has no default")]
    FieldNotSet(String),

    /// Mutation attempted on a frozen object
    #[error("cannot modify '{0}': object is read-only")]
    ReadOnly(String),

    /// Schema names a filter kind missing from the registry
    #[error("no filter registered under the name '{0}'")]
    UnresolvedFilter(String),

    /// Schema names a validator kind missing from the registry
    #[error("no validator registered under the name '{0}'")]
    UnresolvedValidator(String),

    /// Facade accessed before an adapter was set
    #[error("no gateway adapter configured")]
    NoAdapterConfigured,

    /// Adapter option lookup on a key that was never set
    #[error("option '{0}' was not set")]
    OptionNotSet(String),

    /// Operation not provided by the base object contract
    #[error("{0} is not supported by this object")]
    Unsupported(&'static str),
}
