//! The credit-card field set.
//!
//! `Card` is a thin configuration over [`ValidatedObject`]: it owns the
//! shared card schema and constructs instances governed by it. Every card
//! object built through this module shares the same resolved schema table.

use crate::error::Result;
use crate::filter::{FilterRegistry, FilterSpec};
use crate::object::ValidatedObject;
use crate::schema::{FieldDecl, Schema};
use crate::validator::{ValidatorRegistry, ValidatorSpec};
use crate::value::Value;
use std::sync::{Arc, LazyLock};

static CARD_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    let schema = Schema::builder()
        .field(
            Card::NUMBER,
            FieldDecl::required()
                .filter(FilterSpec::new("digits"))
                .validator(ValidatorSpec::new("digits").break_on_failure())
                .validator(ValidatorSpec::new("credit_card").break_on_failure()),
        )
        .field(
            Card::NAME,
            FieldDecl::required()
                .filter(FilterSpec::new("alpha").arg("allow_whitespace", true))
                .validator(
                    ValidatorSpec::new("alpha")
                        .arg("allow_whitespace", true)
                        .break_on_failure(),
                ),
        )
        .field(
            Card::START_DATE_MONTH,
            FieldDecl::optional()
                .filter(FilterSpec::new("digits"))
                .validator(ValidatorSpec::new("digits").break_on_failure())
                .validator(
                    ValidatorSpec::new("string_length")
                        .arg("min", 2)
                        .arg("max", 2)
                        .break_on_failure(),
                ),
        )
        .field(
            Card::START_DATE_YEAR,
            FieldDecl::optional()
                .filter(FilterSpec::new("digits"))
                .validator(ValidatorSpec::new("digits").break_on_failure())
                .validator(
                    ValidatorSpec::new("string_length")
                        .arg("min", 2)
                        .arg("max", 2)
                        .break_on_failure(),
                ),
        )
        .build(
            &FilterRegistry::with_builtins(),
            &ValidatorRegistry::with_builtins(),
        );

    // Safety: every card field names a builtin filter/validator kind
    Arc::new(schema.expect("card schema resolves against builtins"))
});

/// Constructors for card-data objects.
pub struct Card;

impl Card {
    /// Card number field: digits-filtered, digit and Luhn validated.
    pub const NUMBER: &'static str = "number";

    /// Card holder's name field: alphabetic with spaces.
    pub const NAME: &'static str = "name";

    /// Optional two-digit start month.
    pub const START_DATE_MONTH: &'static str = "startDateMonth";

    /// Optional two-digit start year.
    pub const START_DATE_YEAR: &'static str = "startDateYear";

    /// The shared card schema.
    pub fn schema() -> Arc<Schema> {
        Arc::clone(&CARD_SCHEMA)
    }

    /// Creates an empty card object.
    pub fn empty() -> ValidatedObject {
        ValidatedObject::new(Self::schema())
    }

    /// Creates a card object seeded with the given field values.
    pub fn with_values<I, K, V>(values: I) -> Result<ValidatedObject>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        ValidatedObject::with_values(Self::schema(), values)
    }
}
