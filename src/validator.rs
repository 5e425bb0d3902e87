//! Validator trait, declarative validator specs, and the builtin registry.
//!
//! Validators are predicates over filtered values. On rejection they return
//! one or more human-readable messages; the object engine aggregates these
//! per field. Like filters, validators are named by kind tag in a schema and
//! resolved once at build time.
//!
//! Messages never interpolate the value under test: card data must not end
//! up in error strings or logs.

use crate::error::{GatewayError, Result};
use crate::schema::SpecArgs;
use crate::value::Value;
use std::collections::HashMap;

/// Outcome of a single validator: `Ok` for accept, messages for reject.
pub type Verdict = std::result::Result<(), Vec<String>>;

/// A predicate over a filtered value.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value) -> Verdict;
}

impl std::fmt::Debug for dyn Validator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Validator")
    }
}

/// Constructor for a validator kind, invoked at schema build time.
pub type ValidatorCtor = fn(&SpecArgs) -> Box<dyn Validator>;

/// Declarative reference to a validator kind.
///
/// `break_on_failure` controls chain behavior: when set, a rejection by this
/// validator stops the chain immediately. The default is to run every
/// validator and aggregate all messages.
#[derive(Debug, Clone)]
pub struct ValidatorSpec {
    pub(crate) name: String,
    pub(crate) args: SpecArgs,
    pub(crate) break_on_failure: bool,
}

impl ValidatorSpec {
    /// Creates a spec naming a validator kind. The chain does not break on
    /// failure unless [`break_on_failure`](Self::break_on_failure) is called.
    pub fn new(name: impl Into<String>) -> Self {
        ValidatorSpec {
            name: name.into(),
            args: SpecArgs::new(),
            break_on_failure: false,
        }
    }

    /// Adds a constructor argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args = self.args.set(key, value);
        self
    }

    /// Marks this validator as chain-breaking: if it rejects, later
    /// validators in the field's chain are not invoked.
    pub fn break_on_failure(mut self) -> Self {
        self.break_on_failure = true;
        self
    }
}

/// Registry mapping validator kind tags to constructors.
pub struct ValidatorRegistry {
    ctors: HashMap<String, ValidatorCtor>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ValidatorRegistry {
            ctors: HashMap::new(),
        }
    }

    /// Creates a registry preloaded with the builtin validator kinds:
    /// `digits`, `alpha`, `alnum`, `string_length`, and `credit_card`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("digits", |_| Box::new(DigitsValidator));
        registry.register("alpha", |args| {
            Box::new(AlphaValidator {
                allow_whitespace: args.get_bool("allow_whitespace").unwrap_or(false),
            })
        });
        registry.register("alnum", |args| {
            Box::new(AlnumValidator {
                allow_whitespace: args.get_bool("allow_whitespace").unwrap_or(false),
            })
        });
        registry.register("string_length", |args| {
            Box::new(StringLengthValidator {
                min: args.get_int("min").map(|n| n.max(0) as usize).unwrap_or(0),
                max: args.get_int("max").map(|n| n.max(0) as usize),
            })
        });
        registry.register("credit_card", |_| Box::new(CreditCardValidator));
        registry
    }

    /// Registers a validator constructor under a kind tag, replacing any
    /// previous registration for that tag.
    pub fn register(&mut self, name: impl Into<String>, ctor: ValidatorCtor) {
        self.ctors.insert(name.into(), ctor);
    }

    /// Resolves a spec to a constructed validator.
    pub fn resolve(&self, spec: &ValidatorSpec) -> Result<Box<dyn Validator>> {
        let ctor = self
            .ctors
            .get(&spec.name)
            .ok_or_else(|| GatewayError::UnresolvedValidator(spec.name.clone()))?;
        Ok(ctor(&spec.args))
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn reject(message: impl Into<String>) -> Verdict {
    Err(vec![message.into()])
}

/// Rejects non-string and empty-string values, otherwise borrows the string.
fn expect_str(value: &Value) -> std::result::Result<&str, Vec<String>> {
    match value.as_str() {
        Some(s) if s.is_empty() => Err(vec!["value is an empty string".to_string()]),
        Some(s) => Ok(s),
        None => Err(vec!["value must be a string".to_string()]),
    }
}

/// Accepts non-empty strings made of ASCII digits only.
pub struct DigitsValidator;

impl Validator for DigitsValidator {
    fn validate(&self, value: &Value) -> Verdict {
        let s = expect_str(value)?;
        if s.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            reject("value must contain only digits")
        }
    }
}

/// Accepts non-empty strings of alphabetic characters, optionally whitespace.
pub struct AlphaValidator {
    pub allow_whitespace: bool,
}

impl Validator for AlphaValidator {
    fn validate(&self, value: &Value) -> Verdict {
        let s = expect_str(value)?;
        let ok = s
            .chars()
            .all(|c| c.is_alphabetic() || (self.allow_whitespace && c.is_whitespace()));
        if ok {
            Ok(())
        } else {
            reject("value must contain only alphabetic characters")
        }
    }
}

/// Accepts non-empty alphanumeric strings, optionally whitespace.
pub struct AlnumValidator {
    pub allow_whitespace: bool,
}

impl Validator for AlnumValidator {
    fn validate(&self, value: &Value) -> Verdict {
        let s = expect_str(value)?;
        let ok = s
            .chars()
            .all(|c| c.is_alphanumeric() || (self.allow_whitespace && c.is_whitespace()));
        if ok {
            Ok(())
        } else {
            reject("value must contain only alphanumeric characters")
        }
    }
}

/// Bounds the character length of a string value.
pub struct StringLengthValidator {
    pub min: usize,
    pub max: Option<usize>,
}

impl Validator for StringLengthValidator {
    fn validate(&self, value: &Value) -> Verdict {
        let s = match value.as_str() {
            Some(s) => s,
            None => return reject("value must be a string"),
        };

        let len = s.chars().count();
        if len < self.min {
            return reject(format!("value must be at least {} characters long", self.min));
        }
        if let Some(max) = self.max {
            if len > max {
                return reject(format!("value must be no more than {} characters long", max));
            }
        }
        Ok(())
    }
}

/// Validates a card number: digits only, plausible length, Luhn checksum.
pub struct CreditCardValidator;

impl CreditCardValidator {
    const MIN_DIGITS: usize = 13;
    const MAX_DIGITS: usize = 19;

    fn luhn_checksum_ok(digits: &str) -> bool {
        let mut sum = 0u32;
        for (i, c) in digits.chars().rev().enumerate() {
            // Safety: callers pass digit-only strings
            let mut d = c.to_digit(10).expect("digit-only input");
            if i % 2 == 1 {
                d *= 2;
                if d > 9 {
                    d -= 9;
                }
            }
            sum += d;
        }
        sum % 10 == 0
    }
}

impl Validator for CreditCardValidator {
    fn validate(&self, value: &Value) -> Verdict {
        let s = expect_str(value)?;
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return reject("card number must contain only digits");
        }
        let len = s.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&len) {
            return reject(format!(
                "card number must be between {} and {} digits long",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS
            ));
        }
        if !Self::luhn_checksum_ok(s) {
            return reject("card number checksum validation failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_validator() {
        let v = DigitsValidator;
        assert!(v.validate(&Value::from("0123")).is_ok());
        assert!(v.validate(&Value::from("12a")).is_err());
        assert!(v.validate(&Value::from("")).is_err());
        assert!(v.validate(&Value::Null).is_err());
    }

    #[test]
    fn test_alpha_validator_whitespace_toggle() {
        let strict = AlphaValidator {
            allow_whitespace: false,
        };
        let relaxed = AlphaValidator {
            allow_whitespace: true,
        };

        assert!(strict.validate(&Value::from("John")).is_ok());
        assert!(strict.validate(&Value::from("John Doe")).is_err());
        assert!(relaxed.validate(&Value::from("John Doe")).is_ok());
        assert!(relaxed.validate(&Value::from("John 3rd")).is_err());
    }

    #[test]
    fn test_string_length_bounds() {
        let v = StringLengthValidator {
            min: 2,
            max: Some(2),
        };
        assert!(v.validate(&Value::from("05")).is_ok());

        let short = v.validate(&Value::from("5")).unwrap_err();
        assert_eq!(short, vec!["value must be at least 2 characters long"]);

        let long = v.validate(&Value::from("005")).unwrap_err();
        assert_eq!(long, vec!["value must be no more than 2 characters long"]);
    }

    #[test]
    fn test_string_length_without_max() {
        let v = StringLengthValidator { min: 1, max: None };
        assert!(v.validate(&Value::from("arbitrarily long input")).is_ok());
    }

    #[test]
    fn test_credit_card_accepts_valid_luhn() {
        let v = CreditCardValidator;
        assert!(v.validate(&Value::from("4111111111111111")).is_ok());
        assert!(v.validate(&Value::from("5555555555554444")).is_ok());
    }

    #[test]
    fn test_credit_card_rejects_bad_checksum() {
        let v = CreditCardValidator;
        let msgs = v.validate(&Value::from("4111111111111112")).unwrap_err();
        assert_eq!(msgs, vec!["card number checksum validation failed"]);
    }

    #[test]
    fn test_credit_card_rejects_bad_length_and_non_digits() {
        let v = CreditCardValidator;
        assert!(v.validate(&Value::from("411")).is_err());
        assert!(v.validate(&Value::from("4111-1111-1111-1111")).is_err());
    }

    #[test]
    fn test_registry_resolves_with_args() {
        let registry = ValidatorRegistry::with_builtins();
        let spec = ValidatorSpec::new("string_length").arg("min", 2).arg("max", 2);
        let validator = registry.resolve(&spec).unwrap();

        assert!(validator.validate(&Value::from("12")).is_ok());
        assert!(validator.validate(&Value::from("123")).is_err());
    }

    #[test]
    fn test_registry_rejects_unknown_kind() {
        let registry = ValidatorRegistry::with_builtins();
        let err = registry
            .resolve(&ValidatorSpec::new("iban"))
            .unwrap_err();
        assert!(matches!(err, GatewayError::UnresolvedValidator(name) if name == "iban"));
    }
}
