//! # Payment Gateway
//!
//! Building blocks for payment-gateway integrations: validated, filterable
//! data objects plus a facade holding a pluggable gateway adapter.
//!
//! ## Design Principles
//!
//! - **Declarative schemas**: each field declares its required flag, filter
//!   chain, validator chain, and default once per concrete object type
//! - **Build-time resolution**: filter and validator kinds resolve against
//!   registries when the schema is built, never on the write path
//! - **Raw value retention**: the value a caller supplied stays inspectable
//!   even after validation rejects its filtered form
//! - **No partial writes**: a rejected value never reaches the processed
//!   store
//!
//! ## Example
//!
//! ```
//! use payment_gateway::Card;
//!
//! let mut card = Card::empty();
//! card.add(Card::NUMBER, "4111 1111 1111 1111").unwrap();
//! card.add(Card::NAME, "Ada Lovelace").unwrap();
//!
//! assert_eq!(
//!     card.get(Card::NUMBER).unwrap().as_str(),
//!     Some("4111111111111111"),
//! );
//! ```

pub mod adapter;
pub mod card;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod object;
pub mod schema;
pub mod validator;
pub mod value;

pub use adapter::AdapterOptions;
pub use card::Card;
pub use error::{GatewayError, Result};
pub use filter::{Filter, FilterRegistry, FilterSpec};
pub use gateway::{Gateway, GatewayAdapter};
pub use object::ValidatedObject;
pub use schema::{FieldDecl, Schema, SchemaBuilder, SpecArgs};
pub use validator::{Validator, ValidatorRegistry, ValidatorSpec, Verdict};
pub use value::Value;
