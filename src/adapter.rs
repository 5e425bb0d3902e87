//! Shared option handling for adapter implementations.
//!
//! Concrete adapters carry two option layers: defaults baked in by the
//! adapter author and overrides supplied by the caller. Reads see the merged
//! view, with overrides shadowing defaults.

use crate::error::{GatewayError, Result};
use crate::value::Value;
use std::collections::BTreeMap;

/// Layered key/value options for a gateway adapter.
#[derive(Debug, Clone, Default)]
pub struct AdapterOptions {
    defaults: BTreeMap<String, Value>,
    options: BTreeMap<String, Value>,
}

impl AdapterOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        AdapterOptions::default()
    }

    /// Sets a default option. Defaults are only visible where no override
    /// with the same key exists.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Sets an override option.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Sets several override options. Previously set overrides are kept
    /// unless `reset` is true; defaults are never touched.
    pub fn set_options<I, K, V>(&mut self, options: I, reset: bool) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        if reset {
            self.options.clear();
        }
        for (key, value) in options {
            self.set_option(key, value);
        }
        self
    }

    /// The merged view: defaults overlaid with overrides.
    pub fn options(&self) -> BTreeMap<String, Value> {
        let mut merged = self.defaults.clone();
        merged.extend(self.options.clone());
        merged
    }

    /// Looks up a single option in the merged view.
    pub fn option(&self, key: &str) -> Result<&Value> {
        self.options
            .get(key)
            .or_else(|| self.defaults.get(key))
            .ok_or_else(|| GatewayError::OptionNotSet(key.to_string()))
    }
}
