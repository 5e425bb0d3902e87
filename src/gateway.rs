//! Gateway facade holding a pluggable adapter.
//!
//! The facade stores zero or one adapter implementing the
//! [`GatewayAdapter`] capability marker and fails fast when asked for an
//! adapter before one is configured.

use crate::error::{GatewayError, Result};

/// Capability marker for gateway adapter implementations.
///
/// Deliberately empty: the protocol surface lives in concrete adapters, and
/// any type claiming the capability may be registered with the facade.
pub trait GatewayAdapter {}

impl std::fmt::Debug for dyn GatewayAdapter + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GatewayAdapter")
    }
}

/// Facade over a single configured adapter.
#[derive(Default)]
pub struct Gateway {
    adapter: Option<Box<dyn GatewayAdapter>>,
}

impl Gateway {
    /// Creates a facade with no adapter configured.
    pub fn new() -> Self {
        Gateway { adapter: None }
    }

    /// Sets the adapter, replacing any previously configured one.
    pub fn set_adapter(&mut self, adapter: Box<dyn GatewayAdapter>) -> &mut Self {
        self.adapter = Some(adapter);
        self
    }

    /// Gets the configured adapter.
    pub fn adapter(&self) -> Result<&dyn GatewayAdapter> {
        self.adapter
            .as_deref()
            .ok_or(GatewayError::NoAdapterConfigured)
    }

    /// Returns `true` if an adapter is configured.
    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubAdapter;

    impl GatewayAdapter for StubAdapter {}

    #[test]
    fn test_adapter_round_trip() {
        let mut gateway = Gateway::new();
        assert!(!gateway.has_adapter());

        gateway.set_adapter(Box::new(StubAdapter));
        assert!(gateway.has_adapter());
        assert!(gateway.adapter().is_ok());
    }

    #[test]
    fn test_missing_adapter_fails_fast() {
        let gateway = Gateway::new();
        assert!(matches!(
            gateway.adapter().unwrap_err(),
            GatewayError::NoAdapterConfigured
        ));
    }
}
