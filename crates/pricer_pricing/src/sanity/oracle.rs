//! Optional closed-form American oracle.
//!
//! The core never implements a Barone-Adesi-Whaley style approximation
//! itself. A caller that has one registers it with [`Capabilities`];
//! when nothing is registered the oracle comparison is skipped.

use pricer_core::types::ContractSpec;
use std::fmt;

/// External closed-form American price.
///
/// Closures of the form `Fn(&ContractSpec, f64) -> f64` implement this
/// trait, which is convenient for wiring a third-party function.
pub trait AmericanOracle: Send + Sync {
    /// Approximate American value for `expiry` years to maturity.
    fn price(&self, contract: &ContractSpec, expiry: f64) -> f64;

    /// Name used in logs.
    fn name(&self) -> &str {
        "american-oracle"
    }
}

impl<F> AmericanOracle for F
where
    F: Fn(&ContractSpec, f64) -> f64 + Send + Sync,
{
    fn price(&self, contract: &ContractSpec, expiry: f64) -> f64 {
        self(contract, expiry)
    }
}

/// Optional providers known to the sanity layer.
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
/// use pricer_pricing::sanity::Capabilities;
///
/// let mut capabilities = Capabilities::new();
/// assert!(!capabilities.has_american_oracle());
///
/// capabilities.register_american_oracle(Box::new(|c: &ContractSpec, _t: f64| c.intrinsic()));
/// assert!(capabilities.has_american_oracle());
/// ```
#[derive(Default)]
pub struct Capabilities {
    american_oracle: Option<Box<dyn AmericanOracle>>,
}

impl Capabilities {
    /// Registry with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the American oracle, replacing any previous one.
    pub fn register_american_oracle(&mut self, oracle: Box<dyn AmericanOracle>) {
        tracing::debug!(oracle = oracle.name(), "american oracle registered");
        self.american_oracle = Some(oracle);
    }

    /// Registered oracle, if any.
    pub fn american_oracle(&self) -> Option<&dyn AmericanOracle> {
        self.american_oracle.as_deref()
    }

    /// True when an oracle is registered.
    #[inline]
    pub fn has_american_oracle(&self) -> bool {
        self.american_oracle.is_some()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field(
                "american_oracle",
                &self.american_oracle.as_ref().map(|oracle| oracle.name()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl AmericanOracle for Fixed {
        fn price(&self, _contract: &ContractSpec, _expiry: f64) -> f64 {
            self.0
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_register_replaces() {
        let contract = ContractSpec::new(100.0, 100.0, 0.0, 0.2, true).unwrap();
        let mut capabilities = Capabilities::new();
        capabilities.register_american_oracle(Box::new(Fixed(1.0)));
        capabilities.register_american_oracle(Box::new(Fixed(2.0)));

        let oracle = capabilities.american_oracle().unwrap();
        assert_eq!(oracle.price(&contract, 1.0), 2.0);
        assert_eq!(format!("{:?}", capabilities), "Capabilities { american_oracle: Some(\"fixed\") }");
    }

    #[test]
    fn test_closure_oracle() {
        let contract = ContractSpec::new(120.0, 100.0, 0.0, 0.2, true).unwrap();
        let oracle = |c: &ContractSpec, t: f64| c.intrinsic() + t;
        assert_eq!(AmericanOracle::price(&oracle, &contract, 0.5), 20.5);
        assert_eq!(AmericanOracle::name(&oracle), "american-oracle");
    }
}
