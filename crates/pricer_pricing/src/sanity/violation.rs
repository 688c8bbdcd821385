//! Sanity-check findings.

use std::fmt;

use crate::engine::EngineId;

/// A failed sanity check.
///
/// Violations are data: the sanity layer returns them and never raises
/// them as errors, since cross-engine disagreement is informative rather
/// than fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// An early-exercise engine priced below the European reference.
    AmericanBelowEuropean {
        /// Offending engine
        engine: EngineId,
        /// Its value
        american: f64,
        /// European reference value
        european: f64,
    },

    /// A probe engine lost value when volatility was bumped up.
    NonMonotoneInVolatility {
        /// Probe engine
        engine: EngineId,
        /// Base volatility
        base_volatility: f64,
        /// Bumped volatility
        bumped_volatility: f64,
        /// Value at the base volatility
        base_value: f64,
        /// Value at the bumped volatility
        bumped_value: f64,
    },

    /// Value below the no-arbitrage lower bound.
    BelowIntrinsic {
        /// Offending engine
        engine: EngineId,
        /// Its value
        value: f64,
        /// Lower bound
        bound: f64,
    },

    /// Value above the no-arbitrage upper bound.
    AboveUpperBound {
        /// Offending engine
        engine: EngineId,
        /// Its value
        value: f64,
        /// Upper bound
        bound: f64,
    },

    /// Two early-exercise engines disagree beyond tolerance.
    EngineDisagreement {
        /// First engine
        left: EngineId,
        /// Second engine
        right: EngineId,
        /// First value
        left_value: f64,
        /// Second value
        right_value: f64,
        /// Allowed absolute difference
        allowance: f64,
    },

    /// An engine disagrees with the registered American oracle.
    OracleDisagreement {
        /// Offending engine
        engine: EngineId,
        /// Its value
        value: f64,
        /// Oracle value
        oracle: f64,
    },

    /// A probe evaluation could not be performed.
    ProbeFailed {
        /// Probe engine
        engine: EngineId,
        /// Error message
        reason: String,
    },
}

impl Violation {
    /// Engine primarily responsible for the finding.
    pub fn engine(&self) -> EngineId {
        match self {
            Violation::AmericanBelowEuropean { engine, .. }
            | Violation::NonMonotoneInVolatility { engine, .. }
            | Violation::BelowIntrinsic { engine, .. }
            | Violation::AboveUpperBound { engine, .. }
            | Violation::OracleDisagreement { engine, .. }
            | Violation::ProbeFailed { engine, .. } => *engine,
            Violation::EngineDisagreement { left, .. } => *left,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::AmericanBelowEuropean {
                engine,
                american,
                european,
            } => write!(
                f,
                "{engine} American value {american:.6} below European {european:.6}"
            ),
            Violation::NonMonotoneInVolatility {
                engine,
                base_volatility,
                bumped_volatility,
                base_value,
                bumped_value,
            } => write!(
                f,
                "{engine} value fell from {base_value:.6} to {bumped_value:.6} as σ rose from {base_volatility} to {bumped_volatility}"
            ),
            Violation::BelowIntrinsic {
                engine,
                value,
                bound,
            } => write!(f, "{engine} value {value:.6} below lower bound {bound:.6}"),
            Violation::AboveUpperBound {
                engine,
                value,
                bound,
            } => write!(f, "{engine} value {value:.6} above upper bound {bound:.6}"),
            Violation::EngineDisagreement {
                left,
                right,
                left_value,
                right_value,
                allowance,
            } => write!(
                f,
                "{left} ({left_value:.6}) and {right} ({right_value:.6}) differ by more than {allowance:.6}"
            ),
            Violation::OracleDisagreement {
                engine,
                value,
                oracle,
            } => write!(f, "{engine} value {value:.6} disagrees with oracle {oracle:.6}"),
            Violation::ProbeFailed { engine, reason } => {
                write!(f, "{engine} probe failed: {reason}")
            }
        }
    }
}
