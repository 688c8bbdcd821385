//! Recombining binomial backward induction.

use pricer_core::types::{validate_expiry, validate_steps, ContractSpec, PriceEstimate, PricingError};
use pricer_models::instruments::ExerciseStyle;

use super::params::LatticeParams;

/// Prices a futures option on a CRR lattice.
///
/// Terminal values are the intrinsic payoffs at `F·u^j·d^(N-j)`; each
/// backward step takes the discounted expectation and, for American
/// exercise, the maximum with the intrinsic value at every node. A single
/// layer buffer is updated in place, so memory is O(steps).
///
/// # Arguments
/// * `contract` - Contract terms
/// * `expiry` - Year fraction to expiry
/// * `steps` - Number of lattice steps (>= 1)
/// * `style` - European or American exercise
///
/// # Errors
/// - `PricingError::InvalidStepCount` if `steps == 0`
/// - `PricingError::InvalidContract` / `InvalidExpiry` for bad terms
/// - `PricingError::InvalidVolatility` for non-positive volatility with `expiry > 0`
/// - `PricingError::DegenerateLattice` if `u` and `d` coincide numerically
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
/// use pricer_models::instruments::ExerciseStyle;
/// use pricer_pricing::lattice::price_binomial;
///
/// let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let american = price_binomial(&put, 1.0, 200, ExerciseStyle::American).unwrap();
/// let european = price_binomial(&put, 1.0, 200, ExerciseStyle::European).unwrap();
/// assert!(american.value >= european.value);
/// ```
pub fn price_binomial(
    contract: &ContractSpec,
    expiry: f64,
    steps: usize,
    style: ExerciseStyle,
) -> Result<PriceEstimate, PricingError> {
    validate_steps(steps)?;
    contract.validate_terms()?;
    validate_expiry(expiry)?;

    if expiry == 0.0 {
        return Ok(PriceEstimate::exact(contract.intrinsic()));
    }

    let params = LatticeParams::derive(contract, expiry, steps)?;
    let value = backward_induction(contract, &params, steps, style);

    tracing::debug!(
        forward = contract.forward,
        strike = contract.strike,
        volatility = contract.volatility,
        expiry,
        steps,
        %style,
        value,
        "binomial price"
    );

    Ok(PriceEstimate::exact(value))
}

/// Runs the backward pass for validated parameters.
pub(crate) fn backward_induction(
    contract: &ContractSpec,
    params: &LatticeParams,
    steps: usize,
    style: ExerciseStyle,
) -> f64 {
    let up_sq = params.up * params.up;
    let weight_up = params.weight_up();
    let weight_down = params.weight_down();
    let early_exercise = style.allows_early_exercise();

    // Lowest node of the terminal layer: F·d^N
    let mut lowest = contract.forward * params.down.powi(steps as i32);

    let mut values = Vec::with_capacity(steps + 1);
    let mut node = lowest;
    for _ in 0..=steps {
        values.push(contract.payoff(node));
        node *= up_sq;
    }

    for level in (0..steps).rev() {
        // Lowest node of layer `level` is one up-move above the layer below's.
        lowest *= params.up;
        let mut node = lowest;
        for j in 0..=level {
            let continuation = weight_up * values[j + 1] + weight_down * values[j];
            values[j] = if early_exercise {
                continuation.max(contract.payoff(node))
            } else {
                continuation
            };
            node *= up_sq;
        }
    }

    values[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm_put() -> ContractSpec {
        ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap()
    }

    #[test]
    fn test_reference_step_counts() {
        let put = atm_put();
        for (steps, expected) in [
            (50, 9.670001320965513),
            (100, 9.69118585675708),
            (200, 9.701826081835168),
        ] {
            let value = price_binomial(&put, 1.0, steps, ExerciseStyle::American)
                .unwrap()
                .value;
            assert_relative_eq!(value, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_odd_step_sawtooth() {
        // CRR oscillates between odd and even step counts for at-the-money strikes
        let put = atm_put();
        let value = price_binomial(&put, 1.0, 101, ExerciseStyle::American)
            .unwrap()
            .value;
        assert_relative_eq!(value, 9.737044692012011, epsilon = 1e-9);
    }

    #[test]
    fn test_single_step() {
        // One step: American put on F=100, K=80 is out of the money at the root
        let put = ContractSpec::new(100.0, 80.0, 0.05, 0.3, false).unwrap();
        let value = price_binomial(&put, 0.5, 1, ExerciseStyle::American)
            .unwrap()
            .value;
        assert_eq!(value, 0.0);

        let two = price_binomial(&put, 0.5, 2, ExerciseStyle::American)
            .unwrap()
            .value;
        assert_relative_eq!(two, 1.667148236877143, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_has_no_early_exercise_premium() {
        let put = ContractSpec::new(100.0, 100.0, 0.0, 0.25, false).unwrap();
        let american = price_binomial(&put, 1.0, 200, ExerciseStyle::American).unwrap();
        let european = price_binomial(&put, 1.0, 200, ExerciseStyle::European).unwrap();
        assert_relative_eq!(american.value, european.value, epsilon = 1e-10);
        assert_relative_eq!(american.value, 9.935218431448586, epsilon = 1e-9);
    }

    #[test]
    fn test_expired_is_intrinsic() {
        let call = ContractSpec::new(120.0, 100.0, 0.03, 0.25, true).unwrap();
        let value = price_binomial(&call, 0.0, 10, ExerciseStyle::American).unwrap();
        assert_eq!(value, PriceEstimate::exact(20.0));
    }

    #[test]
    fn test_zero_steps_rejected_before_anything_else() {
        let bad = ContractSpec {
            forward: -1.0,
            strike: 100.0,
            rate: 0.0,
            volatility: 0.2,
            is_call: true,
        };
        assert_eq!(
            price_binomial(&bad, 1.0, 0, ExerciseStyle::American),
            Err(PricingError::InvalidStepCount(0))
        );
    }

    #[test]
    fn test_deep_itm_put_exercised_immediately() {
        let put = ContractSpec::new(40.0, 100.0, 0.10, 0.2, false).unwrap();
        let value = price_binomial(&put, 1.0, 300, ExerciseStyle::American)
            .unwrap()
            .value;
        // Root node is rebuilt multiplicatively, so allow rounding in F
        assert_relative_eq!(value, 60.0, epsilon = 1e-9);
    }
}
