//! Token volume and runtime cost for a deployed use case.
//!
//! Input and output tokens are priced separately; output is five times the
//! input rate and must never be folded into a single blended price.

/// USD per input token ($3 per million).
pub const PRICE_PER_INPUT_TOKEN: f64 = 3.0 / 1_000_000.0;
/// USD per output token ($15 per million).
pub const PRICE_PER_OUTPUT_TOKEN: f64 = 15.0 / 1_000_000.0;

const MONTHS_PER_YEAR: f64 = 12.0;

pub fn calculate_monthly_tokens(
    runs_per_month: f64,
    input_tokens_per_run: f64,
    output_tokens_per_run: f64,
) -> f64 {
    runs_per_month * (input_tokens_per_run + output_tokens_per_run)
}

pub fn calculate_annual_token_cost(
    runs_per_month: f64,
    input_tokens_per_run: f64,
    output_tokens_per_run: f64,
) -> f64 {
    let monthly_input_cost = runs_per_month * input_tokens_per_run * PRICE_PER_INPUT_TOKEN;
    let monthly_output_cost = runs_per_month * output_tokens_per_run * PRICE_PER_OUTPUT_TOKEN;
    MONTHS_PER_YEAR * (monthly_input_cost + monthly_output_cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_tokens_sum_input_and_output() {
        assert_eq!(calculate_monthly_tokens(200.0, 1_500.0, 500.0), 400_000.0);
        assert_eq!(calculate_monthly_tokens(0.0, 1_500.0, 500.0), 0.0);
    }

    #[test]
    fn output_tokens_cost_five_times_input() {
        let input_only = calculate_annual_token_cost(1_000.0, 1_000.0, 0.0);
        let output_only = calculate_annual_token_cost(1_000.0, 0.0, 1_000.0);
        assert!((input_only - 36.0).abs() < 1e-9);
        assert!((output_only - 180.0).abs() < 1e-9);
    }

    #[test]
    fn pricing_is_not_blended() {
        let split = calculate_annual_token_cost(10_000.0, 3_000.0, 1_000.0);
        let blended_rate = (PRICE_PER_INPUT_TOKEN + PRICE_PER_OUTPUT_TOKEN) / 2.0;
        let blended = 12.0 * calculate_monthly_tokens(10_000.0, 3_000.0, 1_000.0) * blended_rate;
        assert!((split - 2_880.0).abs() < 1e-6);
        assert!((split - blended).abs() > 1.0);
    }
}
