use crate::priority::{
    Phase, PriorityInputs, PriorityResult, PriorityTier, Quadrant, GRID_MIDPOINT,
    READINESS_BLEND_WEIGHT, VALUE_BLEND_WEIGHT,
};

const MAX_SCORE: f64 = 10.0;
const RATIO_SCORE_MIN: f64 = 1.0;
const RATIO_SCORE_MAX: f64 = 10.0;
const TTV_HORIZON_MONTHS: f64 = 18.0;
const TTV_FAST_MONTHS: f64 = 10.0;
const TTV_FAST_BONUS: f64 = 0.25;

/// Scales `expected_value` against the largest value in the set onto 0..=10.
/// Returns 0 for every entry when the largest value is not positive.
pub fn calculate_value_score(expected_value: f64, all_expected_values: &[f64]) -> f64 {
    let max = all_expected_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !(max > 0.0) {
        return 0.0;
    }
    (expected_value / max * MAX_SCORE).clamp(0.0, MAX_SCORE)
}

/// Value per dollar of friction addressed, min-max scaled onto 1..=10.
/// Entries with no friction cost get a ratio of zero. When every ratio is
/// equal the whole set sits at the midpoint.
pub fn calculate_ratio_value_scores(entries: &[(f64, f64)]) -> Vec<f64> {
    let ratios: Vec<f64> = entries
        .iter()
        .map(|(expected_value, friction_cost)| {
            if *friction_cost > 0.0 {
                expected_value / friction_cost
            } else {
                0.0
            }
        })
        .collect();
    if ratios.is_empty() {
        return ratios;
    }

    let min = ratios.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;
    if !(spread > 0.0) {
        return vec![GRID_MIDPOINT; ratios.len()];
    }

    ratios
        .into_iter()
        .map(|ratio| RATIO_SCORE_MIN + (ratio - min) / spread * (RATIO_SCORE_MAX - RATIO_SCORE_MIN))
        .collect()
}

/// Even blend of readiness and value. `_time_to_value` is accepted so display
/// callers can pass what they hold, but it never moves the score.
pub fn calculate_priority_score(
    readiness_score: f64,
    value_score: f64,
    _time_to_value: Option<f64>,
) -> f64 {
    readiness_score * READINESS_BLEND_WEIGHT + value_score * VALUE_BLEND_WEIGHT
}

pub fn determine_priority_tier(value_score: f64, readiness_score: f64) -> PriorityTier {
    match (value_score >= GRID_MIDPOINT, readiness_score >= GRID_MIDPOINT) {
        (true, true) => PriorityTier::Champions,
        (false, true) => PriorityTier::QuickWins,
        (true, false) => PriorityTier::Strategic,
        (false, false) => PriorityTier::Foundation,
    }
}

pub fn determine_quadrant(value_score: f64, readiness_score: f64) -> Quadrant {
    match determine_priority_tier(value_score, readiness_score) {
        PriorityTier::Champions => Quadrant::Champions,
        PriorityTier::QuickWins => Quadrant::QuickWins,
        PriorityTier::Strategic => Quadrant::Strategic,
        PriorityTier::Foundation => Quadrant::Foundation,
    }
}

pub fn determine_phase(priority_score: f64) -> Phase {
    if priority_score >= 7.0 {
        Phase::Q1
    } else if priority_score >= 5.5 {
        Phase::Q2
    } else if priority_score >= 4.0 {
        Phase::Q3
    } else {
        Phase::Q4
    }
}

/// Display-only speed score in 0..=1.
pub fn calculate_ttv_score(time_to_value_months: f64) -> f64 {
    let base = ((TTV_HORIZON_MONTHS - time_to_value_months) / TTV_HORIZON_MONTHS).max(0.0);
    let bonus = if time_to_value_months < TTV_FAST_MONTHS {
        TTV_FAST_BONUS
    } else {
        0.0
    };
    (base + bonus).min(1.0)
}

pub fn classify_priority(value_score: f64, readiness_score: f64) -> PriorityResult {
    let priority_score = calculate_priority_score(readiness_score, value_score, None);
    PriorityResult {
        value_score,
        priority_score,
        priority_tier: determine_priority_tier(value_score, readiness_score),
        quadrant: determine_quadrant(value_score, readiness_score),
        recommended_phase: determine_phase(priority_score),
    }
}

pub fn score_priority(inputs: &PriorityInputs) -> PriorityResult {
    let value_score = calculate_value_score(inputs.expected_value, &inputs.all_expected_values);
    classify_priority(value_score, inputs.readiness_score)
}
