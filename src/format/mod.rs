pub mod bounds;
pub mod currency;

pub use bounds::{bounds_for, clamp_benefit_inputs, clamp_input, known_fields, InputBounds};
pub use currency::{format_currency, parse_currency_string};
