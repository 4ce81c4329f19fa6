use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project, ProjectionInputs};

    #[test]
    fn renders_projection_with_schedule() {
        let result = project(&ProjectionInputs::new(100_000.0));
        let json = render_json(&result).expect("serializable");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed["schedule"].as_array().map(Vec::len), Some(3));
        assert_eq!(parsed["payback_months"], 0);
    }
}
