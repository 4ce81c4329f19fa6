use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Audit record attached to a traced calculation. `output` is the exact value
/// the untraced variant returns for the same inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormulaTrace {
    pub formula: String,
    pub inputs: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediates: Option<BTreeMap<String, f64>>,
    pub output: f64,
}

impl FormulaTrace {
    pub fn intermediate(&self, name: &str) -> Option<f64> {
        self.intermediates.as_ref()?.get(name).copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Traced {
    pub value: f64,
    pub trace: FormulaTrace,
}

/// Receives the named values a formula touches while it computes.
pub(crate) trait TraceSink {
    fn input(&mut self, name: &'static str, value: f64);
    fn intermediate(&mut self, name: &'static str, value: f64);
}

pub(crate) struct NoTrace;

impl TraceSink for NoTrace {
    #[inline(always)]
    fn input(&mut self, _name: &'static str, _value: f64) {}

    #[inline(always)]
    fn intermediate(&mut self, _name: &'static str, _value: f64) {}
}

#[derive(Debug, Default)]
pub(crate) struct TraceRecorder {
    inputs: BTreeMap<String, f64>,
    intermediates: BTreeMap<String, f64>,
}

impl TraceRecorder {
    pub(crate) fn finish(self, formula: &str, output: f64) -> Traced {
        let intermediates = if self.intermediates.is_empty() {
            None
        } else {
            Some(self.intermediates)
        };
        Traced {
            value: output,
            trace: FormulaTrace {
                formula: formula.to_string(),
                inputs: self.inputs,
                intermediates,
                output,
            },
        }
    }
}

impl TraceSink for TraceRecorder {
    fn input(&mut self, name: &'static str, value: f64) {
        self.inputs.insert(name.to_string(), value);
    }

    fn intermediate(&mut self, name: &'static str, value: f64) {
        self.intermediates.insert(name.to_string(), value);
    }
}
