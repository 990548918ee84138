//! Running the rule catalogue over a parameter mapping.

use remora_params::ParamMap;
use tracing::debug;

use crate::message::ValidationMessage;
use crate::rules::RULES;

/// Run context that some rules need beyond the parameters themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    num_procs: usize,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self { num_procs: 1 }
    }
}

impl ValidationContext {
    /// Set the number of MPI processes the run will use.
    pub fn with_num_procs(mut self, num_procs: usize) -> Self {
        self.num_procs = num_procs;
        self
    }

    pub fn num_procs(&self) -> usize {
        self.num_procs
    }
}

/// Validate with a single-process context.
pub fn validate(params: &ParamMap) -> Vec<ValidationMessage> {
    validate_with(params, &ValidationContext::default())
}

/// Run every rule and concatenate their findings in rule order.
pub fn validate_with(params: &ParamMap, ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    for &(rule_id, rule) in RULES {
        let found = rule(params, ctx);
        if !found.is_empty() {
            debug!(rule_id, n = found.len(), "rule produced findings");
        }
        messages.extend(found);
    }
    messages
}
