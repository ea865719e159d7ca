//! Token usage tracking across a session's API calls.

use std::collections::HashMap;

use crate::TokenUsage;

/// Tracks cumulative token usage, broken down by model.
pub struct UsageLedger {
    /// Total usage across all models.
    total: TokenUsage,
    /// Usage broken down by model name.
    by_model: HashMap<String, TokenUsage>,
    /// Number of API calls made.
    call_count: u64,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self {
            total: TokenUsage::default(),
            by_model: HashMap::new(),
            call_count: 0,
        }
    }

    /// Record token usage from an API call.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        self.total.input_tokens += usage.input_tokens;
        self.total.output_tokens += usage.output_tokens;
        self.call_count += 1;

        let entry = self.by_model.entry(model.to_string()).or_default();
        entry.input_tokens += usage.input_tokens;
        entry.output_tokens += usage.output_tokens;
    }

    /// Get total token usage.
    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    /// Get usage for a specific model.
    pub fn for_model(&self, model: &str) -> Option<&TokenUsage> {
        self.by_model.get(model)
    }

    /// Get total tokens (input + output).
    pub fn total_tokens(&self) -> u64 {
        self.total
            .input_tokens
            .saturating_add(self.total.output_tokens)
    }

    /// Get number of API calls.
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        self.total = TokenUsage::default();
        self.by_model.clear();
        self.call_count = 0;
    }
}

impl Default for UsageLedger {
    fn default() -> Self {
        Self::new()
    }
}
