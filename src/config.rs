//! Pipeline tunables (spec §6).

/// Recognized configuration options for a pipeline run.
///
/// Defaults match spec §6 exactly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Drop reads shorter than this before they ever receive an internal id.
    pub min_read_size: usize,
    /// Maximum allowed edits per unit length of a matched overlap.
    pub max_error_rate: f32,
    /// Additive edit/overhang tolerance layered on top of `max_error_rate`.
    pub slack: i32,
    /// Minimum accepted overlap length.
    pub min_overlap: usize,
    /// Bucket size for the bucketed FM-index variant.
    pub bucket_size: usize,
    /// Alphabet size, not counting the sentinel (4 bases by default).
    pub alphabet_size: usize,
    /// Map non-ACGT bytes to a fallback base instead of skipping the read.
    /// When `false` (the default, matching the teacher's `n_alphabet`
    /// toggle), reads containing `N` have those bytes stripped at ingest.
    pub fallback_non_acgt: bool,
    /// Use the bit-bucket FM-index variant instead of the bucketed one.
    pub bit_bucket: bool,
    /// Print per-stage timing and summary statistics.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_read_size: 0,
            max_error_rate: 0.04,
            slack: 3,
            min_overlap: 40,
            bucket_size: 32,
            alphabet_size: 4,
            fallback_non_acgt: false,
            bit_bucket: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Additive+multiplicative edit budget for a match of the given length,
    /// per spec §4.4 (`ε · length + α`).
    pub fn edit_budget(&self, length: usize) -> i32 {
        (self.max_error_rate * length as f32).floor() as i32 + self.slack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let c = Config::default();
        assert_eq!(c.min_read_size, 0);
        assert_eq!(c.max_error_rate, 0.04);
        assert_eq!(c.slack, 3);
        assert_eq!(c.min_overlap, 40);
        assert_eq!(c.bucket_size, 32);
        assert_eq!(c.alphabet_size, 4);
    }

    #[test]
    fn edit_budget_combines_rate_and_slack() {
        let c = Config::default();
        assert_eq!(c.edit_budget(100), 4 + 3);
        assert_eq!(c.edit_budget(0), 0 + 3);
    }
}
