//! Run-time options for a single recognizer job.
//!
//! A small, `Default`-able, all-`pub`-field struct a caller builds once per
//! job. None of these fields change recognizer semantics — they only add
//! guard rails and diagnostics, which is why they are carried regardless of
//! what functionality a given run chooses to exercise.

/// Options controlling a single call to [`crate::run`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// When set, the stepper checks that every item returned by
    /// `new_items(Y, input, k)` actually has `nt == Y` and `i == k` before
    /// enqueuing it, surfacing [`crate::RunError::InvalidPrediction`]
    /// instead of silently trusting a misbehaving oracle. Intended for use
    /// while developing a new grammar oracle; the reference behavior with
    /// this off is to trust the oracle, which is cheaper for production use.
    pub validate_oracle_contract: bool,

    /// A soft cap on the total number of items the driver will ever pop
    /// from `todo` across the whole run. Exceeding it surfaces
    /// [`crate::RunError::ItemBudgetExceeded`] rather than running
    /// unbounded against a misbehaving oracle that keeps minting distinct
    /// items forever. `None` (the default) means unbounded.
    pub max_items: Option<usize>,

    /// When set, the stepper emits a `trace!`-level log record for every
    /// dispatched item, naming the rule that fired (completion, prediction,
    /// scan, or nullable-advance). Off by default since it is too hot to
    /// leave unconditional even at `trace` level.
    pub trace: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_unbounded_and_quiet() {
        let opts = RunOptions::default();
        assert!(!opts.validate_oracle_contract);
        assert!(!opts.trace);
        assert_eq!(opts.max_items, None);
    }
}
