//! The small set of ways a caller can misuse [`crate::run`].
//!
//! The core has no internal error modes beyond invariant violations, which
//! are programmer errors rather than runtime failures and are reported by
//! panicking (see [`crate::item::Item::cut`]).  What `RunError` covers is
//! the handful of contract violations that are a caller's fault rather than
//! the core's: a malformed entry-point argument, or — when
//! [`crate::config::RunOptions::validate_oracle_contract`] is turned on — a
//! prediction oracle that hands back an item it had no business returning.

use std::fmt;

use crate::symbol::Symbol;

/// Everything that can go wrong calling into this crate's single entry
/// point.
///
/// None of these are retryable; a run either completes with a consistent
/// `FinalState` or the caller violated a precondition before or during the
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// `input_length` was negative.
    NegativeLength {
        /// The offending value, as supplied by the caller.
        length: i64,
    },
    /// `validate_oracle_contract` caught `new_items` returning an item whose
    /// `nt` or `i` did not match what was asked for.
    InvalidPrediction {
        /// The nonterminal the oracle was asked to predict.
        nonterminal: Symbol,
        /// The position the prediction was requested at.
        at: usize,
    },
    /// `RunOptions::max_items` was exceeded.
    ItemBudgetExceeded {
        /// The position the driver was at when the budget ran out.
        at: usize,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RunError::NegativeLength { length } => {
                write!(f, "input_length must be nonnegative, got {length}")
            }
            RunError::InvalidPrediction { nonterminal, at } => write!(
                f,
                "oracle predicted an item not matching {nonterminal:?} at position {at}"
            ),
            RunError::ItemBudgetExceeded { at } => {
                write!(f, "item budget exceeded while processing position {at}")
            }
        }
    }
}

impl std::error::Error for RunError {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn display_mentions_the_offending_length() {
        let err = RunError::NegativeLength { length: -3 };
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn variants_are_matchable() {
        let err = RunError::ItemBudgetExceeded { at: 12 };
        assert_matches!(err, RunError::ItemBudgetExceeded { at: 12 });
    }
}
