//! The grammar oracle interface: the two callbacks the core consumes from
//! outside.
//!
//! Concrete grammar authoring, lexing, and how terminals match input bytes
//! are all Non-goals of this crate; the stepper never inspects a grammar
//! directly. Instead it is handed an implementation of [`GrammarOracle`],
//! generic over the caller's own notion of "input", and calls exactly two
//! methods on it.

use crate::item::Item;
use crate::symbol::Symbol;

/// The external collaborator that knows what the grammar actually says.
///
/// Implementations are expected to be pure functions of their arguments
/// (aside from internal caching); the core itself already memoizes calls to
/// both methods per `(k, Y)` / `(k, t)`; see the stepper's prediction and
/// scan rules.
pub trait GrammarOracle {
    /// The caller's own representation of "the input being recognized".
    /// The core never inspects a value of this type; it only ever passes
    /// it through to the oracle.
    type Input;

    /// Given a nonterminal `y` and current position `k`, returns the
    /// prediction items for `y`: one per alternative of its production,
    /// each with `nt = y`, `i = k`, an empty matched prefix, dot at `k`,
    /// and `bs` set to that alternative's right-hand side.
    ///
    /// Called at most once per `(k, y)` within a run; the core caches the
    /// fact of having called it already by checking whether any item is
    /// already recorded as blocked on `y` at `k`.
    fn new_items(&self, y: Symbol, input: &Self::Input, k: usize) -> Vec<Item>;

    /// Given a terminal `t` and a start position `k`, returns every end
    /// position `j` (with `k <= j <= input_length`) for which
    /// `input[k..j]` matches `t`. Zero-width matches (`j == k`) are
    /// permitted.
    ///
    /// `None` means the oracle has nothing to say about `t` (for example,
    /// an unknown terminal) and is treated identically to `Some(vec![])`:
    /// no matches. Results are memoized per `(k, t)` inside one parse, so
    /// purity is not strictly required, but callers should not rely on
    /// being asked more than once for the same `(t, k)`.
    fn parse_tm(&self, t: Symbol, input: &Self::Input, k: usize, input_length: usize) -> Option<Vec<usize>>;
}
