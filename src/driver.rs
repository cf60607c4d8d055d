//! The position driver: runs the stepper to quiescence at each position,
//! then advances, and the single library entry point, [`run`].

use std::mem;

use fnv::{FnvHashMap, FnvHashSet};

use crate::chart::ChartState;
use crate::config::RunOptions;
use crate::error::RunError;
use crate::item::Item;
use crate::oracle::GrammarOracle;
use crate::stepper::step;
use crate::symbol::Symbol;

/// Builds the initial chart state: position `0`, seeded with the start
/// nonterminal's predictions.
fn init_state<O: GrammarOracle>(start_nt: Symbol, input: &O::Input, oracle: &O) -> ChartState {
    let initial_items = oracle.new_items(start_nt, input, 0);
    ChartState::new(initial_items)
}

/// Runs the stepper until `state.todo` is empty: quiescence at the current
/// position.
fn loop_k<O: GrammarOracle>(
    state: &mut ChartState,
    input: &O::Input,
    input_length: usize,
    oracle: &O,
    options: &RunOptions,
    items_processed: &mut usize,
) -> Result<(), RunError> {
    while !state.todo.is_empty() {
        step(state, input, input_length, oracle, options, items_processed)?;
    }
    Ok(())
}

/// Attempts to advance the chart state from `state.k` to `state.k + 1`.
///
/// Returns `false` (and leaves `state` untouched beyond archiving the final
/// position's completions) if `state.k + 1` would exceed `input_length`,
/// meaning the run is over.
fn advance(state: &mut ChartState, input_length: usize) -> bool {
    let old_k = state.k;
    let next_k = old_k + 1;

    // Archive this position's completions regardless of whether we advance
    // further, so the final position's results are never lost: `ixk_done`
    // is local to `k` and would otherwise vanish the moment the loop halts.
    let done = mem::take(&mut state.ixk_done);
    state.completed_archive.insert(old_k, done);

    if next_k > input_length {
        return false;
    }

    let archived_bitms = mem::take(&mut state.bitms_at_k);
    state.bitms_lt_k.insert(old_k, archived_bitms);

    state.ktjs = FnvHashMap::default();

    let seed: FnvHashSet<Item> = state.todo_gt_k.remove(&next_k).unwrap_or_default();
    state.todo_done = seed.clone();
    state.todo = seed.into_iter().collect();

    state.k = next_k;

    log::debug!(
        "advance: k {old_k} -> {next_k}, carried {} item(s), archived {} blocked-item bucket(s)",
        state.todo.len(),
        state.bitms_lt_k.get(&old_k).map(|m| m.len()).unwrap_or(0)
    );

    true
}

/// Runs the stepper to quiescence at every position from `0` through
/// `input_length`, archiving completions and blocked items as it goes.
fn loop_positions<O: GrammarOracle>(
    state: &mut ChartState,
    input: &O::Input,
    input_length: usize,
    oracle: &O,
    options: &RunOptions,
    items_processed: &mut usize,
) -> Result<(), RunError> {
    loop {
        loop_k(state, input, input_length, oracle, options, items_processed)?;
        if !advance(state, input_length) {
            break;
        }
    }
    Ok(())
}

/// The read-only result of a completed recognition run.
///
/// Exposes, for every position visited, which nonterminal/span pairs were
/// derived and which items were left blocked on which nonterminal — the
/// minimal surface an external derivation-tree builder needs, without this
/// crate ever constructing one itself.
pub struct FinalState {
    input_length: usize,
    final_k: usize,
    completed_archive: FnvHashMap<usize, FnvHashSet<(usize, Symbol)>>,
    bitms_lt_k: FnvHashMap<usize, FnvHashMap<Symbol, FnvHashSet<Item>>>,
    items_processed: usize,
}

impl FinalState {
    /// Whether nonterminal `x` was recognized over `[i, input_length]`.
    pub fn completed(&self, i: usize, x: Symbol) -> bool {
        self.completed_at(i, x, self.input_length)
    }

    /// Whether nonterminal `x` was recognized over exactly `[i, j]`, for
    /// any position `j` the driver actually visited.
    pub fn completed_at(&self, i: usize, x: Symbol, j: usize) -> bool {
        self.completed_archive
            .get(&j)
            .is_some_and(|set| set.contains(&(i, x)))
    }

    /// The items that were blocked at position `i` on nonterminal `x` when
    /// the driver passed that position, for building derivation trees
    /// externally.
    pub fn blocked_items_at(&self, i: usize, x: Symbol) -> FnvHashSet<Item> {
        self.bitms_lt_k
            .get(&i)
            .and_then(|m| m.get(&x))
            .cloned()
            .unwrap_or_default()
    }

    /// The total number of items popped from `todo` across the whole run;
    /// lets callers and tests check the cubic bound empirically without
    /// instrumenting the core themselves.
    pub fn items_processed(&self) -> usize {
        self.items_processed
    }

    /// The final position the driver reached (equal to `input_length` for
    /// any run that was not cut short by an error).
    pub fn final_position(&self) -> usize {
        self.final_k
    }
}

/// Recognizes `start_nt` over an input of `input_length` positions, using
/// `oracle` to expand nonterminals and match terminals.
///
/// `input` is never inspected by this crate; it is passed through to the
/// oracle unchanged. See [`GrammarOracle`] for the two callbacks consumed,
/// and [`RunOptions`] for the guard rails this entry point accepts.
///
/// # Errors
///
/// Returns [`RunError::NegativeLength`] if `input_length` is negative,
/// [`RunError::InvalidPrediction`] if `validate_oracle_contract` is set and
/// the oracle returns a prediction that doesn't match what it was asked
/// for, and [`RunError::ItemBudgetExceeded`] if `max_items` is set and the
/// run exceeds it.
pub fn run<O: GrammarOracle>(
    start_nt: Symbol,
    input: &O::Input,
    input_length: i64,
    oracle: &O,
    options: &RunOptions,
) -> Result<FinalState, RunError> {
    if input_length < 0 {
        return Err(RunError::NegativeLength { length: input_length });
    }
    let input_length = input_length as usize;

    let mut state = init_state(start_nt, input, oracle);
    let mut items_processed = 0usize;
    loop_positions(&mut state, input, input_length, oracle, options, &mut items_processed)?;

    Ok(FinalState {
        input_length,
        final_k: state.k,
        completed_archive: state.completed_archive,
        bitms_lt_k: state.bitms_lt_k,
        items_processed,
    })
}


