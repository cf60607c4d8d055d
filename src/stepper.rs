//! One cycle of the worklist: dequeue an item, classify it, enqueue the
//! items that follow from it.
//!
//! This is the entire fixed-point engine. Every rule below is memoized so
//! that a highly ambiguous grammar (`E -> E E E | "1" | eps` over `1^n`
//! being the canonical stress case) still runs in cubic time rather than
//! exploding: completion is gated by `ixk_done`, prediction by emptiness of
//! `bitms_at_k[Y]`, and scanning by `ktjs`.

use crate::chart::ChartState;
use crate::config::RunOptions;
use crate::error::RunError;
use crate::item::Item;
use crate::oracle::GrammarOracle;
use crate::symbol::Symbol;

/// Pops one item from `state.todo` and dispatches it to the completion,
/// prediction+nullable-advance, or scan rule.
///
/// # Panics
///
/// Panics if `state.todo` is empty; callers (the position driver) only call
/// this while the worklist is non-empty.
pub(crate) fn step<O: GrammarOracle>(
    state: &mut ChartState,
    input: &O::Input,
    input_length: usize,
    oracle: &O,
    options: &RunOptions,
    items_processed: &mut usize,
) -> Result<(), RunError> {
    let it = state.pop_todo();
    *items_processed += 1;
    if let Some(max) = options.max_items {
        if *items_processed > max {
            log::warn!("item budget of {max} exceeded at position {}", state.k);
            return Err(RunError::ItemBudgetExceeded { at: state.k });
        }
    }

    if it.is_complete() {
        complete(state, it, options);
    } else {
        let sym = it.blocked_on().expect("blocked item always has a leading pending symbol");
        if sym.is_nonterminal() {
            predict_or_advance(state, it, sym, input, oracle, options)?;
        } else {
            scan(state, it, sym, input, input_length, oracle, options);
        }
    }
    Ok(())
}

/// Case A: `it` is complete. Fires the completion rule at most once per
/// `(i, nt)`, resuming every item that was blocked on `nt` at `i`.
fn complete(state: &mut ChartState, it: Item, options: &RunOptions) {
    let (i, x) = (it.i, it.nt);
    if state.mem_ixk_done(i, x) {
        if options.trace {
            log::trace!("completion: {i:?}/{x:?} already done at k={}, dropping {it:?}", state.k);
        }
        return;
    }
    state.add_ixk_done(i, x);
    let k = state.k;
    if options.trace {
        log::trace!("completion: {x:?} derives [{i}, {k}], resuming waiters");
    }
    for bitm in state.get_bitms(i, x) {
        state.add_todo(bitm.cut(k));
    }
}

/// Case B: `it` is blocked on nonterminal `y`. Records `it` as waiting on
/// `y`, predicts `y`'s alternatives the first time anything waits on it at
/// this position, and otherwise advances `it` immediately if `y` has
/// already completed the empty span here (the nullable hazard).
fn predict_or_advance<O: GrammarOracle>(
    state: &mut ChartState,
    it: Item,
    y: Symbol,
    input: &O::Input,
    oracle: &O,
    options: &RunOptions,
) -> Result<(), RunError> {
    let k = state.k;
    // Must be read before `it` is recorded, so emptiness reflects whether
    // *any* item was already waiting on `y` at `k`.
    let bitms_were_empty = state.get_bitms(k, y).is_empty();
    state.add_bitm_at_k(it.clone(), y);

    if bitms_were_empty {
        let predicted = oracle.new_items(y, input, k);
        if options.trace {
            log::trace!("prediction: expanding {y:?} at k={k} into {} alternative(s)", predicted.len());
        }
        if predicted.is_empty() {
            log::debug!("oracle returned no alternatives for nonterminal {y:?} at position {k}");
        }
        for nitm in predicted {
            if options.validate_oracle_contract && (nitm.nt != y || nitm.i != k) {
                return Err(RunError::InvalidPrediction { nonterminal: y, at: k });
            }
            state.add_todo(nitm);
        }
    } else if state.mem_ixk_done(k, y) {
        if options.trace {
            log::trace!("nullable-advance: {y:?} already empty-completed at k={k}, advancing {it:?}");
        }
        state.add_todo(it.cut(k));
    }
    Ok(())
}

/// Case C: `it` is blocked on terminal `t`. Consults (and fills) the
/// per-`k` terminal-match cache, then advances `it` past every accepted
/// end position.
fn scan<O: GrammarOracle>(
    state: &mut ChartState,
    it: Item,
    t: Symbol,
    input: &O::Input,
    input_length: usize,
    oracle: &O,
    options: &RunOptions,
) {
    let k = state.k;
    let js = match state.find_ktjs(t) {
        Some(js) => js.clone(),
        None => {
            let js = oracle.parse_tm(t, input, k, input_length).unwrap_or_else(|| {
                log::debug!("oracle returned no match info for terminal {t:?} at position {k}");
                Vec::new()
            });
            state.set_ktjs(t, js.clone());
            js
        }
    };
    if options.trace {
        log::trace!("scan: {t:?} at k={k} matched {} end position(s)", js.len());
    }
    for j in js {
        state.add_todo(it.cut(j));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingOracle {
        predict_calls: std::cell::RefCell<Vec<(Symbol, usize)>>,
        scan_calls: std::cell::RefCell<Vec<(Symbol, usize)>>,
    }

    impl GrammarOracle for CountingOracle {
        type Input = str;

        fn new_items(&self, y: Symbol, _input: &str, k: usize) -> Vec<Item> {
            self.predict_calls.borrow_mut().push((y, k));
            vec![Item::predicted(y, k, [Symbol::terminal(0)])]
        }

        fn parse_tm(&self, t: Symbol, input: &str, k: usize, input_length: usize) -> Option<Vec<usize>> {
            self.scan_calls.borrow_mut().push((t, k));
            if t == Symbol::terminal(0) && k < input_length && input.as_bytes()[k] == b'1' {
                Some(vec![k + 1])
            } else {
                Some(vec![])
            }
        }
    }

    #[test]
    fn prediction_and_scan_fire_once_per_position() {
        let oracle = CountingOracle {
            predict_calls: std::cell::RefCell::new(vec![]),
            scan_calls: std::cell::RefCell::new(vec![]),
        };
        let nt = Symbol::nonterminal(0);
        let mut state = ChartState::new(vec![
            Item::predicted(nt, 0, [nt]),
            Item::predicted(nt, 0, [nt]),
        ]);
        let options = RunOptions::default();
        let mut processed = 0usize;
        while !state.todo.is_empty() {
            step(&mut state, "1", 1, &oracle, &options, &mut processed).unwrap();
        }
        assert_eq!(oracle.predict_calls.borrow().len(), 1, "predicted twice for the same (k, Y)");
    }
}
