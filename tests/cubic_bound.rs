//! Regression test pinning the cubic bound on a worst-case-ambiguous
//! grammar (`E -> E E E | "1" | eps` over `"1" * 100`). A CLI or benchmark
//! harness is a Non-goal of the core, but a test that watches the item
//! count is not — this asserts the count empirically via
//! `FinalState::items_processed()` rather than timing wall-clock, which
//! would be flaky in CI.

use earley_core::{run, GrammarOracle, Item, RunOptions, Symbol};

const E: Symbol = Symbol::nonterminal(0);
const ONE: Symbol = Symbol::terminal(0);
const EPS: Symbol = Symbol::terminal(1);

struct EGrammar;

impl GrammarOracle for EGrammar {
    type Input = str;

    fn new_items(&self, y: Symbol, _input: &str, k: usize) -> Vec<Item> {
        if y != E {
            return vec![];
        }
        vec![
            Item::predicted(E, k, [E, E, E]),
            Item::predicted(E, k, [ONE]),
            Item::predicted(E, k, [EPS]),
        ]
    }

    fn parse_tm(&self, t: Symbol, input: &str, k: usize, input_length: usize) -> Option<Vec<usize>> {
        if t == ONE {
            if k < input_length && input.as_bytes()[k] == b'1' {
                Some(vec![k + 1])
            } else {
                Some(vec![])
            }
        } else if t == EPS {
            Some(vec![k])
        } else {
            None
        }
    }
}

#[test]
fn hundred_ones_completes_every_span_without_exploding() {
    let input = "1".repeat(100);
    let result = run(E, &input, 100, &EGrammar, &RunOptions::default()).unwrap();

    for i in 0..=100 {
        assert!(result.completed_at(i, E, 100), "expected E to derive [{i}, 100]");
    }

    // A naive Earley recognizer on this grammar is exponential in n; a
    // correctly memoized one stays within a generous cubic-ish ceiling.
    // The exact constant isn't load-bearing, only "nowhere near exponential".
    assert!(
        result.items_processed() < 100 * 100 * 50,
        "processed {} items for n=100, looks worse than cubic",
        result.items_processed()
    );
}
