//! A fixed-point Earley chart recognizer, specialized for efficient
//! handling of ambiguous and nullable productions.
//!
//! Given a start nonterminal and an abstract input of known length, [`run`]
//! decides, for every contiguous span `[i, j]` of the input, which
//! nonterminals derive that span. It is a *recognizer*, not a parser: it
//! reports which nonterminal/span pairs were derived, not how (building a
//! parse forest or derivation tree from [`FinalState::blocked_items_at`] is
//! left to a caller, as is concrete grammar authoring, lexing, and how
//! terminals match input bytes — see [`GrammarOracle`]).
//!
//! The whole point of this crate is the worklist discipline and
//! memoization in [`chart`] and [`stepper`] that keep chart construction
//! cubic in the input length even on grammars that are wildly ambiguous,
//! such as `E -> E E E | "1" | eps` over a run of `n` ones, where a naive
//! Earley implementation explodes.
//!
//! ```
//! use earley_core::{run, GrammarOracle, Item, RunOptions, Symbol};
//!
//! const E: Symbol = Symbol::nonterminal(0);
//! const ONE: Symbol = Symbol::terminal(0);
//! const EPS: Symbol = Symbol::terminal(1);
//!
//! struct EGrammar;
//!
//! impl GrammarOracle for EGrammar {
//!     type Input = str;
//!
//!     fn new_items(&self, y: Symbol, _input: &str, k: usize) -> Vec<Item> {
//!         if y != E {
//!             return vec![];
//!         }
//!         vec![
//!             Item::predicted(E, k, [E, E, E]),
//!             Item::predicted(E, k, [ONE]),
//!             Item::predicted(E, k, [EPS]),
//!         ]
//!     }
//!
//!     fn parse_tm(&self, t: Symbol, input: &str, k: usize, input_length: usize) -> Option<Vec<usize>> {
//!         if t == ONE {
//!             Some(if k < input_length && input.as_bytes()[k] == b'1' { vec![k + 1] } else { vec![] })
//!         } else if t == EPS {
//!             Some(vec![k])
//!         } else {
//!             None
//!         }
//!     }
//! }
//!
//! let result = run(E, "11", 2, &EGrammar, &RunOptions::default()).unwrap();
//! assert!(result.completed(0, E));
//! ```

mod chart;
mod config;
mod driver;
mod error;
mod item;
mod oracle;
mod stepper;
mod symbol;

pub use config::RunOptions;
pub use driver::{run, FinalState};
pub use error::RunError;
pub use item::Item;
pub use oracle::GrammarOracle;
pub use symbol::Symbol;
