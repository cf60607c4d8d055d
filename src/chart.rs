//! The mutable chart: per-position bookkeeping, plus the carry-over that
//! survives a position advance.
//!
//! Everything here is owned by a single [`ChartState`] value that the
//! stepper and position driver pass around by exclusive reference. There is
//! no cyclic ownership: `bitms_lt_k` and `bitms_at_k` hold items by value,
//! not back-pointers into some shared production table.

use fnv::{FnvHashMap, FnvHashSet};

use crate::item::Item;
use crate::symbol::Symbol;

/// All per-position state for one recognition run, plus the carry-over
/// across positions.
///
/// `todo`/`todo_done` and `bitms_at_k`/`ixk_done`/`ktjs` are local to the
/// current `k`; `todo_gt_k` and `bitms_lt_k` persist across the whole run.
pub(crate) struct ChartState {
    /// The input position currently under expansion.
    pub k: usize,
    /// Worklist of items waiting to be processed at `k`. Any total
    /// discipline terminates because `todo_done` dedupes; this
    /// implementation pops from the back, i.e. LIFO.
    pub todo: Vec<Item>,
    /// Every item ever added to `todo` at the current `k`. Membership
    /// guarantees no re-enqueue.
    pub todo_done: FnvHashSet<Item>,
    /// Items destined for a future position `k' > k`, bucketed by `k'`.
    pub todo_gt_k: FnvHashMap<usize, FnvHashSet<Item>>,
    /// Items currently at `k`, blocked on nonterminal `Y`, keyed by `Y`.
    pub bitms_at_k: FnvHashMap<Symbol, FnvHashSet<Item>>,
    /// Archived `bitms_at_k` snapshots for positions strictly less than
    /// `k`, keyed by that earlier position and then by the blocking
    /// nonterminal.
    pub bitms_lt_k: FnvHashMap<usize, FnvHashMap<Symbol, FnvHashSet<Item>>>,
    /// `(i, X)` pairs for which nonterminal `X` has been completed over
    /// span `[i, k]`, local to the current `k`.
    pub ixk_done: FnvHashSet<(usize, Symbol)>,
    /// Memoized terminal-match results for the current `k`. Absence of a
    /// key means "uncomputed"; an empty `Vec` means "computed, no
    /// matches" — these are deliberately distinct states.
    pub ktjs: FnvHashMap<Symbol, Vec<usize>>,
    /// Archived `(i, X)` completion pairs, bucketed by the position `k`
    /// they were completed at. Populated by the position driver on every
    /// advance (and, for the final position, after the outer loop halts),
    /// since `ixk_done` itself is local to the current `k` and would
    /// otherwise be lost.
    pub completed_archive: FnvHashMap<usize, FnvHashSet<(usize, Symbol)>>,
}

impl ChartState {
    /// Creates the empty chart state for a run, seeded with the initial
    /// predictions for the start nonterminal.
    ///
    /// `todo_done` is seeded with the same items as `todo` so that
    /// subsequent `add_todo` calls do not re-add the initial predictions.
    pub fn new(initial_items: Vec<Item>) -> Self {
        let todo_done: FnvHashSet<Item> = initial_items.iter().cloned().collect();
        ChartState {
            k: 0,
            todo: initial_items,
            todo_done,
            todo_gt_k: FnvHashMap::default(),
            bitms_at_k: FnvHashMap::default(),
            bitms_lt_k: FnvHashMap::default(),
            ixk_done: FnvHashSet::default(),
            ktjs: FnvHashMap::default(),
            completed_archive: FnvHashMap::default(),
        }
    }

    /// Inserts `item` into the worklist, or defers it to a future position,
    /// or drops it as a duplicate. Idempotent.
    pub fn add_todo(&mut self, item: Item) {
        if item.k > self.k {
            self.todo_gt_k.entry(item.k).or_default().insert(item);
        } else if !self.todo_done.contains(&item) {
            self.todo_done.insert(item.clone());
            self.todo.push(item);
        }
    }

    /// Removes and returns one item from the worklist.
    ///
    /// # Panics
    ///
    /// Panics if `todo` is empty; callers must check first (the position
    /// driver only calls this while `todo` is non-empty).
    pub fn pop_todo(&mut self) -> Item {
        self.todo.pop().expect("pop_todo: worklist is empty")
    }

    /// Returns the set of items blocked on `y` at position `at`, reading
    /// either the live `bitms_at_k` (if `at == k`) or the archive.
    pub fn get_bitms(&self, at: usize, y: Symbol) -> FnvHashSet<Item> {
        if at == self.k {
            self.bitms_at_k.get(&y).cloned().unwrap_or_default()
        } else {
            self.bitms_lt_k
                .get(&at)
                .and_then(|m| m.get(&y))
                .cloned()
                .unwrap_or_default()
        }
    }

    /// Records `item` as blocked on `y` at the current position.
    pub fn add_bitm_at_k(&mut self, item: Item, y: Symbol) {
        self.bitms_at_k.entry(y).or_default().insert(item);
    }

    /// Marks nonterminal `x` as completed over the span `[i, k]`.
    pub fn add_ixk_done(&mut self, i: usize, x: Symbol) {
        self.ixk_done.insert((i, x));
    }

    /// Whether nonterminal `x` has already been completed over `[i, k]`.
    pub fn mem_ixk_done(&self, i: usize, x: Symbol) -> bool {
        self.ixk_done.contains(&(i, x))
    }

    /// Looks up the cached terminal-match positions for `t` at the current
    /// `k`, if any have been computed yet.
    pub fn find_ktjs(&self, t: Symbol) -> Option<&Vec<usize>> {
        self.ktjs.get(&t)
    }

    /// Caches the terminal-match positions for `t` at the current `k`.
    pub fn set_ktjs(&mut self, t: Symbol, js: Vec<usize>) {
        self.ktjs.insert(t, js);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(n: u32) -> Symbol {
        Symbol::nonterminal(n)
    }

    #[test]
    fn add_todo_defers_future_items_and_dedupes_current_ones() {
        let mut s = ChartState::new(vec![]);
        let future = Item::predicted(sym(0), 5, []);
        s.add_todo(future.clone());
        assert!(s.todo.is_empty());
        assert_eq!(s.todo_gt_k.get(&5).map(|b| b.len()), Some(1));

        let here = Item::predicted(sym(1), 0, []);
        s.add_todo(here.clone());
        s.add_todo(here.clone());
        assert_eq!(s.todo.len(), 1, "duplicate add_todo must not double-enqueue");
    }

    #[test]
    fn get_bitms_reads_archive_away_from_current_k() {
        let mut s = ChartState::new(vec![]);
        let it = Item::predicted(sym(2), 0, [sym(1)]);
        s.bitms_lt_k.entry(3).or_default().entry(sym(1)).or_default().insert(it.clone());
        s.k = 7;
        let found = s.get_bitms(3, sym(1));
        assert_eq!(found.len(), 1);
        assert!(found.contains(&it));
        assert!(s.get_bitms(3, sym(9)).is_empty());
    }

    #[test]
    fn ktjs_distinguishes_uncomputed_from_computed_empty() {
        let mut s = ChartState::new(vec![]);
        let t = Symbol::terminal(0);
        assert!(s.find_ktjs(t).is_none());
        s.set_ktjs(t, vec![]);
        assert_eq!(s.find_ktjs(t), Some(&vec![]));
    }
}
