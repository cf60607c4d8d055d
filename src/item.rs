//! The dotted-rule item used throughout the chart.
//!
//! An item is a value, not a node in a graph: it carries its own matched
//! prefix and pending suffix rather than pointing back into some shared
//! production table.  That makes items directly usable as hash-set keys,
//! which is what the chart relies on for all of its memoization.

use std::fmt;

use tinyvec::TinyVec;

use crate::symbol::Symbol;

/// Inline capacity for the matched/pending symbol sequences before a item's
/// vectors spill to the heap.  Most grammar rules are short; four symbols
/// covers the overwhelming majority without an allocation.
type SymbolSeq = TinyVec<[Symbol; 4]>;

/// A dotted production with span origin: "in rule `nt -> as_ . bs`, `as_` has
/// been matched over `[i, k]` and `bs` is expected next."
///
/// An item with an empty `bs` is complete; the span `[i, k]` has been
/// derived as `nt`.  Otherwise the item is blocked on `bs[0]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Item {
    /// The nonterminal this item is trying to recognize.
    pub nt: Symbol,
    /// The input position where this recognition attempt started.
    pub i: usize,
    /// Symbols already matched, in order.
    pub as_: SymbolSeq,
    /// The input position the dot currently sits at.
    pub k: usize,
    /// Symbols still to match, in order; `bs[0]` is the symbol the item is
    /// blocked on.
    pub bs: SymbolSeq,
}

impl Item {
    /// Builds a fresh prediction item: dot at the start of `bs`, no symbols
    /// matched yet, span origin and current position both `k`.
    pub fn predicted(nt: Symbol, k: usize, bs: impl IntoIterator<Item = Symbol>) -> Self {
        Item {
            nt,
            i: k,
            as_: SymbolSeq::new(),
            k,
            bs: bs.into_iter().collect(),
        }
    }

    /// An item with no symbols left to match witnesses that `nt` derives
    /// `[i, k]`.
    pub fn is_complete(&self) -> bool {
        self.bs.is_empty()
    }

    /// The symbol this item is blocked on, if any.
    pub fn blocked_on(&self) -> Option<Symbol> {
        self.bs.first().copied()
    }

    /// Advances the dot of `self` past its leading pending symbol, producing
    /// a new item whose dot now sits at `j`.
    ///
    /// ```text
    /// cut(Item(nt, i, as_, _, [b0, b1..bn]), j) = Item(nt, i, as_ ++ [b0], j, [b1..bn])
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `self.bs` is empty. The stepper never calls this on a
    /// complete item, so reaching this panic indicates a bug in the core
    /// itself rather than anything an oracle could trigger.
    pub fn cut(&self, j: usize) -> Item {
        let mut bs = self.bs.iter().copied();
        let b0 = bs.next().expect("cut: item has no pending symbols");
        let mut as_ = self.as_.clone();
        as_.push(b0);
        Item {
            nt: self.nt,
            i: self.i,
            as_,
            k: j,
            bs: bs.collect(),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?} -> ", self.nt)?;
        for sym in self.as_.iter() {
            write!(f, "{sym:?} ")?;
        }
        write!(f, ".")?;
        for sym in self.bs.iter() {
            write!(f, " {sym:?}")?;
        }
        write!(f, ", {}..{}]", self.i, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(n: u32) -> Symbol {
        Symbol::nonterminal(n)
    }
    fn t(n: u32) -> Symbol {
        Symbol::terminal(n)
    }

    #[test]
    fn cut_advances_dot_and_moves_one_symbol() {
        let it = Item::predicted(sym(0), 3, [t(1), sym(2)]);
        let cut1 = it.cut(4);
        assert_eq!(cut1.k, 4);
        assert_eq!(cut1.i, 3);
        assert_eq!(&cut1.as_[..], &[t(1)]);
        assert_eq!(&cut1.bs[..], &[sym(2)]);
        assert!(!cut1.is_complete());

        let cut2 = cut1.cut(6);
        assert_eq!(cut2.k, 6);
        assert_eq!(&cut2.as_[..], &[t(1), sym(2)]);
        assert!(cut2.bs.is_empty());
        assert!(cut2.is_complete());
    }

    #[test]
    #[should_panic(expected = "cut: item has no pending symbols")]
    fn cut_on_complete_item_panics() {
        let it = Item::predicted(sym(0), 0, Vec::<Symbol>::new());
        assert!(it.is_complete());
        let _ = it.cut(0);
    }

    #[test]
    fn blocked_on_reports_leading_pending_symbol() {
        let it = Item::predicted(sym(0), 0, [t(5), sym(1)]);
        assert_eq!(it.blocked_on(), Some(t(5)));
    }
}
