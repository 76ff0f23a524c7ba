//! Symbols and the identity-stable key set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ALPHABET_LEN;

/// A single selectable unit on the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// An uppercase Latin letter (A..Z).
    Letter(char),
    /// A non-emitting filler. Pressing it gives feedback but composes nothing.
    Blank,
}

impl Symbol {
    /// Returns `true` for a blank filler.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }

    /// The character this symbol contributes to the composed text, if any.
    #[must_use]
    pub const fn emitted(self) -> Option<char> {
        match self {
            Self::Letter(c) => Some(c),
            Self::Blank => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "{c}"),
            Self::Blank => write!(f, " "),
        }
    }
}

/// Stable per-slot token. Assigned once per board mount and never reused,
/// so per-key UI state keyed by identity survives reordering.
pub type SlotId = usize;

/// One slot of the key set: a stable identity plus the symbol it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySlot {
    /// Identity token, stable across reshuffles.
    pub identity: SlotId,
    /// The symbol currently carried by this slot.
    pub symbol: Symbol,
}

/// The ordered, identity-stable arrangement of symbols on the board.
///
/// The multiset of symbols is constant across the key set's lifetime
/// (26 letters plus a fixed blank count); only the order changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    slots: Vec<KeySlot>,
}

impl KeySet {
    /// Builds the key set for one board mount: the 26 uppercase letters plus
    /// enough blank fillers to make the total a multiple of `columns`.
    ///
    /// Identities are assigned sequentially (`0..n`) and never change.
    #[must_use]
    pub fn build(columns: u16) -> Self {
        let blanks = Self::blank_fill(columns);
        let slots = ('A'..='Z')
            .map(Symbol::Letter)
            .chain(std::iter::repeat(Symbol::Blank).take(blanks))
            .enumerate()
            .map(|(identity, symbol)| KeySlot { identity, symbol })
            .collect();
        Self { slots }
    }

    /// Number of blank fillers needed so `26 + blanks` divides evenly
    /// into rows of `columns` keys.
    #[must_use]
    pub fn blank_fill(columns: u16) -> usize {
        let columns = usize::from(columns.max(1));
        (columns - ALPHABET_LEN % columns) % columns
    }

    /// Reassembles a key set from a permutation of an existing set's slots.
    ///
    /// Callers must pass a reordering of `self.slots()`; identities and the
    /// symbol multiset are carried by the slots themselves.
    #[must_use]
    pub fn from_slots(slots: Vec<KeySlot>) -> Self {
        Self { slots }
    }

    /// The slots in display order.
    #[must_use]
    pub fn slots(&self) -> &[KeySlot] {
        &self.slots
    }

    /// Number of slots (letters plus blanks).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the key set holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot at a display position, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&KeySlot> {
        self.slots.get(index)
    }

    /// Looks up a slot by its stable identity.
    #[must_use]
    pub fn find(&self, identity: SlotId) -> Option<&KeySlot> {
        self.slots.iter().find(|slot| slot.identity == identity)
    }

    /// Display position of a slot identity, if present.
    #[must_use]
    pub fn position_of(&self, identity: SlotId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.identity == identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fills_grid_exactly() {
        let keys = KeySet::build(5);
        assert_eq!(keys.len(), 30); // 26 letters + 4 blanks
        assert_eq!(keys.len() % 5, 0);
    }

    #[test]
    fn test_build_no_blanks_when_divisible() {
        let keys = KeySet::build(13);
        assert_eq!(keys.len(), 26);
        assert!(keys.slots().iter().all(|s| !s.symbol.is_blank()));
    }

    #[test]
    fn test_identities_are_sequential_and_unique() {
        let keys = KeySet::build(5);
        for (i, slot) in keys.slots().iter().enumerate() {
            assert_eq!(slot.identity, i);
        }
    }

    #[test]
    fn test_letter_multiset_is_complete() {
        let keys = KeySet::build(5);
        let letters: Vec<char> = keys
            .slots()
            .iter()
            .filter_map(|s| s.symbol.emitted())
            .collect();
        assert_eq!(letters, ('A'..='Z').collect::<Vec<_>>());
    }

    #[test]
    fn test_blank_emits_nothing() {
        assert_eq!(Symbol::Blank.emitted(), None);
        assert_eq!(Symbol::Letter('Q').emitted(), Some('Q'));
    }

    #[test]
    fn test_find_by_identity() {
        let keys = KeySet::build(5);
        let slot = keys.find(3).unwrap();
        assert_eq!(slot.symbol, Symbol::Letter('D'));
        assert!(keys.find(999).is_none());
    }
}
