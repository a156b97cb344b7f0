//! Fixed-width bitset itemsets indexed by universe position

use std::fmt;

const WORD_BITS: usize = 64;

/// A set of item indices stored as one bit per universe position.
///
/// All itemsets and transactions of a run share the same universe width, so
/// union, subset and equality checks work word by word.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ItemSet {
    words: Vec<u64>,
}

impl ItemSet {
    /// Create an empty set able to hold items `0..universe_len`
    pub fn empty(universe_len: usize) -> Self {
        Self {
            words: vec![0; Self::width_for(universe_len)],
        }
    }

    pub fn singleton(universe_len: usize, item: usize) -> Self {
        let mut set = Self::empty(universe_len);
        set.insert(item);
        set
    }

    /// Build a set from item indices; duplicates collapse
    pub fn from_items<I>(universe_len: usize, items: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::empty(universe_len);
        for item in items {
            set.insert(item);
        }
        set
    }

    /// Insert an item. Panics if the item lies outside the universe width.
    pub fn insert(&mut self, item: usize) {
        self.words[item / WORD_BITS] |= 1u64 << (item % WORD_BITS);
    }

    pub fn remove(&mut self, item: usize) {
        if let Some(word) = self.words.get_mut(item / WORD_BITS) {
            *word &= !(1u64 << (item % WORD_BITS));
        }
    }

    pub fn contains(&self, item: usize) -> bool {
        self.words
            .get(item / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (item % WORD_BITS)) != 0)
    }

    /// Number of 64-bit words backing the set; sets compared together must agree
    pub fn width(&self) -> usize {
        self.words.len()
    }

    /// Word count of a set able to hold items `0..universe_len`
    pub fn width_for(universe_len: usize) -> usize {
        universe_len.div_ceil(WORD_BITS)
    }

    /// Number of items in the set
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// True when every item of `self` is also in `other`
    pub fn is_subset_of(&self, other: &ItemSet) -> bool {
        debug_assert_eq!(self.words.len(), other.words.len());
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    pub fn is_strict_subset_of(&self, other: &ItemSet) -> bool {
        self.is_subset_of(other) && self != other
    }

    pub fn is_disjoint(&self, other: &ItemSet) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & b == 0)
    }

    pub fn union(&self, other: &ItemSet) -> ItemSet {
        debug_assert_eq!(self.words.len(), other.words.len());
        ItemSet {
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a | b)
                .collect(),
        }
    }

    /// Items of `self` that are not in `other`
    pub fn difference(&self, other: &ItemSet) -> ItemSet {
        ItemSet {
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a & !b)
                .collect(),
        }
    }

    /// Copy of `self` with `item` added
    pub fn with(&self, item: usize) -> ItemSet {
        let mut set = self.clone();
        set.insert(item);
        set
    }

    /// Copy of `self` with `item` removed
    pub fn without(&self, item: usize) -> ItemSet {
        let mut set = self.clone();
        set.remove(item);
        set
    }

    /// Largest item in the set
    pub fn last(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, w)| **w != 0)
            .map(|(idx, w)| idx * WORD_BITS + (WORD_BITS - 1 - w.leading_zeros() as usize))
    }

    /// Items in ascending order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Debug for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the items of an [`ItemSet`]
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}
