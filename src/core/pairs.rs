use std::collections::HashSet;

/// Canonical order-independent identifier for an unordered member pair.
///
/// The two ids are sorted lexicographically and joined with `:`, so
/// `PairKey::new("b", "a") == PairKey::new("a", "b")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        PairKey(format!("{}:{}", lo, hi))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only snapshot of every member pair that has ever been introduced.
///
/// Rebuilt from the ledger on each run and never mutated mid-run. A pair is
/// excluded permanently once any record exists for it, regardless of that
/// record's current status.
#[derive(Debug, Clone, Default)]
pub struct PairHistory {
    keys: HashSet<PairKey>,
}

impl PairHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from raw (member_a, member_b) id pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let keys = pairs
            .into_iter()
            .map(|(a, b)| PairKey::new(a.as_ref(), b.as_ref()))
            .collect();
        Self { keys }
    }

    pub fn insert(&mut self, key: PairKey) {
        self.keys.insert(key);
    }

    pub fn contains(&self, key: &PairKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Lazy iterator over the n·(n−1)/2 unordered index pairs of a pool.
///
/// Yields `(i, j)` with `i < j` in enumeration order, so every pair is
/// visited exactly once and a fresh iterator replays the same sequence.
#[derive(Debug, Clone)]
pub struct UnorderedPairs {
    n: usize,
    i: usize,
    j: usize,
}

impl UnorderedPairs {
    pub fn new(n: usize) -> Self {
        Self { n, i: 0, j: 1 }
    }
}

impl Iterator for UnorderedPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.n {
            return None;
        }
        let pair = (self.i, self.j);
        self.j += 1;
        if self.j >= self.n {
            self.i += 1;
            self.j = self.i + 1;
        }
        Some(pair)
    }
}
