use std::cmp::Ordering;
use std::iter::FromIterator;
use std::slice;
use std::vec;

/// One word and how often it occurred. Detached from the table it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    word: String,
    count: u64,
}

impl FrequencyEntry {
    pub fn new(word: String, count: u64) -> Self {
        FrequencyEntry { word, count }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Report order: higher counts first, equal counts by word, byte-wise
/// ascending. Words are unique within a table, so no two entries of one
/// extraction compare equal.
impl Ord for FrequencyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.word.as_bytes().cmp(other.word.as_bytes()))
    }
}

impl PartialOrd for FrequencyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyList {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyList {
    pub fn new() -> Self {
        FrequencyList { entries: Vec::new() }
    }

    pub fn sort(&mut self) {
        self.entries.sort_unstable();
    }

    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(FrequencyEntry::count).sum()
    }

    pub fn iter(&self) -> slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }
}

impl From<Vec<FrequencyEntry>> for FrequencyList {
    fn from(entries: Vec<FrequencyEntry>) -> Self {
        FrequencyList { entries }
    }
}

impl FromIterator<FrequencyEntry> for FrequencyList {
    fn from_iter<I: IntoIterator<Item = FrequencyEntry>>(iter: I) -> Self {
        FrequencyList { entries: Vec::from_iter(iter) }
    }
}

impl IntoIterator for FrequencyList {
    type Item = FrequencyEntry;
    type IntoIter = vec::IntoIter<FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrequencyList {
    type Item = &'a FrequencyEntry;
    type IntoIter = slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
