//! Trie-backed multiset of words.
//!
//! Nodes live in one arena vector and refer to their children by index, so
//! dropping a table is a single deallocation and no traversal ever recurses.
//! Index 0 is the root; the root is never anybody's child, which is what lets
//! child links be `NonZeroU32`.

use std::convert::TryFrom;
use std::num::NonZeroU32;

use crate::freq_list::{FrequencyEntry, FrequencyList};
use crate::tokenizer::Word;

const ALPHABET: usize = 26;
const ROOT: usize = 0;

type NodeId = NonZeroU32;

#[derive(Clone, Default)]
struct Node {
    children: [Option<NodeId>; ALPHABET],
    count: u64,
}

impl Node {
    fn child(&self, letter: usize) -> Option<usize> {
        self.children[letter].map(|id| id.get() as usize)
    }
}

/// Word occurrence counts keyed by a 26-ary trie.
///
/// Tables only grow: `insert` is the sole mutation. `destroy` consumes the
/// table, so nothing can touch it afterwards:
///
/// ```compile_fail
/// use word_freq::{FrequencyTable, Word};
///
/// let mut table = FrequencyTable::new();
/// table.insert(Word::new(b"gone").unwrap());
/// table.destroy();
/// table.count(b"gone");
/// ```
#[derive(Clone)]
pub struct FrequencyTable {
    nodes: Vec<Node>,
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            nodes: vec![Node::default()],
            distinct: 0,
            total: 0,
        }
    }

    /// Count one more occurrence of `word`, returning its new count.
    pub fn insert(&mut self, word: Word) -> u64 {
        let mut node = ROOT;
        for letter in word.letters() {
            node = match self.nodes[node].child(letter) {
                Some(child) => child,
                None => {
                    let child = self.alloc();
                    self.nodes[node].children[letter] = Some(child);
                    child.get() as usize
                }
            };
        }

        let count = &mut self.nodes[node].count;
        if *count == 0 {
            self.distinct += 1;
        }
        *count += 1;
        self.total += 1;
        *count
    }

    /// Occurrences of `word`; 0 for anything never inserted, including byte
    /// strings that aren't words at all.
    pub fn count(&self, word: &[u8]) -> u64 {
        let word = match Word::new(word) {
            Some(word) => word,
            None => return 0,
        };
        let mut node = ROOT;
        for letter in word.letters() {
            node = match self.nodes[node].child(letter) {
                Some(child) => child,
                None => return 0,
            };
        }
        self.nodes[node].count
    }

    /// Every counted word with its count, in trie order (`a` subtree before
    /// `b` subtree and so on). Trie order is not the report order; sort the
    /// result before emitting it.
    pub fn extract(&self) -> FrequencyList {
        let mut entries = Vec::with_capacity(self.distinct);
        let mut path: Vec<u8> = Vec::new();
        // (node, depth of node, letter leading to node)
        let mut stack: Vec<(usize, usize, u8)> = Vec::new();

        self.push_children(&mut stack, ROOT, 0);
        while let Some((node, depth, letter)) = stack.pop() {
            path.truncate(depth - 1);
            path.push(letter);

            let count = self.nodes[node].count;
            if count > 0 {
                let word: String = path.iter().map(|&b| char::from(b)).collect();
                entries.push(FrequencyEntry::new(word, count));
            }
            self.push_children(&mut stack, node, depth);
        }

        FrequencyList::from(entries)
    }

    /// Release every node, the root included. Returns how many nodes went.
    pub fn destroy(self) -> usize {
        self.nodes.len()
    }

    /// Distinct words.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // reverse so that 'a' is popped first
    fn push_children(&self, stack: &mut Vec<(usize, usize, u8)>, node: usize, depth: usize) {
        for letter in (0..ALPHABET).rev() {
            if let Some(child) = self.nodes[node].child(letter) {
                stack.push((child, depth + 1, b'a' + letter as u8));
            }
        }
    }

    fn alloc(&mut self) -> NodeId {
        let id = u32::try_from(self.nodes.len())
            .ok()
            .and_then(NonZeroU32::new)
            .expect("frequency table exceeded u32::MAX nodes");
        self.nodes.push(Node::default());
        id
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s.as_bytes()).unwrap()
    }

    fn pairs(list: &FrequencyList) -> Vec<(String, u64)> {
        list.iter().map(|e| (e.word().to_string(), e.count())).collect()
    }

    #[test]
    fn k_inserts_count_k() {
        for k in [1u64, 2, 7, 100].iter() {
            let mut table = FrequencyTable::new();
            for _ in 0..*k {
                table.insert(word("repeat"));
            }
            assert_eq!(table.count(b"repeat"), *k);
            assert_eq!(table.total(), *k);
            assert_eq!(table.len(), 1);
        }
    }

    #[test]
    fn insert_returns_running_count() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.insert(word("x")), 1);
        assert_eq!(table.insert(word("x")), 2);
        assert_eq!(table.insert(word("xy")), 1);
    }

    #[test]
    fn missing_words_count_zero() {
        let mut table = FrequencyTable::new();
        table.insert(word("cart"));
        // prefix node exists but was never a word
        assert_eq!(table.count(b"car"), 0);
        assert_eq!(table.count(b"carts"), 0);
        assert_eq!(table.count(b"dog"), 0);
        assert_eq!(table.count(b""), 0);
        assert_eq!(table.count(b"Cart"), 0);
    }

    #[test]
    fn nodes_created_lazily_and_shared_by_prefixes() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.node_count(), 1);
        table.insert(word("car"));
        assert_eq!(table.node_count(), 4);
        table.insert(word("cart"));
        assert_eq!(table.node_count(), 5);
        table.insert(word("car"));
        assert_eq!(table.node_count(), 5);
    }

    #[test]
    fn empty_table_extracts_nothing() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert!(table.extract().is_empty());
    }

    #[test]
    fn extract_walks_letters_in_order() {
        let mut table = FrequencyTable::new();
        for w in ["b", "ab", "a", "ba", "abc"].iter() {
            table.insert(word(w));
        }
        let names: Vec<String> = pairs(&table.extract()).into_iter().map(|(w, _)| w).collect();
        assert_eq!(names, vec!["a", "ab", "abc", "b", "ba"]);
    }

    #[test]
    fn extract_is_read_only_and_repeatable() {
        let mut table = FrequencyTable::new();
        for w in ["dog", "cat", "dog", "emu"].iter() {
            table.insert(word(w));
        }
        let first = table.extract().sorted();
        let second = table.extract().sorted();
        assert_eq!(first, second);
        assert_eq!(table.count(b"dog"), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn sorted_extraction_breaks_ties_by_word() {
        let mut table = FrequencyTable::new();
        for w in ["a", "a", "a", "b", "b", "b", "ab"].iter() {
            table.insert(word(w));
        }
        assert_eq!(
            pairs(&table.extract().sorted()),
            vec![("a".to_string(), 3), ("b".to_string(), 3), ("ab".to_string(), 1)]
        );
    }

    #[test]
    fn very_long_word_does_not_exhaust_the_stack() {
        let long = "z".repeat(200_000);
        let mut table = FrequencyTable::new();
        table.insert(word(&long));
        table.insert(word("z"));
        let list = table.extract();
        assert_eq!(list.len(), 2);
        assert_eq!(table.count(long.as_bytes()), 1);
        assert_eq!(table.destroy(), 200_001);
    }

    #[test]
    fn destroy_releases_root_and_all_nodes() {
        let mut table = FrequencyTable::new();
        table.insert(word("ab"));
        table.insert(word("ac"));
        assert_eq!(table.destroy(), 4);
        assert_eq!(FrequencyTable::new().destroy(), 1);
    }
}
