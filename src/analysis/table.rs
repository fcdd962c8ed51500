use std::{
    collections::{
        HashMap,
        HashSet,
    },
    fmt,
};

use serde::{
    de::{
        self,
        MapAccess,
        Visitor,
    },
    ser::SerializeMap,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use super::normalizer::normalize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Word -> occurrence count, ordered by count descending.
///
/// Equal counts keep the order in which their words were first seen. Every
/// count is at least 1. Tables are plain values: a filtered view is a copy and
/// never follows later changes to its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts raw tokens in order and returns the sorted table.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = FrequencyTableBuilder::default();
        for token in tokens {
            builder.push(token.as_ref());
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<u32> {
        self.entries.iter().find(|entry| entry.word == word).map(|entry| entry.count)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.word.as_str()).collect()
    }

    /// Sum of all counts.
    pub fn total_occurrences(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.count)).sum()
    }

    pub fn top(&self, n: usize) -> &[WordCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Competition ranks in table order: equal counts share a rank and the
    /// following rank skips ahead (3, 3, 1 -> 1, 1, 3).
    pub fn ranks(&self) -> Vec<u32> {
        let counts: Vec<u32> = self.entries.iter().map(|entry| entry.count).collect();
        calculate_ranks(&counts)
    }

    /// Copy of the entries matching `keep`, in the same order.
    pub fn filtered<F>(&self, mut keep: F) -> FrequencyTable
    where
        F: FnMut(&WordCount) -> bool,
    {
        let entries = self.entries.iter().filter(|entry| keep(*entry)).cloned().collect();
        FrequencyTable { entries }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Restores the ordering invariant after entries were inserted out of order.
    /// `sort_by` is stable, so existing relative order breaks the ties.
    fn sort_by_count(&mut self) {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a WordCount;
    type IntoIter = std::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Accumulates counts token by token. Words are stored in first-seen order until
/// `finish` sorts them.
#[derive(Debug, Default)]
pub struct FrequencyTableBuilder {
    positions: HashMap<String, usize>,
    entries: Vec<WordCount>,
    seen: usize,
    discarded: usize,
}

impl FrequencyTableBuilder {
    /// Counts one raw token. Returns false when the token normalized to nothing.
    pub fn push(&mut self, raw: &str) -> bool {
        self.seen += 1;

        let Some(word) = normalize(raw) else {
            self.discarded += 1;
            return false;
        };

        match self.positions.get(&word) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                entry.count = entry.count.saturating_add(1);
            }
            None => {
                self.positions.insert(word.clone(), self.entries.len());
                self.entries.push(WordCount { word, count: 1 });
            }
        }
        true
    }

    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn finish(self) -> FrequencyTable {
        let mut table = FrequencyTable { entries: self.entries };
        table.sort_by_count();
        table
    }
}

pub fn calculate_ranks(counts: &[u32]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(counts.len());
    let mut current_rank = 1u32;
    let mut prev_count: Option<u32> = None;

    for (idx, &count) in counts.iter().enumerate() {
        if prev_count != Some(count) {
            current_rank = (idx + 1) as u32;
        }
        prev_count = Some(count);
        ranks.push(current_rank);
    }

    ranks
}

// Serialized as a JSON object whose key order is the table order.
impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.word, &entry.count)?;
        }
        map.end()
    }
}

/// Loading restores table order: entries are re-sorted by count, and equal
/// counts keep the order they had in the document.
impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FrequencyTableVisitor)
    }
}

struct FrequencyTableVisitor;

impl<'de> Visitor<'de> for FrequencyTableVisitor {
    type Value = FrequencyTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping words to positive counts")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries: Vec<WordCount> = Vec::with_capacity(access.size_hint().unwrap_or(0));

        while let Some((word, count)) = access.next_entry::<String, u32>()? {
            if count == 0 {
                return Err(de::Error::custom(format!("count for '{}' must be positive", word)));
            }
            if !seen.insert(word.clone()) {
                return Err(de::Error::custom(format!("duplicate word '{}'", word)));
            }
            entries.push(WordCount { word, count });
        }

        let mut table = FrequencyTable { entries };
        table.sort_by_count();
        Ok(table)
    }
}
