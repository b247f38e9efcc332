//! Bounded in-memory ledger of past conversions.

use crate::request::ConversionMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Entries kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 100;

/// Characters of source/target text kept in a preview.
pub const PREVIEW_CHARS: usize = 100;

/// A completed conversion, as remembered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub source_preview: String,
    pub target_preview: String,
    pub source_language: String,
    pub target_language: String,
    pub mode: ConversionMode,
    pub timestamp: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub score: f64,
    pub converted_lines: usize,
}

/// Fields of an entry before the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub source_preview: String,
    pub target_preview: String,
    pub source_language: String,
    pub target_language: String,
    pub mode: ConversionMode,
    pub elapsed_ms: u64,
    pub score: f64,
    pub converted_lines: usize,
}

/// Aggregates over the entries currently stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_conversions: usize,
    pub average_elapsed_ms: f64,
    pub average_score: f64,
    pub most_common_source_language: Option<String>,
    pub most_common_target_language: Option<String>,
    pub total_lines_converted: usize,
}

/// First [`PREVIEW_CHARS`] characters, with `...` when cut.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((at, _)) => format!("{}...", &text[..at]),
        None => text.to_string(),
    }
}

struct Ledger {
    /// Oldest first.
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

/// Fixed-capacity, oldest-evicted-first record store.
///
/// Every operation holds one mutex for its whole duration. A poisoned lock is
/// recovered: the ledger has no invariant a panicking reader could break.
pub struct HistoryStore {
    capacity: usize,
    ledger: Mutex<Ledger>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    /// A store keeping at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            ledger: Mutex::new(Ledger {
                entries: VecDeque::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record an entry, evicting the oldest when full. Returns the new id.
    pub fn append(&self, entry: NewEntry) -> u64 {
        let mut ledger = self.lock();
        let id = ledger.next_id;
        ledger.next_id += 1;
        while ledger.entries.len() >= self.capacity {
            ledger.entries.pop_front();
        }
        ledger.entries.push_back(HistoryEntry {
            id,
            source_preview: entry.source_preview,
            target_preview: entry.target_preview,
            source_language: entry.source_language,
            target_language: entry.target_language,
            mode: entry.mode,
            timestamp: Utc::now(),
            elapsed_ms: entry.elapsed_ms,
            score: entry.score,
            converted_lines: entry.converted_lines,
        });
        id
    }

    pub fn get(&self, id: u64) -> Option<HistoryEntry> {
        self.lock().entries.iter().find(|e| e.id == id).cloned()
    }

    /// One page, newest first. Pages are 1-based; page 0 is treated as 1.
    pub fn page(&self, page: usize, size: usize) -> Vec<HistoryEntry> {
        let skip = page.saturating_sub(1).saturating_mul(size);
        self.lock()
            .entries
            .iter()
            .rev()
            .skip(skip)
            .take(size)
            .cloned()
            .collect()
    }

    /// Remove one entry. Returns whether it existed.
    pub fn remove(&self, id: u64) -> bool {
        let mut ledger = self.lock();
        let before = ledger.entries.len();
        ledger.entries.retain(|e| e.id != id);
        ledger.entries.len() != before
    }

    /// Drop every entry. Ids keep increasing afterwards.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> HistoryStats {
        let ledger = self.lock();
        let entries = &ledger.entries;
        if entries.is_empty() {
            return HistoryStats::default();
        }
        let n = entries.len() as f64;
        HistoryStats {
            total_conversions: entries.len(),
            average_elapsed_ms: entries.iter().map(|e| e.elapsed_ms as f64).sum::<f64>() / n,
            average_score: entries.iter().map(|e| e.score).sum::<f64>() / n,
            most_common_source_language: most_common(entries.iter().map(|e| &e.source_language)),
            most_common_target_language: most_common(entries.iter().map(|e| &e.target_language)),
            total_lines_converted: entries.iter().map(|e| e.converted_lines).sum(),
        }
    }
}

/// Most frequent value; ties go to the value seen first.
fn most_common<'a>(values: impl Iterator<Item = &'a String>) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, v) in values.enumerate() {
        counts.entry(v.as_str()).or_insert((0, order)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(v, _)| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn entry(lang: &str, ms: u64) -> NewEntry {
        NewEntry {
            source_preview: "int a;".into(),
            target_preview: "a = None".into(),
            source_language: lang.into(),
            target_language: "python".into(),
            mode: ConversionMode::Snippet,
            elapsed_ms: ms,
            score: 90.0,
            converted_lines: 1,
        }
    }

    #[test]
    fn test_ids_increase_and_page_newest_first() {
        let store = HistoryStore::new(10);
        let ids: Vec<u64> = (0..5).map(|i| store.append(entry("java", i))).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let first: Vec<u64> = store.page(1, 2).iter().map(|e| e.id).collect();
        assert_eq!(first, vec![5, 4]);
        let third: Vec<u64> = store.page(3, 2).iter().map(|e| e.id).collect();
        assert_eq!(third, vec![1]);
        assert!(store.page(4, 2).is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = HistoryStore::new(3);
        for i in 0..5 {
            store.append(entry("java", i));
        }
        assert_eq!(store.len(), 3);
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_none());
        assert_eq!(store.get(5).map(|e| e.elapsed_ms), Some(4));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = HistoryStore::default();
        let id = store.append(entry("java", 1));
        assert!(store.remove(id));
        assert!(!store.remove(id));
        store.append(entry("java", 1));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.append(entry("java", 1)), 3);
    }

    #[test]
    fn test_stats() {
        let store = HistoryStore::default();
        assert_eq!(store.stats(), HistoryStats::default());
        store.append(entry("java", 10));
        store.append(entry("kotlin", 20));
        store.append(entry("java", 30));
        let stats = store.stats();
        assert_eq!(stats.total_conversions, 3);
        assert_eq!(stats.average_elapsed_ms, 20.0);
        assert_eq!(stats.most_common_source_language.as_deref(), Some("java"));
        assert_eq!(stats.most_common_target_language.as_deref(), Some("python"));
        assert_eq!(stats.total_lines_converted, 3);
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short"), "short");
        let long = "x".repeat(150);
        let p = preview(&long);
        assert_eq!(p.len(), 103);
        assert!(p.ends_with("..."));
        assert_eq!(preview(&"é".repeat(100)), "é".repeat(100));
    }

    #[test]
    fn test_concurrent_clear_and_reads() {
        let store = Arc::new(HistoryStore::new(50));
        let writers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..200 {
                        store.append(entry("java", i));
                    }
                })
            })
            .collect();
        let reader = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    for e in store.page(1, 10) {
                        assert_eq!(e.source_preview, "int a;");
                        assert_eq!(e.target_preview, "a = None");
                    }
                    store.clear();
                }
            })
        };
        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();
        assert!(store.len() <= 50);
        assert!(store.stats().total_conversions <= 50);
    }
}
