use std::collections::HashMap;

use crate::corpus::{Corpus, Poem};
use crate::store::schema::{GradingEvent, Outcome};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeStats {
    pub known_count: usize,
    pub total: usize,
}

impl RangeStats {
    pub fn is_mastered(&self) -> bool {
        self.total > 0 && self.known_count == self.total
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoemStats {
    pub know_count: usize,
    pub dont_know_count: usize,
    pub total: usize,
    /// `None` until the poem has been graded at least once.
    pub percentage: Option<u32>,
}

impl PoemStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Know => self.know_count += 1,
            Outcome::DontKnow => self.dont_know_count += 1,
        }
        self.total += 1;
    }

    fn finish(mut self) -> Self {
        self.percentage = percentage(self.know_count, self.total);
        self
    }
}

/// Round-half-up integer percentage, `None` when `total` is zero.
pub fn percentage(part: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some(((200 * part + total) / (2 * total)) as u32)
}

/// Last outcome per poem in log order.
pub fn latest_outcomes(events: &[GradingEvent]) -> HashMap<&str, Outcome> {
    let mut latest = HashMap::new();
    for event in events {
        latest.insert(event.poem_id.as_str(), event.outcome);
    }
    latest
}

/// Counts poems whose most recent event is `know`. `total` is the number of
/// poems, not events.
pub fn range_stats(events: &[GradingEvent], poems: &[Poem]) -> RangeStats {
    let latest = latest_outcomes(events);
    let known_count = poems
        .iter()
        .filter(|p| latest.get(p.id.as_str()) == Some(&Outcome::Know))
        .count();
    RangeStats {
        known_count,
        total: poems.len(),
    }
}

/// Counts every historical event for the poem, not just the latest.
pub fn poem_stats(events: &[GradingEvent], poem_id: &str) -> PoemStats {
    let mut stats = PoemStats::default();
    for event in events.iter().filter(|e| e.poem_id == poem_id) {
        stats.record(event.outcome);
    }
    stats.finish()
}

pub struct PoemRow<'a> {
    pub poem: &'a Poem,
    pub position: usize,
    pub stats: PoemStats,
    pub last_graded: Option<i64>,
}

/// Per-poem statistics for the whole corpus in a single pass over the log.
pub fn poem_table<'a>(events: &[GradingEvent], corpus: &'a Corpus) -> Vec<PoemRow<'a>> {
    let mut acc: HashMap<&str, (PoemStats, i64)> = HashMap::new();
    for event in events {
        let entry = acc.entry(event.poem_id.as_str()).or_default();
        entry.0.record(event.outcome);
        entry.1 = event.timestamp;
    }

    corpus
        .poems()
        .iter()
        .enumerate()
        .map(|(i, poem)| {
            let (stats, last_graded) = match acc.get(poem.id.as_str()) {
                Some(&(stats, ts)) => (stats.finish(), Some(ts)),
                None => (PoemStats::default(), None),
            };
            PoemRow {
                poem,
                position: i + 1,
                stats,
                last_graded,
            }
        })
        .collect()
}

/// Poems whose latest outcome is `dont_know`, in corpus order.
pub fn weak_poem_ids(events: &[GradingEvent], corpus: &Corpus) -> Vec<String> {
    let latest = latest_outcomes(events);
    corpus
        .poems()
        .iter()
        .filter(|p| latest.get(p.id.as_str()) == Some(&Outcome::DontKnow))
        .map(|p| p.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_poem;

    fn ev(id: &str, outcome: Outcome) -> GradingEvent {
        GradingEvent::at(id, outcome, 0)
    }

    fn small_corpus() -> Corpus {
        Corpus::from_poems((1..=5).map(|i| test_poem(&i.to_string())).collect()).unwrap()
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(3, 4), Some(75));
        assert_eq!(percentage(1, 8), Some(13)); // 12.5
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(0, 5), Some(0));
        assert_eq!(percentage(5, 5), Some(100));
        assert_eq!(percentage(0, 0), None);
    }

    #[test]
    fn test_poem_stats_counts_all_events() {
        let events = vec![
            ev("7", Outcome::Know),
            ev("7", Outcome::Know),
            ev("3", Outcome::DontKnow),
            ev("7", Outcome::Know),
            ev("7", Outcome::DontKnow),
        ];
        let stats = poem_stats(&events, "7");
        assert_eq!(
            stats,
            PoemStats {
                know_count: 3,
                dont_know_count: 1,
                total: 4,
                percentage: Some(75),
            }
        );
    }

    #[test]
    fn test_poem_stats_undefined_without_events() {
        let events = vec![ev("1", Outcome::Know)];
        let stats = poem_stats(&events, "2");
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, None);
    }

    #[test]
    fn test_range_stats_uses_latest_outcome_only() {
        let corpus = small_corpus();
        let events = vec![
            ev("1", Outcome::DontKnow),
            ev("1", Outcome::DontKnow),
            ev("1", Outcome::Know),
            ev("2", Outcome::Know),
            ev("2", Outcome::DontKnow),
            ev("3", Outcome::Know),
        ];
        let stats = range_stats(&events, corpus.poems());
        assert_eq!(stats, RangeStats { known_count: 2, total: 5 });
        assert!(!stats.is_mastered());
    }

    #[test]
    fn test_range_stats_ignores_poems_outside_range() {
        let corpus = small_corpus();
        let events = vec![ev("99", Outcome::Know), ev("1", Outcome::Know)];
        let stats = range_stats(&events, &corpus.poems()[..2]);
        assert_eq!(stats, RangeStats { known_count: 1, total: 2 });
    }

    #[test]
    fn test_range_mastered_when_all_latest_know() {
        let corpus = small_corpus();
        let events: Vec<_> = (1..=5).map(|i| ev(&i.to_string(), Outcome::Know)).collect();
        assert!(range_stats(&events, corpus.poems()).is_mastered());
    }

    #[test]
    fn test_empty_log_has_zero_known() {
        let corpus = small_corpus();
        assert_eq!(
            range_stats(&[], corpus.poems()),
            RangeStats { known_count: 0, total: 5 }
        );
        for poem in corpus.poems() {
            assert_eq!(poem_stats(&[], &poem.id).percentage, None);
        }
    }

    #[test]
    fn test_poem_table_matches_poem_stats() {
        let corpus = small_corpus();
        let events = vec![
            GradingEvent::at("2", Outcome::Know, 100),
            GradingEvent::at("4", Outcome::DontKnow, 200),
            GradingEvent::at("2", Outcome::DontKnow, 300),
        ];
        let table = poem_table(&events, &corpus);
        assert_eq!(table.len(), 5);
        for row in &table {
            assert_eq!(row.stats, poem_stats(&events, &row.poem.id));
        }
        assert_eq!(table[1].position, 2);
        assert_eq!(table[1].last_graded, Some(300));
        assert_eq!(table[0].last_graded, None);
        assert_eq!(table[1].stats.percentage, Some(50));
    }

    #[test]
    fn test_weak_poems_follow_latest_outcome() {
        let corpus = small_corpus();
        let events = vec![
            ev("3", Outcome::DontKnow),
            ev("1", Outcome::DontKnow),
            ev("1", Outcome::Know),
            ev("5", Outcome::DontKnow),
        ];
        assert_eq!(weak_poem_ids(&events, &corpus), vec!["3", "5"]);
    }
}
