pub const RANGE_WIDTH: usize = 5;

/// A contiguous window over corpus order. `start` and `end` are 1-indexed
/// and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, position: usize) -> bool {
        (self.start..=self.end).contains(&position)
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

pub fn ranges(corpus_len: usize) -> Vec<Range> {
    (0..corpus_len.div_ceil(RANGE_WIDTH))
        .map(|index| {
            let start = index * RANGE_WIDTH + 1;
            Range {
                index,
                start,
                end: (start + RANGE_WIDTH - 1).min(corpus_len),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_corpus_has_twenty_ranges() {
        let all = ranges(100);
        assert_eq!(all.len(), 20);
        assert_eq!(all[0], Range { index: 0, start: 1, end: 5 });
        assert_eq!(all[19], Range { index: 19, start: 96, end: 100 });
        assert!(all.iter().all(|r| r.len() == RANGE_WIDTH));
    }

    #[test]
    fn test_ranges_are_contiguous() {
        let all = ranges(100);
        for pair in all.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
    }

    #[test]
    fn test_trailing_partial_range() {
        let all = ranges(12);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].start, 11);
        assert_eq!(all[2].end, 12);
        assert_eq!(all[2].len(), 2);
    }

    #[test]
    fn test_empty_corpus_has_no_ranges() {
        assert!(ranges(0).is_empty());
    }

    #[test]
    fn test_label_and_contains() {
        let r = ranges(100)[3];
        assert_eq!(r.label(), "16-20");
        assert!(r.contains(16));
        assert!(r.contains(20));
        assert!(!r.contains(21));
    }
}
