use crate::engine::range::Range;
use crate::engine::stats;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassSource {
    Range(Range),
    /// Poems missed in the previous pass.
    Missed,
    /// Poems whose latest recorded outcome is "don't know".
    Weak,
}

impl PassSource {
    pub fn label(&self) -> String {
        match self {
            PassSource::Range(range) => format!("Poems {}", range.label()),
            PassSource::Missed => "Review missed".to_string(),
            PassSource::Weak => "Review weak poems".to_string(),
        }
    }
}

/// Summary of a finished pass, frozen while the result screen is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassResult {
    pub source: PassSource,
    pub subset: Vec<String>,
    pub correct_count: usize,
    /// Distinct poems graded "don't know", in order of first miss.
    pub missed: Vec<String>,
}

impl PassResult {
    pub fn total(&self) -> usize {
        self.subset.len()
    }

    /// Known share of the pass, rounded half up like the per-poem history.
    pub fn percentage(&self) -> u32 {
        stats::percentage(self.correct_count, self.total()).unwrap_or(0)
    }

    pub fn is_perfect(&self) -> bool {
        self.missed.is_empty()
    }
}
