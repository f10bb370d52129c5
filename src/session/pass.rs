use thiserror::Error;

use crate::session::result::{PassResult, PassSource};
use crate::store::history::HistoryStore;
use crate::store::schema::{GradingEvent, Outcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a pass over an empty subset")]
    EmptySubset,
    #[error("no pass is in progress")]
    NoActivePass,
    #[error("the pass has not been completed")]
    NotComplete,
    #[error("no poems were missed in the last pass")]
    NothingMissed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeEffect {
    Advanced,
    Completed,
}

pub struct ActivePass {
    pub source: PassSource,
    pub subset: Vec<String>,
    pub cursor: usize,
    pub revealed: bool,
    pub correct_count: usize,
    pub missed: Vec<String>,
}

impl ActivePass {
    pub fn current(&self) -> &str {
        &self.subset[self.cursor]
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Know => self.correct_count += 1,
            Outcome::DontKnow => {
                let id = &self.subset[self.cursor];
                if !self.missed.contains(id) {
                    self.missed.push(id.clone());
                }
            }
        }
    }

    fn into_result(self) -> PassResult {
        PassResult {
            source: self.source,
            subset: self.subset,
            correct_count: self.correct_count,
            missed: self.missed,
        }
    }
}

pub enum SessionState {
    Idle,
    InPass(ActivePass),
    Complete(PassResult),
}

/// Drives one pass at a time over an ordered subset of poem identifiers.
/// The cursor always points inside the subset while a pass is active.
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn active(&self) -> Option<&ActivePass> {
        match self.state {
            SessionState::InPass(ref pass) => Some(pass),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PassResult> {
        match self.state {
            SessionState::Complete(ref result) => Some(result),
            _ => None,
        }
    }

    pub fn start_pass(
        &mut self,
        source: PassSource,
        subset: Vec<String>,
    ) -> Result<(), SessionError> {
        if subset.is_empty() {
            return Err(SessionError::EmptySubset);
        }
        log::info!("starting pass: {} ({} poems)", source.label(), subset.len());
        self.state = SessionState::InPass(ActivePass {
            source,
            subset,
            cursor: 0,
            revealed: false,
            correct_count: 0,
            missed: Vec::new(),
        });
        Ok(())
    }

    pub fn flip(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::InPass(ref mut pass) => {
                pass.revealed = !pass.revealed;
                Ok(())
            }
            _ => Err(SessionError::NoActivePass),
        }
    }

    /// Appends exactly one event for the current poem, then advances the
    /// cursor or completes the pass.
    pub fn grade(
        &mut self,
        outcome: Outcome,
        history: &mut HistoryStore,
    ) -> Result<GradeEffect, SessionError> {
        let SessionState::InPass(ref mut pass) = self.state else {
            return Err(SessionError::NoActivePass);
        };

        let event = GradingEvent::new(pass.current(), outcome);
        log::debug!("graded {} as {}", event.poem_id, outcome.as_str());
        if let Err(e) = history.append(event) {
            log::warn!("failed to persist grading event: {e:#}");
        }
        pass.record(outcome);

        if pass.cursor + 1 < pass.subset.len() {
            pass.cursor += 1;
            pass.revealed = false;
            return Ok(GradeEffect::Advanced);
        }

        if let SessionState::InPass(pass) = std::mem::replace(&mut self.state, SessionState::Idle)
        {
            let result = pass.into_result();
            log::info!(
                "pass complete: {} correct of {}, {} missed",
                result.correct_count,
                result.total(),
                result.missed.len()
            );
            self.state = SessionState::Complete(result);
        }
        Ok(GradeEffect::Completed)
    }

    pub fn restart_same_pass(&mut self) -> Result<(), SessionError> {
        let SessionState::Complete(ref result) = self.state else {
            return Err(SessionError::NotComplete);
        };
        let (source, subset) = (result.source.clone(), result.subset.clone());
        self.start_pass(source, subset)
    }

    pub fn review_missed(&mut self) -> Result<(), SessionError> {
        let SessionState::Complete(ref result) = self.state else {
            return Err(SessionError::NotComplete);
        };
        if result.missed.is_empty() {
            return Err(SessionError::NothingMissed);
        }
        let missed = result.missed.clone();
        self.start_pass(PassSource::Missed, missed)
    }

    /// Drops any pass state. Events already graded stay in the history.
    pub fn abort_to_menu(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("poem{i}")).collect()
    }

    fn started(n: usize) -> Session {
        let mut session = Session::new();
        session.start_pass(PassSource::Missed, ids(n)).unwrap();
        session
    }

    #[test]
    fn test_start_pass_rejects_empty_subset() {
        let mut session = Session::new();
        assert_eq!(
            session.start_pass(PassSource::Missed, Vec::new()),
            Err(SessionError::EmptySubset)
        );
        assert!(session.is_idle());
    }

    #[test]
    fn test_completes_exactly_after_nth_grade() {
        for n in 1..=6 {
            let mut session = started(n);
            let mut history = HistoryStore::in_memory();
            for i in 1..n {
                assert_eq!(
                    session.grade(Outcome::Know, &mut history),
                    Ok(GradeEffect::Advanced)
                );
                assert_eq!(session.active().map(|p| p.cursor), Some(i));
            }
            assert_eq!(
                session.grade(Outcome::Know, &mut history),
                Ok(GradeEffect::Completed)
            );
            assert!(session.result().is_some());
            assert_eq!(history.len(), n);
        }
    }

    #[test]
    fn test_single_poem_pass_completes_on_first_grade() {
        let mut session = started(1);
        let mut history = HistoryStore::in_memory();
        assert_eq!(
            session.grade(Outcome::DontKnow, &mut history),
            Ok(GradeEffect::Completed)
        );
        assert_eq!(session.result().map(|r| r.missed.clone()), Some(vec!["poem1".to_string()]));
    }

    #[test]
    fn test_grade_without_pass_is_rejected() {
        let mut session = Session::new();
        let mut history = HistoryStore::in_memory();
        assert_eq!(
            session.grade(Outcome::Know, &mut history),
            Err(SessionError::NoActivePass)
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_grade_appends_one_event_for_current_poem() {
        let mut session = started(3);
        let mut history = HistoryStore::in_memory();
        session.grade(Outcome::Know, &mut history).unwrap();
        session.grade(Outcome::DontKnow, &mut history).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.events()[0].poem_id, "poem1");
        assert_eq!(history.events()[1].poem_id, "poem2");
        assert_eq!(history.events()[1].outcome, Outcome::DontKnow);
    }

    #[test]
    fn test_grade_clears_reveal_flag() {
        let mut session = started(2);
        let mut history = HistoryStore::in_memory();
        session.flip().unwrap();
        assert_eq!(session.active().map(|p| p.revealed), Some(true));
        session.grade(Outcome::Know, &mut history).unwrap();
        assert_eq!(session.active().map(|p| p.revealed), Some(false));
    }

    #[test]
    fn test_missed_set_has_no_duplicates() {
        let mut session = Session::new();
        let subset = vec!["a".to_string(), "b".to_string(), "a".to_string(), "a".to_string()];
        session.start_pass(PassSource::Missed, subset).unwrap();
        let mut history = HistoryStore::in_memory();
        session.grade(Outcome::DontKnow, &mut history).unwrap();
        session.grade(Outcome::DontKnow, &mut history).unwrap();
        session.grade(Outcome::DontKnow, &mut history).unwrap();
        session.grade(Outcome::Know, &mut history).unwrap();

        let result = session.result().unwrap();
        assert_eq!(result.missed, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.correct_count, 1);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_restart_same_pass_resets_cursor_and_missed() {
        let mut session = started(2);
        let mut history = HistoryStore::in_memory();
        session.grade(Outcome::DontKnow, &mut history).unwrap();
        session.grade(Outcome::Know, &mut history).unwrap();

        session.restart_same_pass().unwrap();
        let pass = session.active().unwrap();
        assert_eq!(pass.cursor, 0);
        assert!(pass.missed.is_empty());
        assert_eq!(pass.correct_count, 0);
        assert_eq!(pass.subset, ids(2));
    }

    #[test]
    fn test_restart_requires_complete() {
        let mut session = started(2);
        assert_eq!(session.restart_same_pass(), Err(SessionError::NotComplete));
        session.abort_to_menu();
        assert_eq!(session.restart_same_pass(), Err(SessionError::NotComplete));
    }

    #[test]
    fn test_review_missed_starts_pass_over_missed_only() {
        let mut session = started(3);
        let mut history = HistoryStore::in_memory();
        session.grade(Outcome::Know, &mut history).unwrap();
        session.grade(Outcome::DontKnow, &mut history).unwrap();
        session.grade(Outcome::DontKnow, &mut history).unwrap();

        session.review_missed().unwrap();
        let pass = session.active().unwrap();
        assert_eq!(pass.source, PassSource::Missed);
        assert_eq!(pass.subset, vec!["poem2".to_string(), "poem3".to_string()]);
    }

    #[test]
    fn test_review_missed_with_nothing_missed_is_noop() {
        let mut session = started(1);
        let mut history = HistoryStore::in_memory();
        session.grade(Outcome::Know, &mut history).unwrap();
        assert_eq!(session.review_missed(), Err(SessionError::NothingMissed));
        assert!(session.result().is_some());
    }

    #[test]
    fn test_abort_keeps_graded_events() {
        let mut session = started(3);
        let mut history = HistoryStore::in_memory();
        session.grade(Outcome::Know, &mut history).unwrap();
        session.abort_to_menu();
        assert!(session.is_idle());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_flip_requires_pass() {
        let mut session = Session::new();
        assert_eq!(session.flip(), Err(SessionError::NoActivePass));
    }
}
