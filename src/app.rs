use std::cell::Cell;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use ratatui::layout::{Position, Rect};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::engine::range::{self, Range};
use crate::engine::stats;
use crate::session::mode::{CardFace, DrillMode};
use crate::session::pass::{GradeEffect, Session};
use crate::session::result::PassSource;
use crate::store::history::HistoryStore;
use crate::store::json_store::{JsonStore, default_data_dir};
use crate::store::schema::Outcome;
use crate::ui::components::menu::{MenuState, RangeEntry};
use crate::ui::swipe::SwipeTracker;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Card,
    Result,
    HistoryList,
}

pub struct App {
    pub screen: AppScreen,
    pub drill_mode: DrillMode,
    pub session: Session,
    pub history: HistoryStore,
    pub corpus: Corpus,
    pub ranges: Vec<Range>,
    pub menu: MenuState,
    pub swipe: SwipeTracker,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub confirm_reset: bool,
    pub history_selected: usize,
    /// One-line feedback for the last destructive action, cleared on the next key.
    pub status: Option<String>,
    /// Where the card was last drawn; mouse presses outside it are ignored.
    pub card_area: Cell<Option<Rect>>,
    /// Config as read from disk, without one-run CLI overrides.
    saved_config: Config,
    config_path: Option<PathBuf>,
    rng: SmallRng,
}

impl App {
    /// `config` is the effective configuration for this run; `saved` is the
    /// on-disk file that menu changes are written back to.
    pub fn new(config: Config, saved: Config) -> Result<Self> {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            log::warn!(
                "unknown theme {:?}, available: {}",
                config.theme,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let corpus_path = config.corpus_path.as_ref().map(PathBuf::from);
        let corpus = Corpus::load(corpus_path.as_deref()).context("failed to load poem corpus")?;

        let data_dir = config
            .data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let history = match JsonStore::with_base_dir(data_dir.clone()) {
            Ok(store) => HistoryStore::open(store),
            Err(e) => {
                log::error!(
                    "cannot use data directory {}: {e:#}; history will not be saved",
                    data_dir.display()
                );
                HistoryStore::in_memory()
            }
        };

        log::info!(
            "loaded {} poems and {} grading events",
            corpus.len(),
            history.len()
        );

        let mut app = Self::with_parts(config, corpus, history, theme)
            .with_config_file(Config::config_path(), saved);
        app.rng = SmallRng::from_entropy();
        Ok(app)
    }

    /// Assembles an app from already-loaded parts. Config changes made
    /// through such an app are not written back to disk.
    pub fn with_parts(
        config: Config,
        corpus: Corpus,
        history: HistoryStore,
        theme: &'static Theme,
    ) -> Self {
        let ranges = range::ranges(corpus.len());
        let menu = MenuState::new(ranges.len());
        let swipe = SwipeTracker::new(config.swipe_threshold);
        let saved_config = config.clone();
        Self {
            screen: AppScreen::Menu,
            drill_mode: config.mode(),
            session: Session::new(),
            history,
            corpus,
            ranges,
            menu,
            swipe,
            theme,
            config,
            should_quit: false,
            confirm_reset: false,
            history_selected: 0,
            status: None,
            card_area: Cell::new(None),
            saved_config,
            config_path: None,
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Writes mode and shuffle changes to `path`, starting from `saved`.
    pub fn with_config_file(mut self, path: PathBuf, saved: Config) -> Self {
        self.config_path = Some(path);
        self.saved_config = saved;
        self
    }

    pub fn range_entries(&self) -> Vec<RangeEntry> {
        let events = self.history.events();
        self.ranges
            .iter()
            .map(|r| RangeEntry {
                range: *r,
                stats: stats::range_stats(events, self.corpus.range_poems(r)),
            })
            .collect()
    }

    pub fn weak_ids(&self) -> Vec<String> {
        stats::weak_poem_ids(self.history.events(), &self.corpus)
    }

    /// Poems whose latest outcome is `know`, across the whole corpus.
    pub fn known_total(&self) -> usize {
        stats::range_stats(self.history.events(), self.corpus.poems()).known_count
    }

    pub fn start_selected_range(&mut self) {
        let Some(range) = self.ranges.get(self.menu.selected).copied() else {
            return;
        };
        let ids = self.corpus.range_ids(&range);
        self.start_pass(PassSource::Range(range), ids);
    }

    pub fn start_weak_review(&mut self) {
        let ids = self.weak_ids();
        if ids.is_empty() {
            return;
        }
        self.start_pass(PassSource::Weak, ids);
    }

    fn start_pass(&mut self, source: PassSource, mut ids: Vec<String>) {
        if self.config.shuffle {
            ids.shuffle(&mut self.rng);
        }
        match self.session.start_pass(source, ids) {
            Ok(()) => self.enter_card(),
            Err(e) => log::warn!("cannot start pass: {e}"),
        }
    }

    fn enter_card(&mut self) {
        self.swipe.cancel();
        self.screen = AppScreen::Card;
    }

    /// Face of the current card, front or back depending on the reveal flag.
    pub fn current_face(&self) -> Option<CardFace> {
        let pass = self.session.active()?;
        let poem = self.corpus.get(pass.current())?;
        Some(if pass.revealed {
            self.drill_mode.back(poem)
        } else {
            self.drill_mode.front(poem)
        })
    }

    pub fn flip(&mut self) {
        if self.screen != AppScreen::Card {
            return;
        }
        if let Err(e) = self.session.flip() {
            log::warn!("flip ignored: {e}");
        }
    }

    pub fn grade(&mut self, outcome: Outcome) {
        if self.screen != AppScreen::Card {
            return;
        }
        self.swipe.cancel();
        match self.session.grade(outcome, &mut self.history) {
            Ok(GradeEffect::Advanced) => {}
            Ok(GradeEffect::Completed) => self.screen = AppScreen::Result,
            Err(e) => log::warn!("grade ignored: {e}"),
        }
    }

    pub fn press_swipe(&mut self, column: u16, row: u16) {
        if self.screen != AppScreen::Card {
            return;
        }
        let on_card = self
            .card_area
            .get()
            .is_some_and(|area| area.contains(Position::new(column, row)));
        if on_card {
            self.swipe.press(column);
        }
    }

    pub fn drag_swipe(&mut self, column: u16) {
        if self.screen == AppScreen::Card {
            self.swipe.drag(column);
        }
    }

    /// A release past the threshold grades the card; a click without any
    /// movement flips it.
    pub fn release_swipe(&mut self, column: u16) {
        if self.screen != AppScreen::Card || !self.swipe.is_active() {
            return;
        }
        self.swipe.drag(column);
        let tapped = self.swipe.offset() == 0;
        match self.swipe.release(column) {
            Some(outcome) => self.grade(outcome),
            None if tapped => self.flip(),
            None => {}
        }
    }

    pub fn restart_same_pass(&mut self) {
        if self.screen != AppScreen::Result {
            return;
        }
        match self.session.restart_same_pass() {
            Ok(()) => self.enter_card(),
            Err(e) => log::warn!("cannot restart pass: {e}"),
        }
    }

    pub fn can_review_missed(&self) -> bool {
        self.session.result().is_some_and(|r| !r.missed.is_empty())
    }

    pub fn review_missed(&mut self) {
        if self.screen != AppScreen::Result || !self.can_review_missed() {
            return;
        }
        match self.session.review_missed() {
            Ok(()) => self.enter_card(),
            Err(e) => log::warn!("cannot review missed poems: {e}"),
        }
    }

    pub fn go_to_menu(&mut self) {
        self.session.abort_to_menu();
        self.swipe.cancel();
        self.card_area.set(None);
        self.confirm_reset = false;
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_history(&mut self) {
        if self.screen != AppScreen::Menu {
            return;
        }
        self.history_selected = 0;
        self.screen = AppScreen::HistoryList;
    }

    pub fn history_next(&mut self) {
        if self.history_selected + 1 < self.corpus.len() {
            self.history_selected += 1;
        }
    }

    pub fn history_prev(&mut self) {
        self.history_selected = self.history_selected.saturating_sub(1);
    }

    pub fn history_jump(&mut self, delta: isize) {
        let last = self.corpus.len().saturating_sub(1);
        self.history_selected = self
            .history_selected
            .saturating_add_signed(delta)
            .min(last);
    }

    pub fn request_reset(&mut self) {
        if matches!(self.screen, AppScreen::Menu | AppScreen::HistoryList) {
            self.confirm_reset = true;
        }
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    pub fn confirm_reset(&mut self) {
        if !self.confirm_reset {
            return;
        }
        self.confirm_reset = false;
        let count = self.history.len();
        match self.history.reset() {
            Ok(()) => {
                log::info!("history reset ({count} events removed)");
                self.status = Some(format!("History cleared ({count} gradings removed)"));
            }
            Err(e) => {
                log::error!("history reset failed, nothing was cleared: {e:#}");
                self.status = Some("Reset failed: history was not cleared".to_string());
            }
        }
        self.history_selected = 0;
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        self.drill_mode = if forward {
            self.drill_mode.next()
        } else {
            self.drill_mode.prev()
        };
        self.config.set_mode(self.drill_mode);
        self.save_config();
    }

    pub fn toggle_shuffle(&mut self) {
        self.config.shuffle = !self.config.shuffle;
        self.save_config();
    }

    fn save_config(&mut self) {
        let Some(ref path) = self.config_path else {
            return;
        };
        self.saved_config.drill_mode = self.config.drill_mode.clone();
        self.saved_config.shuffle = self.config.shuffle;
        if let Err(e) = self.saved_config.save_to(path) {
            log::warn!("failed to save config: {e:#}");
        }
    }
}
