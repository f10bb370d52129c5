use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::range::Range;
use crate::engine::stats::RangeStats;
use crate::session::mode::{ALL_MODES, DrillMode};
use crate::ui::theme::Theme;

pub const GRID_COLUMNS: usize = 4;

pub struct RangeEntry {
    pub range: Range,
    pub stats: RangeStats,
}

/// Cursor over the range grid, laid out row-major in `GRID_COLUMNS` columns.
#[derive(Clone, Debug, Default)]
pub struct MenuState {
    pub selected: usize,
    pub len: usize,
}

impl MenuState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.len - 1;
        }
    }

    pub fn down(&mut self) {
        if self.selected + GRID_COLUMNS < self.len {
            self.selected += GRID_COLUMNS;
        }
    }

    pub fn up(&mut self) {
        if self.selected >= GRID_COLUMNS {
            self.selected -= GRID_COLUMNS;
        }
    }
}

pub struct RangeMenu<'a> {
    pub entries: &'a [RangeEntry],
    pub state: &'a MenuState,
    pub mode: DrillMode,
    pub shuffle: bool,
    pub weak_count: usize,
    pub theme: &'a Theme,
}

impl<'a> RangeMenu<'a> {
    pub fn new(
        entries: &'a [RangeEntry],
        state: &'a MenuState,
        mode: DrillMode,
        shuffle: bool,
        weak_count: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entries,
            state,
            mode,
            shuffle,
            weak_count,
            theme,
        }
    }
}

impl Widget for RangeMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.entries.len().div_ceil(GRID_COLUMNS) as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Length(rows * 2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "百人一首",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "karuta flashcards",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let mut mode_spans = vec![Span::styled("Mode: ", Style::default().fg(colors.fg()))];
        for mode in ALL_MODES {
            let style = if mode == self.mode {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(colors.text_pending())
            };
            mode_spans.push(Span::styled(format!(" {} ", mode.label()), style));
        }
        mode_spans.push(Span::styled(
            if self.shuffle { "   shuffle on" } else { "   shuffle off" },
            Style::default().fg(colors.text_pending()),
        ));
        Paragraph::new(Line::from(mode_spans))
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        self.render_grid(layout[2], buf);

        let weak_text = if self.weak_count > 0 {
            format!("{} poem(s) to review", self.weak_count)
        } else {
            "No weak poems".to_string()
        };
        Paragraph::new(Line::from(Span::styled(
            weak_text,
            Style::default().fg(if self.weak_count > 0 {
                colors.warning()
            } else {
                colors.text_pending()
            }),
        )))
        .alignment(Alignment::Center)
        .render(layout[3], buf);
    }
}

impl RangeMenu<'_> {
    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rows = self.entries.len().div_ceil(GRID_COLUMNS);
        if rows == 0 {
            return;
        }

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints((0..rows).map(|_| Constraint::Length(2)).collect::<Vec<_>>())
            .split(area);

        for (row, chunk) in self.entries.chunks(GRID_COLUMNS).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    (0..GRID_COLUMNS)
                        .map(|_| Constraint::Ratio(1, GRID_COLUMNS as u32))
                        .collect::<Vec<_>>(),
                )
                .split(row_areas[row]);

            for (col, entry) in chunk.iter().enumerate() {
                let index = row * GRID_COLUMNS + col;
                let is_selected = index == self.state.selected;
                let indicator = if is_selected { ">" } else { " " };
                let mark = if entry.stats.is_mastered() { " ✓" } else { "" };

                let label_style = Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    });
                let count_color = if entry.stats.is_mastered() {
                    colors.success()
                } else if entry.stats.known_count > 0 {
                    colors.warning()
                } else {
                    colors.text_pending()
                };

                let line = Line::from(vec![
                    Span::styled(format!("{indicator} {:>7} ", entry.range.label()), label_style),
                    Span::styled(
                        format!("{}/{}{mark}", entry.stats.known_count, entry.stats.total),
                        Style::default().fg(count_color),
                    ),
                ]);
                Paragraph::new(line).render(cells[col], buf);
            }
        }
    }
}
