use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::stats::PoemStats;
use crate::session::pass::ActivePass;
use crate::ui::theme::Theme;

pub struct PassSidebar<'a> {
    pass: &'a ActivePass,
    poem_stats: PoemStats,
    /// Shown only once the card is turned over.
    author: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> PassSidebar<'a> {
    pub fn new(
        pass: &'a ActivePass,
        poem_stats: PoemStats,
        author: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            pass,
            poem_stats,
            author,
            theme,
        }
    }
}

impl Widget for PassSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Min(8)])
            .split(area);

        {
            let graded = self.pass.cursor;
            let remaining = self.pass.subset.len() - graded;
            let lines = vec![
                Line::from(vec![
                    Span::styled("Known:   ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("{}", self.pass.correct_count),
                        Style::default().fg(colors.know()),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Missed:  ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("{}", self.pass.missed.len()),
                        Style::default().fg(colors.dont_know()),
                    ),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Left:    ", Style::default().fg(colors.fg())),
                    Span::styled(format!("{remaining}"), Style::default().fg(colors.accent())),
                ]),
            ];

            let block = Block::bordered()
                .title(" This Pass ")
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(lines).block(block).render(sections[0], buf);
        }

        {
            let stats = &self.poem_stats;
            let pct = stats
                .percentage
                .map(|p| format!("{p}%"))
                .unwrap_or_else(|| "-".to_string());
            let lines = vec![
                Line::from(Span::styled(
                    self.author.unwrap_or("?"),
                    Style::default().fg(colors.text_pending()),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Seen:    ", Style::default().fg(colors.fg())),
                    Span::styled(format!("{}", stats.total), Style::default().fg(colors.fg())),
                ]),
                Line::from(vec![
                    Span::styled("Known:   ", Style::default().fg(colors.fg())),
                    Span::styled(pct, Style::default().fg(colors.accent())),
                ]),
            ];

            let block = Block::bordered()
                .title(" This Poem ")
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(lines).block(block).render(sections[1], buf);
        }
    }
}
