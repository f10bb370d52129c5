use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::corpus::Corpus;
use crate::session::result::PassResult;
use crate::ui::theme::Theme;

pub struct ResultSummary<'a> {
    pub result: &'a PassResult,
    pub corpus: &'a Corpus,
    pub theme: &'a Theme,
}

impl<'a> ResultSummary<'a> {
    pub fn new(result: &'a PassResult, corpus: &'a Corpus, theme: &'a Theme) -> Self {
        Self {
            result,
            corpus,
            theme,
        }
    }
}

impl Widget for ResultSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Pass Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![Span::styled(
            self.result.source.label(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let acc_color = if self.result.is_perfect() {
            colors.success()
        } else if self.result.percentage() >= 60 {
            colors.warning()
        } else {
            colors.error()
        };
        let score_line = Line::from(vec![
            Span::styled("  Known:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}/{}", self.result.correct_count, self.result.total()),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}%)", self.result.percentage()),
                Style::default().fg(colors.text_pending()),
            ),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let missed_line = Line::from(vec![
            Span::styled("  Missed:   ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}", self.result.missed.len()),
                Style::default().fg(if self.result.is_perfect() {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]);
        Paragraph::new(missed_line).render(layout[2], buf);

        let missed_lines: Vec<Line> = self
            .result
            .missed
            .iter()
            .filter_map(|id| {
                let poem = self.corpus.get(id)?;
                let position = self.corpus.position(id)?;
                Some(Line::from(vec![
                    Span::styled(format!("  {position:>3}  "), Style::default().fg(colors.text_pending())),
                    Span::styled(
                        format!("{:<8}", poem.kimariji),
                        Style::default().fg(colors.kimariji()),
                    ),
                    Span::styled(format!("  {}", poem.upper_verse()), Style::default().fg(colors.fg())),
                ]))
            })
            .collect();
        Paragraph::new(missed_lines).render(layout[3], buf);

        let review_style = if self.result.is_perfect() {
            Style::default().fg(colors.text_pending())
        } else {
            Style::default().fg(colors.accent())
        };
        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [m] Review missed  ", review_style),
            Span::styled("[r] Restart  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Menu", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[4], buf);
    }
}
