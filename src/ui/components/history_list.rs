use chrono::DateTime;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Row, Table, Widget};

use crate::engine::stats::PoemRow;
use crate::ui::theme::Theme;

pub struct HistoryList<'a> {
    pub rows: &'a [PoemRow<'a>],
    pub selected: usize,
    pub total_events: usize,
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> HistoryList<'a> {
    pub fn new(
        rows: &'a [PoemRow<'a>],
        selected: usize,
        total_events: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            rows,
            selected,
            total_events,
            status: None,
            theme,
        }
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

/// First row index to draw so that `selected` stays inside `height` rows.
pub fn scroll_offset(selected: usize, height: usize, len: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let half = height / 2;
    selected.saturating_sub(half).min(len - height)
}

fn format_day(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(DateTime::from_timestamp_millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Widget for HistoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" History ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let graded = self.rows.iter().filter(|r| r.stats.total > 0).count();
        let mut spans = vec![
            Span::styled(
                format!("  {graded}/{} poems graded", self.rows.len()),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                format!("  ({} events)", self.total_events),
                Style::default().fg(colors.text_pending()),
            ),
        ];
        if let Some(status) = self.status {
            spans.push(Span::styled(
                format!("  {status}"),
                Style::default().fg(colors.warning()),
            ));
        }
        let summary = Line::from(spans);
        Paragraph::new(summary).render(layout[0], buf);

        let visible = layout[1].height.saturating_sub(1) as usize;
        let offset = scroll_offset(self.selected, visible, self.rows.len());

        let header = Row::new(vec!["#", "Kimariji", "Author", "Know", "Miss", "%", "Last"])
            .style(
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            );

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, row)| {
                let pct = row
                    .stats
                    .percentage
                    .map(|p| format!("{p}%"))
                    .unwrap_or_else(|| "-".to_string());
                let pct_color = match row.stats.percentage {
                    None => colors.text_pending(),
                    Some(p) if p >= 80 => colors.success(),
                    Some(p) if p >= 50 => colors.warning(),
                    Some(_) => colors.error(),
                };
                let style = if i == self.selected {
                    Style::default()
                        .bg(colors.accent_dim())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Line::from(format!("{:>3}", row.position)),
                    Line::from(Span::styled(
                        row.poem.kimariji.clone(),
                        Style::default().fg(colors.kimariji()),
                    )),
                    Line::from(row.poem.author.clone()),
                    Line::from(format!("{:>4}", row.stats.know_count)),
                    Line::from(format!("{:>4}", row.stats.dont_know_count)),
                    Line::from(Span::styled(format!("{pct:>4}"), Style::default().fg(pct_color))),
                    Line::from(Span::styled(
                        format_day(row.last_graded),
                        Style::default().fg(colors.text_pending()),
                    )),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(12),
                Constraint::Min(12),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .style(Style::default().fg(colors.fg()));
        Widget::render(table, layout[1], buf);

        let footer = Paragraph::new(Line::from(Span::styled(
            "  [ESC] Back  [j/k] Navigate  [x] Reset history",
            Style::default().fg(colors.accent()),
        )));
        footer.render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 10, 100), 0);
        assert_eq!(scroll_offset(50, 10, 100), 45);
        assert_eq!(scroll_offset(99, 10, 100), 90);
        assert_eq!(scroll_offset(3, 10, 5), 0);
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day(None), "-");
        assert_eq!(format_day(Some(0)), "1970-01-01");
    }
}
