use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::session::mode::CardFace;
use crate::store::schema::Outcome;
use crate::ui::theme::Theme;

pub struct Card<'a> {
    pub face: CardFace,
    pub revealed: bool,
    /// Outcome a release of the current drag would produce.
    pub pending: Option<Outcome>,
    pub theme: &'a Theme,
}

impl<'a> Card<'a> {
    pub fn new(face: CardFace, revealed: bool, pending: Option<Outcome>, theme: &'a Theme) -> Self {
        Self {
            face,
            revealed,
            pending,
            theme,
        }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border_color = match self.pending {
            Some(Outcome::Know) => colors.know(),
            Some(Outcome::DontKnow) => colors.dont_know(),
            None if self.revealed => colors.border_focused(),
            None => colors.border(),
        };
        let badge = match self.pending {
            Some(Outcome::Know) => " know ▶ ",
            Some(Outcome::DontKnow) => " ◀ don't know ",
            None => "",
        };

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.face.title))
            .title_bottom(Line::from(badge).alignment(Alignment::Center))
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(colors.card_bg()).fg(colors.card_fg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        let body_height = self.face.lines.len() + usize::from(self.face.emphasis.is_some()) * 2;
        let top_pad = (inner.height as usize).saturating_sub(body_height) / 2;
        for _ in 0..top_pad {
            lines.push(Line::from(""));
        }

        if let Some(ref emphasis) = self.face.emphasis {
            lines.push(Line::from(Span::styled(
                emphasis.clone(),
                Style::default()
                    .fg(colors.kimariji())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }
        for line in &self.face.lines {
            lines.push(Line::from(Span::styled(
                line.clone(),
                Style::default().fg(colors.card_fg()),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
