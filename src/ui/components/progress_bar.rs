use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Card-position bar for the active pass, labelled `done/total`.
pub struct PassProgress<'a> {
    pub title: String,
    pub done: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> PassProgress<'a> {
    pub fn new(title: &str, done: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            title: title.to_string(),
            done: done.min(total),
            total,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

impl Widget for PassProgress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64) as u16;
        let label = format!("{}/{}", self.done, self.total);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_handles_empty_and_overflow() {
        let theme = Theme::default();
        assert_eq!(PassProgress::new("p", 0, 0, &theme).ratio(), 0.0);
        assert_eq!(PassProgress::new("p", 9, 5, &theme).ratio(), 1.0);
        assert_eq!(PassProgress::new("p", 2, 4, &theme).ratio(), 0.5);
    }
}
