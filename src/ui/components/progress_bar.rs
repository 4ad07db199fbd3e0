use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// One-row bar with a centered label. Bordered unless `compact`.
pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub text: Option<String>,
    pub fill: Option<Color>,
    pub compact: bool,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            ratio: ratio.clamp(0.0, 1.0),
            text: None,
            fill: None,
            compact: false,
            theme,
        }
    }

    /// Replace the default percentage text, e.g. with "3/10".
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let inner = if self.compact {
            area
        } else {
            let block = Block::bordered()
                .title(format!(" {} ", self.label))
                .border_style(Style::default().fg(colors.border()));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let fill = self.fill.unwrap_or_else(|| colors.accent());
        let filled_width = (self.ratio * inner.width as f64).round() as u16;
        let text = self
            .text
            .unwrap_or_else(|| format!("{:.0}%", self.ratio * 100.0));

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let text_width = text.chars().count() as u16;
        let text_x = inner.x + inner.width.saturating_sub(text_width) / 2;
        buf.set_stringn(
            text_x,
            inner.y,
            &text,
            inner.width as usize,
            Style::default().fg(colors.fg()),
        );
    }
}
