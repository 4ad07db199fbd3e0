use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use wordrill::engine::question::{BLANK, Question};

use crate::ui::theme::Theme;

pub struct QuestionCard<'a> {
    pub question: &'a Question,
    pub selected: usize,
    pub title: String,
    pub theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(question: &'a Question, selected: usize, theme: &'a Theme) -> Self {
        Self {
            question,
            selected,
            title: " Question ".to_string(),
            theme,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = format!(" {} ", title.into());
        self
    }
}

/// Split the blanked sentence so each blank can be highlighted on its own.
fn sentence_spans<'s>(text: &'s str, plain: Style, blank: Style) -> Vec<Span<'s>> {
    let mut spans = Vec::new();
    let mut parts = text.split(BLANK).peekable();
    while let Some(part) = parts.next() {
        if !part.is_empty() {
            spans.push(Span::styled(part, plain));
        }
        if parts.peek().is_some() {
            spans.push(Span::styled(BLANK, blank));
        }
    }
    spans
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let option_rows = self.question.options.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(option_rows),
            ])
            .split(inner);

        let plain = Style::default().fg(colors.fg());
        let blank = Style::default()
            .fg(colors.blank())
            .add_modifier(Modifier::BOLD);

        // Translation is left to the feedback screen.
        let lines = vec![
            Line::from(""),
            Line::from(sentence_spans(&self.question.display_text, plain, blank)),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(layout[0], buf);

        let option_lines: Vec<Line> = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let is_selected = i == self.selected;
                let indicator = if is_selected { ">" } else { " " };
                let style = if is_selected {
                    Style::default()
                        .fg(colors.accent())
                        .bg(colors.selected_bg())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {option}", i + 1),
                    style,
                ))
            })
            .collect();
        Paragraph::new(option_lines).render(layout[2], buf);
    }
}
