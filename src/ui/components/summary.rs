use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use wordrill::session::SessionSummary;

use crate::ui::theme::Theme;

pub struct SessionSummaryPanel<'a> {
    summary: &'a SessionSummary,
    theme: &'a Theme,
}

impl<'a> SessionSummaryPanel<'a> {
    pub fn new(summary: &'a SessionSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for SessionSummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;

        let block = Block::bordered()
            .title(" Session Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Results",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let accuracy_color = if summary.accuracy >= 80.0 {
            colors.success()
        } else if summary.accuracy >= 50.0 {
            colors.warning()
        } else {
            colors.error()
        };
        let label = Style::default().fg(colors.fg());
        let muted = Style::default().fg(colors.muted());

        let lines = vec![
            Line::from(vec![
                Span::styled("  Accuracy:   ", label),
                Span::styled(
                    format!("{:.1}%", summary.accuracy),
                    Style::default()
                        .fg(accuracy_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({}/{} correct)", summary.correct, summary.answered),
                    muted,
                ),
            ]),
            Line::from(vec![
                Span::styled("  Points:     ", label),
                Span::styled(
                    format!("{:+}", summary.score_gained),
                    Style::default().fg(colors.accent()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Difficulty: ", label),
                Span::styled(summary.difficulty.as_str(), muted),
            ]),
            Line::from(vec![
                Span::styled("  Time:       ", label),
                Span::styled(format!("{:.1}s", summary.elapsed_secs()), muted),
            ]),
        ];
        Paragraph::new(lines).render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            "  [Enter] New session  [q] Menu",
            Style::default().fg(colors.accent()),
        )))
        .render(layout[2], buf);
    }
}

/// Shown once the last challenge level is cleared.
pub struct ChallengeCompletePanel<'a> {
    score: u32,
    max_level: u32,
    theme: &'a Theme,
}

impl<'a> ChallengeCompletePanel<'a> {
    pub fn new(score: u32, max_level: u32, theme: &'a Theme) -> Self {
        Self {
            score,
            max_level,
            theme,
        }
    }
}

impl Widget for ChallengeCompletePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Challenge Complete ")
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("All {} levels cleared", self.max_level),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final score ", Style::default().fg(colors.fg())),
                Span::styled(
                    self.score.to_string(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "[r] Play again  [q] Menu",
                Style::default().fg(colors.accent()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
