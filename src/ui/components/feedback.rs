use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use wordrill::engine::challenge::ChallengeState;
use wordrill::engine::mastery::MasteryState;
use wordrill::session::GradeReport;

use crate::ui::theme::Theme;

/// Verdict for one answer plus the word card the learner should review.
pub struct FeedbackPanel<'a> {
    report: &'a GradeReport,
    theme: &'a Theme,
}

impl<'a> FeedbackPanel<'a> {
    pub fn new(report: &'a GradeReport, theme: &'a Theme) -> Self {
        Self { report, theme }
    }

    fn verdict(&self) -> (&'static str, Color) {
        let colors = &self.theme.colors;
        if self.report.is_correct() {
            ("Correct!", colors.success())
        } else {
            ("Not quite.", colors.error())
        }
    }

    fn mastery_color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.report.mastery {
            MasteryState::Mastered => colors.mastered(),
            MasteryState::Learning => colors.learning(),
            MasteryState::Unmastered => colors.unmastered(),
        }
    }
}

fn signed(delta: i64) -> String {
    if delta >= 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

impl Widget for FeedbackPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let report = self.report;
        let (verdict, verdict_color) = self.verdict();

        let block = Block::bordered()
            .title(" Result ")
            .border_style(Style::default().fg(verdict_color))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label = Style::default().fg(colors.muted());
        let value = Style::default().fg(colors.fg());

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("  {verdict}"),
                    Style::default()
                        .fg(verdict_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   {} points (score {})", signed(report.score_delta), report.score),
                    label,
                ),
            ]),
            Line::from(""),
        ];

        if !report.is_correct() {
            lines.push(Line::from(vec![
                Span::styled("  You chose:  ", label),
                Span::styled(report.submitted.as_str(), Style::default().fg(colors.error())),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("  Answer:     ", label),
            Span::styled(
                report.correct_answer.as_str(),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Meaning:    ", label),
            Span::styled(report.word.paraphrase.as_str(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Status:     ", label),
            Span::styled(report.mastery.label(), Style::default().fg(self.mastery_color())),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", report.example.text),
            value,
        )));
        if !report.example.translation.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", report.example.translation),
                label,
            )));
        }

        match report.challenge {
            Some(ChallengeState::Completed) => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "  Challenge complete!",
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )));
            }
            Some(ChallengeState::Level(level)) if report.is_correct() => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  Up to level {level}"),
                    Style::default().fg(colors.accent()),
                )));
            }
            _ => {}
        }

        if report.session.is_some() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Session finished, press Enter for the summary",
                Style::default().fg(colors.accent()),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_delta() {
        assert_eq!(signed(10), "+10");
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(-5), "-5");
    }
}
