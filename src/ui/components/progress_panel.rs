use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Paragraph, Widget};

use wordrill::engine::mastery::{MasterySnapshot, MasteryState};

use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Word counts per mastery state, score, and answer tallies.
pub struct ProgressPanel<'a> {
    snapshot: MasterySnapshot,
    title: &'a str,
    show_chart: bool,
    theme: &'a Theme,
}

impl<'a> ProgressPanel<'a> {
    pub fn new(snapshot: MasterySnapshot, theme: &'a Theme) -> Self {
        Self {
            snapshot,
            title: " Progress ",
            show_chart: true,
            theme,
        }
    }

    /// Bars only, for the sidebar next to a question.
    pub fn sidebar(snapshot: MasterySnapshot, theme: &'a Theme) -> Self {
        Self {
            snapshot,
            title: " Mastery ",
            show_chart: false,
            theme,
        }
    }

    fn state_color(&self, state: MasteryState) -> Color {
        let colors = &self.theme.colors;
        match state {
            MasteryState::Mastered => colors.mastered(),
            MasteryState::Learning => colors.learning(),
            MasteryState::Unmastered => colors.unmastered(),
        }
    }

    fn count(&self, state: MasteryState) -> usize {
        match state {
            MasteryState::Mastered => self.snapshot.mastered,
            MasteryState::Learning => self.snapshot.learning,
            MasteryState::Unmastered => self.snapshot.unmastered,
        }
    }
}

const DISPLAY_ORDER: [MasteryState; 3] = [
    MasteryState::Mastered,
    MasteryState::Learning,
    MasteryState::Unmastered,
];

impl Widget for ProgressPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(DISPLAY_ORDER.iter().map(|_| Constraint::Length(3)));
        if self.show_chart {
            constraints.push(Constraint::Min(6));
        } else {
            constraints.push(Constraint::Min(0));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let header = Line::from(vec![
            Span::styled(
                format!(" {} words", self.snapshot.total()),
                Style::default().fg(colors.fg()),
            ),
            Span::styled("  score ", Style::default().fg(colors.muted())),
            Span::styled(
                self.snapshot.score.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(header).render(layout[0], buf);

        for (i, state) in DISPLAY_ORDER.iter().enumerate() {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
                .split(layout[i + 1]);
            let count = self.count(*state);
            let ratio = self.snapshot.ratio(*state);

            Paragraph::new(Line::from(Span::styled(
                format!(" {}", state.label()),
                Style::default().fg(self.state_color(*state)),
            )))
            .render(rows[0], buf);

            let bar_area = Rect {
                x: rows[1].x + 1,
                width: rows[1].width.saturating_sub(2),
                ..rows[1]
            };
            ProgressBar::new(state.label(), ratio, self.theme)
                .text(format!("{count} ({:.0}%)", ratio * 100.0))
                .fill(self.state_color(*state))
                .compact()
                .render(bar_area, buf);
        }

        if self.show_chart {
            let correct = u64::from(self.snapshot.correct_answers);
            let incorrect = u64::from(self.snapshot.incorrect_answers);
            BarChart::default()
                .block(
                    Block::bordered()
                        .title(" Answers ")
                        .border_style(Style::default().fg(colors.border())),
                )
                .data(&[("Correct", correct), ("Wrong", incorrect)])
                .bar_width(9)
                .bar_gap(3)
                .bar_style(Style::default().fg(colors.accent()))
                .value_style(Style::default().fg(colors.bg()).bg(colors.accent()))
                .label_style(Style::default().fg(colors.muted()))
                .render(layout[DISPLAY_ORDER.len() + 1], buf);
        }
    }
}
