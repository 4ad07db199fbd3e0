use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    FillBlank,
    Challenge,
    Progress,
    Settings,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

static ITEMS: [MenuItem; 5] = [
    MenuItem {
        key: '1',
        label: "Fill in the Blank",
        description: "Pick the word missing from an example sentence",
        action: MenuAction::FillBlank,
    },
    MenuItem {
        key: '2',
        label: "Challenge",
        description: "Climb the levels with words from the whole list",
        action: MenuAction::Challenge,
    },
    MenuItem {
        key: 'p',
        label: "Progress",
        description: "Mastered, learning and unmastered words",
        action: MenuAction::Progress,
    },
    MenuItem {
        key: 'c',
        label: "Settings",
        description: "Session length, word range, difficulty",
        action: MenuAction::Settings,
    },
    MenuItem {
        key: 'q',
        label: "Quit",
        description: "Leave wordrill",
        action: MenuAction::Quit,
    },
];

pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        &ITEMS
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % ITEMS.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = ITEMS.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        ITEMS[self.selected].action
    }

    pub fn action_for_key(key: char) -> Option<MenuAction> {
        ITEMS.iter().find(|item| item.key == key).map(|item| item.action)
    }

    pub fn widget<'a>(&'a self, theme: &'a Theme, notice: Option<&'a str>) -> MenuView<'a> {
        MenuView {
            menu: self,
            theme,
            notice,
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MenuView<'a> {
    menu: &'a Menu,
    theme: &'a Theme,
    notice: Option<&'a str>,
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "wordrill",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Vocabulary Drills",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let items = self.menu.items();
        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(items.iter().map(|_| Constraint::Length(2)).collect::<Vec<_>>())
            .split(layout[2]);

        for (i, item) in items.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };
            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, item.label),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.muted()),
                )),
            ];
            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }

        if let Some(notice) = self.notice {
            Paragraph::new(Line::from(Span::styled(
                notice,
                Style::default().fg(colors.warning()),
            )))
            .alignment(Alignment::Center)
            .render(layout[3], buf);
        }
    }
}
