use log::{debug, warn};

use wordrill::config::Config;
use wordrill::data::VocabularyData;
use wordrill::engine::challenge::ChallengeState;
use wordrill::engine::error::{EngineError, Result as EngineResult};
use wordrill::engine::question::{Difficulty, Mode, Question};
use wordrill::session::{EngineSettings, EngineState, GradeReport, SessionSummary};

use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::theme::Theme;

pub const SETTINGS_COUNT: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Question,
    Feedback,
    SessionSummary,
    ChallengeComplete,
    Progress,
    Settings,
    LoadError,
}

pub struct App {
    pub screen: AppScreen,
    pub engine: EngineState,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu,
    pub selected_option: usize,
    pub last_report: Option<GradeReport>,
    pub last_summary: Option<SessionSummary>,
    pub load_error: Option<String>,
    pub notice: Option<String>,
    pub settings_selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme, data: EngineResult<VocabularyData>) -> Self {
        let mut engine = EngineState::new(EngineSettings::from(&config));
        let (screen, load_error) = match engine.load_data(data) {
            Ok(()) => (AppScreen::Menu, None),
            Err(e) => (AppScreen::LoadError, Some(e.to_string())),
        };

        Self {
            screen,
            engine,
            config,
            theme,
            menu: Menu::new(),
            selected_option: 0,
            last_report: None,
            last_summary: None,
            load_error,
            notice: None,
            settings_selected: 0,
            should_quit: false,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.engine.current()
    }

    pub fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::FillBlank => self.start_fill_blank(),
            MenuAction::Challenge => self.start_challenge(),
            MenuAction::Progress => self.go_to_progress(),
            MenuAction::Settings => self.go_to_settings(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    pub fn start_fill_blank(&mut self) {
        let mode = Mode::FillBlank(self.config.difficulty);
        let started = self.engine.start(mode).map(|_| ());
        self.after_new_question(started);
    }

    pub fn start_challenge(&mut self) {
        let started = self.engine.start(Mode::Challenge).map(|_| ());
        self.after_new_question(started);
    }

    pub fn restart_challenge(&mut self) {
        let restarted = self.engine.restart_challenge().map(|_| ());
        self.after_new_question(restarted);
    }

    fn after_new_question(&mut self, result: EngineResult<()>) {
        match result {
            Ok(()) => {
                self.selected_option = 0;
                self.last_report = None;
                self.notice = None;
                self.screen = AppScreen::Question;
            }
            Err(e) => self.show_error(e),
        }
    }

    /// Engine failures surface as a notice on the menu.
    fn show_error(&mut self, e: EngineError) {
        warn!("{e}");
        self.notice = Some(e.to_string());
        self.screen = AppScreen::Menu;
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.options.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_prev_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn select_option(&mut self, index: usize) {
        if index < self.option_count() {
            self.selected_option = index;
        }
    }

    pub fn submit_selected(&mut self) {
        let Some(answer) = self
            .current_question()
            .and_then(|q| q.options.get(self.selected_option))
            .cloned()
        else {
            return;
        };

        match self.engine.submit(&answer) {
            Ok(report) => {
                debug!(
                    "question {} answered {:?}, score {}",
                    report.question_id, report.outcome, report.score
                );
                if let Some(summary) = &report.session {
                    self.last_summary = Some(summary.clone());
                }
                self.last_report = Some(report);
                self.screen = AppScreen::Feedback;
            }
            Err(e) => self.show_error(e),
        }
    }

    /// Leave the feedback screen: to the session summary, the challenge
    /// finale, or the next question.
    pub fn continue_after_feedback(&mut self) {
        let Some(report) = &self.last_report else {
            self.go_to_menu();
            return;
        };

        if report.session.is_some() {
            self.screen = AppScreen::SessionSummary;
        } else if report.challenge == Some(ChallengeState::Completed) {
            self.screen = AppScreen::ChallengeComplete;
        } else {
            let next = self.engine.next_question().map(|_| ());
            self.after_new_question(next);
        }
    }

    pub fn cycle_difficulty(&mut self) {
        let next = self.engine.difficulty().next();
        self.config.difficulty = next;
        match self.engine.set_difficulty(next) {
            Ok(Some(_)) => self.selected_option = 0,
            Ok(None) => {}
            Err(e) => self.show_error(e),
        }
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.last_report = None;
    }

    pub fn go_to_progress(&mut self) {
        self.screen = AppScreen::Progress;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn save_settings(&mut self) {
        self.config.validate();
        if let Err(e) = self.config.save() {
            warn!("failed to save config: {e}");
            self.notice = Some(format!("Settings not saved: {e}"));
        }
    }

    /// Label/value pairs for the settings screen, in `settings_selected` order.
    pub fn settings_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Questions per Session",
                self.config.questions_per_session.to_string(),
            ),
            ("Difficulty", self.config.difficulty.to_string()),
            ("Challenge Levels", self.config.max_level.to_string()),
            ("First Word ID (next launch)", self.config.min_word_id.to_string()),
            ("Last Word ID (next launch)", self.config.max_word_id.to_string()),
            (
                "Auto-play Audio",
                if self.config.auto_play_audio { "on" } else { "off" }.to_string(),
            ),
            ("Theme", self.config.theme.clone()),
        ]
    }

    pub fn settings_cycle_forward(&mut self) {
        self.adjust_setting(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.adjust_setting(false);
    }

    fn adjust_setting(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                let count = if forward {
                    (self.config.questions_per_session + 5).min(100)
                } else {
                    self.config.questions_per_session.saturating_sub(5).max(5)
                };
                self.config.questions_per_session = count;
                self.engine.set_questions_per_session(count);
            }
            1 => {
                let idx = Difficulty::ALL
                    .iter()
                    .position(|d| *d == self.config.difficulty)
                    .unwrap_or(0);
                let len = Difficulty::ALL.len();
                let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
                self.config.difficulty = Difficulty::ALL[next];
            }
            2 => {
                let level = if forward {
                    (self.config.max_level + 1).min(100)
                } else {
                    self.config.max_level.saturating_sub(1).max(1)
                };
                self.config.max_level = level;
                self.engine.set_max_level(level);
            }
            3 => {
                self.config.min_word_id = if forward {
                    (self.config.min_word_id + 50).min(self.config.max_word_id)
                } else {
                    self.config.min_word_id.saturating_sub(50).max(1)
                };
            }
            4 => {
                self.config.max_word_id = if forward {
                    self.config.max_word_id.saturating_add(50)
                } else {
                    self.config
                        .max_word_id
                        .saturating_sub(50)
                        .max(self.config.min_word_id)
                };
            }
            5 => self.config.auto_play_audio = !self.config.auto_play_audio,
            6 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = if forward {
                        (idx + 1) % themes.len()
                    } else if idx == 0 {
                        themes.len() - 1
                    } else {
                        idx - 1
                    };
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                if let Some(new_theme) = Theme::load(&self.config.theme) {
                    self.theme = Box::leak(Box::new(new_theme));
                }
            }
            _ => {}
        }
    }
}
