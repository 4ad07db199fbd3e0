mod app;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use wordrill::config::Config;
use wordrill::data::loader::{self, DataSource};
use wordrill::data::simplify::{self, DEFAULT_KEEP};
use wordrill::engine::question::{Difficulty, Mode};
use wordrill::logging;

use app::{App, AppScreen, SETTINGS_COUNT};
use event::{AppEvent, EventHandler, TICK_RATE};
use ui::components::feedback::FeedbackPanel;
use ui::components::menu::Menu;
use ui::components::progress_bar::ProgressBar;
use ui::components::progress_panel::ProgressPanel;
use ui::components::question_card::QuestionCard;
use ui::components::summary::{ChallengeCompletePanel, SessionSummaryPanel};
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "wordrill", version, about = "Vocabulary drills in the terminal")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory holding the vocabulary JSON files")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Base URL to download the vocabulary files from")]
    url: Option<String>,

    #[arg(long, help = "Use the small bundled sample vocabulary")]
    sample: bool,

    #[arg(short, long, help = "Fill-in-the-blank difficulty (easy, medium, hard)")]
    difficulty: Option<Difficulty>,

    #[arg(long, help = "Log level (off, error, warn, info, debug, trace)")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Keep the most frequent words and write the *_simple.json data files
    Simplify {
        #[arg(long, help = "Directory with the full data files (default: data_dir)")]
        input: Option<PathBuf>,

        #[arg(long, help = "Directory for the simplified files (default: input)")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_KEEP, help = "Number of words to keep")]
        keep: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
        config.data_url = None;
    }
    if let Some(url) = cli.url {
        config.data_url = Some(url);
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    if let Err(e) = logging::init(&config.log_level, &logging::default_log_path()) {
        eprintln!("wordrill: logging disabled: {e}");
    }
    if let Some(e) = config_error {
        warn!("config could not be read, using defaults: {e}");
    }

    if let Some(Command::Simplify {
        input,
        output,
        keep,
    }) = cli.command
    {
        return run_simplify(&config, input, output, keep);
    }

    let source = if cli.sample {
        DataSource::Bundled
    } else {
        config.data_source()
    };
    let data = loader::load(&source, &config.data_files(), Some(config.word_id_range()));

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!("unknown theme '{}', using default", config.theme);
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let mut app = App::new(config, theme, data);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_simplify(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    keep: usize,
) -> Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(&config.data_dir));
    let output = output.unwrap_or_else(|| input.clone());

    let (report, written) = simplify::run(&input, &output, &config.data_files(), keep)?;
    info!("simplify finished: {report:?}");

    println!(
        "Read {} words and {} examples ({} words have examples)",
        report.words_in, report.examples_in, report.words_with_examples
    );
    println!(
        "Kept {} words and {} examples",
        report.words_kept, report.examples_kept
    );
    println!(
        "Wrote {} ({} bytes)",
        written.vocabulary.display(),
        written.vocabulary_bytes
    );
    println!(
        "Wrote {} ({} bytes)",
        written.examples.display(),
        written.examples_bytes
    );
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Question => handle_question_key(app, key),
        AppScreen::Feedback => handle_feedback_key(app, key),
        AppScreen::SessionSummary => handle_summary_key(app, key),
        AppScreen::ChallengeComplete => handle_challenge_complete_key(app, key),
        AppScreen::Progress => handle_progress_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
        AppScreen::LoadError => handle_load_error_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.run_menu_action(app.menu.selected_action()),
        KeyCode::Char(ch) => {
            if let Some(action) = Menu::action_for_key(ch) {
                app.run_menu_action(action);
            }
        }
        _ => {}
    }
}

fn handle_question_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_selected(),
        KeyCode::Char('d') => app.cycle_difficulty(),
        KeyCode::Char(ch @ '1'..='9') => {
            if let Some(index) = ch.to_digit(10) {
                app.select_option(index as usize - 1);
            }
        }
        _ => {}
    }
}

fn handle_feedback_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => app.continue_after_feedback(),
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') => app.start_fill_blank(),
        KeyCode::Char('p') => app.go_to_progress(),
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_challenge_complete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.restart_challenge(),
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_progress_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
        app.go_to_menu();
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.save_settings();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_COUNT {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn handle_load_error_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
        app.should_quit = true;
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Question => render_question(frame, app),
        AppScreen::Feedback => render_feedback(frame, app),
        AppScreen::SessionSummary => render_summary(frame, app),
        AppScreen::ChallengeComplete => render_challenge_complete(frame, app),
        AppScreen::Progress => render_progress(frame, app),
        AppScreen::Settings => render_settings(frame, app),
        AppScreen::LoadError => render_load_error(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, title: &str, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn mode_title(mode: Mode) -> String {
    match mode {
        Mode::FillBlank(difficulty) => format!("Fill in the Blank ({difficulty})"),
        Mode::Challenge => "Challenge".to_string(),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let snapshot = app.engine.snapshot();
    let header_info = format!(
        "| Score {} | {} mastered | {} learning | {} words",
        snapshot.score,
        snapshot.mastered,
        snapshot.learning,
        snapshot.total()
    );
    render_header(frame, app, layout[0], "wordrill", &header_info);

    let menu_area = centered_rect(50, 80, layout[1]);
    frame.render_widget(
        app.menu.widget(app.theme, app.notice.as_deref()),
        menu_area,
    );

    render_footer(
        frame,
        app,
        layout[2],
        &["[1] Fill blank", "[2] Challenge", "[p] Progress", "[c] Settings", "[q] Quit"],
    );
}

fn render_question(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let Some(question) = app.current_question() else {
        return;
    };

    let app_layout = AppLayout::new(area);
    let mode = app.engine.mode();
    let snapshot = app.engine.snapshot();

    let info = match mode {
        Mode::FillBlank(_) => format!(
            "| Question {}/{} | Score {}",
            app.engine.session().answered + 1,
            app.engine.questions_per_session(),
            snapshot.score
        ),
        Mode::Challenge => {
            let challenge = app.engine.challenge();
            format!(
                "| Level {}/{} | Score {}",
                challenge.level(),
                challenge.max_level(),
                snapshot.score
            )
        }
    };
    render_header(frame, app, app_layout.header, &mode_title(mode), &info);

    let main_layout = match mode {
        Mode::Challenge => Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(app_layout.main),
        Mode::FillBlank(_) => Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8)])
            .split(app_layout.main),
    };

    let card = QuestionCard::new(question, app.selected_option, app.theme)
        .title("Choose the missing word");
    frame.render_widget(card, main_layout[0]);

    if mode == Mode::Challenge {
        let challenge = app.engine.challenge();
        let bar = ProgressBar::new("Level", challenge.progress(), app.theme).text(format!(
            "{}/{}",
            challenge.level(),
            challenge.max_level()
        ));
        frame.render_widget(bar, main_layout[1]);
    }

    if let Some(sidebar) = app_layout.sidebar {
        frame.render_widget(ProgressPanel::sidebar(snapshot, app.theme), sidebar);
    }

    let hints: &[&str] = match mode {
        Mode::FillBlank(_) => &[
            "[1-4] Pick",
            "[Up/Down] Move",
            "[Enter] Check",
            "[d] Difficulty",
            "[Esc] Menu",
        ],
        Mode::Challenge => &["[1-4] Pick", "[Up/Down] Move", "[Enter] Check", "[Esc] Menu"],
    };
    render_footer(frame, app, app_layout.footer, hints);
}

fn render_feedback(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let Some(report) = app.last_report.as_ref() else {
        return;
    };

    let app_layout = AppLayout::new(area);
    let snapshot = app.engine.snapshot();
    let info = format!("| Score {}", report.score);
    render_header(frame, app, app_layout.header, &mode_title(app.engine.mode()), &info);

    frame.render_widget(FeedbackPanel::new(report, app.theme), app_layout.main);

    if let Some(sidebar) = app_layout.sidebar {
        frame.render_widget(ProgressPanel::sidebar(snapshot, app.theme), sidebar);
    }

    render_footer(
        frame,
        app,
        app_layout.footer,
        &["[Enter] Continue", "[Esc] Menu"],
    );
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    if let Some(summary) = app.last_summary.as_ref() {
        let centered = centered_rect(60, 60, area);
        frame.render_widget(SessionSummaryPanel::new(summary, app.theme), centered);
    }
}

fn render_challenge_complete(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let centered = centered_rect(50, 40, area);
    let panel = ChallengeCompletePanel::new(
        app.engine.tracker().score(),
        app.engine.challenge().max_level(),
        app.theme,
    );
    frame.render_widget(panel, centered);
}

fn render_progress(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, layout[0], "Progress", "");
    let centered = centered_rect(70, 90, layout[1]);
    frame.render_widget(ProgressPanel::new(app.engine.snapshot(), app.theme), centered);
    render_footer(frame, app, layout[2], &["[Esc] Back"]);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields = app.settings_fields();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        "  Up/Down to move, Left/Right to change, Esc to save",
        Style::default().fg(colors.muted()),
    )))
    .render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(2)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = if is_selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let value_style = Style::default().fg(if is_selected {
            colors.blank()
        } else {
            colors.muted()
        });

        let line = Line::from(vec![
            Span::styled(format!("{indicator}{label}: "), label_style),
            Span::styled(format!("< {value} >"), value_style),
        ]);
        Paragraph::new(line).render(field_layout[i], frame.buffer_mut());
    }

    Paragraph::new(Line::from(Span::styled(
        "  [Esc] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )))
    .render(layout[3], frame.buffer_mut());
}

fn render_load_error(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let centered = centered_rect(60, 40, area);

    let block = Block::bordered()
        .title(" Vocabulary Unavailable ")
        .border_style(Style::default().fg(colors.error()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let message = app.load_error.as_deref().unwrap_or("unknown error");
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(colors.error()))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Data directory: {}", app.config.data_dir),
            Style::default().fg(colors.muted()),
        )),
        Line::from(Span::styled(
            "Pass --data-dir or --url, or --sample for the bundled words.",
            Style::default().fg(colors.muted()),
        )),
        Line::from(""),
        Line::from(Span::styled("[q] Quit", Style::default().fg(colors.accent()))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, frame.buffer_mut());
}
