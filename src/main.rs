mod app;
mod config;
mod corpus;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use store::json_store::default_data_dir;
use store::schema::Outcome;
use ui::components::card::Card;
use ui::components::confirm_dialog::ConfirmDialog;
use ui::components::history_list::HistoryList;
use ui::components::menu::RangeMenu;
use ui::components::pass_sidebar::PassSidebar;
use ui::components::progress_bar::PassProgress;
use ui::components::result_summary::ResultSummary;
use ui::layout::{AppLayout, pack_hint_lines, shifted_rect};

const LOG_FILE: &str = "karuta.log";
const RESET_PROMPT: &str = "Delete all grading history? (y/n)";

#[derive(Parser)]
#[command(name = "karuta", version, about = "Terminal flashcard trainer for the Hyakunin Isshu")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(
        short,
        long,
        help = "Drill mode",
        value_parser = ["kimariji", "verse", "meaning"]
    )]
    mode: Option<String>,

    #[arg(long, help = "Directory holding history.json and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Poem corpus JSON file to use instead of the bundled one")]
    corpus: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (saved, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    // Flags apply to this run only; `saved` is what gets written back.
    let mut config = saved.clone();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(mode) = cli.mode {
        config.drill_mode = mode;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir.to_string_lossy().into_owned());
    }
    if let Some(path) = cli.corpus {
        config.corpus_path = Some(path.to_string_lossy().into_owned());
    }
    config.validate();

    let data_dir = config
        .data_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir);
    init_logging(&data_dir);
    if let Some(e) = config_error {
        log::warn!("ignoring unreadable config file: {e:#}");
    }

    let mut app = App::new(config, saved)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("exiting after error: {err:#}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file because the terminal belongs to the UI. Without a
/// writable data directory nothing is logged.
fn init_logging(data_dir: &Path) {
    let file = fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))
    });
    if let Ok(file) = file {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
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
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.status = None;

    // Confirmation dialog takes priority
    if app.confirm_reset {
        match key.code {
            KeyCode::Char('y') => app.confirm_reset(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_reset(),
            _ => {}
        }
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Card => handle_card_key(app, key),
        AppScreen::Result => handle_result_key(app, key),
        AppScreen::HistoryList => handle_history_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char(' ') => app.start_selected_range(),
        KeyCode::Right | KeyCode::Char('l') => app.menu.next(),
        KeyCode::Left | KeyCode::Char('h') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.down(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.up(),
        KeyCode::Tab | KeyCode::Char('m') => app.cycle_mode(true),
        KeyCode::BackTab => app.cycle_mode(false),
        KeyCode::Char('s') => app.toggle_shuffle(),
        KeyCode::Char('w') => app.start_weak_review(),
        KeyCode::Char('v') => app.go_to_history(),
        KeyCode::Char('x') => app.request_reset(),
        _ => {}
    }
}

fn handle_card_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char(' ') | KeyCode::Enter => app.flip(),
        KeyCode::Right | KeyCode::Char('l') => app.grade(Outcome::Know),
        KeyCode::Left | KeyCode::Char('h') => app.grade(Outcome::DontKnow),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('m') => app.review_missed(),
        KeyCode::Char('r') => app.restart_same_pass(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('j') | KeyCode::Down => app.history_next(),
        KeyCode::Char('k') | KeyCode::Up => app.history_prev(),
        KeyCode::PageDown => app.history_jump(10),
        KeyCode::PageUp => app.history_jump(-10),
        KeyCode::Home | KeyCode::Char('g') => app.history_selected = 0,
        KeyCode::End | KeyCode::Char('G') => app.history_jump(isize::MAX),
        KeyCode::Char('x') | KeyCode::Delete => app.request_reset(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.press_swipe(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.drag_swipe(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => app.release_swipe(mouse.column),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Card => render_card(frame, app),
        AppScreen::Result => render_result(frame, app),
        AppScreen::HistoryList => render_history(frame, app),
    }

    if app.confirm_reset {
        frame.render_widget(ConfirmDialog::new(RESET_PROMPT, app.theme), area);
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, title: &str, info: &str, area: Rect) {
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
            info.to_string(),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str], area: Rect) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let hints = [
        "[Enter] Start",
        "[arrows/hjkl] Select",
        "[m] Mode",
        "[s] Shuffle",
        "[w] Weak",
        "[v] History",
        "[x] Reset",
        "[q] Quit",
    ];
    let footer_lines = pack_hint_lines(&hints, area.width as usize).len().max(1) as u16;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(footer_lines),
        ])
        .split(area);

    let mut info = format!(
        " {}/{} poems known | {} gradings",
        app.known_total(),
        app.corpus.len(),
        app.history.len()
    );
    if let Some(ref status) = app.status {
        info.push_str(&format!(" | {status}"));
    }
    render_header(frame, app, "karuta", &info, layout[0]);

    let entries = app.range_entries();
    let weak_count = app.weak_ids().len();
    let menu_area = ui::layout::centered_rect(70, 85, layout[1]);
    let menu = RangeMenu::new(
        &entries,
        &app.menu,
        app.drill_mode,
        app.config.shuffle,
        weak_count,
        app.theme,
    );
    frame.render_widget(menu, menu_area);

    render_footer(frame, app, &hints, layout[2]);
}

fn render_card(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let (Some(pass), Some(face)) = (app.session.active(), app.current_face()) else {
        return;
    };

    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;

    let info = format!(
        " {} | {}/{}",
        app.drill_mode.label(),
        pass.cursor + 1,
        pass.subset.len()
    );
    render_header(frame, app, &pass.source.label(), &info, app_layout.header);

    let show_progress = tier.show_progress_bar(area.height);
    let mut constraints = vec![Constraint::Min(6)];
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let stage = main_layout[0];
    let card_width = stage.width.saturating_sub(4).min(72);
    let card_height = stage.height.saturating_sub(2).min(16);
    let resting = Rect::new(
        stage.x + (stage.width - card_width) / 2,
        stage.y + (stage.height - card_height) / 2,
        card_width,
        card_height,
    );
    let card_area = shifted_rect(resting, app.swipe.offset(), stage);
    app.card_area.set(Some(card_area));
    let card = Card::new(face, pass.revealed, app.swipe.pending(), app.theme);
    frame.render_widget(card, card_area);

    if show_progress {
        let progress = PassProgress::new("Progress", pass.cursor, pass.subset.len(), app.theme);
        frame.render_widget(progress, main_layout[1]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let poem_id = pass.current();
        let author = app.corpus.get(poem_id).map_or("", |p| p.author.as_str());
        let poem_stats = engine::stats::poem_stats(app.history.events(), poem_id);
        let sidebar = PassSidebar::new(pass, poem_stats, pass.revealed.then_some(author), app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    render_footer(
        frame,
        app,
        &[
            "[Space] Flip",
            "[→/l] Know",
            "[←/h] Don't know",
            "drag card to grade",
            "[Esc] Menu",
        ],
        app_layout.footer,
    );
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(result) = app.session.result() {
        let centered = ui::layout::centered_rect(60, 70, area);
        let summary = ResultSummary::new(result, &app.corpus, app.theme);
        frame.render_widget(summary, centered);
    }
}

fn render_history(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let rows = engine::stats::poem_table(app.history.events(), &app.corpus);
    let list = HistoryList::new(&rows, app.history_selected, app.history.len(), app.theme)
        .status(app.status.as_deref());
    frame.render_widget(list, area);
}
