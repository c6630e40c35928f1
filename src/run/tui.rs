use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use crate::client::AnalysisClient;
use crate::ui::app::{App, InputMode, Outcome, Request, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long to wait for a key before re-checking the outcome channel.
const POLL_INTERVAL: Duration = Duration::from_millis(120);

pub(crate) fn as_tui(client: AnalysisClient) -> Result<()> {
    let mut app = App::new(client.base_url().to_string());
    app.refresh_file_browser();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &client);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &AnalysisClient,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<Outcome>();

    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(5) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        // Completed worker requests land here, one outcome per request.
        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }

        if let Some(request) = app.take_queued() {
            spawn_request(client, request, tx.clone());
        }

        // Poll rather than block so outcomes surface while the user is idle.
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
            }
        }
    }
    Ok(())
}

/// Run one request on a worker thread, posting the outcome back over `tx`.
/// The render loop keeps running while the request is outstanding.
fn spawn_request(client: &AnalysisClient, request: Request, tx: Sender<Outcome>) {
    let client = client.clone();
    thread::spawn(move || {
        let outcome = match request {
            Request::Analyze(path) => Outcome::Analysis(client.analyze(&path)),
            Request::ProbeTransaction => Outcome::Probe(client.probe_transaction()),
            Request::RecentAnomalies => Outcome::Probe(client.recent_anomalies()),
        };
        // The receiver only goes away on shutdown; a late outcome is dropped.
        let _ = tx.send(outcome);
    });
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, Screen::Upload),
        KeyCode::Char('3') => switch_screen(app, Screen::Probe),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Enter if app.screen == Screen::Upload => {
            app.select_browser_entry();
        }
        KeyCode::Backspace if app.screen == Screen::Upload => {
            if let Some(parent) = app.file_browser_path.parent().map(|p| p.to_path_buf()) {
                app.file_browser_path = parent;
                app.refresh_file_browser();
            }
        }
        KeyCode::Char('.') if app.screen == Screen::Upload => {
            app.file_browser_show_hidden = !app.file_browser_show_hidden;
            app.refresh_file_browser();
        }
        KeyCode::Char('u') if app.screen == Screen::Upload => {
            app.request_upload();
        }
        KeyCode::Char('t') if app.screen == Screen::Probe => {
            app.request_probe_transaction();
        }
        KeyCode::Char('a') if app.screen == Screen::Probe => {
            app.request_recent_anomalies();
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    if screen == Screen::Upload {
        app.refresh_file_browser();
    }
    app.set_status(format!("{screen}"));
}

fn table_len(app: &App) -> usize {
    app.result.as_ref().map(|r| r.preview().len()).unwrap_or(0)
}

fn probe_lines(app: &App) -> usize {
    use crate::ui::app::ProbeDisplay;
    match &app.probe {
        Some(ProbeDisplay::Response(text)) | Some(ProbeDisplay::Failure(text)) => {
            text.lines().count()
        }
        None => 0,
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Upload => {
            scroll_down(
                &mut app.file_browser_index,
                &mut app.file_browser_scroll,
                app.file_browser_entries.len(),
                app.visible_rows,
            );
        }
        Screen::Dashboard => {
            if app.table_scroll + 1 < table_len(app) {
                app.table_scroll += 1;
            }
        }
        Screen::Probe => {
            if app.probe_scroll + 1 < probe_lines(app) {
                app.probe_scroll += 1;
            }
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Upload => {
            scroll_up(&mut app.file_browser_index, &mut app.file_browser_scroll);
        }
        Screen::Dashboard => {
            app.table_scroll = app.table_scroll.saturating_sub(1);
        }
        Screen::Probe => {
            app.probe_scroll = app.probe_scroll.saturating_sub(1);
        }
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Upload => {
            scroll_to_top(&mut app.file_browser_index, &mut app.file_browser_scroll);
        }
        Screen::Dashboard => app.table_scroll = 0,
        Screen::Probe => app.probe_scroll = 0,
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Upload => {
            scroll_to_bottom(
                &mut app.file_browser_index,
                &mut app.file_browser_scroll,
                app.file_browser_entries.len(),
                app.visible_rows,
            );
        }
        Screen::Dashboard => {
            app.table_scroll = table_len(app).saturating_sub(1);
        }
        Screen::Probe => {
            app.probe_scroll = probe_lines(app).saturating_sub(1);
        }
    }
}
