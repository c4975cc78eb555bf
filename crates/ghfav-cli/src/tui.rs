//! Interactive terminal view
//!
//! Renders the shared snapshot and turns key presses into controller
//! commands. The controller runs on its own thread; this loop never
//! touches the favorites directly.

use std::io;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::*;

use ghfav::app::{AppCommand, AppController, AppSnapshot, FavoritesSession, Notice};
use ghfav::config::ui::TICK_MS;
use ghfav::data::{FavoritesStore, Settings};
use ghfav::lookup::GithubLookup;

use crate::commands::detail_lines;

/// Local view state that never leaves the UI thread
struct View {
    /// Text typed into the login field
    draft: String,
    /// Submits sent to the controller
    sent_submits: u64,
    /// Submit whose outcome the draft is waiting on
    awaiting: Option<u64>,
    /// Highlighted row in the list
    cursor: usize,
    /// Login waiting for a second Delete when removal needs confirming
    pending_remove: Option<String>,
    confirm_remove: bool,
    running: bool,
}

impl View {
    fn new(confirm_remove: bool) -> Self {
        Self {
            draft: String::new(),
            sent_submits: 0,
            awaiting: None,
            cursor: 0,
            pending_remove: None,
            confirm_remove,
            running: true,
        }
    }

    /// Follow the controller once it has handled our submit
    ///
    /// The draft stays on screen until the lookup settles, then takes the
    /// controller's input (which the session clears).
    fn sync(&mut self, snapshot: &AppSnapshot) {
        if let Some(n) = self.awaiting {
            if snapshot.submits >= n && !snapshot.loading {
                self.draft = snapshot.input.clone();
                self.awaiting = None;
            }
        }
    }

    fn is_searching(&self, snapshot: &AppSnapshot) -> bool {
        snapshot.loading || self.awaiting.is_some()
    }
}

/// Puts the terminal into raw mode and the alternate screen, and undoes
/// both on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Controller thread that is shut down and joined on drop
struct ControllerThread {
    cmd_tx: Sender<AppCommand>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for ControllerThread {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(AppCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn run(
    store: FavoritesStore,
    lookup: GithubLookup,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let (cmd_tx, cmd_rx) = unbounded();
    let shared_state = Arc::new(Mutex::new(AppSnapshot::default()));

    let mut controller = AppController::new(
        cmd_rx,
        cmd_tx.clone(),
        shared_state.clone(),
        FavoritesSession::new(store),
        Arc::new(lookup),
    );
    let handle = std::thread::Builder::new()
        .name("controller".into())
        .spawn(move || controller.run())?;
    // Dropped last: the terminal is restored before waiting on the controller
    let _controller = ControllerThread {
        cmd_tx: cmd_tx.clone(),
        handle: Some(handle),
    };

    let _terminal_guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut view = View::new(settings.confirm_remove);
    event_loop(&mut terminal, &mut view, &cmd_tx, &shared_state)
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &mut View,
    cmd_tx: &Sender<AppCommand>,
    shared_state: &Arc<Mutex<AppSnapshot>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(TICK_MS);

    while view.running {
        let snapshot = shared_state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        view.cursor = view.cursor.min(snapshot.users.len().saturating_sub(1));
        view.sync(&snapshot);

        terminal.draw(|f| draw_ui(f, view, &snapshot))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, view, &snapshot, cmd_tx);
                }
            }
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, view: &mut View, snapshot: &AppSnapshot, cmd_tx: &Sender<AppCommand>) {
    let send = |cmd| {
        let _ = cmd_tx.send(cmd);
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        view.running = false;
        return;
    }

    // A notice swallows the next key
    if snapshot.has_notice() {
        send(AppCommand::DismissNotice);
        return;
    }

    // Detail view
    if let Some(user) = &snapshot.selected {
        match key.code {
            KeyCode::Esc | KeyCode::Left | KeyCode::Backspace | KeyCode::Char('q') => {
                send(AppCommand::Close)
            }
            KeyCode::Delete => send(AppCommand::Remove(user.clone())),
            _ => {}
        }
        return;
    }

    if key.code != KeyCode::Delete {
        view.pending_remove = None;
    }

    // The login field is frozen while a lookup is in flight
    let editable = !view.is_searching(snapshot);

    match key.code {
        KeyCode::Char(c) if editable => view.draft.push(c),
        KeyCode::Backspace if editable => {
            view.draft.pop();
        }
        KeyCode::Enter if editable => {
            if !view.draft.trim().is_empty() {
                send(AppCommand::SetInput(view.draft.clone()));
                send(AppCommand::Submit);
                view.sent_submits += 1;
                view.awaiting = Some(view.sent_submits);
            }
        }
        KeyCode::Up => view.cursor = view.cursor.saturating_sub(1),
        KeyCode::Down => {
            if view.cursor + 1 < snapshot.users.len() {
                view.cursor += 1;
            }
        }
        KeyCode::Right | KeyCode::Tab => {
            if let Some(user) = snapshot.users.get(view.cursor) {
                send(AppCommand::Open(user.login.clone()));
            }
        }
        KeyCode::Delete => {
            if let Some(user) = snapshot.users.get(view.cursor) {
                let confirmed = view.pending_remove.as_deref() == Some(user.login.as_str());
                if view.confirm_remove && !confirmed {
                    view.pending_remove = Some(user.login.clone());
                } else {
                    view.pending_remove = None;
                    send(AppCommand::Remove(user.clone()));
                }
            }
        }
        KeyCode::Esc if editable => {
            if view.draft.is_empty() {
                view.running = false;
            } else {
                view.draft.clear();
            }
        }
        _ => {}
    }
}

fn draw_ui(f: &mut Frame, view: &View, snapshot: &AppSnapshot) {
    let area = f.area();

    let outer = Block::default()
        .title(format!(" GitHub Users v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // input
        Constraint::Min(3),    // list or detail
        Constraint::Length(1), // help bar
    ])
    .split(inner);

    draw_input(f, view, snapshot, chunks[0]);
    match &snapshot.selected {
        Some(user) => draw_detail(f, &detail_lines(user), chunks[1]),
        None => draw_list(f, view, snapshot, chunks[1]),
    }
    draw_help(f, view, snapshot, chunks[2]);

    if let Some(notice) = snapshot.notice() {
        draw_notice(f, notice, area);
    }
}

fn draw_input(f: &mut Frame, view: &View, snapshot: &AppSnapshot, area: Rect) {
    let (title, color) = if view.is_searching(snapshot) {
        (" Searching... ", Color::Yellow)
    } else {
        (" Add user ", Color::DarkGray)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let text = if view.draft.is_empty() {
        Line::from(Span::styled("GitHub login", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::styled(view.draft.as_str(), Style::default().fg(Color::White)))
    };
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_list(f: &mut Frame, view: &View, snapshot: &AppSnapshot, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", snapshot.status_text))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem> = snapshot
        .users
        .iter()
        .map(|user| {
            let mut spans = vec![
                Span::styled(user.display_name().to_string(), Style::default().fg(Color::White).bold()),
                Span::styled(format!("  @{}", user.login), Style::default().fg(Color::Cyan)),
            ];
            if view.pending_remove.as_deref() == Some(user.login.as_str()) {
                spans.push(Span::styled(
                    "  press Del again to remove",
                    Style::default().fg(Color::Red),
                ));
            }
            let bio = user.bio.lines().next().unwrap_or("").trim().to_string();
            ListItem::new(vec![
                Line::from(spans),
                Line::from(Span::styled(format!("  {bio}"), Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(0x71, 0x59, 0xc1)))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !snapshot.users.is_empty() {
        state.select(Some(view.cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(f: &mut Frame, lines: &[String], area: Rect) {
    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(0x71, 0x59, 0xc1)));

    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_help(f: &mut Frame, view: &View, snapshot: &AppSnapshot, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let help = if snapshot.selected.is_some() {
        Line::from(vec![
            key("  Esc "),
            Span::raw("back  |  "),
            key("Del "),
            Span::raw("remove"),
        ])
    } else {
        let esc = if view.draft.is_empty() { "quit" } else { "clear" };
        Line::from(vec![
            key("  Enter "),
            Span::raw("add  |  "),
            key("Up/Down "),
            Span::raw("select  |  "),
            key("Tab "),
            Span::raw("open  |  "),
            key("Del "),
            Span::raw("remove  |  "),
            key("Esc "),
            Span::raw(esc),
        ])
    };

    f.render_widget(Paragraph::new(help).alignment(Alignment::Left), area);
}

fn draw_notice(f: &mut Frame, notice: &Notice, area: Rect) {
    let popup = centered(area, 50, 7);
    let block = Block::default()
        .title(format!(" {} ", notice.title()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(notice.message()),
        Line::from(""),
        Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

/// Rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Receiver;
    use ghfav::data::{MemoryStore, UserRecord};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn snapshot_with(logins: &[&str]) -> AppSnapshot {
        AppSnapshot {
            users: logins.iter().map(|l| UserRecord::new("", *l)).collect(),
            ..AppSnapshot::default()
        }
    }

    fn drain(rx: &Receiver<AppCommand>) -> Vec<AppCommand> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_typing_and_enter_submits() {
        let (tx, rx) = unbounded();
        let mut view = View::new(false);
        let snapshot = AppSnapshot::default();

        for c in "octocat".chars() {
            handle_key(press(KeyCode::Char(c)), &mut view, &snapshot, &tx);
        }
        handle_key(press(KeyCode::Enter), &mut view, &snapshot, &tx);

        let sent = drain(&rx);
        assert_eq!(sent.len(), 2);
        assert!(matches!(&sent[0], AppCommand::SetInput(s) if s == "octocat"));
        assert!(matches!(sent[1], AppCommand::Submit));

        // Kept until the controller reports the lookup settled
        assert_eq!(view.draft, "octocat");
        view.sync(&AppSnapshot::default());
        assert_eq!(view.draft, "octocat");

        view.sync(&AppSnapshot {
            submits: 1,
            loading: true,
            input: "octocat".to_string(),
            ..AppSnapshot::default()
        });
        assert_eq!(view.draft, "octocat");

        view.sync(&AppSnapshot {
            submits: 1,
            ..AppSnapshot::default()
        });
        assert!(view.draft.is_empty());
        assert!(view.awaiting.is_none());
    }

    #[test]
    fn test_input_frozen_until_submit_settles() {
        let (tx, rx) = unbounded();
        let mut view = View::new(false);
        // Snapshot still predates the submit
        let stale = AppSnapshot::default();

        view.draft = "octocat".to_string();
        handle_key(press(KeyCode::Enter), &mut view, &stale, &tx);
        drain(&rx);

        for code in [KeyCode::Char('x'), KeyCode::Backspace, KeyCode::Esc, KeyCode::Enter] {
            handle_key(press(code), &mut view, &stale, &tx);
        }

        assert!(drain(&rx).is_empty());
        assert_eq!(view.draft, "octocat");
        assert!(view.running);
    }

    #[test]
    fn test_enter_ignored_while_loading() {
        let (tx, rx) = unbounded();
        let mut view = View::new(false);
        view.draft = "octocat".to_string();
        let snapshot = AppSnapshot {
            loading: true,
            ..AppSnapshot::default()
        };

        handle_key(press(KeyCode::Enter), &mut view, &snapshot, &tx);

        assert!(drain(&rx).is_empty());
        assert_eq!(view.draft, "octocat");
    }

    #[test]
    fn test_notice_swallows_key() {
        let (tx, rx) = unbounded();
        let mut view = View::new(false);
        let snapshot = AppSnapshot {
            notice: Some(Notice::AlreadyFavorite {
                login: "a".to_string(),
            }),
            ..AppSnapshot::default()
        };

        handle_key(press(KeyCode::Char('x')), &mut view, &snapshot, &tx);

        let sent = drain(&rx);
        assert!(matches!(sent.as_slice(), [AppCommand::DismissNotice]));
        assert!(view.draft.is_empty());
    }

    #[test]
    fn test_delete_with_confirmation() {
        let (tx, rx) = unbounded();
        let mut view = View::new(true);
        let snapshot = snapshot_with(&["a", "b"]);

        handle_key(press(KeyCode::Down), &mut view, &snapshot, &tx);
        handle_key(press(KeyCode::Delete), &mut view, &snapshot, &tx);
        assert!(drain(&rx).is_empty());
        assert_eq!(view.pending_remove.as_deref(), Some("b"));

        handle_key(press(KeyCode::Delete), &mut view, &snapshot, &tx);
        let sent = drain(&rx);
        assert!(matches!(&sent[..], [AppCommand::Remove(u)] if u.login == "b"));
        assert!(view.pending_remove.is_none());
    }

    #[test]
    fn test_open_and_close_detail() {
        let (tx, rx) = unbounded();
        let mut view = View::new(false);
        let list = snapshot_with(&["a"]);

        handle_key(press(KeyCode::Tab), &mut view, &list, &tx);
        assert!(matches!(&drain(&rx)[..], [AppCommand::Open(l)] if l == "a"));

        let detail = AppSnapshot {
            selected: Some(UserRecord::new("", "a")),
            ..list
        };
        handle_key(press(KeyCode::Esc), &mut view, &detail, &tx);
        assert!(matches!(&drain(&rx)[..], [AppCommand::Close]));
        assert!(view.running);
    }

    #[test]
    fn test_escape_quits_with_empty_draft() {
        let (tx, _rx) = unbounded();
        let mut view = View::new(false);
        view.draft = "abc".to_string();
        let snapshot = AppSnapshot::default();

        handle_key(press(KeyCode::Esc), &mut view, &snapshot, &tx);
        assert!(view.running);
        assert!(view.draft.is_empty());

        handle_key(press(KeyCode::Esc), &mut view, &snapshot, &tx);
        assert!(!view.running);
    }

    #[test]
    fn test_controller_thread_joined_on_drop() {
        let (tx, rx) = unbounded();
        let state = Arc::new(Mutex::new(AppSnapshot::default()));
        let mut controller = AppController::new(
            rx,
            tx.clone(),
            state.clone(),
            FavoritesSession::new(FavoritesStore::load(Box::new(MemoryStore::new()))),
            Arc::new(GithubLookup::from_settings(&Settings::default()).unwrap()),
        );
        let handle = std::thread::spawn(move || controller.run());

        drop(ControllerThread {
            cmd_tx: tx,
            handle: Some(handle),
        });

        assert_eq!(state.lock().unwrap().status_text, "No favorites yet");
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 4);
        assert_eq!(centered(area, 50, 7), area);
        assert_eq!(centered(Rect::new(0, 0, 100, 20), 50, 6), Rect::new(25, 7, 50, 6));
    }
}
