//! Application controller
//!
//! Owns the favorites session and processes commands from front ends
//! through a single crossbeam channel. Lookups run on worker threads and
//! report back through the same channel, so the session is only ever
//! touched from the controller thread.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error};

use crate::error::AppError;
use crate::lookup::UserLookup;

use super::session::FavoritesSession;
use super::state::{AppCommand, AppSnapshot};

pub struct AppController {
    cmd_rx: Receiver<AppCommand>,
    cmd_tx: Sender<AppCommand>,
    shared_state: Arc<Mutex<AppSnapshot>>,
    session: FavoritesSession,
    lookup: Arc<dyn UserLookup>,
    /// Login shown in the detail view
    selected: Option<String>,
    submits: u64,
}

impl AppController {
    pub fn new(
        cmd_rx: Receiver<AppCommand>,
        cmd_tx: Sender<AppCommand>,
        shared_state: Arc<Mutex<AppSnapshot>>,
        session: FavoritesSession,
        lookup: Arc<dyn UserLookup>,
    ) -> Self {
        Self {
            cmd_rx,
            cmd_tx,
            shared_state,
            session,
            lookup,
            selected: None,
            submits: 0,
        }
    }

    /// Run the controller event loop (blocking, call from a dedicated thread)
    ///
    /// Returns once `Shutdown` arrives.
    pub fn run(&mut self) {
        self.publish();

        while let Ok(cmd) = self.cmd_rx.recv() {
            let exit = self.handle_command(cmd);
            self.publish();
            if exit {
                break;
            }
        }
    }

    /// Handle a single command. Returns true if the loop should exit.
    fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::Shutdown => return true,

            AppCommand::SetInput(text) => {
                self.session.set_input(text);
            }
            AppCommand::Submit => {
                self.submits += 1;
                self.start_lookup();
            }
            AppCommand::Remove(record) => {
                if self.session.remove(&record) {
                    self.clear_selection_if(&record.login);
                }
            }
            AppCommand::RemoveLogin(login) => {
                if let Some(record) = self.session.remove_login(&login) {
                    self.clear_selection_if(&record.login);
                }
            }
            AppCommand::Open(login) => {
                self.selected = self
                    .session
                    .store()
                    .get(&login)
                    .map(|record| record.login.clone());
            }
            AppCommand::Close => {
                self.selected = None;
            }
            AppCommand::DismissNotice => {
                let mut state = self.shared_state.lock().unwrap_or_else(|e| e.into_inner());
                state.notice = None;
            }
            AppCommand::InternalLookupResolved { login, result } => {
                self.session.finish_lookup(&login, result);
            }
        }
        false
    }

    /// Run the lookup on a worker thread, then send the result back.
    ///
    /// Does nothing if the session refuses to start one (already loading,
    /// blank input, known login).
    fn start_lookup(&mut self) {
        let Some(login) = self.session.begin_lookup() else {
            return;
        };
        debug!(%login, "looking up user");

        let lookup = Arc::clone(&self.lookup);
        let cmd_tx = self.cmd_tx.clone();
        let worker_login = login.clone();

        let spawned = std::thread::Builder::new()
            .name("user-lookup".into())
            .spawn(move || {
                let result = lookup.get(&worker_login);
                let _ = cmd_tx.send(AppCommand::InternalLookupResolved {
                    login: worker_login,
                    result,
                });
            });

        if let Err(e) = spawned {
            error!("failed to spawn lookup thread: {e}");
            self.session.finish_lookup(&login, Err(AppError::Io(e)));
        }
    }

    fn clear_selection_if(&mut self, login: &str) {
        if self.selected.as_deref() == Some(login) {
            self.selected = None;
        }
    }

    /// Copy session state into the shared snapshot
    fn publish(&mut self) {
        let notice = self.session.take_notice();
        let selected = self
            .selected
            .as_deref()
            .and_then(|login| self.session.store().get(login).cloned());

        let mut state = self.shared_state.lock().unwrap_or_else(|e| e.into_inner());
        state.users = self.session.users().to_vec();
        state.input = self.session.input().to_string();
        state.loading = self.session.is_loading();
        state.submits = self.submits;
        if let Some(notice) = notice {
            state.notice = Some(notice);
        }
        state.selected = selected;
        state.status_text = if state.loading {
            "Searching...".into()
        } else {
            match state.users.len() {
                0 => "No favorites yet".into(),
                1 => "1 favorite".into(),
                n => format!("{n} favorites").into(),
            }
        };
    }
}
