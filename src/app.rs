// App state and main event loop.
// Routes keyboard input to forms and tabs, and spawns network actions onto the runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::runtime::Handle;

use crate::actions;
use crate::api::Transport;
use crate::state::{self, ControlId, Focusable, SharedState, Tab, ViewState, lock};
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SCROLL_STEP: i32 = 10;

/// Main application state.
pub struct App {
    /// View state shared with in-flight actions.
    pub state: SharedState,
    transport: Arc<dyn Transport>,
    runtime: Handle,
    download_dir: PathBuf,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(
        view: ViewState,
        transport: Arc<dyn Transport>,
        runtime: Handle,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            state: state::shared(view),
            transport,
            runtime,
            download_dir,
            should_quit: false,
        }
    }

    /// Fire the one-shot health probe.
    pub fn start_health_probe(&self) {
        let state = self.state.clone();
        let transport = self.transport.clone();
        self.runtime.spawn(async move {
            actions::probe_health(&state, transport.as_ref()).await;
        });
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, &lock(&self.state)))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('d') => self.download_active_tab(),
                KeyCode::Left => self.update(|view| view.tabs = view.tabs.prev()),
                KeyCode::Right => self.update(|view| view.tabs = view.tabs.next()),
                _ => {}
            }
            return;
        }

        if lock(&self.state).show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(12)) {
                self.update(|view| view.show_help = false);
            }
            return;
        }

        match key.code {
            KeyCode::F(n @ 1..=4) => {
                let tab = Tab::ALL[usize::from(n - 1)];
                self.update(|view| view.tabs = view.tabs.activate(tab));
            }
            KeyCode::F(12) => self.update(|view| view.show_help = true),
            KeyCode::Tab | KeyCode::Down => {
                self.update(|view| view.forms.focus_next(view.tabs.active()))
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.update(|view| view.forms.focus_prev(view.tabs.active()))
            }
            KeyCode::PageUp => {
                self.update(|view| view.regions.scroll(view.tabs.active(), -SCROLL_STEP))
            }
            KeyCode::PageDown => {
                self.update(|view| view.regions.scroll(view.tabs.active(), SCROLL_STEP))
            }
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Char(' ') => {
                let toggled = {
                    let mut view = lock(&self.state);
                    let tab = view.tabs.active();
                    view.forms.toggle(tab)
                };
                if !toggled {
                    self.type_char(' ');
                }
            }
            KeyCode::Char(c) => self.type_char(c),
            KeyCode::Backspace => {
                self.update(|view| view.forms.backspace(view.tabs.active()))
            }
            _ => {}
        }
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        f(&mut lock(&self.state));
    }

    fn type_char(&self, c: char) {
        self.update(|view| view.forms.input_char(view.tabs.active(), c));
    }

    /// Enter on a control triggers it; on a checkbox toggles it.
    fn activate_focused(&self) {
        let focused = {
            let mut view = lock(&self.state);
            let tab = view.tabs.active();
            let focused = view.forms.focused(tab);
            if matches!(focused, Focusable::Field(_)) {
                view.forms.toggle(tab);
            }
            focused
        };
        if let Focusable::Control(control) = focused {
            self.trigger(control);
        }
    }

    /// Spawn the action bound to `control`. Busy controls ignore the trigger.
    pub fn trigger(&self, control: ControlId) {
        if lock(&self.state).controls.is_busy(control) {
            return;
        }
        let state = self.state.clone();
        let transport = self.transport.clone();
        self.runtime.spawn(async move {
            actions::run_action(&state, transport.as_ref(), control).await;
        });
    }

    fn download_active_tab(&self) {
        let state = self.state.clone();
        let transport = self.transport.clone();
        let dir = self.download_dir.clone();
        let tab = lock(&self.state).tabs.active();
        self.runtime.spawn(async move {
            actions::download_links(&state, transport.as_ref(), tab, &dir).await;
        });
    }
}
