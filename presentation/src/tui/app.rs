//! TUI application: main loop with Actor pattern
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop)                 controller_task (tokio::spawn)
//!   ├─ crossterm EventStream              ├─ cmd_rx.recv()
//!   ├─ ui_rx (UiEvent from ChatClient)    └─ ChatClient::{send_message, reset, ...}
//!   ├─ scroll deadline (coalesced)
//!   └─ tick_interval
//!        └── cmd_tx ──────────────────>──┘
//! ```

use super::controller::controller_task;
use super::event::TuiCommand;
use super::mode::{Action, KeyHandler};
use super::presenter::TuiPresenter;
use super::scroll::DEFAULT_SCROLL_DEBOUNCE;
use super::state::TuiState;
use super::widgets::{
    MainLayout, conversation::ConversationWidget, header::HeaderWidget, help::HelpWidget,
    input::InputWidget, status_bar::StatusBarWidget,
};
use crate::command::{SlashCommand, UserInput, parse_input};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use therabot_application::{ChatClient, UiEvent};
use therabot_domain::ClientPhase;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How long a flash message stays in the status bar
const FLASH_TTL: Duration = Duration::from_secs(5);

/// Shown when input arrives while a request is in flight
const WAITING_FLASH: &str = "Waiting for reply...";

/// Display options for the TUI
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Server address shown in the header
    pub server_label: String,
    /// Debounce window for coalesced scroll-to-bottom requests
    pub scroll_debounce: Duration,
    /// Capture the mouse for wheel scrolling
    pub mouse: bool,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            server_label: String::new(),
            scroll_debounce: DEFAULT_SCROLL_DEBOUNCE,
            mouse: true,
        }
    }
}

/// Main TUI application
pub struct TuiApp {
    client: ChatClient,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    options: TuiOptions,
    cancellation: CancellationToken,
}

impl TuiApp {
    /// Create a TUI around a client and the receiving end of its UiEvent
    /// channel. The client moves into the controller task on [`run`](Self::run).
    pub fn new(
        client: ChatClient,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        options: TuiOptions,
    ) -> Self {
        Self {
            client,
            ui_rx,
            options,
            cancellation: CancellationToken::new(),
        }
    }

    /// Quit when the token fires (e.g. on SIGINT)
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Run the TUI main loop
    pub async fn run(self) -> io::Result<()> {
        let TuiApp {
            client,
            mut ui_rx,
            options,
            cancellation,
        } = self;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if options.mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(info);
        }));

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<TuiCommand>();
        let controller_cancel = cancellation.child_token();
        let controller = tokio::spawn(controller_task(client, cmd_rx, controller_cancel.clone()));

        let mut state = TuiState::new().with_server_label(options.server_label.clone());
        let mut presenter = TuiPresenter::new(options.scroll_debounce);
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_millis(250));
        info!(server = %options.server_label, "TUI started");

        let result = loop {
            // Render
            if let Err(e) = terminal.draw(|frame| render(frame, &mut state)) {
                break Err(e);
            }

            if state.should_quit {
                break Ok(());
            }

            let scroll_deadline = presenter.scroll_deadline();
            let scroll_sleep = tokio::time::sleep_until(
                scroll_deadline
                    .map(tokio::time::Instant::from_std)
                    .unwrap_or_else(|| tokio::time::Instant::now() + FLASH_TTL),
            );

            // select! on all event sources
            tokio::select! {
                _ = cancellation.cancelled() => {
                    state.should_quit = true;
                }

                // Terminal events (keyboard, mouse, resize)
                Some(Ok(term_event)) = event_stream.next() => {
                    handle_terminal_event(
                        &mut state,
                        &mut presenter,
                        &cmd_tx,
                        term_event,
                        options.mouse,
                    );
                }

                // UiEvents from the ChatClient
                Some(ui_event) = ui_rx.recv() => {
                    presenter.apply(&mut state, ui_event, Instant::now());
                }

                // Coalesced scroll-to-bottom
                _ = scroll_sleep, if scroll_deadline.is_some() => {
                    presenter.flush_scroll(&mut state, Instant::now());
                }

                // Tick for flash expiry
                _ = tick.tick() => {
                    state.expire_flash(FLASH_TTL);
                }
            }
        };

        // Stop the controller; an in-flight request is abandoned
        let _ = cmd_tx.send(TuiCommand::Quit);
        controller_cancel.cancel();
        if let Err(e) = controller.await {
            debug!("Controller task ended abnormally: {}", e);
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }
}

/// Render all widgets
fn render(frame: &mut Frame, state: &mut TuiState) {
    let layout = MainLayout::compute(frame.area());

    // Keep the scroll offset within the content
    let max_scroll = ConversationWidget::new(state).max_scroll(layout.conversation);
    state.scroll_offset = state.scroll_offset.min(max_scroll);

    frame.render_widget(HeaderWidget::new(state), layout.header);
    frame.render_widget(ConversationWidget::new(state), layout.conversation);
    frame.render_widget(InputWidget::new(state), layout.input);
    frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

    if state.show_help {
        let help_area = MainLayout::centered_overlay(70, 80, frame.area());
        frame.render_widget(ratatui::widgets::Clear, help_area);
        frame.render_widget(HelpWidget::new(), help_area);
    }
}

/// Handle a terminal (crossterm) event
fn handle_terminal_event(
    state: &mut TuiState,
    presenter: &mut TuiPresenter,
    cmd_tx: &mpsc::UnboundedSender<TuiCommand>,
    event: Event,
    mouse: bool,
) {
    match event {
        Event::Key(key) => handle_action(state, cmd_tx, KeyHandler::handle(key)),
        Event::Mouse(mouse_event) if mouse => {
            handle_action(state, cmd_tx, KeyHandler::handle_mouse(mouse_event))
        }
        Event::Paste(text) => {
            for c in text.chars().filter(|c| !c.is_control()) {
                handle_action(state, cmd_tx, Action::InsertChar(c));
            }
        }
        Event::Resize(_, _) => presenter.on_resize(Instant::now()),
        _ => {}
    }
}

/// Handle a semantic key action
fn handle_action(
    state: &mut TuiState,
    cmd_tx: &mpsc::UnboundedSender<TuiCommand>,
    action: Action,
) {
    let editing = matches!(
        action,
        Action::InsertChar(_)
            | Action::DeleteChar
            | Action::DeleteForward
            | Action::ClearInput
            | Action::Submit
            | Action::Print
    );
    if editing && !state.can_submit() {
        state.set_flash(WAITING_FLASH);
        return;
    }

    match action {
        Action::None => {}

        // Text editing
        Action::InsertChar(c) => state.insert_char(c),
        Action::DeleteChar => state.delete_char(),
        Action::DeleteForward => state.delete_forward(),
        Action::ClearInput => state.clear_input(),
        Action::CursorLeft => state.cursor_left(),
        Action::CursorRight => state.cursor_right(),
        Action::CursorStart => state.cursor_home(),
        Action::CursorEnd => state.cursor_end(),

        // Scrolling
        Action::ScrollUp(lines) => state.scroll_up(lines),
        Action::ScrollDown(lines) => state.scroll_down(lines),
        Action::ScrollToBottom => state.scroll_to_bottom(),

        Action::Submit => submit(state, cmd_tx),
        Action::Print => send(state, cmd_tx, TuiCommand::Print(None)),
        Action::ToggleHelp => state.show_help = !state.show_help,
        Action::Cancel => {
            if state.show_help {
                state.show_help = false;
            } else {
                state.should_quit = true;
            }
        }
        Action::Quit => state.should_quit = true,
    }
}

/// Submit the draft as a message or slash command.
fn submit(state: &mut TuiState, cmd_tx: &mpsc::UnboundedSender<TuiCommand>) {
    match parse_input(&state.input) {
        UserInput::Message(text) => {
            // Empty input is a no-op; the client would ignore it anyway
            if text.trim().is_empty() {
                return;
            }
            // The draft stays until the client clears it
            state.phase = ClientPhase::AwaitingReply;
            state.input_focused = false;
            send(state, cmd_tx, TuiCommand::Send(text));
        }
        UserInput::Command(command) => {
            state.clear_input();
            match command {
                SlashCommand::Help => state.show_help = true,
                SlashCommand::Print(destination) => {
                    send(state, cmd_tx, TuiCommand::Print(destination))
                }
                SlashCommand::Reset => {
                    state.phase = ClientPhase::AwaitingSession;
                    send(state, cmd_tx, TuiCommand::Reset);
                }
                SlashCommand::Quit => state.should_quit = true,
            }
        }
        UserInput::Unknown(name) => {
            state.set_flash(format!("Unknown command: {} (F1 for help)", name));
        }
    }
}

fn send(state: &mut TuiState, cmd_tx: &mpsc::UnboundedSender<TuiCommand>, cmd: TuiCommand) {
    if cmd_tx.send(cmd).is_err() {
        state.set_flash("Chat client has stopped");
    }
}
