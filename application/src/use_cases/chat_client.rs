//! Chat client use case
//!
//! [`ChatClient`] mediates between user input, the chat server and the
//! visible transcript. It owns the [`Transcript`]; views only see it through
//! the [`UiEvent`]s it emits.
//!
//! ```text
//! initialize ──> /new-context ──> system welcome | error
//! send_message ──> user msg ──> /chat ──> bot msg (whole | streamed) | error
//! ```
//!
//! Failures never escape: they become an error message in the transcript and
//! the client returns to [`ClientPhase::Idle`], ready for the next input.
//! Each send ends in exactly one bot or error message. When a stream fails
//! after some deltas, the error message takes the place of the partial reply.

use crate::ports::chat_gateway::{ChatGateway, ChatReply, GatewayError, StreamHandle};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::transcript_printer::{
    NoTranscriptPrinter, PrintError, PrintReceipt, TranscriptPrinter,
};
use crate::ports::ui_event::{ScrollTrigger, UiEvent};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use therabot_domain::util::excerpt;
use therabot_domain::{ClientPhase, Message, OutgoingMessage, Role, StreamChunk, Transcript};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Shown when a session could not be created.
pub const SESSION_INIT_FAILED_MESSAGE: &str = "Error: Unable to start a new chat session.";

/// Shown when a message could not be answered.
pub const SEND_FAILED_MESSAGE: &str = "Error: Unable to get response from the server.";

/// Errors recovered by the chat client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Session initialization failed: {0}")]
    SessionInit(GatewayError),

    #[error("Send failed: {0}")]
    Send(GatewayError),
}

impl ChatError {
    /// Text of the error message rendered into the transcript.
    ///
    /// Transport and status failures use a generic text; an error reported
    /// by the server inside a stream carries the server's own text.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::SessionInit(_) => SESSION_INIT_FAILED_MESSAGE.to_string(),
            ChatError::Send(GatewayError::Server(text)) => format!("Error: {}", text),
            ChatError::Send(_) => SEND_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Result of [`ChatClient::initialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    Failed(ChatError),
}

/// Result of [`ChatClient::send_message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing happened
    Skipped,
    /// A bot message was rendered
    Replied,
    /// An error message was rendered
    Failed(ChatError),
}

/// The chat client.
///
/// Constructed once at startup with its ports. `send_message` takes
/// `&mut self`, so a client never has two sends in flight.
pub struct ChatClient {
    gateway: Arc<dyn ChatGateway>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    conversation_logger: Arc<dyn ConversationLogger>,
    printer: Arc<dyn TranscriptPrinter>,
    transcript: Transcript,
    phase: ClientPhase,
    /// Bot message being built by the current stream
    reply_index: Option<usize>,
}

impl ChatClient {
    pub fn new(gateway: Arc<dyn ChatGateway>, ui_tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self {
            gateway,
            ui_tx,
            conversation_logger: Arc::new(NoConversationLogger),
            printer: Arc::new(NoTranscriptPrinter),
            transcript: Transcript::new(),
            phase: ClientPhase::Idle,
            reply_index: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_printer(mut self, printer: Arc<dyn TranscriptPrinter>) -> Self {
        self.printer = printer;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> ClientPhase {
        self.phase
    }

    /// Request a new session and render its welcome text.
    ///
    /// Issues exactly one session-creation request. Focus returns to the
    /// input whether or not it succeeded.
    pub async fn initialize(&mut self) -> InitOutcome {
        self.set_phase(ClientPhase::AwaitingSession);
        info!("Requesting new chat session");

        let outcome = match self.gateway.new_context().await {
            Ok(welcome) => {
                debug!(
                    lines = welcome.message.lines().len(),
                    disclaimer = welcome.disclaimer_url.is_some(),
                    "Session created"
                );
                let markup = welcome.to_markup();
                self.render_message(Role::System, markup.into_string(), true);
                InitOutcome::Ready
            }
            Err(e) => {
                warn!("Session initialization failed: {}", e);
                let error = ChatError::SessionInit(e);
                self.record_failure("session_failed", &error);
                self.render_message(Role::Error, error.user_message(), false);
                InitOutcome::Failed(error)
            }
        };

        self.set_phase(ClientPhase::Idle);
        self.emit(UiEvent::InputFocused);
        outcome
    }

    /// Submit user input.
    ///
    /// Empty (after trimming) input is ignored entirely. Otherwise the user
    /// message is rendered and the input cleared before the request goes out,
    /// and exactly one bot or error message follows. A stream that fails
    /// part-way has its partial bot message replaced by the error message.
    pub async fn send_message(&mut self, raw: &str) -> SendOutcome {
        let Some(outgoing) = OutgoingMessage::try_new(raw) else {
            debug!("Ignoring empty input");
            return SendOutcome::Skipped;
        };

        self.render_message(Role::User, outgoing.text(), false);
        self.emit(UiEvent::InputCleared);
        self.set_phase(ClientPhase::AwaitingReply);
        debug!(
            preview = %excerpt(outgoing.text(), 80),
            bytes = outgoing.text().len(),
            "Sending message"
        );

        let outcome = match self.exchange(&outgoing).await {
            Ok(()) => SendOutcome::Replied,
            Err(error) => {
                warn!("{}", error);
                self.record_failure("send_failed", &error);
                self.render_send_failure(&error);
                SendOutcome::Failed(error)
            }
        };
        self.reply_index = None;

        self.set_phase(ClientPhase::Idle);
        self.emit(UiEvent::InputCleared);
        self.emit(UiEvent::InputFocused);
        outcome
    }

    /// Append a message to the transcript and tell the views.
    ///
    /// `is_markup` marks `content` as trusted HTML; only server-supplied
    /// welcome text should ever set it.
    pub fn render_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        is_markup: bool,
    ) -> usize {
        let message = Message::new(role, content, is_markup);
        let index = self.transcript.push(message.clone());

        self.conversation_logger.log(ConversationEvent::new(
            "message_appended",
            json!({
                "index": index,
                "role": message.role.as_str(),
                "content": message.content,
                "is_markup": message.is_markup,
            }),
        ));

        self.emit(UiEvent::MessageAppended { index, message });
        self.scroll_to_bottom(ScrollTrigger::Immediate);
        index
    }

    /// Show a failed send: in place of a partial reply, or as a new message.
    fn render_send_failure(&mut self, error: &ChatError) {
        let content = error.user_message();
        let Some(index) = self.reply_index.take() else {
            self.render_message(Role::Error, content, false);
            return;
        };

        let message = Message::error(content);
        if let Err(e) = self.transcript.replace_bot(index, message.clone()) {
            warn!("Cannot replace partial reply: {}", e);
            self.render_message(Role::Error, message.content, false);
            return;
        }
        self.conversation_logger.log(ConversationEvent::new(
            "message_replaced",
            json!({
                "index": index,
                "role": message.role.as_str(),
                "content": message.content,
            }),
        ));
        self.emit(UiEvent::MessageReplaced { index, message });
        self.scroll_to_bottom(ScrollTrigger::Immediate);
    }

    /// Ask the views to keep the transcript scrolled to its end.
    pub fn scroll_to_bottom(&self, trigger: ScrollTrigger) {
        self.emit(UiEvent::ScrollToBottom(trigger));
    }

    /// Print every current message.
    ///
    /// The outcome is reported to the views as a notice; the transcript
    /// itself is never touched.
    pub fn print_conversation(
        &self,
        destination: Option<&Path>,
    ) -> Result<PrintReceipt, PrintError> {
        let result = self.printer.print(&self.transcript, destination);
        match &result {
            Ok(receipt) => {
                info!(
                    path = %receipt.location.display(),
                    opened = receipt.opened,
                    "Transcript printed"
                );
                let notice = if receipt.opened {
                    format!("Print view opened: {}", receipt.location.display())
                } else {
                    format!("Print view written to {}", receipt.location.display())
                };
                self.emit(UiEvent::Notice(notice));
            }
            Err(e) => {
                warn!("Printing failed: {}", e);
                self.emit(UiEvent::Notice(format!("Printing failed: {}", e)));
            }
        }
        result
    }

    /// Discard the transcript and start a fresh session.
    pub async fn reset(&mut self) -> InitOutcome {
        info!(messages = self.transcript.len(), "Resetting conversation");
        self.transcript.clear();
        self.conversation_logger
            .log(ConversationEvent::new("transcript_cleared", json!({})));
        self.emit(UiEvent::TranscriptCleared);
        self.initialize().await
    }

    async fn exchange(&mut self, outgoing: &OutgoingMessage) -> Result<(), ChatError> {
        let reply = self
            .gateway
            .send_message(outgoing.text())
            .await
            .map_err(ChatError::Send)?;

        match reply {
            ChatReply::Whole(text) => {
                self.render_message(Role::Bot, text, false);
                Ok(())
            }
            ChatReply::Streaming(handle) => self.read_stream(handle).await,
        }
    }

    /// Read a streamed reply until a terminal chunk or the end of the body.
    ///
    /// The bot message is created by the first delta and tracked in
    /// `reply_index`. Returning drops the handle, so no frame after `done`
    /// or `error` is read.
    async fn read_stream(&mut self, mut handle: StreamHandle) -> Result<(), ChatError> {
        self.set_phase(ClientPhase::Streaming);
        let mut chunks = 0usize;

        loop {
            let chunk = match handle.next().await {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => return Err(ChatError::Send(e)),
                None => {
                    return match self.reply_index {
                        Some(index) => {
                            warn!(chunks, "Stream ended without a done frame; keeping partial reply");
                            self.record_stream_completed(index, false);
                            Ok(())
                        }
                        None => Err(ChatError::Send(GatewayError::EmptyStream)),
                    };
                }
            };
            chunks += 1;

            match chunk {
                StreamChunk::Delta(text) => match self.reply_index {
                    None => {
                        let index = self.render_message(Role::Bot, text, false);
                        self.reply_index = Some(index);
                    }
                    Some(index) => self.append_delta(index, &text),
                },
                StreamChunk::Done => {
                    let index = match self.reply_index {
                        Some(index) => index,
                        None => self.render_message(Role::Bot, "", false),
                    };
                    debug!(chunks, "Stream completed");
                    self.record_stream_completed(index, true);
                    return Ok(());
                }
                StreamChunk::Error(text) => {
                    return Err(ChatError::Send(GatewayError::Server(text)));
                }
            }
        }
    }

    fn append_delta(&mut self, index: usize, delta: &str) {
        match self.transcript.append_delta(index, delta) {
            Ok(_) => {
                self.emit(UiEvent::MessageUpdated {
                    index,
                    delta: delta.to_string(),
                });
                self.scroll_to_bottom(ScrollTrigger::Coalesced);
            }
            Err(e) => warn!("Dropping delta: {}", e),
        }
    }

    fn record_stream_completed(&self, index: usize, terminated: bool) {
        let content = self
            .transcript
            .get(index)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        self.conversation_logger.log(ConversationEvent::new(
            "stream_completed",
            json!({
                "index": index,
                "content": content,
                "terminated": terminated,
            }),
        ));
    }

    fn record_failure(&self, event_type: &'static str, error: &ChatError) {
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            json!({ "error": error.to_string() }),
        ));
    }

    fn set_phase(&mut self, next: ClientPhase) {
        self.phase = match self.phase.transition(next) {
            Ok(phase) => phase,
            Err(e) => {
                warn!("{}", e);
                next
            }
        };
        self.emit(UiEvent::PhaseChanged(self.phase));
    }

    fn emit(&self, event: UiEvent) {
        // A closed channel means the view has gone away; the client keeps working
        let _ = self.ui_tx.send(event);
    }
}
