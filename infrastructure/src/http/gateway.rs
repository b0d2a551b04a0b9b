//! HTTP chat gateway implementation

use super::error::{HttpError, Result};
use super::frame::FrameDecoder;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use therabot_application::ports::chat_gateway::{
    ChatGateway, ChatReply, GatewayError, StreamHandle,
};
use therabot_domain::util::excerpt;
use therabot_domain::{ResponseMode, StreamChunk, Welcome};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Session-creation endpoint, relative to the base URL
const NEW_CONTEXT_PATH: &str = "new-context";

/// Message-submission endpoint, relative to the base URL
const CHAT_PATH: &str = "chat";

/// Chunks buffered between the body reader task and the chat client
const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Largest raw body excerpt kept in parse errors
const RAW_EXCERPT_BYTES: usize = 200;

/// Whole-response body of `/chat`
#[derive(Debug, Deserialize)]
struct WholeReply {
    response: String,
}

/// Chat gateway talking to the server over HTTP.
///
/// The client keeps an in-memory cookie jar, so the `session_id` cookie set
/// by `/new-context` is replayed on every `/chat` request.
pub struct HttpChatGateway {
    client: Client,
    base_url: Url,
    response_mode: ResponseMode,
}

impl HttpChatGateway {
    /// Create a gateway for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("therabot-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;

        info!("HttpChatGateway initialized for {}", base_url);

        Ok(Self {
            client,
            base_url,
            response_mode: ResponseMode::default(),
        })
    }

    /// Force whole or streamed parsing instead of negotiating by content type.
    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = mode;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn response_mode(&self) -> ResponseMode {
        self.response_mode
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| HttpError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            reason: e.to_string(),
        })
    }

    async fn post_new_context(&self) -> Result<Welcome> {
        let url = self.endpoint(NEW_CONTEXT_PATH)?;
        debug!("POST {}", url);

        let response = check_status(self.client.post(url).send().await?)?;
        let body = response.text().await?;
        trace!("new-context body: {}", body);

        serde_json::from_str(&body).map_err(|e| parse_error(e, &body))
    }

    async fn post_chat(&self, message: &str) -> Result<ChatReply> {
        let url = self.endpoint(CHAT_PATH)?;
        debug!("POST {} ({} bytes)", url, message.len());

        let response = self
            .client
            .post(url)
            .form(&[("message", message)])
            .send()
            .await?;
        let response = check_status(response)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let mode = self.response_mode.resolve(content_type.as_deref());
        debug!(
            content_type = content_type.as_deref().unwrap_or("-"),
            mode = mode.as_str(),
            "Reading chat reply"
        );

        match mode {
            ResponseMode::Stream => Ok(ChatReply::Streaming(spawn_reader(response))),
            _ => {
                let body = response.text().await?;
                trace!("chat body: {}", body);
                let reply: WholeReply =
                    serde_json::from_str(&body).map_err(|e| parse_error(e, &body))?;
                Ok(ChatReply::Whole(reply.response))
            }
        }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn new_context(&self) -> std::result::Result<Welcome, GatewayError> {
        self.post_new_context().await.map_err(|e| {
            warn!("new-context failed: {}", e);
            GatewayError::from(e)
        })
    }

    async fn send_message(&self, message: &str) -> std::result::Result<ChatReply, GatewayError> {
        self.post_chat(message).await.map_err(|e| {
            warn!("chat failed: {}", e);
            GatewayError::from(e)
        })
    }
}

/// Parse and normalize the server base URL.
///
/// A trailing `/` is added so endpoint paths resolve below it rather than
/// replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| HttpError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(HttpError::Status {
            status: status.as_u16(),
        })
    }
}

fn parse_error(error: serde_json::Error, body: &str) -> HttpError {
    HttpError::ParseError {
        error: error.to_string(),
        raw: excerpt(body, RAW_EXCERPT_BYTES).into_owned(),
    }
}

/// Start the background body reader for a streamed reply.
fn spawn_reader(response: Response) -> StreamHandle {
    let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        read_frames(response, tx).await;
    });
    StreamHandle::new(rx)
}

/// Background reader loop: body bytes → frames → chunks.
///
/// Stops after the first terminal or malformed chunk, on a body error, or
/// when the receiver has been dropped.
async fn read_frames(
    response: Response,
    tx: mpsc::Sender<std::result::Result<StreamChunk, GatewayError>>,
) {
    let mut body = response.bytes_stream();
    let mut decoder = FrameDecoder::new();

    while let Some(next) = body.next().await {
        let bytes = match next {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Reader loop: body read error: {}", e);
                let _ = tx
                    .send(Err(GatewayError::ConnectionError(e.to_string())))
                    .await;
                return;
            }
        };
        trace!("Reader loop: {} bytes", bytes.len());

        for payload in decoder.push(&bytes) {
            if !forward(&tx, &payload).await {
                return;
            }
        }
    }

    if let Some(payload) = decoder.finish() {
        debug!("Reader loop: flushing unterminated final frame");
        forward(&tx, &payload).await;
    }
}

/// Parse one payload and send it on. Returns whether reading should go on.
async fn forward(
    tx: &mpsc::Sender<std::result::Result<StreamChunk, GatewayError>>,
    payload: &str,
) -> bool {
    let chunk = StreamChunk::parse(payload).map_err(|e| {
        warn!("Reader loop: malformed frame: {} ({})", e, payload);
        GatewayError::from(e)
    });
    let keep_reading = matches!(&chunk, Ok(c) if !c.is_terminal());

    if tx.send(chunk).await.is_err() {
        debug!("Reader loop: receiver dropped");
        return false;
    }
    keep_reading
}
