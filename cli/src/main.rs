//! CLI entrypoint for therabot-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use therabot_application::ChatClient;
use therabot_infrastructure::{
    ConfigLoader, FileConfig, HtmlTranscriptPrinter, HttpChatGateway, JsonlConversationLogger,
};
use therabot_presentation::{ChatRepl, Cli, ConsoleFormatter, TuiApp, TuiOptions};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "therabot-chat.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        println!(
            "{}",
            ConfigLoader::describe_config_sources(cli.config.as_deref())
        );
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    apply_overrides(&mut config, &cli);
    let warnings = config.ensure_valid()?;

    let plain = cli.plain || !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal();

    // Initialize logging based on verbosity level; the TUI owns the screen,
    // so its logs go to a file
    let _log_guard = init_logging(cli.verbose, plain);

    info!("Starting therabot-chat");
    for issue in &warnings {
        warn!("Config: {}", issue.message);
        if !plain {
            eprintln!("Warning: {}", issue.message);
        }
    }

    if cli.no_color || !config.output.color {
        ConsoleFormatter::disable_color();
    }

    // === Dependency Injection ===
    let (response_mode, _) = config.server.parse_response_mode();
    let gateway = HttpChatGateway::new(&config.server.base_url)
        .with_context(|| format!("Invalid server URL: {}", config.server.base_url))?
        .with_response_mode(response_mode);
    let server_label = gateway.base_url().to_string();
    info!("Server: {} (response mode: {})", server_label, response_mode);

    let printer = HtmlTranscriptPrinter::new(config.print.resolved_directory())
        .with_open_viewer(config.print.open_viewer);

    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let mut client = ChatClient::new(Arc::new(gateway), ui_tx).with_printer(Arc::new(printer));

    if let Some(path) = config.logging.conversation_log_path() {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => client = client.with_conversation_logger(Arc::new(logger)),
            None => warn!("Conversation logging disabled for {}", path.display()),
        }
    }

    let cancellation = CancellationToken::new();
    spawn_interrupt_handler(cancellation.clone());

    if plain {
        let interactive = std::io::stdin().is_terminal();
        ChatRepl::new(client, ui_rx)
            .with_server_label(server_label)
            .with_interactive(interactive)
            .with_cancellation(cancellation.clone())
            .run()
            .await?;

        if cancellation.is_cancelled() {
            // A pending stdin read would hold the runtime open
            std::io::stdout().flush()?;
            std::process::exit(130);
        }
        return Ok(());
    }

    let (scroll_debounce, _) = config.tui.scroll_debounce();
    let options = TuiOptions {
        server_label,
        scroll_debounce,
        mouse: config.tui.mouse,
    };
    TuiApp::new(client, ui_rx, options)
        .with_cancellation(cancellation)
        .run()
        .await?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let explicit = cli.config.as_deref();
    if let Some(path) = explicit
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    let loaded = match (cli.no_config, explicit) {
        (true, Some(path)) => ConfigLoader::load_file(path),
        (true, None) => Ok(ConfigLoader::load_defaults()),
        (false, _) => ConfigLoader::load(explicit),
    };
    loaded.map_err(|e| anyhow!("Failed to load config: {}", e))
}

/// CLI flags take priority over every config file.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(mode) = cli.response_mode() {
        config.server.response_mode = mode.to_string();
    }
    if let Some(path) = &cli.log_conversation {
        config.logging.conversation_log = Some(path.display().to_string());
    }
}

fn init_logging(verbose: u8, plain: bool) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if plain {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Logging disabled: cannot create {}: {}", dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Some(guard)
}

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("therabot-chat")
}

fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted");
                token.cancel();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });
}
