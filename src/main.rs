use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

use support_chat::common::{WidgetCommand, WidgetEvent};
use support_chat::config::{self, AppConfig};
use support_chat::controller::ConversationController;
use support_chat::network::WebhookClient;
use support_chat::storage::SessionStore;
use support_chat::ui::{self, TerminalApp};

#[derive(Parser)]
#[command(
    name = "support-chat",
    version,
    about = "Customer-support chat client backed by a reply webhook"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Webhook endpoint (overrides config and environment)
    #[arg(long, value_name = "URL")]
    webhook_url: Option<String>,
    /// SQLite file holding the session (in-memory when omitted)
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Send one message, print the session transcript with every reply and exit
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Write the effective configuration to the config path and exit
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env();
    if let Some(url) = cli.webhook_url {
        app_config.webhook_url = url;
    }
    if let Some(path) = cli.session {
        app_config.session_path = Some(path);
    }

    match cli.mode {
        Some(Mode::Ask { text }) => run_once(app_config, text.join(" ")).await,
        Some(Mode::InitConfig) => {
            config::save_config(&cli.config, &app_config)
                .with_context(|| format!("failed to write {}", cli.config))?;
            log::info!("Wrote configuration to {}", cli.config);
            Ok(())
        }
        None => run_interactive(app_config).await,
    }
}

fn build_controller(
    app_config: &AppConfig,
    event_tx: mpsc::Sender<WidgetEvent>,
    cmd_rx: mpsc::Receiver<WidgetCommand>,
) -> anyhow::Result<ConversationController<WebhookClient>> {
    let fetcher = WebhookClient::new(&app_config.webhook_url, app_config.request_timeout())
        .context("failed to build HTTP client")?;
    let store = SessionStore::open(app_config.session_path.as_deref())
        .context("failed to open session store")?;

    let controller = ConversationController::new(
        Arc::new(fetcher),
        store,
        app_config.pacing,
        app_config.replies.clone(),
        event_tx,
        cmd_rx,
    )
    .context("failed to restore session")?;

    log::info!(
        "Session {} talking to {}",
        controller.identity(),
        app_config.webhook_url
    );
    Ok(controller)
}

async fn run_interactive(app_config: AppConfig) -> anyhow::Result<()> {
    // Frontend -> controller
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Controller -> frontend
    let (event_tx, event_rx) = mpsc::channel(100);

    let controller = build_controller(&app_config, event_tx, cmd_rx)?;
    let controller_task = tokio::spawn(controller.run());

    TerminalApp::new(app_config.faq, app_config.contact, cmd_tx, event_rx)
        .run()
        .await
        .context("terminal input failed")?;

    controller_task.await.context("controller task panicked")?;
    Ok(())
}

async fn run_once(app_config: AppConfig, text: String) -> anyhow::Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel(1);
    let (event_tx, event_rx) = mpsc::channel(100);

    let controller = build_controller(&app_config, event_tx, cmd_rx)?;
    let controller_task = tokio::spawn(controller.run());

    ui::app::ask(cmd_tx, event_rx, text)
        .await
        .context("controller stopped before accepting the message")?;

    controller_task.await.context("controller task panicked")?;
    Ok(())
}
