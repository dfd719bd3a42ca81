mod commands;
mod render;

use std::path::Path;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use slackr_client::attachment;
use slackr_client::{App, ClientConfig, HttpTransport, UiEvent};

use commands::{Action, Line};

#[derive(Debug, Parser)]
#[command(name = "slackr", version, about = "Terminal client for a Slackr backend")]
struct Args {
    /// Overrides SLACKR_BACKEND_URL.
    #[arg(long)]
    backend_url: Option<String>,
}

async fn read_attachment(path: &Path) -> slackr_client::Result<String> {
    let mime = attachment::mime_for_path(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| slackr_client::ClientError::Validation(format!("{}: {e}", path.display())))?;
    attachment::data_url(mime, &bytes)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slackr=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.backend_url {
        config = config.with_backend_url(url);
    }

    let transport = HttpTransport::new(&config)?;
    let mut app = App::new(transport, config);
    info!(backend = %app.config().backend_url, "slackr client starting");

    print!("{}", render::render(app.view()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(input) = lines.next_line().await? {
        if input.trim().is_empty() {
            continue;
        }
        let line = match Line::parse_line(&input) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match line.command.into_action() {
            Action::Dispatch(events) => events.into_iter().for_each(|e| app.dispatch(e)),
            Action::Attach(path) => match read_attachment(&path).await {
                Ok(url) => app.dispatch(UiEvent::AttachImage(Some(url))),
                Err(e) => {
                    warn!("attachment rejected: {}", e);
                    eprintln!("!! {e}");
                    continue;
                }
            },
            Action::Show => {}
            Action::Quit => break,
        }

        app.settle().await;
        print!("{}", render::render(app.view()));
    }

    info!("slackr client exiting");
    Ok(())
}
