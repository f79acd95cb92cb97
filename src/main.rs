//! Weekly Pulse driver binary.
//!
//! Runs one interview over stdin/stdout: wires the configured oracle and
//! update store into a dialogue controller, opens a session, and loops until
//! the interview completes or input ends. Session lifecycle lives here, not
//! in the core; a new run is a new session.

use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use weekly_pulse::adapters::ai::{OpenAiConfig, OpenAiOracle};
use weekly_pulse::adapters::store::{FileUpdateStore, QdrantConfig, QdrantUpdateStore};
use weekly_pulse::application::DialogueController;
use weekly_pulse::config::{AppConfig, StoreBackend};
use weekly_pulse::domain::interview::InterviewSession;
use weekly_pulse::ports::{GenerationOracle, UpdateStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let controller = DialogueController::new(build_oracle(&config), build_store(&config));
    let mut session = InterviewSession::new();

    tracing::info!(session_id = %session.id(), "starting interview");

    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let mut lines = stdin.lines();

    say(&mut stdout, controller.start_message()).await?;

    while let Some(line) = lines.next_line().await? {
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        let outcome = controller.handle_turn(&mut session, utterance).await?;
        say(&mut stdout, outcome.reply()).await?;

        if outcome.is_completed() {
            break;
        }
    }

    Ok(())
}

fn build_oracle(config: &AppConfig) -> Arc<dyn GenerationOracle> {
    // validate() has already established the key is present.
    let api_key = config.ai.openai_api_key.clone().unwrap_or_default();

    let oracle_config = OpenAiConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries)
        .with_temperature(config.ai.temperature);

    Arc::new(OpenAiOracle::new(oracle_config))
}

fn build_store(config: &AppConfig) -> Arc<dyn UpdateStore> {
    match config.store.backend {
        StoreBackend::File => Arc::new(FileUpdateStore::new(&config.store.file_path)),
        StoreBackend::Qdrant => {
            let url = config.store.qdrant_url.clone().unwrap_or_default();
            let mut qdrant_config = QdrantConfig::new(url)
                .with_collection(config.store.qdrant_collection.clone())
                .with_timeout(config.store.timeout());
            if let Some(key) = &config.store.qdrant_api_key {
                qdrant_config = qdrant_config.with_api_key(key.clone());
            }
            Arc::new(QdrantUpdateStore::new(qdrant_config))
        }
    }
}

async fn say(stdout: &mut io::Stdout, message: &str) -> io::Result<()> {
    stdout.write_all(format!("\n{}\n\n> ", message).as_bytes()).await?;
    stdout.flush().await
}
