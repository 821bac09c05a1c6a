//! The `quizforge serve` command.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizforge_core::generator::McqGenerator;
use quizforge_core::store::{JsonFileStore, MemoryStore, TestStore};
use quizforge_providers::load_config_from;
use quizforge_server::AppState;

pub async fn execute(
    host: String,
    port: u16,
    in_memory: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address: {host}:{port}"))?;

    let config = load_config_from(config_path.as_deref())?;
    let spec = config.model_spec(None)?;
    // Fails here, before binding, when the provider has no usable key.
    let provider = config.build_provider(&spec.provider)?;
    let generator = McqGenerator::new(
        Arc::from(provider),
        config.generator_config(&spec.model, None),
    );

    let store: Arc<dyn TestStore> = if in_memory {
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("saving tests to {}", config.tests_dir.display());
        Arc::new(JsonFileStore::new(config.tests_dir.clone()))
    };

    let state = AppState::new(
        generator,
        store,
        config.classes.clone(),
        config.default_question_count,
    );

    tracing::info!(provider = %spec.provider, model = %spec.model, "MCQ generation ready");
    quizforge_server::serve(addr, state).await
}
