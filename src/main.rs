use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use student_support_chat::{
    config::Config,
    routes,
    services::{gemini::GeminiClient, knowledge_base::KnowledgeBase},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Real environment variables win over .env.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    tracing::info!(?config, "configuration loaded");

    let knowledge = KnowledgeBase::load(&config.knowledge_base_path)
        .await
        .context("loading knowledge base")?;
    let generator = GeminiClient::new(config.gemini.clone()).context("building Gemini client")?;

    if !config.static_dir.join("index.html").exists() {
        tracing::warn!(
            static_dir = %config.static_dir.display(),
            "index.html not found, the chat page will not be served"
        );
    }

    let state = Arc::new(AppState::new(Arc::new(generator), knowledge));
    let app = routes::create_router(&config.static_dir).with_state(state);

    let listener = config
        .bind()
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("reading bound address")?;

    tracing::info!("student support chat running at http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
