//! # Machining Receiver
//!
//! Servidor HTTP mínimo que recebe envelopes MCP do Sender via
//! `POST /mcp/data` e registra cada um no log. `GET /` serve de health check.
//!
//! Ctrl-C encerra o servidor após as requisições em andamento.

mod routes;

use machining_core::config::AppConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    let errors = config.receiver.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Config inválida: {e}");
        }
        return Ok(());
    }

    // ── Servidor HTTP ──
    let addr = config.receiver.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Falha ao bind {addr}: {e}");
            return Err(e);
        }
    };
    info!("Receiver escutando em http://{addr}");

    axum::serve(listener, routes::router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Receiver encerrado");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Falha ao instalar handler de Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
