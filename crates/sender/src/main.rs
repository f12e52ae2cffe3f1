//! # Machining Sender
//!
//! Gera leituras simuladas de uma ferramenta de corte numa frequência fixa,
//! empacota cada uma num envelope MCP e envia via HTTP POST ao receiver.
//!
//! ## Uso
//! ```bash
//! machining_sender              # usa config.toml ao lado do executável
//! RUST_LOG=debug machining_sender
//! ```
//!
//! Ctrl-C encerra o loop entre dois ticks.

mod collector;
mod transport;

use collector::DataCollector;
use machining_core::config::AppConfig;
use transport::HttpTransport;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    let errors = config.sender.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Config inválida: {e}");
        }
        return;
    }

    let sender_cfg = &config.sender;

    // ── Transporte HTTP ──
    let transport = match HttpTransport::new(sender_cfg) {
        Ok(t) => t,
        Err(e) => {
            error!("Falha ao criar client HTTP: {e}");
            return;
        }
    };

    let mut collector = DataCollector::from_config(sender_cfg);

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ⚙ MACHINING SENDER – ATIVO (Rust)");
    println!("══════════════════════════════════════════════");
    println!("  Destino:    {}", transport.endpoint());
    println!("  Ferramenta: {}", sender_cfg.tool_id);
    println!(
        "  Frequência: {:.1} Hz ({:.0} ms)",
        sender_cfg.frequency_hz,
        collector.interval().as_secs_f64() * 1000.0
    );
    println!("  Protocolo:  MCP JSON v{}", machining_core::PROTOCOL_VERSION);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    let stats = collector.run(&transport, shutdown_signal()).await;

    info!(
        "Sender encerrado: {} ticks | {} enviados | {} falhas",
        stats.ticks, stats.delivered, stats.failed
    );
}

/// Completa no Ctrl-C. Se o handler não puder ser instalado, nunca completa.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Falha ao instalar handler de Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
