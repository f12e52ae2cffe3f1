//! Loop periódico: gera → empacota → entrega → dorme.
//!
//! A pausa é fixa e começa depois que a entrega termina, então o período
//! real é `interval + latência do envio`. Não é um relógio de taxa fixa.

use std::future::Future;
use std::time::Duration;

use machining_core::config::SenderConfig;
use machining_core::generator::ReadingGenerator;
use machining_core::protocol::pack_message;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::transport::Delivery;

/// Contadores acumulados pelo loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    pub ticks: u64,
    pub delivered: u64,
    pub failed: u64,
}

/// Coletor de dados simulados de uma ferramenta.
pub struct DataCollector<R = StdRng> {
    generator: ReadingGenerator<R>,
    interval: Duration,
}

impl DataCollector<StdRng> {
    pub fn from_config(config: &SenderConfig) -> Self {
        Self::new(ReadingGenerator::new(config.tool_id.clone()), config.interval())
    }
}

impl<R: Rng> DataCollector<R> {
    pub fn new(generator: ReadingGenerator<R>, interval: Duration) -> Self {
        Self {
            generator,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Roda até `shutdown` completar. O sinal só é observado durante a
    /// pausa entre ticks, então uma entrega em andamento nunca é cortada.
    pub async fn run<D, S>(&mut self, delivery: &D, shutdown: S) -> CollectorStats
    where
        D: Delivery,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut stats = CollectorStats::default();

        loop {
            let reading = self.generator.generate();
            let envelope = pack_message(&reading);
            stats.ticks += 1;

            match delivery.deliver(&envelope).await {
                Ok(id) => {
                    stats.delivered += 1;
                    info!(
                        "[OK] Enviado {id} | {} rpm | {:.0} N | {:.1}°C",
                        reading.spindle_speed as u32, reading.cutting_force, reading.temperature
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("[Erro] Falha ao enviar {}: {e}", envelope.message_id());
                }
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Sinal de parada recebido após {} ticks", stats.ticks);
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        stats
    }
}
