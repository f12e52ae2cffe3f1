//! Gerador de leituras simuladas.
//!
//! Cada campo numérico é sorteado de forma independente e uniforme dentro
//! da sua faixa em [`crate::types`].

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::*;

/// Formato ISO-8601 local, com microssegundos e sem offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Gera uma [`CuttingData`] por chamada para uma ferramenta fixa.
pub struct ReadingGenerator<R = StdRng> {
    tool_id: String,
    rng: R,
}

impl ReadingGenerator<StdRng> {
    /// Cria um gerador com semente vinda da entropia do SO.
    pub fn new(tool_id: impl Into<String>) -> Self {
        Self::with_rng(tool_id, StdRng::from_entropy())
    }
}

impl<R: Rng> ReadingGenerator<R> {
    /// Cria um gerador com uma fonte aleatória injetada (testes usam semente fixa).
    pub fn with_rng(tool_id: impl Into<String>, rng: R) -> Self {
        Self {
            tool_id: tool_id.into(),
            rng,
        }
    }

    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    /// Produz uma nova leitura com o horário local atual.
    pub fn generate(&mut self) -> CuttingData {
        CuttingData {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            tool_id: self.tool_id.clone(),
            spindle_speed: self.sample(SPINDLE_SPEED_RANGE),
            feed_rate: self.sample(FEED_RATE_RANGE),
            cutting_force: self.sample(CUTTING_FORCE_RANGE),
            temperature: self.sample(TEMPERATURE_RANGE),
            vibration: self.sample(VIBRATION_RANGE),
            wear_level: self.sample(WEAR_LEVEL_RANGE),
        }
    }

    fn sample(&mut self, range: SensorRange) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }
}
