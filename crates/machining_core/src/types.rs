//! Definição de tipos/structs para telemetria de usinagem.
//!
//! Uma leitura ([`CuttingData`]) é criada a cada tick, empacotada num
//! envelope e descartada após o envio.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Faixas dos sensores
// ──────────────────────────────────────────────

/// Faixa fechada `[min, max]` de um sensor simulado.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRange {
    pub min: f64,
    pub max: f64,
}

impl SensorRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `true` se `value` está dentro da faixa (inclusive nas duas pontas).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Rotação do spindle (RPM).
pub const SPINDLE_SPEED_RANGE: SensorRange = SensorRange::new(800.0, 2000.0);
/// Avanço (mm/rev).
pub const FEED_RATE_RANGE: SensorRange = SensorRange::new(0.05, 0.3);
/// Força de corte (N).
pub const CUTTING_FORCE_RANGE: SensorRange = SensorRange::new(100.0, 500.0);
/// Temperatura (°C).
pub const TEMPERATURE_RANGE: SensorRange = SensorRange::new(30.0, 70.0);
/// Vibração (mm).
pub const VIBRATION_RANGE: SensorRange = SensorRange::new(0.0, 0.05);
/// Desgaste da ferramenta (mm).
pub const WEAR_LEVEL_RANGE: SensorRange = SensorRange::new(0.0, 0.1);

// ──────────────────────────────────────────────
// Leitura
// ──────────────────────────────────────────────

/// Uma amostra simulada dos sensores de uma ferramenta de corte.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CuttingData {
    /// Horário local da amostra, ISO-8601
    pub timestamp: String,
    /// Identificador da ferramenta (fixo por gerador)
    pub tool_id: String,
    pub spindle_speed: f64,
    pub feed_rate: f64,
    pub cutting_force: f64,
    pub temperature: f64,
    pub vibration: f64,
    pub wear_level: f64,
}

impl CuttingData {
    /// Verifica se todos os campos numéricos estão nas faixas documentadas.
    pub fn is_within_ranges(&self) -> bool {
        SPINDLE_SPEED_RANGE.contains(self.spindle_speed)
            && FEED_RATE_RANGE.contains(self.feed_rate)
            && CUTTING_FORCE_RANGE.contains(self.cutting_force)
            && TEMPERATURE_RANGE.contains(self.temperature)
            && VIBRATION_RANGE.contains(self.vibration)
            && WEAR_LEVEL_RANGE.contains(self.wear_level)
    }
}
