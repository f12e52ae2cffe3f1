//! # Machining Core
//!
//! Crate compartilhada que define a leitura simulada de usinagem, o
//! envelope MCP (JSON), o gerador de leituras e a configuração TOML.
//!
//! ## Módulos
//! - [`types`] – Leitura de corte e faixas dos sensores
//! - [`generator`] – Geração aleatória de leituras
//! - [`protocol`] – Envelope MCP, empacotamento e encode/decode JSON
//! - [`config`] – Configuração unificada via TOML

pub mod types;
pub mod generator;
pub mod protocol;
pub mod config;

// Re-exports convenientes
pub use types::CuttingData;
pub use generator::ReadingGenerator;
pub use protocol::{Envelope, encode_envelope, decode_envelope, pack_message, PROTOCOL_VERSION};
pub use config::{AppConfig, SenderConfig, ReceiverConfig};
