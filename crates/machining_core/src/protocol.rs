//! Protocolo de comunicação MCP (envelope JSON).
//!
//! Formato do envelope:
//!
//! ```text
//! {
//!   "header":  { "protocol_version": "1.0", "message_id": "<uuid v4>", "timestamp": "..." },
//!   "context": { <CuttingData> },
//!   "payload": { "request": "模擬切削資料匯報" }
//! }
//! ```
//!
//! - `header.timestamp` é sempre cópia de `context.timestamp`
//! - `message_id` é único por envelope (UUID v4)
//! - Corpo JSON UTF-8, enviado via `POST /mcp/data`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::CuttingData;

/// Versão atual do protocolo.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Caminho do endpoint de ingestão no receiver.
pub const DATA_PATH: &str = "/mcp/data";

/// Marcador fixo do payload: "relatório simulado de dados de corte".
/// Mantido idêntico ao que os receivers existentes esperam.
pub const REPORT_REQUEST: &str = "模擬切削資料匯報";

/// Erros do protocolo.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Corpo vazio")]
    Empty,

    #[error("Versão incompatível: {0} (suportada: {PROTOCOL_VERSION})")]
    VersionMismatch(String),

    #[error("Erro de serialização: {0}")]
    Serialize(String),

    #[error("Erro de deserialização: {0}")]
    Deserialize(String),
}

/// Metadados do envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Header {
    pub protocol_version: String,
    pub message_id: Uuid,
    pub timestamp: String,
}

/// Conteúdo estático que marca a mensagem como relatório simulado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    pub request: String,
}

/// Envelope transmitido ao receiver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub header: Header,
    pub context: CuttingData,
    pub payload: Payload,
}

impl Envelope {
    pub fn message_id(&self) -> Uuid {
        self.header.message_id
    }
}

/// Empacota uma leitura num [`Envelope`] com um `message_id` novo.
pub fn pack_message(data: &CuttingData) -> Envelope {
    pack_message_with_id(data, Uuid::new_v4())
}

/// Empacota uma leitura usando o `message_id` informado.
pub fn pack_message_with_id(data: &CuttingData, message_id: Uuid) -> Envelope {
    Envelope {
        header: Header {
            protocol_version: PROTOCOL_VERSION.to_string(),
            message_id,
            timestamp: data.timestamp.clone(),
        },
        context: data.clone(),
        payload: Payload {
            request: REPORT_REQUEST.to_string(),
        },
    }
}

/// Codifica um [`Envelope`] como corpo JSON.
pub fn encode_envelope(envelope: &Envelope) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(envelope).map_err(|e| ProtocolError::Serialize(e.to_string()))
}

/// Decodifica um corpo JSON em [`Envelope`].
///
/// Valida a versão do protocolo após deserializar.
pub fn decode_envelope(data: &[u8]) -> Result<Envelope, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::Empty);
    }

    let envelope: Envelope =
        serde_json::from_slice(data).map_err(|e| ProtocolError::Deserialize(e.to_string()))?;

    if envelope.header.protocol_version != PROTOCOL_VERSION {
        return Err(ProtocolError::VersionMismatch(
            envelope.header.protocol_version,
        ));
    }

    Ok(envelope)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ReadingGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn sample_reading() -> CuttingData {
        CuttingData {
            timestamp: "2024-01-01T00:00:00".into(),
            tool_id: "T01".into(),
            spindle_speed: 1500.0,
            feed_rate: 0.1,
            cutting_force: 300.0,
            temperature: 50.0,
            vibration: 0.02,
            wear_level: 0.05,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= f64::EPSILON * a.abs().max(1.0)
    }

    #[test]
    fn packs_fixed_reading() {
        let reading = sample_reading();
        let envelope = pack_message(&reading);

        assert_eq!(envelope.context, reading);
        assert_eq!(envelope.payload.request, REPORT_REQUEST);
        assert_eq!(envelope.header.protocol_version, "1.0");
        assert_eq!(envelope.header.timestamp, "2024-01-01T00:00:00");
    }

    #[test]
    fn header_timestamp_matches_context() {
        let mut generator = ReadingGenerator::with_rng("T01", StdRng::seed_from_u64(9));
        for _ in 0..100 {
            let envelope = pack_message(&generator.generate());
            assert_eq!(envelope.header.timestamp, envelope.context.timestamp);
            assert_eq!(envelope.header.protocol_version, PROTOCOL_VERSION);
        }
    }

    #[test]
    fn message_ids_are_unique() {
        let reading = sample_reading();
        let ids: HashSet<Uuid> = (0..10_000)
            .map(|_| pack_message(&reading).message_id())
            .collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn pack_with_id_is_deterministic() {
        let id = Uuid::new_v4();
        let a = pack_message_with_id(&sample_reading(), id);
        let b = pack_message_with_id(&sample_reading(), id);
        assert_eq!(a, b);
    }

    #[test]
    fn wire_shape_matches_mcp_format() {
        let envelope = pack_message(&sample_reading());
        let value: serde_json::Value =
            serde_json::from_slice(&encode_envelope(&envelope).unwrap()).unwrap();

        assert_eq!(value["header"]["protocol_version"], "1.0");
        assert_eq!(
            value["header"]["message_id"],
            envelope.message_id().to_string()
        );
        assert_eq!(value["context"]["spindle_speed"], 1500.0);
        assert_eq!(value["payload"]["request"], REPORT_REQUEST);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut generator = ReadingGenerator::with_rng("T07", StdRng::seed_from_u64(11));
        let original = pack_message(&generator.generate());
        let decoded = decode_envelope(&encode_envelope(&original).unwrap()).unwrap();

        assert_eq!(decoded.header, original.header);
        assert_eq!(decoded.payload, original.payload);
        assert_eq!(decoded.context.tool_id, original.context.tool_id);
        assert!(close(decoded.context.spindle_speed, original.context.spindle_speed));
        assert!(close(decoded.context.feed_rate, original.context.feed_rate));
        assert!(close(decoded.context.cutting_force, original.context.cutting_force));
        assert!(close(decoded.context.temperature, original.context.temperature));
        assert!(close(decoded.context.vibration, original.context.vibration));
        assert!(close(decoded.context.wear_level, original.context.wear_level));
    }

    #[test]
    fn rejects_empty_body() {
        assert!(matches!(decode_envelope(b""), Err(ProtocolError::Empty)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            decode_envelope(br#"{"a":1}"#),
            Err(ProtocolError::Deserialize(_))
        ));
    }

    #[test]
    fn rejects_wrong_version() {
        let mut envelope = pack_message(&sample_reading());
        envelope.header.protocol_version = "2.0".into();
        let encoded = encode_envelope(&envelope).unwrap();
        assert!(matches!(
            decode_envelope(&encoded),
            Err(ProtocolError::VersionMismatch(v)) if v == "2.0"
        ));
    }
}
