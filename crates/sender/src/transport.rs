//! Transporte HTTP: envia cada envelope via `POST <server_url>/mcp/data`.
//!
//! Falhas ficam restritas ao envio: o resultado é devolvido ao loop, que só
//! registra no log. Não há retry nem backoff.

use std::future::Future;

use machining_core::config::SenderConfig;
use machining_core::protocol::{Envelope, ProtocolError, encode_envelope};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use uuid::Uuid;

/// Erros de entrega de um envelope.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Erro de rede: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erro ao codificar envelope: {0}")]
    Encode(#[from] ProtocolError),
}

/// Destino de entrega dos envelopes gerados a cada tick.
///
/// Retorna o `message_id` entregue ou o motivo da falha.
pub trait Delivery {
    fn deliver(&self, envelope: &Envelope) -> impl Future<Output = Result<Uuid, TransportError>>;
}

/// Entrega via HTTP POST com um client reutilizado entre ticks.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &SenderConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Delivery for HttpTransport {
    async fn deliver(&self, envelope: &Envelope) -> Result<Uuid, TransportError> {
        let body = encode_envelope(envelope)?;
        debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(envelope.message_id())
    }
}
