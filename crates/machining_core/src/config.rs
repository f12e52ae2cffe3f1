//! Configuração unificada via TOML.
//!
//! Substitui as constantes fixas (URL, ferramenta, frequência) por um único
//! `config.toml` ao lado do executável.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::protocol::DATA_PATH;

/// Frequência mínima aceita (Hz); abaixo disso o intervalo não cabe num `Duration` útil.
pub const MIN_FREQUENCY_HZ: f64 = 0.001;
/// Frequência máxima aceita (Hz).
pub const MAX_FREQUENCY_HZ: f64 = 1000.0;
/// Timeout máximo de um POST (segundos).
pub const MAX_REQUEST_TIMEOUT_SECS: f64 = 3600.0;

/// Erros ao ler ou persistir a configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro ao serializar TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Erro ao parsear TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Erro de E/S em {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuração do Sender (gerador de leituras).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Identificador da ferramenta simulada
    pub tool_id: String,
    /// Frequência de amostragem (Hz)
    pub frequency_hz: f64,
    /// URL base do receiver (sem o caminho /mcp/data)
    pub server_url: String,
    /// Timeout de cada POST (segundos)
    pub request_timeout_secs: f64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            tool_id: "T01".into(),
            frequency_hz: 10.0,
            server_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 5.0,
        }
    }
}

impl SenderConfig {
    /// Valida os campos do sender e retorna lista de erros.
    ///
    /// Valores aceitos aqui sempre convertem em [`Duration`] sem pânico.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.tool_id.trim().is_empty() {
            errors.push("tool_id do sender não pode ser vazio".into());
        }
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.frequency_hz) {
            errors.push(format!(
                "Frequência do sender inválida: {} Hz ({MIN_FREQUENCY_HZ}–{MAX_FREQUENCY_HZ})",
                self.frequency_hz
            ));
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            errors.push(format!(
                "URL do receiver inválida: {:?} (esperado http:// ou https://)",
                self.server_url
            ));
        }
        if !(self.request_timeout_secs > 0.0 && self.request_timeout_secs <= MAX_REQUEST_TIMEOUT_SECS)
        {
            errors.push(format!(
                "Timeout do sender inválido: {} s (0–{MAX_REQUEST_TIMEOUT_SECS}]",
                self.request_timeout_secs
            ));
        }

        errors
    }

    /// Pausa entre ticks (`1 / frequency_hz`).
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frequency_hz)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_secs)
    }

    /// URL completa do endpoint de ingestão.
    pub fn endpoint(&self) -> String {
        format!("{}{DATA_PATH}", self.server_url.trim_end_matches('/'))
    }
}

/// Configuração do Receiver (servidor HTTP).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// IP local para bind
    pub bind_ip: String,
    /// Porta HTTP
    pub port: u16,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_ip: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

impl ReceiverConfig {
    /// Valida os campos do receiver e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.bind_ip.trim().is_empty() {
            errors.push("bind_ip do receiver não pode ser vazio".into());
        }
        if self.port == 0 {
            errors.push("Porta do receiver não pode ser 0".into());
        }

        errors
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_ip, self.port)
    }
}

/// Configuração raiz do aplicativo (unifica sender e receiver).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sender: SenderConfig,
    pub receiver: ReceiverConfig,
}

impl AppConfig {
    /// Lê e parseia um arquivo TOML; campos ausentes ficam com o padrão.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Carrega a configuração de `path`.
    ///
    /// Nunca falha: arquivo ausente ou inválido resulta na configuração padrão.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("{} não encontrado, usando configuração padrão", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!("Configuração carregada de {}", path.display());
                config
            }
            Err(e) => {
                warn!("{e}; usando configuração padrão");
                Self::default()
            }
        }
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// `config.toml` no diretório do executável (ou no diretório atual).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Valida sender e receiver e retorna a lista combinada de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.sender.validate();
        errors.extend(self.receiver.validate());
        errors
    }
}
