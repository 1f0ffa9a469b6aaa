use thiserror::Error;

/// Unified error type for Easel.
#[derive(Error, Debug)]
pub enum EaselError {
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("HTTP transport failure: {0}")]
    Transport(String),

    #[error("HTTP request failed with status: {0}")]
    HttpStatus(u16),

    #[error("Invalid JSON response received from polling URL")]
    InvalidJson,

    #[error("Proxied request failed with HTTP code: {0}")]
    ProxyHttp(i64),

    #[error("Proxied response contains invalid JSON in contents field")]
    ProxyContentsInvalidJson,

    #[error("Response data missing expected fields ({})", .fields.join(", "))]
    MissingExpectedFields { fields: Vec<&'static str> },

    #[error("API returned error response: {0}")]
    UpstreamErrorField(String),

    #[error("Response data appears to be in unexpected format")]
    UnexpectedShape,

    #[error("Response data is empty or null")]
    EmptyResponse,

    #[error("Template execution failed: {0}")]
    TemplateExecution(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EaselError {
    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            EaselError::PluginNotFound(_) => "plugin_not_found",
            EaselError::Transport(_) => "transport",
            EaselError::HttpStatus(_) => "http_status",
            EaselError::InvalidJson => "invalid_json",
            EaselError::ProxyHttp(_) => "proxy_http",
            EaselError::ProxyContentsInvalidJson => "proxy_contents_invalid_json",
            EaselError::MissingExpectedFields { .. } => "missing_expected_fields",
            EaselError::UpstreamErrorField(_) => "upstream_error_field",
            EaselError::UnexpectedShape => "unexpected_shape",
            EaselError::EmptyResponse => "empty_response",
            EaselError::TemplateExecution(_) => "template_execution",
            EaselError::Config(_) => "config",
            EaselError::Serde(_) => "serde",
        }
    }

    /// Whether this failure was produced by response validation rather
    /// than the transport or the local pipeline.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EaselError::ProxyHttp(_)
                | EaselError::ProxyContentsInvalidJson
                | EaselError::MissingExpectedFields { .. }
                | EaselError::UpstreamErrorField(_)
                | EaselError::UnexpectedShape
                | EaselError::EmptyResponse
        )
    }
}
