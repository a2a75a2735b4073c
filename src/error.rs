use thiserror::Error;

pub type Result<T> = std::result::Result<T, HydroError>;

// Errors raised by the runoff engine and its lookup tables
#[derive(Error, Debug)]
pub enum HydroError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("failed to parse land-use table: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read land-use table: {0}")]
    Io(#[from] std::io::Error),
}

impl HydroError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        tracing::warn!(name, value, reason, "rejected parameter");
        HydroError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, HydroError::InvalidParameter { .. })
    }
}
