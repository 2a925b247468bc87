// ============================================================================
// ERRORES - Taxonomía de errores de la app
// ============================================================================
// - Validation: precondición del lado del cliente (no se llama al servicio)
// - Rejected: el servicio de credenciales rechazó la operación
// - Storage: fallo de localStorage, se loguea y nunca llega al usuario
// ============================================================================

use thiserror::Error;

/// Error de autenticación. `Display` es el mensaje legible para la UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Rejected(String),
}

impl AuthError {
    pub fn message(&self) -> &str {
        match self {
            AuthError::Validation(msg) | AuthError::Rejected(msg) => msg,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::Validation(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,
    #[error("Error leyendo '{key}' de localStorage: {reason}")]
    Read { key: String, reason: String },
    #[error("Error guardando '{key}' en localStorage: {reason}")]
    Write { key: String, reason: String },
    #[error("Error eliminando '{key}' de localStorage: {reason}")]
    Remove { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionPointError {
    #[error("Ponto de coleta não encontrado: {0}")]
    NotFound(String),
    #[error("Ponto de coleta {0} pertence a outro usuário")]
    Forbidden(String),
    #[error("Dados do ponto de coleta inválidos")]
    Invalid(crate::utils::validation::FormErrors),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CepError {
    #[error("CEP não encontrado")]
    NotFound,
}
