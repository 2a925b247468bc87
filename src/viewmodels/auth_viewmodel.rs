// ============================================================================
// AUTH VIEWMODEL - Envío de los formularios de login y cadastro
// ============================================================================
// 1. Validación por campo (sin tocar el servicio)
// 2. Una única llamada al AuthState
// 3. Error del servicio → mensaje general para el formulario
// ============================================================================

use crate::error::AuthError;
use crate::models::{LoginCredentials, RegisterData, User};
use crate::state::AuthState;
use crate::utils::validation::{validate_login, validate_registration, FormErrors};

/// Error de envío de un formulario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Errores por campo, se muestran junto a cada input
    Fields(FormErrors),
    /// Mensaje único encima del formulario
    General(String),
}

impl SubmitError {
    pub fn general_message(&self) -> Option<&str> {
        match self {
            SubmitError::General(msg) => Some(msg),
            SubmitError::Fields(_) => None,
        }
    }
}

impl From<AuthError> for SubmitError {
    fn from(error: AuthError) -> Self {
        SubmitError::General(error.message().to_string())
    }
}

/// ViewModel de autenticación - SOLO lógica de formulario
#[derive(Clone)]
pub struct AuthViewModel {
    auth: AuthState,
}

impl AuthViewModel {
    pub fn new(auth: AuthState) -> Self {
        Self { auth }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// El botón de enviar se deshabilita mientras hay una operación en curso
    pub fn can_submit(&self) -> bool {
        !self.auth.is_loading()
    }

    pub async fn submit_login(&self, credentials: LoginCredentials) -> Result<User, SubmitError> {
        validate_login(&credentials)
            .into_result()
            .map_err(SubmitError::Fields)?;

        let user = self.auth.login(credentials).await?;
        Ok(user)
    }

    pub async fn submit_register(&self, data: RegisterData) -> Result<User, SubmitError> {
        validate_registration(&data)
            .into_result()
            .map_err(SubmitError::Fields)?;

        let user = self.auth.register(data).await?;
        Ok(user)
    }

    pub fn logout(&self) {
        self.auth.logout();
    }
}
