use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use crate::error::AuthError;
use crate::models::{AuthResponse, LoginCredentials, RegisterData, Sex, User};
use crate::utils::simulate_latency;

/// Servicio externo de credenciales (mock en esta app, API real en producción).
/// Cada llamada se resuelve o falla exactamente una vez, sin reintentos.
#[async_trait(?Send)]
pub trait AuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AuthError>;
    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, AuthError>;
}

const DEMO_EMAIL: &str = "joao@email.com";
const DEMO_PASSWORD: &str = "senha123";
const TAKEN_EMAIL: &str = "usuario@existente.com";
const TAKEN_CPF: &str = "111.111.111-11";

/// API mock sobre datos estáticos, con latencia simulada
#[derive(Clone, Debug)]
pub struct MockAuthService {
    login_latency_ms: u32,
    register_latency_ms: u32,
}

impl MockAuthService {
    pub fn new(login_latency_ms: u32, register_latency_ms: u32) -> Self {
        Self {
            login_latency_ms,
            register_latency_ms,
        }
    }

    /// Sin latencia (tests / entornos sin timers)
    pub fn instant() -> Self {
        Self::new(0, 0)
    }

    fn mock_token() -> String {
        format!("mock-jwt-token-{}", Utc::now().timestamp_millis())
    }

    fn demo_user(email: &str) -> User {
        User {
            id: "u175493982627".to_string(),
            name: "João da Silva".to_string(),
            email: email.to_string(),
            tax_id: "123.456.789-00".to_string(),
            sex: Sex::Male,
            birth_date: "1990-05-15".to_string(),
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: "2024-01-15T10:30:00Z".to_string(),
        }
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        let latency = &crate::config::CONFIG.latency;
        Self::new(latency.login_ms, latency.register_ms)
    }
}

#[async_trait(?Send)]
impl AuthService for MockAuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AuthError> {
        simulate_latency(self.login_latency_ms).await;

        if credentials.email == DEMO_EMAIL && credentials.password == DEMO_PASSWORD {
            log::info!("🔐 [MOCK] Login aceptado para {}", credentials.email);
            return Ok(AuthResponse {
                user: Self::demo_user(&credentials.email),
                token: Self::mock_token(),
                message: "Login realizado com sucesso".to_string(),
            });
        }

        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::Rejected("E-mail e senha são obrigatórios".to_string()));
        }

        log::warn!("🔐 [MOCK] Credenciales inválidas para {}", credentials.email);
        Err(AuthError::Rejected("Credenciais inválidas".to_string()))
    }

    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, AuthError> {
        simulate_latency(self.register_latency_ms).await;

        if data.name.is_empty() || data.email.is_empty() || data.tax_id.is_empty() || data.password.is_empty() {
            return Err(AuthError::Rejected("Todos os campos são obrigatórios".to_string()));
        }
        if data.email == TAKEN_EMAIL {
            return Err(AuthError::Rejected("E-mail já cadastrado".to_string()));
        }
        if data.tax_id == TAKEN_CPF {
            return Err(AuthError::Rejected("CPF já cadastrado".to_string()));
        }

        let now = Utc::now();
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let user = User {
            id: format!("u{}", now.timestamp_millis()),
            name: data.name.clone(),
            email: data.email.clone(),
            tax_id: data.tax_id.clone(),
            sex: data.sex,
            birth_date: data.birth_date.clone(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        log::info!("📝 [MOCK] Usuario cadastrado: {} ({})", user.email, user.id);

        Ok(AuthResponse {
            user,
            token: Self::mock_token(),
            message: "Usuário cadastrado com sucesso".to_string(),
        })
    }
}
