// ============================================================================
// AUTH STATE - Estado de autenticación / sesión
// ============================================================================
// Uninitialized → Restoring → { Anonymous | Authenticated }
// login/register pasan por Pending y vuelven a un estado estable.
// Usuario y token se guardan y se borran siempre juntos.
// ============================================================================

use std::rc::Rc;

use crate::error::AuthError;
use crate::models::{AuthResponse, LoginCredentials, RegisterData, Session, User};
use crate::services::AuthService;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::{load_json, save_json, KeyValueStore, STORAGE_KEY_TOKEN, STORAGE_KEY_USER};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Uninitialized,
    Restoring,
    Anonymous,
    Authenticated,
    Pending,
}

/// Foto del estado que reciben los subscribers
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSnapshot {
    pub status: AuthStatus,
    pub session: Option<Session>,
    pub last_error: Option<String>,
}

impl AuthSnapshot {
    fn uninitialized() -> Self {
        Self {
            status: AuthStatus::Uninitialized,
            session: None,
            last_error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, AuthStatus::Restoring | AuthStatus::Pending)
    }

    fn steady_status(&self) -> AuthStatus {
        if self.session.is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        }
    }
}

struct AuthInner {
    snapshot: ReactiveState<AuthSnapshot>,
    storage: Rc<dyn KeyValueStore>,
    service: Rc<dyn AuthService>,
}

/// Estado de autenticación. Clonar es barato: todos los clones comparten estado.
#[derive(Clone)]
pub struct AuthState {
    inner: Rc<AuthInner>,
}

impl AuthState {
    /// Crea el estado y restaura la sesión guardada
    pub fn new(storage: Rc<dyn KeyValueStore>, service: Rc<dyn AuthService>) -> Self {
        let state = Self {
            inner: Rc::new(AuthInner {
                snapshot: ReactiveState::new(AuthSnapshot::uninitialized()),
                storage,
                service,
            }),
        };
        state.restore_session();
        state
    }

    /// Lee usuario + token de localStorage. Datos incompletos o corruptos se
    /// descartan (ambas claves) y se queda como anónimo. Nunca falla.
    pub fn restore_session(&self) {
        self.inner.snapshot.update(|s| s.status = AuthStatus::Restoring);

        let session = self.read_stored_session();
        if session.is_none() {
            self.clear_stored_session();
        }

        self.inner.snapshot.update(|s| {
            s.status = if session.is_some() {
                AuthStatus::Authenticated
            } else {
                AuthStatus::Anonymous
            };
            s.session = session;
        });
    }

    fn read_stored_session(&self) -> Option<Session> {
        let storage = self.inner.storage.as_ref();

        let token = match storage.get(STORAGE_KEY_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::error!("❌ [AUTH] Error leyendo token guardado: {}", e);
                None
            }
        };

        let user = match load_json::<User>(storage, STORAGE_KEY_USER) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("⚠️ [AUTH] Usuario guardado corrupto, se descarta: {}", e);
                None
            }
        };

        match (user, token) {
            (Some(user), Some(token)) => {
                log::info!("✅ [AUTH] Sesión restaurada para {}", user.email);
                Some(Session { user, token })
            }
            (None, None) => {
                log::info!("ℹ️ [AUTH] No hay sesión guardada");
                None
            }
            _ => {
                log::warn!("⚠️ [AUTH] Sesión guardada incompleta, se limpia localStorage");
                None
            }
        }
    }

    fn persist_session(&self, session: &Session) {
        let storage = self.inner.storage.as_ref();
        if let Err(e) = storage.set(STORAGE_KEY_TOKEN, &session.token) {
            log::error!("❌ [AUTH] Error guardando token: {}", e);
        }
        if let Err(e) = save_json(storage, STORAGE_KEY_USER, &session.user) {
            log::error!("❌ [AUTH] Error guardando usuario: {}", e);
        }
    }

    fn clear_stored_session(&self) {
        for key in [STORAGE_KEY_TOKEN, STORAGE_KEY_USER] {
            if let Err(e) = self.inner.storage.remove(key) {
                log::warn!("⚠️ [AUTH] Error limpiando {}: {}", key, e);
            }
        }
    }

    fn begin_pending(&self) {
        self.inner.snapshot.update(|s| {
            s.status = AuthStatus::Pending;
            s.last_error = None;
        });
    }

    // Único punto que resuelve un Pending. Sin coordinación entre llamadas
    // solapadas: la última respuesta en llegar es la que queda.
    fn finish(&self, result: Result<AuthResponse, AuthError>) -> Result<User, AuthError> {
        match result {
            Ok(response) => {
                log::info!("✅ [AUTH] {}", response.message);
                let session = Session::from(response);
                self.persist_session(&session);
                let user = session.user.clone();
                self.inner.snapshot.update(|s| {
                    s.session = Some(session);
                    s.status = AuthStatus::Authenticated;
                    s.last_error = None;
                });
                Ok(user)
            }
            Err(e) => {
                log::error!("❌ [AUTH] {}", e);
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn fail(&self, error: &AuthError) {
        self.inner.snapshot.update(|s| {
            s.status = s.steady_status();
            s.last_error = Some(error.message().to_string());
        });
    }

    /// Login contra el servicio de credenciales. El error se devuelve al
    /// llamador para que la UI lo muestre; la sesión actual no se toca.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<User, AuthError> {
        log::info!("🔐 [AUTH] Login para {}", credentials.email);
        self.begin_pending();
        let result = self.inner.service.login(&credentials).await;
        self.finish(result)
    }

    /// Cadastro. Si las contraseñas no coinciden falla sin llamar al servicio.
    pub async fn register(&self, data: RegisterData) -> Result<User, AuthError> {
        if !data.passwords_match() {
            let error = AuthError::Validation("As senhas não coincidem".to_string());
            log::warn!("⚠️ [AUTH] {}", error);
            self.fail(&error);
            return Err(error);
        }

        log::info!("📝 [AUTH] Cadastro para {}", data.email);
        self.begin_pending();
        let result = self.inner.service.register(&data).await;
        self.finish(result)
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout");
        self.inner.snapshot.update(|s| {
            s.session = None;
            s.status = AuthStatus::Anonymous;
            s.last_error = None;
        });
        self.clear_stored_session();
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.inner.snapshot.get()
    }

    pub fn status(&self) -> AuthStatus {
        self.inner.snapshot.with(|s| s.status)
    }

    pub fn user(&self) -> Option<User> {
        self.inner.snapshot.with(|s| s.session.as_ref().map(|session| session.user.clone()))
    }

    pub fn token(&self) -> Option<String> {
        self.inner.snapshot.with(|s| s.session.as_ref().map(|session| session.token.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.snapshot.with(AuthSnapshot::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.snapshot.with(AuthSnapshot::is_loading)
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.snapshot.with(|s| s.last_error.clone())
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&AuthSnapshot) + 'static,
    {
        self.inner.snapshot.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.snapshot.unsubscribe(id)
    }
}
