// ============================================================================
// APP - Composición de estados, servicios y adaptadores del navegador
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;
use crate::dom::DocumentThemePresenter;
use crate::services::{CollectionPointService, MediaQueryThemeSource, MockAuthService};
use crate::state::{AuthState, ThemeState};
use crate::utils::{KeyValueStore, LocalStorageStore};
use crate::viewmodels::{AuthViewModel, CollectionPointsViewModel};

/// Aplicación principal. Al soltarla se liberan el listener del tema del
/// sistema y las suscripciones de los estados.
pub struct App {
    pub theme: ThemeState,
    pub auth: AuthState,
    pub auth_vm: AuthViewModel,
    pub collection_points_vm: CollectionPointsViewModel,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        if !LocalStorageStore::is_available() {
            log::warn!("⚠️ [APP] localStorage no disponible, las preferencias no se guardarán");
        }
        let storage: Rc<dyn KeyValueStore> = Rc::new(LocalStorageStore::new());

        let system = MediaQueryThemeSource::new();
        let presenter = Rc::new(DocumentThemePresenter::new(
            CONFIG.ui_config.theme_transition_ms,
        ));
        let theme = ThemeState::new(storage.clone(), &system, presenter);

        let auth = AuthState::new(storage, Rc::new(MockAuthService::default()));
        let auth_vm = AuthViewModel::new(auth.clone());
        let collection_points_vm = CollectionPointsViewModel::new(
            auth.clone(),
            CollectionPointService::seeded(),
            CONFIG.latency.cep_ms,
        );

        auth.subscribe(|snapshot| {
            log::debug!("🔐 [APP] Estado de auth: {:?}", snapshot.status);
        });

        log::info!(
            "✅ [APP] Inicializada (tema: {}, autenticado: {})",
            theme.theme().as_str(),
            auth.is_authenticated()
        );

        Ok(Self {
            theme,
            auth,
            auth_vm,
            collection_points_vm,
        })
    }
}
