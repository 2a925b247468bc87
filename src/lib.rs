// ============================================================================
// RECICLA365 WEB - ESTADO DE SESIÓN Y TEMA (RUST PURO + WASM)
// ============================================================================
// Arquitectura:
// - State: holders con Rc<RefCell> + subscribers (auth, tema)
// - Services: colaboradores mock (auth, CEP, puntos de coleta) y tema del sistema
// - DOM: presentación del tema sobre <html>, <body> y <meta>
// - ViewModels: lógica de formularios sobre los holders
// - Utils: storage, validación, constantes
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

use std::cell::RefCell;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::models::LoginCredentials;
use crate::viewmodels::{AuthViewModel, SubmitError};

// Instancia global, solo accesible desde la frontera con JS
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para ver los panics en la consola
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Recicla365 ({})", CONFIG.environment);
    if !CONFIG.is_production() {
        log::debug!("⚙️ Config: {:?}", *CONFIG);
    }

    let app = App::new()?;
    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    Ok(())
}

fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow().as_ref().map(f))
}

#[wasm_bindgen]
pub fn toggle_theme() {
    if with_app(|app| app.theme.toggle_theme()).is_none() {
        log::warn!("⚠️ toggle_theme antes de inicializar la app");
    }
}

/// "light" o "dark"
#[wasm_bindgen]
pub fn current_theme() -> String {
    with_app(|app| app.theme.theme())
        .unwrap_or_default()
        .as_str()
        .to_string()
}

/// Resuelve con el usuario en JSON, rechaza con el mensaje de error
#[wasm_bindgen]
pub fn login(email: String, password: String) -> Promise {
    let vm: Option<AuthViewModel> = with_app(|app| app.auth_vm.clone());

    future_to_promise(async move {
        let vm = vm.ok_or_else(|| JsValue::from_str("App no inicializada"))?;
        match vm.submit_login(LoginCredentials::new(email, password)).await {
            Ok(user) => serde_json::to_string(&user)
                .map(|json| JsValue::from_str(&json))
                .map_err(|e| JsValue::from_str(&e.to_string())),
            Err(SubmitError::General(message)) => Err(JsValue::from_str(&message)),
            Err(SubmitError::Fields(errors)) => {
                let message = errors
                    .fields()
                    .filter_map(|field| errors.get(field))
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(JsValue::from_str(&message))
            }
        }
    })
}

#[wasm_bindgen]
pub fn logout() {
    with_app(|app| app.auth.logout());
}

#[wasm_bindgen]
pub fn is_authenticated() -> bool {
    with_app(|app| app.auth.is_authenticated()).unwrap_or(false)
}

