// ============================================================================
// MONITOR DEL TEMA DEL SISTEMA
// ============================================================================
// Lee `(prefers-color-scheme: dark)` y escucha sus cambios. El listener vive
// lo que viva el `SystemThemeWatch` devuelto: al soltarlo se desregistra.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::utils::PREFERS_DARK_QUERY;

/// Fuente de la preferencia de tema del sistema operativo
pub trait SystemThemeSource {
    fn prefers_dark(&self) -> bool;

    /// `on_change` recibe el nuevo valor de "prefers dark"
    fn watch(&self, on_change: Box<dyn Fn(bool)>) -> SystemThemeWatch;
}

/// Guard de la suscripción al tema del sistema
#[must_use = "la suscripción se cancela al soltar el guard"]
pub struct SystemThemeWatch {
    release: Option<Box<dyn FnOnce()>>,
}

impl SystemThemeWatch {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard sin listener (entorno sin matchMedia)
    pub fn inactive() -> Self {
        Self { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for SystemThemeWatch {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// `window.matchMedia("(prefers-color-scheme: dark)")`
pub struct MediaQueryThemeSource {
    query: Option<MediaQueryList>,
}

impl MediaQueryThemeSource {
    pub fn new() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok())
            .flatten();
        if query.is_none() {
            log::warn!("⚠️ [THEME] matchMedia no disponible, se asume tema claro");
        }
        Self { query }
    }
}

impl Default for MediaQueryThemeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemThemeSource for MediaQueryThemeSource {
    fn prefers_dark(&self) -> bool {
        self.query.as_ref().map(|mq| mq.matches()).unwrap_or(false)
    }

    fn watch(&self, on_change: Box<dyn Fn(bool)>) -> SystemThemeWatch {
        let Some(query) = self.query.clone() else {
            return SystemThemeWatch::inactive();
        };

        let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            on_change(event.matches());
        }) as Box<dyn FnMut(MediaQueryListEvent)>);

        if let Err(e) = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            log::error!("❌ [THEME] No se pudo registrar listener de matchMedia: {:?}", e);
            return SystemThemeWatch::inactive();
        }
        log::info!("✅ [THEME] Listener de tema del sistema registrado");

        // El closure se mueve al guard: sin forget(), se libera al desregistrar
        SystemThemeWatch::new(move || {
            if let Err(e) = query.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
                log::warn!("⚠️ [THEME] Error desregistrando listener de matchMedia: {:?}", e);
            }
            drop(closure);
            log::info!("🔌 [THEME] Listener de tema del sistema liberado");
        })
    }
}

type Listener = (u64, Rc<dyn Fn(bool)>);

#[derive(Default)]
struct ManualInner {
    prefers_dark: bool,
    listeners: Vec<Listener>,
    next_id: u64,
}

/// Fuente controlada manualmente (tests y entornos sin navegador).
/// Los clones comparten estado.
#[derive(Clone, Default)]
pub struct ManualThemeSource {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualThemeSource {
    pub fn new(prefers_dark: bool) -> Self {
        let source = Self::default();
        source.inner.borrow_mut().prefers_dark = prefers_dark;
        source
    }

    /// Cambia la preferencia y notifica a los listeners activos
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let listeners: Vec<Rc<dyn Fn(bool)>> = {
            let mut inner = self.inner.borrow_mut();
            inner.prefers_dark = prefers_dark;
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(prefers_dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl SystemThemeSource for ManualThemeSource {
    fn prefers_dark(&self) -> bool {
        self.inner.borrow().prefers_dark
    }

    fn watch(&self, on_change: Box<dyn Fn(bool)>) -> SystemThemeWatch {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::from(on_change)));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        SystemThemeWatch::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}
