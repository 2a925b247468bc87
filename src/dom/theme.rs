// ============================================================================
// THEME PRESENTER - Aplica el tema al documento
// ============================================================================
// <html data-theme="dark" class="dark">
// <meta name="theme-color" content="#1f2937">
// <body class="theme-transition"> durante la transición
// ============================================================================

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::dom::{add_class, body, document, find_or_create_in_head, remove_classes, root_element};
use crate::models::Theme;
use crate::utils::THEME_TRANSITION_CLASS;

/// Capa de presentación del tema. Aplicar nunca falla hacia el llamador.
pub trait ThemePresenter {
    fn apply(&self, theme: Theme);
}

pub struct DocumentThemePresenter {
    transition_ms: u32,
    // Al soltar el Timeout anterior se cancela (equivale a clearTimeout)
    pending_transition: RefCell<Option<Timeout>>,
}

impl DocumentThemePresenter {
    pub fn new(transition_ms: u32) -> Self {
        Self {
            transition_ms,
            pending_transition: RefCell::new(None),
        }
    }

    fn apply_root(document: &Document, theme: Theme) -> Result<(), JsValue> {
        let html = root_element(document)?;
        html.remove_attribute("data-theme")?;
        remove_classes(&html, &[Theme::Light.as_str(), Theme::Dark.as_str()])?;

        html.set_attribute("data-theme", theme.as_str())?;
        add_class(&html, theme.as_str())
    }

    fn apply_meta_color(document: &Document, theme: Theme) -> Result<(), JsValue> {
        let meta = find_or_create_in_head(
            document,
            "meta[name=\"theme-color\"]",
            "meta",
            &[("name", "theme-color")],
        )?;
        meta.set_attribute("content", theme.meta_color())
    }

    fn start_transition(&self, document: &Document) -> Result<(), JsValue> {
        if self.transition_ms == 0 {
            return Ok(());
        }

        let body = body(document)?;
        body.class_list().add_1(THEME_TRANSITION_CLASS)?;

        let timeout = Timeout::new(self.transition_ms, move || {
            let _ = body.class_list().remove_1(THEME_TRANSITION_CLASS);
        });
        self.pending_transition.replace(Some(timeout));
        Ok(())
    }
}

impl ThemePresenter for DocumentThemePresenter {
    fn apply(&self, theme: Theme) {
        let document = match document() {
            Ok(doc) => doc,
            Err(_) => {
                log::warn!("⚠️ [THEME] Sin document, no se aplica el tema {}", theme.as_str());
                return;
            }
        };

        if let Err(e) = Self::apply_root(&document, theme) {
            log::error!("❌ [THEME] Error aplicando data-theme: {:?}", e);
        }
        if let Err(e) = Self::apply_meta_color(&document, theme) {
            log::error!("❌ [THEME] Error actualizando meta theme-color: {:?}", e);
        }
        if let Err(e) = self.start_transition(&document) {
            log::warn!("⚠️ [THEME] Transición no aplicada: {:?}", e);
        }
    }
}
