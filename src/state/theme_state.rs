// ============================================================================
// THEME STATE - Tema claro/oscuro de la app
// ============================================================================
// Inicialización: localStorage → preferencia del sistema → claro.
// La resolución inicial NO se persiste; solo los cambios explícitos y los
// cambios del sistema (cuando no hay preferencia guardada) se guardan.
// ============================================================================

use std::rc::{Rc, Weak};

use crate::dom::ThemePresenter;
use crate::models::Theme;
use crate::services::system_theme::{SystemThemeSource, SystemThemeWatch};
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::{KeyValueStore, STORAGE_KEY_THEME};

struct ThemeInner {
    theme: ReactiveState<Theme>,
    storage: Rc<dyn KeyValueStore>,
    presenter: Rc<dyn ThemePresenter>,
}

impl ThemeInner {
    fn saved_theme(&self) -> Option<Theme> {
        match self.storage.get(STORAGE_KEY_THEME) {
            Ok(raw) => raw.as_deref().and_then(Theme::parse),
            Err(e) => {
                log::warn!("⚠️ [THEME] No se pudo leer el tema guardado: {}", e);
                None
            }
        }
    }

    fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.storage.set(STORAGE_KEY_THEME, theme.as_str()) {
            log::error!("❌ [THEME] Error guardando tema: {}", e);
        }
    }

    fn change(&self, theme: Theme, persist: bool) {
        self.theme.set(theme);
        self.presenter.apply(theme);
        if persist {
            self.save_theme(theme);
        }
    }

    fn on_system_change(&self, prefers_dark: bool) {
        if self.saved_theme().is_some() {
            log::debug!("🎨 [THEME] Cambio del sistema ignorado: hay preferencia guardada");
            return;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        log::info!("🎨 [THEME] Tema del sistema cambió a {}", theme.as_str());
        self.change(theme, true);
    }
}

/// Estado del tema. Se inyecta en quien lo necesite; soltar el último
/// handle (o `dispose`) libera la suscripción al tema del sistema.
#[derive(Clone)]
pub struct ThemeState {
    inner: Rc<ThemeInner>,
    system_watch: Rc<SystemThemeWatch>,
}

impl ThemeState {
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        system: &dyn SystemThemeSource,
        presenter: Rc<dyn ThemePresenter>,
    ) -> Self {
        let inner = Rc::new(ThemeInner {
            theme: ReactiveState::new(Theme::default()),
            storage,
            presenter,
        });

        let initial = inner
            .saved_theme()
            .unwrap_or_else(|| Theme::from_prefers_dark(system.prefers_dark()));
        log::info!("🎨 [THEME] Tema inicial: {}", initial.as_str());
        inner.change(initial, false);

        let weak: Weak<ThemeInner> = Rc::downgrade(&inner);
        let system_watch = system.watch(Box::new(move |prefers_dark| {
            if let Some(inner) = weak.upgrade() {
                inner.on_system_change(prefers_dark);
            }
        }));

        Self {
            inner,
            system_watch: Rc::new(system_watch),
        }
    }

    /// Tema actual
    pub fn theme(&self) -> Theme {
        self.inner.theme.get()
    }

    pub fn is_dark(&self) -> bool {
        self.theme() == Theme::Dark
    }

    pub fn toggle_theme(&self) {
        self.set_theme(self.theme().toggled());
    }

    pub fn set_theme(&self, theme: Theme) {
        log::info!("🎨 [THEME] Tema seleccionado: {}", theme.as_str());
        self.inner.change(theme, true);
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Theme) + 'static,
    {
        self.inner.theme.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.theme.unsubscribe(id)
    }

    /// Desmontaje explícito de este handle. Devuelve `true` si era el último
    /// y con él se libera el listener del tema del sistema.
    pub fn dispose(self) -> bool {
        let remaining = Rc::strong_count(&self.system_watch) - 1;
        if remaining == 0 {
            log::info!("🔌 [THEME] Último handle de ThemeState liberado");
        } else {
            log::debug!("🔌 [THEME] Handle de ThemeState liberado, quedan {}", remaining);
        }
        remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::system_theme::ManualThemeSource;
    use crate::utils::MemoryStore;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPresenter {
        applied: RefCell<Vec<Theme>>,
    }

    impl ThemePresenter for RecordingPresenter {
        fn apply(&self, theme: Theme) {
            self.applied.borrow_mut().push(theme);
        }
    }

    struct Fixture {
        store: MemoryStore,
        system: ManualThemeSource,
        presenter: Rc<RecordingPresenter>,
    }

    impl Fixture {
        fn new(prefers_dark: bool) -> Self {
            Self {
                store: MemoryStore::new(),
                system: ManualThemeSource::new(prefers_dark),
                presenter: Rc::new(RecordingPresenter::default()),
            }
        }

        fn holder(&self) -> ThemeState {
            ThemeState::new(
                Rc::new(self.store.clone()),
                &self.system,
                self.presenter.clone(),
            )
        }

        fn saved(&self) -> Option<String> {
            self.store.get(STORAGE_KEY_THEME).unwrap()
        }
    }

    #[test]
    fn initial_theme_follows_system_without_persisting() {
        let dark = Fixture::new(true);
        let holder = dark.holder();
        assert_eq!(holder.theme(), Theme::Dark);
        assert!(holder.is_dark());
        assert_eq!(*dark.presenter.applied.borrow(), vec![Theme::Dark]);
        assert_eq!(dark.saved(), None);

        let light = Fixture::new(false);
        assert!(!light.holder().is_dark());
        assert_eq!(light.saved(), None);
    }

    #[test]
    fn saved_theme_wins_over_system() {
        let fx = Fixture::new(true);
        fx.store.set(STORAGE_KEY_THEME, "light").unwrap();
        assert_eq!(fx.holder().theme(), Theme::Light);
    }

    #[test]
    fn garbage_in_storage_is_ignored() {
        let fx = Fixture::new(true);
        fx.store.set(STORAGE_KEY_THEME, "purple").unwrap();
        assert_eq!(fx.holder().theme(), Theme::Dark);
    }

    #[test]
    fn toggle_flips_applies_and_persists() {
        let fx = Fixture::new(false);
        let holder = fx.holder();

        for _ in 0..3 {
            let before = holder.theme();
            holder.toggle_theme();
            assert_eq!(holder.theme(), before.toggled());
            assert_eq!(fx.saved().as_deref(), Some(holder.theme().as_str()));
        }
        assert_eq!(
            *fx.presenter.applied.borrow(),
            vec![Theme::Light, Theme::Dark, Theme::Light, Theme::Dark]
        );
    }

    #[test]
    fn set_theme_is_idempotent() {
        let fx = Fixture::new(false);
        let holder = fx.holder();

        holder.set_theme(Theme::Dark);
        let once = fx.saved();
        holder.set_theme(Theme::Dark);
        assert_eq!(fx.saved(), once);
        assert_eq!(fx.saved().as_deref(), Some("dark"));
    }

    #[test]
    fn fresh_holder_reads_previous_choice() {
        let fx = Fixture::new(false);
        fx.holder().set_theme(Theme::Dark);
        assert_eq!(fx.holder().theme(), Theme::Dark);

        fx.holder().set_theme(Theme::Light);
        fx.system.set_prefers_dark(true);
        assert_eq!(fx.holder().theme(), Theme::Light);
    }

    #[test]
    fn subscribers_are_notified_synchronously() {
        let fx = Fixture::new(false);
        let holder = fx.holder();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = {
            let seen = seen.clone();
            holder.subscribe(move |theme| seen.borrow_mut().push(*theme))
        };
        holder.toggle_theme();
        assert!(holder.unsubscribe(id));
        holder.toggle_theme();

        assert_eq!(*seen.borrow(), vec![Theme::Dark]);
    }

    #[test]
    fn system_change_applies_and_locks_in_when_nothing_saved() {
        let fx = Fixture::new(false);
        let holder = fx.holder();

        fx.system.set_prefers_dark(true);
        assert_eq!(holder.theme(), Theme::Dark);
        assert_eq!(fx.saved().as_deref(), Some("dark"));

        // ya hay preferencia guardada: los siguientes cambios se ignoran
        fx.system.set_prefers_dark(false);
        assert_eq!(holder.theme(), Theme::Dark);
    }

    #[test]
    fn system_change_ignored_after_explicit_choice() {
        let fx = Fixture::new(false);
        let holder = fx.holder();
        holder.set_theme(Theme::Light);

        fx.system.set_prefers_dark(true);
        assert_eq!(holder.theme(), Theme::Light);
        assert_eq!(fx.saved().as_deref(), Some("light"));
    }

    #[test]
    fn teardown_releases_system_listener() {
        let fx = Fixture::new(false);
        let holder = fx.holder();
        let handle = holder.clone();
        assert_eq!(fx.system.listener_count(), 1);

        assert!(!holder.dispose());
        assert_eq!(fx.system.listener_count(), 1);
        assert!(handle.dispose());
        assert_eq!(fx.system.listener_count(), 0);

        fx.system.set_prefers_dark(true);
        assert_eq!(fx.saved(), None);
    }
}
