/// Claves de localStorage (compartidas con la versión web existente)
pub const STORAGE_KEY_TOKEN: &str = "recicla365-token";
pub const STORAGE_KEY_USER: &str = "recicla365-user";
pub const STORAGE_KEY_THEME: &str = "recicla365-theme";

/// Media query del tema del sistema operativo
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

pub const THEME_TRANSITION_CLASS: &str = "theme-transition";
