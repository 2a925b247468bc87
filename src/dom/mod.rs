// ============================================================================
// DOM MODULE - Helpers para manipulación DOM
// ============================================================================

pub mod element;
pub mod theme;

pub use element::*;
pub use theme::{DocumentThemePresenter, ThemePresenter};
