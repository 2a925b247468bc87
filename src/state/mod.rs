// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod auth_state;
pub mod theme_state;

pub use reactivity::*;
pub use auth_state::*;
pub use theme_state::*;
