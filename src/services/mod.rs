pub mod auth_service;
pub mod cep_service;
pub mod collection_point_service;
pub mod system_theme;

pub use auth_service::{AuthService, MockAuthService};
pub use cep_service::lookup_cep;
pub use collection_point_service::CollectionPointService;
pub use system_theme::{ManualThemeSource, MediaQueryThemeSource, SystemThemeSource, SystemThemeWatch};
