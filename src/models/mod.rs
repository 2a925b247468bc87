pub mod user;
pub mod theme;
pub mod collection_point;

pub use user::{AuthResponse, LoginCredentials, RegisterData, Session, Sex, User};
pub use theme::Theme;
pub use collection_point::{
    Address, CepInfo, CollectionPoint, CollectionPointDraft, Coordinates, DashboardStats, WasteType,
};
