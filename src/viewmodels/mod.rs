pub mod auth_viewmodel;
pub mod collection_points_viewmodel;

pub use auth_viewmodel::{AuthViewModel, SubmitError};
pub use collection_points_viewmodel::CollectionPointsViewModel;
