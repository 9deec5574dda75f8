//! Business operations composed from repos. Services return `DomainError`;
//! handlers convert to `AppError`.

pub mod auth;
pub mod images;
pub mod users;

pub use auth::AuthService;
pub use images::{ImageKeys, ImageService};
pub use users::UserService;
