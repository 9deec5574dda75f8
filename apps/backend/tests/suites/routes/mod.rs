pub mod categories;
pub mod error_shape;
pub mod healthcheck;
pub mod recipes;
pub mod stores;
pub mod users;
