//! Repository functions for the domain layer (generic over `ConnectionTrait`).
//!
//! Repos own the existence and natural-key checks; adapters only talk SQL.

pub mod categories;
pub mod ingredients;
pub mod lookup;
pub mod recipes;
pub mod stores;
pub mod users;

pub use lookup::Lookup;
