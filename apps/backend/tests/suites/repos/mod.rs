pub mod adapters;
pub mod catalog;
