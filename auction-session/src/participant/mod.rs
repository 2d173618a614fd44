pub mod entities;
pub mod registry;
