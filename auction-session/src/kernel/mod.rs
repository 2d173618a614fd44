pub mod entities;
pub mod tabular;
