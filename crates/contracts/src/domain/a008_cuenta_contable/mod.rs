pub mod aggregate;
pub mod plan;
