pub mod core;
pub mod kubernetes;
pub mod observability;
