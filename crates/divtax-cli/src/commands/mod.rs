pub mod project;
pub mod tax;
