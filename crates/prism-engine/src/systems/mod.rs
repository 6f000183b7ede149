pub mod fields;
pub mod rotation;
