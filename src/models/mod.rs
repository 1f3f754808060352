// Data model module
pub mod guild;
pub mod store;
