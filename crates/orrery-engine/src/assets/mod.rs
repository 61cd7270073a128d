pub mod builtin;
pub mod catalog;
