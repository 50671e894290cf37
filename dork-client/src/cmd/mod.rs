pub mod builder;
pub mod catalog;
pub mod render;
