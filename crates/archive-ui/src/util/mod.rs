pub mod color;
pub mod name_cache;
