pub mod sessions;
pub mod summary;
