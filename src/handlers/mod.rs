pub mod files;
pub mod info;
