#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;
pub mod store;

pub use json_file::JsonFileMedium;
pub use repository::{InMemoryMedium, ProgressMedium, StorageError};
pub use store::{ProgressStore, PROGRESS_SLOT};
