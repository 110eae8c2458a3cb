pub mod repository;
pub mod sqlite;

pub use repository::{MirroredProgress, ProgressMirrorRepository, Storage, StorageError};
