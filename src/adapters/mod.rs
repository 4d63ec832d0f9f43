// Adapters layer: concrete implementations of the repository and file-storage ports.

pub mod json_file;
pub mod local_file_storage;
pub mod memory;

#[cfg(feature = "lambda")]
pub mod dynamodb;
#[cfg(feature = "lambda")]
pub mod s3;

pub use json_file::JsonFileRepository;
pub use local_file_storage::LocalFileStorage;
pub use memory::{InMemoryFileStorage, InMemoryRepository};

#[cfg(feature = "lambda")]
pub use dynamodb::DynamoRepository;
#[cfg(feature = "lambda")]
pub use s3::S3FileStorage;
