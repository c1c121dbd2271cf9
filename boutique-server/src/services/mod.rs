//! Services

pub mod blob;

pub use blob::{BlobStore, LocalBlobStore, StoredBlob};
