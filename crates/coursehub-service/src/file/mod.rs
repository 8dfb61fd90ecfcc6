//! File lifecycle services: upload with overwrite, delete, signed downloads.

pub mod download;
pub mod locks;
pub mod replace;
pub mod service;
pub mod upload;

pub use download::DownloadService;
pub use locks::PathLocks;
pub use replace::BlobReplacer;
pub use service::FileService;
pub use upload::UploadService;
