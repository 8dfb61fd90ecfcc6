//! Material folder domain entities.

pub mod model;
pub mod path;

pub use model::{CreateFolder, Folder};
pub use path::{FolderContents, PathSegment};
