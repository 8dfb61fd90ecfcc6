//! PostgreSQL implementations of the store traits.

pub mod assignment;
pub mod course;
pub mod file;
pub mod folder;
pub mod submission;

pub use assignment::AssignmentRepository;
pub use course::CourseRepository;
pub use file::FileRepository;
pub use folder::FolderRepository;
pub use submission::SubmissionRepository;
