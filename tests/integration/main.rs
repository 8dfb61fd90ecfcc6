//! Router-level tests against the in-memory backends.

mod helpers;

mod auth_test;
mod download_test;
mod materials_test;
mod submission_test;
