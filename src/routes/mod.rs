//! Route modules for the Syllabus Extractor server

pub mod download;
pub mod health;
pub mod search;
pub mod subjects;

#[cfg(test)]
pub(crate) mod test_support;
