//! Merge support
//!
//! - `bca_finder`: merge base search over every parent link
//!
//! The merge itself is a file-level union staged on top of HEAD, see
//! [`Repository::merge`](crate::areas::repository::Repository::merge).

pub mod bca_finder;
