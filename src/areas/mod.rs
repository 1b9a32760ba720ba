//! Core repository components
//!
//! Everything a repository keeps on disk, one area per concern:
//!
//! - `database`: image store, one snapshot directory plus metadata per commit
//! - `staging`: staging area holding the next commit's files
//! - `refs`: HEAD, branch tips and the activated branch
//! - `repository`: discovery, locking and coordination of the other areas
//! - `workspace`: the working tree

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
