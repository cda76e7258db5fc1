pub mod download;
pub mod list_recursive;
pub mod remote_ops;
pub mod search;
pub mod transfer;
pub mod upload;
