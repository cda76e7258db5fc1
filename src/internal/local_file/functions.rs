pub mod local_fs;
pub mod walk_local_tree;

pub use local_fs::*;
pub use walk_local_tree::*;
