pub mod remote_file_data;
pub mod remote_path;

pub use remote_file_data::{RemoteFileData, ResourceInfo};
pub use remote_path::{is_child_name, parse_listing_entry, RemotePath};
