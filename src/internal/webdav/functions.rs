pub mod format_url_path;
pub mod get_folders_raw_data;
pub mod send_webdav_request;
