pub mod local_entry;

pub use local_entry::LocalEntry;
