pub mod transfer_progress;
pub mod transport_error;
pub mod webdav_transport;

pub use transfer_progress::{ProgressState, TransferDirection, TransferProgress};
pub use transport_error::TransportError;
pub use webdav_transport::WebdavTransport;
