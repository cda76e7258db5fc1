pub mod cancel_flag;
pub mod operation_result;
pub mod sync_error;
pub mod sync_options;
pub mod webdav_syncer;

pub use cancel_flag::CancelFlag;
pub use operation_result::{FailureKind, OperationResult, ResultCode};
pub use sync_error::SyncError;
pub use sync_options::{DEFAULT_MAX_DEPTH, SyncOptions};
pub use webdav_syncer::WebdavSyncer;
