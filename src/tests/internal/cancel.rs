//! 取消标志：置位后不再产生任何远程变更。

use tempfile::TempDir;

use crate::remote_file::RemotePath;
use crate::sync::{CancelFlag, FailureKind, SyncError, WebdavSyncer};
use crate::tests::{MockTransport, random_bytes, write_local};

#[tokio::test]
async fn cancelled_upload_mutates_nothing() {
    let dir = TempDir::new().unwrap();
    let local = write_local(dir.path(), "tree/a.bin", &random_bytes(10));
    let flag = CancelFlag::new();
    let syncer = WebdavSyncer::new(MockTransport::new()).with_cancel_flag(flag.clone());

    flag.cancel();
    let result = syncer
        .upload(local.parent().unwrap(), &RemotePath::root(), false)
        .await;

    assert_eq!(result.failure(), Some(FailureKind::Cancelled));
    assert_eq!(syncer.transport().mutation_count(), 0);
}

#[tokio::test]
async fn cancelled_traversal_stops_listing() {
    let syncer = WebdavSyncer::new(MockTransport::new().with_file("/a/b.txt", b"b"));
    syncer.cancel_flag().cancel();

    let err = syncer.list_recursive(&RemotePath::root()).await.unwrap_err();

    assert!(matches!(err, SyncError::Cancelled));
    assert!(syncer.transport().calls().is_empty());
}

#[test]
fn clones_share_the_same_flag() {
    let flag = CancelFlag::new();
    let other = flag.clone();

    assert!(flag.check().is_ok());
    other.cancel();

    assert!(flag.is_cancelled());
    assert!(matches!(flag.check(), Err(SyncError::Cancelled)));
}
