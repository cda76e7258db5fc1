//! 上传对账：幂等、大小不一致重传、父目录自动创建、残留清理、批量失败汇总。

use std::path::Path;

use tempfile::TempDir;

use crate::remote_file::RemotePath;
use crate::sync::{FailureKind, ResultCode};
use crate::tests::{MockTransport, Op, random_bytes, syncer, write_local};

fn local_tree() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let photos = dir.path().join("photos");
    write_local(&photos, "a.jpg", &random_bytes(64));
    write_local(&photos, "sub/b.jpg", &random_bytes(128));
    (dir, photos)
}

#[tokio::test]
async fn uploading_unchanged_file_twice_skips_second_transfer() {
    let dir = TempDir::new().unwrap();
    let content = random_bytes(100);
    let local = write_local(dir.path(), "file.txt", &content);
    let syncer = syncer(MockTransport::new().with_dir("/dst"));

    let first = syncer.upload(&local, &RemotePath::new("/dst"), false).await;
    assert!(first.is_ok(), "{first}");
    assert_eq!(syncer.transport().file("/dst/file.txt").unwrap(), content);
    assert_eq!(syncer.transport().count(Op::Upload), 1);

    syncer.transport().reset_calls();
    let second = syncer.upload(&local, &RemotePath::new("/dst"), false).await;

    assert!(second.is_ok(), "{second}");
    assert_eq!(syncer.transport().count(Op::Upload), 0);
    assert_eq!(syncer.transport().mutation_count(), 0);
}

#[tokio::test]
async fn size_mismatch_triggers_exactly_one_reupload() {
    let dir = TempDir::new().unwrap();
    let content = random_bytes(100);
    let local = write_local(dir.path(), "file.txt", &content);
    let syncer = syncer(MockTransport::new().with_file("/dst/file.txt", &random_bytes(10)));

    let result = syncer.upload(&local, &RemotePath::new("/dst"), false).await;

    assert!(result.is_ok(), "{result}");
    assert_eq!(syncer.transport().count(Op::Upload), 1);
    assert_eq!(syncer.transport().file("/dst/file.txt").unwrap(), content);
}

#[tokio::test]
async fn equal_size_is_treated_as_identical() {
    let dir = TempDir::new().unwrap();
    let local = write_local(dir.path(), "file.txt", b"bbbb");
    let syncer = syncer(MockTransport::new().with_file("/dst/file.txt", b"aaaa"));

    let result = syncer.upload(&local, &RemotePath::new("/dst"), false).await;

    assert!(result.is_ok());
    assert_eq!(syncer.transport().count(Op::Upload), 0);
    assert_eq!(syncer.transport().file("/dst/file.txt").unwrap(), b"aaaa");
}

#[tokio::test]
async fn missing_ancestors_are_created_once_each() {
    let dir = TempDir::new().unwrap();
    let local = write_local(dir.path(), "file.txt", &random_bytes(32));
    let syncer = syncer(MockTransport::new());

    let result = syncer.upload(&local, &RemotePath::new("/a/b/c"), false).await;

    assert!(result.is_ok(), "{result}");
    let mock = syncer.transport();
    assert_eq!(mock.paths_of(Op::Mkdir), vec!["/a", "/a/b", "/a/b/c"]);
    assert_eq!(mock.count_ok(Op::Mkdir), 3);
    assert_eq!(mock.count_ok(Op::Upload), 1);
    // 第一次上传因父目录缺失失败，之后只重试一次
    assert_eq!(mock.count(Op::Upload), 2);
    assert!(mock.file("/a/b/c/file.txt").is_some());
}

#[tokio::test]
async fn truncated_upload_is_deleted_and_reported() {
    let dir = TempDir::new().unwrap();
    let local = write_local(dir.path(), "file.txt", &random_bytes(100));
    let mock = MockTransport::new().with_dir("/dst");
    mock.truncate_uploads();
    let syncer = syncer(mock);

    let result = syncer.upload(&local, &RemotePath::new("/dst"), false).await;

    assert_eq!(result.code, ResultCode::Fail(FailureKind::PartialTransfer));
    assert!(!syncer.transport().exists("/dst/file.txt"));
    assert_eq!(syncer.transport().count_ok(Op::Delete), 1);
}

#[tokio::test]
async fn new_directory_is_created_and_populated() {
    let (_dir, photos) = local_tree();
    let syncer = syncer(MockTransport::new());

    let result = syncer.upload(&photos, &RemotePath::root(), false).await;

    assert!(result.is_ok(), "{result}");
    let mock = syncer.transport();
    assert!(mock.is_dir_node("/photos"));
    assert!(mock.is_dir_node("/photos/sub"));
    assert_eq!(mock.file("/photos/a.jpg").unwrap().len(), 64);
    assert_eq!(mock.file("/photos/sub/b.jpg").unwrap().len(), 128);
    assert_eq!(mock.paths_of(Op::Mkdir), vec!["/photos", "/photos/sub"]);
}

#[tokio::test]
async fn existing_directory_is_reconciled_by_size() {
    let (_dir, photos) = local_tree();
    write_local(&photos, "c.jpg", &random_bytes(16));
    let a = std::fs::read(photos.join("a.jpg")).unwrap();

    let mock = MockTransport::new()
        .with_file("/photos/a.jpg", &a)
        .with_file("/photos/sub/b.jpg", &random_bytes(5));
    let syncer = syncer(mock);

    let result = syncer.upload(&photos, &RemotePath::root(), false).await;

    assert!(result.is_ok(), "{result}");
    let mock = syncer.transport();
    assert_eq!(mock.paths_of(Op::Upload), vec!["/photos/c.jpg", "/photos/sub/b.jpg"]);
    assert_eq!(mock.file("/photos/sub/b.jpg").unwrap().len(), 128);
    assert_eq!(mock.count(Op::Mkdir), 0);
}

#[tokio::test]
async fn sibling_failure_does_not_stop_the_rest() {
    let (_dir, photos) = local_tree();
    let mock = MockTransport::new();
    mock.fail_upload_on("/photos/a.jpg");
    let syncer = syncer(mock);

    let result = syncer.upload(&photos, &RemotePath::root(), false).await;

    assert_eq!(result.code, ResultCode::Fail(FailureKind::Transport));
    assert!(!syncer.transport().exists("/photos/a.jpg"));
    assert!(syncer.transport().exists("/photos/sub/b.jpg"));
}

#[tokio::test]
async fn directory_over_remote_file_is_a_conflict() {
    let (_dir, photos) = local_tree();
    let syncer = syncer(MockTransport::new().with_file("/photos", b"not a dir"));

    let result = syncer.upload(&photos, &RemotePath::root(), false).await;

    assert_eq!(result.failure(), Some(FailureKind::Conflict));
    assert_eq!(syncer.transport().mutation_count(), 0);
}

#[tokio::test]
async fn missing_local_path_fails_without_remote_calls() {
    let dir = TempDir::new().unwrap();
    let syncer = syncer(MockTransport::new());

    let result = syncer
        .upload(&dir.path().join("nope.txt"), &RemotePath::root(), false)
        .await;

    assert_eq!(result.failure(), Some(FailureKind::NotFound));
    assert!(syncer.transport().calls().is_empty());
}

#[tokio::test]
async fn recurse_places_file_at_given_path() {
    let dir = TempDir::new().unwrap();
    let local = write_local(dir.path(), "file.txt", b"hello");
    let syncer = syncer(MockTransport::new().with_dir("/dst"));

    let result = syncer
        .upload(Path::new(&local), &RemotePath::new("/dst/renamed.txt"), true)
        .await;

    assert!(result.is_ok(), "{result}");
    assert_eq!(syncer.transport().file("/dst/renamed.txt").unwrap(), b"hello");
    assert!(!syncer.transport().exists("/dst/file.txt"));
}

#[cfg(unix)]
#[tokio::test]
async fn symlinked_files_are_uploaded_as_their_targets() {
    let (dir, photos) = local_tree();
    let real = random_bytes(32);
    let target = write_local(dir.path(), "elsewhere/real.txt", &real);
    std::os::unix::fs::symlink(&target, photos.join("link.txt")).unwrap();
    let syncer = syncer(MockTransport::new().with_dir("/dst"));

    let result = syncer.upload(&photos, &RemotePath::new("/dst"), false).await;

    assert!(result.is_ok(), "{result}");
    assert_eq!(syncer.transport().file("/dst/photos/link.txt").unwrap(), real);
    assert!(syncer.transport().exists("/dst/photos/sub/b.jpg"));
}

#[cfg(unix)]
#[tokio::test]
async fn dangling_symlink_fails_the_upload() {
    let (dir, photos) = local_tree();
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), photos.join("gone.txt")).unwrap();
    let syncer = syncer(MockTransport::new().with_dir("/dst"));

    let result = syncer.upload(&photos, &RemotePath::new("/dst"), false).await;

    assert_eq!(result.failure(), Some(FailureKind::LocalIo));
}
