//! 递归列表：后序、去重、列表失败、深度上限。

use crate::remote_file::RemotePath;
use crate::sync::{FailureKind, SyncError, SyncOptions, WebdavSyncer};
use crate::tests::{MockTransport, Op, syncer};

/// 3 个嵌套目录、5 个文件
fn nested_tree() -> MockTransport {
    MockTransport::new()
        .with_dir("/root")
        .with_file("/root/a.txt", b"a")
        .with_dir("/root/d1")
        .with_file("/root/d1/b.txt", b"bb")
        .with_dir("/root/d1/d2")
        .with_file("/root/d1/d2/c.txt", b"ccc")
        .with_file("/root/d1/d2/e.txt", b"eeee")
        .with_dir("/root/d1/d2/d3")
        .with_file("/root/d1/d2/d3/f.txt", b"fffff")
}

fn position(paths: &[RemotePath], path: &str) -> usize {
    paths
        .iter()
        .position(|p| p.as_str() == path)
        .unwrap_or_else(|| panic!("{path} 不在结果中"))
}

#[tokio::test]
async fn lists_all_descendants_post_order() {
    let syncer = syncer(nested_tree());

    let paths = syncer.list_recursive(&RemotePath::new("/root")).await.unwrap();

    assert_eq!(paths.len(), 8);
    let unique: std::collections::HashSet<_> = paths.iter().collect();
    assert_eq!(unique.len(), 8);

    // 目录排在其全部子孙之后
    assert!(position(&paths, "/root/d1/d2/d3/f.txt") < position(&paths, "/root/d1/d2/d3"));
    assert!(position(&paths, "/root/d1/d2/d3") < position(&paths, "/root/d1/d2"));
    assert!(position(&paths, "/root/d1/d2/c.txt") < position(&paths, "/root/d1/d2"));
    assert!(position(&paths, "/root/d1/d2") < position(&paths, "/root/d1"));
    assert!(position(&paths, "/root/d1/b.txt") < position(&paths, "/root/d1"));
}

#[tokio::test]
async fn duplicate_listing_entries_are_deduplicated() {
    let mock = nested_tree();
    mock.append_listing("/root", "d1/");
    mock.append_listing("/root", "a.txt");
    let syncer = syncer(mock);

    let paths = syncer.list_recursive(&RemotePath::new("/root")).await.unwrap();

    assert_eq!(paths.len(), 8);
    // d1 只展开一次
    let d1_lists = syncer
        .transport()
        .paths_of(Op::List)
        .iter()
        .filter(|p| p.as_str() == "/root/d1")
        .count();
    assert_eq!(d1_lists, 1);
}

#[tokio::test]
async fn list_failure_halts_with_list_error() {
    let mock = nested_tree();
    mock.fail_list_on("/root/d1/d2");
    let syncer = syncer(mock);

    let err = syncer
        .list_recursive(&RemotePath::new("/root"))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::List { ref path, .. } if path.as_str() == "/root/d1/d2"));
    assert_eq!(err.kind(), FailureKind::ListError);
}

#[tokio::test]
async fn depth_bound_fails_with_list_error() {
    let transport = nested_tree();
    let syncer = WebdavSyncer::with_options(transport, SyncOptions { max_depth: 1 });

    let err = syncer
        .list_recursive(&RemotePath::new("/root"))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::DepthExceeded { max_depth: 1, .. }));
    assert_eq!(err.to_result().failure(), Some(FailureKind::ListError));
}

#[tokio::test]
async fn empty_directory_lists_nothing() {
    let syncer = syncer(MockTransport::new().with_dir("/empty"));

    let paths = syncer.list_recursive(&RemotePath::new("/empty")).await.unwrap();

    assert!(paths.is_empty());
}

#[tokio::test]
async fn dot_entries_do_not_escape_the_listed_directory() {
    let mock = MockTransport::new()
        .with_dir("/a/b")
        .with_file("/a/b/x.txt", b"x")
        .with_file("/a/outside.txt", b"o");
    mock.append_listing("/a/b", "../");
    mock.append_listing("/a/b", "./");
    mock.append_listing("/a/b", "..");
    let syncer = syncer(mock);

    let paths = syncer.list_recursive(&RemotePath::new("/a/b")).await.unwrap();
    let paths: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();

    assert_eq!(paths, vec!["/a/b/x.txt"]);
    assert_eq!(syncer.transport().paths_of(Op::List), vec!["/a/b"]);
}
