//! 搜索：先序、子串匹配、重复目录只展开一次。

use crate::remote_file::RemotePath;
use crate::tests::{MockTransport, syncer};

fn docs_tree() -> MockTransport {
    let mock = MockTransport::new()
        .with_dir("/docs")
        .with_file("/docs/report.pdf", b"1")
        .with_dir("/docs/old")
        .with_file("/docs/old/report2.pdf", b"2")
        .with_file("/docs/readme.md", b"3");
    // /docs/old 在列表中出现两次
    mock.append_listing("/docs", "old/");
    mock
}

#[tokio::test]
async fn finds_matches_in_order_without_duplicates() {
    let syncer = syncer(docs_tree());

    let found = syncer.search("report", &RemotePath::new("/docs")).await.unwrap();
    let found: Vec<&str> = found.iter().map(|p| p.as_str()).collect();

    assert_eq!(found, vec!["/docs/report.pdf", "/docs/old/report2.pdf"]);
}

#[tokio::test]
async fn matching_directory_is_reported_and_descended() {
    let mock = MockTransport::new()
        .with_dir("/reports")
        .with_file("/reports/q1-report.txt", b"x")
        .with_file("/other.txt", b"y");
    let syncer = syncer(mock);

    let found = syncer.search("report", &RemotePath::root()).await.unwrap();
    let found: Vec<&str> = found.iter().map(|p| p.as_str()).collect();

    assert_eq!(found, vec!["/reports", "/reports/q1-report.txt"]);
}

#[tokio::test]
async fn no_match_returns_empty() {
    let syncer = syncer(docs_tree());

    let found = syncer.search("invoice", &RemotePath::new("/docs")).await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn missing_root_is_a_list_error() {
    let syncer = syncer(MockTransport::new());

    let err = syncer.search("x", &RemotePath::new("/nope")).await.unwrap_err();

    assert_eq!(err.kind(), crate::sync::FailureKind::ListError);
}

#[tokio::test]
async fn dot_entries_are_not_searched() {
    let mock = MockTransport::new()
        .with_dir("/a/b")
        .with_file("/a/b/report.txt", b"1")
        .with_file("/a/report-outside.txt", b"2");
    mock.append_listing("/a/b", "../");
    let syncer = syncer(mock);

    let found = syncer.search("report", &RemotePath::new("/a/b")).await.unwrap();
    let found: Vec<&str> = found.iter().map(|p| p.as_str()).collect();

    assert_eq!(found, vec!["/a/b/report.txt"]);
}
