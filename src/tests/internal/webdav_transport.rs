//! WebDAV 传输实现：用 wiremock 模拟服务端，校验请求方法、路径、请求头与状态码映射。

use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::auth::WebdavAuth;
use crate::remote_file::RemotePath;
use crate::states::unlock_reactive::UnlockReactiveProperty;
use crate::tests::{random_bytes, write_local};
use crate::transport::{ProgressState, Transport, TransferProgress, TransportError, WebdavTransport};

const DOCS_LISTING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<multistatus xmlns="DAV:">
  <response>
    <href>/dav/docs/</href>
    <propstat>
      <prop><resourcetype><collection/></resourcetype></prop>
      <status>HTTP/1.1 200 OK</status>
    </propstat>
  </response>
  <response>
    <href>/dav/docs/report.pdf</href>
    <propstat>
      <prop>
        <resourcetype/>
        <getcontentlength>12</getcontentlength>
        <getlastmodified>Mon, 12 Jan 2026 08:00:00 GMT</getlastmodified>
        <getetag>"abc"</getetag>
      </prop>
      <status>HTTP/1.1 200 OK</status>
    </propstat>
  </response>
  <response>
    <href>/dav/docs/old%20files/</href>
    <propstat>
      <prop><resourcetype><collection/></resourcetype></prop>
      <status>HTTP/1.1 200 OK</status>
    </propstat>
  </response>
</multistatus>"#;

const FILE_INFO: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<multistatus xmlns="DAV:">
  <response>
    <href>/dav/docs/report.pdf</href>
    <propstat>
      <prop>
        <resourcetype/>
        <getcontentlength>12</getcontentlength>
      </prop>
      <status>HTTP/1.1 200 OK</status>
    </propstat>
  </response>
</multistatus>"#;

async fn transport_for(server: &MockServer) -> WebdavTransport {
    let auth = WebdavAuth::new("user", "pass", &format!("{}/dav", server.uri())).unwrap();
    WebdavTransport::new(auth)
}

fn progress() -> ProgressState {
    UnlockReactiveProperty::new(TransferProgress::idle())
}

#[tokio::test]
async fn connect_sends_basic_auth_propfind() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .and(path("/dav/"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .and(header("depth", "0"))
        .respond_with(ResponseTemplate::new(207).set_body_string(FILE_INFO))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;

    transport.connect().await.unwrap();
}

#[tokio::test]
async fn list_drops_self_entry_and_marks_directories() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .and(path("/dav/docs/"))
        .and(header("depth", "1"))
        .respond_with(ResponseTemplate::new(207).set_body_string(DOCS_LISTING))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let names = transport.list(&RemotePath::new("/docs")).await.unwrap();

    assert_eq!(names, vec!["report.pdf", "old files/"]);
}

#[tokio::test]
async fn info_reads_content_length() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .and(path("/dav/docs/report.pdf"))
        .respond_with(ResponseTemplate::new(207).set_body_string(FILE_INFO))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let info = transport.info(&RemotePath::new("/docs/report.pdf")).await.unwrap();

    assert_eq!(info.size, Some(12));
    assert!(!info.is_directory());
}

#[tokio::test]
async fn redirected_directory_check_retries_with_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .and(path("/dav/docs"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", "/dav/docs/"),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PROPFIND"))
        .and(path("/dav/docs/"))
        .and(header("depth", "0"))
        .respond_with(ResponseTemplate::new(207).set_body_string(DOCS_LISTING))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let docs = RemotePath::new("/docs");

    assert!(transport.check(&docs).await.unwrap());
    assert!(transport.info(&docs).await.unwrap().is_directory());
}

#[tokio::test]
async fn check_maps_404_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;

    assert!(!transport.check(&RemotePath::new("/missing")).await.unwrap());
}

#[tokio::test]
async fn mkdir_conflict_is_parent_missing() {
    let server = MockServer::start().await;
    Mock::given(method("MKCOL"))
        .and(path("/dav/a/b/"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let err = transport.mkdir(&RemotePath::new("/a/b")).await.unwrap_err();

    assert!(matches!(err, TransportError::ParentMissing(ref p) if p.as_str() == "/a"));
}

#[tokio::test]
async fn upload_streams_file_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/dav/up/file%20one.bin"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let content = random_bytes(200_000);
    let local = write_local(dir.path(), "file.bin", &content);
    let transport = transport_for(&server).await;
    let state = progress();

    transport
        .upload(&local, &RemotePath::new("/up/file one.bin"), &state)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, content);
    let last = state.get_current().unwrap();
    assert_eq!(last.bytes_done, 200_000);
    assert_eq!(last.total, Some(200_000));
}

#[tokio::test]
async fn download_writes_response_body() {
    let server = MockServer::start().await;
    let content = random_bytes(4096);
    Mock::given(method("GET"))
        .and(path("/dav/f.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.clone()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let target = dir.path().join("f.bin");
    let transport = transport_for(&server).await;
    let state = progress();

    transport
        .download(&RemotePath::new("/f.bin"), &target, &state)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), content);
    assert_eq!(state.get_current().unwrap().bytes_done, 4096);
}

#[tokio::test]
async fn copy_sends_absolute_destination() {
    let server = MockServer::start().await;
    let destination = format!("{}/dav/b.txt", server.uri());
    Mock::given(method("COPY"))
        .and(path("/dav/a.txt"))
        .and(header("destination", destination.as_str()))
        .and(header("overwrite", "T"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;

    transport
        .copy(&RemotePath::new("/a.txt"), &RemotePath::new("/b.txt"))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let err = transport.delete(&RemotePath::new("/gone")).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("MOVE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let err = transport
        .move_to(&RemotePath::new("/a"), &RemotePath::new("/b"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 500, ref message } if message == "boom"));
}
