//! End-to-end export tests against a local mock HTTP server.

use docpress::{export_docs_to_pdf, ExportError, DEFAULT_OUTPUT_FILENAME};

const DOCS_BODY: &str = r##"
<html><body>
  <div class="md-content">
    <h1 id="top">Guide</h1>
    <p>Read <a href="#top">this</a> first.</p>
    <pre>cargo install docpress</pre>
  </div>
</body></html>
"##;

#[test]
fn export_produces_a_pdf_artifact_with_the_fixed_filename() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/docs/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(DOCS_BODY)
        .create();

    let url = format!("{}/docs/", server.url());
    let artifact = export_docs_to_pdf(&url).expect("export should succeed");
    mock.assert();

    assert_eq!(artifact.filename, DEFAULT_OUTPUT_FILENAME);
    assert!(artifact.bytes.starts_with(b"%PDF-"));
    assert!(artifact
        .data_uri()
        .starts_with("data:application/octet-stream;base64,"));
}

#[test]
fn http_error_status_is_a_fetch_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/missing/")
        .with_status(404)
        .create();

    let url = format!("{}/missing/", server.url());
    let err = export_docs_to_pdf(&url).expect_err("404 must fail the export");
    match err {
        ExportError::Fetch { timed_out, .. } => assert!(!timed_out),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn page_without_content_container_is_content_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/plain/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body><p>no container here</p></body></html>")
        .create();

    let url = format!("{}/plain/", server.url());
    let err = export_docs_to_pdf(&url).expect_err("missing container must fail");
    assert!(matches!(err, ExportError::ContentNotFound));
    assert!(err
        .user_message()
        .starts_with("An error occurred while generating the PDF:"));
}

#[test]
fn refused_connection_is_a_fetch_failure() {
    // Grab a free local port, then close it so the connection is refused.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let err = export_docs_to_pdf(&format!("http://127.0.0.1:{port}/docs/"))
        .expect_err("refused connection must fail");
    assert!(matches!(err, ExportError::Fetch { .. }));
}
