#![allow(clippy::unwrap_used)]

use std::io::Write;

use super::*;

// ── URL handling ──────────────────────────────────────────────

#[test]
fn test_client_keeps_base_url() {
    let client = AnalysisClient::new("http://127.0.0.1:5000");
    assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    assert_eq!(client.url("/predict"), "http://127.0.0.1:5000/predict");
}

#[test]
fn test_client_strips_trailing_slash() {
    let client = AnalysisClient::new("http://localhost:5000/");
    assert_eq!(client.base_url(), "http://localhost:5000");
    assert_eq!(client.url("/anomalies"), "http://localhost:5000/anomalies");
}

// ── Multipart framing ─────────────────────────────────────────

#[test]
fn test_multipart_single_file_part() {
    let mut form = MultipartForm::with_boundary("XBOUNDARY");
    form.add_file_part("file", "spending.csv", "text/csv", b"a,b\n1,2\n");

    assert_eq!(
        form.content_type(),
        "multipart/form-data; boundary=XBOUNDARY"
    );

    let body = String::from_utf8(form.finish()).unwrap();
    assert_eq!(
        body,
        "--XBOUNDARY\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"spending.csv\"\r\n\
         Content-Type: text/csv\r\n\
         \r\n\
         a,b\n1,2\n\r\n\
         --XBOUNDARY--\r\n"
    );
}

#[test]
fn test_multipart_empty_form_is_just_terminator() {
    let form = MultipartForm::with_boundary("B");
    assert_eq!(form.finish(), b"--B--\r\n".to_vec());
}

#[test]
fn test_multipart_generated_boundaries_differ_in_content_type() {
    let a = MultipartForm::new();
    let b = MultipartForm::new();
    // Content types embed the boundary; generated forms should not share
    // a payload-colliding constant prefix beyond the scheme name.
    assert!(a.content_type().starts_with("multipart/form-data; boundary=pulsetui-"));
    assert!(b.content_type().starts_with("multipart/form-data; boundary=pulsetui-"));
}

#[test]
fn test_multipart_preserves_binary_payload() {
    let payload = [0u8, 159, 146, 150, 13, 10];
    let mut form = MultipartForm::with_boundary("B");
    form.add_file_part("file", "x.csv", "text/csv", &payload);
    let body = form.finish();
    assert!(body
        .windows(payload.len())
        .any(|w| w == payload));
}

// ── build_upload_form ─────────────────────────────────────────

#[test]
fn test_build_upload_form_from_disk() {
    let mut file = tempfile::Builder::new()
        .prefix("transactions")
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "Transaction Date,Category,Total Spent").unwrap();
    writeln!(file, "2024-01-05,Groceries,500").unwrap();
    file.flush().unwrap();

    let form = build_upload_form(file.path()).unwrap();
    let body = String::from_utf8(form.finish()).unwrap();

    assert!(body.contains("name=\"file\""));
    assert!(body.contains("Content-Type: text/csv"));
    assert!(body.contains("2024-01-05,Groceries,500"));
    // filename comes from the path
    let name = file.path().file_name().unwrap().to_str().unwrap().to_string();
    assert!(body.contains(&format!("filename=\"{name}\"")));
}

#[test]
fn test_build_upload_form_missing_file_errors() {
    let err = build_upload_form(std::path::Path::new("/no/such/file.csv"))
        .unwrap_err()
        .to_string();
    assert!(err.contains("/no/such/file.csv"));
}
