//! Extraction tests against small PDFs assembled in the test itself.

use std::path::Path;

use pdftotxt_core::{BackendError, ConvertOptions, PdfBackend, convert_directory};
use pdftotxt_mupdf::MupdfBackend;

/// Build a minimal PDF with one page per entry; `None` yields a page with
/// no content stream.
fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    build_pdf_with_trailer(pages, "")
}

/// Like [`build_pdf`], with `extra` spliced into the trailer dictionary.
fn build_pdf_with_trailer(pages: &[Option<&str>], extra: &str) -> Vec<u8> {
    let font_id = 3;
    let first_page_id = 4;
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_id + i * 2))
        .collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, text) in pages.iter().enumerate() {
        let content_id = first_page_id + i * 2 + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {content_id} 0 R >>"
        ));
        let stream = match text {
            Some(t) => format!("BT /F1 12 Tf 72 720 Td ({t}) Tj ET"),
            None => String::new(),
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R {} >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            extra,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn write_pdf(dir: &Path, name: &str, pages: &[Option<&str>]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

#[test]
fn pages_come_back_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(
        dir.path(),
        "notice.pdf",
        &[Some("first page"), Some("second page"), Some("third page")],
    );

    let pages = MupdfBackend::new().extract_pages(&path).unwrap();

    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("first page"));
    assert!(pages[1].contains("second page"));
    assert!(pages[2].contains("third page"));
}

#[test]
fn empty_page_yields_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "gap.pdf", &[Some("before"), None, Some("after")]);

    let pages = MupdfBackend::new().extract_pages(&path).unwrap();

    assert_eq!(pages.len(), 3);
    assert!(pages[1].trim().is_empty());
}

#[test]
fn header_exclusion_drops_top_band() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "header.pdf", &[Some("letterhead")]);

    // Text sits about 72pt below the top of a 792pt page.
    let pages = MupdfBackend::new()
        .with_header_exclusion(0.2)
        .extract_pages(&path)
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert!(!pages[0].contains("letterhead"));
}

#[test]
fn encrypted_document_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locked.pdf");
    // Standard security handler whose /U entry matches no empty user
    // password, so the document cannot be opened without one.
    let owner = "A".repeat(64);
    let user = "B".repeat(64);
    let id = "0123456789ABCDEF0123456789ABCDEF";
    let encrypt = format!(
        "/Encrypt << /Filter /Standard /V 1 /R 2 /Length 40 /P -4 /O <{owner}> /U <{user}> >> \
         /ID [<{id}> <{id}>]"
    );
    std::fs::write(
        &path,
        build_pdf_with_trailer(&[Some("secret minutes")], &encrypt),
    )
    .unwrap();

    let err = MupdfBackend::new().extract_pages(&path).unwrap_err();
    match err {
        BackendError::OpenError(message) => assert!(message.contains("encrypted")),
        other => panic!("expected open error, got {other:?}"),
    }
}

#[test]
fn garbage_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"this is not a pdf").unwrap();

    let err = MupdfBackend::new().extract_pages(&path).unwrap_err();
    assert!(matches!(err, BackendError::OpenError(_)));
}

#[test]
fn directory_conversion_with_mupdf() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "a.pdf", &[Some("alpha")]);
    write_pdf(dir.path(), "b.pdf", &[Some("bravo"), Some("charlie")]);
    std::fs::write(dir.path().join("c.pdf"), b"not a pdf").unwrap();

    let summary = convert_directory(
        dir.path(),
        &MupdfBackend::new(),
        &ConvertOptions::default(),
        |_| {},
    )
    .unwrap();

    assert_eq!(summary.converted(), 2);
    assert_eq!(summary.failed(), 1);

    let b = std::fs::read_to_string(dir.path().join("b.txt")).unwrap();
    let bravo = b.find("bravo").unwrap();
    let charlie = b.find("charlie").unwrap();
    assert!(bravo < charlie);
    assert!(!dir.path().join("c.txt").exists());
}
