//! Plain-text PDF rendering for signed agreements.
//!
//! Produces a small PDF 1.4 document using the built-in Helvetica fonts:
//! the contract title, each section (heading plus wrapped body), and a
//! signature block recording who signed, when, and the SHA-256 of the
//! signature image. Characters outside printable ASCII are replaced.

use std::fmt::Write as _;

use crate::types::Timestamp;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 54;
const LEADING: u32 = 14;
const WRAP_COLUMNS: usize = 92;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Everything printed on a signed agreement.
#[derive(Debug, Clone)]
pub struct AgreementDocument<'a> {
    pub title: &'a str,
    /// `(heading, body)` pairs in document order.
    pub sections: &'a [(String, String)],
    pub signer_name: &'a str,
    pub signed_at: Timestamp,
    pub signature_sha256: &'a str,
    pub agreement_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Heading,
    Body,
}

impl Style {
    fn font(self) -> (&'static str, u32) {
        match self {
            Style::Title => ("F2", 16),
            Style::Heading => ("F2", 12),
            Style::Body => ("F1", 10),
        }
    }
}

/// Greedy word wrap at `columns` characters. Words longer than a line are split.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > columns {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let head: String = word.chars().take(columns).collect();
                word = word.chars().skip(columns).collect();
                lines.push(head);
            }
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > columns {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}

/// Escape a line for a PDF literal string.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn layout(doc: &AgreementDocument<'_>) -> Vec<(Style, String)> {
    let mut lines = vec![(Style::Title, doc.title.to_string()), (Style::Body, String::new())];
    for (heading, body) in doc.sections {
        lines.push((Style::Heading, heading.clone()));
        lines.extend(wrap(body, WRAP_COLUMNS).into_iter().map(|l| (Style::Body, l)));
        lines.push((Style::Body, String::new()));
    }
    lines.push((Style::Heading, "Signature".to_string()));
    lines.push((Style::Body, format!("Signed electronically by: {}", doc.signer_name)));
    lines.push((
        Style::Body,
        format!("Signed at: {}", doc.signed_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ));
    lines.push((Style::Body, format!("Signature SHA-256: {}", doc.signature_sha256)));
    lines.push((Style::Body, format!("Agreement reference: {}", doc.agreement_id)));
    lines
}

fn content_stream(lines: &[(Style, String)]) -> String {
    let mut stream = String::new();
    let _ = writeln!(stream, "BT");
    let _ = writeln!(stream, "{LEADING} TL");
    let _ = writeln!(stream, "{MARGIN} {} Td", PAGE_HEIGHT - MARGIN);
    for (style, text) in lines {
        let (font, size) = style.font();
        let _ = writeln!(stream, "/{font} {size} Tf ({}) Tj T*", escape(text));
    }
    let _ = writeln!(stream, "ET");
    stream
}

/// Render the agreement as PDF bytes.
pub fn render_agreement_pdf(doc: &AgreementDocument<'_>) -> Vec<u8> {
    let lines = layout(doc);
    let pages: Vec<&[(Style, String)]> = lines.chunks(LINES_PER_PAGE).collect();

    // Objects: 1 catalog, 2 page tree, 3-4 fonts, then (page, content) pairs.
    let first_page_obj = 5;
    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
        .collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string());

    for (i, page_lines) in pages.iter().enumerate() {
        let content_obj = first_page_obj + 2 * i + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_obj} 0 R >>"
        ));
        let stream = content_stream(page_lines);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}endstream",
            stream.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{body}\nendobj\n", i + 1);
    }

    let xref_offset = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{offset:010} 00000 n \n");
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    );
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn doc(sections: &[(String, String)]) -> Vec<u8> {
        render_agreement_pdf(&AgreementDocument {
            title: "Client Services Agreement",
            sections,
            signer_name: "Jane (JD) Doe",
            signed_at: chrono::Utc.with_ymd_and_hms(2026, 4, 2, 15, 30, 0).unwrap(),
            signature_sha256: "abc123",
            agreement_id: 7,
        })
    }

    #[test]
    fn produces_well_formed_envelope() {
        let sections = vec![("Scope".to_string(), "Services as described.".to_string())];
        let bytes = doc(&sections);
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("(Signed electronically by: Jane \\(JD\\) Doe) Tj"));
        assert!(text.contains("2026-04-02 15:30:00 UTC"));

        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(text[startxref..].starts_with("xref\n"));
    }

    #[test]
    fn long_documents_span_pages() {
        let body = "lorem ipsum dolor sit amet ".repeat(400);
        let sections = vec![("Terms".to_string(), body)];
        let text = String::from_utf8(doc(&sections)).unwrap();
        assert!(!text.contains("/Count 1 "));
        assert!(text.matches("/Type /Page ").count() > 1);
    }

    #[test]
    fn wrap_respects_column_limit() {
        let lines = wrap(&"word ".repeat(50), 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        let long = wrap(&"x".repeat(45), 20);
        assert_eq!(long, vec!["x".repeat(20), "x".repeat(20), "x".repeat(5)]);
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(escape("café\\"), "caf?\\\\");
    }
}
