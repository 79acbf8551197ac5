//! Minimal PDF serialization for laid-out pages.
//!
//! Emits a classic cross-referenced object stream: catalog, page tree, the
//! four Type1 base fonts, one Flate-compressed content stream per page, and
//! an outline tree built from heading bookmarks. Text encodes as WinAnsi
//! with octal escapes, so the object bodies themselves stay pure ASCII.

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::styles::Font;

use super::layout::{LaidOut, Page, PAGE_HEIGHT, PAGE_WIDTH};

fn font_resource(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
        Font::HelveticaOblique => "F3",
        Font::Courier => "F4",
    }
}

const BASE_FONTS: [(Font, &str); 4] = [
    (Font::Helvetica, "Helvetica"),
    (Font::HelveticaBold, "Helvetica-Bold"),
    (Font::HelveticaOblique, "Helvetica-Oblique"),
    (Font::Courier, "Courier"),
];

/// Map a char to its WinAnsi code point; unsupported glyphs degrade to `?`.
fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\u{0020}'..='\u{007E}' => ch as u8,
        '\u{00A0}'..='\u{00FF}' => (ch as u32) as u8,
        '\u{20AC}' => 0x80, // €
        '\u{2026}' => 0x85, // …
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{2122}' => 0x99, // ™
        _ => b'?',
    }
}

/// Encode text as an ASCII-only PDF string body (no surrounding parens).
fn encode_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            byte @ 0x20..=0x7E => out.push(byte as char),
            byte => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut s = String::new();
    for rect in &page.rects {
        s.push_str(&format!(
            "{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\n",
            rect.color.r, rect.color.g, rect.color.b, rect.x, rect.y, rect.width, rect.height
        ));
    }
    for run in &page.runs {
        s.push_str(&format!(
            "BT\n/{} {:.1} Tf\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            font_resource(run.font),
            run.size,
            run.color.r,
            run.color.g,
            run.color.b,
            run.x,
            run.y,
            encode_pdf_text(&run.text)
        ));
    }
    s.into_bytes()
}

/// Serialize the laid-out document into a complete PDF byte buffer.
pub fn write_pdf(doc: &LaidOut) -> io::Result<Vec<u8>> {
    let page_count = doc.pages.len();
    let bookmark_count = doc.bookmarks.len();

    // Object plan: 1 catalog, 2 page tree, 3..=6 fonts, then per page the
    // page object and its content stream, then the outline tree.
    let page_obj = |i: usize| 7 + 2 * i;
    let content_obj = |i: usize| 8 + 2 * i;
    let outline_root = 7 + 2 * page_count;
    let outline_item = |i: usize| outline_root + 1 + i;
    let total_objects = if bookmark_count > 0 {
        outline_root + bookmark_count
    } else {
        6 + 2 * page_count
    };

    let mut buf: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; total_objects + 1];

    buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    offsets[1] = buf.len();
    if bookmark_count > 0 {
        write!(
            buf,
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R /Outlines {outline_root} 0 R /PageMode /UseOutlines >>\nendobj\n"
        )?;
    } else {
        write!(buf, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;
    }

    offsets[2] = buf.len();
    let kids: String = (0..page_count)
        .map(|i| format!("{} 0 R ", page_obj(i)))
        .collect();
    write!(
        buf,
        "2 0 obj\n<< /Type /Pages /Kids [ {kids}] /Count {page_count} \
         /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] \
         /Resources << /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R /F4 6 0 R >> >> >>\nendobj\n"
    )?;

    for (index, (_, base_font)) in BASE_FONTS.iter().enumerate() {
        let number = 3 + index;
        offsets[number] = buf.len();
        write!(
            buf,
            "{number} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>\nendobj\n"
        )?;
    }

    for (i, page) in doc.pages.iter().enumerate() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&page_content(page))?;
        let compressed = encoder.finish()?;

        offsets[page_obj(i)] = buf.len();
        write!(
            buf,
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /Contents {} 0 R >>\nendobj\n",
            page_obj(i),
            content_obj(i)
        )?;

        offsets[content_obj(i)] = buf.len();
        write!(
            buf,
            "{} 0 obj\n<< /Length {} /Filter /FlateDecode >>\nstream\n",
            content_obj(i),
            compressed.len()
        )?;
        buf.extend_from_slice(&compressed);
        buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    if bookmark_count > 0 {
        offsets[outline_root] = buf.len();
        write!(
            buf,
            "{outline_root} 0 obj\n<< /Type /Outlines /First {} 0 R /Last {} 0 R /Count {bookmark_count} >>\nendobj\n",
            outline_item(0),
            outline_item(bookmark_count - 1)
        )?;
        for (i, bookmark) in doc.bookmarks.iter().enumerate() {
            offsets[outline_item(i)] = buf.len();
            let mut entry = format!(
                "<< /Title ({}) /Parent {outline_root} 0 R /Dest [{} 0 R /XYZ 0 {:.2} 0]",
                encode_pdf_text(&bookmark.title),
                page_obj(bookmark.page),
                bookmark.y
            );
            if i > 0 {
                entry.push_str(&format!(" /Prev {} 0 R", outline_item(i - 1)));
            }
            if i + 1 < bookmark_count {
                entry.push_str(&format!(" /Next {} 0 R", outline_item(i + 1)));
            }
            entry.push_str(" >>");
            write!(buf, "{} 0 obj\n{entry}\nendobj\n", outline_item(i))?;
        }
    }

    let xref_offset = buf.len();
    write!(buf, "xref\n0 {}\n", total_objects + 1)?;
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for number in 1..=total_objects {
        write!(buf, "{:010} 00000 n \n", offsets[number])?;
    }
    write!(
        buf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        total_objects + 1
    )?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::renderer::layout::lay_out;
    use crate::styles::StyleRegistry;

    fn pdf_for(blocks: &[Block]) -> Vec<u8> {
        let laid = lay_out(blocks, &StyleRegistry::builtin());
        write_pdf(&laid).expect("pdf serialization should not fail")
    }

    #[test]
    fn output_is_a_wellformed_pdf_shell() {
        let bytes = pdf_for(&[Block::Paragraph {
            rich_text: "hello".into(),
        }]);
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn empty_documents_still_produce_one_page() {
        let bytes = pdf_for(&[]);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type /Page "));
    }

    #[test]
    fn bookmarked_headings_emit_an_outline_tree() {
        let bytes = pdf_for(&[Block::Heading {
            level: 1,
            text: "Install".into(),
            anchor: Some("install".into()),
        }]);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type /Outlines"));
        assert!(text.contains("/Title (Install)"));
        assert!(text.contains("/PageMode /UseOutlines"));
    }

    #[test]
    fn unbookmarked_documents_have_no_outline() {
        let bytes = pdf_for(&[Block::Paragraph {
            rich_text: "plain".into(),
        }]);
        assert!(!String::from_utf8_lossy(&bytes).contains("/Outlines"));
    }

    #[test]
    fn pdf_string_escaping_and_encoding() {
        assert_eq!(encode_pdf_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
        assert_eq!(encode_pdf_text("\u{2022} caf\u{E9}"), "\\225 caf\\351");
        assert_eq!(encode_pdf_text("\u{4E2D}"), "?");
    }

    #[test]
    fn xref_offsets_point_at_object_headers() {
        let bytes = pdf_for(&[Block::Paragraph {
            rich_text: "check".into(),
        }]);
        let marker = b"\nxref\n";
        let xref_at = bytes
            .windows(marker.len())
            .rposition(|window| window == marker)
            .expect("xref table")
            + marker.len();
        let table: Vec<&[u8]> = bytes[xref_at..].split(|&b| b == b'\n').collect();
        // table[0] is the subsection header, table[1] the free-list entry.
        for (line_index, line) in table[2..].iter().enumerate() {
            if !line.ends_with(b"n ") {
                break;
            }
            let digits = std::str::from_utf8(&line[..10]).expect("offset digits");
            let offset: usize = digits.parse().expect("offset digits");
            let header = format!("{} 0 obj", line_index + 1);
            assert!(
                bytes[offset..].starts_with(header.as_bytes()),
                "object {} not at recorded offset",
                line_index + 1
            );
        }
    }
}
