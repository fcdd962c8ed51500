use std::{
    fs::{
        self,
        File,
    },
    io::{
        BufReader,
        Read,
    },
    path::Path,
};

use once_cell::sync::Lazy;
use regex::{
    Captures,
    Regex,
};
use zip::ZipArchive;

use crate::core::{
    DocFreqError,
    Document,
    Page,
    SourceFile,
    SourceFileType,
};

const PAGE_BREAK: char = '\u{000C}';
const BYTE_ORDER_MARK: char = '\u{FEFF}';
const DOCX_BODY: &str = "word/document.xml";

/// Produces the ordered raw tokens of a document, one token list per page.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<Document, DocFreqError>;
}

/// Picks the reader from the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultExtractor;

impl TextExtractor for DefaultExtractor {
    fn extract(&self, path: &Path) -> Result<Document, DocFreqError> {
        extract_document(path)
    }
}

pub fn extract_document(path: &Path) -> Result<Document, DocFreqError> {
    if !path.is_file() {
        return Err(DocFreqError::FileNotFound(path.display().to_string()));
    }

    read(&SourceFile::new(path))
}

pub fn read(source_file: &SourceFile) -> Result<Document, DocFreqError> {
    let document = match &source_file.file_type {
        SourceFileType::Text => read_txt(source_file),
        SourceFileType::Srt => read_srt(source_file),
        SourceFileType::Docx => read_docx(source_file),
        SourceFileType::Pdf => read_pdf(source_file),
        SourceFileType::Other(extension) => {
            let kind = if extension.is_empty() { "(none)" } else { extension.as_str() };
            Err(DocFreqError::UnsupportedFileType(format!(
                "{} (extension {}, expected one of: {})",
                source_file.title,
                kind,
                SourceFileType::supported_extensions().join(", ")
            )))
        }
    }?;

    log::debug!(
        "Extracted {} tokens on {} pages from {}",
        document.token_count(),
        document.pages.len(),
        source_file.title
    );
    Ok(document)
}

fn read_utf8(source_file: &SourceFile) -> Result<String, DocFreqError> {
    let bytes = fs::read(&source_file.path)
        .map_err(|e| DocFreqError::extraction(&source_file.title, e.to_string()))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| DocFreqError::extraction(&source_file.title, "file is not valid UTF-8"))?;

    if text.starts_with(BYTE_ORDER_MARK) {
        Ok(text[BYTE_ORDER_MARK.len_utf8()..].to_string())
    } else {
        Ok(text)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn pages_from_texts<I, S>(texts: I) -> Vec<Page>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(idx, text)| Page { number: idx as u32 + 1, tokens: tokenize(text.as_ref()) })
        .collect()
}

/// Plain text. Form feeds separate pages.
pub fn read_txt(source_file: &SourceFile) -> Result<Document, DocFreqError> {
    let text = read_utf8(source_file)?;

    let pages =
        if text.trim().is_empty() { Vec::new() } else { pages_from_texts(text.split(PAGE_BREAK)) };

    Ok(Document { title: source_file.title.clone(), pages })
}

/// Subtitles. Every cue becomes one page holding its text lines.
pub fn read_srt(source_file: &SourceFile) -> Result<Document, DocFreqError> {
    let text = read_utf8(source_file)?.replace("\r\n", "\n");

    let cues: Vec<String> = text
        .split("\n\n")
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(idx, entry)| {
            let lines: Vec<&str> = entry.lines().collect();
            let well_formed = lines.len() >= 2
                && lines[0].trim().parse::<u32>().is_ok()
                && lines[1].contains("-->");

            if !well_formed {
                return Err(DocFreqError::extraction(
                    &source_file.title,
                    format!("invalid subtitle entry #{}", idx + 1),
                ));
            }

            Ok(lines[2..].join("\n"))
        })
        .collect::<Result<Vec<_>, DocFreqError>>()?;

    Ok(Document { title: source_file.title.clone(), pages: pages_from_texts(cues) })
}

static DOCX_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:br\b[^>]*w:type="page"[^>]*/>|<w:lastRenderedPageBreak\s*/>|</w:p>|<w:tab\s*/>"#,
    )
    .expect("static pattern is valid")
});

static XML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("static pattern is valid")
});

/// Word documents. Text runs are joined per paragraph; explicit and rendered page
/// breaks start a new page.
pub fn read_docx(source_file: &SourceFile) -> Result<Document, DocFreqError> {
    let file = File::open(&source_file.path)
        .map_err(|e| DocFreqError::extraction(&source_file.title, e.to_string()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)?
        .read_to_string(&mut xml)
        .map_err(|e| DocFreqError::extraction(&source_file.title, e.to_string()))?;

    Ok(Document { title: source_file.title.clone(), pages: docx_pages(&xml) })
}

/// PDF files. Each PDF page becomes one page, in document order.
pub fn read_pdf(source_file: &SourceFile) -> Result<Document, DocFreqError> {
    let pdf = lopdf::Document::load(&source_file.path).map_err(|e| {
        DocFreqError::extraction(&source_file.title, format!("not a readable PDF: {}", e))
    })?;

    let texts = pdf
        .get_pages()
        .into_keys()
        .map(|number| {
            pdf.extract_text(&[number]).map_err(|e| {
                DocFreqError::extraction(&source_file.title, format!("page {}: {}", number, e))
            })
        })
        .collect::<Result<Vec<_>, DocFreqError>>()?;

    Ok(Document { title: source_file.title.clone(), pages: pages_from_texts(texts) })
}

fn docx_pages(xml: &str) -> Vec<Page> {
    let mut pages: Vec<Vec<String>> = vec![Vec::new()];
    let mut paragraph = String::new();

    for captures in DOCX_MARKUP.captures_iter(xml) {
        if let Some(text) = captures.get(1) {
            paragraph.push_str(&decode_entities(text.as_str()));
            continue;
        }

        let markup = &captures[0];
        if markup.starts_with("<w:tab") {
            paragraph.push(' ');
            continue;
        }

        if let Some(current) = pages.last_mut() {
            current.extend(tokenize(&paragraph));
        }
        paragraph.clear();

        let is_page_break = markup.starts_with("<w:br") || markup.starts_with("<w:lastRendered");
        if is_page_break && pages.last().is_some_and(|page| !page.is_empty()) {
            pages.push(Vec::new());
        }
    }

    if let Some(current) = pages.last_mut() {
        current.extend(tokenize(&paragraph));
    }
    if pages.last().is_some_and(|page| page.is_empty()) {
        pages.pop();
    }

    pages
        .into_iter()
        .enumerate()
        .map(|(idx, tokens)| Page { number: idx as u32 + 1, tokens })
        .collect()
}

fn decode_entities(text: &str) -> String {
    XML_ENTITY
        .replace_all(text, |captures: &Captures| {
            let entity = &captures[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map(String::from).unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use lopdf::{
        content::{
            Content,
            Operation,
        },
        dictionary,
        Object,
        Stream,
    };
    use zip::{
        write::SimpleFileOptions,
        ZipWriter,
    };

    use super::*;

    fn write_fixture(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn write_docx(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(DOCX_BODY, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
        zip.finish().unwrap();
        path
    }

    // One Courier text line per page.
    fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> std::path::PathBuf {
        let mut pdf = lopdf::Document::with_version("1.5");
        let pages_id = pdf.new_object_id();
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                pdf.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        pdf.trailer.set("Root", catalog_id);

        let path = dir.join(name);
        pdf.save(&path).unwrap();
        path
    }

    fn page_tokens(document: &Document) -> Vec<Vec<&str>> {
        document
            .pages
            .iter()
            .map(|page| page.tokens.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_txt_pages_split_on_form_feed() {
        let dir = tempfile::tempdir().unwrap();
        let text = "\u{FEFF}The quick\nfox.\u{000C}The  FOX";
        let path = write_fixture(dir.path(), "doc.txt", text.as_bytes());

        let document = extract_document(&path).unwrap();

        assert_eq!(document.title, "doc.txt");
        assert_eq!(
            page_tokens(&document),
            vec![vec!["The", "quick", "fox."], vec!["The", "FOX"]]
        );
        assert_eq!(document.pages[1].number, 2);
    }

    #[test]
    fn test_blank_txt_has_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "blank.txt", b"  \n\n ");

        let document = extract_document(&path).unwrap();
        assert!(document.pages.is_empty());
        assert_eq!(document.token_count(), 0);
    }

    #[test]
    fn test_invalid_utf8_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "bad.txt", &[0x66, 0x6f, 0xff, 0xfe]);

        let err = extract_document(&path).unwrap_err();
        assert!(matches!(err, DocFreqError::Extraction { .. }));
    }

    #[test]
    fn test_srt_cues_become_pages() {
        let dir = tempfile::tempdir().unwrap();
        let srt = "1\r\n00:00:01,000 --> 00:00:02,000\r\nHello there,\r\nfriend\r\n\r\n\
                   2\r\n00:00:03,000 --> 00:00:04,000\r\nHello again\r\n";
        let path = write_fixture(dir.path(), "ep01.srt", srt.as_bytes());

        let document = extract_document(&path).unwrap();

        assert_eq!(
            page_tokens(&document),
            vec![vec!["Hello", "there,", "friend"], vec!["Hello", "again"]]
        );
    }

    #[test]
    fn test_malformed_srt_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "broken.srt", b"just some text\nwithout cues");

        let err = extract_document(&path).unwrap_err();
        assert!(err.is_extraction_failure());
    }

    #[test]
    fn test_docx_runs_paragraphs_and_page_breaks() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document><w:body>
<w:p><w:r><w:t>Data</w:t></w:r><w:r><w:t xml:space="preserve"> analy</w:t></w:r><w:r><w:t>sis</w:t></w:r></w:p>
<w:p><w:r><w:t>Fish &amp; chips</w:t><w:tab/><w:t>&#x442;&#1077;&#x441;&#x442;</w:t></w:r></w:p>
<w:p><w:r><w:br w:type="page"/></w:r></w:p>
<w:p><w:r><w:lastRenderedPageBreak/><w:t>Second</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
</w:body></w:document>"#;
        let path = write_docx(dir.path(), "report.docx", body);

        let document = extract_document(&path).unwrap();

        assert_eq!(
            page_tokens(&document),
            vec![vec!["Data", "analysis", "Fish", "&", "chips", "тест"], vec!["Second", "cell"]]
        );
    }

    #[test]
    fn test_docx_without_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        zip.finish().unwrap();

        let err = extract_document(&path).unwrap_err();
        assert!(matches!(err, DocFreqError::Zip(_)));
        assert!(err.is_extraction_failure());
    }

    #[test]
    fn test_corrupt_docx_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "corrupt.docx", b"definitely not a zip archive");

        let err = extract_document(&path).unwrap_err();
        assert!(err.is_extraction_failure());
    }

    #[test]
    fn test_pdf_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), "paper.pdf", &["Alpha beta, gamma.", "Delta ALPHA"]);

        let document = extract_document(&path).unwrap();

        assert_eq!(document.title, "paper.pdf");
        assert_eq!(
            page_tokens(&document),
            vec![vec!["Alpha", "beta,", "gamma."], vec!["Delta", "ALPHA"]]
        );
        assert_eq!(document.pages[1].number, 2);
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "scan.pdf", b"%PDF-1.7\nnot really a pdf");

        let err = extract_document(&path).unwrap_err();
        assert!(matches!(err, DocFreqError::Extraction { .. }));
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let audio = write_fixture(dir.path(), "song.mp3", b"ID3");

        assert!(matches!(
            extract_document(&audio).unwrap_err(),
            DocFreqError::UnsupportedFileType(_)
        ));
        assert!(matches!(
            extract_document(&dir.path().join("absent.txt")).unwrap_err(),
            DocFreqError::FileNotFound(_)
        ));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &quot;c&quot; &apos;d&apos;"), "a <b> \"c\" 'd'");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    }
}
