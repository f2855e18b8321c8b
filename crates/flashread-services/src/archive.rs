//! Internet Archive book search and plain-text download.

use std::time::Duration;

use log::{debug, info, warn};
use miniz_oxide::inflate::decompress_to_vec;
use serde::Deserialize;
use serde_json::Value;

use crate::cleanup::clean_book_text;

const ARCHIVE_BASE: &str = "https://archive.org";
const MIRRORS: [&str; 2] = [
    "https://ia902609.us.archive.org",
    "https://ia802609.us.archive.org",
];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Search result page size.
pub const SEARCH_ROWS: usize = 10;
/// Texts at or below this many characters are treated as broken downloads.
pub const MIN_TEXT_CHARS: usize = 100;
const DESCRIPTION_CHARS: usize = 200;

/// Archive file formats that carry plain text, most useful first.
pub const TEXT_FORMATS: [&str; 6] = [
    "DjVuTXT",
    "Text",
    "Abbyy GZ",
    "Single Page Processed JP2 ZIP",
    "Scandata",
    "Djvu XML",
];
const FALLBACK_FORMAT_LABEL: &str = "Found text file";

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to fetch book metadata")]
    Metadata,
    #[error("No text version available for this book")]
    NoTextVersion,
    #[error("Text content is too short or corrupted")]
    TextTooShort,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookHit {
    pub identifier: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub date: String,
    pub downloads: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BookText {
    Loaded {
        text: String,
        /// Archive format name of the file that was used.
        format: String,
        url: String,
    },
    /// Every download route failed; the user has to fetch `url` by hand.
    ManualDownload { url: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextFile {
    pub name: String,
    pub format: String,
    gzipped: bool,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    response: Option<SearchDocs>,
}

#[derive(Debug, Deserialize)]
struct SearchDocs {
    #[serde(default)]
    docs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default)]
    files: Vec<ArchiveFile>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArchiveFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub size: Option<Value>,
}

impl ArchiveFile {
    fn size_bytes(&self) -> u64 {
        match &self.size {
            Some(Value::String(size)) => size.trim().parse().unwrap_or(0),
            Some(Value::Number(size)) => size.as_u64().unwrap_or(0),
            _ => 0,
        }
    }
}

pub struct ArchiveClient {
    client: reqwest::Client,
}

impl ArchiveClient {
    pub fn new() -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("flashread/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(request_error)?;
        Ok(Self { client })
    }

    /// Top text items matching `query`, most downloaded first.
    pub async fn search(&self, query: &str) -> Result<Vec<BookHit>, ArchiveError> {
        let q = format!(
            "{} AND mediatype:texts AND format:(\"Text PDF\" OR \"DjVuTXT\" OR \"Abbyy GZ\")",
            query.trim()
        );
        let rows = SEARCH_ROWS.to_string();
        let response = self
            .client
            .get(format!("{ARCHIVE_BASE}/advancedsearch.php"))
            .query(&[
                ("q", q.as_str()),
                ("fl", "identifier,title,creator,description,date,downloads,format"),
                ("sort[]", "downloads desc"),
                ("rows", rows.as_str()),
                ("page", "1"),
                ("output", "json"),
            ])
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ArchiveError::RequestFailed(response.status().to_string()));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(request_error)?;
        let hits = parse_hits(envelope);
        info!("archive: search query={:?} hits={}", query, hits.len());
        Ok(hits)
    }

    /// Downloads, decompresses and cleans the best text file of an item.
    pub async fn fetch_text(&self, identifier: &str) -> Result<BookText, ArchiveError> {
        let metadata_url = format!("{ARCHIVE_BASE}/metadata/{identifier}");
        let response = self
            .client
            .get(&metadata_url)
            .send()
            .await
            .map_err(|_| ArchiveError::Metadata)?;
        if !response.status().is_success() {
            return Err(ArchiveError::Metadata);
        }
        let metadata: Metadata = response.json().await.map_err(|_| ArchiveError::Metadata)?;

        let file = select_text_file(&metadata.files).ok_or(ArchiveError::NoTextVersion)?;
        debug!("archive: selected file={} format={}", file.name, file.format);

        let mut loaded = None;
        for url in candidate_urls(identifier, &file.name) {
            match self.download(&url).await {
                Ok(bytes) => {
                    loaded = Some((decode_text(&bytes, file.gzipped), url));
                    break;
                }
                Err(error) => debug!("archive: download failed url={} error={}", url, error),
            }
        }

        if loaded.is_none() {
            let url = stream_url(identifier);
            match self.download(&url).await {
                Ok(bytes) => loaded = Some((String::from_utf8_lossy(&bytes).into_owned(), url)),
                Err(error) => debug!("archive: stream fallback failed error={}", error),
            }
        }

        let Some((raw, url)) = loaded else {
            warn!("archive: all download routes failed id={}", identifier);
            return Ok(BookText::ManualDownload {
                url: download_url(ARCHIVE_BASE, identifier, &file.name),
            });
        };

        let text = accept_text(&raw)?;
        info!("archive: loaded id={} chars={} from {}", identifier, text.len(), url);
        Ok(BookText::Loaded {
            text,
            format: file.format,
            url,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/plain, text/html, application/octet-stream, */*",
            )
            .send()
            .await
            .map_err(request_error)?;
        if !response.status().is_success() {
            return Err(ArchiveError::RequestFailed(response.status().to_string()));
        }
        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }
}

fn parse_hits(envelope: SearchEnvelope) -> Vec<BookHit> {
    envelope
        .response
        .map(|docs| docs.docs)
        .unwrap_or_default()
        .iter()
        .filter_map(book_hit)
        .collect()
}

fn book_hit(doc: &Value) -> Option<BookHit> {
    let identifier = doc.get("identifier")?.as_str()?.to_string();

    let title = first_text(doc.get("title")).unwrap_or_else(|| "Untitled".to_string());
    let author = match doc.get("creator") {
        Some(Value::Array(names)) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            names.join(", ")
        }
        other => first_text(other).unwrap_or_default(),
    };
    let description = first_text(doc.get("description"))
        .map(|text| {
            let mut short: String = text.chars().take(DESCRIPTION_CHARS).collect();
            short.push_str("...");
            short
        })
        .unwrap_or_else(|| "No description available".to_string());

    Some(BookHit {
        identifier,
        title,
        author: if author.is_empty() {
            "Unknown Author".to_string()
        } else {
            author
        },
        description,
        date: first_text(doc.get("date")).unwrap_or_else(|| "Unknown date".to_string()),
        downloads: match doc.get("downloads") {
            Some(Value::Number(count)) => count.as_u64().unwrap_or(0),
            Some(Value::String(count)) => count.parse().unwrap_or(0),
            _ => 0,
        },
    })
}

/// A string field, or the first string of an array field. Blank is missing.
fn first_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.as_str(),
        Value::Array(items) => items.iter().find_map(Value::as_str)?,
        _ => return None,
    };
    (!text.trim().is_empty()).then(|| text.to_string())
}

/// Picks the item file to download: the first format in [`TEXT_FORMATS`]
/// order, then a file named like a text dump, then the largest file whose
/// name suggests text.
pub fn select_text_file(files: &[ArchiveFile]) -> Option<TextFile> {
    let by_format = TEXT_FORMATS.iter().find_map(|format| {
        files
            .iter()
            .find(|file| file.format.as_deref() == Some(*format) && !file.name.is_empty())
            .map(|file| text_file(file, format))
    });
    if by_format.is_some() {
        return by_format;
    }

    let by_name = files.iter().find(|file| {
        file.name.ends_with(".txt")
            || file.name.ends_with("_djvu.txt")
            || file.name.ends_with("_abbyy.gz")
    });
    if let Some(file) = by_name {
        return Some(text_file(file, FALLBACK_FORMAT_LABEL));
    }

    files
        .iter()
        .filter(|file| {
            file.name.contains(".txt") || file.name.contains("djvu") || file.name.contains("abbyy")
        })
        .max_by_key(|file| file.size_bytes())
        .map(|file| text_file(file, FALLBACK_FORMAT_LABEL))
}

fn text_file(file: &ArchiveFile, format: &str) -> TextFile {
    TextFile {
        name: file.name.clone(),
        format: format.to_string(),
        gzipped: file.name.ends_with(".gz") || file.format.as_deref() == Some("Abbyy GZ"),
    }
}

fn download_url(host: &str, identifier: &str, name: &str) -> String {
    format!("{host}/download/{identifier}/{name}")
}

fn stream_url(identifier: &str) -> String {
    format!("{ARCHIVE_BASE}/stream/{identifier}/{identifier}_djvu.txt")
}

/// Download routes for one file, tried in order.
pub fn candidate_urls(identifier: &str, name: &str) -> Vec<String> {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);

    let mut urls = vec![download_url(ARCHIVE_BASE, identifier, name)];
    urls.extend(MIRRORS.iter().map(|host| download_url(host, identifier, name)));
    urls.push(format!("{ARCHIVE_BASE}/stream/{identifier}/{stem}_djvu.txt"));
    urls
}

/// Body bytes as text. Gzip bodies that fail to inflate are read as-is,
/// since some `.gz` names are served already decompressed.
fn decode_text(bytes: &[u8], gzipped: bool) -> String {
    if gzipped {
        match gunzip(bytes) {
            Some(inflated) => return String::from_utf8_lossy(&inflated).into_owned(),
            None => debug!("archive: gzip inflate failed, reading body as text"),
        }
    }
    String::from_utf8_lossy(bytes).into_owned()
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const GZIP_DEFLATE: u8 = 8;
const GZIP_HEADER_LEN: usize = 10;
const GZIP_TRAILER_LEN: usize = 8;
const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;

/// Inflates a single-member gzip file.
pub fn gunzip(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.len() < GZIP_HEADER_LEN + GZIP_TRAILER_LEN
        || bytes[..2] != GZIP_MAGIC
        || bytes[2] != GZIP_DEFLATE
    {
        return None;
    }

    let flags = bytes[3];
    let mut pos = GZIP_HEADER_LEN;
    if flags & FEXTRA != 0 {
        let extra = usize::from(u16::from_le_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]));
        pos += 2 + extra;
    }
    if flags & FNAME != 0 {
        pos += bytes.get(pos..)?.iter().position(|byte| *byte == 0)? + 1;
    }
    if flags & FCOMMENT != 0 {
        pos += bytes.get(pos..)?.iter().position(|byte| *byte == 0)? + 1;
    }
    if flags & FHCRC != 0 {
        pos += 2;
    }

    let body = bytes.get(pos..bytes.len() - GZIP_TRAILER_LEN)?;
    decompress_to_vec(body).ok()
}

/// Cleans a download and rejects texts too short to be a real book.
pub fn accept_text(raw: &str) -> Result<String, ArchiveError> {
    if raw.trim().chars().count() <= MIN_TEXT_CHARS {
        return Err(ArchiveError::TextTooShort);
    }
    let cleaned = clean_book_text(raw);
    if cleaned.chars().count() <= MIN_TEXT_CHARS {
        return Err(ArchiveError::TextTooShort);
    }
    Ok(cleaned)
}

fn request_error(error: reqwest::Error) -> ArchiveError {
    ArchiveError::RequestFailed(error.to_string())
}
