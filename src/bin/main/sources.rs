use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use flashread_core::i18n::{Key, Language, sample_text, translate};
use flashread_services::archive::{ArchiveClient, ArchiveError, BookText};
use log::info;
use tokio::io::AsyncReadExt;

use super::ReadArgs;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Source {
    File(PathBuf),
    Stdin,
    Sample,
    Archive { query: String, pick: usize },
}

impl Source {
    pub(super) fn from_args(args: &ReadArgs) -> Self {
        if args.sample {
            return Self::Sample;
        }
        if let Some(query) = &args.search {
            return Self::Archive {
                query: query.clone(),
                pick: args.pick.unwrap_or(1).max(1),
            };
        }
        match &args.file {
            Some(path) if path != Path::new("-") => Self::File(path.clone()),
            _ => Self::Stdin,
        }
    }
}

pub(super) struct LoadedText {
    pub(super) text: String,
    pub(super) label: String,
}

pub(super) async fn load(source: &Source, language: Language) -> Result<LoadedText> {
    match source {
        Source::File(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(LoadedText {
                text,
                label: path.display().to_string(),
            })
        }
        Source::Stdin => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("reading stdin")?;
            Ok(LoadedText {
                text,
                label: "stdin".to_string(),
            })
        }
        Source::Sample => Ok(LoadedText {
            text: sample_text(language).to_string(),
            label: format!("sample:{}", language.code()),
        }),
        Source::Archive { query, pick } => load_archive_book(query, *pick, language).await,
    }
}

async fn load_archive_book(query: &str, pick: usize, language: Language) -> Result<LoadedText> {
    let t = |key| translate(language, key);

    if query.trim().is_empty() {
        bail!(t(Key::EnterSearch));
    }

    let client = ArchiveClient::new()?;
    eprintln!("{}", t(Key::Searching));
    let hits = client
        .search(query)
        .await
        .map_err(|error| anyhow!("{}: {error}", t(Key::SearchError)))?;
    if hits.is_empty() {
        bail!(t(Key::NoBooks));
    }

    for (index, hit) in hits.iter().enumerate() {
        let marker = if index + 1 == pick { '>' } else { ' ' };
        eprintln!(
            "{marker} {:>2}. {} ({}, {}) {} downloads",
            index + 1,
            hit.title,
            hit.author,
            hit.date,
            hit.downloads
        );
    }
    let hit = hits
        .get(pick - 1)
        .with_context(|| format!("--pick {pick} but only {} results", hits.len()))?;
    info!("archive: loading id={} title={:?}", hit.identifier, hit.title);

    match client.fetch_text(&hit.identifier).await {
        Ok(BookText::Loaded { text, format, url }) => {
            eprintln!("{} {} ({format})", t(Key::LoadedSuccess), hit.title);
            Ok(LoadedText { text, label: url })
        }
        Ok(BookText::ManualDownload { url }) => Err(anyhow!(
            "{}. {} {}: {url}",
            t(Key::ManualDownload),
            t(Key::DownloadInstructions),
            t(Key::DownloadLink)
        )),
        Err(error) => {
            let key = match error {
                ArchiveError::NoTextVersion => Key::NoTextVersion,
                ArchiveError::TextTooShort => Key::TextTooShort,
                ArchiveError::Metadata => Key::FetchFailed,
                ArchiveError::RequestFailed(_) => Key::NetworkError,
            };
            Err(anyhow::Error::new(error).context(format!("{}: {}", t(Key::LoadError), t(key))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ReadArgs {
        ReadArgs {
            file: None,
            sample: false,
            search: None,
            pick: None,
            wpm: None,
        }
    }

    #[test]
    fn picks_the_source_from_flags() {
        assert_eq!(Source::from_args(&args()), Source::Stdin);
        assert_eq!(
            Source::from_args(&ReadArgs {
                file: Some(PathBuf::from("-")),
                ..args()
            }),
            Source::Stdin
        );
        assert_eq!(
            Source::from_args(&ReadArgs {
                file: Some(PathBuf::from("book.txt")),
                ..args()
            }),
            Source::File(PathBuf::from("book.txt"))
        );
        assert_eq!(
            Source::from_args(&ReadArgs {
                sample: true,
                ..args()
            }),
            Source::Sample
        );
        assert_eq!(
            Source::from_args(&ReadArgs {
                search: Some("moby dick".to_string()),
                pick: Some(0),
                ..args()
            }),
            Source::Archive {
                query: "moby dick".to_string(),
                pick: 1
            }
        );
    }

    #[tokio::test]
    async fn sample_source_is_localized() {
        let loaded = load(&Source::Sample, Language::De).await.unwrap();
        assert_eq!(loaded.text, sample_text(Language::De));
        assert_eq!(loaded.label, "sample:de");
    }
}
