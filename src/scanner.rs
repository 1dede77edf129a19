use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::article;
use crate::config::Config;
use crate::error::Error;
use crate::splitter;
use crate::types::{Article, Chapter, ChapterInfo};

/// Read every configured chapter folder and parse its articles.
/// Chapters keep config order; articles keep discovery order.
///
/// # Errors
///
/// Returns `Error::ChapterNotFound` for a missing folder, `Error::Io` or
/// `Error::Walk` on read failures, and any splitter or parser error.
pub fn scan(root: &Path, config: &Config) -> Result<Vec<Chapter<Article>>, Error> {
    return config
        .chapters
        .iter()
        .map(|info| return scan_chapter(root, info))
        .collect();
}

/// Collect the articles of one chapter folder.
///
/// # Errors
///
/// See [`scan`].
fn scan_chapter(root: &Path, info: &ChapterInfo) -> Result<Chapter<Article>, Error> {
    let folder = root.join(&info.folder);
    if !folder.is_dir() {
        return Err(Error::ChapterNotFound {
            chapter: info.id.clone(),
            folder,
        });
    }

    let mut articles = Vec::new();
    let walker = WalkDir::new(&folder)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| return e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let parsed = parse_source_file(entry.path())?;
        tracing::debug!(file = %entry.path().display(), articles = parsed.len(), "read source file");
        articles.extend(parsed);
    }

    let chapter = Chapter {
        articles,
        info: info.clone(),
    };
    tracing::info!(
        chapter = %info.id,
        articles = chapter.articles.len(),
        published = chapter.published().count(),
        "scanned chapter"
    );
    return Ok(chapter);
}

/// Split and parse all articles of one source file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read as UTF-8, or any
/// splitter or parser error.
fn parse_source_file(path: &Path) -> Result<Vec<Article>, Error> {
    let content = std::fs::read_to_string(path)?;
    return splitter::split(path, &content)?
        .into_iter()
        .map(article::parse)
        .collect();
}

/// Dotfiles and dot-directories are never part of the corpus.
fn is_hidden(entry: &DirEntry) -> bool {
    return entry.file_name().to_string_lossy().starts_with('.');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn reads_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "defs/b.txt", "*** second\ntitle: Second\n");
        write(dir.path(), "defs/a.txt", "*** first\ntitle: First\n*** also\ntitle: Also\n");
        write(dir.path(), "defs/.swap", "*** hidden\ntitle: Hidden\n");
        write(dir.path(), "defs/nested/c.txt", "*** third\ntitle: Third\n");

        let config = Config::parse("[[chapter]]\nid = \"defs\"\n").unwrap();
        let chapters = scan(dir.path(), &config).unwrap();

        let ids: Vec<&str> = chapters[0].articles.iter().map(|a| a.main_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "also", "second", "third"]);
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::parse("[[chapter]]\nid = \"ghost\"\n").unwrap();
        let err = scan(dir.path(), &config).unwrap_err();
        assert!(matches!(err, Error::ChapterNotFound { ref chapter, .. } if chapter == "ghost"));
    }
}
