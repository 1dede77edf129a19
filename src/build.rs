//! Pipeline: scan → register → resolve → validate → assemble.

use std::path::Path;

use crate::assembler;
use crate::config::Config;
use crate::error::Error;
use crate::registry::Registry;
use crate::resolver;
use crate::scanner;
use crate::types::{Article, Chapter, ResolvedArticle};
use crate::validator;

/// Build the whole document for the corpus at `root`.
///
/// # Errors
///
/// Returns the first error raised by any stage; no partial output is produced.
pub fn run(root: &Path) -> Result<String, Error> {
    let config = Config::load(root)?;
    tracing::info!(chapters = config.chapters.len(), root = %root.display(), "loaded book config");

    let chapters = scanner::scan(root, &config)?;
    let resolved = process(&chapters)?;
    let document = assembler::assemble(&resolved);

    let published: usize = resolved.iter().map(|c| return c.published().count()).sum();
    tracing::info!(articles = published, bytes = document.len(), "assembled document");
    return Ok(document);
}

/// Register every article of every chapter, then resolve and validate each chapter.
/// Registration must see the whole corpus first because links may point
/// forward into any chapter.
///
/// # Errors
///
/// Returns `Error::DuplicateId`, `Error::InvalidLink`,
/// `Error::UnknownDependency`, or `Error::OrderViolation`.
pub fn process(chapters: &[Chapter<Article>]) -> Result<Vec<Chapter<ResolvedArticle>>, Error> {
    let registry = Registry::build(chapters.iter().flat_map(|c| return c.articles.iter()))?;
    tracing::info!(ids = registry.id_count(), "built identifier registry");

    let resolved = chapters
        .iter()
        .map(|c| return resolve_chapter(c, &registry))
        .collect::<Result<Vec<_>, _>>()?;

    for chapter in &resolved {
        validator::validate(chapter, &registry)?;
        tracing::debug!(chapter = %chapter.info.id, strict = chapter.info.strict, "dependencies valid");
    }

    return Ok(resolved);
}

/// Resolve the links of every article in a chapter.
///
/// # Errors
///
/// Returns `Error::InvalidLink` for the first unresolvable target.
fn resolve_chapter(
    chapter: &Chapter<Article>,
    registry: &Registry,
) -> Result<Chapter<ResolvedArticle>, Error> {
    let articles = chapter
        .articles
        .iter()
        .map(|a| return resolver::resolve(a, registry))
        .collect::<Result<Vec<_>, _>>()?;

    return Ok(Chapter {
        articles,
        info: chapter.info.clone(),
    });
}
