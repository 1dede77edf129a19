//! Dependency ordering checks: existence everywhere, declared order in strict chapters.

use std::collections::HashSet;

use crate::error::Error;
use crate::registry::Registry;
use crate::types::{Chapter, ResolvedArticle};

/// Validate a chapter's dependency lists under its policy.
///
/// Every chapter is checked for target existence. A strict chapter must
/// also list its articles in an order where each dependency was defined by
/// an earlier article of the same chapter.
///
/// # Errors
///
/// Returns `Error::UnknownDependency` or `Error::OrderViolation`.
pub fn validate(chapter: &Chapter<ResolvedArticle>, registry: &Registry) -> Result<(), Error> {
    check_targets_exist(&chapter.articles, registry)?;
    if chapter.info.strict {
        check_declared_order(&chapter.articles, &chapter.info.id)?;
    }
    return Ok(());
}

/// Every dependency must be some article's id.
///
/// # Errors
///
/// Returns `Error::UnknownDependency` naming the article and the missing id.
pub fn check_targets_exist(articles: &[ResolvedArticle], registry: &Registry) -> Result<(), Error> {
    for article in articles {
        let missing = article
            .dependencies
            .iter()
            .find(|d| return !registry.contains(d.as_str()));
        if let Some(target) = missing {
            return Err(Error::UnknownDependency {
                article: article.main_id.clone(),
                target: target.clone(),
            });
        }
    }
    return Ok(());
}

/// Each dependency must belong to an article listed before the dependent one.
/// The given order is authoritative; nothing is re-sorted.
///
/// # Errors
///
/// Returns `Error::OrderViolation` for a self, forward, or out-of-chapter dependency.
pub fn check_declared_order(articles: &[ResolvedArticle], chapter_id: &str) -> Result<(), Error> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (idx, article) in articles.iter().enumerate() {
        for dep in &article.dependencies {
            if seen.contains(dep.as_str()) {
                continue;
            }
            return Err(Error::OrderViolation {
                article: article.main_id.clone(),
                chapter: chapter_id.to_string(),
                reason: classify_unseen(articles, idx, dep),
                target: dep.clone(),
            });
        }
        seen.extend(article.ids.iter().map(String::as_str));
    }

    return Ok(());
}

/// Explain why `dep` is not visible to the article at `idx`.
fn classify_unseen(articles: &[ResolvedArticle], idx: usize, dep: &str) -> &'static str {
    let current = articles.get(idx);
    if current.is_some_and(|a| return a.ids.contains(dep)) {
        return "self-reference";
    }
    let mut later = articles.iter().skip(idx.saturating_add(1));
    if later.any(|a| return a.ids.contains(dep)) {
        return "defined by a later article";
    }
    return "not defined in this chapter";
}
