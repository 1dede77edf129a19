use std::path::Path;

use regex::Captures;

use crate::error::Error;
use crate::patterns::{BARE_REFERENCE_RE, EMPHASIS_RE, EXPLICIT_LINK_RE};
use crate::registry::Registry;
use crate::types::{Article, ResolvedArticle};

/// Resolve every inline reference in an article's body.
///
/// Each line goes through four steps in order: `[[X]]` becomes emphasis,
/// bare `[X]` becomes `[X](X)`, then every `[label](target)` records its
/// target as a dependency and is rewritten to the canonical local anchor.
/// The input article is left untouched.
///
/// # Errors
///
/// Returns `Error::InvalidLink` for the first target missing from the registry.
pub fn resolve(article: &Article, registry: &Registry) -> Result<ResolvedArticle, Error> {
    let mut dependencies = Vec::new();
    let body = article
        .body
        .iter()
        .map(|line| {
            return resolve_line(line, &article.main_id, &article.source, registry, &mut dependencies);
        })
        .collect::<Result<Vec<_>, _>>()?;

    return Ok(ResolvedArticle {
        body,
        dependencies,
        draft: article.draft,
        ids: article.ids.clone(),
        main_id: article.main_id.clone(),
        title: article.title.clone(),
    });
}

/// Rewrite a single body line, appending canonical link targets to `dependencies`.
/// `article_id` and `file` only feed the error on a failed lookup.
///
/// # Errors
///
/// Returns `Error::InvalidLink` if a link target is not registered.
pub fn resolve_line(
    line: &str,
    article_id: &str,
    file: &Path,
    registry: &Registry,
    dependencies: &mut Vec<String>,
) -> Result<String, Error> {
    let emphasized = EMPHASIS_RE.replace_all(line, "*${1}*");
    let expanded = BARE_REFERENCE_RE.replace_all(&emphasized, expand_bare_reference);

    let mut out = String::with_capacity(expanded.len());
    let mut last = 0;

    for caps in EXPLICIT_LINK_RE.captures_iter(&expanded) {
        let (Some(whole), Some(label), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        out.push_str(expanded.get(last..whole.start()).unwrap_or_default());
        last = whole.end();

        let target = target.as_str();
        if is_external(target) {
            out.push_str(whole.as_str());
            continue;
        }

        let key = local_key(target);
        let Some(main_id) = registry.lookup(&key) else {
            return Err(Error::InvalidLink {
                article: article_id.to_string(),
                file: file.to_path_buf(),
                target: target.to_string(),
            });
        };

        dependencies.push(main_id.to_string());
        out.push('[');
        out.push_str(label.as_str());
        out.push_str("](#");
        out.push_str(main_id);
        out.push(')');
    }

    out.push_str(expanded.get(last..).unwrap_or_default());
    return Ok(out);
}

/// Replacement for a bare-reference match: `[X]` becomes `[X](X)` unless a
/// `(` follows, in which case the text is kept as is.
fn expand_bare_reference(caps: &Captures<'_>) -> String {
    let whole = caps.get(0).map_or("", |m| return m.as_str());
    if caps.get(2).is_some() {
        return whole.to_string();
    }
    let text = caps.get(1).map_or("", |m| return m.as_str());
    return format!("[{text}]({text})");
}

/// Targets pointing outside the document are passed through unvalidated.
fn is_external(target: &str) -> bool {
    return target.contains("://") || target.starts_with("mailto:");
}

/// Lookup key for a target: trimmed, lowercased, local `#` anchor stripped.
fn local_key(target: &str) -> String {
    let trimmed = target.trim();
    return trimmed.strip_prefix('#').unwrap_or(trimmed).to_lowercase();
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use super::*;

    fn article(main_id: &str, title: &str, synonyms: &[&str], body: &[&str]) -> Article {
        let mut ids: BTreeSet<String> = synonyms.iter().map(|s| s.to_lowercase()).collect();
        ids.insert(main_id.to_string());
        ids.insert(title.to_lowercase());
        Article {
            body: body.iter().map(|l| l.to_string()).collect(),
            draft: false,
            ids,
            main_id: main_id.to_string(),
            source: PathBuf::from("x"),
            title: title.to_string(),
        }
    }

    fn corpus() -> Vec<Article> {
        vec![
            article("foo", "Foo", &[], &[]),
            article("set", "Set", &["sets"], &[]),
            article("empty-set", "Empty Set", &[], &[]),
        ]
    }

    fn run(line: &str) -> Result<(String, Vec<String>), Error> {
        let articles = corpus();
        let registry = Registry::build(&articles).unwrap();
        let mut deps = Vec::new();
        let out = resolve_line(line, "test", Path::new("x"), &registry, &mut deps)?;
        Ok((out, deps))
    }

    #[test]
    fn emphasis_records_no_dependency() {
        let (out, deps) = run("a [[Foo]] here").unwrap();
        assert_eq!(out, "a *Foo* here");
        assert!(deps.is_empty());
    }

    #[test]
    fn bare_and_explicit_contribute_identically() {
        let (bare, bare_deps) = run("see [Foo]").unwrap();
        let (explicit, explicit_deps) = run("see [Foo](foo)").unwrap();
        assert_eq!(bare, "see [Foo](#foo)");
        assert_eq!(explicit, bare);
        assert_eq!(bare_deps, vec!["foo"]);
        assert_eq!(explicit_deps, bare_deps);
    }

    #[test]
    fn resolves_titles_and_synonyms_to_main_id() {
        let (out, deps) = run("An [Empty Set] has no [elements](Sets).").unwrap();
        assert_eq!(out, "An [Empty Set](#empty-set) has no [elements](#set).");
        assert_eq!(deps, vec!["empty-set", "set"]);
    }

    #[test]
    fn keeps_duplicate_dependencies_in_order() {
        let (_, deps) = run("[set], [Foo] and [sets]").unwrap();
        assert_eq!(deps, vec!["set", "foo", "set"]);
    }

    #[test]
    fn restricted_brackets_are_left_alone() {
        let line = "cite [1], pair [a,b], call [f(x)] and [x;y]";
        let (out, deps) = run(line).unwrap();
        assert_eq!(out, line);
        assert!(deps.is_empty());
    }

    #[test]
    fn external_links_pass_through() {
        let line = "see [docs](https://example.com/a) or [mail](mailto:a@b.c)";
        let (out, deps) = run(line).unwrap();
        assert_eq!(out, line);
        assert!(deps.is_empty());
    }

    #[test]
    fn unknown_target_is_invalid_link() {
        let err = run("see [nothing]").unwrap_err();
        assert!(matches!(err, Error::InvalidLink { ref target, .. } if target == "nothing"));
    }

    #[test]
    fn invalid_link_names_the_source_file() {
        let articles = corpus();
        let registry = Registry::build(&articles).unwrap();
        let mut source = article("x", "X", &[], &["fine [Foo]", "then [nothing]"]);
        source.source = PathBuf::from("topics/notes.txt");

        let err = resolve(&source, &registry).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLink { ref article, ref file, ref target }
                if article == "x" && file == Path::new("topics/notes.txt") && target == "nothing"
        ));
    }

    #[test]
    fn resolution_is_idempotent() {
        let articles = corpus();
        let registry = Registry::build(&articles).unwrap();
        let source = article("x", "X", &[], &["[[Foo]] is a [Set] of [Empty Set](empty-set)."]);

        let once = resolve(&source, &registry).unwrap();
        let again_input = Article {
            body: once.body.clone(),
            ..source.clone()
        };
        let twice = resolve(&again_input, &registry).unwrap();

        assert_eq!(once.body, vec!["*Foo* is a [Set](#set) of [Empty Set](#empty-set)."]);
        assert_eq!(twice.body, once.body);
        assert_eq!(twice.dependencies, once.dependencies);
    }

    #[test]
    fn source_article_is_not_modified() {
        let articles = corpus();
        let registry = Registry::build(&articles).unwrap();
        let source = article("x", "X", &[], &["see [Foo]"]);

        let resolved = resolve(&source, &registry).unwrap();
        assert_eq!(source.body, vec!["see [Foo]"]);
        assert_eq!(resolved.body, vec!["see [Foo](#foo)"]);
        assert_eq!(resolved.dependencies, vec!["foo"]);
    }
}
