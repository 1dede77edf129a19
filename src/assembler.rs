//! Renders resolved chapters into the final markdown document.
//!
//! Heading levels and anchor syntax are consumed by an external markdown
//! renderer for in-page links and must stay stable.

use std::fmt::Write as _;

use crate::types::{Chapter, ResolvedArticle};

/// Prefix that keeps chapter anchors apart from article anchors.
const CHAPTER_ANCHOR_PREFIX: &str = "chapter-";

/// Render the table of contents followed by every chapter body.
/// Drafts appear in neither.
pub fn assemble(chapters: &[Chapter<ResolvedArticle>]) -> String {
    let mut out = String::new();
    render_toc(&mut out, chapters);
    for chapter in chapters {
        render_chapter(&mut out, chapter);
    }
    return out;
}

/// Anchor id of a chapter.
fn chapter_anchor(chapter: &Chapter<ResolvedArticle>) -> String {
    return format!("{CHAPTER_ANCHOR_PREFIX}{}", chapter.info.id);
}

/// Chapter headings, each followed by links to its published articles.
fn render_toc(out: &mut String, chapters: &[Chapter<ResolvedArticle>]) {
    out.push_str("# Contents\n\n");

    for chapter in chapters {
        let _ = writeln!(out, "## [{}](#{})\n", chapter.info.title, chapter_anchor(chapter));

        let links: Vec<String> = chapter
            .published()
            .map(|a| return format!("[{}](#{})", a.title, a.main_id))
            .collect();
        if links.is_empty() {
            continue;
        }

        if chapter.info.compact_toc {
            let _ = writeln!(out, "{}\n", links.join(", "));
        } else {
            for link in &links {
                let _ = writeln!(out, "- {link}");
            }
            out.push('\n');
        }
    }
}

/// Anchor, heading, optional intro, then every published article.
fn render_chapter(out: &mut String, chapter: &Chapter<ResolvedArticle>) {
    let _ = writeln!(out, "<a id=\"{}\"></a>\n", chapter_anchor(chapter));
    let _ = writeln!(out, "# {}\n", chapter.info.title);

    if let Some(intro) = chapter.info.intro.as_deref().map(str::trim).filter(|s| return !s.is_empty()) {
        let _ = writeln!(out, "{intro}\n");
    }

    let mut skipped = 0_usize;
    for article in &chapter.articles {
        if article.draft {
            skipped = skipped.saturating_add(1);
            continue;
        }
        render_article(out, &chapter.info.title_prefix, article);
    }

    if skipped > 0 {
        tracing::debug!(chapter = %chapter.info.id, drafts = skipped, "left drafts out of output");
    }
}

/// One article: anchor, prefixed heading, body without surrounding blank lines.
fn render_article(out: &mut String, title_prefix: &str, article: &ResolvedArticle) {
    let _ = writeln!(out, "<a id=\"{}\"></a>\n", article.main_id);
    let _ = writeln!(out, "## {title_prefix}{}\n", article.title);

    let body = trim_blank_lines(&article.body);
    if body.is_empty() {
        return;
    }
    for line in body {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

/// Drop leading and trailing whitespace-only lines.
fn trim_blank_lines(lines: &[String]) -> &[String] {
    let is_blank = |l: &String| return l.trim().is_empty();
    let start = lines.iter().position(|l| return !is_blank(l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| return !is_blank(l)).map_or(start, |i| return i.saturating_add(1));
    return lines.get(start..end).unwrap_or_default();
}
