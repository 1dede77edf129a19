use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;
use crate::patterns::suggest_id;

/// ANSI bold, used for markdown headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ChapterNotFound { chapter, folder } => render_chapter_not_found(chapter, folder),
        Error::DuplicateChapter { first, id, second } => render_duplicate_chapter(first, id, second),
        Error::DuplicateId { article, id, owner } => render_duplicate_id(article, id, owner),
        Error::InvalidId { file, line, token } => render_invalid_id(file, *line, token),
        Error::InvalidLink { article, file, target } => render_invalid_link(article, file, target),
        Error::MissingTitle { article, file, line } => render_missing_title(article, file, *line),
        Error::OrderViolation { article, chapter, reason, target } => {
            render_order_violation(article, chapter, reason, target)
        },
        Error::UnsupportedField { article, field, file, line } => {
            render_unsupported_field(article, field, file, *line)
        },
        Error::ConfigInvalid { .. }
        | Error::Io(_)
        | Error::TomlDe(_)
        | Error::UnknownDependency { .. }
        | Error::Walk(_) => render_generic(e),
    };
}

/// Errors whose message already says everything.
fn render_generic(e: &Error) -> String {
    return match e {
        Error::ConfigInvalid { path, reason } => format!("\
# Error: Invalid Config

`{}`: {reason}
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check `{CONFIG_FILE}` against the documented `[[chapter]]` keys.
"),

        _ => format!("\
# Error

{e}
"),
    };
}

fn render_chapter_not_found(chapter: &str, folder: &Path) -> String {
    return format!("\
# Error: Chapter Not Found

Chapter `{chapter}` reads from `{}`, which is not a directory.

## Fix

Create the folder or set `folder` for this chapter in `{CONFIG_FILE}`.
", folder.display());
}

fn render_duplicate_chapter(first: &Path, id: &str, second: &Path) -> String {
    return format!("\
# Error: Duplicate Chapter

Folders `{}` and `{}` both become chapter `{id}`.

## Fix

Rename one of the folders, or list the chapters in `{CONFIG_FILE}` with
distinct ids.
", first.display(), second.display());
}

fn render_duplicate_id(article: &str, id: &str, owner: &str) -> String {
    return format!("\
# Error: Duplicate Article ID

`{id}` is declared by `{article}` but already belongs to `{owner}`.
Ids include each article's id, its lowercased title, and its synonyms,
compared case-insensitively across the whole corpus.

## Fix

Rename the article, change its title, or drop the synonym `{id}`.
");
}

fn render_invalid_id(file: &Path, line: u32, token: &str) -> String {
    return format!("\
# Error: Invalid Article ID

`{}:{line}` starts an article with `{token}`.
Ids use lowercase letters, digits and inner hyphens only.

## Fix

    *** {}
", file.display(), suggest_id(token));
}

fn render_invalid_link(article: &str, file: &Path, target: &str) -> String {
    return format!("\
# Error: Invalid Link

Article `{article}` in `{}` links to `{target}`, which is no article's id, title, or synonym.

## Fix

Point the link at an existing article, add `{target}` to an article's
`synonyms`, or write `[[{target}]]` for emphasis without a link.
", file.display());
}

fn render_missing_title(article: &str, file: &Path, line: u32) -> String {
    return format!("\
# Error: Missing Title

Article `{article}` at `{}:{line}` has no `title` header.

## Fix

    *** {article}
    title: <display title>
", file.display());
}

fn render_order_violation(article: &str, chapter: &str, reason: &str, target: &str) -> String {
    return format!("\
# Error: Dependency Order

In strict chapter `{chapter}`, article `{article}` depends on `{target}` ({reason}).
Articles here may only link to articles listed before them.

## Fix

Move `{target}` before `{article}`, or link with `[[...]]` emphasis instead.
");
}

fn render_unsupported_field(article: &str, field: &str, file: &Path, line: u32) -> String {
    return format!("\
# Error: Unsupported Field

Article `{article}` at `{}:{line}` declares `{field}:`.

## Supported fields

- `title` (required)
- `synonyms` (comma-separated)
- `draft` (`true` to hide from output)

## Fix

If the line is meant as body text, put a blank line after the header.
", file.display());
}
