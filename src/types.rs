/// Core domain types: raw records, parsed and resolved articles, chapters.
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One record cut out of a source file by the splitter. Lines are verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    /// Identifier token from the separator line, already validated.
    pub id: String,
    /// One-based line number of the separator in the source file.
    pub line: u32,
    /// Every line after the separator up to the next one.
    pub lines: Vec<String>,
    /// File the record was read from.
    pub source: PathBuf,
}

/// An article after header parsing. The body is still unresolved.
#[derive(Debug, Clone)]
pub struct Article {
    /// Unresolved body lines, in source order.
    pub body: Vec<String>,
    /// Excluded from output when set, but still registered and validated.
    pub draft: bool,
    /// Case-folded identifiers: main id, lowercased title, synonyms.
    pub ids: BTreeSet<String>,
    /// Canonical identifier taken from the separator line.
    pub main_id: String,
    /// File the article was read from.
    pub source: PathBuf,
    /// Display title from the `title` header.
    pub title: String,
}

/// An article whose body links point at canonical local anchors.
/// Produced from an `Article` without mutating it.
#[derive(Debug, Clone)]
pub struct ResolvedArticle {
    /// Body lines with emphasis and links rewritten.
    pub body: Vec<String>,
    /// Canonical ids of every link target, in order of appearance. May repeat.
    pub dependencies: Vec<String>,
    /// Excluded from output when set.
    pub draft: bool,
    /// All identifiers of the article, as registered.
    pub ids: BTreeSet<String>,
    /// Canonical identifier.
    pub main_id: String,
    /// Display title.
    pub title: String,
}

/// Presentation and policy settings of a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterInfo {
    /// Render the table of contents entry as a single comma-joined line.
    pub compact_toc: bool,
    /// Folder holding the chapter's source files.
    pub folder: PathBuf,
    /// Chapter identifier, used for its anchor.
    pub id: String,
    /// Optional prose rendered once before the articles.
    pub intro: Option<String>,
    /// Use the strict (acyclic, declared-order) dependency policy.
    pub strict: bool,
    /// Display title.
    pub title: String,
    /// Prepended to every article heading in this chapter.
    pub title_prefix: String,
}

/// An ordered group of articles sharing one `ChapterInfo`.
/// Generic so the same shape carries parsed and resolved articles.
#[derive(Debug, Clone)]
pub struct Chapter<A> {
    /// Articles in discovery order.
    pub articles: Vec<A>,
    /// Settings the chapter was declared with.
    pub info: ChapterInfo,
}

impl<A> Chapter<A> {
    /// Articles that appear in rendered output.
    pub fn published(&self) -> impl Iterator<Item = &A>
    where
        A: Publishable,
    {
        return self.articles.iter().filter(|a| return !a.is_draft());
    }
}

/// Anything that can be held back from rendered output.
pub trait Publishable {
    /// Whether the item is a draft.
    fn is_draft(&self) -> bool;
}

impl Publishable for Article {
    fn is_draft(&self) -> bool {
        return self.draft;
    }
}

impl Publishable for ResolvedArticle {
    fn is_draft(&self) -> bool {
        return self.draft;
    }
}
