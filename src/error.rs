/// Crate-level error types for crossdoc diagnostics.
use std::path::PathBuf;

/// Every failure aborts the build. Each variant names the identifier,
/// article, or file needed to fix the corpus without a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured chapter folder does not exist.
    #[error("chapter `{chapter}` folder not found: {}", folder.display())]
    ChapterNotFound {
        /// Chapter identifier from the configuration.
        chapter: String,
        /// Folder that was expected on disk.
        folder: PathBuf,
    },

    /// The configuration file parsed but describes an impossible book.
    #[error("invalid config {}: {reason}", path.display())]
    ConfigInvalid {
        /// Configuration file, or the folder a chapter was discovered from.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Two discovered chapter folders map to the same chapter id.
    #[error("chapter folders `{}` and `{}` both map to chapter id `{id}`", first.display(), second.display())]
    DuplicateChapter {
        /// Folder that claimed the id first.
        first: PathBuf,
        /// The shared chapter id.
        id: String,
        /// Folder whose id collided.
        second: PathBuf,
    },

    /// The same case-folded identifier is declared twice in the corpus.
    #[error("duplicate article ID: `{id}` declared by `{article}`, already owned by `{owner}`")]
    DuplicateId {
        /// Article whose declaration collided.
        article: String,
        /// The colliding identifier.
        id: String,
        /// Article that registered the identifier first.
        owner: String,
    },

    /// A separator line carries a token that is not a canonical id.
    #[error("syntax error: invalid article ID `{token}` at {}:{line}", file.display())]
    InvalidId {
        /// Source file containing the separator.
        file: PathBuf,
        /// One-based line number of the separator.
        line: u32,
        /// The offending token.
        token: String,
    },

    /// A link target is not present in the identifier registry.
    #[error("invalid link: `{target}` in article `{article}` ({})", file.display())]
    InvalidLink {
        /// Article whose body holds the link.
        article: String,
        /// Source file of the article.
        file: PathBuf,
        /// Target as written in the link.
        target: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// An article header ended without a non-empty `title` field.
    #[error("missing title in article `{article}` ({}:{line})", file.display())]
    MissingTitle {
        /// Article identifier.
        article: String,
        /// Source file of the article.
        file: PathBuf,
        /// One-based line number of the article's separator.
        line: u32,
    },

    /// A strict chapter article depends on itself, a later article, or an
    /// article outside the chapter.
    #[error("article `{article}` depends on unknown/later article `{target}` ({reason}) in strict chapter `{chapter}`")]
    OrderViolation {
        /// Dependent article.
        article: String,
        /// Strict chapter identifier.
        chapter: String,
        /// Why the dependency is not visible at this point.
        reason: &'static str,
        /// Dependency target.
        target: String,
    },

    /// TOML deserialization of the configuration failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A dependency target is not any article's identifier.
    #[error("article `{article}` depends on unknown article `{target}`")]
    UnknownDependency {
        /// Dependent article.
        article: String,
        /// Missing identifier.
        target: String,
    },

    /// A header line used a key other than `title`, `synonyms`, or `draft`.
    #[error("unsupported field `{field}` in article `{article}` ({}:{line})", file.display())]
    UnsupportedField {
        /// Article identifier.
        article: String,
        /// The unrecognized key.
        field: String,
        /// Source file of the article.
        file: PathBuf,
        /// One-based line number of the article's separator.
        line: u32,
    },

    /// Directory traversal failed.
    #[error("walk: {0}")]
    Walk(
        /// The wrapped traversal error.
        #[from]
        walkdir::Error,
    ),
}
