use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;
use crate::patterns::{is_canonical_id, suggest_id};
use crate::types::ChapterInfo;

/// Name of the optional configuration file at the corpus root.
pub const CONFIG_FILE: &str = "crossdoc.toml";

/// Chapter that gets the strict ordering policy unless configured otherwise.
const STRICT_CHAPTER: &str = "definitions";

/// Heading prefix used by the strict chapter when discovered without a config.
const STRICT_TITLE_PREFIX: &str = "Definition: ";

/// Book configuration: the ordered list of chapters.
pub struct Config {
    /// Chapters in output order.
    pub chapters: Vec<ChapterInfo>,
}

/// Raw TOML structure for `crossdoc.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CrossdocTomlConfig {
    #[serde(default, rename = "chapter")]
    chapters: Vec<ChapterTomlConfig>,
}

/// One `[[chapter]]` table. Everything but `id` has a default.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ChapterTomlConfig {
    compact_toc: Option<bool>,
    folder: Option<PathBuf>,
    id: String,
    intro: Option<String>,
    strict: Option<bool>,
    title: Option<String>,
    title_prefix: Option<String>,
}

impl Config {
    /// Load config from `crossdoc.toml` in the corpus root.
    /// Without the file, every visible subdirectory of the root becomes a
    /// chapter. A file that exists but is malformed is an error, never a
    /// silent fallback to discovery.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed, `Error::ConfigInvalid`
    /// for bad or repeated chapter ids, or `Error::DuplicateChapter` when
    /// two discovered folders share an id.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::discover(root),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let config = Self::parse(&content)?;
        config.check_chapter_ids(&path)?;
        return Ok(config);
    }

    /// Parse the contents of a `crossdoc.toml`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: CrossdocTomlConfig = toml::from_str(content)?;
        let chapters = raw.chapters.into_iter().map(chapter_from_toml).collect();
        return Ok(Self { chapters });
    }

    /// One chapter per visible subdirectory of `root`, ordered by name.
    /// The folder keeps its real name; the chapter id is derived from it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Walk` if the root cannot be listed,
    /// `Error::ConfigInvalid` if a folder name yields no id at all, or
    /// `Error::DuplicateChapter` if two folders yield the same id.
    fn discover(root: &Path) -> Result<Self, Error> {
        let mut chapters = Vec::new();
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.file_type().is_dir() || name.starts_with('.') {
                continue;
            }

            let id = suggest_id(&name);
            if id.is_empty() {
                return Err(Error::ConfigInvalid {
                    path: entry.path().to_path_buf(),
                    reason: "folder name has no letters or digits to derive a chapter id from"
                        .to_string(),
                });
            }
            if let Some(first) = claimed.get(&id) {
                return Err(Error::DuplicateChapter {
                    first: first.clone(),
                    id,
                    second: PathBuf::from(&name),
                });
            }
            if id != name {
                tracing::debug!(folder = %name, chapter = %id, "derived chapter id");
            }
            claimed.insert(id.clone(), PathBuf::from(&name));
            chapters.push(default_chapter(id, name));
        }

        return Ok(Self { chapters });
    }

    /// Chapter ids must be canonical and unique since they become anchors.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigInvalid` naming the first offending id.
    fn check_chapter_ids(&self, path: &Path) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for chapter in &self.chapters {
            if !is_canonical_id(&chapter.id) {
                return Err(Error::ConfigInvalid {
                    path: path.to_path_buf(),
                    reason: format!("chapter id `{}` is not a valid id", chapter.id),
                });
            }
            if !seen.insert(chapter.id.as_str()) {
                return Err(Error::ConfigInvalid {
                    path: path.to_path_buf(),
                    reason: format!("chapter id `{}` is declared twice", chapter.id),
                });
            }
        }
        return Ok(());
    }
}

/// Fill in defaults for a configured chapter.
fn chapter_from_toml(raw: ChapterTomlConfig) -> ChapterInfo {
    let is_strict_chapter = raw.id == STRICT_CHAPTER;
    return ChapterInfo {
        compact_toc: raw.compact_toc.unwrap_or(false),
        folder: raw.folder.unwrap_or_else(|| return PathBuf::from(&raw.id)),
        intro: raw.intro,
        strict: raw.strict.unwrap_or(is_strict_chapter),
        title: raw.title.unwrap_or_else(|| return title_from_id(&raw.id)),
        title_prefix: raw.title_prefix.unwrap_or_default(),
        id: raw.id,
    };
}

/// Settings for a chapter discovered from its folder name.
fn default_chapter(id: String, folder: String) -> ChapterInfo {
    let is_strict_chapter = id == STRICT_CHAPTER;
    let title_prefix = if is_strict_chapter { STRICT_TITLE_PREFIX } else { "" };
    return ChapterInfo {
        compact_toc: is_strict_chapter,
        folder: PathBuf::from(folder),
        intro: None,
        strict: is_strict_chapter,
        title: title_from_id(&id),
        title_prefix: title_prefix.to_string(),
        id,
    };
}

/// `set-theory` becomes `Set theory`.
fn title_from_id(id: &str) -> String {
    let spaced = id.replace('-', " ");
    let mut chars = spaced.chars();
    return match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chapters_with_defaults() {
        let config = Config::parse(
            r#"
[[chapter]]
id = "definitions"

[[chapter]]
id = "notes"
title = "Field Notes"
folder = "src/notes"
intro = "Loose ends."
title_prefix = "Note: "
compact_toc = true
"#,
        )
        .unwrap();

        assert_eq!(config.chapters.len(), 2);
        let defs = &config.chapters[0];
        assert!(defs.strict);
        assert_eq!(defs.title, "Definitions");
        assert_eq!(defs.folder, PathBuf::from("definitions"));
        assert!(!defs.compact_toc);

        let notes = &config.chapters[1];
        assert!(!notes.strict);
        assert!(notes.compact_toc);
        assert_eq!(notes.title, "Field Notes");
        assert_eq!(notes.folder, PathBuf::from("src/notes"));
        assert_eq!(notes.intro.as_deref(), Some("Loose ends."));
        assert_eq!(notes.title_prefix, "Note: ");
    }

    #[test]
    fn strict_flag_overrides_default() {
        let config = Config::parse("[[chapter]]\nid = \"definitions\"\nstrict = false\n").unwrap();
        assert!(!config.chapters[0].strict);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::parse("[[chapter]]\nid = \"a\"\ncolour = \"red\"\n").err().unwrap();
        assert!(matches!(err, Error::TomlDe(_)));
    }

    #[test]
    fn rejects_duplicate_chapter_ids() {
        let config = Config::parse("[[chapter]]\nid = \"a\"\n[[chapter]]\nid = \"a\"\n").unwrap();
        let err = config.check_chapter_ids(Path::new(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn discovers_visible_folders_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["topics", "definitions", ".git"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("README"), "not a chapter").unwrap();

        let config = Config::load(dir.path()).unwrap();
        let ids: Vec<&str> = config.chapters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["definitions", "topics"]);

        let defs = &config.chapters[0];
        assert!(defs.strict);
        assert!(defs.compact_toc);
        assert_eq!(defs.title_prefix, STRICT_TITLE_PREFIX);
        assert!(!config.chapters[1].strict);
        assert_eq!(config.chapters[1].title, "Topics");
    }

    #[test]
    fn discovered_folder_names_become_canonical_ids() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["My_Notes", "Definitions"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }

        let config = Config::load(dir.path()).unwrap();
        let ids: Vec<&str> = config.chapters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["definitions", "my-notes"]);

        let defs = &config.chapters[0];
        assert!(defs.strict);
        assert_eq!(defs.folder, PathBuf::from("Definitions"));

        let notes = &config.chapters[1];
        assert_eq!(notes.folder, PathBuf::from("My_Notes"));
        assert_eq!(notes.title, "My notes");
        assert!(!notes.strict);
    }

    #[test]
    fn folders_mapping_to_one_id_collide() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["My_Notes", "my-notes"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }

        let err = Config::load(dir.path()).err().unwrap();
        assert!(matches!(
            err,
            Error::DuplicateChapter { ref first, ref id, ref second }
                if id == "my-notes"
                    && first == Path::new("My_Notes")
                    && second == Path::new("my-notes")
        ));
    }

    #[test]
    fn folder_without_alphanumerics_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("___")).unwrap();

        let err = Config::load(dir.path()).err().unwrap();
        assert!(matches!(err, Error::ConfigInvalid { ref path, .. } if path.ends_with("___")));
    }

    #[test]
    fn title_from_hyphenated_id() {
        assert_eq!(title_from_id("set-theory"), "Set theory");
        assert_eq!(title_from_id(""), "");
    }
}
