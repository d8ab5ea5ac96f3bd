//! INI configuration source: loading and section/key lookups.
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the section whose keys act as fallbacks for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed section from the configuration file.
///
/// # Examples
///
/// ```
/// use mackup_cli::config::source::Section;
///
/// let section = Section {
///     name: "storage".to_string(),
///     entries: vec![("engine".to_string(), Some("dropbox".to_string()))],
/// };
/// assert_eq!(section.value("engine"), Some(Some("dropbox")));
/// assert_eq!(section.value("path"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The section header, case preserved (e.g., `"storage"`).
    pub name: String,
    /// Lowercased keys with their optional values, in file order.
    ///
    /// A bare `key` line with no delimiter is stored as `(key, None)`.
    pub entries: Vec<(String, Option<String>)>,
}

impl Section {
    const fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Look up `key` (already lowercased) in this section.
    ///
    /// The outer `Option` is key presence, the inner one is the value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}

/// The loaded configuration file.
///
/// Read-only after construction. A missing file yields an empty source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    origin: PathBuf,
    sections: Vec<Section>,
    defaults: Section,
}

impl Default for Section {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION.to_string())
    }
}

impl Source {
    /// Load and parse the configuration file at `path`.
    ///
    /// A file that does not exist is not an error: it produces an empty
    /// source so that every setting falls back to its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read
    /// (permissions, invalid UTF-8), or [`ConfigError::InvalidSyntax`] if its
    /// content cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {}, using defaults", path.display());
                String::new()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut source = Self::parse(&content, &path.display().to_string())?;
        source.origin = path.to_path_buf();
        Ok(source)
    }

    /// Parse configuration text. `file` is only used in error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use mackup_cli::config::source::Source;
    ///
    /// let source = Source::parse("[storage]\nengine = file_system\n", "inline").unwrap();
    /// assert!(source.has_section("storage"));
    /// assert_eq!(source.get("storage", "engine"), Some("file_system"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSyntax`] if:
    /// - a key appears before any section header
    /// - a section header is empty or unterminated
    /// - a section or a key within one section is defined twice
    pub fn parse(content: &str, file: &str) -> Result<Self, ConfigError> {
        let syntax = |line: usize, message: String| ConfigError::InvalidSyntax {
            file: file.to_string(),
            line,
            message,
        };

        let mut sections: Vec<Section> = Vec::new();
        let mut defaults = Section::default();
        let mut current: Option<Section> = None;
        // Indentation of the last key that took a value; deeper lines continue it.
        let mut continuable: Option<usize> = None;
        // Blank lines seen since the last value line, kept only if a
        // continuation follows.
        let mut pending_blanks = 0_usize;

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                if continuable.is_some() {
                    pending_blanks += 1;
                }
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = line.len() - line.trim_start().len();

            if let (Some(key_indent), Some(section)) = (continuable, current.as_mut())
                && indent > key_indent
                && let Some((_, Some(value))) = section.entries.last_mut()
            {
                value.push_str(&"\n".repeat(pending_blanks + 1));
                value.push_str(trimmed);
                pending_blanks = 0;
                continue;
            }
            pending_blanks = 0;

            if trimmed.starts_with('[') {
                let name = parse_header(trimmed)
                    .ok_or_else(|| syntax(line_num, format!("invalid section header: {trimmed}")))?;
                let duplicate = name != DEFAULT_SECTION
                    && (sections.iter().any(|s| s.name == name)
                        || current.as_ref().is_some_and(|s| s.name == name));
                if duplicate {
                    return Err(syntax(line_num, format!("section [{name}] already exists")));
                }
                if let Some(section) = current.take() {
                    store(section, &mut sections, &mut defaults);
                }
                // A repeated [DEFAULT] reopens the keys collected so far.
                current = Some(if name == DEFAULT_SECTION {
                    std::mem::take(&mut defaults)
                } else {
                    Section::new(name)
                });
                continuable = None;
                continue;
            }

            let Some(section) = current.as_mut() else {
                return Err(syntax(
                    line_num,
                    format!("missing section header before: {trimmed}"),
                ));
            };

            let (key, value) = parse_entry(trimmed);
            if key.is_empty() {
                return Err(syntax(line_num, format!("empty key: {trimmed}")));
            }
            if section.contains(&key) {
                return Err(syntax(
                    line_num,
                    format!("option '{key}' already exists in section [{}]", section.name),
                ));
            }
            continuable = value.is_some().then_some(indent);
            section.entries.push((key, value));
        }

        if let Some(section) = current {
            store(section, &mut sections, &mut defaults);
        }

        Ok(Self {
            origin: PathBuf::new(),
            sections,
            defaults,
        })
    }

    /// Path the source was loaded from (empty for parsed text).
    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Whether the source has no sections and no default keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.defaults.entries.is_empty()
    }

    /// Section names in file order, excluding `DEFAULT`.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Whether a section named exactly `name` exists. `DEFAULT` never does.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Whether `key` is set in `section`, either directly or through
    /// `DEFAULT`. A key with no value still counts as set.
    ///
    /// Returns `false` when `section` itself does not exist.
    #[must_use]
    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.lookup(section, key).is_some()
    }

    /// Value of `key` in `section` (falling back to `DEFAULT`).
    ///
    /// Returns `None` both when the key is absent and when it is present
    /// without a value; use [`has_option`](Self::has_option) to tell them apart.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.lookup(section, key).flatten()
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn lookup(&self, section: &str, key: &str) -> Option<Option<&str>> {
        let key = key.trim().to_lowercase();
        if section == DEFAULT_SECTION {
            return self.defaults.value(&key);
        }
        self.section(section)?
            .value(&key)
            .or_else(|| self.defaults.value(&key))
    }
}

fn store(section: Section, sections: &mut Vec<Section>, defaults: &mut Section) {
    if section.name == DEFAULT_SECTION {
        *defaults = section;
    } else {
        sections.push(section);
    }
}

/// Parse a `[name]` line, trimming whitespace inside the brackets.
///
/// The name runs to the last `]`; anything after it is ignored, so
/// `[storage] ; main` is the `storage` section.
fn parse_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix('[')?;
    let inner = rest.get(..rest.rfind(']')?)?.trim();
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_string())
}

/// Split a `key = value`, `key: value` or bare `key` line.
///
/// The first `=` or `:` is the delimiter; the key is lowercased.
///
/// # Examples
///
/// - `"Engine = dropbox"` → `("engine", Some("dropbox"))`
/// - `"path: ~/x=y"` → `("path", Some("~/x=y"))`
/// - `"directory"` → `("directory", None)`
fn parse_entry(line: &str) -> (String, Option<String>) {
    match line.find(['=', ':']) {
        Some(idx) => {
            let (key, rest) = line.split_at(idx);
            let value = rest.get(1..).unwrap_or_default().trim();
            (key.trim().to_lowercase(), Some(value.to_string()))
        }
        None => (line.trim().to_lowercase(), None),
    }
}
