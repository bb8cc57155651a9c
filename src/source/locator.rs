use std::path::{Path, PathBuf};

use crate::foundation::error::{TileError, TileResult};

/// File extensions accepted as sources (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Whether a source is decoded as one still image or demultiplexed into animation frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Static,
    Animated,
}

/// Where the source bytes live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    Remote(String),
}

/// A validated source locator: location, declared kind and lowercase extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locator {
    location: SourceLocation,
    kind: SourceKind,
    extension: String,
}

impl Locator {
    /// Classify and validate a user-supplied locator string.
    ///
    /// A locator wrapped in single quotes (as some terminals produce on drag-and-drop) is
    /// unquoted before classification. Remote locators are recognised by an `http://` or
    /// `https://` prefix.
    pub fn parse(input: &str) -> TileResult<Self> {
        let raw = unquote(input.trim());
        if raw.is_empty() {
            return Err(TileError::config("no source image given"));
        }

        let remote = is_remote(raw);
        let extension = if remote {
            url_extension(raw)
        } else {
            Path::new(raw)
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
        }
        .ok_or_else(|| TileError::config(format!("source '{raw}' has no file extension")))?;

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(TileError::config(format!(
                "unsupported source extension '.{extension}' (expected one of {})",
                SUPPORTED_EXTENSIONS.map(|e| format!(".{e}")).join(" ")
            )));
        }

        let kind = if extension == "gif" {
            SourceKind::Animated
        } else {
            SourceKind::Static
        };
        let location = if remote {
            SourceLocation::Remote(raw.to_string())
        } else {
            SourceLocation::Local(PathBuf::from(raw))
        };

        Ok(Self {
            location,
            kind,
            extension,
        })
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Lowercase extension without the leading dot (`"png"`, `"jpeg"`, ...).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.location, SourceLocation::Remote(_))
    }

    /// File name without extension, used as the default run name.
    pub fn file_stem(&self) -> Option<String> {
        let name = match &self.location {
            SourceLocation::Local(p) => p.file_stem()?.to_str()?.to_string(),
            SourceLocation::Remote(url) => {
                let last = strip_query(url).rsplit('/').next()?;
                last.rsplit_once('.').map_or(last, |(stem, _)| stem).to_string()
            }
        };
        (!name.is_empty()).then_some(name)
    }

    /// The locator as it should be remembered (unquoted, as typed).
    pub fn as_string(&self) -> String {
        match &self.location {
            SourceLocation::Local(p) => p.display().to_string(),
            SourceLocation::Remote(url) => url.clone(),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

fn unquote(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn is_remote(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

fn url_extension(url: &str) -> Option<String> {
    let path = strip_query(url);
    let last = path.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/source/locator.rs"]
mod tests;
