use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::error::{TileError, TileResult};

/// Symbols addressed by a mask file's numeric prefix (`0-*.png` is `a`, `26-*.png` is `0`, ...).
pub const MASK_SYMBOLS: [&str; 44] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "exclamation", "question", "hash", "at", "heart", "star", "plus", "minus",
];

/// One named alpha mask.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskEntry {
    pub name: String,
    pub pixels: RgbaImage,
}

/// Ordered, immutable set of masks read once per run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaskCatalog {
    entries: Vec<MaskEntry>,
}

impl MaskCatalog {
    pub fn new(entries: Vec<MaskEntry>) -> Self {
        Self { entries }
    }

    /// Load every non-hidden image in `dir`, ordered by numeric prefix then file name.
    #[tracing::instrument]
    pub fn load_dir(dir: &Path) -> TileResult<Self> {
        let read = std::fs::read_dir(dir)
            .with_context(|| format!("read mask directory '{}'", dir.display()))?;

        let mut files: Vec<(Option<u64>, String, PathBuf)> = Vec::new();
        for entry in read {
            let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            files.push((numeric_prefix(&file_name), file_name, path));
        }
        // Unnumbered masks go last.
        files.sort_by(|a, b| (a.0.is_none(), a.0, &a.1).cmp(&(b.0.is_none(), b.0, &b.1)));

        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        let mut entries = Vec::with_capacity(files.len());
        for (_, file_name, path) in files {
            let name = mask_name(&file_name);
            if let Some(first) = seen.insert(name.clone(), file_name.clone()) {
                return Err(TileError::config(format!(
                    "masks '{first}' and '{file_name}' both resolve to the name '{name}'"
                )));
            }
            let pixels = image::open(&path)
                .map_err(|e| TileError::decode(format!("mask '{}': {e}", path.display())))?
                .to_rgba8();
            entries.push(MaskEntry { name, pixels });
        }

        if entries.is_empty() {
            return Err(TileError::config(format!(
                "mask directory '{}' contains no masks",
                dir.display()
            )));
        }
        tracing::info!(masks = entries.len(), "loaded mask catalog");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MaskEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Human-readable mask name for a file.
///
/// A numeric prefix selects a [`MASK_SYMBOLS`] entry; past the end of the table the digits
/// themselves are the name. Files without a prefix are named by their stem.
pub fn mask_name(file_name: &str) -> String {
    let digits: String = file_name.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Path::new(file_name)
            .file_stem()
            .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned());
    }

    digits
        .parse::<usize>()
        .ok()
        .and_then(|n| MASK_SYMBOLS.get(n))
        .map_or(digits, |s| (*s).to_string())
}

fn numeric_prefix(file_name: &str) -> Option<u64> {
    let digits: String = file_name.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/masks/catalog.rs"]
mod tests;
