use std::path::{Path, PathBuf};

use crate::foundation::error::{TileError, TileResult};
use crate::source::locator::{Locator, SourceKind};

/// Container format of an output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    /// Animated (or single-frame) GIF.
    Gif,
}

impl OutputFormat {
    /// Map a lowercase file extension onto a format.
    pub fn from_extension(ext: &str) -> TileResult<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "gif" => Ok(Self::Gif),
            other => Err(TileError::config(format!(
                "no output format for extension '.{other}'"
            ))),
        }
    }

    /// Output format for a source: animations always become GIFs, stills keep their format.
    pub fn for_source(locator: &Locator) -> TileResult<Self> {
        match locator.kind() {
            SourceKind::Animated => Ok(Self::Gif),
            SourceKind::Static => Self::from_extension(locator.extension()),
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Gif => image::ImageFormat::Gif,
        }
    }
}

/// Naming and format of one output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDescriptor {
    base_name: String,
    suffix: Option<String>,
    format: OutputFormat,
    extension: String,
}

impl OutputDescriptor {
    /// Descriptor for an output in a set of `count` outputs.
    ///
    /// `suffix` is dropped when `count == 1`. `extension` is used for still formats so the
    /// source spelling (`jpg` vs `jpeg`) survives; GIF outputs always end in `.gif`.
    pub fn new(
        base_name: &str,
        suffix: impl Into<String>,
        count: usize,
        format: OutputFormat,
        extension: &str,
    ) -> Self {
        let extension = match format {
            OutputFormat::Gif => "gif".to_string(),
            _ => extension.to_ascii_lowercase(),
        };
        Self {
            base_name: base_name.to_string(),
            suffix: (count != 1).then(|| suffix.into()),
            format,
            extension,
        }
    }

    /// Descriptor for grid tile `index` (zero-based) of `count`; suffixes are one-based.
    pub fn for_tile(
        base_name: &str,
        index: usize,
        count: usize,
        format: OutputFormat,
        extension: &str,
    ) -> Self {
        Self::new(base_name, (index + 1).to_string(), count, format, extension)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// `name.ext` or `name-suffix.ext`.
    pub fn file_name(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}-{}.{}", self.base_name, suffix, self.extension),
            None => format!("{}.{}", self.base_name, self.extension),
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
