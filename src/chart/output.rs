//! Output format detection and figure encoding

use std::path::Path;

use crate::{Error, Result};

/// Image format written for an output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG
    Jpeg,
    /// Windows bitmap
    Bmp,
    /// Scalable Vector Graphics
    Svg,
}

impl OutputFormat {
    /// Infer the format from a path's extension (case-insensitive).
    ///
    /// A path without an extension is written as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the extension has no renderer.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(ext) = path.extension() else {
            return Ok(Self::Png);
        };
        let ext = ext.to_string_lossy().to_ascii_lowercase();

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "svg" => Ok(Self::Svg),
            other => Err(Error::UnsupportedFormat(format!(
                ".{other} ({})",
                path.display()
            ))),
        }
    }

    /// Check if the format is drawn into a pixel buffer.
    #[must_use]
    pub const fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }

    const fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Svg => None,
        }
    }
}

/// A fully drawn figure held in memory until it is written.
#[derive(Debug)]
pub enum EncodedFigure {
    /// RGB8 pixel buffer
    Raster {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Row-major RGB bytes
        pixels: Vec<u8>,
    },
    /// SVG document
    Svg(String),
}

impl EncodedFigure {
    /// Write the figure to `path` in `format`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Image`] if the file cannot be
    /// written, or [`Error::UnsupportedFormat`] if `format` does not match
    /// the figure kind.
    pub fn write(self, path: &Path, format: OutputFormat) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match (self, format.image_format()) {
            (Self::Svg(document), None) => std::fs::write(path, document)?,
            (
                Self::Raster {
                    width,
                    height,
                    pixels,
                },
                Some(image_format),
            ) => {
                let buffer = image::RgbImage::from_raw(width, height, pixels).ok_or_else(|| {
                    Error::Render(format!("pixel buffer does not hold {width}x{height} RGB"))
                })?;
                buffer.save_with_format(path, image_format)?;
            }
            (_, _) => {
                return Err(Error::UnsupportedFormat(format!(
                    "{format:?} does not match the drawn figure"
                )))
            }
        }
        Ok(())
    }
}
