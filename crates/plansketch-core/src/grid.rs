//! Grid definition and layout. The scene surface does the actual drawing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{GridLine, Orientation, SerializableColor};

/// Default minor grid spacing in pixels.
pub const DEFAULT_SMALL_SPACING: f64 = 10.0;

/// Default major grid spacing in pixels.
pub const DEFAULT_LARGE_SPACING: f64 = 50.0;

/// Invalid grid configuration.
#[derive(Debug, Error, PartialEq)]
pub enum GridConfigError {
    #[error("grid spacing must be positive, got {0}")]
    NonPositiveSpacing(f64),
    #[error("large spacing {large} is not an integer multiple of small spacing {small}")]
    NotAMultiple { small: f64, large: f64 },
}

/// Grid line counts per axis for a given canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLineCount {
    pub vertical: usize,
    pub horizontal: usize,
}

/// Grid spacing and colors.
///
/// Invariant: `large_spacing` is an exact integer multiple of
/// `small_spacing`, enforced at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig")]
pub struct GridConfig {
    small_spacing: f64,
    large_spacing: f64,
    pub small_color: SerializableColor,
    pub large_color: SerializableColor,
}

/// Unvalidated mirror of [`GridConfig`]; persisted data re-checks the
/// spacing invariant on load.
#[derive(Deserialize)]
struct RawGridConfig {
    small_spacing: f64,
    large_spacing: f64,
    small_color: SerializableColor,
    large_color: SerializableColor,
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = GridConfigError;

    fn try_from(raw: RawGridConfig) -> Result<Self, Self::Error> {
        let mut config = GridConfig::new(raw.small_spacing, raw.large_spacing)?;
        config.small_color = raw.small_color;
        config.large_color = raw.large_color;
        Ok(config)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            small_spacing: DEFAULT_SMALL_SPACING,
            large_spacing: DEFAULT_LARGE_SPACING,
            small_color: SerializableColor::light_gray(),
            large_color: SerializableColor::gray(),
        }
    }
}

impl GridConfig {
    /// Create a validated grid configuration.
    pub fn new(small_spacing: f64, large_spacing: f64) -> Result<Self, GridConfigError> {
        if small_spacing <= 0.0 {
            return Err(GridConfigError::NonPositiveSpacing(small_spacing));
        }
        if large_spacing <= 0.0 {
            return Err(GridConfigError::NonPositiveSpacing(large_spacing));
        }
        let ratio = large_spacing / small_spacing;
        if (ratio - ratio.round()).abs() > 1e-9 || ratio < 1.0 {
            return Err(GridConfigError::NotAMultiple {
                small: small_spacing,
                large: large_spacing,
            });
        }
        Ok(Self {
            small_spacing,
            large_spacing,
            ..Self::default()
        })
    }

    pub fn small_spacing(&self) -> f64 {
        self.small_spacing
    }

    pub fn large_spacing(&self) -> f64 {
        self.large_spacing
    }

    /// How many minor intervals make up a major interval.
    pub fn major_ratio(&self) -> usize {
        (self.large_spacing / self.small_spacing).round() as usize
    }

    /// Whether the grid line at `index` (0-based from the canvas origin)
    /// lies on the major interval.
    pub fn is_major_line(&self, index: usize) -> bool {
        index % self.major_ratio() == 0
    }

    /// Number of grid lines needed to cover a canvas, per axis.
    pub fn line_counts(&self, canvas_width: f64, canvas_height: f64) -> GridLineCount {
        GridLineCount {
            vertical: (canvas_width / self.small_spacing).ceil() as usize + 1,
            horizontal: (canvas_height / self.small_spacing).ceil() as usize + 1,
        }
    }

    /// Emit the grid-line entities covering a canvas.
    ///
    /// The scene surface draws these; they carry the grid tag so hit-testing,
    /// selection, and export skip them.
    pub fn layout(&self, canvas_width: f64, canvas_height: f64) -> Vec<GridLine> {
        let counts = self.line_counts(canvas_width, canvas_height);
        let mut lines = Vec::with_capacity(counts.vertical + counts.horizontal);

        for index in 0..counts.vertical {
            let major = self.is_major_line(index);
            lines.push(GridLine::new(
                Orientation::Vertical,
                index as f64 * self.small_spacing,
                canvas_height,
                major,
                if major { self.large_color } else { self.small_color },
            ));
        }
        for index in 0..counts.horizontal {
            let major = self.is_major_line(index);
            lines.push(GridLine::new(
                Orientation::Horizontal,
                index as f64 * self.small_spacing,
                canvas_width,
                major,
                if major { self.large_color } else { self.small_color },
            ));
        }
        lines
    }
}
