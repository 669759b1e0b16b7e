use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::SelectorError;

/// Target generation model and resolution class
///
/// Declaration order is the order the host lists the choices in.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Image to Video 480p
    #[serde(rename = "I2V480p")]
    I2V480p,
    /// Image to Video 720p
    #[default]
    #[serde(rename = "I2V720p")]
    I2V720p,
    /// Text to Video, 1.3B model
    #[serde(rename = "T2V1.3B")]
    T2V1_3B,
    /// Text to Video, 14B model
    #[serde(rename = "T2V14B")]
    T2V14B,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::I2V480p, Mode::I2V720p, Mode::T2V1_3B, Mode::T2V14B];

    /// Get the wire name used by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I2V480p => "I2V480p",
            Self::I2V720p => "I2V720p",
            Self::T2V1_3B => "T2V1.3B",
            Self::T2V14B => "T2V14B",
        }
    }
}

/// Orientation class of the output frame
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    /// Wider than tall (landscape)
    #[default]
    Horizontal,
    /// Taller than wide (portrait)
    Vertical,
    /// Roughly square
    Squarish,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Horizontal,
        AspectRatio::Vertical,
        AspectRatio::Squarish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::Squarish => "Squarish",
        }
    }
}

/// Coarse quality tier selecting among a mode's preset sizes
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    /// Highest available resolution for the mode
    #[default]
    HQ,
    /// Medium quality/resolution
    MQ,
    /// Lower quality/resolution
    LQ,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::HQ, Quality::MQ, Quality::LQ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HQ => "HQ",
            Self::MQ => "MQ",
            Self::LQ => "LQ",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unknown_option(field: &'static str, value: &str) -> SelectorError {
    SelectorError::UnknownOption {
        field,
        value: Arc::new(value.to_string()),
    }
}

// Wire names are matched exactly; the host only ever sends its declared choices.
impl FromStr for Mode {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| unknown_option("mode", s))
    }
}

impl FromStr for AspectRatio {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|aspect| aspect.as_str() == s)
            .ok_or_else(|| unknown_option("aspect_ratio", s))
    }
}

impl FromStr for Quality {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|quality| quality.as_str() == s)
            .ok_or_else(|| unknown_option("quality", s))
    }
}

/// A frame size in pixels
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Resolution {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<Resolution> for (u32, u32) {
    fn from(resolution: Resolution) -> Self {
        (resolution.width, resolution.height)
    }
}

/// Raw selector values as supplied by the host
///
/// Values are kept as strings so that anything outside the closed
/// enumerations still reaches the resolver and takes the fallback path.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Video generation mode
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Aspect ratio orientation
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,

    /// Quality level
    #[serde(default = "default_quality")]
    pub quality: String,
}

fn default_mode() -> String {
    Mode::default().as_str().to_string()
}

fn default_aspect_ratio() -> String {
    AspectRatio::default().as_str().to_string()
}

fn default_quality() -> String {
    Quality::default().as_str().to_string()
}

impl Default for ResolutionRequest {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            aspect_ratio: default_aspect_ratio(),
            quality: default_quality(),
        }
    }
}

impl ResolutionRequest {
    pub fn new(
        mode: impl Into<String>,
        aspect_ratio: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            mode: mode.into(),
            aspect_ratio: aspect_ratio.into(),
            quality: quality.into(),
        }
    }
}

impl From<(Mode, AspectRatio, Quality)> for ResolutionRequest {
    fn from((mode, aspect_ratio, quality): (Mode, AspectRatio, Quality)) -> Self {
        Self::new(mode.as_str(), aspect_ratio.as_str(), quality.as_str())
    }
}
