//! Runtime configuration with built-in defaults.
//!
//! Everything the annotation pass keys on lives here instead of in module
//! globals: namespace URIs, derived-filename suffixes, the fallback fill
//! color, and the caption layout metrics. A TOML file can override any
//! subset of the fields; omitted fields keep their defaults.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::dom::{SVG_NS, XLINK_NS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace URI of the graphic elements (`<svg>`, `<text>`, `<g>`, ...).
    pub svg_namespace: String,
    /// Namespace URI for hyperlink `href` attributes (SVG 1.1 uses XLink).
    pub xlink_namespace: String,
    /// Fill color used when the document does not provide one.
    pub default_fill: String,
    /// Inserted before the extension of the annotated output file.
    pub output_suffix: String,
    /// Inserted before the extension of the annotation-table backup.
    pub backup_suffix: String,
    pub caption: CaptionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            svg_namespace: SVG_NS.to_string(),
            xlink_namespace: XLINK_NS.to_string(),
            default_fill: "#000000".to_string(),
            output_suffix: "_with_balloons".to_string(),
            backup_suffix: "_old".to_string(),
            caption: CaptionConfig::default(),
        }
    }
}

/// Layout metrics for the caption block appended below the graphic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    pub font_size: f64,
    pub font_family: String,
    /// Line spacing as a multiple of the font size.
    pub line_height: f64,
    /// `[x, y]` inset of the caption block from the lower-left corner.
    pub offset: [f64; 2],
    /// Canvas height assumed when the root carries no usable `height`.
    pub default_height: f64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            font_family: "sans-serif".to_string(),
            line_height: 1.2,
            offset: [20.0, 20.0],
            default_height: 400.0,
        }
    }
}

impl CaptionConfig {
    /// Vertical distance between consecutive caption lines.
    pub fn line_spacing(&self) -> f64 {
        self.font_size * self.line_height
    }
}

/// Load the configuration, overlaying `path` (if given) onto the defaults.
pub fn load_config(path: Option<&Utf8Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {path}"))?;
    let config: Config =
        toml::from_str(&contents).with_context(|| format!("invalid config file {path}"))?;
    Ok(config)
}
