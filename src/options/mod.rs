//! Centralized session options with TOML preset support.
//!
//! All tweakable settings (display, camera, capture, measurement,
//! lighting) are consolidated here. Options serialize to/from TOML for
//! session presets, and the whole tree exposes a JSON Schema for tooling.

mod camera;
mod capture;
mod display;
mod lighting;
mod measure;

use std::path::Path;

pub use camera::{CameraOptions, ProjectionMode};
pub use capture::CaptureOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use measure::MeasureOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CaliperError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[capture]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window and draw-mode settings.
    pub display: DisplayOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Depth-capture behavior.
    pub capture: CaptureOptions,
    /// Calibration parameters.
    pub measure: MeasureOptions,
    /// Point-light parameters.
    pub lighting: LightingOptions,
}

impl Options {
    /// Generate JSON Schema describing the exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`CaliperError::Io`] if the file cannot be read,
    /// [`CaliperError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, CaliperError> {
        let content = std::fs::read_to_string(path).map_err(CaliperError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CaliperError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`CaliperError::Io`] if the file cannot be written,
    /// [`CaliperError::OptionsParse`] on serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), CaliperError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CaliperError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CaliperError::Io)?;
        }
        std::fs::write(path, content).map_err(CaliperError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[capture]
readback = false

[camera]
projection = "perspective"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert!(!opts.capture.readback);
        assert_eq!(opts.camera.projection, ProjectionMode::Perspective);
        // Everything else should be default
        assert_eq!(opts.capture.fallback_margin, 24);
        assert_eq!(opts.measure.reference_radius, 6.7);
        assert_eq!(opts.display.width, 800);
        assert_eq!(opts.camera.ortho_extent, 13.5);
    }

    #[test]
    fn defaults_match_session_conventions() {
        let opts = Options::default();
        assert_eq!((opts.display.width, opts.display.height), (800, 800));
        assert_eq!(opts.camera.projection, ProjectionMode::Orthographic);
        assert_eq!(opts.capture.baseline_placeholder, 0.5);
        assert_eq!(opts.capture.probe_placeholder, 0.8);
        assert_eq!(opts.lighting.ambient, 0.4);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("display"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("capture"));
        assert!(props.contains_key("measure"));
        assert!(props.contains_key("lighting"));

        // Capture should expose the readback toggle but not the
        // internal placeholder values.
        let capture = &props["capture"]["properties"];
        assert!(capture.get("readback").is_some());
        assert!(capture.get("baseline_placeholder").is_none());
        assert!(capture.get("fallback_margin").is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("caliper_options_test");
        let path = dir.join("session.toml");
        let mut opts = Options::default();
        opts.measure.reference_radius = 3.2;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);

        let presets = Options::list_presets(&dir);
        assert!(presets.contains(&"session".to_owned()));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
