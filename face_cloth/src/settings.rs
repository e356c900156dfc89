//! Application settings: TOML file, command line overrides and logging.
//!
//! ```toml
//! [cloth]
//! mesh_size = 20
//! gravity   = 0.0
//!
//! [app]
//! frame_rate      = 60
//! selection_range = 20.0
//!
//! [app.overlays]
//! mesh = true
//! ```
//!
//! Anything left out keeps its default.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::{Deserialize, Serialize};

use image_cloth::{ClothConfig, Colour, DisplayOptions};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cloth: ClothConfig,
    pub app:   AppSettings,
}

/// Frame loop and interaction settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub frame_rate:        u32,
    /// Half-width of the box around a handle that a touch must land in.
    pub selection_range:   f32,
    /// Gravity change per Up/Down key press.
    pub gravity_increment: f32,
    /// Start with the frame cleared each tick.
    pub clear_frame:       bool,
    /// Start with a translucent fade each tick (leaves trails).
    pub fade_frame:        bool,
    pub fade_alpha:        u8,
    pub background:        Colour,
    /// Overlays shown at startup.
    pub overlays:          DisplayOptions,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            frame_rate:        60,
            selection_range:   20.0,
            gravity_increment: 0.1,
            clear_frame:       true,
            fade_frame:        false,
            fade_alpha:        20,
            background:        0xFF000000,
            overlays:          DisplayOptions { handles: true, outlines: true, mesh: false },
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("bad config: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_toml(&text)
    }

    /// One-line summary for the startup log.
    pub fn summary(&self) -> String {
        let c = &self.cloth;
        format!(
            "mesh {}x{}, cloth {}x{}, canvas {}x{}, gravity {:.2}, drag {:.2}, {} fps",
            c.mesh_size, c.mesh_size, c.cloth_width, c.cloth_height,
            c.canvas_width, c.canvas_height, c.gravity, c.drag, self.app.frame_rate,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command line
// ════════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// TOML settings file with `[cloth]` and `[app]` tables.
    #[clap(long)]
    pub config: Option<PathBuf>,

    #[clap(long)]
    pub mesh_size: Option<usize>,

    #[clap(long)]
    pub gravity: Option<f32>,

    #[clap(long)]
    pub drag: Option<f32>,

    /// off, error, warn, info, debug or trace.
    #[clap(long, default_value = "info")]
    pub log_level: String,

    /// Prompt for mesh size, gravity and drag on stdin.
    #[clap(long)]
    pub interactive: bool,
}

impl Args {
    /// Load the config file (if any) and apply command line overrides.
    pub fn resolve(&self) -> Result<AppConfig, String> {
        let mut cfg = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None       => AppConfig::default(),
        };
        if let Some(n) = self.mesh_size { cfg.cloth.mesh_size = n; }
        if let Some(g) = self.gravity   { cfg.cloth.gravity   = g; }
        if let Some(d) = self.drag      { cfg.cloth.drag      = d; }
        Ok(cfg)
    }

    pub fn level(&self) -> Result<LevelFilter, String> {
        self.log_level.parse::<LevelFilter>()
            .map_err(|_| format!("unknown log level '{}'", self.log_level))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Logging
// ════════════════════════════════════════════════════════════════════════════

pub const LOG_PATTERN: &str = "[{d(%Y-%m-%d %H:%M:%S)}] {l} {m}{n}";

/// Install a console logger.  Call once, from `main`.
pub fn init_logging(level: LevelFilter) -> Result<(), String> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .map_err(|e| e.to_string())?;
    log4rs::init_config(config).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        Args::parse_from(std::iter::once("face_cloth").chain(list.iter().copied()))
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn tables_override_selected_fields() {
        let cfg = AppConfig::from_toml(r#"
            [cloth]
            mesh_size = 16
            drag      = 0.1

            [app]
            fade_frame  = true
            clear_frame = false
        "#).unwrap();
        assert_eq!(cfg.cloth.mesh_size, 16);
        assert_eq!(cfg.cloth.drag, 0.1);
        assert_eq!(cfg.cloth.cloth_width, 320);
        assert!(cfg.app.fade_frame);
        assert!(!cfg.app.clear_frame);
        assert_eq!(cfg.app.selection_range, 20.0);
    }

    #[test]
    fn overlay_table_overrides_startup_overlays() {
        let cfg = AppConfig::from_toml("[app.overlays]\nmesh = true\nhandles = false").unwrap();
        assert_eq!(cfg.app.overlays, DisplayOptions { handles: false, outlines: false, mesh: true });
        assert!(AppConfig::default().app.overlays.handles);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml("[cloth]\nmesh_size = \"big\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.contains("cannot read"));
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = args(&["--mesh-size", "10", "--gravity", "0.3"]).resolve().unwrap();
        assert_eq!(cfg.cloth.mesh_size, 10);
        assert_eq!(cfg.cloth.gravity, 0.3);
        assert_eq!(cfg.cloth.drag, 0.05);
    }

    #[test]
    fn log_level_parses() {
        assert_eq!(args(&["--log-level", "debug"]).level(), Ok(LevelFilter::Debug));
        assert!(args(&["--log-level", "loud"]).level().is_err());
        assert_eq!(args(&[]).level(), Ok(LevelFilter::Info));
    }

    #[test]
    fn summary_mentions_mesh() {
        assert!(AppConfig::default().summary().starts_with("mesh 20x20"));
    }
}
