//! Engine configuration, persisted as TOML.
//!
//! Every field carries a serde default so a partial file works; a missing
//! file is created with the defaults on first load. The `[rater]` section
//! persists learned coefficients between sessions.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::core::fretboard::{Guitar, GuitarError};
use crate::core::hand::{
    ALL_FINGERS, DEFAULT_MAX_SPANS, DEFAULT_MIN_SPANS, HandModel, HandModelError,
    NUM_FINGER_PAIRS,
};
use crate::core::music::tunings;
use crate::core::rater::Rater;
use crate::core::searcher::SearchOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuitarConfig {
    #[serde(default = "GuitarConfig::default_tuning")]
    pub tuning: Vec<i32>,
    #[serde(default = "GuitarConfig::default_num_frets")]
    pub num_frets: usize,
    #[serde(default = "GuitarConfig::default_nut_width")]
    pub nut_width: f64,
    #[serde(default = "GuitarConfig::default_bridge_width")]
    pub bridge_width: f64,
    #[serde(default = "GuitarConfig::default_first_fret_width")]
    pub first_fret_width: f64,
    #[serde(default = "GuitarConfig::default_scale_len")]
    pub scale_len: f64,
}

impl GuitarConfig {
    fn default_tuning() -> Vec<i32> {
        tunings::STANDARD6.to_vec()
    }
    fn default_num_frets() -> usize {
        12
    }
    // Acoustic body measurements in millimetres.
    fn default_nut_width() -> f64 {
        44.45
    }
    fn default_bridge_width() -> f64 {
        58.7375
    }
    fn default_first_fret_width() -> f64 {
        38.0
    }
    fn default_scale_len() -> f64 {
        620.0
    }

    /// Classical body preset with the standard six-string tuning.
    pub fn classical() -> Self {
        Self {
            nut_width: 48.0,
            bridge_width: 56.0,
            first_fret_width: 36.0,
            scale_len: 660.0,
            ..Self::default()
        }
    }

    /// Electric body preset with the standard six-string tuning.
    pub fn electric() -> Self {
        Self {
            nut_width: 46.0,
            bridge_width: 52.0,
            first_fret_width: 34.0,
            scale_len: 630.0,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Result<Guitar, GuitarError> {
        Guitar::new(
            &self.tuning,
            self.num_frets,
            self.nut_width,
            self.bridge_width,
            self.first_fret_width,
            self.scale_len,
        )
    }
}

impl Default for GuitarConfig {
    fn default() -> Self {
        Self {
            tuning: Self::default_tuning(),
            num_frets: Self::default_num_frets(),
            nut_width: Self::default_nut_width(),
            bridge_width: Self::default_bridge_width(),
            first_fret_width: Self::default_first_fret_width(),
            scale_len: Self::default_scale_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandConfig {
    /// Bit 0 = index finger through bit 3 = pinky.
    #[serde(default = "HandConfig::default_enabled_fingers")]
    pub enabled_fingers: u8,
    #[serde(default = "HandConfig::default_min_spans")]
    pub min_spans: [f64; NUM_FINGER_PAIRS],
    #[serde(default = "HandConfig::default_max_spans")]
    pub max_spans: [f64; NUM_FINGER_PAIRS],
}

impl HandConfig {
    fn default_enabled_fingers() -> u8 {
        ALL_FINGERS
    }
    fn default_min_spans() -> [f64; NUM_FINGER_PAIRS] {
        DEFAULT_MIN_SPANS
    }
    fn default_max_spans() -> [f64; NUM_FINGER_PAIRS] {
        DEFAULT_MAX_SPANS
    }

    pub fn build(&self) -> Result<HandModel, HandModelError> {
        HandModel::new(self.enabled_fingers, &self.min_spans, &self.max_spans)
    }
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            enabled_fingers: Self::default_enabled_fingers(),
            min_spans: Self::default_min_spans(),
            max_spans: Self::default_max_spans(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_max_mutes")]
    pub max_mutes: usize,
    #[serde(default = "SearchConfig::default_min_score")]
    pub min_score: f64,
    #[serde(default = "SearchConfig::default_barre_enabled")]
    pub barre_enabled: bool,
    #[serde(default = "SearchConfig::default_max_barre")]
    pub max_barre: usize,
    #[serde(default = "SearchConfig::default_num_threads")]
    pub num_threads: usize,
}

impl SearchConfig {
    fn default_max_mutes() -> usize {
        2
    }
    fn default_min_score() -> f64 {
        0.5
    }
    fn default_barre_enabled() -> bool {
        true
    }
    fn default_max_barre() -> usize {
        1
    }
    fn default_num_threads() -> usize {
        4
    }

    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            max_mutes: self.max_mutes,
            min_score: self.min_score,
            barre_enabled: self.barre_enabled,
            max_barre: self.max_barre,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_mutes: Self::default_max_mutes(),
            min_score: Self::default_min_score(),
            barre_enabled: Self::default_barre_enabled(),
            max_barre: Self::default_max_barre(),
            num_threads: Self::default_num_threads(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub guitar: GuitarConfig,
    #[serde(default)]
    pub hand: HandConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub rater: Rater,
}

impl EngineConfig {
    /// Read the config at `path`, or write the defaults there and return
    /// them. A file that exists but does not parse is left untouched and the
    /// defaults are used for the session.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("failed to parse config {path}: {err}; using defaults");
                    }
                },
                Err(err) => {
                    warn!("failed to read config {path}: {err}; using defaults");
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    warn!("failed to write default config to {path}: {err}");
                }
            }
            Err(err) => {
                warn!("failed to serialize default config: {err}");
            }
        }
        default_cfg
    }
}
