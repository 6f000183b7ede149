use serde::{Deserialize, Serialize};

use super::error::SiteResult;

/// The three shipped page variants. They share every engine and differ
/// only in intro timing and which effects run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Hex field + shard bursts, glyphs at 3s, reveal at 6s.
    #[default]
    Pyramid,
    /// Adds rain, glyphs at 2s, reveal at 5s.
    Rain,
    /// Rain plus mini-loader windows during navigation, reveal at 7s.
    Showcase,
}

/// Hexagon background grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexConfig {
    /// Cell radius in pixels.
    pub size: f32,
    /// Pointer distance beyond which a cell is unaffected.
    pub hover_radius: f32,
    /// Extra scale at zero pointer distance.
    pub hover_scale: f32,
    /// Exponential smoothing factor per tick.
    pub smoothing: f32,
    /// Full stroke strength within this distance of the focus anchor.
    pub anchor_inner: f32,
    /// Distance over which the stroke fades out past `anchor_inner`.
    pub anchor_fade: f32,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            hover_radius: 150.0,
            hover_scale: 0.15,
            smoothing: 0.1,
            anchor_inner: 100.0,
            anchor_fade: 250.0,
        }
    }
}

/// Glass-shatter burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardConfig {
    pub count: usize,
    /// Max spawn distance from the burst center.
    pub spread: f32,
    pub min_size: f32,
    pub size_range: f32,
    /// Opacity lost per tick.
    pub fade_per_tick: f32,
    /// Angular velocity range (radians per tick, centered on zero).
    pub spin: f32,
    /// Linear velocity range per axis (pixels per tick, centered on zero).
    pub speed: f32,
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            count: 80,
            spread: 250.0,
            min_size: 40.0,
            size_range: 60.0,
            fade_per_tick: 0.008,
            spin: 0.15,
            speed: 4.0,
        }
    }
}

/// Falling light streaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    pub count: usize,
    pub min_length: f32,
    pub length_range: f32,
    pub min_speed: f32,
    pub speed_range: f32,
    pub min_opacity: f32,
    pub opacity_range: f32,
    /// Extra random height above the viewport for respawned drops.
    pub respawn_jitter: f32,
    pub glow_smoothing: f32,
    /// Delay between the intro reveal and the rain starting.
    pub start_delay_ms: u32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            count: 120,
            min_length: 10.0,
            length_range: 20.0,
            min_speed: 4.0,
            speed_range: 6.0,
            min_opacity: 0.2,
            opacity_range: 0.5,
            respawn_jitter: 100.0,
            glow_smoothing: 0.1,
            start_delay_ms: 1000,
        }
    }
}

/// Loading label and reveal timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub label: String,
    /// When the first glyph appears.
    pub label_start_ms: u32,
    pub glyph_stagger_ms: u32,
    pub color_step_ms: u32,
    /// Color cycle; the last entry is the settled color.
    pub palette: Vec<String>,
    /// Absolute offset of the full-content reveal.
    pub reveal_ms: u32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            label: "LEVEL ONE".to_string(),
            label_start_ms: 3000,
            glyph_stagger_ms: 150,
            color_step_ms: 100,
            palette: ["#00d4ff", "#a78bfa", "#ec4899", "#8b5cf6", "#ffffff"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            reveal_ms: 6000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Show the mini-loader placeholder between outgoing and incoming views.
    pub mini_loader: bool,
}

/// Polyhedron orientation controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub initial_pitch: f32,
    pub auto_step_deg: f32,
    pub auto_period_ms: f64,
    pub drag_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Idle time after a drag before auto-rotation resumes.
    pub resume_delay_ms: f64,
    /// Pitch applied by the face presets.
    pub face_pitch: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            initial_pitch: -20.0,
            auto_step_deg: 0.3,
            auto_period_ms: 30.0,
            drag_sensitivity: 0.5,
            pitch_min: -90.0,
            pitch_max: 0.0,
            resume_delay_ms: 2000.0,
            face_pitch: 10.0,
        }
    }
}

/// Configuration for a site session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub variant: Variant,
    /// Seed for the particle random sources.
    pub seed: u64,
    /// Initial viewport size in pixels.
    pub viewport: [f32; 2],
    /// Particle simulation step (default: one 60Hz frame).
    pub frame_ms: f64,
    /// Focus-anchor re-measure period.
    pub anchor_poll_ms: f64,
    pub hex: HexConfig,
    pub shards: ShardConfig,
    /// `None` disables the rain field.
    pub rain: Option<RainConfig>,
    pub intro: IntroConfig,
    pub nav: NavConfig,
    pub rotation: RotationConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::variant(Variant::default())
    }
}

impl SiteConfig {
    /// Preset for one of the shipped variants.
    pub fn variant(variant: Variant) -> Self {
        let mut config = Self {
            variant,
            seed: 42,
            viewport: [1280.0, 720.0],
            frame_ms: 1000.0 / 60.0,
            anchor_poll_ms: 100.0,
            hex: HexConfig::default(),
            shards: ShardConfig::default(),
            rain: None,
            intro: IntroConfig::default(),
            nav: NavConfig::default(),
            rotation: RotationConfig::default(),
        };
        match variant {
            Variant::Pyramid => {}
            Variant::Rain => {
                config.intro.label_start_ms = 2000;
                config.intro.reveal_ms = 5000;
                config.rain = Some(RainConfig::default());
            }
            Variant::Showcase => {
                config.intro.reveal_ms = 7000;
                config.rain = Some(RainConfig::default());
                config.nav.mini_loader = true;
            }
        }
        config
    }

    /// Parse a config from JSON. Top-level keys override the preset named by
    /// `"variant"` (default: pyramid). An empty string yields the default preset.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let variant = match overrides.get("variant") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => Variant::default(),
        };
        let mut merged = serde_json::to_value(Self::variant(variant))?;
        if let (Some(base), Some(over)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in over {
                base.insert(key.clone(), value.clone());
            }
        }
        Ok(serde_json::from_value(merged)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_disagree_on_intro_timing() {
        let reveals: Vec<u32> = [Variant::Pyramid, Variant::Rain, Variant::Showcase]
            .iter()
            .map(|v| SiteConfig::variant(*v).intro.reveal_ms)
            .collect();
        assert_eq!(reveals, vec![6000, 5000, 7000]);
        assert!(SiteConfig::variant(Variant::Pyramid).rain.is_none());
        assert!(SiteConfig::variant(Variant::Showcase).nav.mini_loader);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(SiteConfig::from_json("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn json_overrides_variant_preset() {
        let config = SiteConfig::from_json(r#"{"variant":"rain","seed":7,"viewport":[800,600]}"#).unwrap();
        assert_eq!(config.variant, Variant::Rain);
        assert_eq!(config.seed, 7);
        assert_eq!(config.viewport, [800.0, 600.0]);
        assert_eq!(config.intro.reveal_ms, 5000);
        assert!(config.rain.is_some());
    }

    #[test]
    fn json_null_disables_rain() {
        let config = SiteConfig::from_json(r#"{"variant":"showcase","rain":null}"#).unwrap();
        assert!(config.rain.is_none());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::api::error::SiteError::Config(_)));
    }
}
