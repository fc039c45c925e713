use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::routing::search::{CostModel, DEFAULT_TIMEOUT, SearchConfig};
use crate::routing::{DEFAULT_GRID_SIZE, DEFAULT_HIT_TOLERANCE, RouterConfig};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "gatewire";

/// Canvas size used by `gatewire new` when none is given.
pub const DEFAULT_CANVAS: (f64, f64) = (800.0, 600.0);

pub const KEYS: &[&str] = &[
    "routing.grid_size",
    "routing.timeout_ms",
    "routing.heuristic_scale",
    "routing.cost_model",
    "routing.clearance_penalty",
    "routing.hit_tolerance",
    "routing.reroute_all_on_move",
    "canvas.width",
    "canvas.height",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristic_scale: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_model: Option<CostModel>,

    /// Extra step cost next to components (weighted routing only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance_penalty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_tolerance: Option<f64>,

    /// Reroute every wire after a move, not just the moved component's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reroute_all_on_move: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `gatewire config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            debug!("using default config: {e}");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# gatewire configuration - https://github.com/mklab-se/gatewire\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn routing(&self) -> RoutingConfig {
        self.routing.clone().unwrap_or_default()
    }

    pub fn grid_size(&self) -> u32 {
        self.routing().grid_size.unwrap_or(DEFAULT_GRID_SIZE)
    }

    pub fn timeout(&self) -> Duration {
        self.routing()
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.routing().hit_tolerance.unwrap_or(DEFAULT_HIT_TOLERANCE)
    }

    pub fn reroute_all_on_move(&self) -> bool {
        self.routing().reroute_all_on_move.unwrap_or(false)
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        let canvas = self.canvas.clone().unwrap_or_default();
        (
            canvas.width.unwrap_or(DEFAULT_CANVAS.0),
            canvas.height.unwrap_or(DEFAULT_CANVAS.1),
        )
    }

    /// Router settings from the config file on top of the built-in defaults.
    pub fn router_config(&self) -> RouterConfig {
        let routing = self.routing();
        let defaults = SearchConfig::default();
        RouterConfig {
            search: SearchConfig {
                timeout: self.timeout(),
                heuristic_scale: routing.heuristic_scale.unwrap_or(defaults.heuristic_scale),
                cost_model: routing.cost_model.unwrap_or(defaults.cost_model),
            },
            clearance_penalty: routing.clearance_penalty.unwrap_or(0.0),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "routing.grid_size" => {
                let size = match value.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => anyhow::bail!("Invalid grid_size: {value}. Must be a positive integer."),
                };
                self.routing_mut().grid_size = Some(size);
            }
            "routing.timeout_ms" => {
                let ms = match value.parse::<u64>() {
                    Ok(n) if n > 0 => n,
                    _ => anyhow::bail!(
                        "Invalid timeout_ms: {value}. Must be a positive number of milliseconds."
                    ),
                };
                self.routing_mut().timeout_ms = Some(ms);
            }
            "routing.heuristic_scale" => {
                let scale = match value.parse::<f64>() {
                    Ok(s) if s.is_finite() && s >= 0.0 => s,
                    _ => anyhow::bail!(
                        "Invalid heuristic_scale: {value}. Must be a non-negative number."
                    ),
                };
                self.routing_mut().heuristic_scale = Some(scale);
            }
            "routing.cost_model" => {
                let model = value.parse::<CostModel>().map_err(|e| anyhow::anyhow!(e))?;
                self.routing_mut().cost_model = Some(model);
            }
            "routing.clearance_penalty" => {
                let penalty = match value.parse::<f64>() {
                    Ok(p) if (0.0..1.0).contains(&p) => p,
                    _ => anyhow::bail!(
                        "Invalid clearance_penalty: {value}. Must be at least 0 and below 1."
                    ),
                };
                self.routing_mut().clearance_penalty = Some(penalty);
            }
            "routing.hit_tolerance" => {
                let tol = match value.parse::<f64>() {
                    Ok(t) if t.is_finite() && t >= 0.0 => t,
                    _ => anyhow::bail!(
                        "Invalid hit_tolerance: {value}. Must be a non-negative number of pixels."
                    ),
                };
                self.routing_mut().hit_tolerance = Some(tol);
            }
            "routing.reroute_all_on_move" => {
                let flag = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!(
                        "Invalid reroute_all_on_move: {value}. Must be 'true' or 'false'."
                    ),
                };
                self.routing_mut().reroute_all_on_move = Some(flag);
            }
            "canvas.width" | "canvas.height" => {
                let px = match value.parse::<f64>() {
                    Ok(v) if v.is_finite() && v > 0.0 => v,
                    _ => anyhow::bail!("Invalid {key}: {value}. Must be a positive number of pixels."),
                };
                let canvas = self.canvas.get_or_insert_with(CanvasConfig::default);
                if key == "canvas.width" {
                    canvas.width = Some(px);
                } else {
                    canvas.height = Some(px);
                }
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    fn routing_mut(&mut self) -> &mut RoutingConfig {
        self.routing.get_or_insert_with(RoutingConfig::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gives_defaults() {
        let config = Config::default();
        assert_eq!(config.grid_size(), 20);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.hit_tolerance(), 5.0);
        assert!(!config.reroute_all_on_move());
        assert_eq!(config.router_config(), RouterConfig::default());
    }

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        assert!(config.set("routing.grid_size", "0").is_err());
        assert!(config.set("routing.timeout_ms", "soon").is_err());
        assert!(config.set("routing.cost_model", "manhattan").is_err());
        assert!(config.set("routing.clearance_penalty", "1.0").is_err());
        assert!(config.set("routing.reroute_all_on_move", "yes").is_err());
        assert!(config.set("canvas.width", "-5").is_err());
        assert!(config.set("colour", "red").is_err());
        assert!(config.routing.is_none());
        assert!(config.canvas.is_none());
    }

    #[test]
    fn set_feeds_router_config() {
        let mut config = Config::default();
        config.set("routing.timeout_ms", "250").unwrap();
        config.set("routing.heuristic_scale", "1.5").unwrap();
        config.set("routing.cost_model", "weighted").unwrap();
        config.set("routing.clearance_penalty", "0.3").unwrap();

        let router = config.router_config();
        assert_eq!(router.search.timeout, Duration::from_millis(250));
        assert_eq!(router.search.heuristic_scale, 1.5);
        assert_eq!(router.search.cost_model, CostModel::Weighted);
        assert_eq!(router.clearance_penalty, 0.3);
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = Config::default();
        config.set("routing.grid_size", "10").unwrap();
        config.set("canvas.height", "480").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("grid_size: 10"));
        assert!(!yaml.contains("timeout_ms"));

        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.grid_size(), 10);
        assert_eq!(back.canvas_size(), (800.0, 480.0));
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = std::env::temp_dir().join(format!("gatewire-config-{}", std::process::id()));
        let path = dir.join(FILENAME);
        let mut config = Config::default();
        config.set("routing.reroute_all_on_move", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.reroute_all_on_move());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load_from(Path::new("/nonexistent/gatewire.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
