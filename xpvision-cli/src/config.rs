use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use xpvision_core::{Dream, ImpactModel, MEAL_COST};

use crate::state::{ensure_xpvision_home, xpvision_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dream: Option<DreamSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Average meal price used by reality triggers
    pub meal_cost: f64,
    pub horizon: HorizonMode,
}

/// How the daily savings rate is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizonMode {
    /// target / 365, ignoring the dream's date
    FixedYear,
    /// target / days until the dream's target date
    TargetDate,
}

/// Default dream used when a command gets no --target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamSection {
    pub title: String,
    pub target_value: f64,
    #[serde(default)]
    pub current_saved: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            meal_cost: MEAL_COST,
            horizon: HorizonMode::FixedYear,
        }
    }
}

impl Config {
    /// Build the impact model for `dream`. Target-date mode falls back to the
    /// fixed year when the dream has no date.
    pub fn impact_model(&self, dream: &Dream, today: NaiveDate) -> Result<ImpactModel> {
        let base = match (self.engine.horizon, dream.target_date) {
            (HorizonMode::TargetDate, Some(date)) => ImpactModel::for_target_date(date, today),
            (HorizonMode::TargetDate, None) => {
                log::warn!("horizon = target-date but '{}' has no target date; using 365 days", dream.title);
                ImpactModel::default()
            }
            (HorizonMode::FixedYear, _) => ImpactModel::default(),
        };
        Ok(base.with_meal_cost(self.engine.meal_cost)?)
    }

    /// Dream from CLI overrides, falling back to the `[dream]` section
    pub fn resolve_dream(&self, target: Option<f64>, saved: Option<f64>) -> Result<Dream> {
        let section = self.dream.as_ref();
        let target = target
            .or(section.map(|d| d.target_value))
            .context("no dream target: pass --target or set [dream] in config.toml")?;
        let saved = saved.or(section.map(|d| d.current_saved)).unwrap_or(0.0);
        let title = section.map(|d| d.title.as_str()).unwrap_or("Meu sonho");

        let mut dream = Dream::new(title, target, saved)?;
        if let Some(date) = section.and_then(|d| d.target_date) {
            dream = dream.with_target_date(date);
        }
        Ok(dream)
    }
}

/// Location of the config file; nothing is created on disk
pub fn config_path() -> Result<PathBuf> {
    Ok(xpvision_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_or_default(config_path())
}

/// With no resolvable home directory there is no config to read
fn load_or_default(path: Result<PathBuf>) -> Result<Config> {
    match path {
        Ok(p) => load_config_from(&p),
        Err(e) => {
            log::warn!("{e:#}; using default config");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        log::debug!("no config at {}; using defaults", p.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_xpvision_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config {
        engine: EngineSection::default(),
        dream: Some(DreamSection {
            title: "Meu sonho".to_string(),
            target_value: 3650.0,
            current_saved: 0.0,
            target_date: None,
        }),
    };
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let cfg: Config = toml::from_str(
            r#"
[engine]
meal_cost = 20.0
horizon = "target-date"

[dream]
title = "Intercâmbio"
target_value = 3650.0
current_saved = 150.0
target_date = "2028-01-01"
"#,
        )
        .unwrap();
        assert_eq!(cfg.engine.horizon, HorizonMode::TargetDate);

        let dream = cfg.resolve_dream(None, None).unwrap();
        assert_eq!(dream.title, "Intercâmbio");
        assert_eq!(dream.current_saved, 150.0);

        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let model = cfg.impact_model(&dream, today).unwrap();
        assert_eq!(model.horizon_days(), 730.0);
        assert_eq!(model.meal_cost(), 20.0);
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = load_config_from(Path::new("/nonexistent/xpvision/config.toml")).unwrap();
        assert_eq!(cfg.engine.horizon, HorizonMode::FixedYear);
        assert!(cfg.resolve_dream(None, None).is_err());

        let dream = cfg.resolve_dream(Some(3650.0), None).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(cfg.impact_model(&dream, today).unwrap(), ImpactModel::default());
    }

    #[test]
    fn test_missing_config_leaves_disk_untouched() {
        let home = std::env::temp_dir().join(format!("xpvision-home-{}", std::process::id()));
        let cfg = load_config_from(&home.join("config.toml")).unwrap();
        assert_eq!(cfg.engine.horizon, HorizonMode::FixedYear);
        assert!(!home.exists());
    }

    #[test]
    fn test_unresolvable_home_falls_back_to_defaults() {
        let cfg = load_or_default(Err(anyhow::anyhow!("HOME is not set"))).unwrap();
        assert!(cfg.dream.is_none());
        assert_eq!(cfg.engine.meal_cost, MEAL_COST);
    }

    #[test]
    fn test_cli_overrides_win() {
        let cfg: Config = toml::from_str("[dream]\ntitle = \"Carro\"\ntarget_value = 50000.0\n").unwrap();
        let dream = cfg.resolve_dream(Some(1000.0), Some(10.0)).unwrap();
        assert_eq!(dream.target_value, 1000.0);
        assert_eq!(dream.current_saved, 10.0);
        assert_eq!(dream.title, "Carro");
    }
}
