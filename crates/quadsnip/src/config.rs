// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::PathBuf;

use rune_cfg::RuneConfig;

use crate::paths;

#[derive(Debug, Clone)]
pub struct SnipConfig {
    pub output_directory: PathBuf,
    pub accent_colour: u32, // ARGB
    pub grid_min_gap: f32,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            output_directory: paths::default_output_dir(),
            accent_colour: 0xFFFF_0000, // selection stroke red
            grid_min_gap: 80.0,
        }
    }
}

pub fn load() -> Result<SnipConfig, String> {
    let path = default_user_config_path();

    if !path.exists() {
        return Ok(SnipConfig::default());
    }

    let rc = RuneConfig::from_file(&path)
        .map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<SnipConfig, String> {
    let mut cfg = SnipConfig::default();

    if !rc.has("quadsnip") {
        return Ok(cfg);
    }

    // output_directory
    if let Some(dir) = rc
        .get_optional::<String>("quadsnip.output_directory")
        .map_err(|e| format!("config error at quadsnip.output_directory: {e}"))?
    {
        cfg.output_directory = expand_env(&dir);
    }

    // accent_colour
    if let Some(colour_str) = rc
        .get_optional::<String>("quadsnip.accent_colour")
        .map_err(|e| format!("config error at quadsnip.accent_colour: {e}"))?
    {
        cfg.accent_colour = parse_hex_colour(&colour_str)
            .map_err(|e| format!("config error at quadsnip.accent_colour: {e}"))?;
    }

    // grid_min_gap
    if let Some(gap_str) = rc
        .get_optional::<String>("quadsnip.grid_min_gap")
        .map_err(|e| format!("config error at quadsnip.grid_min_gap: {e}"))?
    {
        let gap: f32 = gap_str
            .trim()
            .parse()
            .map_err(|_| {
                format!("config error at quadsnip.grid_min_gap: expected a number, got \"{gap_str}\"")
            })?;
        if gap < 8.0 {
            return Err(format!(
                "config error at quadsnip.grid_min_gap: expected >= 8, got {gap}"
            ));
        }
        cfg.grid_min_gap = gap;
    }

    Ok(cfg)
}

fn parse_hex_colour(s: &str) -> Result<u32, String> {
    let s = s.trim();

    if !s.starts_with('#') {
        return Err("colour must start with #".into());
    }

    let hex = &s[1..];

    if hex.len() != 6 {
        return Err("colour must be 6 hex digits (RRGGBB)".into());
    }

    let rgb = u32::from_str_radix(hex, 16)
        .map_err(|_| "invalid hex colour".to_string())?;

    Ok(0xFF00_0000 | rgb)
}

fn expand_env(s: &str) -> PathBuf {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }

    if let Some(rest) = s.strip_prefix("$HOME/") {
        if let Some(home) = env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }

    PathBuf::from(s)
}

fn default_user_config_path() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    base.join("quadsnip").join("config.rune")
}
