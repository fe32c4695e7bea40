use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Queue capacity used when neither the script nor `--capacity` sets one.
    pub default_capacity: i64,
    /// Append every replayed step to the op log.
    pub log_ops: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent `--json` output.
    pub pretty_json: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { default_capacity: 16, log_ops: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("circq").join("circq.toml"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    Config::parse(&text)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# circq configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.general.default_capacity, 16);
        assert!(!cfg.general.log_ops);
        assert!(cfg.output.pretty_json);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::parse("[general]\nlog_ops = true\n").unwrap();
        assert!(cfg.general.log_ops);
        assert_eq!(cfg.general.default_capacity, 16);
        assert!(cfg.output.pretty_json);
    }

    #[test]
    fn defaults_survive_a_toml_write() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let cfg = Config::parse(&text).unwrap();
        assert_eq!(cfg.general.default_capacity, 16);
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Config::parse("[general]\ndefault_capacity = \"big\"\n").is_err());
    }
}
