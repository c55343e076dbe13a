use std::collections::HashMap;
use std::fs;

use thiserror::Error;

/// Base URL of the public customer/training service; overridable via
/// config file or the API_BASE_URL environment variable.
pub const DEFAULT_API_BASE: &str =
    "https://customer-rest-service-frontend-personaltrainer.2.rahtiapp.fi";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config line {line}: {text}")]
    InvalidLine { line: usize, text: String },
}

/// KEY=VALUE config file, optional quotes and `export ` prefixes
/// tolerated so a shell env file can be pointed at directly.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            };
            values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn parses_quoted_and_exported_lines() {
        let dir = env::temp_dir().join(format!("trainerdesk_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.env");
        fs::write(
            &path,
            "# comment\n\nexport API_BASE_URL=\"http://localhost:8080/\"\nEXTRA='x'\n",
        )
        .unwrap();

        let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(
            config.get("API_BASE_URL").as_deref(),
            Some("http://localhost:8080/")
        );
        assert_eq!(config.get("EXTRA").as_deref(), Some("x"));
        assert_eq!(config.get("MISSING"), None);
    }

    #[test]
    fn rejects_lines_without_an_equals_sign() {
        let dir = env::temp_dir().join(format!("trainerdesk_cfg_bad_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.env");
        fs::write(&path, "API_BASE_URL\n").unwrap();

        let err = AppConfig::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLine { line: 1, .. }));
    }
}
