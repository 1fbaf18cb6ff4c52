use crate::error::{PaddySenseError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    /// Contact address sent in the geocoder user agent, as its usage
    /// policy requests for identifying applications.
    pub contact_email: Option<String>,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_minutes: u64,
}

fn default_refresh_interval() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            contact_email: None,
            refresh_interval_minutes: default_refresh_interval(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(PaddySenseError::Config(format!(
                "Config file not found at {:?}. Run `paddysense init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| PaddySenseError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| PaddySenseError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for the config file in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Explicit env var first
        if let Ok(p) = std::env::var("PADDYSENSE_CONFIG") {
            return Ok(PathBuf::from(p));
        }

        // Try current directory
        let local_config = PathBuf::from("paddysense.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("paddysense").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| PaddySenseError::Config("Cannot determine config directory".into()))?
            .join("paddysense")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/paddysense/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PaddySenseError::Config("Cannot determine config directory".into()))?
            .join("paddysense");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up PaddySense!");
        println!();

        println!("Farm");
        let farm_name: String = Input::new()
            .with_prompt("  Farm name")
            .default("My Farm".into())
            .interact_text()
            .map_err(|e| PaddySenseError::Config(format!("Input error: {}", e)))?;

        let location: String = Input::new()
            .with_prompt("  Location (town or district, e.g. Kurunegala, Sri Lanka)")
            .default("Kurunegala, Sri Lanka".into())
            .interact_text()
            .map_err(|e| PaddySenseError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Weather lookup (leave email blank to skip)");
        let contact_email: String = Input::new()
            .with_prompt("  Contact email for geocoder requests")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PaddySenseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            farm: FarmConfig {
                name: farm_name,
                location,
            },
            weather: WeatherConfig {
                contact_email: if contact_email.is_empty() {
                    None
                } else {
                    Some(contact_email)
                },
                refresh_interval_minutes: default_refresh_interval(),
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| PaddySenseError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# PaddySense Configuration\n# Generated by `paddysense init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// User agent string sent to the geocoding service.
    pub fn user_agent(&self) -> String {
        match &self.weather.contact_email {
            Some(email) => format!("paddysense/{} ({})", env!("CARGO_PKG_VERSION"), email),
            None => format!("paddysense/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("PADDYSENSE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PaddySenseError::Config("Cannot determine data directory".into()))?
            .join("paddysense");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("paddysense.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "My Farm".into(),
                location: "Kurunegala, Sri Lanka".into(),
            },
            weather: WeatherConfig::default(),
        }
    }
}
