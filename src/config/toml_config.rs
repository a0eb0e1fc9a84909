use crate::core::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_command_prefix, validate_non_empty_string, validate_one_of, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_PREFIX: &str = "!";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub bot: BotSection,
    pub storage: StorageSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSection {
    pub name: Option<String>,
    pub command_prefix: Option<String>,
    pub default_guild: String,
    pub default_user: String,
    #[serde(default)]
    pub admins: Vec<String>,
    pub booker_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: String,
    pub logo_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl BotConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOT_ADMIN})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bot_name(&self) -> &str {
        self.bot.name.as_deref().unwrap_or("Fantasy Booking")
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }
}

impl ConfigProvider for BotConfig {
    fn command_prefix(&self) -> &str {
        self.bot.command_prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn logo_dir(&self) -> Option<&str> {
        self.storage.logo_dir.as_deref()
    }

    fn default_guild(&self) -> &str {
        &self.bot.default_guild
    }

    fn default_user(&self) -> &str {
        &self.bot.default_user
    }

    fn admins(&self) -> &[String] {
        &self.bot.admins
    }

    fn booker_role(&self) -> Option<&str> {
        self.bot.booker_role.as_deref()
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validate_command_prefix("bot.command_prefix", self.command_prefix())?;
        validate_non_empty_string("bot.default_guild", &self.bot.default_guild)?;
        validate_non_empty_string("bot.default_user", &self.bot.default_user)?;
        validate_path("storage.data_dir", &self.storage.data_dir)?;

        if let Some(logo_dir) = &self.storage.logo_dir {
            validate_path("storage.logo_dir", logo_dir)?;
        }

        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        validate_one_of("logging.format", self.log_format(), &LOG_FORMATS)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[bot]
name = "Ring Rats League"
command_prefix = "?"
default_guild = "ring-rats"
default_user = "booker"
admins = ["commish"]
booker_role = "Bookeur"

[storage]
data_dir = "./data"
logo_dir = "./logos"

[logging]
level = "debug"
format = "json"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.bot_name(), "Ring Rats League");
        assert_eq!(config.command_prefix(), "?");
        assert_eq!(config.default_guild(), "ring-rats");
        assert_eq!(config.admins(), ["commish".to_string()]);
        assert_eq!(config.booker_role(), Some("Bookeur"));
        assert_eq!(config.logo_dir(), Some("./logos"));
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.log_format(), "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = BotConfig::from_toml_str(
            r#"
[bot]
default_guild = "g"
default_user = "u"

[storage]
data_dir = "./data"
"#,
        )
        .unwrap();

        assert_eq!(config.command_prefix(), "!");
        assert!(config.admins().is_empty());
        assert_eq!(config.log_format(), "compact");
        assert_eq!(config.log_level(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FANTASY_BOOKING_TEST_ADMIN", "the-boss");
        let config = BotConfig::from_toml_str(
            r#"
[bot]
default_guild = "g"
default_user = "u"
admins = ["${FANTASY_BOOKING_TEST_ADMIN}", "${FANTASY_BOOKING_UNSET_VAR}"]

[storage]
data_dir = "./data"
"#,
        )
        .unwrap();

        assert_eq!(config.admins()[0], "the-boss");
        assert_eq!(config.admins()[1], "${FANTASY_BOOKING_UNSET_VAR}");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_format = SAMPLE.replace("format = \"json\"", "format = \"xml\"");
        let config = BotConfig::from_toml_str(&bad_format).unwrap();
        assert!(config.validate().is_err());

        let bad_level = SAMPLE.replace("level = \"debug\"", "level = \"loud\"");
        let config = BotConfig::from_toml_str(&bad_level).unwrap();
        assert!(config.validate().is_err());

        let bad_prefix = SAMPLE.replace("command_prefix = \"?\"", "command_prefix = \"\"");
        let config = BotConfig::from_toml_str(&bad_prefix).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = BotConfig::from_toml_str("[bot\nbroken").unwrap_err();
        assert!(matches!(err, BookingError::ConfigError { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = BotConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_dir(), "./data");
    }
}
