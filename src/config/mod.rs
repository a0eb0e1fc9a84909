pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_command_prefix, validate_non_empty_string, validate_path, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "fantasy-booking")]
    #[command(about = "Fantasy booking wrestling bot, driven from the console")]
    pub struct CliConfig {
        #[arg(short, long, help = "TOML configuration file (overrides the flags below)")]
        pub config: Option<String>,

        #[arg(long, default_value = "./data")]
        pub data_dir: String,

        #[arg(long, help = "Directory holding <user_id>.png federation logos")]
        pub logo_dir: Option<String>,

        #[arg(long, default_value = "local")]
        pub guild: String,

        #[arg(long, default_value = "booker")]
        pub user: String,

        #[arg(long, value_delimiter = ',')]
        pub admins: Vec<String>,

        #[arg(long, default_value = "!")]
        pub prefix: String,

        #[arg(long, help = "Role mentioned when a show opens for votes")]
        pub booker_role: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn command_prefix(&self) -> &str {
            &self.prefix
        }

        fn data_dir(&self) -> &str {
            &self.data_dir
        }

        fn logo_dir(&self) -> Option<&str> {
            self.logo_dir.as_deref()
        }

        fn default_guild(&self) -> &str {
            &self.guild
        }

        fn default_user(&self) -> &str {
            &self.user
        }

        fn admins(&self) -> &[String] {
            &self.admins
        }

        fn booker_role(&self) -> Option<&str> {
            self.booker_role.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("data_dir", &self.data_dir)?;
            if let Some(logo_dir) = &self.logo_dir {
                validate_path("logo_dir", logo_dir)?;
            }
            validate_non_empty_string("guild", &self.guild)?;
            validate_non_empty_string("user", &self.user)?;
            validate_command_prefix("prefix", &self.prefix)
        }
    }

}
