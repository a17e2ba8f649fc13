pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::TomlConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "map-pins")]
    #[command(about = "Save map pins and list the ones near a location")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Override the storage directory from the config
        #[arg(long)]
        pub data_dir: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Drop a pin at the given coordinate
        Add {
            #[arg(long, allow_negative_numbers = true)]
            lat: f64,
            #[arg(long, allow_negative_numbers = true)]
            lon: f64,
        },
        /// Print every saved pin
        List {
            #[arg(long)]
            json: bool,
        },
        /// Print pins within the radius of a location
        Nearby {
            #[arg(long, allow_negative_numbers = true)]
            lat: f64,
            #[arg(long, allow_negative_numbers = true)]
            lon: f64,
            /// Radius in meters; text that is not a number is ignored
            #[arg(long, allow_hyphen_values = true)]
            radius: Option<String>,
            #[arg(long)]
            json: bool,
        },
        /// Print the number of saved pins
        Count,
    }

    impl CliConfig {
        /// 載入 TOML 配置 (若有)，套用命令列覆蓋並驗證
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };

            if let Some(dir) = &self.data_dir {
                config.storage.directory = dir.clone();
            }

            config.validate()?;
            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_nearby_with_negative_coordinates() {
            let cli = CliConfig::try_parse_from([
                "map-pins", "nearby", "--lat", "-33.87", "--lon", "-151.2", "--radius", "abc",
            ])
            .unwrap();

            match cli.command {
                Command::Nearby {
                    lat, lon, radius, json,
                } => {
                    assert_eq!(lat, -33.87);
                    assert_eq!(lon, -151.2);
                    assert_eq!(radius.as_deref(), Some("abc"));
                    assert!(!json);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_data_dir_override() {
            let cli =
                CliConfig::try_parse_from(["map-pins", "--data-dir", "/tmp/pins", "count"]).unwrap();
            let config = cli.resolve().unwrap();
            assert_eq!(config.storage.directory, "/tmp/pins");
        }

        #[test]
        fn test_add_requires_both_coordinates() {
            assert!(CliConfig::try_parse_from(["map-pins", "add", "--lat", "1.0"]).is_err());
        }
    }
}
