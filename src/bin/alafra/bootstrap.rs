use chrono::prelude::*;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use alafra::{
    config::{parse as config_parse, MainConfig, DEFAULT_CONF_FILE},
    constants::{server, site, storage},
    error::*,
};

use crate::directories::PROJECT_DIRS;

static DEFAULT_CONF: &str = "# File automatically generated on ${date}\n\
                            [site]\n\
                            default_language   = \"en\"\n\
                            whatsapp_primary   = \"${whatsapp_primary}\"\n\
                            whatsapp_alternate = \"${whatsapp_alternate}\"\n\
                            contact_email      = \"${contact_email}\"\n\n\
                            [storage]\n\
                            data_dir       = \"${data_dir}\"\n\
                            donations_file = \"${donations_file}\"\n\
                            contacts_file  = \"${contacts_file}\"\n\
                            language_file  = \"${language_file}\"\n\n\
                            [server]\n\
                            host = \"${host}\"\n\
                            port = ${port}\n\
                            # web_dir = \"~/alafra/dist\"\n";

#[derive(Debug)]
pub struct BootStrap {
    config: MainConfig,
}

impl BootStrap {
    pub fn new() -> Result<Self> {
        Ok(BootStrap {
            config: parse_main_config()?,
        })
    }

    pub fn get_config(&self) -> &MainConfig {
        &self.config
    }
}

/// Renders the default main configuration for the given date.
fn default_config(date: &str) -> String {
    DEFAULT_CONF
        .replacen("${date}", date, 1)
        .replacen("${whatsapp_primary}", site::WHATSAPP_PRIMARY, 1)
        .replacen("${whatsapp_alternate}", site::WHATSAPP_ALTERNATE, 1)
        .replacen("${contact_email}", site::CONTACT_EMAIL, 1)
        .replacen("${data_dir}", storage::DEFAULT_DATA_DIR, 1)
        .replacen("${donations_file}", storage::DONATIONS_FILE, 1)
        .replacen("${contacts_file}", storage::CONTACTS_FILE, 1)
        .replacen("${language_file}", storage::LANGUAGE_FILE, 1)
        .replacen("${host}", server::DEFAULT_HOST, 1)
        .replacen("${port}", &server::DEFAULT_PORT.to_string(), 1)
}

/// Creates the default main configuration file in the config directory
///
/// # Arguments
/// * `config_file` - The path to the configuration file
///
/// # Returns
/// A `Result` containing the configuration data as a `String`
///
/// # Errors
/// * `ConfigError` - If the configuration file has no parent directory
/// * `IoError` - If an I/O error occurs while creating the configuration file
fn create_default_config(config_file: &Path) -> Result<String> {
    let parent_dir = config_file
        .parent()
        .ok_or_else(|| Error::ConfigError(config_file.to_string_lossy().into_owned()))?;
    std::fs::create_dir_all(parent_dir)?;
    let current_date: DateTime<Local> = Local::now();
    let config_data = default_config(&current_date.to_string());

    File::create(config_file)?.write_all(config_data.as_bytes())?;
    Ok(config_data)
}

/// Reads the main configuration file from `conf_file`, generating the default one
/// when it does not exist yet.
fn load_config(conf_file: &Path) -> Result<MainConfig> {
    let toml_data = match config_parse(conf_file) {
        Ok(data) => data,
        Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
            create_default_config(conf_file)?
        }
        Err(Error::Io(e)) => {
            return Err(Error::ConfigReadError {
                file: String::from(DEFAULT_CONF_FILE),
                cause: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    MainConfig::from_toml(&toml_data)
}

/// Processes the main configuration file retrieving the associated `MainConfig` structure
///
/// # Errors
///
/// This function returns an error if the configuration file cannot be read or parsed.
pub fn parse_main_config() -> Result<MainConfig> {
    load_config(&PROJECT_DIRS.config_dir().join(DEFAULT_CONF_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_defaults() {
        let config = MainConfig::from_toml(&default_config("2026-01-01")).unwrap();
        assert_eq!(config, MainConfig::default());
    }

    #[test]
    fn test_missing_config_is_generated() -> Result<()> {
        let dir = tempdir()?;
        let conf_file = dir.path().join("nested").join(DEFAULT_CONF_FILE);
        let config = load_config(&conf_file)?;
        assert_eq!(config, MainConfig::default());
        let written = std::fs::read_to_string(&conf_file)?;
        assert!(written.starts_with("# File automatically generated on "));

        std::fs::write(&conf_file, "[site]\ndefault_language = \"ar\"\n")?;
        assert_eq!(load_config(&conf_file)?.site.default_language.code(), "ar");
        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Result<()> {
        let dir = tempdir()?;
        let conf_file = dir.path().join(DEFAULT_CONF_FILE);
        std::fs::write(&conf_file, "[server]\nport = \"high\"\n")?;
        assert!(matches!(
            load_config(&conf_file),
            Err(Error::SerdeTomlError { .. })
        ));
        Ok(())
    }
}
