use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{server, site, storage};
use crate::error::*;
use crate::i18n::Lang;
use crate::utils::expand_path;

pub const DEFAULT_CONF_FILE: &str = "alafra.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct MainConfig {
    #[serde(default)]
    pub site: Site,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub server: Server,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Site {
    pub default_language: Lang,
    pub whatsapp_primary: String,
    pub whatsapp_alternate: String,
    pub contact_email: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Storage {
    pub data_dir: String,
    pub donations_file: String,
    pub contacts_file: String,
    pub language_file: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
    pub web_dir: Option<String>,
}

impl Default for Site {
    fn default() -> Site {
        Site {
            default_language: Lang::En,
            whatsapp_primary: site::WHATSAPP_PRIMARY.to_string(),
            whatsapp_alternate: site::WHATSAPP_ALTERNATE.to_string(),
            contact_email: site::CONTACT_EMAIL.to_string(),
        }
    }
}

impl Default for Storage {
    fn default() -> Storage {
        Storage {
            data_dir: storage::DEFAULT_DATA_DIR.to_string(),
            donations_file: storage::DONATIONS_FILE.to_string(),
            contacts_file: storage::CONTACTS_FILE.to_string(),
            language_file: storage::LANGUAGE_FILE.to_string(),
        }
    }
}

impl Default for Server {
    fn default() -> Server {
        Server {
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
            web_dir: None,
        }
    }
}

impl Storage {
    /// The data directory with environment variables and `~` expanded.
    pub fn data_dir(&self) -> Result<PathBuf> {
        expand_path(&self.data_dir)
    }

    fn file(&self, name: &str) -> Result<PathBuf> {
        let path = expand_path(name)?;
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.data_dir()?.join(path))
        }
    }

    pub fn donations_path(&self) -> Result<PathBuf> {
        self.file(&self.donations_file)
    }

    pub fn contacts_path(&self) -> Result<PathBuf> {
        self.file(&self.contacts_file)
    }

    pub fn language_path(&self) -> Result<PathBuf> {
        self.file(&self.language_file)
    }
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn web_dir(&self) -> Result<Option<PathBuf>> {
        self.web_dir.as_deref().map(expand_path).transpose()
    }
}

impl MainConfig {
    /// Parses the contents of a main configuration file.
    pub fn from_toml(toml_data: &str) -> Result<Self> {
        toml::from_str(toml_data).map_err(|e| Error::SerdeTomlError {
            location: ConfigType::MAIN,
            file: String::from(DEFAULT_CONF_FILE),
            cause: e.to_string(),
        })
    }
}

pub fn parse(file_path: &Path) -> Result<String> {
    let mut config_content = String::new();
    File::open(file_path)?.read_to_string(&mut config_content)?;
    Ok(config_content)
}
