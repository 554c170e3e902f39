//! Credentials for the code-hosting API.
//!
//! Credentials are read from an INI file with `username` and `token` keys in
//! the default section, e.g. `~/.config/gitrecentchanges.ini`:
//!
//! ```ini
//! username = octocat
//! token = ghp_xxx
//! ```

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

/// Default location of the credentials file, before `~` expansion.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/gitrecentchanges.ini";

/// Username and token used for basic authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Account name.
    #[serde(default)]
    pub username: String,
    /// Personal access token.
    #[serde(default)]
    pub token: String,
}

impl Credentials {
    /// Loads credentials from `path`, expanding a leading `~`.
    ///
    /// A missing file yields empty credentials and a warning.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = expand_home(path.as_ref());

        if !path.exists() {
            warn!(path = %path.display(), "using an empty config");
            return Ok(Self::default());
        }

        let credentials: Self = Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Ini))
            .build()?
            .try_deserialize()?;

        if credentials.username.is_empty() {
            warn!("using an empty username");
        }
        if credentials.token.is_empty() {
            warn!("using an empty token");
        }

        Ok(credentials)
    }

    /// Returns true when neither a username nor a token is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.token.is_empty()
    }
}

/// Replaces a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
