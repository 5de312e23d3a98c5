use anyhow::{anyhow, Context, Result};
use ini::Ini;
use std::path::Path;

/// Default credentials file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "github.ini";

/// Section of the credentials file holding GitHub settings
pub const GITHUB_SECTION: &str = "github";

/// Key holding the personal access token
pub const TOKEN_KEY: &str = "token";

/// Credentials loaded from the INI file
#[derive(Debug, Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Load credentials from an INI file with a `[github]` section
    pub fn load(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read credentials from {:?}", path))?;

        Self::from_ini(&ini).with_context(|| format!("Failed to read credentials from {:?}", path))
    }

    /// Parse credentials from INI text
    pub fn parse(contents: &str) -> Result<Self> {
        let ini = Ini::load_from_str(contents).context("Failed to parse credentials")?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let section = ini
            .section(Some(GITHUB_SECTION))
            .ok_or_else(|| anyhow!("missing section [{}]", GITHUB_SECTION))?;

        let token = section
            .get(TOKEN_KEY)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("missing key '{}' in section [{}]", TOKEN_KEY, GITHUB_SECTION))?;

        Ok(Credentials {
            token: token.to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Read the GitHub token from the credentials file at `path`
pub fn get_github_token(path: &Path) -> Result<String> {
    Credentials::load(path).map(|credentials| credentials.token)
}
