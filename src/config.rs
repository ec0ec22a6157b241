//! Platform-specific paths and upload endpoints

use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Environment variable selecting the endpoint pair
pub const ENV_VAR: &str = "CODE_WRAPPED_ENV";

const PRODUCTION_SITE: &str = "https://code-wrapped.vercel.app/";
const DEVELOPMENT_SITE: &str = "http://localhost:3000/";
const API_PATH: &str = "api/wrapped";

/// Editors offered in the interactive picker: (app directory name, hint)
pub const KNOWN_EDITORS: &[(&str, &str)] = &[("Cursor", "Cursor"), ("Code", "VS Code")];

/// Get an editor's local history directory
/// - macOS: ~/Library/Application Support/<App>/User/History/
/// - Linux: ~/.config/<App>/User/History/
/// - Windows: %APPDATA%/<App>/User/History/
pub fn editor_history_dir(app_name: &str) -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join(app_name)
            .join("User")
            .join("History"))
    }

    #[cfg(target_os = "linux")]
    {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config.join(app_name).join("User").join("History"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = dirs::config_dir().context("Could not determine AppData directory")?;
        Ok(appdata.join(app_name).join("User").join("History"))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config.join(app_name).join("User").join("History"))
    }
}

/// Where analytics are uploaded and where the shareable page lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// POST target for the yearly payload
    pub api_url: Url,
    /// Base URL of the shareable page; the upload id is appended to it
    pub site_url: Url,
}

impl Endpoints {
    /// Select endpoints from `CODE_WRAPPED_ENV`
    pub fn from_env() -> Result<Self> {
        let env = std::env::var(ENV_VAR).ok();
        Self::for_environment(env.as_deref())
    }

    /// `development` selects the local server, anything else production
    pub fn for_environment(env: Option<&str>) -> Result<Self> {
        let site = match env.map(str::trim) {
            Some(e) if e.eq_ignore_ascii_case("development") => DEVELOPMENT_SITE,
            _ => PRODUCTION_SITE,
        };
        Self::with_site(site)
    }

    /// Build the endpoint pair for a site root
    pub fn with_site(site: &str) -> Result<Self> {
        let mut site_url =
            Url::parse(site).with_context(|| format!("Invalid site URL: {}", site))?;
        if !site_url.path().ends_with('/') {
            let path = format!("{}/", site_url.path());
            site_url.set_path(&path);
        }
        let api_url = site_url
            .join(API_PATH)
            .with_context(|| format!("Invalid API URL under {}", site_url))?;
        Ok(Self { api_url, site_url })
    }

    /// Shareable link for an uploaded recap
    pub fn share_link(&self, id: &str) -> Result<Url> {
        self.site_url
            .join(id)
            .with_context(|| format!("Invalid recap id: {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_dir_layout() {
        let dir = editor_history_dir("Cursor").unwrap();
        assert!(dir.ends_with("Cursor/User/History"));
    }

    #[test]
    fn test_production_by_default() {
        let endpoints = Endpoints::for_environment(None).unwrap();
        assert_eq!(
            endpoints.api_url.as_str(),
            "https://code-wrapped.vercel.app/api/wrapped"
        );
        let other = Endpoints::for_environment(Some("production")).unwrap();
        assert_eq!(endpoints, other);
    }

    #[test]
    fn test_development_endpoints() {
        let endpoints = Endpoints::for_environment(Some("Development")).unwrap();
        assert_eq!(endpoints.site_url.as_str(), "http://localhost:3000/");
        assert_eq!(
            endpoints.api_url.as_str(),
            "http://localhost:3000/api/wrapped"
        );
    }

    #[test]
    fn test_share_link() {
        let endpoints = Endpoints::with_site("http://127.0.0.1:8080").unwrap();
        let link = endpoints.share_link("abc-123").unwrap();
        assert_eq!(link.as_str(), "http://127.0.0.1:8080/abc-123");
    }
}
