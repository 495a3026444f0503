use std::{collections::HashMap, fs, path::Path};

pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_POSTS_PAGE_SIZE: usize = 5;
pub const DEFAULT_CONFIG_FILE: &str = "contact.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub posts_page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            posts_page_size: DEFAULT_POSTS_PAGE_SIZE,
        }
    }
}

impl Settings {
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = normalize_base_url(&api_base_url.into());
        self
    }
}

/// Defaults, then `path` (if readable), then environment overrides.
pub fn load_settings(path: impl AsRef<Path>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path.as_ref()) {
        apply_file_overrides(&mut settings, &raw);
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.api_base_url = normalize_base_url(&settings.api_base_url);
    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring unparseable config file");
        return;
    };
    if let Some(v) = file_cfg.get("api_base_url").and_then(toml::Value::as_str) {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("posts_page_size")
        .and_then(toml::Value::as_integer)
        .and_then(|v| usize::try_from(v).ok())
        .filter(|v| *v > 0)
    {
        settings.posts_page_size = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CONTACT_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("APP__POSTS_PAGE_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            if parsed > 0 {
                settings.posts_page_size = parsed;
            }
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
