use std::path::PathBuf;

/// Fallback when TASKFLOW_BACKEND_BASE_URL is unset.
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("taskflow")
}

/// Cloudinary wiring for avatar uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub upload_folder: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            cloud_name: "demo".into(),
            upload_preset: "ml_default".into(),
            upload_folder: "taskflow/avatars".into(),
        }
    }
}

/// Reverb websocket wiring. Carried in config only; no socket is opened here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealtimeConfig {
    pub app_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub use_tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub upload: UploadConfig,
    pub realtime: RealtimeConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            upload: UploadConfig::default(),
            realtime: RealtimeConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Read the TASKFLOW_* environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, but the variable source is injectable.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = match lookup("TASKFLOW_BACKEND_BASE_URL") {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => {
                log::warn!(
                    "TASKFLOW_BACKEND_BASE_URL is not set. Requests will use {}.",
                    DEFAULT_BASE_URL
                );
                DEFAULT_BASE_URL.to_string()
            }
        };

        let data_dir = lookup("TASKFLOW_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let defaults = UploadConfig::default();
        let upload = UploadConfig {
            cloud_name: lookup("TASKFLOW_CLOUDINARY_CLOUD_NAME").unwrap_or(defaults.cloud_name),
            upload_preset: lookup("TASKFLOW_CLOUDINARY_UPLOAD_PRESET")
                .unwrap_or(defaults.upload_preset),
            upload_folder: lookup("TASKFLOW_CLOUDINARY_UPLOAD_FOLDER")
                .unwrap_or(defaults.upload_folder),
        };

        let realtime = RealtimeConfig {
            app_key: lookup("TASKFLOW_REVERB_APP_KEY"),
            host: lookup("TASKFLOW_REVERB_HOST"),
            port: lookup("TASKFLOW_REVERB_PORT").and_then(|p| p.parse().ok()),
            use_tls: lookup("TASKFLOW_REVERB_TLS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        };

        Self {
            base_url,
            data_dir,
            upload,
            realtime,
        }
    }

    /// Config pointed at a specific backend, everything else default.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_base_url_falls_back() {
        let env = vars(&[]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upload.cloud_name, "demo");
        assert_eq!(config.upload.upload_preset, "ml_default");
        assert_eq!(config.upload.upload_folder, "taskflow/avatars");
        assert!(!config.realtime.use_tls);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let env = vars(&[("TASKFLOW_BACKEND_BASE_URL", "https://api.example.com/api/")]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned());
        assert_eq!(config.base_url, "https://api.example.com/api");
    }

    #[test]
    fn reverb_port_parses() {
        let env = vars(&[
            ("TASKFLOW_REVERB_HOST", "ws.example.com"),
            ("TASKFLOW_REVERB_PORT", "8080"),
            ("TASKFLOW_REVERB_TLS", "true"),
        ]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned());
        assert_eq!(config.realtime.host.as_deref(), Some("ws.example.com"));
        assert_eq!(config.realtime.port, Some(8080));
        assert!(config.realtime.use_tls);
    }

    #[test]
    fn session_path_lives_under_data_dir() {
        let env = vars(&[("TASKFLOW_DATA_DIR", "/tmp/taskflow-test")]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned());
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/taskflow-test/session.json")
        );
    }
}
