use crate::core::config::Config;
use crate::gitlab::MAX_PER_PAGE;
use config::{ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const ENV_PREFIX: &str = "GITLAB";

#[derive(Debug)]
pub struct Settings {
    pub gitlab: Config,
    pub per_page: u32,
}

impl Settings {
    /// `config.yaml` from the user config dir (or `path`), overlaid by
    /// `GITLAB_URL`, `GITLAB_TOKEN`, `GITLAB_PER_PAGE` and `GITLAB_TIMEOUT`.
    pub fn new(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load(path, None)
    }

    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gitlab-admin")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn load(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        // An explicitly requested file has to exist, the default one doesn't.
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    builder = builder.add_source(
                        File::from(path).format(FileFormat::Yaml).required(false),
                    );
                }
            }
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        let url: Url = settings.get("url")?;
        let token: String = settings.get("token")?;

        if token.trim().is_empty() {
            return Err(ConfigError::Message("token must not be empty".into()));
        }

        let timeout = match settings.get::<u64>("timeout") {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(ConfigError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let per_page = match settings.get::<u32>("per_page") {
            Ok(per_page) => per_page,
            Err(ConfigError::NotFound(_)) => MAX_PER_PAGE,
            Err(e) => return Err(e),
        };

        Ok(Self {
            gitlab: Config::new(url, token, timeout),
            per_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    fn yaml(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn from_env_only() {
        let file = yaml("{}\n");
        let settings = Settings::load(
            Some(file.path()),
            env(&[("GITLAB_URL", "https://gitlab.example.com"), ("GITLAB_TOKEN", "glpat-1")]),
        )
        .unwrap();

        assert_eq!(settings.gitlab.host().as_str(), "https://gitlab.example.com/");
        assert_eq!(settings.gitlab.auth_token(), "glpat-1");
        assert_eq!(settings.gitlab.timeout(), None);
        assert_eq!(settings.per_page, 100);
    }

    #[test]
    fn env_overrides_file() {
        let file = yaml("url: https://file.example.com\ntoken: from-file\nper_page: 20\ntimeout: 5\n");
        let settings = Settings::load(
            Some(file.path()),
            env(&[("GITLAB_TOKEN", "from-env"), ("GITLAB_PER_PAGE", "50")]),
        )
        .unwrap();

        assert_eq!(settings.gitlab.host().as_str(), "https://file.example.com/");
        assert_eq!(settings.gitlab.auth_token(), "from-env");
        assert_eq!(settings.gitlab.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.per_page, 50);
    }

    #[test]
    fn missing_token_is_fatal() {
        let file = yaml("{}\n");

        assert!(Settings::load(
            Some(file.path()),
            env(&[("GITLAB_URL", "https://gitlab.example.com")])
        )
        .is_err());

        assert!(Settings::load(
            Some(file.path()),
            env(&[("GITLAB_URL", "https://gitlab.example.com"), ("GITLAB_TOKEN", " ")])
        )
        .is_err());
    }

    #[test]
    fn invalid_url_is_fatal() {
        let file = yaml("{}\n");

        assert!(Settings::load(
            Some(file.path()),
            env(&[("GITLAB_URL", "not a url"), ("GITLAB_TOKEN", "t")])
        )
        .is_err());
    }

    #[test]
    fn explicit_file_must_exist() {
        let path = std::env::temp_dir().join("gitlab-admin-missing-config.yaml");

        assert!(Settings::load(
            Some(&path),
            env(&[("GITLAB_URL", "https://gitlab.example.com"), ("GITLAB_TOKEN", "t")])
        )
        .is_err());
    }
}
