use autosave::{BinderConfig, Form};
use directories::ProjectDirs;
use kv_log_macro as log;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ClientError;

pub const ENV_FORM: &str = "AUTOSAVE_FORM";
pub const ENV_CONFIG: &str = "AUTOSAVE_CONFIG";

const FORM_FILE: &str = "form.json";
const CONFIG_FILE: &str = "config.json";

type Result<T> = std::result::Result<T, ClientError>;

/// Where the form description and binder configuration are read from
#[derive(Debug, Clone, PartialEq)]
pub struct FormPaths {
    pub form: PathBuf,
    pub config: PathBuf,
}

impl FormPaths {
    pub fn locate() -> Result<Self> {
        let config_dir = ProjectDirs::from("net", "michaelmelanson", "autosave")
            .map(|dirs| dirs.config_dir().to_path_buf());
        Self::locate_with(|name| std::env::var(name).ok(), config_dir)
    }

    /// Resolve both paths, letting `var` override the files in `config_dir`
    pub fn locate_with(
        var: impl Fn(&str) -> Option<String>,
        config_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let resolve = |env: &str, file: &str| match var(env) {
            Some(path) => Ok(PathBuf::from(path)),
            None => config_dir
                .as_ref()
                .map(|dir| dir.join(file))
                .ok_or(ClientError::ConfigDirUnavailable),
        };

        Ok(FormPaths {
            form: resolve(ENV_FORM, FORM_FILE)?,
            config: resolve(ENV_CONFIG, CONFIG_FILE)?,
        })
    }
}

pub fn load_form(path: &Path) -> Result<Form> {
    let contents = fs::read_to_string(path).map_err(|source| ClientError::FormRead {
        path: path.display().to_string(),
        source,
    })?;

    let form: Form = serde_json::from_str(&contents).map_err(|e| ClientError::FormParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    log::debug!("Loaded form", {
        path: path.display().to_string(),
        form: form.name.as_str()
    });
    Ok(form)
}

/// Load the binder configuration, falling back to the defaults when the
/// file does not exist. Environment overrides apply either way.
pub fn load_config(path: &Path) -> Result<BinderConfig> {
    let config = if path.exists() {
        BinderConfig::load(path)?
    } else {
        log::info!("No config file, using defaults", {
            path: path.display().to_string()
        });
        BinderConfig::default()
    };

    Ok(config.apply_env())
}
