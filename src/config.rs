use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, SinteseError};
use crate::scenario::ScenarioMode;

pub const DEFAULT_SYNTHESIS_DIR: &str = "sintese";
pub const DEFAULT_BUCKET_NAME: &str = "ons-dl-02-prd-raw";
pub const DEFAULT_BUCKET_PREFIX: &str = "ons/lake/decomp";

const ENV_FILE_NAME: &str = ".env";

/// Recognized environment variables.
pub mod env_keys {
    pub const SYNTHESIS_DIR: &str = "SYNTHESIS_DIR";
    pub const BUCKET_NAME: &str = "BUCKET_NAME";
    pub const BUCKET_PREFIX: &str = "BUCKET_PREFIX";
    pub const SCENARIO_MODE: &str = "SCENARIO_MODE";
    pub const S3_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";
    pub const ENV_FILE: &str = "SYNTHESIS_ENV_FILE";
}

/// Run configuration, resolved once at startup and passed to every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory name, relative to the working directory.
    pub synthesis_dir: String,
    pub bucket_name: String,
    pub bucket_prefix: String,
    pub scenario_mode: ScenarioMode,
    /// Falls back to the AWS provider chain when unset.
    pub region: Option<String>,
    /// S3-compatible endpoint; switches the client to path-style addressing.
    pub endpoint_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            synthesis_dir: DEFAULT_SYNTHESIS_DIR.to_string(),
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            bucket_prefix: DEFAULT_BUCKET_PREFIX.to_string(),
            scenario_mode: ScenarioMode::ByName,
            region: None,
            endpoint_url: None,
        }
    }
}

/// Values given explicitly (command line). They win over the environment.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub synthesis_dir: Option<String>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
    pub scenario_mode: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Layer `overrides` over `lookup` over defaults. Empty values count as unset.
    pub fn resolve<F>(overrides: &Overrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, key: &str| -> Option<String> {
            explicit
                .clone()
                .or_else(|| lookup(key))
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let scenario_mode = match pick(&overrides.scenario_mode, env_keys::SCENARIO_MODE) {
            Some(mode) => mode.parse()?,
            None => defaults.scenario_mode,
        };

        Ok(Self {
            synthesis_dir: pick(&overrides.synthesis_dir, env_keys::SYNTHESIS_DIR)
                .unwrap_or(defaults.synthesis_dir),
            bucket_name: pick(&overrides.bucket_name, env_keys::BUCKET_NAME)
                .unwrap_or(defaults.bucket_name),
            bucket_prefix: pick(&overrides.bucket_prefix, env_keys::BUCKET_PREFIX)
                .unwrap_or(defaults.bucket_prefix),
            scenario_mode,
            region: overrides.region.clone().filter(|v| !v.is_empty()),
            endpoint_url: pick(&overrides.endpoint_url, env_keys::S3_ENDPOINT_URL),
        })
    }

    pub fn from_env(overrides: &Overrides) -> Result<Self> {
        Self::resolve(overrides, |key| env::var(key).ok())
    }
}

/// Pick the env file to load. First existing candidate wins:
/// explicit path, `.env` beside the executable, `.env` in `cwd`,
/// then `.env` in each ancestor of `cwd`.
///
/// A missing explicit path is an error rather than a silent fallback.
pub fn locate_env_file(
    explicit: Option<&Path>,
    exe_dir: Option<&Path>,
    cwd: &Path,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(Some(path.to_path_buf()))
        } else {
            Err(SinteseError::Config(format!(
                "env file {} does not exist",
                path.display()
            )))
        };
    }

    let beside_exe = exe_dir.map(|dir| dir.join(ENV_FILE_NAME));
    let candidates = beside_exe
        .into_iter()
        .chain(cwd.ancestors().map(|dir| dir.join(ENV_FILE_NAME)));

    Ok(candidates.into_iter().find(|candidate| candidate.is_file()))
}

/// Locate and load the env file into the process environment.
///
/// Variables already set in the environment are left untouched.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = env::current_dir()?;

    let found = locate_env_file(explicit, exe_dir.as_deref(), &cwd)?;
    if let Some(path) = &found {
        dotenvy::from_path(path).map_err(|e| {
            SinteseError::Config(format!("failed to load {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded env file");
    }
    Ok(found)
}
