use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CREDENTIAL_ENV: &str = "JSEARCH_API_KEY";
const CREDENTIAL_FILE_NAME: &str = "api_key";

/// The RapidAPI key, persisted across sessions in the user's data directory.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn open() -> Self {
        Self::at(Self::default_path())
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobfind") {
            proj_dirs.data_dir().join(CREDENTIAL_FILE_NAME)
        } else {
            PathBuf::from(CREDENTIAL_FILE_NAME)
        }
    }

    /// Stored key, if any. Blank files count as no key.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credential file: {}", self.path.display()))?;
        let key = raw.trim();
        Ok((!key.is_empty()).then(|| key.to_string()))
    }

    /// Environment override first, then the stored key.
    pub fn resolve(&self, env_value: Option<String>) -> Result<Option<String>> {
        match env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(key) => Ok(Some(key)),
            None => self.load(),
        }
    }

    pub fn store(&self, value: &str) -> Result<String> {
        let key = value.trim();
        if key.is_empty() {
            anyhow::bail!("Please enter a valid API key");
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_private(&self.path, key)
            .with_context(|| format!("Failed to write credential file: {}", self.path.display()))?;
        info!(path = %self.path.display(), "Stored API key");
        Ok(key.to_string())
    }

    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove credential file: {}", self.path.display()))?;
        Ok(true)
    }
}

/// Owner-only from creation; a file left over with wider bits is narrowed first.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    if path.exists() {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Shows enough of a key to recognise it.
pub fn mask(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
