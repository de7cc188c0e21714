//! Stored script records: one JSON file per script.

use std::{fs, path::PathBuf};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::Config, template};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Placeholder names detected in `content`. Recomputed on every save so
    /// the record never drifts from the template text.
    pub variables: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ScriptStore {
    storage_path: PathBuf,
}

impl ScriptStore {
    pub fn from_config(cfg: &Config) -> Self {
        Self::at(cfg.script_storage_path())
    }

    pub fn at(storage_path: PathBuf) -> Self {
        let _ = fs::create_dir_all(&storage_path);
        Self { storage_path }
    }

    /// Script names become file stems; reject anything that could walk out
    /// of the storage directory.
    fn file_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            bail!("invalid script name: '{}'", name);
        }
        Ok(self.storage_path.join(format!("{name}.json")))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).map(|p| p.exists()).unwrap_or(false)
    }

    /// Create or update a script. The creation timestamp survives updates;
    /// detected variables and `updated_at` are refreshed.
    pub fn upsert(
        &self,
        name: &str,
        content: &str,
        description: Option<String>,
    ) -> Result<Script> {
        let p = self.file_path(name)?;
        let now = Utc::now();
        let created_at = match self.load(name) {
            Ok(existing) => existing.created_at,
            Err(_) => now,
        };

        let script = Script {
            name: name.to_string(),
            content: content.to_string(),
            description,
            variables: template::extract_placeholders(content),
            created_at,
            updated_at: now,
        };

        fs::write(p, serde_json::to_string_pretty(&script)?)?;
        Ok(script)
    }

    pub fn load(&self, name: &str) -> Result<Script> {
        let p = self.file_path(name)?;
        if !p.exists() {
            bail!("script not found: {}", name);
        }
        let text = fs::read_to_string(p)?;
        let script: Script = serde_json::from_str(&text)?;
        Ok(script)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let p = self.file_path(name)?;
        if !p.exists() {
            bail!("script not found: {}", name);
        }
        fs::remove_file(p)?;
        Ok(())
    }

    /// All stored scripts, sorted by name. Unreadable entries are skipped.
    pub fn list(&self) -> Vec<Script> {
        let Ok(read_dir) = fs::read_dir(&self.storage_path) else {
            return Vec::new();
        };
        let mut scripts: Vec<Script> = read_dir
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .filter_map(|e| {
                let text = fs::read_to_string(e.path()).ok()?;
                serde_json::from_str(&text).ok()
            })
            .collect();
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        scripts
    }
}
