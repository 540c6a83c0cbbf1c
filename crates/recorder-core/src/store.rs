//! The persisted profile collection and its JSON document I/O.
//!
//! The store is a single JSON object mapping trimmed lowercase emails to
//! profiles. Loading normalises keys on the way in; saving writes the whole
//! document atomically so a crash cannot leave a truncated file behind.

use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecorderError, Result};
use crate::models::{normalize_email, PersonProfile};

/// Default store document, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "attendance_data.json";

/// The full collection of profiles, keyed by trimmed lowercase email.
///
/// Serialises as a plain `{ email: profile }` object; that exact shape is
/// the durable contract other tools and hand-editors rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceStore {
    profiles: BTreeMap<String, PersonProfile>,
}

impl AttendanceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Look up a profile; `email` may be unnormalised.
    pub fn get(&self, email: &str) -> Option<&PersonProfile> {
        self.profiles.get(&normalize_email(email))
    }

    /// Fetch or create the profile for `email`.
    ///
    /// A freshly created profile starts with the given display name and no
    /// events.
    pub fn get_or_create(&mut self, email: &str, name: &str) -> &mut PersonProfile {
        let key = normalize_email(email);
        self.profiles
            .entry(key.clone())
            .or_insert_with(|| PersonProfile::new(key, name))
    }

    /// All profiles in key order.
    pub fn profiles(&self) -> Values<'_, String, PersonProfile> {
        self.profiles.values()
    }

    /// Load a store from `path`.
    ///
    /// An absent file is a fresh start and yields an empty store. A file
    /// that exists but cannot be read, is not valid JSON, has a non-object
    /// root, or contains keys that collide after email normalisation is
    /// corrupt and fails the whole operation.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("store file {} absent, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| RecorderError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let document: serde_json::Value = serde_json::from_str(&content)?;
        if !document.is_object() {
            return Err(RecorderError::CorruptStore(
                "root of the store document is not a JSON object".to_string(),
            ));
        }
        let raw: BTreeMap<String, PersonProfile> = serde_json::from_value(document)?;

        let mut profiles = BTreeMap::new();
        for (key, mut profile) in raw {
            let email = normalize_email(&key);
            profile.email = email.clone();
            profile.normalize_events();
            if profiles.insert(email.clone(), profile).is_some() {
                return Err(RecorderError::CorruptStore(format!(
                    "duplicate profiles for {:?} after key normalisation",
                    email
                )));
            }
        }

        debug!(
            "loaded {} profile(s) from {}",
            profiles.len(),
            path.display()
        );
        Ok(Self { profiles })
    }

    /// Atomically write the store to `path`, creating parent directories
    /// if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            // parent() yields "" for bare relative file names.
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RecorderError::StoreWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = self.to_json()?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|source| RecorderError::StoreWrite {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| RecorderError::StoreWrite {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// The store as a pretty-printed JSON document with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
