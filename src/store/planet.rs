use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    foundation::error::{PlanetError, PlanetResult},
    foundation::math::Fnv1a64,
};

/// Metadata record written for every saved render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlanetRecord {
    /// Panorama the planet was rendered from.
    pub pano_id: String,
    /// Creation time, seconds since the Unix epoch.
    pub created_unix: u64,
    /// Blob reference, relative to the store root.
    pub blob: String,
}

/// Filesystem store: content-addressed blobs plus one JSON record per render.
///
/// Layout: `<root>/blobs/<fnv64>.jpg` and `<root>/records/<created-ns>-<fnv64>.json`.
#[derive(Clone, Debug)]
pub struct PlanetStore {
    root: PathBuf,
}

impl PlanetStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> PlanetResult<Self> {
        let root = root.into();
        for dir in ["blobs", "records"] {
            let p = root.join(dir);
            std::fs::create_dir_all(&p)
                .with_context(|| format!("create store dir '{}'", p.display()))?;
        }
        Ok(Self { root })
    }

    /// Store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an encoded render for `pano_id` and return its record.
    #[tracing::instrument(skip(self, jpeg), fields(bytes = jpeg.len()))]
    pub fn save(&self, pano_id: &str, jpeg: &[u8]) -> PlanetResult<PlanetRecord> {
        if pano_id.is_empty() {
            return Err(PlanetError::validation("pano id must not be empty"));
        }
        let mut h = Fnv1a64::new_default();
        h.write_bytes(jpeg);
        let digest = format!("{:016x}", h.finish());

        let blob = format!("blobs/{digest}.jpg");
        let blob_path = self.root.join(&blob);
        if !blob_path.exists() {
            std::fs::write(&blob_path, jpeg)
                .with_context(|| format!("write blob '{}'", blob_path.display()))?;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let created_unix = now.as_secs();
        let record = PlanetRecord {
            pano_id: pano_id.to_string(),
            created_unix,
            blob,
        };

        let record_path = self
            .root
            .join("records")
            .join(format!("{:020}-{digest}.json", now.as_nanos()));
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| PlanetError::encode(format!("planet record json: {e}")))?;
        std::fs::write(&record_path, json)
            .with_context(|| format!("write record '{}'", record_path.display()))?;

        tracing::info!(blob = %record.blob, "saved planet");
        Ok(record)
    }

    /// All records, oldest first.
    pub fn records(&self) -> PlanetResult<Vec<PlanetRecord>> {
        let dir = self.root.join("records");
        let mut out = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("list records in '{}'", dir.display()))?
        {
            let path = entry.context("read record entry")?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes =
                std::fs::read(&path).with_context(|| format!("read record '{}'", path.display()))?;
            let record: PlanetRecord = serde_json::from_slice(&bytes)
                .with_context(|| format!("parse record '{}'", path.display()))?;
            out.push(record);
        }
        out.sort_by(|a, b| {
            a.created_unix
                .cmp(&b.created_unix)
                .then_with(|| a.blob.cmp(&b.blob))
        });
        Ok(out)
    }

    /// Read a blob back by its record reference.
    pub fn read_blob(&self, record: &PlanetRecord) -> PlanetResult<Vec<u8>> {
        let path = self.root.join(&record.blob);
        Ok(std::fs::read(&path).with_context(|| format!("read blob '{}'", path.display()))?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/planet.rs"]
mod tests;
