use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Where an uploaded asset ended up.
///
/// `Remote` means the managed media service accepted the file and issued a delivery
/// URL; `LocalFallback` means the locally written copy is the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    Remote,
    LocalFallback,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(StorageBackend::Remote),
            "local-fallback" | "local" => Ok(StorageBackend::LocalFallback),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Remote => write!(f, "remote"),
            StorageBackend::LocalFallback => write!(f, "local-fallback"),
        }
    }
}
