use std::path::{Path, PathBuf};

use crate::{
    error::FsError,
    excludes::{ExcludeRules, absolutize},
    permission::PermissionGate,
};

/// What every listing and search needs: who may read, and what to hide.
pub struct ScanContext {
    pub gate: PermissionGate,
    pub rules: ExcludeRules,
}

impl ScanContext {
    pub fn new(gate: PermissionGate, rules: ExcludeRules) -> Self {
        Self { gate, rules }
    }

    /// Broad-tier context for `storage_root`, probing the root itself.
    pub fn for_storage_root(storage_root: PathBuf) -> Self {
        let storage_root = absolutize(&storage_root);
        Self {
            gate: PermissionGate::probing(storage_root.clone()),
            rules: ExcludeRules::new(storage_root),
        }
    }

    pub fn storage_root(&self) -> &Path {
        self.rules.storage_root()
    }

    /// Fail with `PermissionDenied` on `target` unless the gate grants access.
    pub(crate) fn ensure_access(&self, target: &Path) -> Result<(), FsError> {
        if self.gate.check_access().is_granted() {
            Ok(())
        } else {
            Err(FsError::PermissionDenied(target.to_path_buf()))
        }
    }
}
