//! Storage access gate.
//!
//! Broad access can be revoked by the OS at any time without telling the
//! process, so the gate has no memory: every [`PermissionGate::check_access`]
//! asks the subsystem again, and the bundled [`ProbeSubsystem`] answers by
//! actually opening a reference directory.

use std::{
    fs::read_dir,
    path::{Path, PathBuf},
    sync::Arc,
};

use folio_runtime::settings_intent;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

impl Access {
    pub fn is_granted(self) -> bool {
        self == Access::Granted
    }
}

impl From<bool> for Access {
    fn from(granted: bool) -> Self {
        if granted { Access::Granted } else { Access::Denied }
    }
}

/// Which permission model the platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessTier {
    /// All-files access, granted from a system settings screen.
    #[default]
    Broad,
    /// Legacy per-category access, granted from an in-app dialog.
    Scoped,
}

/// Result of asking for more access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// The settings surface was opened; the outcome is only visible on the
    /// next check.
    SettingsOpened,
    Granted,
    Denied,
}

/// Platform permission hooks.
pub trait PermissionSubsystem: Send + Sync {
    fn has_broad_access(&self) -> bool;
    /// Open the OS settings screen named by `intent`. Must not block.
    fn request_broad_access(&self, intent: &str);
    fn has_scoped_access(&self) -> bool;
    fn request_scoped_access(&self) -> bool;
}

/// Answers access questions by touching a real directory.
pub struct ProbeSubsystem {
    reference_dir: PathBuf,
}

impl ProbeSubsystem {
    pub fn new(reference_dir: PathBuf) -> Self {
        Self { reference_dir }
    }

    pub fn reference_dir(&self) -> &Path {
        &self.reference_dir
    }

    fn probe(&self) -> bool {
        match read_dir(&self.reference_dir) {
            Ok(_) => true,
            Err(e) => {
                debug!(
                    "[permission] probe of {} failed: {e}",
                    self.reference_dir.display()
                );
                false
            }
        }
    }
}

impl PermissionSubsystem for ProbeSubsystem {
    fn has_broad_access(&self) -> bool {
        self.probe()
    }

    fn request_broad_access(&self, intent: &str) {
        // Desktop hosts have no settings surface; the grant is the
        // filesystem mode itself.
        info!(
            "[permission] grant access to {} (settings target {intent})",
            self.reference_dir.display()
        );
    }

    fn has_scoped_access(&self) -> bool {
        self.probe()
    }

    fn request_scoped_access(&self) -> bool {
        self.probe()
    }
}

#[derive(Clone)]
pub struct PermissionGate {
    tier: AccessTier,
    subsystem: Arc<dyn PermissionSubsystem>,
}

impl PermissionGate {
    pub fn new(tier: AccessTier, subsystem: Arc<dyn PermissionSubsystem>) -> Self {
        Self { tier, subsystem }
    }

    /// Broad-tier gate probing `reference_dir`.
    pub fn probing(reference_dir: PathBuf) -> Self {
        Self::new(
            AccessTier::Broad,
            Arc::new(ProbeSubsystem::new(reference_dir)),
        )
    }

    pub fn tier(&self) -> AccessTier {
        self.tier
    }

    pub fn check_access(&self) -> Access {
        let access = Access::from(match self.tier {
            AccessTier::Broad => self.subsystem.has_broad_access(),
            AccessTier::Scoped => self.subsystem.has_scoped_access(),
        });
        debug!("[permission] {:?} tier check: {:?}", self.tier, access);
        access
    }

    /// Ask for more access. Never blocks on the user; callers re-check on
    /// their next use of the filesystem.
    pub fn request_elevation(&self) -> Elevation {
        match self.tier {
            AccessTier::Broad => {
                self.subsystem.request_broad_access(&settings_intent());
                Elevation::SettingsOpened
            }
            AccessTier::Scoped => {
                if self.subsystem.request_scoped_access() {
                    Elevation::Granted
                } else {
                    Elevation::Denied
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;
