//! Shared temporary name helpers.
//! Provides unique hidden names for temp siblings and staging areas.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Prefix shared by every temporary entry this crate creates.
pub const TEMP_PREFIX: &str = ".app_files.";

fn unique_stem() -> String {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{pid}.{nanos}.{seq}")
}

/// Hidden sibling of `target` for an atomic write.
/// Pattern: .app_files.<pid>.<nanos>.<seq>.tmp
pub fn tmp_sibling_name(target: &Path) -> PathBuf {
    let name = format!("{TEMP_PREFIX}{}.tmp", unique_stem());
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

/// Fresh staging directory name under `staging_root`.
/// Pattern: .app_files.staging.<pid>.<nanos>.<seq>
pub fn staging_dir_name(staging_root: &Path) -> PathBuf {
    staging_root.join(format!("{TEMP_PREFIX}staging.{}", unique_stem()))
}

/// True for names produced by this module.
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX)
}
