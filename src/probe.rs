//! Bounded reachability check for mount points.

use std::path::Path;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::time::timeout;

/// How long a probe may take before the target is declared unreachable.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(4);

/// Returns whether `path` can be listed within [`PROBE_TIMEOUT`].
///
/// A dead network mount blocks a directory listing indefinitely; the
/// timeout turns that into a plain `false` so the batch cannot stall on an
/// unreachable destination. Missing paths and permission problems also
/// report `false`. The check is read-only.
pub fn is_reachable(path: &Path) -> bool {
    let rt = match Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(_) => return false,
    };
    let reachable = rt.block_on(async {
        matches!(timeout(PROBE_TIMEOUT, tokio::fs::read_dir(path)).await, Ok(Ok(_)))
    });
    // A listing still hung on a dead mount must not block runtime teardown.
    rt.shutdown_background();
    reachable
}
