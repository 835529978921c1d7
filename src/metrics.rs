//! Metric names used across the pipeline, registered once so the series
//! carry descriptions on whatever recorder the host installs.

use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

pub const SOURCE_ITEMS: &str = "pulse_source_items_total";
pub const SOURCE_ERRORS: &str = "pulse_source_errors_total";
pub const SOURCE_TIMEOUTS: &str = "pulse_source_timeouts_total";
pub const SOURCE_FETCH_MS: &str = "pulse_source_fetch_ms";
pub const COLLECT_DEDUP: &str = "pulse_collect_dedup_total";
pub const SCORER_ACCEPTED: &str = "pulse_scorer_accepted_total";
pub const SCORER_REJECTED: &str = "pulse_scorer_rejected_total";
pub const DASHBOARD_BUILDS: &str = "pulse_dashboard_builds_total";
pub const DASHBOARD_LAST_BUILD_TS: &str = "pulse_dashboard_last_build_ts";

pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(SOURCE_ITEMS, "Snippets returned by sources (after cap).");
        describe_counter!(SOURCE_ERRORS, "Source fetch/parse failures absorbed.");
        describe_counter!(SOURCE_TIMEOUTS, "Source fetches cut off by the timeout.");
        describe_histogram!(SOURCE_FETCH_MS, "Source fetch time in milliseconds.");
        describe_counter!(COLLECT_DEDUP, "Snippets dropped as duplicate titles.");
        describe_counter!(SCORER_ACCEPTED, "Snippets accepted by the scorer.");
        describe_counter!(
            SCORER_REJECTED,
            "Snippets rejected by the scorer, labelled by reason."
        );
        describe_counter!(DASHBOARD_BUILDS, "Completed dashboard snapshots.");
        describe_gauge!(
            DASHBOARD_LAST_BUILD_TS,
            "Unix ts of the last completed dashboard snapshot."
        );
    });
}
