//! Ordering of sites from best to worst measured latency.

use crate::site::{Site, SiteStats};
use std::cmp::Ordering;
use std::sync::Arc;

/// Compare two statistics snapshots, best first.
///
/// Sites with samples rank before sites without, a zero average ranks after
/// a non-zero one, then lower average wins and lower deviation breaks ties.
pub fn compare_stats(a: &SiteStats, b: &SiteStats) -> Ordering {
    match (a.has_samples(), b.has_samples()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => return Ordering::Equal,
        (true, true) => {}
    }
    match (a.average == 0.0, b.average == 0.0) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    a.average
        .total_cmp(&b.average)
        .then_with(|| a.std_dev.total_cmp(&b.std_dev))
}

/// Sort sites best first. Equal sites keep their registry order.
pub fn sort_sites(sites: Vec<Arc<Site>>) -> Vec<Arc<Site>> {
    // one snapshot per site so the comparison is consistent during the sort
    let mut keyed: Vec<(Arc<SiteStats>, Arc<Site>)> =
        sites.into_iter().map(|s| (s.stats(), s)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_stats(a, b));
    keyed.into_iter().map(|(_, s)| s).collect()
}
