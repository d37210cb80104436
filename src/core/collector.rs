use tracing::{debug, trace, warn};

use crate::core::{TimingRecord, TimingSource};
use crate::error::{WaterfallError, WaterfallResult};

/// Path fragment identifying the tool's own loader script.
pub const DEFAULT_LOADER_MARKER: &str = "/waterfall.js";

/// Returns whether the host exposes both navigation and resource timing.
#[must_use]
pub fn has_timing_capability<S: TimingSource + ?Sized>(source: &S) -> bool {
    source.navigation_timing().is_some() && source.resource_timings().is_some()
}

/// Collects the page record followed by one record per sub-resource, in
/// host order.
///
/// Resources whose name contains `loader_marker` are skipped. An empty
/// marker disables that filter.
pub fn collect_records<S: TimingSource + ?Sized>(
    source: &S,
    loader_marker: &str,
) -> WaterfallResult<Vec<TimingRecord>> {
    let (Some(navigation), Some(resources)) =
        (source.navigation_timing(), source.resource_timings())
    else {
        warn!("host exposes no navigation/resource timing capability");
        return Err(WaterfallError::TimingUnsupported);
    };

    let mut records = Vec::with_capacity(resources.len() + 1);
    records.push(navigation.to_record(source.document_url()));

    let mut excluded = 0usize;
    for resource in resources {
        if !loader_marker.is_empty() && resource.name.contains(loader_marker) {
            trace!(name = %resource.name, "skipping loader script entry");
            excluded += 1;
            continue;
        }
        records.push(resource.to_record());
    }

    debug!(
        resource_count = resources.len(),
        excluded,
        record_count = records.len(),
        "collected timing records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_LOADER_MARKER, collect_records, has_timing_capability};
    use crate::core::{NavigationTiming, ResourceTiming, TimingSnapshot};
    use crate::error::WaterfallError;

    fn resource(name: &str, start_time: f64) -> ResourceTiming {
        ResourceTiming {
            name: name.to_owned(),
            start_time,
            duration: 10.0,
            ..ResourceTiming::default()
        }
    }

    #[test]
    fn page_record_comes_first_then_resources_in_host_order() {
        let snapshot = TimingSnapshot::new("https://example.com/", NavigationTiming::default())
            .with_resource(resource("https://example.com/b.css", 30.0))
            .with_resource(resource("https://example.com/a.js", 20.0));

        let records = collect_records(&snapshot, DEFAULT_LOADER_MARKER).expect("collect");
        let urls: Vec<&str> = records.iter().map(|record| record.url()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.com/b.css",
                "https://example.com/a.js"
            ]
        );
    }

    #[test]
    fn loader_script_is_excluded_wherever_it_appears() {
        let snapshot = TimingSnapshot::new("https://example.com/", NavigationTiming::default())
            .with_resource(resource("https://tools.example.org/sandbox/waterfall.js", 5.0))
            .with_resource(resource("https://example.com/a.js", 20.0));

        let records = collect_records(&snapshot, DEFAULT_LOADER_MARKER).expect("collect");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| !record.url().contains("waterfall.js")));
    }

    #[test]
    fn empty_marker_keeps_every_resource() {
        let snapshot = TimingSnapshot::new("https://example.com/", NavigationTiming::default())
            .with_resource(resource("https://example.com/waterfall.js", 5.0));

        let records = collect_records(&snapshot, "").expect("collect");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_capability_aborts_collection() {
        let snapshot = TimingSnapshot {
            url: "https://example.com/".to_owned(),
            navigation: Some(NavigationTiming::default()),
            resources: None,
        };

        assert!(!has_timing_capability(&snapshot));
        assert!(matches!(
            collect_records(&snapshot, DEFAULT_LOADER_MARKER),
            Err(WaterfallError::TimingUnsupported)
        ));
    }
}
