/// JavaScript that serializes the page's timing data into a
/// `TimingSnapshot` contract (schema version 1).
///
/// Evaluate it in the page (devtools console or a driver) after load. A
/// browser without the timing interfaces yields `null` for `navigation` /
/// `resources`, which the collector reports as unsupported.
pub const CAPTURE_SNAPSHOT_JS: &str = r#"
(function captureTimingSnapshot() {
    var perf = window.performance;
    var navigationFields = [
        'navigationStart', 'redirectStart', 'redirectEnd',
        'domainLookupStart', 'domainLookupEnd', 'connectStart', 'connectEnd',
        'secureConnectionStart', 'requestStart', 'responseStart', 'responseEnd'
    ];
    var resourceFields = [
        'name', 'startTime', 'duration', 'redirectStart', 'redirectEnd',
        'domainLookupStart', 'domainLookupEnd', 'connectStart', 'connectEnd',
        'secureConnectionStart', 'requestStart', 'responseStart', 'responseEnd'
    ];

    function pick(source, fields) {
        var out = {};
        for (var i = 0; i < fields.length; i++) {
            var value = source[fields[i]];
            if (value !== undefined) {
                out[fields[i]] = value;
            }
        }
        return out;
    }

    var entries = null;
    if (perf !== undefined) {
        if (perf.getEntriesByType !== undefined) {
            entries = perf.getEntriesByType('resource');
        } else if (perf.webkitGetEntriesByType !== undefined) {
            entries = perf.webkitGetEntriesByType('resource');
        }
    }

    var resources = null;
    if (entries !== null) {
        resources = [];
        for (var n = 0; n < entries.length; n++) {
            resources.push(pick(entries[n], resourceFields));
        }
    }

    return JSON.stringify({
        schemaVersion: 1,
        snapshot: {
            url: document.URL,
            navigation: perf !== undefined && perf.timing ? pick(perf.timing, navigationFields) : null,
            resources: resources
        }
    }, null, 2);
})();
"#;
