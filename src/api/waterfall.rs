use tracing::{debug, warn};

use crate::core::{TimingRecord, TimingSource, collect_records};
use crate::error::{WaterfallError, WaterfallResult};
use crate::host::ChartDocument;
use crate::render::{DrawingSurface, WaterfallFrame};

use super::{WaterfallConfig, WaterfallLayout, build_waterfall_frame};

/// Result of one injection into a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
    /// A chart with `records` rows was mounted.
    Drawn { records: usize },
    /// The host has no timing capability; a notice was posted instead.
    Unsupported,
}

/// Main facade: collect timing records, lay them out, and draw them.
///
/// One pass is synchronous and holds no state beyond the configuration, so
/// a `Waterfall` can be reused for any number of snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Waterfall {
    config: WaterfallConfig,
}

impl Waterfall {
    pub fn new(config: WaterfallConfig) -> WaterfallResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &WaterfallConfig {
        &self.config
    }

    /// Page record first, then sub-resources, minus the loader script.
    pub fn collect<S: TimingSource + ?Sized>(
        &self,
        source: &S,
    ) -> WaterfallResult<Vec<TimingRecord>> {
        collect_records(source, &self.config.loader_marker)
    }

    pub fn layout(&self, records: &[TimingRecord]) -> WaterfallResult<WaterfallLayout> {
        WaterfallLayout::compute(records, &self.config)
    }

    pub fn build_frame(&self, records: &[TimingRecord]) -> WaterfallResult<WaterfallFrame> {
        build_waterfall_frame(records, &self.config)
    }

    /// Collects from `source` and builds its frame, described with the
    /// capture time when the host reports one.
    pub fn frame_for<S: TimingSource + ?Sized>(&self, source: &S) -> WaterfallResult<WaterfallFrame> {
        let records = self.collect(source)?;
        Ok(describe(self.build_frame(&records)?, source))
    }

    pub fn draw<D: DrawingSurface + ?Sized>(
        &self,
        records: &[TimingRecord],
        surface: &mut D,
    ) -> WaterfallResult<()> {
        self.build_frame(records)?.draw(surface)
    }

    /// Bookmarklet-style entry point: read the host once and mount the
    /// chart into `document`.
    ///
    /// A host without timing support gets a single notice and no chart.
    pub fn inject<S: TimingSource + ?Sized>(
        &self,
        source: &S,
        document: &mut ChartDocument,
    ) -> WaterfallResult<InjectOutcome> {
        let records = match self.collect(source) {
            Ok(records) => records,
            Err(err @ WaterfallError::TimingUnsupported) => {
                warn!("timing capability missing; nothing drawn");
                document.alert(err.to_string());
                return Ok(InjectOutcome::Unsupported);
            }
            Err(err) => return Err(err),
        };

        let frame = describe(self.build_frame(&records)?, source);
        debug!(records = records.len(), "mounting waterfall chart");
        document.mount_chart(frame);
        Ok(InjectOutcome::Drawn {
            records: records.len(),
        })
    }
}

fn describe<S: TimingSource + ?Sized>(frame: WaterfallFrame, source: &S) -> WaterfallFrame {
    let description = match source.navigation_started_at() {
        Some(started) => format!(
            "Page load waterfall for {} captured {}",
            source.document_url(),
            started.to_rfc3339()
        ),
        None => format!("Page load waterfall for {}", source.document_url()),
    };
    frame.with_description(description)
}
