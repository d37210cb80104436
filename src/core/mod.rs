pub mod collector;
pub mod phase;
pub mod record;
pub mod source;
pub mod timing;
pub mod types;
pub mod url;

pub use collector::{DEFAULT_LOADER_MARKER, collect_records, has_timing_capability};
pub use phase::{PhaseInterval, TimingPhase};
pub use record::TimingRecord;
pub use source::{
    TIMING_SNAPSHOT_JSON_SCHEMA_V1, TimingSnapshot, TimingSnapshotJsonContractV1, TimingSource,
};
pub use timing::{NavigationTiming, ResourceTiming};
pub use types::Viewport;
pub use url::{LabelTruncation, shorten_url, strip_query_and_fragment};
