use thiserror::Error;

pub type WaterfallResult<T> = Result<T, WaterfallError>;

#[derive(Debug, Error)]
pub enum WaterfallError {
    /// The host exposes no navigation/resource timing capability.
    #[error("Resource Timing API not supported")]
    TimingUnsupported,

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render backend failure: {0}")]
    Render(String),
}
