use std::fs;
use std::path::{Path, PathBuf};

use waterfall_rs::core::TimingSnapshot;
use waterfall_rs::host::{CAPTURE_SNAPSHOT_JS, ChartDocument};
use waterfall_rs::render::SvgSurface;
use waterfall_rs::telemetry::init_default_tracing;
use waterfall_rs::{Waterfall, WaterfallConfig, WaterfallError};

const USAGE: &str = "usage: waterfall render --input <snapshot.json> --output <path> \
[--format svg|html|png] [--config <config.json>] [--width <px>]\n       waterfall capture-script";

/// Exit code used when the snapshot host had no timing capability.
const EXIT_UNSUPPORTED: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Html,
    Png,
}

#[derive(Debug)]
struct RenderArgs {
    input: PathBuf,
    output: PathBuf,
    format: OutputFormat,
    config: Option<PathBuf>,
    width: Option<u32>,
}

#[derive(Debug)]
enum CliCommand {
    Render(RenderArgs),
    CaptureScript,
}

enum RunError {
    Unsupported(String),
    Failed(String),
}

impl From<String> for RunError {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

impl From<WaterfallError> for RunError {
    fn from(err: WaterfallError) -> Self {
        match err {
            WaterfallError::TimingUnsupported => Self::Unsupported(err.to_string()),
            other => Self::Failed(other.to_string()),
        }
    }
}

fn main() {
    let _ = init_default_tracing();
    match run() {
        Ok(()) => {}
        Err(RunError::Unsupported(notice)) => {
            eprintln!("{notice}");
            std::process::exit(EXIT_UNSUPPORTED);
        }
        Err(RunError::Failed(err)) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), RunError> {
    match parse_args()? {
        CliCommand::CaptureScript => {
            println!("{}", CAPTURE_SNAPSHOT_JS.trim());
            Ok(())
        }
        CliCommand::Render(args) => render(&args),
    }
}

fn render(args: &RenderArgs) -> Result<(), RunError> {
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let snapshot = TimingSnapshot::from_json_compat_str(&raw)?;

    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            WaterfallConfig::from_json_str(&raw)?
        }
        None => WaterfallConfig::default(),
    };
    if let Some(width) = args.width {
        config.chart_width = width;
    }
    let waterfall = Waterfall::new(config)?;

    match args.format {
        OutputFormat::Svg => {
            let frame = waterfall.frame_for(&snapshot)?;
            write_output(&args.output, SvgSurface::render_to_string(&frame)?.as_bytes())
        }
        OutputFormat::Html => {
            let mut document = ChartDocument::new();
            waterfall.inject(&snapshot, &mut document)?;
            if let Some(notice) = document.notices().first() {
                return Err(RunError::Unsupported(notice.clone()));
            }
            write_output(&args.output, document.to_html()?.as_bytes())
        }
        OutputFormat::Png => render_png(&waterfall, &snapshot, &args.output),
    }
}

#[cfg(feature = "cairo-backend")]
fn render_png(
    waterfall: &Waterfall,
    snapshot: &TimingSnapshot,
    output: &Path,
) -> Result<(), RunError> {
    use waterfall_rs::render::CairoSurface;

    let frame = waterfall.frame_for(snapshot)?;
    let mut surface = CairoSurface::new();
    frame.draw(&mut surface)?;
    let mut bytes = Vec::new();
    surface.write_png(&mut bytes)?;
    write_output(output, &bytes)
}

#[cfg(not(feature = "cairo-backend"))]
fn render_png(
    _waterfall: &Waterfall,
    _snapshot: &TimingSnapshot,
    _output: &Path,
) -> Result<(), RunError> {
    Err(RunError::Failed(
        "png output requires the `cairo-backend` feature".to_owned(),
    ))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    fs::write(path, bytes)
        .map_err(|err| RunError::Failed(format!("failed to write `{}`: {err}", path.display())))
}

fn parse_args() -> Result<CliCommand, String> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("render") => {}
        Some("capture-script") => return Ok(CliCommand::CaptureScript),
        _ => return Err(USAGE.to_owned()),
    }

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut format = None::<OutputFormat>;
    let mut config = None::<PathBuf>;
    let mut width = None::<u32>;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--format" => {
                format = Some(match value()?.as_str() {
                    "svg" => OutputFormat::Svg,
                    "html" => OutputFormat::Html,
                    "png" => OutputFormat::Png,
                    other => return Err(format!("unknown format `{other}`")),
                });
            }
            "--width" => {
                let raw = value()?;
                width = Some(
                    raw.parse()
                        .map_err(|err| format!("invalid --width `{raw}`: {err}"))?,
                );
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| "missing --input".to_owned())?;
    let output = output.ok_or_else(|| "missing --output".to_owned())?;
    let format = format.unwrap_or_else(|| format_from_extension(&output));
    Ok(CliCommand::Render(RenderArgs {
        input,
        output,
        format,
        config,
        width,
    }))
}

fn format_from_extension(path: &Path) -> OutputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => OutputFormat::Html,
        Some("png") => OutputFormat::Png,
        _ => OutputFormat::Svg,
    }
}
