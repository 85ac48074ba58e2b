use crate::app::config::{FileRotation, LogType, LoggingConfig};
use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

type DynLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync + 'static>;

struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Installs the global tracing subscriber from the logging config.
/// Call once at process start; a second call reports an error from
/// the subscriber registry.
pub fn init(config: &LoggingConfig) -> Result<()> {
    config.validate()?;

    let crate_name = env!("CARGO_PKG_NAME");
    let filter = EnvFilter::from_default_env()
        .add_directive("error".parse()?)
        .add_directive(format!("{}={}", crate_name, config.level).parse()?);

    let mut layers: Vec<DynLayer> = Vec::new();

    for sink in &config.sinks {
        match &sink.dest {
            LogType::Stdout { color, json, spans } => {
                let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());
                std::mem::forget(_guard);

                layers.push(fmt_layer(non_blocking, *json, *color, *spans));
            }
            LogType::File {
                path,
                json,
                rotation,
                max_files,
                spans,
            } => {
                let writer = create_file_writer(path, rotation, *max_files)?;
                layers.push(fmt_layer(writer, *json, false, *spans));
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(())
}

fn fmt_layer(writer: NonBlocking, json: bool, color: bool, spans: bool) -> DynLayer {
    let span_events = if spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(span_events)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_timer(CompactTime)
            .with_ansi(color)
            .with_writer(writer)
            .with_span_events(span_events)
            .boxed()
    }
}

fn create_file_writer(
    path: &Path,
    rotation: &FileRotation,
    max_files: usize,
) -> Result<NonBlocking> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "gocart.log".to_string());

    let rotation = match rotation {
        FileRotation::Daily => Rotation::DAILY,
        FileRotation::Hourly => Rotation::HOURLY,
        FileRotation::Never => Rotation::NEVER,
    };

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix);

    if max_files > 0 {
        builder = builder.max_log_files(max_files);
    }

    let appender = builder.build(dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    std::mem::forget(guard);

    Ok(non_blocking)
}
