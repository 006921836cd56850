use std::fmt as StdFmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Once,
};

use tracing::{Event, Level};
use tracing_log::LogTracer;
use tracing_subscriber::filter::{FilterFn, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use tracing_subscriber::{layer::SubscriberExt, Registry};

use super::audit::AUDIT_LOG_ENV;

static INIT: Once = Once::new();
static ANNOUNCED_SINK: AtomicBool = AtomicBool::new(false);

/// Initialize global tracing subscribers for human logs and audit JSONL.
///
/// - Human logs go to stderr with level controlled by VERBOSE env (0..3)
/// - Audit events (target="audit") are appended as JSON lines to the file named
///   by IMPORT_PRECHECK_AUDIT_LOG; without it the audit layer is not attached
pub fn init_logging() {
    INIT.call_once(|| {
        // Capture legacy log:: macros and route them into tracing
        let _ = LogTracer::init();

        let level = verbosity_filter(std::env::var("VERBOSE").ok().as_deref());

        let human_layer = fmt::layer()
            .event_format(HumanFormatter {
                prefix: env!("CARGO_PKG_NAME"),
            })
            .with_writer(io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .with_filter(FilterFn::new(move |meta| {
                meta.target() != "audit" && *meta.level() <= level
            }));

        let audit = std::env::var_os(AUDIT_LOG_ENV).map(|path| audit_layer(PathBuf::from(path)));

        let subscriber = Registry::default().with(human_layer).with(audit);
        let _ = subscriber.try_init();
    });
}

/// JSONL layer appending only `target = "audit"` events to `path`.
fn audit_layer<S>(path: PathBuf) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    // Audit events carry their own ts field, so no timer here.
    fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_level(false)
        .with_target(false)
        .without_time()
        .with_writer(AuditMakeWriter::new(path))
        .with_filter(FilterFn::new(|meta| meta.target() == "audit"))
}

/// Map VERBOSE to a LevelFilter; fallback to INFO when unset or unparsable.
fn verbosity_filter(verbose: Option<&str>) -> LevelFilter {
    match verbose.and_then(|s| s.trim().parse::<u8>().ok()) {
        Some(0) => LevelFilter::ERROR,
        Some(1) => LevelFilter::INFO,
        Some(2) => LevelFilter::DEBUG,
        Some(3) => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// A MakeWriter that appends to the audit log file. Events are dropped when
/// the file cannot be opened.
struct AuditMakeWriter {
    path: PathBuf,
}

impl AuditMakeWriter {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn open(&self) -> io::Result<std::fs::File> {
        let f = open_append(&self.path);
        if !ANNOUNCED_SINK.swap(true, Ordering::SeqCst) {
            match &f {
                Ok(_) => tracing::debug!("audit sink: {}", self.path.display()),
                Err(e) => tracing::warn!("audit sink unavailable at {}: {}", self.path.display(), e),
            }
        }
        f
    }
}

fn open_append(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for AuditMakeWriter {
    type Writer = AuditWriter;
    fn make_writer(&'a self) -> Self::Writer {
        AuditWriter {
            file: self.open().ok(),
        }
    }
}

/// Write over an optional file; swallows output when the sink is missing.
pub struct AuditWriter {
    file: Option<std::fs::File>,
}

impl io::Write for AuditWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(f) = self.file.as_mut() {
            f.write(buf)
        } else {
            Ok(buf.len())
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        if let Some(f) = self.file.as_mut() {
            f.flush()
        } else {
            Ok(())
        }
    }
}

/// Human-readable formatter: prints "[<prefix>][v<level>] message"
struct HumanFormatter {
    prefix: &'static str,
}

impl<S, N> FormatEvent<S, N> for HumanFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> StdFmt::Result {
        let vnum = match *event.metadata().level() {
            Level::ERROR => 0,
            Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        };
        use tracing::field::{Field, Visit};
        struct MsgVisitor {
            msg: Option<String>,
            rest: Vec<String>,
        }
        impl Visit for MsgVisitor {
            fn record_debug(&mut self, field: &Field, value: &dyn StdFmt::Debug) {
                let name = field.name();
                if name == "message" {
                    self.msg = Some(format!("{:?}", value));
                } else {
                    self.rest.push(format!("{}={:?}", name, value));
                }
            }
        }
        let mut vis = MsgVisitor {
            msg: None,
            rest: Vec::new(),
        };
        event.record(&mut vis);
        let content = match vis.msg {
            Some(m) if vis.rest.is_empty() => m,
            Some(m) => format!("{} {}", m, vis.rest.join(" ")),
            None => vis.rest.join(" "),
        };
        writeln!(writer, "[{}][v{}] {}", self.prefix, vnum, content)
    }
}
