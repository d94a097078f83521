//! Tracing setup for the contact book.
//!
//! Console output follows `RUST_LOG` (default `info`). Access events use the
//! [`ACCESS_TARGET`] target. When `AGENDA_ACCESS_LOG_ROLL=1` they go to a
//! rolling file instead of the console, and otherwise they are printed with
//! everything else.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Directive, Targets};
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Target used by the HTTP access log middleware.
pub const ACCESS_TARGET: &str = "http.access";

static ACCESS_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Where rolled access logs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogFile {
    pub dir: PathBuf,
    pub prefix: String,
    pub rotation: Rotation,
}

impl AccessLogFile {
    /// `None` unless `AGENDA_ACCESS_LOG_ROLL=1`.
    pub fn from_env() -> Option<Self> {
        if std::env::var("AGENDA_ACCESS_LOG_ROLL").ok().as_deref() != Some("1") {
            return None;
        }
        Some(Self {
            dir: std::env::var("AGENDA_ACCESS_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            prefix: std::env::var("AGENDA_ACCESS_LOG_PREFIX")
                .unwrap_or_else(|_| "http-access".into()),
            rotation: parse_rotation(
                &std::env::var("AGENDA_ACCESS_LOG_ROTATION").unwrap_or_default(),
            ),
        })
    }

    /// Open the appender, creating the directory when missing.
    pub fn open(&self) -> Result<RollingFileAppender, InitError> {
        RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(&self.prefix)
            .build(&self.dir)
    }
}

/// Unknown values fall back to daily.
pub fn parse_rotation(raw: &str) -> Rotation {
    match raw.trim().to_ascii_lowercase().as_str() {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// Console filter from a `RUST_LOG`-style string. Access events are muted on
/// the console while a file layer is collecting them.
pub fn console_filter(raw: Option<&str>, access_to_file: bool) -> EnvFilter {
    let filter = raw
        .and_then(|r| EnvFilter::try_new(r).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    if !access_to_file {
        return filter;
    }
    match format!("{ACCESS_TARGET}=off").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let file_cfg = AccessLogFile::from_env();
    let mut open_err = None;
    let appender = file_cfg.as_ref().and_then(|cfg| match cfg.open() {
        Ok(appender) => Some(appender),
        Err(err) => {
            open_err = Some(err);
            None
        }
    });

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = console_filter(rust_log.as_deref(), appender.is_some());
    let console = fmt::layer().with_filter(filter);
    let registry = tracing_subscriber::registry().with(console);

    match appender {
        Some(appender) => {
            let (nb, guard) = tracing_appender::non_blocking(appender);
            let _ = ACCESS_GUARD.set(guard);
            let access_layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(nb)
                .with_filter(Targets::new().with_target(ACCESS_TARGET, tracing::Level::INFO));
            let _ = registry.with(access_layer).try_init();
        }
        None => {
            let _ = registry.try_init();
        }
    }

    if let (Some(cfg), Some(err)) = (file_cfg, open_err) {
        tracing::warn!(
            directory = %cfg.dir.display(),
            %err,
            "access log file unavailable; access events stay on the console"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rotation_names() {
        assert_eq!(parse_rotation("Hourly"), Rotation::HOURLY);
        assert_eq!(parse_rotation("minutely"), Rotation::MINUTELY);
        assert_eq!(parse_rotation("never"), Rotation::NEVER);
        assert_eq!(parse_rotation(""), Rotation::DAILY);
        assert_eq!(parse_rotation("weekly"), Rotation::DAILY);
    }

    #[test]
    fn console_filter_mutes_access_only_when_rolled() {
        let rolled = console_filter(Some("debug"), true).to_string();
        assert!(rolled.contains("http.access=off"), "{rolled}");
        assert!(rolled.contains("debug"), "{rolled}");

        let plain = console_filter(Some("debug"), false).to_string();
        assert!(!plain.contains("http.access"), "{plain}");
    }

    #[test]
    fn console_filter_falls_back_to_info() {
        assert_eq!(console_filter(None, false).to_string(), "info");
        assert_eq!(
            console_filter(Some("agenda=notalevel"), false).to_string(),
            "info"
        );
    }

    #[test]
    fn open_creates_file_under_missing_dir() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = AccessLogFile {
            dir: root.path().join("nested").join("logs"),
            prefix: "access".into(),
            rotation: Rotation::NEVER,
        };
        let mut appender = cfg.open().expect("open appender");
        appender.write_all(b"GET /contatos 200\n").expect("write");
        appender.flush().expect("flush");
        let written = std::fs::read_to_string(cfg.dir.join("access")).expect("log file");
        assert_eq!(written, "GET /contatos 200\n");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
        tracing::info!(target: ACCESS_TARGET, "smoke");
    }
}
