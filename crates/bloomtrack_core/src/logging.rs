//! Rolling-file logging for the tracker core.
//!
//! # Responsibility
//! - Start one `flexi_logger` backend per process, configured by the host app.
//! - Record tracker diagnostics as `event=… module=… status=…` lines carrying
//!   counts, levels and task ids only.
//!
//! # Invariants
//! - Repeating `init_logging` with the same level and directory is a no-op.
//! - A second call asking for another level or directory is rejected.
//! - Nothing here panics; failures come back as readable strings.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "bloomtrack";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;
const PANIC_NOTE_MAX_CHARS: usize = 160;

static BACKEND: OnceCell<Backend> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct Backend {
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Requested verbosity plus destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    filter: LevelFilter,
    dir: PathBuf,
}

impl LogTarget {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            filter: parse_filter(level)?,
            dir: parse_dir(log_dir)?,
        })
    }

    fn mismatch(&self, requested: &Self) -> Option<String> {
        if self.dir != requested.dir {
            Some(format!(
                "tracker logs already go to `{}`; cannot move them to `{}`",
                self.dir.display(),
                requested.dir.display()
            ))
        } else if self.filter != requested.filter {
            Some(format!(
                "tracker logging already runs at `{}`; cannot change it to `{}`",
                level_name(self.filter),
                level_name(requested.filter)
            ))
        } else {
            None
        }
    }
}

/// Starts file logging at `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - `level` is not `trace|debug|info|warn|error` (`warning` is accepted).
/// - `log_dir` is blank or relative, or cannot be created.
/// - The backend fails to start.
/// - Logging already runs with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogTarget::parse(level, log_dir)?;
    let backend = BACKEND.get_or_try_init(|| start_backend(requested.clone()))?;
    backend.target.mismatch(&requested).map_or(Ok(()), Err)
}

/// Active filter and directory, or `None` before `init_logging` succeeds.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    BACKEND
        .get()
        .map(|backend| (backend.target.filter, backend.target.dir.clone()))
}

/// Level used when the host does not pick one: `debug` in debug builds,
/// `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(target: LogTarget) -> Result<Backend, String> {
    std::fs::create_dir_all(&target.dir)
        .map_err(|err| format!("cannot create log dir `{}`: {err}", target.dir.display()))?;

    let spec = LogSpecification::builder().default(target.filter).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(target.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("tracker logger failed to start: {err}"))?;

    hook_panics();

    info!(
        "event=logging_ready module=logging status=ok level={} os={} core={}",
        level_name(target.filter),
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(Backend {
        target,
        _handle: handle,
    })
}

fn parse_filter(level: &str) -> Result<LevelFilter, String> {
    let wanted = level.trim();
    let wanted = if wanted.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        wanted
    };
    match LevelFilter::from_str(wanted) {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "log level `{}` not recognised; use trace, debug, info, warn or error",
            level.trim()
        )),
        Ok(filter) => Ok(filter),
    }
}

fn parse_dir(log_dir: &str) -> Result<PathBuf, String> {
    let dir = PathBuf::from(log_dir.trim());
    if dir.as_os_str().is_empty() {
        Err("log directory is required".to_string())
    } else if dir.is_relative() {
        Err(format!(
            "log directory must be absolute: `{}`",
            dir.display()
        ))
    } else {
        Ok(dir)
    }
}

fn level_name(filter: LevelFilter) -> String {
    filter.as_str().to_ascii_lowercase()
}

fn hook_panics() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let chained = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let note = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<opaque payload>".to_string());
        error!(
            "event=panic module=logging status=error at={location} note={}",
            one_line(&note, PANIC_NOTE_MAX_CHARS)
        );
        chained(info);
    }));
}

/// Single-line, length-capped rendering of free text (task names can reach
/// panic messages).
fn one_line(text: &str, max_chars: usize) -> String {
    let mut line: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(max_chars)
        .collect();
    if text.chars().nth(max_chars).is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{one_line, parse_dir, parse_filter, LogTarget};
    use log::LevelFilter;

    #[test]
    fn filter_parsing_is_case_insensitive_and_accepts_warning() {
        assert_eq!(parse_filter("INFO"), Ok(LevelFilter::Info));
        assert_eq!(parse_filter(" warning "), Ok(LevelFilter::Warn));
        assert!(parse_filter("verbose").is_err());
        assert!(parse_filter("off").is_err());
    }

    #[test]
    fn directory_must_be_absolute_and_present() {
        assert!(parse_dir("logs/dev")
            .expect_err("relative paths must be rejected")
            .contains("absolute"));
        assert!(parse_dir("   ").is_err());
    }

    #[test]
    fn one_line_flattens_and_caps() {
        let line = one_line("water\nthe\rlily", 8);
        assert_eq!(line, "water th...");
        assert_eq!(one_line("short", 8), "short");
    }

    #[test]
    fn mismatch_reports_level_change() {
        let dir = std::env::temp_dir().join("bloomtrack-target");
        let dir = dir.to_str().expect("temp dir should be valid UTF-8");
        let active = LogTarget::parse("info", dir).expect("valid target");

        assert!(active.mismatch(&active.clone()).is_none());
        let louder = LogTarget::parse("debug", dir).expect("valid target");
        assert!(active
            .mismatch(&louder)
            .expect("level mismatch")
            .contains("cannot change"));
    }
}
