//! Leveled logging for the Xenon toolchain.
//!
//! Every stage of the interpreter reports progress through the macros in this
//! crate. Messages go to standard error so that standard output carries
//! nothing but the lines a Xenon program prints.
//!
//! The level is process-wide. It starts at [`Level::Warn`] and can be changed
//! with [`set_level`], [`set_level_from_str`] or, for drivers, from the
//! `XENON_LOG` environment variable via [`init_from_env`].
//!
//! # Example
//!
//! ```
//! use xenon_log::{debug, info, warn, Level};
//!
//! xenon_log::set_level(Level::Debug);
//!
//! let classes = 3;
//! info!("registered {} classes", classes);
//! debug!("field slots: {:?}", vec![0, 1, 2]);
//! warn!("call depth is getting large");
//! ```

use std::fmt::Arguments;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Environment variable consulted by [`init_from_env`].
pub const LOG_ENV: &str = "XENON_LOG";

/// Severity of a log message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Failures that stop a run
    Error = 0,
    /// Suspicious conditions
    Warn = 1,
    /// Coarse progress of a run
    Info = 2,
    /// Stage-level detail (token counts, timings)
    Debug = 3,
    /// Per-call detail
    Trace = 4,
}

impl Level {
    const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the upper-case name of this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Parses a level name, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// use xenon_log::Level;
    ///
    /// assert_eq!(Level::from_str("warn"), Ok(Level::Warn));
    /// assert_eq!(Level::from_str("TRACE"), Ok(Level::Trace));
    /// assert!(Level::from_str("loud").is_err());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// Process-wide logger state.
pub struct Logger {
    level: AtomicU8,
    colors: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            colors: AtomicBool::new(true),
        }
    }

    /// Sets the minimum level that is written.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the minimum level that is written.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Turns ANSI colors in the level tag on or off.
    pub fn set_colors(&self, enabled: bool) {
        self.colors.store(enabled, Ordering::SeqCst);
    }

    /// Returns `true` if a message at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at [`Level::Warn`] on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the minimum level of the global logger.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the minimum level of the global logger from its name.
///
/// # Example
///
/// ```
/// xenon_log::set_level_from_str("debug").unwrap();
/// assert_eq!(xenon_log::get_logger().level(), xenon_log::Level::Debug);
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), String> {
    let level = Level::from_str(s)?;
    set_level(level);
    Ok(())
}

/// Turns colored level tags on or off for the global logger.
pub fn set_colors(enabled: bool) {
    get_logger().set_colors(enabled);
}

/// Applies the level named by `XENON_LOG`, if the variable is set.
///
/// Returns the level that was applied. An unset variable leaves the logger
/// untouched; an unparsable one is reported as an error.
pub fn init_from_env() -> Result<Option<Level>, String> {
    match std::env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => {
            let level = Level::from_str(&value)?;
            set_level(level);
            Ok(Some(level))
        }
        _ => Ok(None),
    }
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    static RESET: &str = "\x1b[0m";

    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }

    let level_str = level.as_str();
    if logger.colors.load(Ordering::Relaxed) {
        let color = level.color_code();
        eprintln!("{color}[{level_str}]{RESET} {target}: {args}");
    } else {
        eprintln!("[{level_str}] {target}: {args}");
    }
}

/// Logs a message at an explicit level, tagged with the caller's module.
///
/// ```
/// use xenon_log::{log, Level};
///
/// log!(level: Level::Info, "parsed {} statements", 12);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at [`Level::Trace`].
///
/// ```
/// use xenon_log::trace;
///
/// # let method = "getId";
/// trace!("calling {}", method);
/// ```
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
