use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;

use log::{LevelFilter, SetLoggerError};
use simplelog::{CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

#[derive(Debug)]
pub enum LoggingError {
    Io(io::Error),
    Init(SetLoggerError),
    TerminalError,
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LoggingError::Io(ref err) => write!(f, "IO error: {}", err),
            LoggingError::Init(ref err) => write!(f, "set_logger error: {}", err),
            LoggingError::TerminalError => write!(f, "missing terminal error"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            LoggingError::Io(ref err) => Some(err),
            LoggingError::Init(ref err) => Some(err),
            LoggingError::TerminalError => None,
        }
    }
}

impl From<SetLoggerError> for LoggingError {
    fn from(err: SetLoggerError) -> LoggingError {
        LoggingError::Init(err)
    }
}

impl From<io::Error> for LoggingError {
    fn from(err: io::Error) -> LoggingError {
        LoggingError::Io(err)
    }
}

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Truncated on start.
    File(PathBuf),
}

impl LogTarget {
    /// `-` means stderr, anything else is a file path.
    pub fn parse(log_stream: &str) -> LogTarget {
        if log_stream == "-" {
            LogTarget::Stderr
        } else {
            LogTarget::File(PathBuf::from(log_stream))
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LogTarget::Stderr => write!(f, "stderr"),
            LogTarget::File(ref path) => write!(f, "{}", path.display()),
        }
    }
}

fn build_logger(target: &LogTarget, log_level: LevelFilter) -> Result<Box<dyn SharedLogger>, LoggingError> {
    let log_conf = simplelog::Config::default();

    let logger: Box<dyn SharedLogger> = match *target {
        LogTarget::Stderr => TermLogger::new(log_level, log_conf, TerminalMode::Stderr)
            .ok_or(LoggingError::TerminalError)?,
        LogTarget::File(ref path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            WriteLogger::new(log_level, log_conf, file)
        }
    };
    Ok(logger)
}

pub fn set_logger(target: &LogTarget, log_level: LevelFilter) -> Result<(), LoggingError> {
    let logger = build_logger(target, log_level)?;
    CombinedLogger::init(vec![logger])?;
    Ok(())
}

pub fn set_logger_or_exit(log_stream: &str, log_level: LevelFilter) {
    let target = LogTarget::parse(log_stream);
    if let Err(err) = set_logger(&target, log_level) {
        let stderr = io::stderr();
        let _ = writeln!(stderr.lock(), "can't start logging to \"{}\": {}", target, err);
        exit(-1);
    }
}
