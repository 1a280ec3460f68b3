use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CountError {
    /// The document root can't be listed.
    SourceUnavailable { path: PathBuf, err: io::Error },
    /// A document can't be opened or read.
    DocumentUnreadable { id: String, err: io::Error },
    /// A report destination can't be created or written.
    OutputUnwritable { target: String, err: io::Error },
    /// The run was used again after an earlier failure stopped it.
    Aborted,
}

impl CountError {
    pub fn exit_code(&self) -> i32 {
        match *self {
            CountError::SourceUnavailable { .. } => 2,
            CountError::DocumentUnreadable { .. } => 3,
            CountError::OutputUnwritable { .. } => 4,
            CountError::Aborted => 5,
        }
    }

    pub fn source_unavailable<P: Into<PathBuf>>(path: P, err: io::Error) -> CountError {
        CountError::SourceUnavailable { path: path.into(), err }
    }

    pub fn document_unreadable<S: Into<String>>(id: S, err: io::Error) -> CountError {
        CountError::DocumentUnreadable { id: id.into(), err }
    }

    pub fn output_unwritable<S: Into<String>>(target: S, err: io::Error) -> CountError {
        CountError::OutputUnwritable { target: target.into(), err }
    }
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CountError::SourceUnavailable { ref path, ref err } => {
                write!(f, "invalid document root \"{}\": {}", path.display(), err)
            }
            CountError::DocumentUnreadable { ref id, ref err } => {
                write!(f, "can't read document \"{}\": {}", id, err)
            }
            CountError::OutputUnwritable { ref target, ref err } => {
                write!(f, "can't write report \"{}\": {}", target, err)
            }
            CountError::Aborted => write!(f, "run already aborted by an earlier failure"),
        }
    }
}

impl Error for CountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CountError::SourceUnavailable { ref err, .. } => Some(err),
            CountError::DocumentUnreadable { ref err, .. } => Some(err),
            CountError::OutputUnwritable { ref err, .. } => Some(err),
            CountError::Aborted => None,
        }
    }
}
