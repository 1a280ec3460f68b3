use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::info;

use crate::aggregator::{Aggregator, Document, RunSummary, UnreadablePolicy};
use crate::error::CountError;
use crate::report::create_report;
use crate::util::Config;

/// A document on disk, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocument {
    id: String,
    path: PathBuf,
}

impl FileDocument {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(id: S, path: P) -> Self {
        FileDocument {
            id: id.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Document for FileDocument {
    type Reader = BufReader<File>;

    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<BufReader<File>> {
        Ok(BufReader::new(File::open(&self.path)?))
    }
}

/// Regular files directly inside `root` with the given extension, ordered
/// by file name.
pub fn scan_documents(root: &Path, extension: &str) -> Result<Vec<FileDocument>, CountError> {
    let unavailable = |err| CountError::source_unavailable(root, err);

    let mut documents = Vec::new();
    for entry in fs::read_dir(root).map_err(unavailable)? {
        let entry = entry.map_err(unavailable)?;
        let path = entry.path();
        if path.extension() != Some(OsStr::new(extension)) {
            continue;
        }
        // follows symlinks, unlike DirEntry::file_type
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            _ => continue,
        }
        let id = entry.file_name().to_string_lossy().into_owned();
        documents.push(FileDocument::new(id, path));
    }
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(documents)
}

/// The whole run over a directory: find the documents, create both reports,
/// count, write the total.
pub fn count_directory(conf: &Config) -> Result<RunSummary, CountError> {
    let root = Path::new(&conf.input);
    let documents = scan_documents(root, &conf.extension)?;
    info!("{} \"*.{}\" documents in {}", documents.len(), conf.extension, root.display());
    for document in &documents {
        info!("  {}", document.id());
    }

    let output = conf.output.as_ref().map(Path::new).unwrap_or(root);
    let each = create_report(&output.join(&conf.each))?;
    let totals = create_report(&output.join(&conf.totals))?;

    let policy = if conf.skip_unreadable {
        UnreadablePolicy::Skip
    } else {
        UnreadablePolicy::Abort
    };
    let summary = Aggregator::new(each, totals)
        .with_policy(policy)
        .run(documents)?;

    info!(
        "reports written to {} and {}",
        output.join(&conf.each).display(),
        output.join(&conf.totals).display()
    );
    Ok(summary)
}
