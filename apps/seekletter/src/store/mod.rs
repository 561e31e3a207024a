//! Job store: one folder per saved job under a root directory.
//!
//! Layout: `<root>/<slug>_<id>/{metadata.json, job_description.txt, cover_letter.tex}`.
//! A folder only ever moves forward: collected, then lettered. Nothing here
//! overwrites a cover letter.

pub mod slug;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{is_placeholder_description, JobMetadata, JobRecord};

pub use slug::{folder_name, sanitize_title};

pub const METADATA_FILE: &str = "metadata.json";
pub const DESCRIPTION_FILE: &str = "job_description.txt";
pub const COVER_LETTER_FILE: &str = "cover_letter.tex";

/// Pipeline state of a job folder. A job with no folder is unseen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobState {
    /// Folder exists but metadata or description is missing.
    Incomplete,
    Collected,
    Lettered,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobState::Incomplete => "incomplete",
            JobState::Collected => "collected",
            JobState::Lettered => "lettered",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct JobStore {
    root: PathBuf,
}

impl JobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// The folder a job lands in. Does not touch the filesystem.
    pub fn folder_for(&self, job_id: &str, title: &str) -> JobFolder {
        JobFolder::new(self.root.join(folder_name(title, job_id)))
    }

    /// Writes `metadata.json` and `job_description.txt` for a job.
    pub fn save_job(&self, job: &JobRecord) -> Result<JobFolder, AppError> {
        let folder = self.folder_for(&job.id, &job.title);
        std::fs::create_dir_all(folder.path())?;

        let metadata = serde_json::to_string_pretty(&job.metadata())?;
        std::fs::write(folder.metadata_path(), metadata)?;
        std::fs::write(folder.description_path(), &job.description)?;

        debug!("Wrote job {} to {}", job.id, folder.path().display());
        Ok(folder)
    }

    /// Every job folder under the root, sorted by name. Plain files are ignored.
    pub fn folders(&self) -> Result<Vec<JobFolder>, AppError> {
        let mut folders = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                folders.push(JobFolder::new(entry.path()));
            }
        }
        folders.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(folders)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFolder {
    path: PathBuf,
}

impl JobFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_FILE)
    }

    pub fn description_path(&self) -> PathBuf {
        self.path.join(DESCRIPTION_FILE)
    }

    pub fn cover_letter_path(&self) -> PathBuf {
        self.path.join(COVER_LETTER_FILE)
    }

    pub fn has_cover_letter(&self) -> bool {
        self.cover_letter_path().is_file()
    }

    pub fn is_collected(&self) -> bool {
        self.metadata_path().is_file() && self.description_path().is_file()
    }

    /// Collected, but only with placeholder text where the description
    /// should be. Unreadable descriptions count as placeholders.
    pub fn has_placeholder_description(&self) -> bool {
        self.read_description()
            .map(|d| is_placeholder_description(&d))
            .unwrap_or(true)
    }

    pub fn state(&self) -> JobState {
        if self.has_cover_letter() {
            JobState::Lettered
        } else if self.is_collected() {
            JobState::Collected
        } else {
            JobState::Incomplete
        }
    }

    pub fn read_metadata(&self) -> Result<JobMetadata, AppError> {
        let raw = std::fs::read_to_string(self.metadata_path())?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn read_description(&self) -> Result<String, AppError> {
        Ok(std::fs::read_to_string(self.description_path())?)
    }

    /// Writes the cover letter through a temp file in the same folder, then
    /// links it into place only if no letter exists yet.
    pub fn write_cover_letter(&self, letter: &str) -> Result<PathBuf, AppError> {
        let target = self.cover_letter_path();
        let mut tmp = NamedTempFile::new_in(&self.path)?;
        tmp.write_all(letter.as_bytes())?;
        tmp.flush()?;
        tmp.persist_noclobber(&target).map_err(|e| AppError::Io(e.error))?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job(id: &str, title: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: None,
            salary: None,
            posted: Some("1d ago".to_string()),
            teaser: "Short teaser".to_string(),
            description: "We need a person.".to_string(),
        }
    }

    #[test]
    fn test_save_job_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        let folder = store.save_job(&job("77", "Barista (Part time)")).unwrap();

        assert_eq!(folder.name(), "Barista_Part_time_77");
        assert_eq!(folder.state(), JobState::Collected);
        let metadata = folder.read_metadata().unwrap();
        assert_eq!(metadata.id, "77");
        assert_eq!(metadata.location, "N/A");
        assert_eq!(folder.read_description().unwrap(), "We need a person.");
    }

    #[test]
    fn test_metadata_written_with_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        let folder = store.save_job(&job("1", "Chef")).unwrap();
        let raw = std::fs::read_to_string(folder.metadata_path()).unwrap();
        assert!(raw.starts_with("{\n  \"id\": \"1\""));
    }

    #[test]
    fn test_folders_sorted_and_skip_files() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        store.save_job(&job("2", "Zoo Keeper")).unwrap();
        store.save_job(&job("1", "Accountant")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a job").unwrap();

        let names: Vec<_> = store.folders().unwrap().iter().map(JobFolder::name).collect();
        assert_eq!(names, vec!["Accountant_1", "Zoo_Keeper_2"]);
    }

    #[test]
    fn test_write_cover_letter_never_clobbers() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        let folder = store.save_job(&job("9", "Writer")).unwrap();

        folder.write_cover_letter("first").unwrap();
        assert_eq!(folder.state(), JobState::Lettered);

        let err = folder.write_cover_letter("second").unwrap_err();
        assert!(matches!(err, AppError::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists));
        let kept = std::fs::read_to_string(folder.cover_letter_path()).unwrap();
        assert_eq!(kept, "first");

        // no stray temp files left behind
        let entries = std::fs::read_dir(folder.path()).unwrap().count();
        assert_eq!(entries, 3);
    }

    #[test]
    fn test_empty_folder_is_incomplete() {
        let dir = TempDir::new().unwrap();
        let folder = JobFolder::new(dir.path().join("Empty_1"));
        std::fs::create_dir(folder.path()).unwrap();
        assert_eq!(folder.state(), JobState::Incomplete);
        assert!(folder.read_metadata().is_err());
    }

    #[test]
    fn test_placeholder_description_detected_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        let mut failed = job("3", "Welder");
        failed.description = "[Failed to fetch job page: 503]".to_string();

        assert!(store.save_job(&failed).unwrap().has_placeholder_description());
        assert!(!store
            .save_job(&job("4", "Plumber"))
            .unwrap()
            .has_placeholder_description());
    }

    #[test]
    fn test_job_state_display() {
        assert_eq!(JobState::Lettered.to_string(), "lettered");
        assert_eq!(JobState::Collected.to_string(), "collected");
    }
}
