//! Supporting document intake
//!
//! Files are checked for type and size, then run through a simulated
//! upload whose progress advances by a random step on every tick.

use crate::config::{UploadConfig, MAX_PROGRESS_STEP, MIN_PROGRESS_STEP};
use crate::error::{RegistryError, Result};
use chrono::Utc;
use esg_core::{Document, DocumentKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human-readable file size: bytes, then KB and MB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// A file offered for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: Option<String>,
    pub size_bytes: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            size_bytes,
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// Limits applied to an upload batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_files: usize,
    pub max_file_bytes: u64,
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_files: config.max_files,
            max_file_bytes: config.max_file_bytes,
        }
    }
}

/// Result of screening a batch: accepted files and per-file rejections
#[derive(Debug)]
pub struct BatchScreening {
    pub accepted: Vec<(FileCandidate, DocumentKind)>,
    pub rejected: Vec<RegistryError>,
}

impl UploadPolicy {
    pub fn check_file(&self, file: &FileCandidate) -> Result<DocumentKind> {
        let kind = DocumentKind::detect(&file.name, file.mime_type.as_deref())?;

        if file.size_bytes > self.max_file_bytes {
            return Err(RegistryError::FileTooLarge {
                name: file.name.clone(),
                limit: format_file_size(self.max_file_bytes),
            });
        }

        Ok(kind)
    }

    /// Screen a batch. Invalid files are rejected individually; if the
    /// valid ones still exceed the file limit the whole batch is refused.
    pub fn screen(&self, files: Vec<FileCandidate>) -> Result<BatchScreening> {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for file in files {
            match self.check_file(&file) {
                Ok(kind) => accepted.push((file, kind)),
                Err(e) => {
                    warn!("Rejected upload: {}", e);
                    rejected.push(e);
                }
            }
        }

        if accepted.len() > self.max_files {
            return Err(RegistryError::TooManyFiles {
                count: accepted.len(),
                max: self.max_files,
            });
        }

        Ok(BatchScreening { accepted, rejected })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Success,
}

/// An upload in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: Uuid,
    pub name: String,
    pub kind: DocumentKind,
    pub size: String,
    pub status: UploadStatus,
    pub progress: f64,
}

impl UploadedFile {
    pub fn start(file: &FileCandidate, kind: DocumentKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: file.name.clone(),
            kind,
            size: format_file_size(file.size_bytes),
            status: UploadStatus::Uploading,
            progress: 0.0,
        }
    }

    /// Add progress, capped at 100; reaching 100 completes the upload
    pub fn advance(&mut self, step: f64) {
        if self.status != UploadStatus::Uploading {
            return;
        }
        self.progress = (self.progress + step).min(100.0);
        if self.progress >= 100.0 {
            self.progress = 100.0;
            self.status = UploadStatus::Success;
        }
    }

    /// Document record for a completed upload
    pub fn into_document(self) -> Option<Document> {
        (self.status == UploadStatus::Success).then(|| Document {
            id: self.id,
            name: self.name,
            kind: self.kind,
            uploaded_at: Utc::now(),
            size: self.size,
        })
    }
}

/// Drives simulated uploads on a fixed tick
#[derive(Debug, Clone)]
pub struct UploadSimulator {
    tick: Duration,
    max_step: f64,
}

impl UploadSimulator {
    /// Out-of-range steps are clamped; NaN falls back to the default
    pub fn new(config: &UploadConfig) -> Self {
        let step = config.max_progress_step;
        let max_step = if step.is_nan() {
            UploadConfig::default().max_progress_step
        } else {
            step.clamp(MIN_PROGRESS_STEP, MAX_PROGRESS_STEP)
        };

        Self {
            tick: Duration::from_millis(config.tick_interval_ms.max(1)),
            max_step,
        }
    }

    /// Advance every in-flight upload once per tick until none remain
    pub async fn run<R: Rng>(&self, uploads: &mut [UploadedFile], rng: &mut R) -> usize {
        let mut interval = tokio::time::interval(self.tick);
        // First tick completes immediately
        interval.tick().await;

        let mut ticks = 0;
        while uploads.iter().any(|u| u.status == UploadStatus::Uploading) {
            interval.tick().await;
            ticks += 1;

            for upload in uploads
                .iter_mut()
                .filter(|u| u.status == UploadStatus::Uploading)
            {
                upload.advance(rng.gen_range(0.0..self.max_step));
                debug!("Upload {} at {:.0}%", upload.name, upload.progress);
            }
        }

        info!("Completed {} uploads in {} ticks", uploads.len(), ticks);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn policy() -> UploadPolicy {
        UploadPolicy::from(&UploadConfig::default())
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(MIB), "1.0 MB");
        assert_eq!(format_file_size(10 * MIB), "10.0 MB");
    }

    #[test]
    fn test_check_file_type() {
        let policy = policy();
        assert_eq!(
            policy.check_file(&FileCandidate::new("report.PDF", 2048)).unwrap(),
            DocumentKind::Pdf
        );

        let by_mime = FileCandidate::new("upload", 10).with_mime_type(DocumentKind::Docx.mime_type());
        assert_eq!(policy.check_file(&by_mime).unwrap(), DocumentKind::Docx);

        let err = policy.check_file(&FileCandidate::new("photo.png", 10)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "photo.png is not a valid file. Only PDF and DOCX files are allowed."
        );
        assert!(matches!(
            err,
            RegistryError::Core(esg_core::Error::UnsupportedDocument(_))
        ));
    }

    #[test]
    fn test_check_file_size() {
        let policy = policy();
        assert!(policy
            .check_file(&FileCandidate::new("max.pdf", 10 * MIB))
            .is_ok());

        let err = policy
            .check_file(&FileCandidate::new("big.pdf", 10 * MIB + 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "big.pdf exceeds the 10.0 MB size limit.");
    }

    #[test]
    fn test_screen_partial_batch() {
        let screening = policy()
            .screen(vec![
                FileCandidate::new("a.pdf", 100),
                FileCandidate::new("b.txt", 100),
                FileCandidate::new("c.docx", 100),
            ])
            .unwrap();

        assert_eq!(screening.accepted.len(), 2);
        assert_eq!(screening.rejected.len(), 1);
    }

    #[test]
    fn test_screen_too_many_files() {
        let files = (0..6)
            .map(|i| FileCandidate::new(format!("doc-{i}.pdf"), 100))
            .collect();
        let err = policy().screen(files).unwrap_err();
        assert!(matches!(err, RegistryError::TooManyFiles { count: 6, max: 5 }));
    }

    #[test]
    fn test_advance_caps_at_100() {
        let file = FileCandidate::new("a.pdf", 100);
        let mut upload = UploadedFile::start(&file, DocumentKind::Pdf);

        upload.advance(60.0);
        assert_eq!(upload.status, UploadStatus::Uploading);
        assert!(upload.clone().into_document().is_none());

        upload.advance(60.0);
        assert_eq!(upload.progress, 100.0);
        assert_eq!(upload.status, UploadStatus::Success);

        let doc = upload.into_document().unwrap();
        assert_eq!(doc.name, "a.pdf");
        assert_eq!(doc.size, "100 B");
    }

    #[tokio::test]
    async fn test_simulator_completes_all() {
        let config = UploadConfig {
            tick_interval_ms: 1,
            ..UploadConfig::default()
        };
        let simulator = UploadSimulator::new(&config);
        let mut rng = StdRng::seed_from_u64(7);

        let mut uploads = vec![
            UploadedFile::start(&FileCandidate::new("a.pdf", 10), DocumentKind::Pdf),
            UploadedFile::start(&FileCandidate::new("b.docx", 10), DocumentKind::Docx),
        ];

        let ticks = simulator.run(&mut uploads, &mut rng).await;

        // At most 30% per tick, so at least four ticks are needed
        assert!(ticks >= 4);
        assert!(uploads
            .iter()
            .all(|u| u.status == UploadStatus::Success && u.progress == 100.0));
    }

    #[tokio::test]
    async fn test_simulator_tolerates_bad_step() {
        for step in [0.0, -5.0, f64::INFINITY, f64::NAN] {
            let config = UploadConfig {
                tick_interval_ms: 1,
                max_progress_step: step,
                ..UploadConfig::default()
            };
            let simulator = UploadSimulator::new(&config);
            assert!(simulator.max_step >= MIN_PROGRESS_STEP);
            assert!(simulator.max_step <= MAX_PROGRESS_STEP);

            let mut rng = StdRng::seed_from_u64(11);
            let mut uploads = vec![UploadedFile::start(
                &FileCandidate::new("a.pdf", 10),
                DocumentKind::Pdf,
            )];
            simulator.run(&mut uploads, &mut rng).await;
            assert_eq!(uploads[0].status, UploadStatus::Success);
        }
    }
}
