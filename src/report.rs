use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::exif::{self, ExifSummary, TagEntry};

/// Filesystem attributes of an analyzed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAttrs {
    /// Creation timestamp, with the platform caveat on [`read_file_attrs`].
    pub created: DateTime<Local>,
    /// File size in bytes.
    pub size: u64,
}

/// Read the file attributes reported in stage one of a report.
///
/// "Creation" here follows what the platform exposes: the birth time where
/// available, otherwise the modification time. On some platforms this is
/// really metadata-change time, so callers must not assume true creation
/// semantics.
pub fn read_file_attrs(path: &Path) -> Result<FileAttrs> {
    let meta = fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    let created = meta
        .created()
        .or_else(|_| meta.modified())
        .context("Filesystem reports no timestamps")?;

    Ok(FileAttrs {
        created: created.into(),
        size: meta.len(),
    })
}

/// The two-stage analysis outcome for one file.
///
/// Both stages always run; a failure in one never suppresses the other.
/// [`Report::render`] turns the outcome into the displayed text, mapping
/// each `Err` arm to an inline error line.
#[derive(Debug)]
pub struct Report {
    pub path: PathBuf,
    pub attrs: Result<FileAttrs>,
    pub exif: Result<ExifSummary>,
}

/// Analyze one file.
///
/// Never fails: stage errors are carried inside the returned [`Report`]
/// and surface as inline lines when it is rendered.
///
/// # Example
///
/// ```rust,no_run
/// use img_inspect::report::build_report;
/// use std::path::Path;
///
/// let report = build_report(Path::new("photo.jpg"));
/// print!("{}", report.render());
/// ```
pub fn build_report(path: &Path) -> Report {
    Report {
        path: path.to_path_buf(),
        attrs: read_file_attrs(path),
        exif: exif::read_exif(path),
    }
}

impl Report {
    /// Render the report as a displayable text block.
    ///
    /// Layout: header, file attributes (or an inline error line), the
    /// well-known EXIF fields with either a GPS position or an explicit
    /// no-GPS line (never both), the full tag dump, and a fixed closing
    /// line. The dump is sorted by tag name so output is stable across
    /// parser versions.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("Analyzing: {}", self.path.display()));
        lines.push(String::new());

        match &self.attrs {
            Ok(attrs) => {
                lines.push(format!(
                    "File Creation Date: {}",
                    attrs.created.format("%Y-%m-%d %H:%M:%S")
                ));
                lines.push(format!("File Size: {} bytes", attrs.size));
                lines.push(format!("File Path: {}", self.path.display()));
            }
            Err(e) => lines.push(format!("Error fetching file metadata: {e:#}")),
        }
        lines.push(String::new());

        match &self.exif {
            Ok(summary) => {
                if let Some(ref date) = summary.capture_date {
                    lines.push(format!("EXIF Capture Date: {date}"));
                }
                match summary.gps {
                    Some(gps) => lines.push(format!(
                        "GPS Location: Latitude {:.6}, Longitude {:.6}",
                        gps.latitude, gps.longitude
                    )),
                    None => lines.push("No GPS location data found.".to_string()),
                }
                if let Some(ref make) = summary.make {
                    lines.push(format!("Camera Make: {make}"));
                }
                if let Some(ref model) = summary.model {
                    lines.push(format!("Camera Model: {model}"));
                }
                if let Some(ref software) = summary.software {
                    lines.push(format!("Software: {software}"));
                }

                lines.push(String::new());
                lines.push("Full EXIF Metadata:".to_string());
                let mut tags: Vec<&TagEntry> = summary.tags.iter().collect();
                tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value)));
                for tag in tags {
                    lines.push(format!("{}: {}", tag.name, tag.value));
                }
            }
            Err(e) => {
                lines.push(format!("Error fetching EXIF metadata: {e:#}"));
                lines.push("Note: Some images (e.g., PNG, BMP) may not have EXIF data.".to_string());
            }
        }

        lines.push(String::new());
        lines.push("Source Details: Inferred from EXIF data above (e.g., camera, software).".to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
