//! # img-inspect
//!
//! Inspect image files and report embedded metadata — file attributes, EXIF
//! capture date, GPS coordinates, camera make/model/software, and a full tag
//! dump. The crate is a thin orchestration layer over the `image` crate
//! (validation probe) and `nom-exif` (tag parsing); it decodes nothing itself
//! and never writes to the files it inspects.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use img_inspect::report::build_report;
//! use img_inspect::scan::scan_folder;
//! use std::path::Path;
//!
//! fn main() {
//!     // Scan a folder for readable images
//!     let images = scan_folder(Path::new("./photos"));
//!     println!("Found {} image(s)", images.len());
//!
//!     // Build and print a metadata report for each one
//!     for path in &images {
//!         let report = build_report(path);
//!         print!("{}", report.render());
//!     }
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The report stages can be called individually; each returns a typed result
//! instead of folding failures into rendered text:
//!
//! ```rust,no_run
//! use img_inspect::exif::read_exif;
//! use img_inspect::probe::is_image;
//! use img_inspect::report::read_file_attrs;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!
//!     if !is_image(path) {
//!         anyhow::bail!("not a readable image");
//!     }
//!
//!     let attrs = read_file_attrs(path)?;
//!     println!("{} bytes", attrs.size);
//!
//!     let summary = read_exif(path)?;
//!     println!("Camera: {:?} {:?}", summary.make, summary.model);
//!     if let Some(gps) = summary.gps {
//!         println!("Position: {:.6}, {:.6}", gps.latitude, gps.longitude);
//!     }
//!     println!("{} tag(s) total", summary.tags.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Report Anatomy
//!
//! | Section | Source | On failure |
//! |---------|--------|------------|
//! | `File Creation Date` / `File Size` / `File Path` | filesystem metadata | inline error line |
//! | `EXIF Capture Date`, `Camera Make`/`Model`, `Software` | EXIF tags (primary IFD) | omitted |
//! | `GPS Location` | GPS IFD, rendered as decimal degrees | "No GPS location data found." |
//! | `Full EXIF Metadata` | every parsed tag, sorted by name | inline error line + PNG/BMP hint |
//!
//! A stage failure never aborts the report: the other stage still renders,
//! and a fixed closing line terminates the block either way.
//!
//! ## Modules
//!
//! - [`probe`] — image validation by header probe
//! - [`scan`] — recursive folder scanning
//! - [`exif`] — EXIF tag extraction into a typed summary
//! - [`report`] — the two-stage metadata report and its rendering

pub mod exif;
pub mod probe;
pub mod report;
pub mod scan;
