use image::ImageReader;
use std::path::Path;

/// Extensions offered by the file-picker dialog.
///
/// This list only scopes what the open dialog shows. Acceptance is decided
/// by [`is_image`], which probes file content and ignores extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "bmp"];

/// Check whether `path` is a readable image.
///
/// Opens the file and asks the image crate to identify the format and
/// decode the header. Any failure at all (missing file, permission error,
/// unknown format, corrupt header) maps to `false`; the causes are not
/// distinguished. The file handle is released when the probe returns.
///
/// # Example
///
/// ```rust,no_run
/// use img_inspect::probe::is_image;
/// use std::path::Path;
///
/// if is_image(Path::new("photo.jpg")) {
///     println!("decodable image");
/// }
/// ```
pub fn is_image(path: &Path) -> bool {
    let Ok(reader) = ImageReader::open(path) else {
        return false;
    };
    match reader.with_guessed_format() {
        Ok(reader) => reader.into_dimensions().is_ok(),
        Err(_) => false,
    }
}
