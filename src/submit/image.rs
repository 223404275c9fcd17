//! Saves uploaded dish images to disk.

use camino::{Utf8Path, Utf8PathBuf};
use uuid::Uuid;

use crate::error::SubmitError;

/// An image the user attached to their submission.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    /// The name the file had on the user's machine.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl core::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Writes `upload` under `dir` as `<slug>_<uuid>.<ext>` and returns the
/// path to store on the recipe row. The uuid keeps concurrent saves of the
/// same dish name from landing on one file.
///
/// The content is sniffed first; anything that isn't a png/jpeg is turned
/// away regardless of its file name. The write itself is direct, no
/// temp-file-plus-rename, so a crash mid-write can leave a partial file.
/// Known limitation.
pub async fn save_image(
    dir: &Utf8Path,
    dish_name: &str,
    upload: &ImageUpload,
) -> Result<Utf8PathBuf, SubmitError> {
    let kind = infer::get(&upload.bytes)
        .filter(|k| matches!(k.mime_type(), "image/png" | "image/jpeg"))
        .ok_or(SubmitError::UnsupportedImage)?;

    // keep the user's extension when it's plausible, else the sniffed one
    let ext = upload
        .file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_lowercase())
        .filter(|e| matches!(e.as_str(), "png" | "jpg" | "jpeg"))
        .unwrap_or_else(|| kind.extension().to_string());

    let filename = format!("{}_{}.{ext}", slugify(dish_name), Uuid::new_v4().simple());
    let path = dir.join(filename);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|err| SubmitError::ImageSaveFailed {
            path: dir.to_string(),
            err,
        })?;

    tokio::fs::write(&path, &upload.bytes)
        .await
        .map_err(|err| SubmitError::ImageSaveFailed {
            path: path.to_string(),
            err,
        })?;

    tracing::debug!("Saved dish image to `{path}`.");
    Ok(path)
}

/// Lowercases, keeps ASCII alphanumerics and `-`, and collapses everything
/// else into single `_`s.
pub fn slugify(dish_name: &str) -> String {
    let mut slug = String::with_capacity(dish_name.len());
    let mut last_was_sep = false;

    for ch in dish_name.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            slug.push(ch);
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }

    let trimmed = slug.trim_matches('_');
    if trimmed.is_empty() {
        // nothing usable in the dish name (non-latin scripts land here)
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}
