use core::error::Error;
use pisserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create the data directory at `{path}`. Err: `{err}`.")]
    CreateDirFailed { path: String, err: std::io::Error },

    #[error("General database error. See: {_0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to run database migrations. See: {_0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Raised by the unique index on (submitter, dish name), which backs up
    /// the duplicate pre-check against racing submissions.
    #[error("A recipe named `{dish_name}` from `{name}` already exists.")]
    DuplicateRecipe { name: String, dish_name: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] tokio::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("The uploaded file doesn't look like a supported image (png/jpeg).")]
    UnsupportedImage,

    #[error("Image accepted, but writing it to `{path}` failed. Err: `{err}`.")]
    ImageSaveFailed { path: String, err: std::io::Error },
}
