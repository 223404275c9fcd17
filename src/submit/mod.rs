//! The recipe submission pipeline: validate, reject duplicates, save the
//! image, insert.

pub mod image;

pub use image::ImageUpload;

use chrono::Utc;

use crate::{
    config::Config,
    database::Store,
    error::{StoreError, SubmitError},
    geocode::Geocoder,
    models::recipe::{Category, NewRecipe, Recipe},
};

/// What the submission form collected. Fields are trimmed before any
/// validation happens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeForm {
    pub name: String,
    pub language: String,
    pub dish_name: String,
    pub category: Category,
    pub country: String,
    pub ingredients: String,
    pub instructions: String,
    pub story: String,
    pub image: Option<ImageUpload>,
}

/// How a submission was handled. Only `Accepted` wrote anything.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Inserted. Carries the refreshed collection for the next render.
    Accepted(Vec<Recipe>),

    /// This (submitter, dish name) pair already exists.
    Duplicate,

    /// Required fields were blank. Names the offenders for the inline
    /// error. No image was saved.
    MissingFields(Vec<&'static str>),

    /// The attachment wasn't a png/jpeg.
    UnsupportedImage,
}

/// Runs a submission through validation, the duplicate check, the optional
/// image save, and finally insertion.
///
/// Geocoding of the country happens inside [`Store::insert_recipe`]; a
/// failed lookup still inserts, just without coordinates.
#[tracing::instrument(skip_all, fields(dish_name = %form.dish_name))]
pub async fn submit_recipe(
    store: &Store,
    geocoder: &Geocoder,
    config: &Config,
    form: RecipeForm,
) -> Result<SubmitOutcome, StoreError> {
    let name = form.name.trim();
    let language = form.language.trim();
    let dish_name = form.dish_name.trim();
    let country = form.country.trim();
    let ingredients = form.ingredients.trim();
    let instructions = form.instructions.trim();
    let story = form.story.trim();

    let mut missing = Vec::new();
    if dish_name.is_empty() {
        missing.push("dish name");
    }
    if ingredients.is_empty() {
        missing.push("ingredients");
    }
    if instructions.is_empty() {
        missing.push("instructions");
    }
    if !missing.is_empty() {
        tracing::debug!("Rejecting submission, missing: {missing:?}");
        return Ok(SubmitOutcome::MissingFields(missing));
    }

    if store.is_duplicate(name, dish_name).await? {
        tracing::debug!("Rejecting duplicate submission.");
        return Ok(SubmitOutcome::Duplicate);
    }

    // only a valid, non-duplicate submission gets its image written
    let image_path = match form.image.as_ref() {
        Some(upload) => match image::save_image(&config.image_dir, dish_name, upload).await {
            Ok(path) => Some(path.into_string()),
            Err(SubmitError::UnsupportedImage) => return Ok(SubmitOutcome::UnsupportedImage),
            Err(e @ SubmitError::ImageSaveFailed { .. }) => {
                tracing::warn!("Image write failed; keeping the submission without it. err: {e}");
                None
            }
        },
        None => None,
    };

    let new = NewRecipe {
        name: non_empty(name),
        language: non_empty(language),
        dish_name: dish_name.to_string(),
        category: form.category,
        country: non_empty(country),
        ingredients: ingredients.to_string(),
        instructions: instructions.to_string(),
        story: non_empty(story),
        image_path: image_path.clone(),
        created_at: Utc::now(),
        latitude: None,
        longitude: None,
    };

    match store.insert_recipe(new, geocoder).await {
        Ok(recipes) => Ok(SubmitOutcome::Accepted(recipes)),
        // a second submission raced past is_duplicate; the unique index
        // caught it, so the image saved above must not linger
        Err(StoreError::DuplicateRecipe { .. }) => {
            discard_image(image_path.as_deref()).await;
            Ok(SubmitOutcome::Duplicate)
        }
        Err(e) => Err(e),
    }
}

/// Removes an image whose submission didn't make it in after all.
async fn discard_image(path: Option<&str>) {
    let Some(path) = path else {
        return;
    };

    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Couldn't remove the image of a rejected submission at `{path}`. err: {e}");
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
