use camino::Utf8PathBuf;

use crate::{
    database::Store,
    error::StoreError,
    geocode::Geocoder,
    models::{
        comment::Comment,
        recipe::{Category, Recipe},
        spotlight::Spotlight,
    },
    search::{self, RecipeFilter, SortType},
};

use super::{
    map::{self, MapPoint},
    stats::Stats,
};

/// What the listing controls are set to for this render cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingParams {
    /// The search box contents. Blank means no text filter.
    pub search: String,
    pub category: Option<Category>,
    pub sort: SortType,
}

/// Whether a card's image can actually be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageStatus {
    /// No image was submitted.
    None,

    Available(Utf8PathBuf),

    /// The row references a file that's gone. Render an inline warning and
    /// keep going; never fatal.
    Missing(Utf8PathBuf),
}

/// One recipe in the listing, with everything its card renders.
#[derive(Clone, Debug)]
pub struct RecipeCard {
    pub recipe: Recipe,
    /// Newest first.
    pub comments: Vec<Comment>,
    /// Mean over rated comments only; `None` when nothing is rated yet.
    pub average_rating: Option<f64>,
    pub image: ImageStatus,
}

/// Everything one render of the page needs, assembled top to bottom in the
/// order the page shows it.
#[derive(Clone, Debug)]
pub struct HomePage {
    /// Today's highlight, when one was set today.
    pub spotlight: Option<Spotlight>,
    pub stats: Stats,
    pub map_points: Vec<MapPoint>,
    pub cards: Vec<RecipeCard>,
}

impl HomePage {
    /// One full page cycle against the current storage state.
    #[tracing::instrument(skip(store, geocoder))]
    pub async fn build(
        store: &Store,
        geocoder: &Geocoder,
        params: ListingParams,
    ) -> Result<Self, StoreError> {
        let spotlight = store.get_recipe_of_the_day().await?;

        let recipes = store.load_all_recipes().await?;
        let stats = Stats::collect(&recipes);
        let map_points = map::map_points(store, geocoder, &recipes).await?;

        let mut filters = Vec::new();
        let needle = params.search.trim();
        if !needle.is_empty() {
            filters.push(RecipeFilter::Text(needle.to_string()));
        }
        if let Some(category) = params.category {
            filters.push(RecipeFilter::Category(category));
        }
        let listing = search::filter_recipes(store, filters, params.sort).await?;

        let mut cards = Vec::with_capacity(listing.len());
        for recipe in listing {
            let comments = store.get_comments(recipe.id).await?;
            let average_rating = store.average_rating(recipe.id).await?;
            let image = image_status(recipe.image_path.as_deref()).await;

            cards.push(RecipeCard {
                recipe,
                comments,
                average_rating,
                image,
            });
        }

        Ok(Self {
            spotlight,
            stats,
            map_points,
            cards,
        })
    }
}

async fn image_status(image_path: Option<&str>) -> ImageStatus {
    let Some(path) = image_path else {
        return ImageStatus::None;
    };
    let path = Utf8PathBuf::from(path);

    match tokio::fs::try_exists(&path).await {
        Ok(true) => ImageStatus::Available(path),
        Ok(false) => ImageStatus::Missing(path),
        Err(e) => {
            tracing::warn!("Couldn't check the dish image at `{path}`. err: {e}");
            ImageStatus::Missing(path)
        }
    }
}
