use chrono::{DateTime, Utc};
use sqlx::{query::Query, sqlite::SqliteArguments, Sqlite};

use crate::{
    database::{InsertIntoTable, Store},
    error::StoreError,
    geocode::{Coordinates, Geocoder},
};

/// The fixed set of recipe types the form offers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
pub enum Category {
    #[default]
    #[sqlx(rename = "Main Course")]
    MainCourse,
    #[sqlx(rename = "Snack")]
    Snack,
    #[sqlx(rename = "Dessert")]
    Dessert,
    #[sqlx(rename = "Festival Special")]
    FestivalSpecial,
    #[sqlx(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::MainCourse,
        Category::Snack,
        Category::Dessert,
        Category::FestivalSpecial,
        Category::Other,
    ];

    /// The label shown in the form and stored in the `category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MainCourse => "Main Course",
            Category::Snack => "Snack",
            Category::Dessert => "Dessert",
            Category::FestivalSpecial => "Festival Special",
            Category::Other => "Other",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted recipe, as stored.
///
/// Rows are created once and never edited; the single exception is the
/// coordinate pair, which is filled in lazily once geocoding resolves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Recipe {
    /// Assigned by the database on insert.
    pub id: i64,

    /// Submitter's name. `None` for anonymous submissions.
    pub name: Option<String>,

    /// Language or dialect the recipe was written in.
    pub language: Option<String>,

    pub dish_name: String,
    pub category: Category,

    /// Free-text country of origin; feeds the map.
    pub country: Option<String>,

    /// One ingredient per line, by convention.
    pub ingredients: String,
    pub instructions: String,

    /// Optional cultural story or memory.
    pub story: Option<String>,

    /// Relative path to the uploaded dish image, if any. The file is owned
    /// by the submission pipeline and never mutated afterwards.
    pub image_path: Option<String>,

    /// Set once at insert.
    pub created_at: DateTime<Utc>,

    /// Cached geocoding result for `country`. Nullable when the lookup
    /// failed or hasn't happened yet.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A recipe on its way into the database. Everything except the id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecipe {
    pub name: Option<String>,
    pub language: Option<String>,
    pub dish_name: String,
    pub category: Category,
    pub country: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    pub story: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl InsertIntoTable for NewRecipe {
    fn make_insertion_query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        sqlx::query(
            r#"
        INSERT INTO recipes
        (name, language, dish_name, category, country, ingredients, instructions, story, image_path, created_at, latitude, longitude)
        VALUES
        ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
        )
        .bind(self.name.clone())
        .bind(self.language.clone())
        .bind(self.dish_name.clone())
        .bind(self.category)
        .bind(self.country.clone())
        .bind(self.ingredients.clone())
        .bind(self.instructions.clone())
        .bind(self.story.clone())
        .bind(self.image_path.clone())
        .bind(self.created_at)
        .bind(self.latitude)
        .bind(self.longitude)
    }
}

impl Store {
    /// All recipes, in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn load_all_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn().await?;

        let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        Ok(recipes)
    }

    /// Inserts a recipe, resolving its country to coordinates along the way,
    /// and returns the refreshed collection.
    ///
    /// Geocoding is best-effort: on failure the row simply lands without
    /// coordinates. A (submitter, dish name) pair that already exists comes
    /// back as [`StoreError::DuplicateRecipe`] via the unique index.
    #[tracing::instrument(skip_all, fields(dish_name = %new.dish_name))]
    pub async fn insert_recipe(
        &self,
        mut new: NewRecipe,
        geocoder: &Geocoder,
    ) -> Result<Vec<Recipe>, StoreError> {
        if new.latitude.is_none() || new.longitude.is_none() {
            if let Some(country) = new.country.as_deref() {
                if let Some(coords) = geocoder.lookup(country).await {
                    new.latitude = Some(coords.latitude);
                    new.longitude = Some(coords.longitude);
                }
            }
        }

        {
            let mut conn = self.conn().await?;
            new.make_insertion_query()
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    if e.as_database_error()
                        .is_some_and(|db| db.is_unique_violation())
                    {
                        StoreError::DuplicateRecipe {
                            name: new.name.clone().unwrap_or_default(),
                            dish_name: new.dish_name.clone(),
                        }
                    } else {
                        StoreError::Database(e)
                    }
                })?;
        }

        self.load_all_recipes().await
    }

    /// Whether a recipe with this (submitter, dish name) pair already
    /// exists, ignoring case.
    ///
    /// Anonymous submissions never count as duplicates.
    pub async fn is_duplicate(&self, name: &str, dish_name: &str) -> Result<bool, StoreError> {
        if name.trim().is_empty() || dish_name.trim().is_empty() {
            return Ok(false);
        }

        let mut conn = self.conn().await?;

        let hit: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM recipes WHERE lower(name) = lower($1) AND lower(dish_name) = lower($2)",
        )
        .bind(name.trim())
        .bind(dish_name.trim())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(hit.is_some())
    }

    /// Caches a resolved coordinate pair back into the row.
    ///
    /// The only update a recipe row ever sees.
    pub async fn update_coordinates(
        &self,
        recipe_id: i64,
        coords: Coordinates,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;

        sqlx::query("UPDATE recipes SET latitude = $1, longitude = $2 WHERE id = $3")
            .bind(coords.latitude)
            .bind(coords.longitude)
            .bind(recipe_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
