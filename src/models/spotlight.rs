//! The "recipe of the day" pointer.
//!
//! One row, pinned to id 1. Setting a new selection replaces the old one,
//! and a selection only shows on the day it was set: it expires at date
//! rollover rather than lingering until someone remembers to change it.

use chrono::{NaiveDate, Utc};

use crate::{database::Store, error::StoreError};

use super::recipe::Recipe;

/// Today's highlighted recipe plus its editorial taste note.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Spotlight {
    #[sqlx(flatten)]
    pub recipe: Recipe,

    pub taste_description: String,

    /// The day this selection was made (and the only day it shows).
    pub set_on: NaiveDate,
}

impl Store {
    /// Points the spotlight at `recipe_id`, replacing any previous
    /// selection and stamping it with today's date.
    #[tracing::instrument(skip(self, taste_description))]
    pub async fn set_recipe_of_the_day(
        &self,
        recipe_id: i64,
        taste_description: &str,
    ) -> Result<(), StoreError> {
        let today = Utc::now().date_naive();

        let mut conn = self.conn().await?;

        sqlx::query(
            r#"
        INSERT INTO recipe_of_the_day (id, recipe_id, taste_description, set_on)
        VALUES (1, $1, $2, $3)
        ON CONFLICT(id)
        DO UPDATE SET
            recipe_id = excluded.recipe_id,
            taste_description = excluded.taste_description,
            set_on = excluded.set_on
        "#,
        )
        .bind(recipe_id)
        .bind(taste_description)
        .bind(today)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// The current selection, if one was set today.
    pub async fn get_recipe_of_the_day(&self) -> Result<Option<Spotlight>, StoreError> {
        let today = Utc::now().date_naive();

        let mut conn = self.conn().await?;

        let spotlight = sqlx::query_as::<_, Spotlight>(
            r#"
        SELECT r.*, rod.taste_description, rod.set_on
        FROM recipe_of_the_day rod
        JOIN recipes r ON r.id = rod.recipe_id
        WHERE rod.set_on = $1
        LIMIT 1
        "#,
        )
        .bind(today)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(spotlight)
    }
}
