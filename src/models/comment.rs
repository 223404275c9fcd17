use chrono::{DateTime, Utc};
use sqlx::{query::Query, sqlite::SqliteArguments, Sqlite};

use crate::{
    database::{InsertIntoTable, Store},
    error::StoreError,
};

/// What a blank commenter name turns into.
pub const ANONYMOUS: &str = "Anonymous";

/// A comment on a recipe. Append-only; there is no edit or delete.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub recipe_id: i64,
    pub commenter_name: String,
    pub comment_text: String,

    /// Optional star rating, 1 through 5. Unrated comments still show but
    /// stay out of the average.
    pub rating: Option<i64>,

    /// Set once at insert.
    pub created_at: DateTime<Utc>,
}

struct NewComment {
    recipe_id: i64,
    commenter_name: String,
    comment_text: String,
    rating: Option<i64>,
    created_at: DateTime<Utc>,
}

impl InsertIntoTable for NewComment {
    fn make_insertion_query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        sqlx::query(
            r#"
        INSERT INTO comments (recipe_id, commenter_name, comment_text, rating, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
        )
        .bind(self.recipe_id)
        .bind(self.commenter_name.clone())
        .bind(self.comment_text.clone())
        .bind(self.rating)
        .bind(self.created_at)
    }
}

impl Store {
    /// Appends a comment to a recipe. A blank name becomes
    /// [`ANONYMOUS`].
    #[tracing::instrument(skip(self))]
    pub async fn add_comment(
        &self,
        recipe_id: i64,
        commenter_name: &str,
        comment_text: &str,
        rating: Option<u8>,
    ) -> Result<(), StoreError> {
        let commenter_name = match commenter_name.trim() {
            "" => ANONYMOUS.to_string(),
            trimmed => trimmed.to_string(),
        };

        let new = NewComment {
            recipe_id,
            commenter_name,
            comment_text: comment_text.to_string(),
            rating: rating.map(i64::from),
            created_at: Utc::now(),
        };

        let mut conn = self.conn().await?;
        new.make_insertion_query().execute(&mut *conn).await?;

        Ok(())
    }

    /// Comments on a recipe, newest first.
    ///
    /// An id nobody knows about just yields an empty vec.
    pub async fn get_comments(&self, recipe_id: i64) -> Result<Vec<Comment>, StoreError> {
        let mut conn = self.conn().await?;

        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE recipe_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(recipe_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(comments)
    }

    /// Unweighted mean over the rated comments only. `None` when nothing on
    /// this recipe carries a rating.
    pub async fn average_rating(&self, recipe_id: i64) -> Result<Option<f64>, StoreError> {
        let mut conn = self.conn().await?;

        let average: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(rating) FROM comments WHERE recipe_id = $1 AND rating IS NOT NULL",
        )
        .bind(recipe_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(average)
    }
}
