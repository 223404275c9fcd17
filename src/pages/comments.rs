use crate::{database::Store, error::StoreError};

/// How a comment submission was handled. Only `Posted` wrote anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentOutcome {
    Posted,

    /// The comment text was empty after trimming.
    EmptyComment,

    /// Rating outside 1..=5.
    InvalidRating,
}

/// Posts a comment (with an optional star rating) to a recipe.
///
/// A blank commenter name becomes "Anonymous" down in the storage layer.
pub async fn post_comment(
    store: &Store,
    recipe_id: i64,
    commenter_name: &str,
    comment_text: &str,
    rating: Option<u8>,
) -> Result<CommentOutcome, StoreError> {
    let comment_text = comment_text.trim();
    if comment_text.is_empty() {
        return Ok(CommentOutcome::EmptyComment);
    }

    if let Some(stars) = rating {
        if !(1..=5).contains(&stars) {
            tracing::debug!("Rejecting comment with out-of-range rating {stars}.");
            return Ok(CommentOutcome::InvalidRating);
        }
    }

    store
        .add_comment(recipe_id, commenter_name, comment_text, rating)
        .await?;

    Ok(CommentOutcome::Posted)
}
