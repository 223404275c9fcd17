use crate::{config::Config, database::Store, error::StoreError};

/// Outcome of the admin-gated spotlight action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminOutcome {
    Updated,
    IncorrectPassword,
}

/// Points the recipe of the day at `recipe_id`, gated by a plaintext
/// shared-secret check.
///
/// There is no session or token model; the check runs on every page
/// evaluation where the password field is non-empty.
pub async fn set_spotlight(
    store: &Store,
    config: &Config,
    password: &str,
    recipe_id: i64,
    taste_description: &str,
) -> Result<AdminOutcome, StoreError> {
    if password != config.admin_password {
        tracing::warn!("Rejected a spotlight update with a bad password.");
        return Ok(AdminOutcome::IncorrectPassword);
    }

    store
        .set_recipe_of_the_day(recipe_id, taste_description)
        .await?;

    Ok(AdminOutcome::Updated)
}
