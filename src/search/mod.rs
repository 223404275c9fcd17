//! Search and listing utilities.

pub mod query;
pub mod sort;

pub use query::{RecipeFilter, ToQuery};
pub use sort::{Listing, SortType};

use sea_query::{Asterisk, Cond, Order, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder as _;

use crate::{database::Store, error::StoreError, models::recipe::Recipe};

/// Loads the recipes matching every filter, sorted for display.
///
/// No filters means the whole collection. No pagination; the page renders
/// the full result each cycle.
#[tracing::instrument(skip(store))]
pub async fn filter_recipes(
    store: &Store,
    filters: Vec<RecipeFilter>,
    sort: SortType,
) -> Result<Vec<Recipe>, StoreError> {
    let mut cond = Cond::all();
    for filter in filters {
        cond = cond.add(filter.to_query());
    }

    // insertion order as the base, so the stable sorts below break ties
    // deterministically
    let (select, values) = sea_query::Query::select()
        .column(Asterisk)
        .from(query::Recipes::Table)
        .cond_where(cond)
        .order_by(query::Recipes::Id, Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    let mut conn = store.conn().await?;
    let recipes = sqlx::query_as_with::<_, Recipe, _>(&select, values)
        .fetch_all(&mut *conn)
        .await?;

    let mut listing = Listing(recipes);
    listing.sort(sort);
    Ok(listing.0)
}
