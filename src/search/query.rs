use sea_query::{Expr, Iden, LikeExpr, SimpleExpr};

use crate::models::recipe::Category;

/// the recipes table
#[derive(Iden)]
pub enum Recipes {
    Table,
    Id,
    Name,
    Language,
    DishName,
    Category,
    Country,
    Ingredients,
    Instructions,
    Story,
    ImagePath,
    CreatedAt,
    Latitude,
    Longitude,
}

/// A filter narrows the listing before it renders.
#[derive(Clone, Debug, PartialEq)]
pub enum RecipeFilter {
    /// Substring match against dish name, ingredients, language, and
    /// country — any hit keeps the row. `LIKE` is case-insensitive, which
    /// is exactly what the search box wants.
    Text(String),

    /// Only recipes of the given category.
    Category(Category),
}

/// A filter must become a query clause to be used.
pub trait ToQuery {
    fn to_query(self) -> SimpleExpr;
}

impl ToQuery for RecipeFilter {
    fn to_query(self) -> SimpleExpr {
        match self {
            RecipeFilter::Text(needle) => {
                tracing::debug!("Searching listing for `{needle}`");
                // the needle is user text, so `%` and `_` inside it must
                // match themselves, not act as wildcards
                let pattern = format!("%{}%", escape_like(needle.trim()));
                let like = || LikeExpr::new(pattern.clone()).escape('\\');

                Expr::col(Recipes::DishName)
                    .like(like())
                    .or(Expr::col(Recipes::Ingredients).like(like()))
                    .or(Expr::col(Recipes::Language).like(like()))
                    .or(Expr::col(Recipes::Country).like(like()))
            }

            RecipeFilter::Category(category) => {
                tracing::debug!("Filtering listing by category `{category}`");
                Expr::col(Recipes::Category).eq(category.as_str())
            }
        }
    }
}

/// Backslash-escapes `%`, `_`, and `\` so the needle reads as a literal
/// substring inside a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
