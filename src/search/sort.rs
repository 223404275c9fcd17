//! Helps to sort the recipe listing.

use crate::models::recipe::Recipe;

/// The sorts users can apply to the listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortType {
    /// Newest submissions first.
    #[default]
    MostRecent,
    /// Dish name ascending, ignoring case.
    Alphabetical,
}

/// A loaded listing, ready to be sorted before rendering.
pub struct Listing(pub Vec<Recipe>);

impl Listing {
    /// Stable with respect to equal keys, so rows that tie keep their
    /// insertion order.
    pub fn sort(&mut self, ty: SortType) {
        let v = &mut self.0;

        match ty {
            SortType::MostRecent => v.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortType::Alphabetical => v.sort_by_cached_key(|r| r.dish_name.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone as _, Utc};

    use crate::models::recipe::Category;

    use super::*;

    #[test]
    fn most_recent_puts_newest_first() {
        let mut listing = Listing(vec![
            recipe("Pongal", ts(100)),
            recipe("Sarva Pindi", ts(300)),
            recipe("Pulihora", ts(200)),
        ]);

        listing.sort(SortType::MostRecent);

        let names: Vec<_> = listing.0.iter().map(|r| r.dish_name.as_str()).collect();
        assert_eq!(names, ["Sarva Pindi", "Pulihora", "Pongal"]);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let mut listing = Listing(vec![
            recipe("pulihora", ts(1)),
            recipe("Bobbatlu", ts(2)),
            recipe("ariselu", ts(3)),
        ]);

        listing.sort(SortType::Alphabetical);

        let names: Vec<_> = listing.0.iter().map(|r| r.dish_name.as_str()).collect();
        assert_eq!(names, ["ariselu", "Bobbatlu", "pulihora"]);
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let mut listing = Listing(vec![
            recipe("Pongal", ts(50)),
            recipe("Pulihora", ts(50)),
            recipe("Bobbatlu", ts(50)),
        ]);

        listing.sort(SortType::MostRecent);

        // all timestamps tie, so nothing should move
        let names: Vec<_> = listing.0.iter().map(|r| r.dish_name.as_str()).collect();
        assert_eq!(names, ["Pongal", "Pulihora", "Bobbatlu"]);
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn recipe(dish_name: &str, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id: 0,
            name: None,
            language: None,
            dish_name: dish_name.to_string(),
            category: Category::MainCourse,
            country: None,
            ingredients: "rice".to_string(),
            instructions: "cook".to_string(),
            story: None,
            image_path: None,
            created_at,
            latitude: None,
            longitude: None,
        }
    }
}
