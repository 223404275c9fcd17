use crate::{
    database::Store,
    error::StoreError,
    geocode::{Coordinates, Geocoder},
    models::recipe::Recipe,
};

/// One dot on the origin map.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MapPoint {
    pub recipe_id: i64,
    pub dish_name: String,
    pub coordinates: Coordinates,
}

/// Collects map points for the page, lazily geocoding rows that name a
/// country but don't have cached coordinates yet.
///
/// A successful lookup is written back into the row, so each country is
/// resolved at most once across page cycles. Rows the geocoder can't place
/// just stay off the map.
#[tracing::instrument(skip_all)]
pub async fn map_points(
    store: &Store,
    geocoder: &Geocoder,
    recipes: &[Recipe],
) -> Result<Vec<MapPoint>, StoreError> {
    let mut points = Vec::new();

    for recipe in recipes {
        let coordinates = match (recipe.latitude, recipe.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),

            _ => match recipe.country.as_deref() {
                Some(country) => {
                    let resolved = geocoder.lookup(country).await;
                    if let Some(coords) = resolved {
                        store.update_coordinates(recipe.id, coords).await?;
                    }
                    resolved
                }
                None => None,
            },
        };

        if let Some(coordinates) = coordinates {
            points.push(MapPoint {
                recipe_id: recipe.id,
                dish_name: recipe.dish_name.clone(),
                coordinates,
            });
        }
    }

    Ok(points)
}
