use std::collections::HashSet;

use crate::models::recipe::Recipe;

/// The aggregate numbers shown above the listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Stats {
    pub total_recipes: usize,
    /// Distinct languages/dialects represented.
    pub languages: usize,
    /// Distinct named submitters.
    pub contributors: usize,
}

impl Stats {
    /// Distinct counts ignore case and skip blank fields.
    pub fn collect(recipes: &[Recipe]) -> Self {
        let mut languages = HashSet::new();
        let mut contributors = HashSet::new();

        for recipe in recipes {
            if let Some(language) = normalized(recipe.language.as_deref()) {
                languages.insert(language);
            }
            if let Some(name) = normalized(recipe.name.as_deref()) {
                contributors.insert(name);
            }
        }

        Self {
            total_recipes: recipes.len(),
            languages: languages.len(),
            contributors: contributors.len(),
        }
    }
}

fn normalized(field: Option<&str>) -> Option<String> {
    let trimmed = field?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
