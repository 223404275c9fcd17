//! Listing search and sorting against a live store.

mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use ladle::{
    models::recipe::Category,
    search::{self, RecipeFilter, SortType},
};

/// The search box is a case-insensitive substring match across dish name,
/// ingredients, language, and country.
#[tokio::test]
async fn text_search_matches_ingredient_substrings() -> Result<()> {
    let app = common::setup().await;

    let mut pulihora = common::new_recipe("Pulihora", Some("Asha"));
    pulihora.ingredients = "Rice\nTamarind Paste\nPeanuts".into();
    app.store.insert_recipe(pulihora, &app.geocoder).await?;

    let mut pongal = common::new_recipe("Pongal", Some("Asha"));
    pongal.ingredients = "Rice\nMoong Dal\nPepper".into();
    app.store.insert_recipe(pongal, &app.geocoder).await?;

    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Text("tamarind".into())],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dish_name, "Pulihora");

    // casing doesn't matter
    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Text("TAMARIND".into())],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);

    // and a needle nobody has stays empty
    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Text("saffron".into())],
        SortType::MostRecent,
    )
    .await?;
    assert!(hits.is_empty());

    Ok(())
}

/// `%` and `_` in the search box match themselves, never act as pattern
/// wildcards.
#[tokio::test]
async fn text_search_treats_wildcards_literally() -> Result<()> {
    let app = common::setup().await;

    let mut pulihora = common::new_recipe("Pulihora", Some("Asha"));
    pulihora.ingredients = "Rice\nTamarind Paste\nPeanuts".into();
    app.store.insert_recipe(pulihora, &app.geocoder).await?;

    let mut payasam = common::new_recipe("Payasam", Some("Asha"));
    payasam.ingredients = "Milk\n100%_pure jaggery".into();
    app.store.insert_recipe(payasam, &app.geocoder).await?;

    // wildcard-looking needles that don't literally appear anywhere
    for needle in ["t_m_r_nd", "r_ce", "%Paste"] {
        let hits = search::filter_recipes(
            &app.store,
            vec![RecipeFilter::Text(needle.into())],
            SortType::MostRecent,
        )
        .await?;
        assert!(hits.is_empty(), "`{needle}` matched: {hits:?}");
    }

    // while a needle actually containing them still hits
    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Text("100%_pure".into())],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dish_name, "Payasam");

    Ok(())
}

/// Language and country are searched too.
#[tokio::test]
async fn text_search_reaches_language_and_country() -> Result<()> {
    let app = common::setup().await;

    let mut litti = common::new_recipe("Litti Chokha", Some("Ravi"));
    litti.language = Some("Bhojpuri".into());
    litti.country = Some("India".into());
    app.store.insert_recipe(litti, &app.geocoder).await?;

    let mut adobo = common::new_recipe("Adobo", Some("Maria"));
    adobo.language = Some("Tagalog".into());
    adobo.country = Some("Philippines".into());
    app.store.insert_recipe(adobo, &app.geocoder).await?;

    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Text("bhojpuri".into())],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dish_name, "Litti Chokha");

    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Text("philipp".into())],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dish_name, "Adobo");

    Ok(())
}

/// Category narrows the listing, and stacks with text search.
#[tokio::test]
async fn category_filter_stacks_with_text() -> Result<()> {
    let app = common::setup().await;

    let mut ariselu = common::new_recipe("Ariselu", Some("Devi"));
    ariselu.category = Category::FestivalSpecial;
    ariselu.ingredients = "Rice flour\nJaggery".into();
    app.store.insert_recipe(ariselu, &app.geocoder).await?;

    let mut kheer = common::new_recipe("Kheer", Some("Devi"));
    kheer.category = Category::Dessert;
    kheer.ingredients = "Milk\nRice\nJaggery".into();
    app.store.insert_recipe(kheer, &app.geocoder).await?;

    let hits = search::filter_recipes(
        &app.store,
        vec![RecipeFilter::Category(Category::Dessert)],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dish_name, "Kheer");

    let hits = search::filter_recipes(
        &app.store,
        vec![
            RecipeFilter::Text("jaggery".into()),
            RecipeFilter::Category(Category::FestivalSpecial),
        ],
        SortType::MostRecent,
    )
    .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dish_name, "Ariselu");

    Ok(())
}

/// Both sort modes, driven end to end through the store.
#[tokio::test]
async fn sorts_order_the_listing() -> Result<()> {
    let app = common::setup().await;
    let base = Utc::now();

    for (dish, age_minutes) in [("Upma", 30), ("dosa", 10), ("Bobbatlu", 20)] {
        let mut new = common::new_recipe(dish, Some("Raju"));
        new.created_at = base - Duration::minutes(age_minutes);
        app.store.insert_recipe(new, &app.geocoder).await?;
    }

    let recent =
        search::filter_recipes(&app.store, Vec::new(), SortType::MostRecent).await?;
    let names: Vec<_> = recent.iter().map(|r| r.dish_name.as_str()).collect();
    assert_eq!(names, ["dosa", "Bobbatlu", "Upma"]);

    let alpha =
        search::filter_recipes(&app.store, Vec::new(), SortType::Alphabetical).await?;
    let names: Vec<_> = alpha.iter().map(|r| r.dish_name.as_str()).collect();
    assert_eq!(names, ["Bobbatlu", "dosa", "Upma"]);

    Ok(())
}

/// Rows whose timestamps tie come back in insertion order, every time.
#[tokio::test]
async fn tied_timestamps_keep_insertion_order() -> Result<()> {
    let app = common::setup().await;
    let stamp = Utc::now();

    for dish in ["Upma", "Dosa", "Idli"] {
        let mut new = common::new_recipe(dish, Some("Raju"));
        new.created_at = stamp;
        app.store.insert_recipe(new, &app.geocoder).await?;
    }

    let recent = search::filter_recipes(&app.store, Vec::new(), SortType::MostRecent).await?;
    let names: Vec<_> = recent.iter().map(|r| r.dish_name.as_str()).collect();
    assert_eq!(names, ["Upma", "Dosa", "Idli"]);

    Ok(())
}
