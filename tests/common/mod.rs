//! The parent of the other tests.
//!
//! Mostly setup: every test gets a fresh store inside its own temp dir and
//! a geocoder pointed at a dead port so lookups resolve to nothing without
//! touching the network.

use std::str::FromStr as _;

use camino::Utf8PathBuf;
use chrono::Utc;
use ladle::{
    config::Config,
    database::Store,
    geocode::Geocoder,
    models::recipe::{Category, NewRecipe},
    submit::RecipeForm,
};
use temp_dir::TempDir;
use tracing_subscriber::{filter, layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer};

/// Everything a test needs to drive the crate.
#[allow(dead_code, reason = "it's used in the other tests")]
pub struct TestApp {
    pub store: Store,
    pub config: Config,
    pub geocoder: Geocoder,
    /// held so the directory outlives the test
    _dir: TempDir,
}

/// call this at the top of any new test func! :)
#[allow(dead_code, reason = "it's used in the other tests")]
pub async fn setup() -> TestApp {
    // start logging. later calls in the same binary are no-ops
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(filter::EnvFilter::from_str("DEBUG,sqlx=INFO").unwrap()),
        )
        .try_init();

    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");

    let store = Store::open(&root.join("db")).await.expect("open store");

    let config = Config {
        data_dir: root.join("db"),
        image_dir: root.join("images"),
        ..Config::default()
    };

    // nothing listens on the discard port; lookups fail fast and degrade
    let geocoder = Geocoder::with_endpoint("http://127.0.0.1:9");

    TestApp {
        store,
        config,
        geocoder,
        _dir: dir,
    }
}

/// A reasonable recipe row for insertion straight through the store.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn new_recipe(dish_name: &str, name: Option<&str>) -> NewRecipe {
    NewRecipe {
        name: name.map(Into::into),
        language: Some("Telugu".into()),
        dish_name: dish_name.to_string(),
        category: Category::MainCourse,
        country: None,
        ingredients: "Rice\nWater\nSalt".into(),
        instructions: "Cook the rice.".into(),
        story: None,
        image_path: None,
        created_at: Utc::now(),
        latitude: None,
        longitude: None,
    }
}

/// A filled-out submission form, the way the UI would hand it over.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn sample_form(dish_name: &str, name: &str) -> RecipeForm {
    RecipeForm {
        name: name.to_string(),
        language: "Telugu".to_string(),
        dish_name: dish_name.to_string(),
        category: Category::FestivalSpecial,
        country: "India".to_string(),
        ingredients: "Rice flour\nJaggery\nGhee".to_string(),
        instructions: "Mix, shape, fry.".to_string(),
        story: "Made every Sankranti at my grandmother's house.".to_string(),
        image: None,
    }
}
