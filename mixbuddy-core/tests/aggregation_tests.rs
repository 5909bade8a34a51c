//! End-to-end aggregation against canned TheCocktailDB responses.
//!
//! Drives `CocktailAggregator` through the real `CocktailDbSource` and payload
//! decoding, with a `MockClient` standing in for the network.

use mixbuddy_core::{CocktailAggregator, CocktailDbSource, Inventory, MockClient, RecipeDetail};
use std::sync::Arc;

const BASE: &str = "https://cocktails.test/api/json/v1/1";

fn url(endpoint: &str, query: &str) -> String {
    format!("{}/{}?{}", BASE, endpoint, query)
}

fn drink(id: &str, name: &str, ingredients: &[&str]) -> serde_json::Value {
    let mut drink = serde_json::json!({
        "idDrink": id,
        "strDrink": name,
        "strGlass": "Cocktail glass",
        "strInstructions": "Shake with ice and strain.",
        "strDrinkThumb": null,
    });
    let fields = drink.as_object_mut().unwrap();
    for slot in 1..=15 {
        let name = ingredients.get(slot - 1).map(|s| s.to_string());
        fields.insert(format!("strIngredient{}", slot), serde_json::json!(name));
        fields.insert(format!("strMeasure{}", slot), serde_json::Value::Null);
    }
    drink
}

fn drinks(items: Vec<serde_json::Value>) -> String {
    serde_json::json!({ "drinks": items }).to_string()
}

fn stub(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({ "idDrink": id, "strDrink": name, "strDrinkThumb": "x" })
}

/// A small bar: gin and lime lead to three recipes, one reachable from both.
fn bar() -> MockClient {
    MockClient::new()
        .with_text(
            &url("filter.php", "i=gin"),
            &drinks(vec![stub("1", "Gimlet"), stub("2", "Gin Fizz")]),
        )
        .with_text(
            &url("filter.php", "i=lime"),
            &drinks(vec![stub("1", "Gimlet"), stub("3", "Daiquiri")]),
        )
        .with_text(
            &url("lookup.php", "i=1"),
            &drinks(vec![drink("1", "Gimlet", &["Gin", "Lime"])]),
        )
        .with_text(
            &url("lookup.php", "i=2"),
            &drinks(vec![drink("2", "Gin Fizz", &["Gin", "Lemon", "Sugar", "Soda water"])]),
        )
        .with_text(
            &url("lookup.php", "i=3"),
            &drinks(vec![drink("3", "Daiquiri", &["Light rum", "Lime", "Sugar"])]),
        )
}

fn setup(client: MockClient) -> (CocktailAggregator, Arc<MockClient>) {
    let client = Arc::new(client);
    let source = CocktailDbSource::new(client.clone(), BASE);
    (
        CocktailAggregator::new(Arc::new(source)).with_max_concurrent_lookups(2),
        client,
    )
}

fn names(recipes: &[RecipeDetail]) -> Vec<&str> {
    recipes.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_available_end_to_end() {
    let (aggregator, client) = setup(bar());
    let inventory: Inventory = [" Gin", "LIME "].into_iter().collect();

    let recipes = aggregator.available(&inventory).await;

    assert_eq!(names(&recipes), vec!["Gimlet", "Daiquiri", "Gin Fizz"]);
    assert!(recipes[0].can_make);
    assert!(recipes[0].missing.is_empty());

    let daiquiri = &recipes[1];
    assert!(!daiquiri.can_make);
    let missing: Vec<&str> = daiquiri.missing.iter().map(|m| m.as_str()).collect();
    assert_eq!(missing, vec!["light rum", "sugar"]);

    // Gimlet is listed under both ingredients but looked up once
    assert_eq!(client.request_count(&url("lookup.php", "i=1")), 1);
}

#[tokio::test]
async fn test_available_outage_of_one_ingredient() {
    let client = bar().with_status(&url("filter.php", "i=lime"), 503);
    let (aggregator, _) = setup(client);
    let inventory: Inventory = ["gin", "lime"].into_iter().collect();

    let recipes = aggregator.available(&inventory).await;
    assert_eq!(names(&recipes), vec!["Gimlet", "Gin Fizz"]);
}

#[tokio::test]
async fn test_available_skips_unknown_and_broken_details() {
    let client = MockClient::new()
        .with_text(
            &url("filter.php", "i=gin"),
            &drinks(vec![stub("1", "Gimlet"), stub("8", "Gone"), stub("9", "Broken")]),
        )
        .with_text(
            &url("lookup.php", "i=1"),
            &drinks(vec![drink("1", "Gimlet", &["Gin", "Lime"])]),
        )
        .with_text(&url("lookup.php", "i=8"), r#"{"drinks":null}"#)
        .with_text(&url("lookup.php", "i=9"), "<html>502 Bad Gateway</html>");
    let (aggregator, _) = setup(client);
    let inventory: Inventory = ["gin"].into_iter().collect();

    let recipes = aggregator.available(&inventory).await;
    assert_eq!(names(&recipes), vec!["Gimlet"]);
    assert!(!recipes[0].can_make);
}

#[tokio::test]
async fn test_no_data_found_listing_is_empty() {
    let client = MockClient::new().with_text(
        &url("filter.php", "i=unobtainium"),
        r#"{"drinks":"no data found"}"#,
    );
    let (aggregator, _) = setup(client);
    let inventory: Inventory = ["unobtainium"].into_iter().collect();

    assert!(aggregator.available(&inventory).await.is_empty());
}

#[tokio::test]
async fn test_by_spirit_end_to_end() {
    let (aggregator, _) = setup(bar());
    let inventory: Inventory = ["gin", "lemon", "sugar", "soda water"].into_iter().collect();

    let recipes = aggregator.by_spirit("  GIN ", &inventory).await;
    assert_eq!(names(&recipes), vec!["Gin Fizz", "Gimlet"]);
    assert!(recipes[0].can_make);
    assert_eq!(recipes[1].missing.len(), 1);
    assert_eq!(recipes[1].missing[0].as_str(), "lime");
}

#[tokio::test]
async fn test_search_end_to_end() {
    let client = MockClient::new().with_text(
        &url("search.php", "s=fizz"),
        &drinks(vec![
            drink("2", "Gin Fizz", &["Gin", "Lemon", "Sugar", "Soda water"]),
            drink("4", "Ramos Gin Fizz", &["Gin", "Cream", "Egg white"]),
        ]),
    );
    let (aggregator, client) = setup(client);

    let recipes = aggregator.search_by_name("fizz", &Inventory::new()).await;
    assert_eq!(names(&recipes), vec!["Gin Fizz", "Ramos Gin Fizz"]);
    assert!(recipes.iter().all(|r| !r.can_make));
    assert_eq!(recipes[1].ingredients[2].name, "Egg white");

    // The search payload is complete; no lookups follow
    assert_eq!(client.request_count(&url("lookup.php", "i=2")), 0);
}

#[tokio::test]
async fn test_recipe_end_to_end() {
    let (aggregator, _) = setup(bar());
    let inventory: Inventory = ["gin"].into_iter().collect();

    let gimlet = aggregator.recipe("1", &inventory).await.unwrap().unwrap();
    assert_eq!(gimlet.name, "Gimlet");
    assert_eq!(gimlet.glass.as_deref(), Some("Cocktail glass"));
    assert_eq!(gimlet.ingredients.len(), 2);
    assert_eq!(gimlet.missing[0].as_str(), "lime");
}

#[tokio::test]
async fn test_repeat_calls_agree() {
    let (aggregator, _) = setup(bar());
    let inventory: Inventory = ["gin", "lime"].into_iter().collect();

    let first = aggregator.available(&inventory).await;
    let second = aggregator.available(&inventory).await;
    assert_eq!(first, second);
}
