//! TheCocktailDB JSON payloads.
//!
//! Every endpoint wraps its results in `{"drinks": ...}`. The value is an
//! array on success, `null` when a lookup or search matches nothing, and for
//! `filter.php` sometimes a bare string such as `"no data found"`. Full drink
//! records carry up to fifteen numbered `strIngredientN` / `strMeasureN`
//! pairs, folded here into an ordered ingredient list.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::types::{Recipe, RecipeIngredient, RecipeStub};

/// Highest numbered ingredient slot the source uses.
pub const MAX_INGREDIENT_SLOTS: usize = 15;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    drinks: Value,
}

#[derive(Debug, Deserialize)]
struct RawStub {
    #[serde(rename = "idDrink")]
    id: String,
    #[serde(rename = "strDrink")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawDrink {
    #[serde(rename = "idDrink")]
    id: String,
    #[serde(rename = "strDrink")]
    name: String,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strGlass", default)]
    glass: Option<String>,
    #[serde(rename = "strDrinkThumb", default)]
    image_url: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Unwrap `{"drinks": [...]}` into the array, treating null and
/// non-array values as "no results".
fn drinks_array(body: &str) -> Result<Vec<Value>, SourceError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    match envelope.drinks {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Decode a `filter.php` listing.
pub fn parse_stubs(body: &str) -> Result<Vec<RecipeStub>, SourceError> {
    drinks_array(body)?
        .into_iter()
        .map(|value| {
            let raw: RawStub =
                serde_json::from_value(value).map_err(|e| SourceError::Decode(e.to_string()))?;
            Ok(RecipeStub {
                id: raw.id,
                name: raw.name,
            })
        })
        .collect()
}

/// Decode a `lookup.php` or `search.php` response into full recipes.
pub fn parse_recipes(body: &str) -> Result<Vec<Recipe>, SourceError> {
    drinks_array(body)?
        .into_iter()
        .map(|value| {
            let raw: RawDrink =
                serde_json::from_value(value).map_err(|e| SourceError::Decode(e.to_string()))?;
            Ok(into_recipe(raw))
        })
        .collect()
}

fn into_recipe(raw: RawDrink) -> Recipe {
    let ingredients = (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let name = non_blank(raw.rest.get(&format!("strIngredient{}", slot)))?;
            let measure = non_blank(raw.rest.get(&format!("strMeasure{}", slot)));
            Some(RecipeIngredient::new(name, measure))
        })
        .collect();

    Recipe {
        id: raw.id,
        name: raw.name,
        instructions: raw.instructions.filter(|s| !s.trim().is_empty()),
        glass: raw.glass.filter(|s| !s.trim().is_empty()),
        image_url: raw.image_url.filter(|s| !s.trim().is_empty()),
        ingredients,
    }
}

/// Trimmed string content of a JSON value, or None for null/blank/non-string.
fn non_blank(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOJITO: &str = r#"{"drinks":[{
        "idDrink":"11000",
        "strDrink":"Mojito",
        "strGlass":"Highball glass",
        "strInstructions":"Muddle mint leaves with sugar and lime juice.",
        "strDrinkThumb":"https://www.thecocktaildb.com/images/media/drink/mojito.jpg",
        "strAlcoholic":"Alcoholic",
        "strIngredient1":"Light rum","strMeasure1":"2-3 oz ",
        "strIngredient2":"Lime","strMeasure2":"Juice of 1 ",
        "strIngredient3":"Sugar","strMeasure3":"2 tsp ",
        "strIngredient4":"Mint","strMeasure4":"2-4 ",
        "strIngredient5":"Soda water","strMeasure5":null,
        "strIngredient6":"","strMeasure6":"",
        "strIngredient7":null,"strMeasure7":null,
        "strIngredient15":null,"strMeasure15":null
    }]}"#;

    #[test]
    fn test_parse_full_drink() {
        let recipes = parse_recipes(MOJITO).unwrap();
        assert_eq!(recipes.len(), 1);

        let mojito = &recipes[0];
        assert_eq!(mojito.id, "11000");
        assert_eq!(mojito.name, "Mojito");
        assert_eq!(mojito.glass.as_deref(), Some("Highball glass"));
        assert_eq!(
            mojito.ingredients,
            vec![
                RecipeIngredient::new("Light rum", Some("2-3 oz".to_string())),
                RecipeIngredient::new("Lime", Some("Juice of 1".to_string())),
                RecipeIngredient::new("Sugar", Some("2 tsp".to_string())),
                RecipeIngredient::new("Mint", Some("2-4".to_string())),
                RecipeIngredient::new("Soda water", None),
            ]
        );
    }

    #[test]
    fn test_gaps_between_slots_are_skipped() {
        let body = r#"{"drinks":[{"idDrink":"1","strDrink":"Odd",
            "strIngredient1":"Gin","strIngredient2":"  ","strIngredient3":"Tonic",
            "strMeasure3":"top"}]}"#;
        let recipe = &parse_recipes(body).unwrap()[0];
        let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Gin", "Tonic"]);
        assert_eq!(recipe.ingredients[1].measure.as_deref(), Some("top"));
        assert!(recipe.instructions.is_none());
    }

    #[test]
    fn test_null_and_string_drinks_mean_empty() {
        assert!(parse_recipes(r#"{"drinks":null}"#).unwrap().is_empty());
        assert!(parse_stubs(r#"{"drinks":"no data found"}"#).unwrap().is_empty());
        assert!(parse_stubs(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_stubs() {
        let body = r#"{"drinks":[
            {"strDrink":"Daiquiri","strDrinkThumb":"x","idDrink":"11006"},
            {"strDrink":"Mojito","strDrinkThumb":"y","idDrink":"11000"}
        ]}"#;
        let stubs = parse_stubs(body).unwrap();
        assert_eq!(
            stubs,
            vec![
                RecipeStub {
                    id: "11006".to_string(),
                    name: "Daiquiri".to_string()
                },
                RecipeStub {
                    id: "11000".to_string(),
                    name: "Mojito".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            parse_stubs("<html>rate limited</html>"),
            Err(SourceError::Decode(_))
        ));
        assert!(matches!(
            parse_recipes(r#"{"drinks":[{"strDrink":"No id"}]}"#),
            Err(SourceError::Decode(_))
        ));
    }
}
