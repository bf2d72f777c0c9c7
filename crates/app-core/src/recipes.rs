//! Recipe records and the built-in catalog data
//!
//! Recipes are immutable and loaded once per process. There is no way to
//! create, update or delete them.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// A recipe record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable unique identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Tags, in display order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Image reference, empty when there is none
    #[serde(default)]
    pub image: String,

    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,

    /// Preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Recipe {
    /// Check if the recipe has an image
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Check whether a lowercased query occurs in the title or any tag
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.title.to_lowercase().contains(normalized_query)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(normalized_query))
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn sample(id: &str, title: &str, tags: &[&str], ingredients: &[&str], steps: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        tags: owned(tags),
        image: String::new(),
        ingredients: owned(ingredients),
        steps: owned(steps),
    }
}

fn generated(id: u32, title: &str, tags: &[&str]) -> Recipe {
    sample(
        &id.to_string(),
        title,
        tags,
        &["Ingredient A", "Ingredient B", "Ingredient C"],
        &["Step 1", "Step 2", "Step 3"],
    )
}

fn build_builtin() -> Vec<Recipe> {
    let mut recipes = vec![
        sample(
            "1",
            "Spaghetti Bolognese",
            &["pasta", "italian", "beef"],
            &["Spaghetti", "Ground beef", "Tomato sauce", "Onion", "Garlic"],
            &["Boil pasta", "Cook beef with onion/garlic", "Add sauce", "Combine and serve"],
        ),
        sample(
            "2",
            "Chicken Caesar Salad",
            &["salad", "chicken", "quick"],
            &["Romaine", "Chicken", "Croutons", "Parmesan", "Caesar dressing"],
            &["Grill chicken", "Chop romaine", "Toss with dressing", "Top with chicken and croutons"],
        ),
        sample(
            "3",
            "Vegan Buddha Bowl",
            &["vegan", "bowl", "healthy"],
            &["Quinoa", "Chickpeas", "Avocado", "Veggies", "Tahini sauce"],
            &["Cook quinoa", "Roast chickpeas", "Assemble bowl", "Drizzle sauce"],
        ),
    ];

    let extras: [(u32, &str, &[&str]); 19] = [
        (4, "Beef Tacos", &["mexican", "tacos", "beef"]),
        (5, "Sushi Rolls", &["japanese", "rice", "seafood"]),
        (6, "Pad Thai", &["thai", "noodles", "shrimp"]),
        (7, "Avocado Toast", &["breakfast", "quick", "vegan"]),
        (8, "Pancakes", &["breakfast", "sweet"]),
        (9, "Tomato Soup", &["soup", "vegetarian"]),
        (10, "Grilled Cheese", &["sandwich", "quick"]),
        (11, "Margherita Pizza", &["pizza", "italian"]),
        (12, "Stir Fry Veggies", &["vegan", "stir-fry"]),
        (13, "BBQ Ribs", &["bbq", "meat"]),
        (14, "Chocolate Brownies", &["dessert", "sweet"]),
        (15, "Greek Salad", &["salad", "mediterranean"]),
        (16, "Ramen", &["japanese", "soup"]),
        (17, "Falafel Wrap", &["middle-eastern", "vegan"]),
        (18, "Butter Chicken", &["indian", "chicken"]),
        (19, "Fish Tacos", &["mexican", "seafood"]),
        (20, "Quiche Lorraine", &["bake", "eggs"]),
        (21, "Curry Lentils", &["vegan", "indian"]),
        (22, "Garlic Shrimp", &["seafood", "quick"]),
    ];

    recipes.extend(
        extras
            .iter()
            .map(|(id, title, tags)| generated(*id, title, tags)),
    );
    recipes
}

/// The built-in mock recipes, shared for the lifetime of the process
pub fn builtin_recipes() -> Arc<[Recipe]> {
    static BUILTIN: OnceLock<Arc<[Recipe]>> = OnceLock::new();
    Arc::clone(BUILTIN.get_or_init(|| build_builtin().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_size() {
        let recipes = builtin_recipes();
        assert_eq!(recipes.len(), 22);
        assert_eq!(recipes[0].title, "Spaghetti Bolognese");
        assert_eq!(recipes[21].id, "22");
    }

    #[test]
    fn test_builtin_ids_unique() {
        let recipes = builtin_recipes();
        let ids: HashSet<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), recipes.len());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = builtin_recipes();
        let b = builtin_recipes();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_generated_recipe_placeholders() {
        let recipes = builtin_recipes();
        let ramen = recipes.iter().find(|r| r.id == "16").unwrap();
        assert_eq!(ramen.ingredients, vec!["Ingredient A", "Ingredient B", "Ingredient C"]);
        assert_eq!(ramen.steps.len(), 3);
        assert!(!ramen.has_image());
    }

    #[test]
    fn test_matches_title_and_tags() {
        let recipes = builtin_recipes();
        let falafel = recipes.iter().find(|r| r.id == "17").unwrap();
        assert!(falafel.matches("vegan"));
        assert!(falafel.matches("wrap"));
        assert!(falafel.matches("east"));
        assert!(!falafel.matches("pasta"));
    }

    #[test]
    fn test_recipe_deserialize_defaults() {
        let recipe: Recipe = serde_json::from_str(r#"{"id":"x","title":"Plain"}"#).unwrap();
        assert!(recipe.tags.is_empty());
        assert!(recipe.image.is_empty());
        assert!(recipe.steps.is_empty());
    }
}
