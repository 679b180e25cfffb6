use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::Recipe;

/// Load recipes from a JSON file.
///
/// Deduplicates by identity (highest version wins), returned in identity order.
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)?;

    let mut current: HashMap<u32, Recipe> = HashMap::new();
    for recipe in recipes {
        let newer = current
            .get(&recipe.id)
            .map(|existing| recipe.version > existing.version)
            .unwrap_or(true);
        if newer {
            current.insert(recipe.id, recipe);
        }
    }

    let mut deduped: Vec<Recipe> = current.into_values().collect();
    deduped.sort_by_key(|r| r.id);
    Ok(deduped)
}

/// Save recipes to a JSON file.
pub fn save_recipes<P: AsRef<Path>>(path: P, recipes: &[Recipe]) -> Result<()> {
    let json = serde_json::to_string_pretty(recipes)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"[
            {"id": 1, "title": "Porridge", "servings": 2, "is_breakfast": true, "version": 1,
             "ingredients": [{"ingredient": {"id": 4, "name": "Oats", "price_per_unit": 300,
                "unit_class": "mass", "nutrient_unit": "kg",
                "nutrients": {"calories": 3890, "protein": 169}},
              "quantity": 150, "unit": "g"}]}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let recipes = load_recipes(file.path()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Porridge");
        assert_eq!(recipes[0].ingredients[0].ingredient.name, "Oats");

        let out_file = NamedTempFile::new().unwrap();
        save_recipes(out_file.path(), &recipes).unwrap();

        let reloaded = load_recipes(out_file.path()).unwrap();
        assert_eq!(reloaded, recipes);
    }

    #[test]
    fn test_highest_version_wins() {
        let json = r#"[
            {"id": 1, "title": "Soup v2", "servings": 4, "is_dinner": true, "version": 2},
            {"id": 1, "title": "Soup v5", "servings": 4, "is_dinner": true, "version": 5},
            {"id": 1, "title": "Soup v3", "servings": 4, "is_dinner": true, "version": 3}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let recipes = load_recipes(file.path()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Soup v5");
        assert_eq!(recipes[0].version, 5);
    }
}
