//! Ingredient and recipe catalog
//!
//! Static data, validated once at startup. A validation failure is a
//! data-authoring bug and aborts before the game loop starts.

use std::collections::{BTreeSet, HashSet};

use crate::consts::{MAX_BOWL, MAX_LEVEL};
use crate::error::CatalogError;
use crate::palette::Rgb;

/// Stable ingredient key (e.g. `"salmon"`)
pub type IngredientId = &'static str;

/// A clickable ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: &'static str,
    pub color: Rgb,
    pub id: IngredientId,
    /// Level at which the ingredient becomes clickable
    pub unlock: u8,
}

/// An orderable recipe: an exact, ordered ingredient sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: &'static str,
    pub unlock: u8,
    pub stars: u32,
    /// Order time at speed 1.0 (seconds)
    pub base_time: f32,
    pub ingredients: &'static [IngredientId],
}

const fn ing(name: &'static str, color: Rgb, id: IngredientId, unlock: u8) -> Ingredient {
    Ingredient {
        name,
        color,
        id,
        unlock,
    }
}

const fn recipe(
    name: &'static str,
    unlock: u8,
    stars: u32,
    base_time: f32,
    ingredients: &'static [IngredientId],
) -> Recipe {
    Recipe {
        name,
        unlock,
        stars,
        base_time,
        ingredients,
    }
}

/// The ingredient panel, top to bottom
pub static INGREDIENTS: &[Ingredient] = &[
    ing("Salmon", Rgb(255, 110, 70), "salmon", 1),
    ing("Rice", Rgb(200, 218, 255), "rice", 1),
    ing("Avocado", Rgb(65, 185, 75), "avocado", 1),
    ing("Ice", Rgb(115, 200, 255), "ice", 1),
    ing("Mango", Rgb(255, 185, 35), "mango", 2),
    ing("Cream", Rgb(255, 240, 210), "cream", 2),
    ing("Boba", Rgb(120, 72, 32), "boba", 2),
    ing("Chocolate", Rgb(90, 52, 22), "choco", 3),
    ing("Shrimp", Rgb(235, 115, 65), "shrimp", 3),
    ing("Seaweed", Rgb(45, 175, 75), "seaweed", 3),
    ing("Cheese", Rgb(255, 205, 45), "cheese", 4),
    ing("Squid", Rgb(185, 95, 215), "squid", 4),
    ing("Strawberry", Rgb(255, 65, 95), "strawb", 5),
    ing("Krill", Rgb(215, 65, 85), "krill", 5),
];

pub static RECIPES: &[Recipe] = &[
    recipe("Poke Bowl", 1, 1, 18.0, &["salmon", "rice", "avocado"]),
    recipe("Salmon Chill", 1, 1, 15.0, &["salmon", "rice", "ice"]),
    recipe("Avo Chill", 1, 1, 14.0, &["avocado", "ice", "rice"]),
    recipe("Mango Shake", 2, 1, 16.0, &["mango", "cream", "ice"]),
    recipe("Bubble Tea", 2, 1, 15.0, &["boba", "cream", "ice"]),
    recipe("Mango Cream", 2, 2, 18.0, &["mango", "cream", "boba"]),
    recipe("Avo Bowl", 2, 2, 19.0, &["avocado", "rice", "mango"]),
    recipe("Sushi Bowl", 3, 2, 20.0, &["salmon", "rice", "seaweed"]),
    recipe("Choco Dream", 3, 2, 18.0, &["choco", "cream", "boba"]),
    recipe("Ramen Bowl", 3, 2, 22.0, &["shrimp", "seaweed", "rice"]),
    recipe(
        "Protein Bowl",
        3,
        3,
        25.0,
        &["salmon", "avocado", "shrimp", "rice"],
    ),
    recipe("Ice Cream", 4, 2, 16.0, &["cream", "choco", "ice"]),
    recipe(
        "Cheese Ramen",
        4,
        3,
        24.0,
        &["cheese", "shrimp", "seaweed", "rice"],
    ),
    recipe("Squid Ink", 4, 2, 20.0, &["squid", "seaweed", "rice"]),
    recipe("Milkshake", 5, 2, 16.0, &["cream", "strawb", "ice"]),
    recipe("Mocktail", 5, 3, 22.0, &["mango", "strawb", "cream", "ice"]),
    recipe(
        "Polar Plate",
        5,
        3,
        26.0,
        &["salmon", "krill", "squid", "seaweed"],
    ),
];

/// Validated view over the ingredient and recipe tables
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: &'static [Ingredient],
    recipes: &'static [Recipe],
}

impl Catalog {
    /// The built-in tables
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(INGREDIENTS, RECIPES)
    }

    /// Validate and wrap a pair of tables
    pub fn new(
        ingredients: &'static [Ingredient],
        recipes: &'static [Recipe],
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for ingredient in ingredients {
            if !seen.insert(ingredient.id) {
                return Err(CatalogError::DuplicateIngredient(ingredient.id));
            }
            if !(1..=MAX_LEVEL).contains(&ingredient.unlock) {
                return Err(CatalogError::IngredientTier {
                    id: ingredient.id,
                    tier: ingredient.unlock,
                    max: MAX_LEVEL,
                });
            }
        }

        let catalog = Self {
            ingredients,
            recipes,
        };

        for recipe in recipes {
            catalog.validate_recipe(recipe)?;
        }

        if catalog.recipes_available(1).is_empty() {
            return Err(CatalogError::NothingAtFirstLevel);
        }

        log::debug!(
            "Catalog validated: {} ingredients, {} recipes",
            ingredients.len(),
            recipes.len()
        );
        Ok(catalog)
    }

    fn validate_recipe(&self, recipe: &'static Recipe) -> Result<(), CatalogError> {
        if !(1..=MAX_LEVEL).contains(&recipe.unlock) {
            return Err(CatalogError::RecipeTier {
                recipe: recipe.name,
                tier: recipe.unlock,
                max: MAX_LEVEL,
            });
        }
        if recipe.ingredients.is_empty() || recipe.ingredients.len() > MAX_BOWL {
            return Err(CatalogError::RecipeLength {
                recipe: recipe.name,
                len: recipe.ingredients.len(),
                max: MAX_BOWL,
            });
        }
        if recipe.stars == 0 {
            return Err(CatalogError::NoStars {
                recipe: recipe.name,
            });
        }
        if recipe.base_time.is_nan() || recipe.base_time <= 0.0 {
            return Err(CatalogError::BaseTime {
                recipe: recipe.name,
                time: recipe.base_time,
            });
        }
        for &id in recipe.ingredients {
            let ingredient = self
                .ingredient(id)
                .ok_or(CatalogError::UnknownIngredient {
                    recipe: recipe.name,
                    ingredient: id,
                })?;
            if ingredient.unlock > recipe.unlock {
                return Err(CatalogError::LockedIngredient {
                    recipe: recipe.name,
                    ingredient: id,
                    ingredient_tier: ingredient.unlock,
                    recipe_tier: recipe.unlock,
                });
            }
        }
        Ok(())
    }

    pub fn ingredients(&self) -> &'static [Ingredient] {
        self.ingredients
    }

    pub fn recipes(&self) -> &'static [Recipe] {
        self.recipes
    }

    /// Look up an ingredient by id
    pub fn ingredient(&self, id: &str) -> Option<&'static Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    /// Panel slot of an ingredient (used for button layout)
    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.ingredients.iter().position(|i| i.id == id)
    }

    /// Ids of every ingredient unlocked at or below `tier`
    pub fn unlocked_at(&self, tier: u8) -> BTreeSet<IngredientId> {
        self.ingredients
            .iter()
            .filter(|i| i.unlock <= tier)
            .map(|i| i.id)
            .collect()
    }

    /// Whether an ingredient can be clicked at `tier`
    pub fn is_unlocked(&self, id: &str, tier: u8) -> bool {
        self.ingredient(id).is_some_and(|i| i.unlock <= tier)
    }

    /// Recipes that can be ordered at `tier`
    pub fn recipes_available(&self, tier: u8) -> Vec<&'static Recipe> {
        let unlocked = self.unlocked_at(tier);
        self.recipes_available_with(tier, &unlocked)
    }

    /// Recipes with `unlock <= tier` whose ingredients are all in `unlocked`
    pub fn recipes_available_with(
        &self,
        tier: u8,
        unlocked: &BTreeSet<IngredientId>,
    ) -> Vec<&'static Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.unlock <= tier && r.ingredients.iter().all(|i| unlocked.contains(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.ingredients().len(), 14);
        assert_eq!(catalog.recipes().len(), 17);
    }

    #[test]
    fn test_every_recipe_ingredient_unlocks_no_later_than_recipe() {
        let catalog = Catalog::standard().unwrap();
        for recipe in catalog.recipes() {
            for id in recipe.ingredients {
                let ingredient = catalog.ingredient(id).unwrap();
                assert!(
                    ingredient.unlock <= recipe.unlock,
                    "{} needs {}",
                    recipe.name,
                    id
                );
            }
        }
    }

    #[test]
    fn test_unlocked_sets_grow_with_tier() {
        let catalog = Catalog::standard().unwrap();
        let first = catalog.unlocked_at(1);
        assert_eq!(
            first.iter().copied().collect::<Vec<_>>(),
            vec!["avocado", "ice", "rice", "salmon"]
        );
        for tier in 1..MAX_LEVEL {
            assert!(catalog.unlocked_at(tier).is_subset(&catalog.unlocked_at(tier + 1)));
        }
        assert_eq!(catalog.unlocked_at(MAX_LEVEL).len(), INGREDIENTS.len());
    }

    #[test]
    fn test_recipes_available_at_level_one() {
        let catalog = Catalog::standard().unwrap();
        let names: Vec<_> = catalog.recipes_available(1).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Poke Bowl", "Salmon Chill", "Avo Chill"]);
        assert_eq!(catalog.recipes_available(MAX_LEVEL).len(), RECIPES.len());
    }

    #[test]
    fn test_recipes_available_respects_unlocked_set() {
        let catalog = Catalog::standard().unwrap();
        let mut unlocked = catalog.unlocked_at(1);
        unlocked.remove("avocado");
        let names: Vec<_> = catalog
            .recipes_available_with(1, &unlocked)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Salmon Chill"]);
    }

    #[test]
    fn test_locked_ingredient_is_rejected() {
        static BAD: &[Recipe] = &[
            recipe("Poke Bowl", 1, 1, 18.0, &["salmon", "rice", "avocado"]),
            recipe("Early Krill", 2, 1, 10.0, &["krill", "rice"]),
        ];
        let err = Catalog::new(INGREDIENTS, BAD).unwrap_err();
        assert_eq!(
            err,
            CatalogError::LockedIngredient {
                recipe: "Early Krill",
                ingredient: "krill",
                ingredient_tier: 5,
                recipe_tier: 2,
            }
        );
    }

    #[test]
    fn test_unknown_and_duplicate_ingredients_are_rejected() {
        static TYPO: &[Recipe] = &[recipe("Typo", 1, 1, 10.0, &["salmn"])];
        assert!(matches!(
            Catalog::new(INGREDIENTS, TYPO),
            Err(CatalogError::UnknownIngredient { ingredient: "salmn", .. })
        ));

        static DUPES: &[Ingredient] = &[
            ing("Salmon", Rgb(255, 110, 70), "salmon", 1),
            ing("Salmon Again", Rgb(255, 110, 70), "salmon", 1),
        ];
        assert_eq!(
            Catalog::new(DUPES, RECIPES).unwrap_err(),
            CatalogError::DuplicateIngredient("salmon")
        );
    }

    #[test]
    fn test_oversized_and_empty_recipes_are_rejected() {
        static LONG: &[Recipe] = &[recipe(
            "Everything",
            1,
            1,
            30.0,
            &["salmon", "rice", "avocado", "ice", "salmon", "rice", "ice"],
        )];
        assert!(matches!(
            Catalog::new(INGREDIENTS, LONG),
            Err(CatalogError::RecipeLength { len: 7, .. })
        ));

        static EMPTY: &[Recipe] = &[recipe("Air", 1, 1, 5.0, &[])];
        assert!(matches!(
            Catalog::new(INGREDIENTS, EMPTY),
            Err(CatalogError::RecipeLength { len: 0, .. })
        ));
    }

    #[test]
    fn test_catalog_needs_a_first_level_recipe() {
        static LATE: &[Recipe] = &[recipe("Milkshake", 5, 2, 16.0, &["cream", "strawb", "ice"])];
        assert_eq!(
            Catalog::new(INGREDIENTS, LATE).unwrap_err(),
            CatalogError::NothingAtFirstLevel
        );
    }

    #[test]
    fn test_slot_lookup() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.slot_of("salmon"), Some(0));
        assert_eq!(catalog.slot_of("krill"), Some(13));
        assert_eq!(catalog.slot_of("tofu"), None);
        assert!(catalog.is_unlocked("rice", 1));
        assert!(!catalog.is_unlocked("mango", 1));
        assert!(!catalog.is_unlocked("tofu", 5));
    }
}
