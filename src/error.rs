//! Error types
//!
//! Gameplay itself cannot fail: bounds are enforced by the state machine.
//! Everything here happens at startup, before the loop runs.

use std::io;
use std::path::PathBuf;

/// A data-authoring bug in the ingredient/recipe tables.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("duplicate ingredient id '{0}'")]
    DuplicateIngredient(&'static str),

    #[error("ingredient '{id}' has unlock tier {tier}, expected 1..={max}")]
    IngredientTier { id: &'static str, tier: u8, max: u8 },

    #[error("recipe '{recipe}' has unlock tier {tier}, expected 1..={max}")]
    RecipeTier {
        recipe: &'static str,
        tier: u8,
        max: u8,
    },

    #[error("recipe '{recipe}' uses unknown ingredient '{ingredient}'")]
    UnknownIngredient {
        recipe: &'static str,
        ingredient: &'static str,
    },

    #[error(
        "recipe '{recipe}' needs '{ingredient}' (unlock {ingredient_tier}) but recipe unlocks at {recipe_tier}"
    )]
    LockedIngredient {
        recipe: &'static str,
        ingredient: &'static str,
        ingredient_tier: u8,
        recipe_tier: u8,
    },

    #[error("recipe '{recipe}' has {len} ingredients, bowl holds 1..={max}")]
    RecipeLength {
        recipe: &'static str,
        len: usize,
        max: usize,
    },

    #[error("recipe '{recipe}' must be worth at least one star")]
    NoStars { recipe: &'static str },

    #[error("recipe '{recipe}' has non-positive base time {time}")]
    BaseTime { recipe: &'static str, time: f32 },

    #[error("no recipe is servable at level 1")]
    NothingAtFirstLevel,
}

/// Failure to read or parse a settings file.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("could not read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid window size '{0}', expected WIDTHxHEIGHT")]
    WindowSize(String),
}

/// Anything that prevents the game loop from starting.
#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("invalid argument: {0}")]
    Argument(String),
}
