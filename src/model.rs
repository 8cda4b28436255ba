use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a recipe as assigned by the remote search API.
///
/// The API has returned ids both as JSON strings and as JSON integers, so
/// deserialization accepts either and normalizes to the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        RecipeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId::new(id)
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        RecipeId(id)
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        RecipeId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecipeId(s),
            RawId::Unsigned(n) => RecipeId(n.to_string()),
            RawId::Signed(n) => RecipeId(n.to_string()),
        })
    }
}

/// A recipe summary as returned by a search.
///
/// Two recipes are the same recipe when their `recipe_id` matches; the
/// display fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: RecipeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f2f_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_rank: Option<f64>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Recipe {
    pub fn new(recipe_id: impl Into<RecipeId>, title: impl Into<String>) -> Self {
        Recipe {
            recipe_id: recipe_id.into(),
            title: title.into(),
            image_url: String::new(),
            source_url: String::new(),
            publisher: None,
            publisher_url: None,
            f2f_url: None,
            social_rank: None,
            is_favorite: false,
        }
    }

    /// Identity comparison, ignoring every display field.
    pub fn same_recipe(&self, other: &Recipe) -> bool {
        self.recipe_id == other.recipe_id
    }

    /// Returns a copy of this recipe with the favorite flag set to `favorite`.
    pub fn with_favorite(self, favorite: bool) -> Self {
        Recipe {
            is_favorite: favorite,
            ..self
        }
    }
}

/// Body of a search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipesContainer {
    #[serde(default)]
    pub count: Option<u32>,
    pub recipes: Vec<Recipe>,
}
