/// Ingredient-overlap scoring.
///
/// A recipe is scored line by line: each ingredient line is rendered as
/// "measure ingredient" and counts as matched when any pantry item occurs in it as a
/// case-insensitive substring. Pantry items are compared in the user's locale against
/// the localized record.
use crate::model::{IngredientLine, RecipeRecord, ScoredRecipe};

/// Trims and lowercases pantry items, dropping empty ones.
///
/// An empty item would be a substring of every line, so it is never kept.
pub fn normalize_pantry<S: AsRef<str>>(pantry: &[S]) -> Vec<String> {
    pantry
        .iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn display_line(line: &IngredientLine) -> String {
    let measure = line.measure.trim();
    let name = line.name.trim().to_lowercase();
    if measure.is_empty() {
        name
    } else {
        format!("{measure} {name}")
    }
}

pub fn line_matches(line: &str, pantry: &[String]) -> bool {
    let haystack = line.to_lowercase();
    pantry.iter().any(|item| haystack.contains(item.as_str()))
}

/// Scores `recipe` against an already normalized pantry.
pub fn score(recipe: RecipeRecord, pantry: &[String]) -> ScoredRecipe {
    let lines: Vec<String> = recipe
        .ingredients
        .iter()
        .filter(|line| !line.name.trim().is_empty())
        .map(display_line)
        .collect();
    let matched: Vec<bool> = lines.iter().map(|l| line_matches(l, pantry)).collect();
    let matches = matched.iter().filter(|m| **m).count();
    let total = lines.len();

    ScoredRecipe {
        recipe,
        lines,
        matched,
        matches,
        total,
    }
}

/// Stable sort by match count, highest first; equal counts keep discovery order.
pub fn rank_by_matches(recipes: &mut [ScoredRecipe]) {
    recipes.sort_by(|a, b| b.matches.cmp(&a.matches));
}
