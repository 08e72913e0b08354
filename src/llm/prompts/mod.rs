// ABOUTME: Prompt text for recipe suggestions, system instruction loaded at compile time
// ABOUTME: Builds the user prompt listing pantry items by expiry date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Recipe Prompts
//!
//! The system instruction lives in a markdown file next to this module so it
//! can be edited without touching code.

use std::fmt::Write as _;

use crate::models::FoodItem;

/// System instruction sent with every recipe request
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("recipe_system.md");

const PROMPT_HEADER: &str = "You are a home-cooking assistant. Suggest one recipe that makes good use of the following ingredients.\n\nIngredients:\n";

const PROMPT_FOOTER: &str = "\nRequirements:
1. Prioritize the listed ingredients, especially those expiring soonest.
2. Keep the meal nutritionally balanced.
3. Keep the cooking steps short and concrete.
4. Suggest any additional ingredients that would improve the dish.

Output format:
Recipe name:
Ingredients (serves 2):
Steps:
Nutrition notes:
";

/// Build the recipe request prompt.
///
/// Items are listed soonest expiry first, one per line as
/// `- <title> (<quantity>): expires <YYYY/MM/DD>`.
#[must_use]
pub fn build_recipe_prompt(items: &[FoodItem]) -> String {
    let mut sorted: Vec<&FoodItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date).then(a.id.cmp(&b.id)));

    let mut prompt = String::from(PROMPT_HEADER);
    for item in sorted {
        // Writing to a String cannot fail
        let _ = writeln!(
            prompt,
            "- {} ({}): expires {}",
            item.title,
            item.quantity,
            item.expiry_date.format("%Y/%m/%d")
        );
    }
    prompt.push_str(PROMPT_FOOTER);
    prompt
}
