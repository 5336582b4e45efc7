use serde::{Deserialize, Deserializer, Serialize};

use crate::meals::repo::Meal;

/// Body accepted on create. `created_at` is optional; the handler fills in
/// the current timestamp when it is missing.
#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    pub inside_diet: bool,
    #[serde(default, deserialize_with = "string_when_present")]
    pub created_at: Option<String>,
}

/// Body accepted on update. Same shape as create; every field is
/// overwritten, ids are not.
#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub name: String,
    pub description: String,
    pub inside_diet: bool,
    #[serde(default, deserialize_with = "string_when_present")]
    pub created_at: Option<String>,
}

/// Omitting `created_at` means "stamp it at handling time"; sending it means
/// it must be a string. An explicit null is a type error like any other.
fn string_when_present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct MealsListResponse {
    pub meals: Vec<Meal>,
}

/// Single-meal envelope. The key stays plural (and becomes `null` when
/// nothing matched): wire compatibility, a miss is not an error.
#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meals: Option<Meal>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: DietSummary,
}

/// Aggregates for one session. `best_sequence` is every compliant meal, in
/// store order; the name is historical, no streak is computed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietSummary {
    pub total_meals: i64,
    pub meals_inside_diet: i64,
    pub meals_outside_diet: i64,
    pub best_sequence: Vec<Meal>,
}
