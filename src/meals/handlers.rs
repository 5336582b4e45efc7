use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    meals::{
        dto::{
            CreateMealRequest, DietSummary, MealResponse, MealsListResponse, SummaryResponse,
            UpdateMealRequest,
        },
        repo::Meal,
    },
    session::{
        cookie::{mint_session_id, session_cookie},
        extractors::{session_from_jar, SessionId},
    },
    state::AppState,
};

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<MealsListResponse>, ApiError> {
    let meals = Meal::list_by_session(&state.db, &session_id).await?;
    Ok(Json(MealsListResponse { meals }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<Json<MealResponse>, ApiError> {
    let meal = Meal::find_by_id(&state.db, &session_id, id).await?;
    Ok(Json(MealResponse { meals: meal }))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SummaryResponse>, ApiError> {
    // Independent statements, no transaction; counts can drift under
    // concurrent writes.
    let total_meals = Meal::count_by_session(&state.db, &session_id).await?;
    let meals_inside_diet = Meal::count_by_diet(&state.db, &session_id, true).await?;
    let meals_outside_diet = Meal::count_by_diet(&state.db, &session_id, false).await?;
    let best_sequence = Meal::list_inside_diet(&state.db, &session_id).await?;

    Ok(Json(SummaryResponse {
        summary: DietSummary {
            total_meals,
            meals_inside_diet,
            meals_outside_diet,
            best_sequence,
        },
    }))
}

#[instrument(skip(state, jar, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, CookieJar), ApiError> {
    // Reuse the presented session; mint one and set the cookie otherwise.
    // This is the only place a session identifier is ever issued.
    let (session_id, jar) = match session_from_jar(&jar) {
        Some(existing) => (existing, jar),
        None => {
            let minted = mint_session_id();
            let jar = jar.add(session_cookie(minted.clone()));
            (minted, jar)
        }
    };

    let meal = Meal {
        id: Uuid::new_v4(),
        name: body.name,
        description: body.description,
        inside_diet: body.inside_diet,
        created_at: body.created_at.unwrap_or_else(now_timestamp),
        session_id: Some(session_id),
    };
    meal.insert(&state.db).await?;

    info!(meal_id = %meal.id, "meal created");
    Ok((StatusCode::CREATED, jar))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMealRequest>,
) -> Result<StatusCode, ApiError> {
    let created_at = body.created_at.unwrap_or_else(now_timestamp);
    let updated = Meal::update(
        &state.db,
        &session_id,
        id,
        &body.name,
        &body.description,
        body.inside_diet,
        &created_at,
    )
    .await?;

    if updated == 0 {
        debug!(%id, "update matched no rows");
    }
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = Meal::delete(&state.db, &session_id, id).await?;

    if deleted == 0 {
        debug!(%id, "delete matched no rows");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Request-handling time as an RFC 3339 UTC string, used whenever the
/// caller omits `created_at`.
fn now_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("current time formats as RFC 3339")
}
