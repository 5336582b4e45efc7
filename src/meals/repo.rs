use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One eating event. `created_at` is stored as the caller-supplied (or
/// defaulted) timestamp string and never parsed back; `session_id` is the
/// opaque owning-session value every read/update/delete filters on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub inside_diet: bool,
    pub created_at: String,
    pub session_id: Option<String>,
}

impl Meal {
    pub async fn insert(&self, db: &PgPool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meals (id, name, description, inside_diet, created_at, session_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.inside_diet)
        .bind(&self.created_at)
        .bind(self.session_id.as_deref())
        .execute(db)
        .await?;
        Ok(())
    }

    /// All meals belonging to a session, in store order.
    pub async fn list_by_session(db: &PgPool, session_id: &str) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, inside_diet, created_at, session_id
            FROM meals
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        db: &PgPool,
        session_id: &str,
        id: Uuid,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, inside_diet, created_at, session_id
            FROM meals
            WHERE session_id = $1 AND id = $2
            "#,
        )
        .bind(session_id)
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(meal)
    }

    /// Full overwrite of the mutable fields. Returns the number of matched
    /// rows; zero is a no-op for the caller, not an error.
    pub async fn update(
        db: &PgPool,
        session_id: &str,
        id: Uuid,
        name: &str,
        description: &str,
        inside_diet: bool,
        created_at: &str,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE meals
            SET name = $3, description = $4, inside_diet = $5, created_at = $6
            WHERE session_id = $1 AND id = $2
            "#,
        )
        .bind(session_id)
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(inside_diet)
        .bind(created_at)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(db: &PgPool, session_id: &str, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM meals
            WHERE session_id = $1 AND id = $2
            "#,
        )
        .bind(session_id)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_session(db: &PgPool, session_id: &str) -> anyhow::Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM meals WHERE session_id = $1"#)
                .bind(session_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    pub async fn count_by_diet(
        db: &PgPool,
        session_id: &str,
        inside_diet: bool,
    ) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM meals WHERE session_id = $1 AND inside_diet = $2"#,
        )
        .bind(session_id)
        .bind(inside_diet)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    /// Compliant meals for the summary's `bestSequence` field. The ORDER BY
    /// is a no-op once the filter has run; kept for wire compatibility.
    pub async fn list_inside_diet(db: &PgPool, session_id: &str) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, inside_diet, created_at, session_id
            FROM meals
            WHERE session_id = $1 AND inside_diet = TRUE
            ORDER BY inside_diet DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_serializes_with_column_names() {
        let meal = Meal {
            id: Uuid::new_v4(),
            name: "Lunch".into(),
            description: "Chicken salad".into(),
            inside_diet: true,
            created_at: "2022-01-01T00:00:00.000Z".into(),
            session_id: Some("session-1".into()),
        };

        let value = serde_json::to_value(&meal).expect("serialize");
        assert_eq!(value["name"], "Lunch");
        assert_eq!(value["description"], "Chicken salad");
        assert_eq!(value["inside_diet"], true);
        assert_eq!(value["created_at"], "2022-01-01T00:00:00.000Z");
        assert_eq!(value["session_id"], "session-1");
    }

    #[test]
    fn meal_without_session_serializes_null() {
        let meal = Meal {
            id: Uuid::new_v4(),
            name: "Dinner".into(),
            description: "Salmon".into(),
            inside_diet: false,
            created_at: "2022-01-01T00:00:00.000Z".into(),
            session_id: None,
        };

        let value = serde_json::to_value(&meal).expect("serialize");
        assert!(value["session_id"].is_null());
    }
}
