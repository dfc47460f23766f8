//! Profile repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;

/// Repository for profile lookups backing login and the route guard.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an active profile by email for login.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT id, email, password_hash, role, display_name, is_active, created_at, updated_at
            FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a profile by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT id, email, password_hash, role, display_name, is_active, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Fetches only the role string of an active profile. Used by the
    /// route guard on every protected request.
    pub async fn fetch_role(&self, id: Uuid) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT role
            FROM profiles
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Creates a profile. Used by seeding and tests.
    pub async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        role: &str,
        display_name: &str,
    ) -> Result<ProfileEntity, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO profiles (email, password_hash, role, display_name, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, email, password_hash, role, display_name, is_active, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
    }
}
