use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::errors::LookupError;
use crate::questions::{decode_questions, QuestionLookup};

/// Reads question sets from the `questions` table. The `question` column may
/// be JSON, JSONB or text; it is read as text and decoded here.
#[derive(Clone)]
pub struct PgQuestionLookup {
    pool: PgPool,
}

impl PgQuestionLookup {
    pub async fn connect(database_url: &str) -> Result<Self, LookupError> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl QuestionLookup for PgQuestionLookup {
    async fn questions(&self, role: &str, organization: &str) -> Result<Vec<String>, LookupError> {
        let row: Option<Option<String>> = sqlx::query_scalar(
            "SELECT question::text FROM questions WHERE role = $1 AND organization = $2 LIMIT 1",
        )
        .bind(role)
        .bind(organization)
        .fetch_optional(&self.pool)
        .await?;

        match row.flatten() {
            Some(raw) => {
                let questions = decode_questions(&raw)?;
                debug!("Loaded {} questions for {role} at {organization}", questions.len());
                Ok(questions)
            }
            None => {
                debug!("No question row for {role} at {organization}");
                Ok(vec![])
            }
        }
    }
}
