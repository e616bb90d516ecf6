use super::Repository;
use crate::db::transaction::TransactionError;
use crate::domain::{NewQuestion, Page, PageRequest, Question, QuestionFilter};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{QueryBuilder, Row};
use tracing::debug;

const QUESTION_COLUMNS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

impl Repository {
    // =========================================================================
    // Reads
    // =========================================================================

    /// One page of questions matching `filter`, ordered by id, with the
    /// filtered total.
    pub async fn list_questions(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, sqlx::Error> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM questions");
        push_filter(&mut count, filter);
        let (total,): (i64,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new(QUESTION_COLUMNS);
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select.build().fetch_all(&self.pool).await?;

        debug!(?filter, page = page.page(), total, "Listed questions");
        Ok(Page {
            items: rows.iter().map(question_from_row).collect(),
            total,
            page: page.page(),
        })
    }

    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, sqlx::Error> {
        let row = sqlx::query(&format!("{QUESTION_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(question_from_row))
    }

    /// Ids of questions not in `excluded`, optionally restricted to one
    /// category.
    ///
    /// The exclusion list is bound once as a JSON array, so its length is not
    /// limited by SQLite's bind-variable cap.
    pub async fn quiz_candidate_ids(
        &self,
        excluded: &[i64],
        category: Option<i64>,
    ) -> Result<Vec<i64>, sqlx::Error> {
        let excluded =
            serde_json::to_string(excluded).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let mut select = QueryBuilder::<Sqlite>::new(
            "SELECT id FROM questions WHERE id NOT IN (SELECT value FROM json_each(",
        );
        select.push_bind(excluded).push("))");
        if let Some(category) = category {
            select.push(" AND category = ").push_bind(category);
        }
        select.push(" ORDER BY id");

        let rows: Vec<(i64,)> = select.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a validated question and return it with its assigned id.
    pub async fn create_question(&self, new: NewQuestion) -> Result<Question, TransactionError> {
        self.executor
            .run(move |conn| {
                Box::pin(async move {
                    let result = sqlx::query(
                        r#"
                        INSERT INTO questions
                            (question, question_folded, answer, category, difficulty)
                        VALUES (?, ?, ?, ?, ?)
                        "#,
                    )
                    .bind(new.question.as_str())
                    .bind(new.question.to_lowercase())
                    .bind(new.answer.as_str())
                    .bind(new.category.as_i64())
                    .bind(new.difficulty)
                    .execute(&mut *conn)
                    .await?;

                    Ok(Question {
                        id: result.last_insert_rowid(),
                        question: new.question,
                        answer: new.answer,
                        category: new.category.as_i64(),
                        difficulty: new.difficulty,
                    })
                })
            })
            .await
    }

    /// Delete a question by id.
    ///
    /// Deleting nothing fails the unit of work, which covers a row removed
    /// between the caller's existence check and this transaction.
    pub async fn delete_question(&self, id: i64) -> Result<(), TransactionError> {
        self.executor
            .run(move |conn| {
                Box::pin(async move {
                    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
                        .bind(id)
                        .execute(&mut *conn)
                        .await?;
                    if result.rows_affected() == 0 {
                        return Err(sqlx::Error::RowNotFound);
                    }
                    Ok(())
                })
            })
            .await
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &QuestionFilter) {
    match filter {
        QuestionFilter::All => {}
        QuestionFilter::Search(term) => {
            builder
                .push(" WHERE question_folded LIKE ")
                .push_bind(format!("%{}%", escape_like(&term.to_lowercase())))
                .push(" ESCAPE '\\'");
        }
        QuestionFilter::Category(id) => {
            builder.push(" WHERE category = ").push_bind(*id);
        }
    }
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn question_from_row(row: &SqliteRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
    }
}
