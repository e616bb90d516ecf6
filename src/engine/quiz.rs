//! Random, non-repeating quiz question selection.
//!
//! The selector keeps no state between draws: the caller supplies every id it
//! has already served, and each draw is uniform over whatever remains.

use crate::db::Repository;
use crate::domain::Question;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// Draws the next quiz question.
pub struct QuizSelector {
    repo: Arc<Repository>,
}

impl QuizSelector {
    pub fn new(repo: Arc<Repository>) -> Self {
        QuizSelector { repo }
    }

    /// Pick a random question whose id is not in `previous_questions`,
    /// restricted to `category` when given.
    ///
    /// Candidates are loaded as ids only and the chosen row is fetched
    /// afterwards. Returns `Ok(None)` when no candidate remains.
    pub async fn next_question(
        &self,
        previous_questions: &[i64],
        category: Option<i64>,
    ) -> Result<Option<Question>, sqlx::Error> {
        let mut excluded = previous_questions.to_vec();
        loop {
            let ids = self.repo.quiz_candidate_ids(&excluded, category).await?;
            let picked = pick_uniform(ids, &mut rand::thread_rng());
            let Some(id) = picked else {
                debug!(excluded = excluded.len(), ?category, "Quiz exhausted");
                return Ok(None);
            };

            // A question deleted between the two reads is skipped.
            if let Some(question) = self.repo.get_question(id).await? {
                debug!(
                    excluded = excluded.len(),
                    ?category,
                    picked = id,
                    "Selected quiz question"
                );
                return Ok(Some(question));
            }
            excluded.push(id);
        }
    }
}

/// Take one element uniformly at random.
pub fn pick_uniform<T, R>(mut candidates: Vec<T>, rng: &mut R) -> Option<T>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}
