use crate::domain::review::{Review, ReviewError, WriteReview};
use super::{EngineError, OrderLifecycleEngine};

// ============================================================================
// Review Operations - gated by order history
// ============================================================================

impl OrderLifecycleEngine {
    /// Insert a review. Only menus with at least one stored order can be reviewed.
    pub async fn write_review(&self, command: WriteReview) -> Result<Review, EngineError> {
        self.observe("write_review", self.run_write_review(command)).await
    }

    /// The first stored review for a menu
    pub async fn get_review(&self, menu_name: &str) -> Result<Review, EngineError> {
        self.observe("get_review", self.run_get_review(menu_name)).await
    }

    async fn run_write_review(&self, command: WriteReview) -> Result<Review, EngineError> {
        let review = self.review_rules.draft(&command)?;

        let ordered = self
            .store_call(
                "orders.find_latest_by_menu_name",
                self.stores.orders.find_latest_by_menu_name(&review.menu_name),
            )
            .await?;
        if ordered.is_none() {
            return Err(ReviewError::NotOrdered(review.menu_name).into());
        }

        self.store_call("reviews.insert", self.stores.reviews.insert(review.clone()))
            .await?;

        tracing::info!(menu_name = %review.menu_name, grade = review.grade, "✅ Review written");
        Ok(review)
    }

    async fn run_get_review(&self, menu_name: &str) -> Result<Review, EngineError> {
        if menu_name.is_empty() {
            return Err(ReviewError::EmptyMenuName.into());
        }

        let review = self
            .store_call(
                "reviews.find_by_menu_name",
                self.stores.reviews.find_by_menu_name(menu_name),
            )
            .await?;

        review.ok_or_else(|| ReviewError::NoReviewYet(menu_name.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationMode;
    use crate::engine::test_support::Harness;

    fn write(menu: &str, grade: &str, comment: &str) -> WriteReview {
        WriteReview {
            menu_name: menu.to_string(),
            grade: grade.to_string(),
            comment: comment.to_string(),
        }
    }

    #[tokio::test]
    async fn test_review_without_order_writes_nothing() {
        let harness = Harness::new(ValidationMode::Lenient);

        let err = harness.engine.write_review(write("Whopper", "5", "great")).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
        assert_eq!(err.to_string(), "you have not ordered \"Whopper\"");
        assert_eq!(harness.reviews.writes(), 0);
    }

    #[tokio::test]
    async fn test_review_after_order_round_trip() {
        let harness = Harness::new(ValidationMode::Lenient);
        harness.place("Whopper", "Seoul").await;

        let written = harness.engine.write_review(write("Whopper", "5", "great")).await.unwrap();
        let fetched = harness.engine.get_review("Whopper").await.unwrap();
        assert_eq!(written, fetched);
        assert_eq!(fetched.grade, 5);
    }

    #[tokio::test]
    async fn test_lenient_grade_falls_back_to_zero() {
        let harness = Harness::new(ValidationMode::Lenient);
        harness.place("Whopper", "Seoul").await;

        let review = harness.engine.write_review(write("Whopper", "five", "great")).await.unwrap();
        assert_eq!(review.grade, 0);
    }

    #[tokio::test]
    async fn test_invalid_review_skips_order_lookup() {
        let harness = Harness::new(ValidationMode::Strict);
        let order_reads = harness.orders.reads();

        for command in [write("", "5", "great"), write("Whopper", "5", ""), write("Whopper", "five", "great")] {
            let err = harness.engine.write_review(command).await.unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)));
        }
        assert_eq!(harness.orders.reads(), order_reads);
        assert_eq!(harness.reviews.writes(), 0);
    }

    #[tokio::test]
    async fn test_get_review_distinguishes_missing() {
        let harness = Harness::new(ValidationMode::Lenient);

        let err = harness.engine.get_review("Whopper").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
        assert!(err.to_string().starts_with("no review written yet"));

        let err = harness.engine.get_review("").await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
