use crate::domain::policy::ValidationMode;
use super::commands::WriteReview;
use super::errors::ReviewError;
use super::value_objects::Review;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewRules {
    mode: ValidationMode,
}

impl ReviewRules {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Validate input and build the review. The order-history gate is checked
    /// by the engine afterwards, since it needs the order store.
    pub fn draft(&self, command: &WriteReview) -> Result<Review, ReviewError> {
        if command.menu_name.is_empty() {
            return Err(ReviewError::EmptyMenuName);
        }
        if command.comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        let grade = self.mode.parse_integer("grade", &command.grade)?;

        Ok(Review {
            menu_name: command.menu_name.clone(),
            grade,
            comment: command.comment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(menu: &str, grade: &str, comment: &str) -> WriteReview {
        WriteReview {
            menu_name: menu.to_string(),
            grade: grade.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_draft_review() {
        let review = ReviewRules::default().draft(&write("Whopper", "5", "great")).unwrap();
        assert_eq!(review.menu_name, "Whopper");
        assert_eq!(review.grade, 5);
        assert_eq!(review.comment, "great");
    }

    #[test]
    fn test_required_fields() {
        let rules = ReviewRules::default();
        assert!(matches!(rules.draft(&write("", "5", "great")), Err(ReviewError::EmptyMenuName)));
        assert!(matches!(rules.draft(&write("Whopper", "5", "")), Err(ReviewError::EmptyComment)));
    }

    #[test]
    fn test_unparsable_grade_by_mode() {
        let lenient = ReviewRules::new(ValidationMode::Lenient)
            .draft(&write("Whopper", "excellent", "great"))
            .unwrap();
        assert_eq!(lenient.grade, 0);

        let strict = ReviewRules::new(ValidationMode::Strict).draft(&write("Whopper", "excellent", "great"));
        assert!(matches!(strict, Err(ReviewError::Malformed(_))));
    }
}
