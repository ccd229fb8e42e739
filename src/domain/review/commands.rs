// ============================================================================
// Review Commands - customer intent, grade still raw form text
// ============================================================================

#[derive(Debug, Clone)]
pub struct WriteReview {
    pub menu_name: String,
    pub grade: String,
    pub comment: String,
}
