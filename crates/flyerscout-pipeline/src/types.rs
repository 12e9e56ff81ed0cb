/// A fully enriched, priced candidate ready for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedItem {
    pub name: String,
    /// Always finite and non-negative. `0.0` is the sentinel for "no usable
    /// price in the source data" and cannot be told apart from a genuinely
    /// free item; it also sorts first.
    pub price: f64,
    /// Free-text promotion description. Empty when the source had none.
    pub sale_story: String,
    pub merchant: String,
}
