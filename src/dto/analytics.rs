use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerAnalytics {
    pub total_revenue: f64,
    pub total_sales: i64,
    pub top_product: Option<String>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
}
