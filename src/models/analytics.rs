use async_graphql::SimpleObject;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregated sales over one reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct SalesReport {
    pub id: String,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: f64,
    pub total_orders: i32,
    pub average_order_value: f64,
    pub generated_at: DateTime<Utc>,
}

impl SalesReport {
    /// Inclusive containment of a single date in the report period
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Sales performance of a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct ProductStats {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub total_sold: i32,
    pub total_revenue: f64,
    pub average_rating: f64,
    pub views: i32,
    pub conversion_rate: f64,
}

/// Purchase history summary of a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct UserStatistics {
    pub user_id: String,
    pub username: String,
    pub total_orders: i32,
    pub total_spent: f64,
    pub average_order_value: f64,
    pub first_order_date: NaiveDate,
    pub last_order_date: NaiveDate,
    pub favorite_category: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
    pub percentage: f64,
}

/// Report kinds accepted by the report generation mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Sales,
    Products,
    Users,
    Revenue,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Sales => write!(f, "sales"),
            ReportType::Products => write!(f, "products"),
            ReportType::Users => write!(f, "users"),
            ReportType::Revenue => write!(f, "revenue"),
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    // Tags are matched exactly, "Sales" is not a known type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(ReportType::Sales),
            "products" => Ok(ReportType::Products),
            "users" => Ok(ReportType::Users),
            "revenue" => Ok(ReportType::Revenue),
            _ => Err(format!("Unknown report type: {}", s)),
        }
    }
}

/// Acknowledgment returned by the report generation mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct ReportGenerationResult {
    pub success: bool,
    pub report_id: Option<String>,
    pub message: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportGenerationResult {
    pub fn accepted(report_id: String, message: String) -> Self {
        Self {
            success: true,
            report_id: Some(report_id),
            message,
            generated_at: Utc::now(),
        }
    }

    pub fn rejected(message: String) -> Self {
        Self {
            success: false,
            report_id: None,
            message,
            generated_at: Utc::now(),
        }
    }
}

/// Collection counts served by the REST summary endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_reports: usize,
    pub total_products_tracked: usize,
    pub total_users_analyzed: usize,
    pub categories_tracked: usize,
    pub last_updated: DateTime<Utc>,
    pub graphql_endpoint: String,
}
