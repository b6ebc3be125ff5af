use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::models::{CategoryRevenue, ProductStats, RepositoryResult, SalesReport, UserStatistics};

/// Read-only access to the analytics collections
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Sales reports, most recent first
    async fn sales_reports(&self) -> RepositoryResult<Vec<SalesReport>>;

    async fn product_stats(&self) -> RepositoryResult<Vec<ProductStats>>;

    async fn user_statistics(&self) -> RepositoryResult<Vec<UserStatistics>>;

    async fn category_revenue(&self) -> RepositoryResult<Vec<CategoryRevenue>>;
}

/// Analytics collections fixed at process start
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyticsRepository {
    sales_reports: Vec<SalesReport>,
    product_stats: Vec<ProductStats>,
    user_statistics: Vec<UserStatistics>,
    category_revenue: Vec<CategoryRevenue>,
}

impl StaticAnalyticsRepository {
    pub fn new(
        sales_reports: Vec<SalesReport>,
        product_stats: Vec<ProductStats>,
        user_statistics: Vec<UserStatistics>,
        category_revenue: Vec<CategoryRevenue>,
    ) -> Self {
        Self {
            sales_reports,
            product_stats,
            user_statistics,
            category_revenue,
        }
    }

    /// The sample dataset served by the analytics service
    pub fn with_sample_data() -> Self {
        Self::new(
            sample_sales_reports(),
            sample_product_stats(),
            sample_user_statistics(),
            sample_category_revenue(),
        )
    }
}

#[async_trait]
impl AnalyticsRepository for StaticAnalyticsRepository {
    async fn sales_reports(&self) -> RepositoryResult<Vec<SalesReport>> {
        Ok(self.sales_reports.clone())
    }

    async fn product_stats(&self) -> RepositoryResult<Vec<ProductStats>> {
        Ok(self.product_stats.clone())
    }

    async fn user_statistics(&self) -> RepositoryResult<Vec<UserStatistics>> {
        Ok(self.user_statistics.clone())
    }

    async fn category_revenue(&self) -> RepositoryResult<Vec<CategoryRevenue>> {
        Ok(self.category_revenue.clone())
    }
}

// Evaluated at compile time, so a bad literal fails the build.
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid sample date"),
    }
}

const Q4_2023: (NaiveDate, NaiveDate) = (date(2023, 10, 1), date(2023, 12, 31));
const Q3_2023: (NaiveDate, NaiveDate) = (date(2023, 7, 1), date(2023, 9, 30));
const USER1_ORDERS: (NaiveDate, NaiveDate) = (date(2023, 1, 15), date(2023, 12, 20));
const USER2_ORDERS: (NaiveDate, NaiveDate) = (date(2023, 3, 10), date(2023, 11, 30));

fn sample_sales_reports() -> Vec<SalesReport> {
    let generated_at = Utc::now();
    vec![
        SalesReport {
            id: "report1".to_string(),
            period: "2023-Q4".to_string(),
            start_date: Q4_2023.0,
            end_date: Q4_2023.1,
            total_revenue: 145000.50,
            total_orders: 1250,
            average_order_value: 116.00,
            generated_at,
        },
        SalesReport {
            id: "report2".to_string(),
            period: "2023-Q3".to_string(),
            start_date: Q3_2023.0,
            end_date: Q3_2023.1,
            total_revenue: 132000.25,
            total_orders: 1180,
            average_order_value: 111.86,
            generated_at,
        },
    ]
}

fn sample_product_stats() -> Vec<ProductStats> {
    vec![
        ProductStats {
            product_id: "prod1".to_string(),
            product_name: "Laptop Pro".to_string(),
            category: "Electronics".to_string(),
            total_sold: 450,
            total_revenue: 67500.00,
            average_rating: 4.5,
            views: 12500,
            conversion_rate: 3.6,
        },
        ProductStats {
            product_id: "prod2".to_string(),
            product_name: "Wireless Headphones".to_string(),
            category: "Audio".to_string(),
            total_sold: 890,
            total_revenue: 44500.00,
            average_rating: 4.2,
            views: 8900,
            conversion_rate: 10.0,
        },
        ProductStats {
            product_id: "prod3".to_string(),
            product_name: "Gaming Mouse".to_string(),
            category: "Gaming".to_string(),
            total_sold: 320,
            total_revenue: 8000.00,
            average_rating: 4.7,
            views: 5600,
            conversion_rate: 5.7,
        },
    ]
}

fn sample_user_statistics() -> Vec<UserStatistics> {
    vec![
        UserStatistics {
            user_id: "user1".to_string(),
            username: "john_doe".to_string(),
            total_orders: 15,
            total_spent: 2340.50,
            average_order_value: 156.03,
            first_order_date: USER1_ORDERS.0,
            last_order_date: USER1_ORDERS.1,
            favorite_category: "Electronics".to_string(),
            status: "premium".to_string(),
        },
        UserStatistics {
            user_id: "user2".to_string(),
            username: "jane_smith".to_string(),
            total_orders: 8,
            total_spent: 890.25,
            average_order_value: 111.28,
            first_order_date: USER2_ORDERS.0,
            last_order_date: USER2_ORDERS.1,
            favorite_category: "Fashion".to_string(),
            status: "regular".to_string(),
        },
    ]
}

fn sample_category_revenue() -> Vec<CategoryRevenue> {
    [
        ("Electronics", 95000.00, 65.5),
        ("Fashion", 25000.50, 17.2),
        ("Home & Garden", 15000.75, 10.3),
        ("Sports", 7500.25, 5.2),
        ("Books", 2499.00, 1.8),
    ]
    .into_iter()
    .map(|(category, revenue, percentage)| CategoryRevenue {
        category: category.to_string(),
        revenue,
        percentage,
    })
    .collect()
}
