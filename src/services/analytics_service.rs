use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    non_empty, parse_report_date, AnalyticsSummary, CategoryRevenue, ProductStats,
    ReportGenerationResult, ReportType, SalesReport, ServiceError, ServiceResult, UserStatistics,
    ValidationError,
};
use crate::repositories::AnalyticsRepository;

pub const DEFAULT_TOP_PRODUCTS_LIMIT: i32 = 10;
pub const GRAPHQL_ENDPOINT: &str = "/graphql";

/// Read-side queries over the analytics collections, plus the report stub
pub struct AnalyticsService {
    repository: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn AnalyticsRepository>) -> Self {
        Self { repository }
    }

    /// Find a sales report.
    ///
    /// With both dates, returns the first report whose period contains
    /// `start_date`; `end_date` is only checked for format. With either date
    /// missing or empty, returns the first report.
    #[instrument(skip(self))]
    pub async fn sales_report(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ServiceResult<Option<SalesReport>> {
        let reports = self.repository.sales_reports().await?;

        match (non_empty(start_date), non_empty(end_date)) {
            (Some(start_date), Some(end_date)) => {
                let start = parse_report_date("startDate", start_date)?;
                parse_report_date("endDate", end_date)?;

                Ok(reports.into_iter().find(|report| report.covers(start)))
            }
            _ => Ok(reports.into_iter().next()),
        }
    }

    #[instrument(skip(self))]
    pub async fn sales_reports(&self) -> ServiceResult<Vec<SalesReport>> {
        Ok(self.repository.sales_reports().await?)
    }

    /// Products ranked by revenue, highest first; ties keep data order
    #[instrument(skip(self))]
    pub async fn top_products(&self, limit: i32) -> ServiceResult<Vec<ProductStats>> {
        let limit = usize::try_from(limit).map_err(|_| ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: "0".to_string(),
            value: limit.to_string(),
        })?;

        let mut products = self.repository.product_stats().await?;
        products.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
        products.truncate(limit);

        Ok(products)
    }

    /// Statistics for one user, or the first user when no id is given
    #[instrument(skip(self))]
    pub async fn user_statistics(&self, user_id: Option<&str>) -> ServiceResult<Option<UserStatistics>> {
        let users = self.repository.user_statistics().await?;

        Ok(match non_empty(user_id) {
            Some(user_id) => users.into_iter().find(|user| user.user_id == user_id),
            None => users.into_iter().next(),
        })
    }

    pub async fn all_user_statistics(&self) -> ServiceResult<Vec<UserStatistics>> {
        Ok(self.repository.user_statistics().await?)
    }

    pub async fn revenue_by_category(&self) -> ServiceResult<Vec<CategoryRevenue>> {
        Ok(self.repository.category_revenue().await?)
    }

    /// Acknowledge a report request. Nothing is computed or stored; failures
    /// are reported in the result rather than as errors.
    #[instrument(skip(self, params))]
    pub fn generate_report(
        &self,
        report_type: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        params: Option<&str>,
    ) -> ReportGenerationResult {
        match check_report_request(report_type, params) {
            Ok(report_type) => {
                let report_id = format!("report_{}_{}", report_type, Utc::now().timestamp());
                crate::info_with_trace!(report_id = %report_id, "Report generation accepted");

                ReportGenerationResult::accepted(
                    report_id,
                    report_message(report_type, start_date, end_date),
                )
            }
            Err(error) => {
                crate::warn_with_trace!(error = %error, "Report generation rejected");
                ReportGenerationResult::rejected(error.to_string())
            }
        }
    }

    /// Collection counts for the REST summary endpoint
    #[instrument(skip(self))]
    pub async fn summary(&self) -> ServiceResult<AnalyticsSummary> {
        Ok(AnalyticsSummary {
            total_reports: self.repository.sales_reports().await?.len(),
            total_products_tracked: self.repository.product_stats().await?.len(),
            total_users_analyzed: self.repository.user_statistics().await?.len(),
            categories_tracked: self.repository.category_revenue().await?.len(),
            last_updated: Utc::now(),
            graphql_endpoint: GRAPHQL_ENDPOINT.to_string(),
        })
    }
}

// Params are checked before the type.
fn check_report_request(report_type: &str, params: Option<&str>) -> ServiceResult<ReportType> {
    if let Some(params) = non_empty(params) {
        serde_json::from_str::<serde_json::Value>(params)
            .map_err(|source| ServiceError::MalformedParams { source })?;
    }

    report_type
        .parse()
        .map_err(|_| ServiceError::UnknownReportType {
            report_type: report_type.to_string(),
        })
}

fn report_message(report_type: ReportType, start_date: Option<&str>, end_date: Option<&str>) -> String {
    match report_type {
        ReportType::Sales => format!(
            "Sales report generated for period {} to {}",
            start_date.unwrap_or("unspecified"),
            end_date.unwrap_or("unspecified")
        ),
        ReportType::Products => "Product performance report generated".to_string(),
        ReportType::Users => "User analytics report generated".to_string(),
        ReportType::Revenue => "Revenue breakdown report generated".to_string(),
    }
}
