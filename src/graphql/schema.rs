use async_graphql::{Context, EmptySubscription, Object, Result, Schema};
use std::sync::Arc;

use crate::models::{
    CategoryRevenue, ProductStats, ReportGenerationResult, ReportType, SalesReport,
    UserStatistics,
};
use crate::observability::Metrics;
use crate::services::AnalyticsService;

pub type AnalyticsSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the analytics schema with the service and metrics as context data
pub fn build_schema(service: Arc<AnalyticsService>, metrics: Arc<Metrics>) -> AnalyticsSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .data(metrics)
        .finish()
}

fn analytics<'a>(ctx: &Context<'a>) -> Result<&'a Arc<AnalyticsService>> {
    ctx.data::<Arc<AnalyticsService>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Sales report whose period contains `startDate`, or the most recent
    /// report when either date is omitted. Dates are `YYYY-MM-DD`.
    async fn sales_report(
        &self,
        ctx: &Context<'_>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<Option<SalesReport>> {
        Ok(analytics(ctx)?
            .sales_report(start_date.as_deref(), end_date.as_deref())
            .await?)
    }

    async fn sales_reports(&self, ctx: &Context<'_>) -> Result<Vec<SalesReport>> {
        Ok(analytics(ctx)?.sales_reports().await?)
    }

    /// Products ranked by total revenue, highest first
    async fn top_products(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 10)] limit: i32,
    ) -> Result<Vec<ProductStats>> {
        Ok(analytics(ctx)?.top_products(limit).await?)
    }

    async fn user_statistics(
        &self,
        ctx: &Context<'_>,
        user_id: Option<String>,
    ) -> Result<Option<UserStatistics>> {
        Ok(analytics(ctx)?.user_statistics(user_id.as_deref()).await?)
    }

    async fn all_user_statistics(&self, ctx: &Context<'_>) -> Result<Vec<UserStatistics>> {
        Ok(analytics(ctx)?.all_user_statistics().await?)
    }

    async fn revenue_by_category(&self, ctx: &Context<'_>) -> Result<Vec<CategoryRevenue>> {
        Ok(analytics(ctx)?.revenue_by_category().await?)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Request a report. The outcome is reported in the result; `params`
    /// must be a JSON document when present.
    async fn generate_report(
        &self,
        ctx: &Context<'_>,
        report_type: String,
        start_date: Option<String>,
        end_date: Option<String>,
        params: Option<String>,
    ) -> Result<ReportGenerationResult> {
        let result = analytics(ctx)?.generate_report(
            &report_type,
            start_date.as_deref(),
            end_date.as_deref(),
            params.as_deref(),
        );

        if let Some(metrics) = ctx.data_opt::<Arc<Metrics>>() {
            // Free-form tags would make the label set unbounded
            let label = report_type
                .parse::<ReportType>()
                .map(|known| known.to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            metrics.record_report_request(&label, result.success);
        }

        Ok(result)
    }
}
