// GraphQL layer - analytics schema

mod schema;

pub use schema::{build_schema, AnalyticsSchema, MutationRoot, QueryRoot};
