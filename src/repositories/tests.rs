#[cfg(test)]
mod repository_tests {
    use crate::models::{
        CreateProductRequest, Product, ProductFilters, RepositoryError, UpdateProductRequest,
        Validate,
    };
    use rust_decimal_macros::dec;

    use crate::repositories::analytics_repository::*;
    use crate::repositories::product_repository::*;
    use crate::repositories::seed::sample_catalog;

    fn create_test_product(name: &str, category: Option<&str>) -> Product {
        Product::new(CreateProductRequest {
            name: name.to_string(),
            description: None,
            price: dec!(10.00),
            category: category.map(str::to_string),
            stock: 5,
        })
    }

    async fn seeded_repository() -> (InMemoryProductRepository, Vec<Product>) {
        let repository = InMemoryProductRepository::new();
        let mut stored = Vec::new();
        for (name, category) in [
            ("First", Some("Electronics")),
            ("Second", Some("Footwear")),
            ("Third", Some("Electronics")),
        ] {
            stored.push(
                repository
                    .create(create_test_product(name, category))
                    .await
                    .unwrap(),
            );
        }
        (repository, stored)
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let (repository, stored) = seeded_repository().await;

        let all = repository.find_all(ProductFilters::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(all, stored);
    }

    #[tokio::test]
    async fn test_find_all_skip_then_limit() {
        let (repository, stored) = seeded_repository().await;

        let page = repository
            .find_all(ProductFilters {
                category: None,
                skip: 1,
                limit: 1,
            })
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, stored[1].id);
    }

    #[tokio::test]
    async fn test_find_all_filters_before_paginating() {
        let (repository, stored) = seeded_repository().await;

        let page = repository
            .find_all(ProductFilters {
                category: Some("Electronics".to_string()),
                skip: 1,
                limit: 10,
            })
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, stored[2].id);
    }

    #[tokio::test]
    async fn test_find_all_skip_past_end_is_empty() {
        let (repository, _) = seeded_repository().await;

        let page = repository
            .find_all(ProductFilters {
                category: None,
                skip: 10,
                limit: 10,
            })
            .await
            .unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_category_is_exact() {
        let (repository, _) = seeded_repository().await;

        assert_eq!(repository.find_by_category("Electronics").await.unwrap().len(), 2);
        assert!(repository.find_by_category("electronics").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repository = InMemoryProductRepository::new();
        let product = create_test_product("Dup", None);

        repository.create(product.clone()).await.unwrap();
        let result = repository.create(product).await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_record_in_place() {
        let (repository, stored) = seeded_repository().await;

        let mut changed = stored[0].clone();
        changed.apply_update(UpdateProductRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        });
        repository.update(changed).await.unwrap();

        let all = repository.find_all(ProductFilters::default()).await.unwrap();
        assert_eq!(all[0].name, "Renamed");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repository = InMemoryProductRepository::new();
        let result = repository.update(create_test_product("Ghost", None)).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_keeps_order_of_remaining() {
        let (repository, stored) = seeded_repository().await;

        repository.delete(&stored[0].id).await.unwrap();

        let names: Vec<String> = repository
            .find_all(ProductFilters::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Second", "Third"]);

        assert!(!repository.exists(&stored[0].id).await.unwrap());
        assert!(matches!(
            repository.delete(&stored[0].id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        let catalog = sample_catalog();

        assert_eq!(catalog.len(), 5);
        for request in &catalog {
            assert!(request.validate().is_ok(), "{} should be valid", request.name);
        }
    }

    #[tokio::test]
    async fn test_static_analytics_sample_data() {
        let repository = StaticAnalyticsRepository::with_sample_data();

        let reports = repository.sales_reports().await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].period, "2023-Q4");
        assert!(reports.iter().all(|r| r.start_date <= r.end_date));
        assert_eq!(
            reports[0].start_date,
            chrono::NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()
        );
        assert_eq!(
            reports[1].end_date,
            chrono::NaiveDate::from_ymd_opt(2023, 9, 30).unwrap()
        );

        let users = repository.user_statistics().await.unwrap();
        assert_eq!(
            users[1].first_order_date,
            chrono::NaiveDate::from_ymd_opt(2023, 3, 10).unwrap()
        );

        assert_eq!(repository.product_stats().await.unwrap().len(), 3);
        assert_eq!(repository.user_statistics().await.unwrap().len(), 2);

        let categories = repository.category_revenue().await.unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].category, "Electronics");
    }
}
