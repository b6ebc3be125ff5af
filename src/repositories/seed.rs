use rust_decimal_macros::dec;

use crate::models::CreateProductRequest;

/// Products loaded into the catalog at startup
pub fn sample_catalog() -> Vec<CreateProductRequest> {
    vec![
        CreateProductRequest {
            name: "Laptop Dell XPS 15".to_string(),
            description: Some("High-performance laptop with 16GB RAM and 512GB SSD".to_string()),
            price: dec!(1499.99),
            category: Some("Electronics".to_string()),
            stock: 25,
        },
        CreateProductRequest {
            name: "iPhone 14 Pro".to_string(),
            description: Some("Latest Apple smartphone with advanced camera system".to_string()),
            price: dec!(999.99),
            category: Some("Electronics".to_string()),
            stock: 50,
        },
        CreateProductRequest {
            name: "Nike Air Max 2023".to_string(),
            description: Some("Comfortable running shoes with air cushioning".to_string()),
            price: dec!(179.99),
            category: Some("Footwear".to_string()),
            stock: 100,
        },
        CreateProductRequest {
            name: "Samsung 4K Smart TV 55\"".to_string(),
            description: Some("Ultra HD Smart TV with HDR support".to_string()),
            price: dec!(799.99),
            category: Some("Electronics".to_string()),
            stock: 15,
        },
        CreateProductRequest {
            name: "Coffee Maker Pro".to_string(),
            description: Some("Automatic espresso machine with milk frother".to_string()),
            price: dec!(249.99),
            category: Some("Home Appliances".to_string()),
            stock: 40,
        },
    ]
}
