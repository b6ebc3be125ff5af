// Re-export all model types
pub use self::analytics::*;
pub use self::errors::*;
pub use self::product::*;
pub use self::validation::*;

mod analytics;
mod errors;
mod product;
mod validation;
