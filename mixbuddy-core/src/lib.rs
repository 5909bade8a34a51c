pub mod aggregator;
pub mod cocktaildb;
pub mod error;
pub mod http;
pub mod matcher;
pub mod normalize;
pub mod source;
pub mod types;
pub mod vision;

pub use aggregator::{rank, CocktailAggregator};
pub use cocktaildb::{CocktailDbConfig, CocktailDbSource};
pub use error::{ConfigError, FetchError, SourceError};
pub use http::{
    CacheStats, CachingClient, CachingClientBuilder, HttpClient, MockClient, MockResponse,
};
pub use matcher::{evaluate, Availability};
pub use normalize::{normalize, IngredientName, Inventory};
pub use source::{FakeSource, RecipeSource};
pub use types::{Recipe, RecipeDetail, RecipeIngredient, RecipeStub, RecipeSummary};
pub use vision::{
    identify_bottles, BottleDetection, FakeDetector, GoogleVisionDetector, ImageAnnotations,
    LabelDetector, VisionConfig, VisionError,
};
