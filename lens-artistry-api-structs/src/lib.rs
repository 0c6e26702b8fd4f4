pub const DEFAULT_RATING: i16 = 5;

/// A review as submitted by a client, before moderation.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ReviewSubmission {
    pub client_name: String,
    pub review_text: String,
    #[serde(default = "default_rating")]
    pub rating: i16,
}

fn default_rating() -> i16 {
    DEFAULT_RATING
}

#[derive(Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ReviewCreated {
    pub message: String,
    pub id: i32,
}

#[derive(Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct PortfolioImage {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: Option<String>,
    pub display_order: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Review {
    pub id: i32,
    pub client_name: String,
    pub review_text: String,
    pub rating: i16,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Service {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price_from: i32,
    pub icon_name: String,
    pub display_order: i32,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct PortfolioResponse {
    pub images: Vec<PortfolioImage>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct ServicesResponse {
    pub services: Vec<Service>,
}
