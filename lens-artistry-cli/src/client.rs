use serde::de::DeserializeOwned;
use surf::StatusCode;

use lens_artistry_api_structs::{
    PortfolioImage, PortfolioResponse, Review, ReviewCreated, ReviewSubmission, ReviewsResponse,
    Service, ServicesResponse,
};

/// Everything the landing page shows, as served by the API.
#[derive(Debug, Default, serde::Serialize)]
pub struct SiteContent {
    pub images: Vec<PortfolioImage>,
    pub reviews: Vec<Review>,
    pub services: Vec<Service>,
}

impl SiteContent {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("{} portfolio images", self.images.len())];
        for image in &self.images {
            lines.push(format!("  [{}] {} ({})", image.id, image.title, image.category));
        }

        lines.push(format!("{} services", self.services.len()));
        for service in &self.services {
            lines.push(format!("  {} from {}", service.title, service.price_from));
        }

        lines.push(format!("{} reviews", self.reviews.len()));
        for review in &self.reviews {
            lines.push(format!("  {} ({}/5)", review.client_name, review.rating));
        }

        lines.join("\n")
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    endpoint: String,
}

impl Client {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Client {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.endpoint, path)
    }

    fn portfolio_request(&self, category: Option<&str>) -> surf::Result<surf::RequestBuilder> {
        let request = surf::get(self.url("/portfolio"));
        match category {
            Some(category) => request.query(&PortfolioQuery { category }),
            None => Ok(request),
        }
    }

    pub async fn portfolio(&self, category: Option<&str>) -> surf::Result<Vec<PortfolioImage>> {
        let body: PortfolioResponse = get_json(self.portfolio_request(category)?).await?;
        Ok(body.images)
    }

    pub async fn reviews(&self) -> surf::Result<Vec<Review>> {
        let body: ReviewsResponse = get_json(surf::get(self.url("/reviews"))).await?;
        Ok(body.reviews)
    }

    pub async fn services(&self) -> surf::Result<Vec<Service>> {
        let body: ServicesResponse = get_json(surf::get(self.url("/services"))).await?;
        Ok(body.services)
    }

    /// Fetches the three collections concurrently. A collection that fails
    /// to load is logged and left empty.
    pub async fn site_content(&self, category: Option<&str>) -> SiteContent {
        let (images, (reviews, services)) = futures_lite::future::zip(
            or_empty("portfolio", self.portfolio(category)),
            futures_lite::future::zip(
                or_empty("reviews", self.reviews()),
                or_empty("services", self.services()),
            ),
        )
        .await;

        SiteContent {
            images,
            reviews,
            services,
        }
    }

    pub async fn submit_review(&self, submission: &ReviewSubmission) -> surf::Result<ReviewCreated> {
        let mut res = surf::post(self.url("/reviews"))
            .body(surf::Body::from_json(submission)?)
            .await?;
        ensure_success(res.status())?;
        res.body_json().await
    }

    pub async fn set_review_published(
        &self,
        secret_key: &str,
        review_id: i32,
        published: bool,
    ) -> surf::Result<()> {
        let res = surf::post(self.url(&format!("/review/by-id/{}/published", review_id)))
            .header("Authorization", format!("Bearer {}", secret_key))
            .body(surf::Body::from_json(&published)?)
            .await?;
        log::info!("Lens Artistry API response: {:#?}", res);
        ensure_success(res.status())
    }
}

#[derive(serde::Serialize)]
struct PortfolioQuery<'a> {
    category: &'a str,
}

async fn get_json<T: DeserializeOwned>(request: surf::RequestBuilder) -> surf::Result<T> {
    let mut res = request.await?;
    ensure_success(res.status())?;
    res.body_json().await
}

fn ensure_success(status: StatusCode) -> surf::Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(surf::Error::from_str(
            status,
            format!("API responded with {}", status),
        ))
    }
}

async fn or_empty<T>(
    collection: &'static str,
    fetch: impl std::future::Future<Output = surf::Result<Vec<T>>>,
) -> Vec<T> {
    match fetch.await {
        Ok(items) => items,
        Err(err) => {
            log::warn!("Failed to fetch {}: {}", collection, err);
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_dropped() {
        let client = Client::new("https://lensartistry.ru/");
        assert_eq!(client.url("/reviews"), "https://lensartistry.ru/api/v1/reviews");
    }

    #[test]
    fn portfolio_category_is_query_encoded() {
        let client = Client::new("https://lensartistry.ru");

        let request = client.portfolio_request(Some("a&b#c")).unwrap().build();
        assert_eq!(request.url().path(), "/api/v1/portfolio");
        assert_eq!(request.url().query(), Some("category=a%26b%23c"));
        assert_eq!(request.url().fragment(), None);

        let request = client.portfolio_request(None).unwrap().build();
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn non_success_status_is_an_error() {
        assert!(ensure_success(StatusCode::Created).is_ok());
        let err = ensure_success(StatusCode::BadRequest).unwrap_err();
        assert_eq!(err.status(), StatusCode::BadRequest);
    }

    #[async_std::test]
    async fn unreachable_api_yields_empty_content() {
        let client = Client::new("http://127.0.0.1:9");
        let content = client.site_content(None).await;
        assert!(content.images.is_empty());
        assert!(content.reviews.is_empty());
        assert!(content.services.is_empty());
    }

    #[test]
    fn summary_lists_every_collection() {
        let content = SiteContent {
            images: vec![PortfolioImage {
                id: 1,
                title: "Love Story".to_string(),
                url: "https://cdn.example.com/1.jpg".to_string(),
                category: "wedding".to_string(),
                description: None,
                display_order: 4,
            }],
            ..Default::default()
        };
        let summary = content.summary();
        assert!(summary.contains("1 portfolio images"));
        assert!(summary.contains("Love Story (wedding)"));
        assert!(summary.contains("0 reviews"));
    }
}
