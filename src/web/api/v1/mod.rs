use serde::Deserialize;
use tide::{Request, Response, StatusCode};

use crate::db::portfolio::PortfolioProvider;
use crate::models::portfolio::CategoryFilter;
use crate::models::reviews::NewReview;
use crate::web::api::utils::{error_response, validate_secret_key};
use lens_artistry_api_structs::{
    PortfolioResponse, ReviewCreated, ReviewSubmission, ReviewsResponse, ServicesResponse,
};

pub(super) fn mount(mut route: tide::Route<crate::State>) {
    route.at("/portfolio").get(get_portfolio);
    route.at("/services").get(get_services);

    route.at("/reviews").get(get_reviews).post(submit_review);
    route
        .at("/review/by-id/:review_id/published")
        .post(update_review_published);
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PortfolioQueryParams {
    category: CategoryFilter,
}

async fn get_portfolio(req: Request<crate::State>) -> tide::Result<Response> {
    let query: PortfolioQueryParams = req.query()?;

    let mut conn = req.state().db.acquire().await?;
    let images = conn.get_portfolio_images(query.category).await?;

    let body = PortfolioResponse {
        images: images.into_iter().map(Into::into).collect(),
    };
    Ok(Response::builder(StatusCode::Ok)
        .body(tide::Body::from_json(&body)?)
        .build())
}

async fn get_reviews(req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;
    let reviews = conn.get_published_reviews().await?;

    let body = ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
    };
    Ok(Response::builder(StatusCode::Ok)
        .body(tide::Body::from_json(&body)?)
        .build())
}

async fn get_services(req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;
    let services = conn.get_active_services().await?;

    let body = ServicesResponse {
        services: services.into_iter().map(Into::into).collect(),
    };
    Ok(Response::builder(StatusCode::Ok)
        .body(tide::Body::from_json(&body)?)
        .build())
}

async fn submit_review(mut req: Request<crate::State>) -> tide::Result<Response> {
    let submission: ReviewSubmission = match req.body_json().await {
        Ok(submission) => submission,
        Err(err) => return error_response(StatusCode::BadRequest, err),
    };

    let review = match NewReview::try_from(submission) {
        Ok(review) => review,
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected review submission");
            return error_response(StatusCode::BadRequest, rejection);
        },
    };

    let mut conn = req.state().db.acquire().await?;
    let id = conn.insert_review(&review).await?;
    tracing::info!(review_id = id, "review submitted for moderation");

    let body = ReviewCreated {
        message: "Отзыв отправлен на модерацию".to_string(),
        id,
    };
    Ok(Response::builder(StatusCode::Created)
        .body(tide::Body::from_json(&body)?)
        .build())
}

async fn update_review_published(mut req: Request<crate::State>) -> tide::Result<Response> {
    require_valid_secret_key!(req);

    let published: bool = req.body_json().await?;
    tracing::debug!(published, "received review published payload");

    let review_id: i32 = req.param("review_id")?.parse()?;
    let mut conn = req.state().db.acquire().await?;
    if !conn.set_review_published(review_id, published).await? {
        return Ok(Response::builder(StatusCode::NotFound).build());
    }

    Ok(Response::builder(StatusCode::Ok)
        .body(tide::convert::json!({
            "published": published,
        }))
        .build())
}
