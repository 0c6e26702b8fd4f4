use sqlx::{FromRow, PgConnection};
use time::OffsetDateTime;

use super::Error;
use crate::models;
use crate::models::portfolio::CategoryFilter;
use crate::models::reviews::{NewReview, ReviewId};

#[derive(Debug, FromRow)]
pub struct PortfolioImage {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, FromRow)]
pub struct Review {
    pub id: i32,
    pub client_name: String,
    pub review_text: String,
    pub rating: i16,
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, FromRow)]
pub struct Service {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price_from: i32,
    pub icon_name: String,
    pub display_order: i32,
}

#[async_trait::async_trait]
pub trait PortfolioProvider {
    async fn get_portfolio_images(
        &mut self,
        filter: CategoryFilter,
    ) -> Result<Vec<models::portfolio::PortfolioImage>, Error>;

    async fn get_published_reviews(&mut self) -> Result<Vec<models::reviews::Review>, Error>;

    async fn get_active_services(&mut self) -> Result<Vec<models::services::Service>, Error>;

    async fn insert_review(&mut self, review: &NewReview) -> Result<ReviewId, Error>;

    async fn set_review_published(
        &mut self,
        review_id: ReviewId,
        published: bool,
    ) -> Result<bool, Error>;
}

#[async_trait::async_trait]
impl PortfolioProvider for PgConnection {
    async fn get_portfolio_images(
        &mut self,
        filter: CategoryFilter,
    ) -> Result<Vec<models::portfolio::PortfolioImage>, Error> {
        let mut query = r#"
            SELECT
                id, title, url, category, description, display_order
            FROM
                portfolio_images
        "#
        .to_string();

        if filter.category().is_some() {
            query.push_str("    WHERE category = $1\n");
        }

        query.push_str(
            r#"
            ORDER BY
                display_order ASC, id ASC
        "#,
        );

        let mut query = sqlx::query_as(&query);
        if let Some(category) = filter.category() {
            query = query.bind(category.as_str());
        }
        let rows: Vec<PortfolioImage> = query.fetch_all(self).await?;

        let images = rows
            .into_iter()
            .map(models::portfolio::PortfolioImage::try_from)
            .collect::<Result<_, _>>()?;
        Ok(images)
    }


    async fn get_published_reviews(&mut self) -> Result<Vec<models::reviews::Review>, Error> {
        let rows: Vec<Review> = sqlx::query_as(
            r#"
                SELECT
                    id, client_name, review_text, rating, created_at
                FROM
                    reviews
                WHERE
                    is_published = true
                ORDER BY
                    created_at DESC
            "#,
        )
        .fetch_all(self)
        .await?;

        Ok(rows.into_iter().map(models::reviews::Review::from).collect())
    }


    async fn get_active_services(&mut self) -> Result<Vec<models::services::Service>, Error> {
        let rows: Vec<Service> = sqlx::query_as(
            r#"
                SELECT
                    id, title, description, price_from, icon_name, display_order
                FROM
                    services
                WHERE
                    is_active = true
                ORDER BY
                    display_order ASC
            "#,
        )
        .fetch_all(self)
        .await?;

        let services = rows
            .into_iter()
            .map(models::services::Service::try_from)
            .collect::<Result<_, _>>()?;
        Ok(services)
    }


    async fn insert_review(&mut self, review: &NewReview) -> Result<ReviewId, Error> {
        let (id,): (ReviewId,) = sqlx::query_as(
            r#"
                INSERT INTO reviews
                    (client_name, review_text, rating, is_published)
                VALUES
                    ($1, $2, $3, false)
                RETURNING
                    id
            "#,
        )
        .bind(&review.client_name)
        .bind(&review.review_text)
        .bind(review.rating)
        .fetch_one(self)
        .await?;

        Ok(id)
    }


    async fn set_review_published(
        &mut self,
        review_id: ReviewId,
        published: bool,
    ) -> Result<bool, Error> {
        let res = sqlx::query(
            r#"
                UPDATE
                    reviews
                SET
                    is_published = $1
                WHERE
                    reviews.id = $2
            "#,
        )
        .bind(published)
        .bind(review_id)
        .execute(self)
        .await?;

        Ok(res.rows_affected() > 0)
    }
}
