use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use lens_artistry_api_structs::ReviewSubmission;

pub type ReviewId = i32;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub client_name: String,
    pub review_text: String,
    pub rating: i16,
    pub created_at: Option<OffsetDateTime>,
}

impl Review {
    /// Number of stars to draw, clamped to the rating scale.
    pub fn stars(&self) -> usize {
        self.rating.clamp(0, MAX_RATING) as usize
    }
}

impl From<crate::db::portfolio::Review> for Review {
    fn from(row: crate::db::portfolio::Review) -> Self {
        Review {
            id: row.id,
            client_name: row.client_name,
            review_text: row.review_text,
            rating: row.rating,
            created_at: row.created_at,
        }
    }
}

impl From<Review> for lens_artistry_api_structs::Review {
    fn from(review: Review) -> Self {
        let created_at = review.created_at.and_then(|created_at| {
            created_at
                .format(&time::format_description::well_known::Rfc3339)
                .ok()
        });

        lens_artistry_api_structs::Review {
            id: review.id,
            client_name: review.client_name,
            review_text: review.review_text,
            rating: review.rating,
            created_at,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewRejection {
    #[error("Имя и текст отзыва обязательны")]
    MissingFields,
    #[error("Оценка должна быть от 1 до 5")]
    RatingOutOfRange(i16),
}

/// A submission that passed validation, ready to be stored for moderation.
#[derive(Debug, PartialEq, Eq)]
pub struct NewReview {
    pub client_name: String,
    pub review_text: String,
    pub rating: i16,
}

impl TryFrom<ReviewSubmission> for NewReview {
    type Error = ReviewRejection;

    fn try_from(submission: ReviewSubmission) -> Result<Self, Self::Error> {
        let client_name = submission.client_name.trim();
        let review_text = submission.review_text.trim();

        if client_name.is_empty() || review_text.is_empty() {
            return Err(ReviewRejection::MissingFields);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&submission.rating) {
            return Err(ReviewRejection::RatingOutOfRange(submission.rating));
        }

        Ok(NewReview {
            client_name: client_name.to_string(),
            review_text: review_text.to_string(),
            rating: submission.rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, text: &str, rating: i16) -> ReviewSubmission {
        ReviewSubmission {
            client_name: name.to_string(),
            review_text: text.to_string(),
            rating,
        }
    }

    #[test]
    fn submission_is_trimmed() {
        let review = NewReview::try_from(submission("  Михаил ", " Рекомендую всем!\n", 5)).unwrap();
        assert_eq!(review.client_name, "Михаил");
        assert_eq!(review.review_text, "Рекомендую всем!");
    }

    #[test]
    fn blank_name_or_text_is_rejected() {
        assert_eq!(
            NewReview::try_from(submission("   ", "Отлично", 5)),
            Err(ReviewRejection::MissingFields)
        );
        assert_eq!(
            NewReview::try_from(submission("Екатерина", "", 5)),
            Err(ReviewRejection::MissingFields)
        );
    }

    #[test]
    fn rating_must_be_on_scale() {
        assert_eq!(
            NewReview::try_from(submission("Анна", "Спасибо", 0)),
            Err(ReviewRejection::RatingOutOfRange(0))
        );
        assert_eq!(
            NewReview::try_from(submission("Анна", "Спасибо", 6)),
            Err(ReviewRejection::RatingOutOfRange(6))
        );
    }

    #[test]
    fn api_review_carries_rfc3339_timestamp() {
        let review = Review {
            id: 1,
            client_name: "Анна и Дмитрий".to_string(),
            review_text: "Потрясающие фотографии!".to_string(),
            rating: 5,
            created_at: Some(OffsetDateTime::UNIX_EPOCH),
        };
        assert_eq!(review.stars(), 5);

        let api: lens_artistry_api_structs::Review = review.into();
        assert_eq!(api.created_at.as_deref(), Some("1970-01-01T00:00:00Z"));
    }
}
