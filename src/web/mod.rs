pub mod api;
pub mod html;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    // Preflight requests match no route, so CORS wraps the whole server.
    app.with(api::cors());

    html::mount(app);
    api::mount(app.at("/api"));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use structopt::StructOpt;
    use tide::http::{Method, Request, Response, Url};
    use tide::StatusCode;

    use crate::{Args, State};

    fn test_app() -> tide::Server<State> {
        let template_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        let args = Args::from_iter(vec![
            "lens-artistry",
            "--database-url",
            "postgres://localhost:1/lens_artistry",
            "--base-url",
            "https://lensartistry.ru",
        ]);
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&args.database_url)
            .expect("lazy pool");

        let state = State {
            args: Arc::new(args),
            db,
            tera: Arc::new(crate::load_templates(&template_path).expect("templates parse")),
            cache_busting_string: None,
        };
        let mut app = tide::with_state(state);
        super::mount(&mut app);
        app
    }

    fn url(path: &str) -> Url {
        Url::parse("http://localhost")
            .and_then(|base| base.join(path))
            .expect("valid url")
    }

    #[async_std::test]
    async fn blank_review_is_rejected() {
        let app = test_app();
        let mut req = Request::new(Method::Post, url("/api/v1/reviews"));
        req.set_body(tide::Body::from_json(&serde_json::json!({
            "client_name": "  ",
            "review_text": "Отлично",
        }))
        .unwrap());

        let mut res: Response = app.respond(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BadRequest);
        let body: lens_artistry_api_structs::ApiError = res.body_json().await.unwrap();
        assert_eq!(body.error, "Имя и текст отзыва обязательны");
    }

    #[async_std::test]
    async fn out_of_scale_rating_is_rejected() {
        let app = test_app();
        let mut req = Request::new(Method::Post, url("/api/v1/reviews"));
        req.set_body(tide::Body::from_json(&serde_json::json!({
            "client_name": "Анна",
            "review_text": "Спасибо",
            "rating": 9,
        }))
        .unwrap());

        let res: Response = app.respond(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BadRequest);
    }

    #[async_std::test]
    async fn unknown_category_is_a_bad_request() {
        let app = test_app();

        let req = Request::new(Method::Get, url("/api/v1/portfolio?category=food"));
        let res: Response = app.respond(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BadRequest);

        let req = Request::new(Method::Get, url("/album?category=food&photo=0"));
        let res: Response = app.respond(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BadRequest);
    }

    #[async_std::test]
    async fn moderation_requires_a_secret_key() {
        let app = test_app();
        let mut req = Request::new(Method::Post, url("/api/v1/review/by-id/1/published"));
        req.set_body(tide::Body::from_json(&true).unwrap());

        let res: Response = app.respond(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::Unauthorized);
    }
}
