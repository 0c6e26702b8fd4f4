use std::future::Future;

use serde::{Deserialize, Serialize};
use tide::{Redirect, Request, Response, StatusCode};

use crate::album::{AlbumController, Effect, Intent, Photo};
use crate::db::portfolio::PortfolioProvider;
use crate::models::portfolio::{Category, CategoryFilter, PortfolioImage};
use crate::models::reviews::Review;
use crate::models::services::Service;
use crate::models::Icon;
use crate::State;

mod utils;

pub(in super::super) fn mount(route: &mut tide::Server<crate::State>) {
    route.at("/").get(index);
    route.at("/album").get(album);
    route.at("/sitemap.xml").get(sitemap);
}

#[derive(Serialize)]
struct NavSection {
    id: &'static str,
    label: &'static str,
}

const SECTIONS: [NavSection; 5] = [
    NavSection { id: "home", label: "Главная" },
    NavSection { id: "portfolio", label: "Портфолио" },
    NavSection { id: "services", label: "Услуги" },
    NavSection { id: "reviews", label: "Отзывы" },
    NavSection { id: "contact", label: "Контакты" },
];

async fn portfolio_images(
    state: &State,
    filter: CategoryFilter,
) -> Result<Vec<PortfolioImage>, crate::db::Error> {
    let mut conn = state.db.acquire().await?;
    conn.get_portfolio_images(filter).await
}

async fn published_reviews(state: &State) -> Result<Vec<Review>, crate::db::Error> {
    let mut conn = state.db.acquire().await?;
    conn.get_published_reviews().await
}

async fn active_services(state: &State) -> Result<Vec<Service>, crate::db::Error> {
    let mut conn = state.db.acquire().await?;
    conn.get_active_services().await
}

/// A section whose content can't be loaded is rendered empty.
async fn or_empty<T>(
    section: &'static str,
    fetch: impl Future<Output = Result<Vec<T>, crate::db::Error>>,
) -> Vec<T> {
    match fetch.await {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(section, error = %err, "failed to load section content");
            Vec::new()
        },
    }
}

#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
struct IndexQueryParams {
    category: CategoryFilter,
}

#[derive(Serialize)]
struct CategoryTab {
    value: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct ServiceCard {
    title: String,
    description: String,
    price: String,
    icon_svg: String,
}

#[derive(Serialize)]
struct ReviewCard {
    client_name: String,
    review_text: String,
    stars: Vec<String>,
}

#[derive(Serialize)]
struct SocialLink {
    href: String,
    icon_svg: String,
}

fn category_tabs(selected: CategoryFilter) -> Vec<CategoryTab> {
    std::iter::once(CategoryTab {
        value: "all",
        label: "Все",
        active: selected == CategoryFilter::All,
    })
    .chain(Category::ALL.into_iter().map(|category| CategoryTab {
        value: category.as_str(),
        label: category.label(),
        active: selected == CategoryFilter::Only(category),
    }))
    .collect()
}

fn social_links(args: &crate::Args) -> Vec<SocialLink> {
    [
        (Icon::Instagram, &args.instagram_url),
        (Icon::Facebook, &args.facebook_url),
        (Icon::MessageCircle, &args.messenger_url),
    ]
    .into_iter()
    .map(|(icon, href)| SocialLink {
        href: href.clone().unwrap_or_else(|| "#contact".to_string()),
        icon_svg: icon.svg(20),
    })
    .collect()
}

async fn index(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let query: IndexQueryParams = req.query()?;

    let (images, (reviews, services)) = futures_lite::future::zip(
        or_empty("portfolio", portfolio_images(state, query.category)),
        futures_lite::future::zip(
            or_empty("reviews", published_reviews(state)),
            or_empty("services", active_services(state)),
        ),
    )
    .await;

    let services: Vec<_> = services
        .into_iter()
        .map(|service| ServiceCard {
            price: service.price_label(),
            icon_svg: service.icon.svg(28),
            title: service.title,
            description: service.description,
        })
        .collect();

    let reviews: Vec<_> = reviews
        .into_iter()
        .map(|review| ReviewCard {
            stars: vec![Icon::Star.svg(20); review.stars()],
            client_name: review.client_name,
            review_text: review.review_text,
        })
        .collect();

    let canonical_href = match query.category {
        CategoryFilter::All => format!("{}/", state.args.base_url),
        filter => format!("{}/?category={}", state.args.base_url, filter.as_str()),
    };

    let mut context = tera::Context::new();
    context.insert("cache_buster", &state.cache_busting_string);
    context.insert("site_name", &state.args.site_name);
    context.insert("title", "Творческая фотография");
    context.insert("canonical_href", &canonical_href);
    context.insert("sections", &SECTIONS);
    context.insert("category", query.category.as_str());
    context.insert("tabs", &category_tabs(query.category));
    context.insert("images", &images);
    context.insert("services", &services);
    context.insert("reviews", &reviews);
    context.insert("contact_email", &state.args.contact_email);
    context.insert("contact_phone", &state.args.contact_phone);
    context.insert("mail_svg", &Icon::Mail.svg(24));
    context.insert("phone_svg", &Icon::Phone.svg(24));
    context.insert("social_links", &social_links(&state.args));

    let body = utils::render(state, "index.html", &context)?;
    Ok(Response::builder(StatusCode::Ok)
        .content_type("text/html")
        .body(body)
        .build())
}

#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
struct AlbumQueryParams {
    category: CategoryFilter,
    photo: usize,
    /// Keyboard intent, as the browser names the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    /// Position indicator intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    jump: Option<usize>,
}

impl AlbumQueryParams {
    fn at(category: CategoryFilter, photo: usize) -> Self {
        AlbumQueryParams {
            category,
            photo,
            ..Default::default()
        }
    }

    fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    fn with_jump(mut self, target: usize) -> Self {
        self.jump = Some(target);
        self
    }

    fn intent(&self) -> Option<Intent> {
        match (self.jump, self.key.as_deref()) {
            (Some(target), _) => Some(Intent::JumpTo(target)),
            (None, Some(key)) => Intent::from_key(key),
            (None, None) => None,
        }
    }

    fn href(&self) -> String {
        // Every field is a plain scalar.
        let qs = serde_qs::to_string(self).unwrap_or_default();
        format!("/album?{}", qs)
    }
}

#[derive(Debug)]
enum AlbumOutcome {
    NotFound,
    Redirect(String),
    Render(AlbumController),
}

/// Opens the album the query points at and applies its intent, if any.
/// Intents settle at once and end in a redirect to the resulting photo.
fn resolve_album(photos: Vec<Photo>, query: &AlbumQueryParams) -> AlbumOutcome {
    let mut controller = AlbumController::new();
    if let Err(err) = controller.open(photos, query.photo) {
        tracing::debug!(%err, "not opening album");
        return AlbumOutcome::NotFound;
    }

    let intent = match query.intent() {
        Some(intent) => intent,
        None => return AlbumOutcome::Render(controller),
    };

    match controller.dispatch(intent) {
        // A server render has no animation window to wait out.
        Effect::ScheduleSettle { ticket, .. } => {
            controller.settle(ticket);
        },
        Effect::Closed => return AlbumOutcome::Redirect("/#portfolio".to_string()),
        Effect::None => {},
    }

    let current = controller
        .state()
        .map_or(query.photo, |album_state| album_state.current_index);
    AlbumOutcome::Redirect(AlbumQueryParams::at(query.category, current).href())
}

#[derive(Serialize)]
struct IndicatorLink {
    href: String,
    active: bool,
}

async fn album(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let query: AlbumQueryParams = req.query()?;

    let photos: Vec<Photo> = portfolio_images(state, query.category)
        .await?
        .iter()
        .map(Photo::from)
        .collect();

    let controller = match resolve_album(photos, &query) {
        AlbumOutcome::NotFound => return Ok(Response::builder(StatusCode::NotFound).build()),
        AlbumOutcome::Redirect(href) => return Ok(Redirect::see_other(href).into()),
        AlbumOutcome::Render(controller) => controller,
    };

    let (photo, (ordinal, total), index) =
        match (controller.current_photo(), controller.position(), controller.state()) {
            (Some(photo), Some(position), Some(album_state)) => {
                (photo, position, album_state.current_index)
            },
            _ => return Ok(Response::builder(StatusCode::NotFound).build()),
        };

    let indicators: Vec<_> = controller
        .indicators()
        .into_iter()
        .map(|indicator| IndicatorLink {
            href: AlbumQueryParams::at(query.category, index)
                .with_jump(indicator.index)
                .href(),
            active: indicator.active,
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("cache_buster", &state.cache_busting_string);
    context.insert("site_name", &state.args.site_name);
    context.insert("title", &photo.title);
    context.insert(
        "canonical_href",
        &format!(
            "{}{}",
            state.args.base_url,
            AlbumQueryParams::at(query.category, index).href()
        ),
    );
    context.insert("photo", photo);
    context.insert("ordinal", &ordinal);
    context.insert("total", &total);
    context.insert("category", query.category.as_str());
    context.insert("index", &index);
    context.insert("indicators", &indicators);
    if controller.has_previous() {
        let href = AlbumQueryParams::at(query.category, index).with_key("ArrowLeft");
        context.insert("previous_href", &href.href());
    }
    if controller.has_next() {
        let href = AlbumQueryParams::at(query.category, index).with_key("ArrowRight");
        context.insert("next_href", &href.href());
    }
    context.insert("close_svg", &Icon::X.svg(24));
    context.insert("previous_svg", &Icon::ChevronLeft.svg(32));
    context.insert("next_svg", &Icon::ChevronRight.svg(32));

    let body = utils::render(state, "album.html", &context)?;
    Ok(Response::builder(StatusCode::Ok)
        .content_type("text/html")
        .body(body)
        .build())
}

async fn sitemap(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let images = portfolio_images(state, CategoryFilter::All).await?;

    let mut buf = Vec::new();
    let sitemap_writer = sitemap::writer::SiteMapWriter::new(&mut buf);
    let mut urlwriter = sitemap_writer.start_urlset()?;

    urlwriter.url(format!("{}/", state.args.base_url))?;

    for category in Category::ALL {
        urlwriter.url(format!("{}/?category={}", state.args.base_url, category))?;
    }

    for index in 0..images.len() {
        urlwriter.url(format!("{}/album?photo={}", state.args.base_url, index))?;
    }

    urlwriter.end()?;

    let res = Response::builder(StatusCode::Ok)
        .body(buf)
        .content_type(tide::http::mime::XML)
        .build();
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> tera::Tera {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        crate::load_templates(&path).expect("templates parse")
    }

    #[test]
    fn album_href_round_trips_through_query() {
        let href = AlbumQueryParams::at(CategoryFilter::Only(Category::Portrait), 2).href();
        assert_eq!(href, "/album?category=portrait&photo=2");

        let query: AlbumQueryParams =
            serde_qs::from_str("category=portrait&photo=2&key=Escape").unwrap();
        assert_eq!(query.category, CategoryFilter::Only(Category::Portrait));
        assert_eq!(query.photo, 2);
        assert_eq!(query.intent(), Some(Intent::Close));
    }

    fn three_photos() -> Vec<Photo> {
        (1..=3)
            .map(|id| Photo {
                id,
                title: format!("Кадр {}", id),
                url: format!("https://cdn.example.com/{}.jpg", id),
            })
            .collect()
    }

    fn redirect_target(outcome: AlbumOutcome) -> String {
        match outcome {
            AlbumOutcome::Redirect(href) => href,
            other => panic!("expected a redirect, got {:?}", other),
        }
    }

    #[test]
    fn album_without_photos_is_not_found() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 0);
        assert!(matches!(resolve_album(Vec::new(), &query), AlbumOutcome::NotFound));
    }

    #[test]
    fn album_start_past_the_end_is_not_found() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 3);
        assert!(matches!(resolve_album(three_photos(), &query), AlbumOutcome::NotFound));
    }

    #[test]
    fn album_without_intent_renders_requested_photo() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 1);
        match resolve_album(three_photos(), &query) {
            AlbumOutcome::Render(controller) => {
                assert_eq!(controller.position(), Some((2, 3)));
                assert_eq!(controller.current_photo().map(|photo| photo.id), Some(2));
            },
            other => panic!("expected a render, got {:?}", other),
        }
    }

    #[test]
    fn arrow_right_redirects_to_next_photo() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 0).with_key("ArrowRight");
        assert_eq!(
            redirect_target(resolve_album(three_photos(), &query)),
            "/album?category=all&photo=1"
        );
    }

    #[test]
    fn arrow_left_keeps_category() {
        let query =
            AlbumQueryParams::at(CategoryFilter::Only(Category::Wedding), 2).with_key("ArrowLeft");
        assert_eq!(
            redirect_target(resolve_album(three_photos(), &query)),
            "/album?category=wedding&photo=1"
        );
    }

    #[test]
    fn jump_redirects_straight_to_target() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 0).with_jump(2);
        assert_eq!(
            redirect_target(resolve_album(three_photos(), &query)),
            "/album?category=all&photo=2"
        );
    }

    #[test]
    fn arrow_right_at_last_photo_stays_put() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 2).with_key("ArrowRight");
        assert_eq!(
            redirect_target(resolve_album(three_photos(), &query)),
            "/album?category=all&photo=2"
        );
    }

    #[test]
    fn escape_leaves_the_album() {
        let query = AlbumQueryParams::at(CategoryFilter::All, 1).with_key("Escape");
        assert_eq!(redirect_target(resolve_album(three_photos(), &query)), "/#portfolio");
    }

    #[async_std::test]
    async fn failed_section_fetch_renders_empty() {
        let failing = async { Err::<Vec<Photo>, _>(crate::db::Error::Sqlx(sqlx::Error::PoolTimedOut)) };
        assert!(or_empty("portfolio", failing).await.is_empty());

        let loaded = async { Ok::<_, crate::db::Error>(three_photos()) };
        assert_eq!(or_empty("portfolio", loaded).await.len(), 3);
    }

    #[test]
    fn pointer_controls_carry_intents() {
        let next = AlbumQueryParams::at(CategoryFilter::All, 0).with_key("ArrowRight");
        assert_eq!(next.href(), "/album?category=all&photo=0&key=ArrowRight");
        assert_eq!(next.intent(), Some(Intent::Next));

        let jump = AlbumQueryParams::at(CategoryFilter::All, 0).with_jump(4);
        assert_eq!(jump.href(), "/album?category=all&photo=0&jump=4");
        assert_eq!(jump.intent(), Some(Intent::JumpTo(4)));

        assert_eq!(AlbumQueryParams::at(CategoryFilter::All, 0).intent(), None);
    }

    #[test]
    fn tabs_mark_selected_category() {
        let tabs = category_tabs(CategoryFilter::Only(Category::Nature));
        let active: Vec<_> = tabs.iter().filter(|tab| tab.active).map(|tab| tab.value).collect();
        assert_eq!(tabs.len(), 4);
        assert_eq!(active, vec!["nature"]);
    }

    #[test]
    fn album_template_hides_unavailable_controls() {
        let mut context = tera::Context::new();
        context.insert("cache_buster", &None::<String>);
        context.insert("site_name", "LENS ARTISTRY");
        context.insert("title", "Love Story");
        context.insert("canonical_href", "https://lensartistry.ru/album?category=all&photo=0");
        context.insert(
            "photo",
            &Photo {
                id: 4,
                title: "Love Story".to_string(),
                url: "https://cdn.example.com/4.jpg".to_string(),
            },
        );
        context.insert("ordinal", &1);
        context.insert("total", &3);
        context.insert("category", "all");
        context.insert("index", &0);
        context.insert(
            "indicators",
            &vec![IndicatorLink {
                href: AlbumQueryParams::at(CategoryFilter::All, 0).href(),
                active: true,
            }],
        );
        context.insert(
            "next_href",
            &AlbumQueryParams::at(CategoryFilter::All, 0)
                .with_key("ArrowRight")
                .href(),
        );
        context.insert("close_svg", &Icon::X.svg(24));
        context.insert("previous_svg", &Icon::ChevronLeft.svg(32));
        context.insert("next_svg", &Icon::ChevronRight.svg(32));

        let html = templates().render("album.html", &context).unwrap();
        assert!(html.contains("1 / 3"));
        assert!(html.contains(r#"class="next""#));
        assert!(!html.contains(r#"class="previous""#));
    }
}
