use structopt::StructOpt;

use lens_artistry_api_structs::ReviewSubmission;
use lens_artistry_cli::client::Client;

#[derive(StructOpt)]
struct SharedApiArgs {
    /// Lens Artistry API host
    #[structopt(long, env = "LENS_ARTISTRY_API_ENDPOINT")]
    endpoint: String,
}

#[derive(StructOpt)]
pub struct FetchArgs {
    #[structopt(flatten)]
    api_arguments: SharedApiArgs,

    /// Only fetch portfolio images in this category.
    #[structopt(long)]
    category: Option<String>,

    /// Print the fetched content as JSON.
    #[structopt(long)]
    json: bool,
}

#[derive(StructOpt)]
pub struct SubmitReviewArgs {
    #[structopt(flatten)]
    api_arguments: SharedApiArgs,

    /// Client name.
    #[structopt(name = "NAME")]
    client_name: String,

    /// Review text.
    #[structopt(name = "TEXT")]
    review_text: String,

    /// Rating from 1 to 5.
    #[structopt(long, default_value = "5")]
    rating: i16,
}

#[derive(StructOpt)]
pub struct SetReviewPublishedArgs {
    #[structopt(flatten)]
    api_arguments: SharedApiArgs,

    /// Lens Artistry API secret key
    #[structopt(long, env = "LENS_ARTISTRY_API_SECRET_KEY", hide_env_values = true)]
    secret_key: String,

    /// Review ID to change published state on.
    #[structopt(name = "REVIEW_ID")]
    review_id: i32,

    /// Whether to publish or unpublish the review.
    #[structopt(name = "PUBLISHED", parse(try_from_str))]
    published: bool,
}

#[derive(StructOpt)]
pub enum Command {
    Fetch(FetchArgs),
    SubmitReview(SubmitReviewArgs),
    SetReviewPublished(SetReviewPublishedArgs),
}

async fn fetch(args: FetchArgs) -> surf::Result<()> {
    let client = Client::new(args.api_arguments.endpoint);
    let content = client.site_content(args.category.as_deref()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&content)?);
    } else {
        println!("{}", content.summary());
    }

    Ok(())
}

async fn submit_review(args: SubmitReviewArgs) -> surf::Result<()> {
    let client = Client::new(args.api_arguments.endpoint);
    let submission = ReviewSubmission {
        client_name: args.client_name,
        review_text: args.review_text,
        rating: args.rating,
    };

    let created = client.submit_review(&submission).await?;
    log::info!("Review {} submitted: {}", created.id, created.message);

    Ok(())
}

async fn set_review_published(args: SetReviewPublishedArgs) -> surf::Result<()> {
    let client = Client::new(args.api_arguments.endpoint);
    client
        .set_review_published(&args.secret_key, args.review_id, args.published)
        .await
}

#[async_std::main]
async fn main() -> surf::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    match Command::from_args() {
        Command::Fetch(args) => fetch(args).await,
        Command::SubmitReview(args) => submit_review(args).await,
        Command::SetReviewPublished(args) => set_review_published(args).await,
    }
}
