use clap::Parser;

mod api;
mod app;
mod config;
mod message;
mod state;
mod ui;

use api::{ApiClient, ApiError};
use app::DogGallery;
use config::Config;
use state::data::Route;

#[derive(Parser, Debug)]
#[command(
    name = "dog-gallery",
    version,
    about = "Browse dog breeds, their photos, and the images you liked"
)]
struct Cli {
    #[arg(
        long,
        value_name = "URL",
        help = "Gallery API base URL (overrides the config file and DOG_GALLERY_API_URL)."
    )]
    api_url: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        conflicts_with = "likes",
        help = "Open directly on one breed's images."
    )]
    breed: Option<String>,

    #[arg(long, help = "Open directly on the liked images.")]
    likes: bool,
}

impl Cli {
    fn start_route(&self) -> Route {
        match (&self.breed, self.likes) {
            (Some(breed), _) => Route::Breed(breed.clone()),
            (None, true) => Route::Likes,
            (None, false) => Route::Catalog,
        }
    }
}

/// Build the API client. A bad URL from the command line is fatal; a bad
/// URL from the config file or environment falls back to the default.
fn resolve_client(config: &mut Config, explicit: Option<String>) -> Result<ApiClient, ApiError> {
    if let Some(url) = explicit {
        config.api_url = url;
        return ApiClient::from_str_url(&config.api_url);
    }

    ApiClient::from_str_url(&config.api_url).or_else(|err| {
        log::warn!("{}; falling back to the default API URL", err);
        config.api_url = Config::default().api_url;
        ApiClient::from_str_url(&config.api_url)
    })
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = cli.start_route();
    let mut config = Config::load();

    let client = match resolve_client(&mut config, cli.api_url) {
        Ok(client) => client,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(2);
        }
    };

    log::info!("🐶 Dog Gallery using API at {}", client.base());

    iced::application(DogGallery::title, DogGallery::update, DogGallery::view)
        .theme(DogGallery::theme)
        .subscription(DogGallery::subscription)
        .window_size((1200.0, 860.0))
        .centered()
        .run_with(move || DogGallery::new(config, client, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_route_from_flags() {
        let cli = Cli::parse_from(["dog-gallery", "--breed", "hound-afghan"]);
        assert_eq!(cli.start_route(), Route::Breed("hound-afghan".into()));

        let cli = Cli::parse_from(["dog-gallery", "--likes"]);
        assert_eq!(cli.start_route(), Route::Likes);

        let cli = Cli::parse_from(["dog-gallery"]);
        assert_eq!(cli.start_route(), Route::Catalog);
    }

    #[test]
    fn test_breed_and_likes_conflict() {
        assert!(Cli::try_parse_from(["dog-gallery", "--breed", "pug", "--likes"]).is_err());
    }

    #[test]
    fn test_bad_config_url_falls_back() {
        let mut config = Config {
            api_url: "not a url".into(),
            ..Config::default()
        };
        let client = resolve_client(&mut config, None).unwrap();
        assert_eq!(client.base().as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_bad_explicit_url_is_fatal() {
        let mut config = Config::default();
        assert!(resolve_client(&mut config, Some("ftp://dogs".into())).is_err());
    }
}
