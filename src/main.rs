use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotrec::{cli, config, error, spotify::artists::DEFAULT_TOP_LIMIT, types::TimeRange};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify through the backend
    Login,

    /// Forget the stored tokens
    Logout,

    /// Show the stored token and its expiry
    Status,

    /// Show the current user's profile
    Profile,

    /// List the current user's playlists
    Playlists,

    /// Show the current user's top artists
    TopArtists(TopOptions),

    /// Show the current user's top tracks
    TopTracks(TopOptions),

    /// Look up an artist by id
    Artist(IdOption),

    /// Look up a track and its audio features by id
    Track(IdOption),

    #[clap(about = "Recommend tracks based on one of your playlists")]
    Recommend(RecommendOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Number of entries to show (1-50)
    #[clap(long, default_value_t = DEFAULT_TOP_LIMIT, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,

    /// Window the ranking is computed over
    #[clap(long, value_enum, default_value_t = TimeRange::LongTerm)]
    time_range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOption {
    /// Spotify id
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Playlist id or name
    playlist: String,

    /// Target popularity of the recommended tracks (0-100)
    #[clap(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    popularity: u8,

    /// Save the recommendations as a new private playlist
    #[clap(long)]
    save: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login => cli::login().await,
        Command::Logout => cli::logout().await,
        Command::Status => cli::status().await,
        Command::Profile => cli::profile().await,
        Command::Playlists => cli::playlists().await,
        Command::TopArtists(opt) => cli::top_artists(opt.limit, opt.time_range).await,
        Command::TopTracks(opt) => cli::top_tracks(opt.limit, opt.time_range).await,
        Command::Artist(opt) => cli::artist(opt.id).await,
        Command::Track(opt) => cli::track(opt.id).await,
        Command::Recommend(opt) => cli::recommend(opt.playlist, opt.popularity, opt.save).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
