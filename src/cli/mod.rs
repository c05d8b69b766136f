use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;

use crate::config::Config;
use crate::metadata::locate;
use crate::metadata::lookup::{MetadataLookup, MissPolicy};
use crate::session::controller::ScrobbleSession;
use crate::session::event::PlayerEvent;
use crate::session::submit::LogSubmitter;

#[derive(Parser)]
#[command(name = "spotscrob")]
#[command(version = "0.1")]
#[command(about = "Scrobbles Spotify playback using the local metadata index")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List metadata files of the Spotify accounts on this machine
    Users {
        /// Only show this account
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Look up duration and album for one artist/track pair
    Lookup {
        artist: String,
        track: String,
        /// Use this metadata file instead of the located ones
        #[arg(long)]
        file: Option<PathBuf>,
        /// Only search this account's metadata file
        #[arg(long)]
        user: Option<String>,
        /// Fail on a miss instead of falling back to the default duration
        #[arg(long)]
        strict: bool,
    },
    /// Read now-playing payloads from stdin and scrobble them
    Watch {
        /// Fail on a miss instead of falling back to the default duration
        #[arg(long)]
        strict: bool,
    },
}

fn load_config(path: &Option<PathBuf>) -> Config {
    match path {
        Some(path) => Config::load(path).expect("Failed to load config"),
        None => Config::default(),
    }
}

fn users_dir(cfg: &Config) -> PathBuf {
    match &cfg.metadata.root {
        Some(root) => root.join("Users"),
        None => locate::spotify_users_dir().expect("Could not find the Spotify data directory"),
    }
}

/// Resolves candidate metadata files from the config, or fails if the
/// metadata root cannot be found at all. An explicit account filter from
/// the command line wins over the configured one.
fn candidate_files(cfg: &Config, user: Option<&str>) -> Vec<PathBuf> {
    let filter = user.or(cfg.metadata.user_filter.as_deref());
    locate::locate_metadata_files(&users_dir(cfg), filter)
        .expect("Could not enumerate Spotify accounts")
}

fn build_lookup(cfg: &Config, files: Vec<PathBuf>, strict: bool) -> MetadataLookup {
    let policy = if strict || cfg.scrobble.strict {
        MissPolicy::FailOnMiss
    } else {
        MissPolicy::FallbackOnMiss
    };

    MetadataLookup::new(files, policy).with_fallback_secs(cfg.scrobble.fallback_duration_secs)
}

/// Entrypoint for CLI
pub fn run() {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config);

    match &cli.command {
        Commands::Users { filter } => {
            let users_dir = users_dir(&cfg);
            let files = locate::locate_metadata_files(&users_dir, filter.as_deref())
                .expect("Could not enumerate Spotify accounts");

            if files.is_empty() {
                println!("No Spotify accounts found under {}", users_dir.to_string_lossy());
            }
            for file in files {
                println!("{}", file.to_string_lossy());
            }
        }

        Commands::Lookup {
            artist,
            track,
            file,
            user,
            strict,
        } => {
            let files = match file {
                Some(file) => vec![file.clone()],
                None => candidate_files(&cfg, user.as_deref()),
            };

            let lookup = build_lookup(&cfg, files, *strict);

            match lookup.lookup(artist, track) {
                Ok(info) => {
                    println!("{} - {}", artist, track);
                    println!("  duration: {} s", info.duration_secs);
                    if info.album.is_empty() {
                        println!("  album: (unknown)");
                    } else {
                        println!("  album: {}", info.album);
                    }
                }
                Err(err) => {
                    eprintln!("lookup failed: {err}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Watch { strict } => {
            let files = candidate_files(&cfg, None);
            let lookup = build_lookup(&cfg, files, *strict);
            let mut session = ScrobbleSession::new(
                lookup,
                LogSubmitter::default(),
                cfg.scrobble.source_tag.clone(),
            );

            println!("Reading now-playing payloads from stdin...");

            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line.expect("Failed to read stdin");

                let Some(event) = PlayerEvent::parse_now_playing(&line) else {
                    log::debug!("ignoring non-music payload: {line}");
                    continue;
                };

                if let Err(err) = session.handle_event(&event) {
                    eprintln!("scrobble failed: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}
