use clap::{Parser, Subcommand};
use orbit_gallery::admin::AdminSession;
use orbit_gallery::client::{ApiClient, PhotoApi};
use orbit_gallery::imaging::RustBackend;
use orbit_gallery::{config, output, server};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orbit-gallery")]
#[command(about = "3D photo carousel with a JSON-file backed photo service")]
#[command(long_about = "\
3D photo carousel with a JSON-file backed photo service

Photos float in a 3D scene you can pan, orbit and zoom. The server keeps
every photo (a compressed JPEG data URI, a caption and a fixed placement) in
one JSON document and serves the gallery, an admin page and a small JSON API:

  GET    /                      gallery
  GET    /admin?admin=<token>   admin page (wrong token redirects to /)
  GET    /api/photos            { \"photos\": [...] }
  POST   /api/photos            replace the whole collection
  DELETE /api/photos/<id>       delete one photo

The list/add/edit/delete commands talk to a running server through that API.

Run 'orbit-gallery gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Base URL of a running server, used by the photo commands
    #[arg(long, default_value = "http://localhost:3000", global = true)]
    server: String,

    /// Config file for compression and placement settings
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Listen port (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Photo document path (overrides config)
        #[arg(long)]
        data_file: Option<String>,
    },
    /// List the photos on the server
    List,
    /// Compress a local image and add it as a new photo
    Add {
        image: PathBuf,
        #[arg(long, default_value = "")]
        caption: String,
    },
    /// Change a photo's caption or image, keeping its placement
    Edit {
        id: String,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a photo
    Delete { id: String },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, data_file } => {
            let mut app_config = config::load_config(&cli.config)?;
            app_config.apply_env();
            if let Some(port) = port {
                app_config.server.port = port;
            }
            if let Some(data_file) = data_file {
                app_config.server.data_file = data_file;
            }
            app_config.validate()?;
            server::serve(app_config)?;
        }
        Command::List => {
            let client = ApiClient::new(&cli.server)?;
            let photos = client.fetch_photos()?;
            output::print_photo_list(&photos);
        }
        Command::Add { image, caption } => {
            let mut session = session(&cli.config, &cli.server)?;
            session.load()?;
            let bytes = std::fs::read(&image)?;
            session.select_image(&RustBackend::new(), &bytes)?;
            session.set_caption(caption);
            let id = session.save(&mut rand::thread_rng())?;
            output::print_lines(&output::format_saved(&id, session.photos()));
        }
        Command::Edit { id, caption, image } => {
            let mut session = session(&cli.config, &cli.server)?;
            session.load()?;
            session.edit(&id)?;
            if let Some(caption) = caption {
                session.set_caption(caption);
            }
            if let Some(path) = image {
                let bytes = std::fs::read(&path)?;
                session.select_image(&RustBackend::new(), &bytes)?;
            }
            session.save(&mut rand::thread_rng())?;
            output::print_lines(&output::format_saved(&id, session.photos()));
        }
        Command::Delete { id } => {
            let mut session = session(&cli.config, &cli.server)?;
            session.load()?;
            session.delete(&id)?;
            output::print_lines(&output::format_deleted(&id, session.photos().len()));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// An admin session against the remote server, using local config for
/// compression and placement.
fn session(
    config_path: &Path,
    server: &str,
) -> Result<AdminSession<ApiClient>, Box<dyn std::error::Error>> {
    let app_config = config::load_config(config_path)?;
    let client = ApiClient::new(server)?;
    log::debug!("using server {}", client.base_url());
    Ok(AdminSession::new(
        client,
        app_config.placement,
        app_config.compression.to_compression_config(),
    ))
}
