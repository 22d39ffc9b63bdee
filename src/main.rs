use std::path::PathBuf;

use clap::{Parser, Subcommand};

use social_snap::{
    export::{resolve_scale, ExportSettings},
    mock::mock_post,
    Background, ExportFormat, Exporter, Layout, PostData, SocialNetwork, TextAssist, Theme,
};

#[derive(Parser)]
#[command(name = "social-snap", version, about = "Render mock social-media post cards to PNG or JPEG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a post description to an image file
    Render {
        /// Post JSON file; the built-in sample post when omitted
        #[arg(long)]
        post: Option<PathBuf>,
        /// Card arrangement: vertical or wide
        #[arg(long, default_value = "vertical", value_parser = parse_layout)]
        layout: Layout,
        /// Card color scheme: light or dark
        #[arg(long, default_value = "light", value_parser = parse_theme)]
        theme: Theme,
        /// Backdrop: a gradient preset name or a hex color
        #[arg(long, default_value = "#e5e7eb", value_parser = parse_background)]
        background: Background,
        /// Capture magnification; invalid input normalizes to 1
        #[arg(long, default_value = "2")]
        scale: String,
        /// Output encoding: png or jpeg
        #[arg(long, default_value = "png", value_parser = parse_format)]
        format: ExportFormat,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print a generated mock post as JSON
    Mock {
        /// Network to imitate: instagram, facebook, x or none
        #[arg(long, default_value = "instagram", value_parser = parse_network)]
        network: SocialNetwork,
    },
    /// Print suggested body text from the assist service
    Assist,
}

fn parse_layout(s: &str) -> Result<Layout, String> {
    match s {
        "vertical" => Ok(Layout::Vertical),
        "wide" => Ok(Layout::Wide),
        _ => Err(format!("unknown layout {s:?} (expected vertical or wide)")),
    }
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    match s {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        _ => Err(format!("unknown theme {s:?} (expected light or dark)")),
    }
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    match s {
        "png" => Ok(ExportFormat::Png),
        "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
        _ => Err(format!("unknown format {s:?} (expected png or jpeg)")),
    }
}

fn parse_network(s: &str) -> Result<SocialNetwork, String> {
    match s {
        "instagram" => Ok(SocialNetwork::Instagram),
        "facebook" => Ok(SocialNetwork::Facebook),
        "x" => Ok(SocialNetwork::X),
        "none" => Ok(SocialNetwork::None),
        _ => Err(format!("unknown network {s:?}")),
    }
}

fn parse_background(s: &str) -> Result<Background, String> {
    Background::parse(s)
        .ok_or_else(|| format!("unknown background {s:?} (expected a preset name or hex color)"))
}

fn run(cli: Cli) -> social_snap::Result<()> {
    match cli.command {
        Command::Render { post, layout, theme, background, scale, format, out } => {
            let post = match post {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)?;
                    serde_json::from_str::<PostData>(&raw).map_err(|e| {
                        social_snap::Error::ConfigError(format!(
                            "invalid post file {}: {e}",
                            path.display()
                        ))
                    })?
                }
                None => PostData::sample(),
            };
            let settings = ExportSettings { scale: resolve_scale(&scale), format };
            let exporter = Exporter::new(out)?;
            let path = exporter.export(&post, layout, theme, &background, &settings)?;
            println!("{}", path.display());
        }
        Command::Mock { network } => {
            let post = mock_post(network, &mut rand::thread_rng());
            println!(
                "{}",
                serde_json::to_string_pretty(&post)
                    .map_err(|e| social_snap::Error::Other(e.to_string()))?
            );
        }
        Command::Assist => {
            let assist = TextAssist::from_env()?;
            println!("{}", assist.suggest_text()?);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("social-snap: {e}");
        std::process::exit(1);
    }
}
