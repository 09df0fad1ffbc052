//! Ticket CLI
//!
//! Render ticket shapes to PNG and inspect their outlines.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod render;

use render::{parse_rect, TicketScene};
use ticket_core::Rect;
use ticket_view::TicketConfig;

#[derive(Parser)]
#[command(name = "ticket")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render ticket shapes with scalloped notches", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a ticket to a PNG file
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output PNG path
        #[arg(short, long, default_value = "ticket.png")]
        output: PathBuf,

        /// Also write the raw shadow mask as a grayscale PNG
        #[arg(long)]
        shadow_mask: Option<PathBuf>,

        /// Canvas background color (#RRGGBB or #AARRGGBB); transparent if omitted
        #[arg(long)]
        background: Option<String>,
    },

    /// Print the outline commands of a ticket
    Contour {
        #[command(flatten)]
        scene: SceneArgs,
    },

    /// Print the default configuration as TOML
    Config,
}

#[derive(Args)]
struct SceneArgs {
    /// Ticket configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Container width in pixels
    #[arg(long, default_value = "360")]
    width: f32,

    /// Container height in pixels
    #[arg(long, default_value = "200")]
    height: f32,

    /// Pixel density of the output
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Notch position, overriding the config
    #[arg(long)]
    hole_position: Option<f32>,

    /// Sibling bounds to center the notches on, as x,y,width,height
    #[arg(long, value_parser = parse_rect)]
    anchor: Option<Rect>,

    /// Render as a design preview (no shadow)
    #[arg(long)]
    preview: bool,
}

impl SceneArgs {
    fn build(&self) -> Result<TicketScene> {
        let config = match &self.config {
            Some(path) => TicketConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => TicketConfig::default(),
        };

        let mut scene = TicketScene::new(config, self.width, self.height, self.scale)?;
        if let Some(position) = self.hole_position {
            scene.view_mut().set_hole_position(position)?;
        }
        if let Some(anchor) = self.anchor {
            scene.anchor_to(anchor);
        }
        scene.view_mut().set_preview_mode(self.preview);
        Ok(scene)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            scene,
            output,
            shadow_mask,
            background,
        } => cmd_render(&scene, &output, shadow_mask.as_deref(), background.as_deref()),

        Commands::Contour { scene } => cmd_contour(&scene),

        Commands::Config => cmd_config(),
    }
}

fn cmd_render(
    args: &SceneArgs,
    output: &Path,
    shadow_mask: Option<&Path>,
    background: Option<&str>,
) -> Result<()> {
    let mut scene = args.build()?;
    let background = background
        .map(ticket_view::parse_color)
        .transpose()
        .context("Invalid --background")?;

    let canvas = scene.render(background)?;
    canvas
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}x{} ticket to {}", canvas.width(), canvas.height(), output.display());

    if let Some(path) = shadow_mask {
        match scene.view().shadow() {
            Some(shadow) => {
                render::save_mask(shadow.mask, path)?;
                info!("Wrote shadow mask to {}", path.display());
            }
            None => info!("No shadow to write (elevation 0, preview, or no blur support)"),
        }
    }

    Ok(())
}

fn cmd_contour(args: &SceneArgs) -> Result<()> {
    let mut scene = args.build()?;
    scene.rebuild();

    let view = scene.view();
    let bounds = view.bounds();
    println!(
        "# bounds {},{},{},{}",
        bounds.left(),
        bounds.top(),
        bounds.right(),
        bounds.bottom()
    );
    print!("{}", view.contour());
    Ok(())
}

fn cmd_config() -> Result<()> {
    let text = TicketConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    print!("{text}");
    Ok(())
}
