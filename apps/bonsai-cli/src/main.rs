use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bonsai_kernel::{Command, ExpandOptions, Turtle, apply_force, check_balance, total_energy};
use bonsai_presets::{PRESET_NAMES, preset};
use bonsai_render::{
    DebugTextRenderer, JsonRenderer, Palette, RenderView, Renderer, SvgRenderer, read_commands,
    read_palette, write_svg,
};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bonsai", about = "Grow branching structures by rewriting turtle commands")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// List the built-in rule sets
    List,
    /// Expand a built-in rule set
    Expand {
        /// Preset name (see `list`)
        #[arg(short, long)]
        preset: String,
        /// Expansion rounds; defaults to the preset's recommended depth
        #[arg(short, long)]
        depth: Option<u32>,
        /// Available energy; defaults to the preset's budget
        #[arg(short, long)]
        energy: Option<f64>,
        /// RNG seed for reproducible expansion
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Wind strength; 0 disables bending
        #[arg(long, default_value = "0")]
        wind: f64,
        /// Direction the wind pushes toward, in degrees
        #[arg(long, default_value = "0")]
        wind_heading: f64,
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
        /// Drawing scale applied to branch lengths
        #[arg(long, default_value = "1")]
        scale: f64,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a saved JSON command list to SVG
    Render {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Borrow this preset's palette
        #[arg(short, long, conflicts_with = "palette")]
        preset: Option<String>,
        /// Read the palette from a JSON file
        #[arg(long)]
        palette: Option<PathBuf>,
        /// Drawing scale applied to branch lengths
        #[arg(long, default_value = "1")]
        scale: f64,
    },
    /// Check a saved JSON command list for push/pop balance
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Svg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("bonsai v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", bonsai_kernel::crate_info());
            println!("render: {}", bonsai_render::crate_info());
            println!("presets: {}", bonsai_presets::crate_info());
        }
        Commands::List => {
            for &name in PRESET_NAMES {
                let p = preset(name)?;
                println!(
                    "{name:<16} depth={:<3} energy={}",
                    p.system.recommended_depth(),
                    p.available_energy
                );
            }
        }
        Commands::Expand {
            preset: name,
            depth,
            energy,
            seed,
            wind,
            wind_heading,
            format,
            scale,
            output,
        } => {
            let p = preset(&name)?;
            let view = RenderView::default().with_scale(scale);
            let options = ExpandOptions {
                depth,
                available_energy: energy.unwrap_or(p.available_energy),
            };

            let mut rng = StdRng::seed_from_u64(seed);
            let mut commands = p
                .system
                .expand(&Turtle::from_pose(view.origin), &options, &mut rng)
                .with_context(|| format!("expanding {name}"))?;
            if wind > 0.0 {
                let mut cursor = Turtle::from_pose(view.origin);
                commands = apply_force(&mut cursor, &commands, wind_heading, wind)
                    .context("applying wind")?;
            }
            tracing::info!(
                preset = p.name,
                seed,
                commands = commands.len(),
                energy = total_energy(&commands),
                "expanded"
            );

            let rendered = match format {
                Format::Text => DebugTextRenderer::new().render(&commands, &view)?,
                Format::Json => JsonRenderer::new().render(&commands, &view)?,
                Format::Svg => SvgRenderer::new(p.palette).render(&commands, &view)?,
            };
            emit(output.as_deref(), &rendered)?;
        }
        Commands::Render {
            input,
            output,
            preset: name,
            palette,
            scale,
        } => {
            let commands = load_commands(&input)?;
            let palette = match (name, palette) {
                (Some(name), _) => preset(&name)?.palette,
                (None, Some(path)) => read_palette(&path)
                    .with_context(|| format!("loading palette {}", path.display()))?,
                (None, None) => Palette::default(),
            };
            let view = RenderView::default().with_scale(scale);
            let svg = SvgRenderer::new(palette).render(&commands, &view)?;
            write_svg(&output, &svg)?;
            println!("Rendered {} commands to {}", commands.len(), output.display());
        }
        Commands::Validate { input } => {
            let commands = load_commands(&input)?;
            let branches = commands.iter().filter_map(Command::branch).count();
            println!(
                "commands={}, branches={}, energy={:.2}",
                commands.len(),
                branches,
                total_energy(&commands)
            );
            check_balance(&commands)
                .with_context(|| format!("{} is not well formed", input.display()))?;
            println!("Balance: OK");
        }
    }

    Ok(())
}

fn load_commands(path: &Path) -> anyhow::Result<Vec<Command>> {
    read_commands(path).with_context(|| format!("loading command list {}", path.display()))
}

fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => std::io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}
