use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use sockybara::export::desktop::{CommandShare, DirectorySaver, NoShare, SystemClipboard};
use sockybara::export::{Delivery, ExportCoordinator, ExportHost, HostCapabilities, ShareTarget};
use sockybara::{
    Canvas, ColorTraits, DEFAULT_DISPLAY_SIZE, DefaultTable, ExportSettings, JsonTraitSource,
    PartialTraits, Rasterizer, TokenId, TraitSlot, TraitSource,
};

#[derive(Parser, Debug)]
#[command(name = "sockybara", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the trait table for a token.
    Show(TraitArgs),
    /// Write the rendered SVG.
    Svg(SvgArgs),
    /// Share the PNG, falling back to a clipboard copy.
    Share(ExportArgs),
    /// Share the PNG, falling back to saving it to disk.
    Download(ExportArgs),
}

#[derive(Args, Debug)]
struct TraitArgs {
    /// JSON trait snapshot keyed by token id.
    #[arg(long, requires = "id")]
    source: Option<PathBuf>,

    /// Token id (0-247).
    #[arg(long)]
    id: Option<String>,

    /// Nine comma-separated colors in slot order. Empty entries use the defaults.
    #[arg(long, conflicts_with = "source")]
    colors: Option<String>,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    traits: TraitArgs,

    /// Output path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// On-screen width/height written into the SVG.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_SIZE)]
    display_size: u32,

    /// Emit a base64 `data:` URI instead of SVG markup.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    traits: TraitArgs,

    /// Export settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for saved files (overrides the config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Share helper program (overrides the config).
    #[arg(long)]
    share_command: Option<String>,

    /// Treat native share as unavailable.
    #[arg(long)]
    no_share: bool,

    /// Stay running until the "copied" indicator expires.
    #[arg(long)]
    hold: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Show(args) => cmd_show(args).await,
        Command::Svg(args) => cmd_svg(args).await,
        Command::Share(args) => cmd_export(args, Action::Share).await,
        Command::Download(args) => cmd_export(args, Action::Download).await,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

struct Loaded {
    id: String,
    traits: ColorTraits,
    owner: Option<String>,
}

async fn load_traits(args: &TraitArgs) -> anyhow::Result<Loaded> {
    let id = match &args.id {
        Some(raw) => raw.parse::<TokenId>()?.to_string(),
        None => "custom".to_owned(),
    };

    if let Some(path) = &args.source {
        let token: TokenId = id.parse()?;
        let source = JsonTraitSource::from_path(path)?;
        let record = source.fetch(token).await?;
        return Ok(Loaded {
            id,
            traits: record.traits,
            owner: record.owner,
        });
    }

    let traits = match &args.colors {
        Some(list) => parse_color_list(list)?,
        None => ColorTraits::default(),
    };
    Ok(Loaded {
        id,
        traits,
        owner: None,
    })
}

fn parse_color_list(list: &str) -> anyhow::Result<ColorTraits> {
    let values: Vec<&str> = list.split(',').map(str::trim).collect();
    if values.len() != TraitSlot::ALL.len() {
        anyhow::bail!(
            "--colors needs {} comma-separated entries, got {}",
            TraitSlot::ALL.len(),
            values.len()
        );
    }

    let mut partial = PartialTraits::new();
    for (slot, value) in TraitSlot::ALL.into_iter().zip(values) {
        if value.is_empty() {
            continue;
        }
        partial.set(slot, mark_bare_hex(value));
    }
    Ok(partial.resolve(&DefaultTable::standard()))
}

// Bare 6/8 digit hex gets a `#`; names and already-marked values pass through.
fn mark_bare_hex(value: &str) -> String {
    let bare_hex = matches!(value.len(), 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit());
    if bare_hex {
        format!("#{value}")
    } else {
        value.to_owned()
    }
}

async fn cmd_show(args: TraitArgs) -> anyhow::Result<()> {
    let loaded = load_traits(&args).await?;
    println!("Sockybara #{}", loaded.id);
    if let Some(owner) = &loaded.owner {
        println!("{:>16}  {owner}", "Owner");
    }
    for (slot, value) in loaded.traits.iter() {
        println!("{:>16}  {value}", slot.label());
    }
    Ok(())
}

async fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let loaded = load_traits(&args.traits).await?;
    let display = Canvas::new(args.display_size, args.display_size)?;
    let image = sockybara::render_at(&loaded.traits, display);

    let svg = image.to_svg();
    let text = if args.data_uri {
        sockybara::raster::SvgPayload::encode(&svg)
            .as_uri()
            .to_owned()
    } else {
        svg
    };

    match &args.out {
        Some(path) => {
            ensure_parent_dir(path)?;
            std::fs::write(path, text).with_context(|| format!("write svg '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Share,
    Download,
}

async fn cmd_export(args: ExportArgs, action: Action) -> anyhow::Result<()> {
    let loaded = load_traits(&args.traits).await?;

    let mut settings = match &args.config {
        Some(path) => ExportSettings::from_path(path)?,
        None => ExportSettings::default(),
    };
    if let Some(dir) = args.out_dir {
        settings.out_dir = dir;
    }
    if let Some(cmd) = args.share_command {
        settings.share_command = Some(cmd);
    }

    let (share, native_share): (Arc<dyn ShareTarget>, bool) = match &settings.share_command {
        Some(program) if !args.no_share => {
            let share = CommandShare::new(program.clone(), settings.share_args.clone());
            let available = share.is_available();
            if !available {
                tracing::warn!(%program, "share helper not found, native share disabled");
            }
            let share: Arc<dyn ShareTarget> = Arc::new(share);
            (share, available)
        }
        _ => {
            let share: Arc<dyn ShareTarget> = Arc::new(NoShare);
            (share, false)
        }
    };

    let host = ExportHost {
        capabilities: HostCapabilities { native_share },
        share,
        clipboard: Arc::new(SystemClipboard::new()),
        saver: Arc::new(DirectorySaver::new(settings.out_dir.clone())),
    };
    let coordinator = ExportCoordinator::new(Rasterizer::software(), host, settings);

    let image = sockybara::render(&loaded.traits);
    let artifact = match action {
        Action::Share => coordinator.share(&image, &loaded.id).await?,
        Action::Download => coordinator.download(&image, &loaded.id).await?,
    };

    match &artifact.delivery {
        Delivery::Share => eprintln!("shared {}", artifact.file_name),
        Delivery::Clipboard => {
            eprintln!("copied {} to clipboard", artifact.file_name);
            if args.hold {
                coordinator.status().settle_copied().await;
            }
        }
        Delivery::Download { path } => eprintln!("wrote {}", path.display()),
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
