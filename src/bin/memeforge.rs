use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    /// Studio config JSON (fonts and templates). Paths inside are relative to its directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Draw text as solid blocks instead of loading fonts.
    #[arg(long, global = true)]
    block_text: bool,

    /// Output path (PNG or GIF depending on the command).
    #[arg(long, global = true, default_value = "out.png")]
    out: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Alignment chart from an even number of options (first half columns, second half rows).
    Grid(GridArgs),
    /// Four-caption quadrant chart.
    Quadrant(QuadrantArgs),
    /// Polygon chart with one vertex per label.
    Polygon(PolygonArgs),
    /// Caption (and optional avatar) faded out over an animated template.
    Fade(FadeArgs),
    /// Dithered avatar card with a caption.
    Card(CardArgs),
    /// Message screenshot with a sender name and body.
    Message(MessageArgs),
}

#[derive(Args, Debug)]
struct AvatarArgs {
    /// Avatar image, optionally salted as PATH@NONCE. Defaults the nonce to the avatar's
    /// position on the command line.
    #[arg(long = "avatar")]
    avatars: Vec<AvatarSpec>,
}

#[derive(Args, Debug)]
struct GridArgs {
    #[arg(required = true)]
    options: Vec<String>,
    #[command(flatten)]
    avatars: AvatarArgs,
}

#[derive(Args, Debug)]
struct QuadrantArgs {
    #[arg(long)]
    top: String,
    #[arg(long)]
    bottom: String,
    #[arg(long)]
    left: String,
    #[arg(long)]
    right: String,
    #[command(flatten)]
    avatars: AvatarArgs,
}

#[derive(Args, Debug)]
struct PolygonArgs {
    #[arg(required = true)]
    labels: Vec<String>,
    #[command(flatten)]
    avatars: AvatarArgs,
}

#[derive(Args, Debug)]
struct FadeArgs {
    /// Name of an animated template from the studio config.
    #[arg(long)]
    template: String,
    #[arg(long)]
    text: String,
    #[arg(long)]
    avatar: Option<AvatarSpec>,
}

#[derive(Args, Debug)]
struct CardArgs {
    #[arg(long)]
    text: String,
    #[arg(long)]
    avatar: AvatarSpec,
}

#[derive(Args, Debug)]
struct MessageArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    body: String,
}

#[derive(Clone, Debug)]
struct AvatarSpec {
    path: PathBuf,
    nonce: Option<u64>,
}

impl FromStr for AvatarSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('@') {
            Some((path, nonce)) if !path.is_empty() => {
                let nonce = nonce
                    .parse::<u64>()
                    .map_err(|e| format!("bad nonce '{nonce}': {e}"))?;
                Ok(Self {
                    path: PathBuf::from(path),
                    nonce: Some(nonce),
                })
            }
            _ => Ok(Self {
                path: PathBuf::from(s),
                nonce: None,
            }),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let studio = load_studio(cli.config.as_deref(), cli.block_text)?;

    let rendered = match &cli.cmd {
        Command::Grid(args) => {
            let bytes = read_avatars(&args.avatars.avatars)?;
            let inputs = avatar_inputs(&args.avatars.avatars, &bytes);
            memeforge::GridChart::new(&studio).render(&inputs, args.options.as_slice())?
        }
        Command::Quadrant(args) => {
            let bytes = read_avatars(&args.avatars.avatars)?;
            let inputs = avatar_inputs(&args.avatars.avatars, &bytes);
            let labels =
                memeforge::QuadrantLabels::new(&args.top, &args.bottom, &args.left, &args.right);
            memeforge::QuadrantChart::new(&studio).render(&inputs, &labels)?
        }
        Command::Polygon(args) => {
            let bytes = read_avatars(&args.avatars.avatars)?;
            let inputs = avatar_inputs(&args.avatars.avatars, &bytes);
            memeforge::PolygonChart::new(&studio).render(&inputs, args.labels.as_slice())?
        }
        Command::Fade(args) => {
            let specs: Vec<AvatarSpec> = args.avatar.iter().cloned().collect();
            let bytes = read_avatars(&specs)?;
            let inputs = avatar_inputs(&specs, &bytes);
            memeforge::FadeOverlay::new(&studio).render(
                &args.template,
                &args.text,
                inputs.first().copied(),
            )?
        }
        Command::Card(args) => {
            let specs = [args.avatar.clone()];
            let bytes = read_avatars(&specs)?;
            let inputs = avatar_inputs(&specs, &bytes);
            let avatar = inputs.first().copied().context("card needs an avatar")?;
            memeforge::CaptionCard::new(&studio).render(&args.text, avatar)?
        }
        Command::Message(args) => {
            memeforge::MessageCard::new(&studio).render(&args.name, &args.body)?
        }
    };

    if let Some(parent) = cli.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&cli.out, rendered.bytes())
        .with_context(|| format!("write output '{}'", cli.out.display()))?;

    let size = rendered.size();
    eprintln!(
        "wrote {} ({}x{} {})",
        cli.out.display(),
        size.width,
        size.height,
        rendered.extension()
    );
    Ok(())
}

fn load_studio(config: Option<&Path>, block_text: bool) -> anyhow::Result<memeforge::Studio> {
    let block = || -> Arc<dyn memeforge::Typesetter> {
        Arc::new(memeforge::BlockTypesetter::default())
    };
    let Some(path) = config else {
        anyhow::ensure!(block_text, "--config is required unless --block-text is given");
        return Ok(memeforge::Studio::new(block()));
    };

    let cfg = memeforge::StudioConfig::from_json_file(path)?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let studio = if block_text {
        memeforge::Studio::load_templates(&cfg, root, block())?
    } else {
        memeforge::Studio::load(&cfg, root)?
    };
    Ok(studio)
}

fn read_avatars(specs: &[AvatarSpec]) -> anyhow::Result<Vec<Vec<u8>>> {
    specs
        .iter()
        .map(|s| {
            std::fs::read(&s.path)
                .with_context(|| format!("read avatar '{}'", s.path.display()))
        })
        .collect()
}

fn avatar_inputs<'a>(
    specs: &[AvatarSpec],
    bytes: &'a [Vec<u8>],
) -> Vec<memeforge::AvatarInput<'a>> {
    specs
        .iter()
        .zip(bytes)
        .enumerate()
        .map(|(i, (spec, b))| memeforge::AvatarInput::new(spec.nonce.unwrap_or(i as u64), b))
        .collect()
}
