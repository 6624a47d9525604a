use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sketchbook::{SketchError, Sketchbook, SketchbookConfig};

#[derive(Parser, Debug)]
#[command(name = "sketchbook", version)]
struct Cli {
    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one sketchbook page to a PNG file.
    Render(RenderArgs),
    /// List the configured emotion tags.
    Emotions(EmotionsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Configuration JSON; defaults resolve against the current directory when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text to draw. May embed an emotion tag.
    #[arg(long, default_value = "")]
    text: String,

    /// Picture to paste instead of text.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Emotion tag selecting the template, e.g. `#开心#`.
    #[arg(long, default_value = "")]
    emotion: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct EmotionsArgs {
    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let res = match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Emotions(args) => cmd_emotions(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<SketchError>() {
                Some(se) => eprintln!("error[{}]: {se}", se.kind()),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SketchbookConfig> {
    Ok(match path {
        Some(p) => SketchbookConfig::from_path(p)?,
        None => SketchbookConfig::default(),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let sb = Sketchbook::new(load_config(args.config.as_ref())?)?;

    let picture = args
        .image
        .as_ref()
        .map(|p| std::fs::read(p).with_context(|| format!("read picture '{}'", p.display())))
        .transpose()?;
    let png = sb.generate(&args.text, picture.as_deref(), &args.emotion)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_emotions(args: EmotionsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    for entry in &cfg.emotions {
        println!("{}\t{}", entry.tag, entry.template.display());
    }
    Ok(())
}
