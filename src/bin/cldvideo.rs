use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cldvideo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a video document and print the element as JSON.
    Render(RenderArgs),
    /// Compare two documents and print whether the element must reload.
    Diff(DiffArgs),
    /// Compile a single delivery URL.
    Url(UrlArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input video document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct DiffArgs {
    /// Previously rendered document.
    #[arg(long)]
    prev: PathBuf,

    /// Next document.
    #[arg(long)]
    next: PathBuf,
}

#[derive(Parser, Debug)]
struct UrlArgs {
    /// Cloud (account) name.
    #[arg(long)]
    cloud: String,

    /// Public id of the asset.
    #[arg(long)]
    public_id: String,

    /// Resource type: video, image or raw.
    #[arg(long, default_value = "video")]
    resource_type: String,

    /// File extension appended to the public id.
    #[arg(long)]
    format: Option<String>,

    /// Use https.
    #[arg(long)]
    secure: bool,

    /// One chain step as a JSON object; repeat for more steps.
    #[arg(long = "step")]
    steps: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Diff(args) => cmd_diff(args),
        Command::Url(args) => cmd_url(args),
    }
}

fn read_doc(path: &Path) -> anyhow::Result<cldvideo::VideoDocument> {
    cldvideo::VideoDocument::from_path(path)
        .with_context(|| format!("load video document '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    let rendered = doc
        .render()
        .with_context(|| format!("render '{}'", args.in_path.display()))?;

    let out = serde_json::json!({
        "fingerprint": rendered.snapshot.fingerprint().to_string(),
        "element": rendered.element,
    });
    let text = if args.pretty {
        serde_json::to_string_pretty(&out)
    } else {
        serde_json::to_string(&out)
    }
    .with_context(|| "encode rendered element")?;

    println!("{text}");
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let prev = read_doc(&args.prev)?
        .render()
        .with_context(|| format!("render '{}'", args.prev.display()))?;
    let next = read_doc(&args.next)?
        .render()
        .with_context(|| format!("render '{}'", args.next.display()))?;

    let reload = cldvideo::should_reload(&prev.snapshot, &next.snapshot);
    println!("{}", if reload { "reload" } else { "keep" });
    eprintln!(
        "{} -> {}",
        prev.snapshot.fingerprint(),
        next.snapshot.fingerprint()
    );
    Ok(())
}

fn cmd_url(args: UrlArgs) -> anyhow::Result<()> {
    let resource_type: cldvideo::ResourceType = args.resource_type.parse()?;
    let mut asset = cldvideo::AssetRef::video(args.cloud, args.public_id)
        .with_resource_type(resource_type);
    if let Some(format) = args.format {
        asset = asset.with_format(format);
    }

    let steps = args
        .steps
        .iter()
        .map(|s| {
            serde_json::from_str::<cldvideo::TransformationStep>(s)
                .with_context(|| format!("parse --step '{s}' as a JSON object"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let url = cldvideo::compile(
        &asset,
        &steps,
        cldvideo::Protocol::from_secure(args.secure),
    )?;
    println!("{url}");
    Ok(())
}
