use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tinyplanet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a panorama from the tile server and render it as a planet.
    Render(RenderArgs),
    /// Render a local, already stitched panorama image.
    Warp(WarpArgs),
    /// List planets saved in a store.
    List(ListArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Panorama id.
    #[arg(long)]
    pano: String,

    /// Tile server host.
    #[arg(long, default_value = tinyplanet::DEFAULT_HOST)]
    host: String,

    /// Output JPEG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also save the result into this planet store.
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(flatten)]
    opts: OptArgs,
}

#[derive(Args, Debug)]
struct WarpArgs {
    /// Input panorama image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    opts: OptArgs,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Planet store root.
    #[arg(long)]
    store: PathBuf,
}

#[derive(Args, Debug)]
struct OptArgs {
    /// Render options JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Log-polar zoom factor.
    #[arg(long)]
    zoom: Option<f64>,

    /// Tile set zoom level to download.
    #[arg(long)]
    fetch_zoom: Option<u32>,

    /// Use nearest-neighbor sampling instead of bilinear.
    #[arg(long, default_value_t = false)]
    nearest: bool,

    /// Wrap samples around the panorama edges instead of clamping.
    #[arg(long, default_value_t = false)]
    wrap: bool,

    /// JPEG quality (1-100).
    #[arg(long)]
    quality: Option<u8>,

    /// Maximum tiles fetched at once.
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Override rayon worker threads for the warp.
    #[arg(long)]
    threads: Option<usize>,
}

impl OptArgs {
    fn resolve(&self) -> anyhow::Result<tinyplanet::RenderOpts> {
        let mut opts = match &self.config {
            Some(path) => tinyplanet::RenderOpts::from_path(path)?,
            None => tinyplanet::RenderOpts::default(),
        };
        if let Some(w) = self.width {
            opts.canvas.width = w;
        }
        if let Some(h) = self.height {
            opts.canvas.height = h;
        }
        if let Some(z) = self.zoom {
            opts.zoom = z;
        }
        if let Some(z) = self.fetch_zoom {
            opts.fetch_zoom = z;
        }
        if self.nearest {
            opts.interpolation = tinyplanet::Interpolation::Nearest;
        }
        if self.wrap {
            opts.edge = tinyplanet::EdgePolicy::Wrap;
        }
        if let Some(q) = self.quality {
            opts.jpeg_quality = q;
        }
        if let Some(n) = self.max_in_flight {
            opts.max_in_flight = n;
        }
        if let Some(t) = self.timeout_secs {
            opts.tile_timeout_secs = t;
        }
        if self.threads.is_some() {
            opts.threads = self.threads;
        }
        opts.validate()?;
        Ok(opts)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Warp(args) => cmd_warp(args),
        Command::List(args) => cmd_list(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.out.is_none() && args.store.is_none() {
        anyhow::bail!("nothing to do: pass --out and/or --store");
    }
    let opts = args.opts.resolve()?;
    let client = tinyplanet::StreetViewClient::new(
        args.host,
        Duration::from_secs(opts.tile_timeout_secs),
    )?;

    let raster = tinyplanet::render_planet(&args.pano, &client, &client, &opts)?;
    let jpeg = tinyplanet::encode_jpeg(&raster, opts.jpeg_quality)?;

    if let Some(out) = &args.out {
        write_output(out, &jpeg)?;
    }
    if let Some(root) = args.store {
        let store = tinyplanet::PlanetStore::open(root)?;
        let record = store.save(&args.pano, &jpeg)?;
        eprintln!("saved {}", store.root().join(&record.blob).display());
    }
    Ok(())
}

fn cmd_warp(args: WarpArgs) -> anyhow::Result<()> {
    let opts = args.opts.resolve()?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;
    let raster = tinyplanet::render_image(&bytes, &opts)?;
    let jpeg = tinyplanet::encode_jpeg(&raster, opts.jpeg_quality)?;
    write_output(&args.out, &jpeg)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let store = tinyplanet::PlanetStore::open(args.store)?;
    for r in store.records()? {
        println!("{}\t{}\t{}", r.created_unix, r.pano_id, r.blob);
    }
    Ok(())
}

fn write_output(out: &Path, jpeg: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, jpeg).with_context(|| format!("write jpeg '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
