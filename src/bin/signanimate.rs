use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use signanimate::{
    AnimStyle, EXPORT_SCALE, PotraceTracer, RawSample, Session, Settings, SignatureArt,
    SourceImage, animated_snippet, frame_svg, rasterize_png, static_svg,
};

#[derive(Parser, Debug)]
#[command(name = "signanimate", version)]
struct Cli {
    /// Log level written to stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Settings JSON; missing fields use defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay recorded pointer strokes and export the drawn signature.
    Draw(DrawArgs),
    /// Trace an uploaded signature image (requires `potrace`).
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Reveal style: letter, flow or classic.
    #[arg(long)]
    style: Option<String>,

    /// Speed multiplier (> 0).
    #[arg(long)]
    speed: Option<f64>,

    /// Also write the reveal frame at this many seconds as frame.png.
    #[arg(long)]
    frame_at: Option<f64>,
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// JSON array of strokes, each an array of `{x, y, t}` samples on the 600x200 pad.
    #[arg(long)]
    strokes: PathBuf,

    /// Write the raster ink canvas at this pixel scale as ink.png.
    #[arg(long)]
    ink_scale: Option<f64>,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args, Debug)]
struct TraceArgs {
    /// PNG or JPEG image of the signature.
    #[arg(long)]
    image: PathBuf,

    /// Luma threshold (1..=254); brighter pixels are background.
    #[arg(long)]
    threshold: Option<u8>,

    /// Gaussian blur radius applied before thresholding.
    #[arg(long)]
    blur: Option<u32>,

    #[command(flatten)]
    export: ExportArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    match cli.cmd {
        Command::Draw(args) => {
            apply_export_overrides(&mut settings, &args.export)?;
            cmd_draw(args, &settings)
        }
        Command::Trace(args) => {
            apply_export_overrides(&mut settings, &args.export)?;
            if let Some(t) = args.threshold {
                settings.trace.threshold = t;
            }
            if let Some(r) = args.blur {
                settings.trace.blur_radius = r;
            }
            settings.validate()?;
            cmd_trace(args, &settings)
        }
    }
}

fn apply_export_overrides(settings: &mut Settings, args: &ExportArgs) -> anyhow::Result<()> {
    if let Some(style) = &args.style {
        settings.animation.style = AnimStyle::parse(style);
    }
    if let Some(speed) = args.speed {
        settings.animation.speed = speed;
    }
    settings.validate()?;
    Ok(())
}

fn read_strokes(path: &Path) -> anyhow::Result<Vec<Vec<RawSample>>> {
    let f = File::open(path).with_context(|| format!("open strokes '{}'", path.display()))?;
    let strokes: Vec<Vec<RawSample>> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse strokes JSON")?;
    Ok(strokes)
}

fn cmd_draw(args: DrawArgs, settings: &Settings) -> anyhow::Result<()> {
    let strokes = read_strokes(&args.strokes)?;
    let mut session = Session::from_settings(PotraceTracer::from_env(), settings);
    if let Some(scale) = args.ink_scale {
        session = session.with_ink_canvas(scale)?;
    }

    for stroke in &strokes {
        let Some((first, rest)) = stroke.split_first() else {
            continue;
        };
        session.start_stroke(*first);
        for sample in rest {
            session.continue_stroke(*sample);
        }
        session.end_stroke();
    }

    let art = session
        .animate_drawing()
        .cloned()
        .context("no strokes with at least two samples")?;
    write_exports(&art, settings, &args.export)?;

    if let Some(png) = session.ink_png()? {
        write_file(&args.export.out.join("ink.png"), &png)?;
    }
    Ok(())
}

fn cmd_trace(args: TraceArgs, settings: &Settings) -> anyhow::Result<()> {
    let source = SourceImage::open(&args.image)?;
    let mut session = Session::from_settings(PotraceTracer::from_env(), settings);
    let art = session.load_image_at(source, settings.trace.threshold)?.clone();
    if art.is_empty() {
        tracing::warn!("no ink paths survived tracing; try another --threshold");
    }
    write_exports(&art, settings, &args.export)
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct TimingReport<'a> {
    style: AnimStyle,
    speed: f64,
    total_duration: f64,
    view_box: String,
    paths: Vec<PathTimingReport<'a>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PathTimingReport<'a> {
    d: &'a str,
    #[serde(flatten)]
    meta: signanimate::ClusterMeta,
    #[serde(flatten)]
    timing: signanimate::Timing,
}

fn write_exports(
    art: &SignatureArt,
    settings: &Settings,
    args: &ExportArgs,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    let anim = &settings.animation;

    let svg = static_svg(art);
    write_file(&args.out.join("signature.svg"), svg.as_bytes())?;
    write_file(
        &args.out.join("signature.png"),
        &rasterize_png(&svg, EXPORT_SCALE)?,
    )?;
    write_file(
        &args.out.join("snippet.html"),
        animated_snippet(art, anim.style, anim.speed).as_bytes(),
    )?;

    let plan = art.reveal_plan(anim.style, anim.speed);
    let report = TimingReport {
        style: anim.style,
        speed: plan.speed,
        total_duration: plan.total_duration(),
        view_box: art.view_box.to_string(),
        paths: art
            .paths
            .iter()
            .zip(&plan.timings)
            .map(|((_, d, meta), timing)| PathTimingReport {
                d,
                meta: *meta,
                timing: *timing,
            })
            .collect(),
    };
    let json = serde_json::to_vec_pretty(&report).context("serialize timing report")?;
    write_file(&args.out.join("timing.json"), &json)?;

    if let Some(t) = args.frame_at {
        let frame = frame_svg(art, &plan, t);
        write_file(
            &args.out.join("frame.png"),
            &rasterize_png(&frame, EXPORT_SCALE)?,
        )?;
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
