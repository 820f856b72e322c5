//! objfind CLI - list the objects found in images.

use clap::Parser;
use objfind::recog::{LabelSet, default_features, describe_objects};
use objfind::region::{fill_gaps, render_objects};
use objfind::{ImageFormat, ObjFindError, ObjFindOptions, Object, PixMut, PixelDepth};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "objfind")]
#[command(about = "Extract monochrome objects from images and list them by area")]
#[command(version)]
struct Cli {
    /// Input images (PNG, PNM or JPEG).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of gray levels after quantization (1..=256).
    #[arg(long, default_value_t = 8)]
    levels: u32,

    /// Skip pyramid smoothing.
    #[arg(long)]
    no_smooth: bool,

    /// Skip histogram equalization.
    #[arg(long)]
    no_equalize: bool,

    /// Draw the objects into an 8 bpp image at this path (single input only).
    #[arg(long)]
    render: Option<PathBuf>,

    /// Fill row gaps of each object before rendering.
    #[arg(long)]
    fill_gaps: bool,

    /// Append geometric feature columns.
    #[arg(long)]
    features: bool,

    /// Label file with `x,y,label` lines; appends a label column.
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Print at most this many objects per image.
    #[arg(long)]
    limit: Option<usize>,
}

impl Cli {
    fn options(&self) -> ObjFindOptions {
        ObjFindOptions::default()
            .with_levels(self.levels)
            .with_smooth(!self.no_smooth)
            .with_equalize(!self.no_equalize)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("objfind: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    if cli.render.is_some() && cli.inputs.len() != 1 {
        return Err(ObjFindError::InvalidParameters(
            "--render needs exactly one input image".into(),
        )
        .into());
    }
    let labels = match &cli.labels {
        Some(path) => Some(LabelSet::from_reader(BufReader::new(File::open(path)?))?),
        None => None,
    };
    let options = cli.options();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for input in &cli.inputs {
        let pix = objfind::io::read_image(input)?;
        let objs = objfind::extract_objects(&pix, &options)?;
        writeln!(out, "# {}: {} objects", input.display(), objs.len())?;
        print_objects(&mut out, cli, &objs, labels.as_ref())?;

        if let Some(path) = &cli.render {
            render(path, pix.width(), pix.height(), &objs, cli.fill_gaps)?;
            log::info!("rendered {} objects to {}", objs.len(), path.display());
        }
    }
    Ok(())
}

fn print_objects<W: Write>(
    out: &mut W,
    cli: &Cli,
    objs: &[Object],
    labels: Option<&LabelSet>,
) -> CliResult<()> {
    let features = if cli.features {
        default_features()
    } else {
        Vec::new()
    };
    let rows = describe_objects(&features, objs);

    let mut header = String::from("index,color,area,x,y,w,h");
    for f in &features {
        header.push(',');
        header.push_str(f.name());
    }
    if labels.is_some() {
        header.push_str(",label");
    }
    writeln!(out, "{header}")?;

    let limit = cli.limit.unwrap_or(objs.len());
    for (i, (obj, values)) in objs.iter().zip(&rows).take(limit).enumerate() {
        let b = obj.bound;
        write!(out, "{i},{},{},{},{},{},{}", obj.color, obj.area, b.x, b.y, b.w, b.h)?;
        for v in values {
            write!(out, ",{v:.6}")?;
        }
        if let Some(labels) = labels {
            write!(out, ",{}", labels.label_for(obj).unwrap_or(0))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render(path: &Path, width: u32, height: u32, objs: &[Object], fill: bool) -> CliResult<()> {
    let filled;
    let objs = if fill {
        filled = objs.iter().map(fill_gaps).collect::<Vec<_>>();
        &filled[..]
    } else {
        objs
    };
    let mut canvas = PixMut::new(width, height, PixelDepth::Bit8)?;
    render_objects(&mut canvas, objs, |_, o| o.color as u32)?;
    let format = match objfind::io::format_from_extension(path) {
        ImageFormat::Unknown => ImageFormat::Png,
        f => f,
    };
    let pix: objfind::Pix = canvas.into();
    objfind::io::write_image(&pix, path, format)?;
    Ok(())
}
