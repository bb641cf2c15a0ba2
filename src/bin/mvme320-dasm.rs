use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use n8x305_dasm::disassembler::write_listing;
use n8x305_dasm::{Disassembler, DisassemblyOptions, LabelTable, RomImage, RomPart, RomSize};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mvme320-dasm")]
#[command(about = "Disassemble MVME320 N8X305 microcode PROMs into an annotated listing")]
#[command(version)]
struct Args {
    /// U1 PROM dump (instruction high byte)
    #[arg(long, value_name = "FILE")]
    even: Option<PathBuf>,

    /// U9 PROM dump (instruction low byte)
    #[arg(long, value_name = "FILE")]
    odd: Option<PathBuf>,

    /// U3 PROM dump (Fast-I/O byte)
    #[arg(long, value_name = "FILE")]
    fast_io: Option<PathBuf>,

    /// Directory holding <prefix>u1.bin, <prefix>u9.bin and <prefix>u3.bin
    #[arg(long, value_name = "DIR")]
    rom_dir: Option<PathBuf>,

    /// File name prefix used with --rom-dir
    #[arg(long, default_value = "3.0-")]
    prefix: String,

    /// Label/comment table (CSV with pc,label,comment columns)
    #[arg(short, long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// ROM depth in words
    #[arg(short, long, value_enum, default_value = "1k")]
    size: SizeArg,

    /// Do not infer comments for unannotated lines
    #[arg(long)]
    no_auto_comments: bool,

    /// Output listing (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SizeArg {
    #[value(name = "1k")]
    OneK,
    #[value(name = "4k")]
    FourK,
}

impl From<SizeArg> for RomSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::OneK => RomSize::Words1K,
            SizeArg::FourK => RomSize::Words4K,
        }
    }
}

/// Pick the dump for one PROM: an explicit path wins over --rom-dir.
fn part_path(explicit: Option<&Path>, args: &Args, part: RomPart) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    match &args.rom_dir {
        Some(dir) => Ok(dir.join(format!("{}{}.bin", args.prefix, part.designator()))),
        None => bail!(
            "no dump for ROM part {}: pass --{} or --rom-dir",
            part,
            match part {
                RomPart::Even => "even",
                RomPart::Odd => "odd",
                RomPart::FastIo => "fast-io",
            }
        ),
    }
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(&args) {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let even = part_path(args.even.as_deref(), args, RomPart::Even)?;
    let odd = part_path(args.odd.as_deref(), args, RomPart::Odd)?;
    let fast_io = part_path(args.fast_io.as_deref(), args, RomPart::FastIo)?;

    let rom = RomImage::load(&even, &odd, &fast_io, args.size.into())
        .with_context(|| format!("loading ROM from {}", even.display()))?;

    let labels = args
        .labels
        .as_ref()
        .map(|path| {
            LabelTable::load(path).with_context(|| format!("loading labels from {}", path.display()))
        })
        .transpose()?;

    let options = DisassemblyOptions {
        auto_comment: !args.no_auto_comments,
    };
    log::debug!("options: {:?}, labels: {}", options, labels.is_some());

    // Nothing is written unless every address decodes
    let lines = Disassembler::new(&rom, labels.as_ref(), options).disassemble()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_listing(&lines, BufWriter::new(file))?;
        }
        None => write_listing(&lines, io::stdout().lock())?,
    }

    Ok(())
}
