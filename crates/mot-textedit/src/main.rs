//! mot-textedit - Master of Time text dumper and injector
//!
//! Usage: mot-textedit [OPTIONS] <COMMAND>

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser as ClapParser, Subcommand};
use mot_textedit::common::DiagnosticReporter;
use mot_textedit::io::{load_image, read_text, save_image, write_text};
use mot_textedit::rom::{ChecksumStatus, ChecksumVerdict, TextLayout, update_checksum, verify_checksum};
use mot_textedit::Editor;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "mot-textedit")]
#[command(author = "z64.me")]
#[command(version)]
#[command(about = "Dump and inject game text for the Master of Time romhack", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode the message table of a clean image into a text file
    Dump {
        /// Decompressed 64 MiB image
        rom: PathBuf,

        /// Output text file
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,
    },

    /// Encode a text file into the image and fix its checksum
    Inject {
        /// Decompressed 64 MiB image to start from
        rom: PathBuf,

        /// Edited text file
        #[arg(default_value = "input.txt")]
        input: PathBuf,

        /// Output image
        #[arg(short, long, default_value = "mot-edited.z64")]
        output: PathBuf,
    },

    /// Report the CIC variant and whether the header checksum is correct
    Checksum {
        /// Decompressed 64 MiB image
        rom: PathBuf,

        /// Rewrite the checksum in place if it is wrong
        #[arg(long)]
        fix: bool,
    },
}

/// Overrides for the text layout (defaults match Master of Time)
#[derive(ClapArgs, Debug)]
struct LayoutArgs {
    /// Image offset of the message table
    #[arg(long, global = true, value_parser = parse_number)]
    table_start: Option<usize>,

    /// Length of the message table in bytes
    #[arg(long, global = true, value_parser = parse_number)]
    table_len: Option<usize>,

    /// Image offset of the strings file's dmadata entry
    #[arg(long, global = true, value_parser = parse_number)]
    dma_entry: Option<usize>,

    /// Maximum size of the strings file in bytes
    #[arg(long, global = true, value_parser = parse_number)]
    strings_max: Option<usize>,
}

impl LayoutArgs {
    fn to_layout(&self) -> TextLayout {
        let defaults = TextLayout::default();
        TextLayout {
            table_start: self.table_start.unwrap_or(defaults.table_start),
            table_len: self.table_len.unwrap_or(defaults.table_len),
            dma_entry: self.dma_entry.unwrap_or(defaults.dma_entry),
            strings_max: self.strings_max.unwrap_or(defaults.strings_max),
            ..defaults
        }
    }
}

/// Accept `0x`-prefixed hex or decimal
fn parse_number(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let editor = Editor::new(args.layout.to_layout());

    match &args.command {
        Command::Dump { rom, output } => dump(&editor, rom, output),
        Command::Inject { rom, input, output } => inject(&editor, rom, input, output),
        Command::Checksum { rom, fix } => checksum(rom, *fix),
    }
}

fn dump(editor: &Editor, rom: &Path, output: &Path) -> anyhow::Result<()> {
    let image = load_image(rom).with_context(|| format!("failed to load rom '{}'", rom.display()))?;
    let text = editor.dump(&image)?;
    write_text(output, &text)?;
    info!("wrote file '{}' successfully", output.display());
    Ok(())
}

fn inject(editor: &Editor, rom: &Path, input: &Path, output: &Path) -> anyhow::Result<()> {
    let mut image =
        load_image(rom).with_context(|| format!("failed to load rom '{}'", rom.display()))?;
    let script = read_text(input)?;

    let report = match editor.inject(&mut image, &script) {
        Ok(report) => report,
        Err(err) => {
            let mut reporter = DiagnosticReporter::new();
            let file_id = reporter.add_file(input.display().to_string(), script);
            reporter.report_error(file_id, &err);
            bail!("'{}' was not injected", input.display());
        }
    };

    if let ChecksumStatus::Skipped { boot_crc } = report.checksum {
        info!("boot code {boot_crc:08x} not recognized; header checksum was not updated");
    }

    save_image(output, &image)?;
    info!("successfully wrote '{}'", output.display());
    Ok(())
}

fn checksum(rom: &Path, fix: bool) -> anyhow::Result<()> {
    let mut image =
        load_image(rom).with_context(|| format!("failed to load rom '{}'", rom.display()))?;

    match verify_checksum(&image) {
        ChecksumVerdict::Valid { cic, crc } => {
            println!("{cic}: checksum {:08x} {:08x} ok", crc[0], crc[1]);
        }
        ChecksumVerdict::Unrecognized { boot_crc } => {
            println!("unknown CIC (boot code crc32 {boot_crc:08x}); checksum cannot be verified");
        }
        ChecksumVerdict::Mismatch { cic, stored, computed } => {
            println!(
                "{cic}: stored checksum {:08x} {:08x}, expected {:08x} {:08x}",
                stored[0], stored[1], computed[0], computed[1]
            );
            if !fix {
                bail!("checksum mismatch (rerun with --fix to repair)");
            }
            update_checksum(&mut image);
            save_image(rom, &image)?;
            info!("rewrote checksum in '{}'", rom.display());
        }
    }

    Ok(())
}
