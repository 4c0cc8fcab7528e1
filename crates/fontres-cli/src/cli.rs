//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use fontres_core::{weight, Pitch, Script, StyleHint, WritingSystem};

/// fontres - Resolve abstract font requests against a face catalog
#[derive(Parser, Debug)]
#[command(name = "fontres")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON manifest listing the faces to catalog
    #[arg(short = 'm', long, global = true, default_value = "faces.json")]
    pub manifest: PathBuf,

    /// JSON resolver configuration (tuning, fallback names, cache limits)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a font request to a concrete face
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// List catalogued families
    #[command(alias = "f")]
    Families(FamiliesArgs),

    /// List the styles, sizes and coverage of one family
    Styles(StylesArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Comma separated family names, each optionally "Family [Foundry]"
    #[arg(short = 'f', long)]
    pub family: String,

    /// Restrict candidates to this foundry
    #[arg(long)]
    pub foundry: Option<String>,

    /// Weight, 0-99 (25 light, 50 normal, 75 bold)
    #[arg(short = 'w', long, default_value_t = weight::NORMAL)]
    pub weight: u8,

    #[arg(long, conflicts_with = "oblique")]
    pub italic: bool,

    #[arg(long)]
    pub oblique: bool,

    /// Stretch percentage, 0 for any
    #[arg(long, default_value_t = 0)]
    pub stretch: u16,

    /// Pixel size
    #[arg(short = 's', long, default_value_t = 12)]
    pub size: u16,

    /// proportional, monospace, cellular or any
    #[arg(long, default_value = "any")]
    pub pitch: Pitch,

    /// Target script, e.g. latin, arabic, han
    #[arg(long, conflicts_with = "text")]
    pub script: Option<Script>,

    /// Sample text; its first significant script becomes the target
    #[arg(short = 't', long)]
    pub text: Option<String>,

    /// Style hint: any, sans-serif, serif, typewriter, monospace, ...
    #[arg(long, default_value = "any")]
    pub hint: StyleHint,

    /// Strategy flags, comma separated: prefer-bitmap, force-outline, prefer-match, ...
    #[arg(long, value_delimiter = ',')]
    pub strategy: Vec<String>,

    /// Only accept this encoding, e.g. iso8859-1
    #[arg(long)]
    pub encoding: Option<String>,

    /// Family substitution, repeatable: --substitute "Arial=Helvetica"
    #[arg(long = "substitute", value_name = "FAMILY=SUBSTITUTE")]
    pub substitutes: Vec<String>,
}

/// Arguments for the families command
#[derive(Args, Debug)]
pub struct FamiliesArgs {
    /// Only families known to cover this writing system
    #[arg(long = "writing-system", default_value = "any")]
    pub writing_system: WritingSystem,
}

/// Arguments for the styles command
#[derive(Args, Debug)]
pub struct StylesArgs {
    /// Family name, any case
    pub family: String,
}
