//! Resolve command implementation
//!
//! Turns the arguments into a request, resolves it, and prints the chosen
//! face.

use fontres_core::{
    EncodingId, FontRequest, ResolvedDescriptor, Script, Slant, StyleKey, StyleStrategy,
};
use fontres_db::fallback_chain;
use fontres_unicode::ScriptDetector;
use serde::Serialize;

use crate::cli::{Cli, ResolveArgs};
use crate::commands::{open_context, print_json};
use crate::error::{CliError, Result};

#[derive(Serialize)]
struct Report<'a> {
    request: &'a str,
    script: Script,
    chain: Vec<String>,
    #[serde(flatten)]
    descriptor: &'a ResolvedDescriptor,
}

pub fn run(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let request = build_request(args)?;
    let mut context = open_context(cli)?;
    for pair in &args.substitutes {
        let (family, substitute) = pair.split_once('=').ok_or_else(|| {
            CliError::Invalid(format!("bad substitution '{pair}', want FAMILY=SUBSTITUTE"))
        })?;
        context.insert_substitution(family, substitute);
    }

    let descriptor = context.resolve(&request)?;
    let chain: Vec<String> = fallback_chain(&request, context.substitutions(), context.config())
        .iter()
        .map(ToString::to_string)
        .collect();

    if cli.json {
        return print_json(&Report {
            request: &request.family,
            script: request.script,
            chain,
            descriptor: &descriptor,
        });
    }

    let foundry = if descriptor.foundry.is_empty() {
        String::new()
    } else {
        format!(" [{}]", descriptor.foundry)
    };
    println!("{}{} {}", descriptor.family, foundry, descriptor.style);
    println!("  size:     {} at {}px", descriptor.size, descriptor.pixel_size);
    println!("  encoding: {}", descriptor.encoding);
    println!("  pitch:    {:?}", descriptor.pitch);
    println!("  script:   {}", request.script);
    println!("  score:    {:#06x}", descriptor.score);
    if descriptor.is_bitmap_scaled() {
        println!("  (scaled from a bitmap)");
    }
    Ok(())
}

fn build_request(args: &ResolveArgs) -> Result<FontRequest> {
    let slant = if args.italic {
        Slant::Italic
    } else if args.oblique {
        Slant::Oblique
    } else {
        Slant::Roman
    };

    let mut strategy = StyleStrategy::empty();
    for name in args.strategy.iter().filter(|n| !n.trim().is_empty()) {
        let flag = StyleStrategy::parse_flag(name)
            .ok_or_else(|| CliError::Invalid(format!("unknown strategy flag '{name}'")))?;
        strategy |= flag;
    }

    let script = match (&args.script, &args.text) {
        (Some(script), _) => *script,
        (None, Some(text)) => ScriptDetector::new().script_of(text),
        (None, None) => Script::Common,
    };

    let style = StyleKey::new(args.weight, slant, args.stretch);
    let mut request = FontRequest::new(args.family.as_str())
        .weight(style.weight)
        .slant(style.slant)
        .stretch(style.stretch)
        .pixel_size(args.size)
        .pitch(args.pitch)
        .script(script)
        .style_hint(args.hint)
        .strategy(strategy);

    if let Some(foundry) = &args.foundry {
        request = request.foundry(foundry.as_str());
    }
    if let Some(name) = &args.encoding {
        let encoding = EncodingId::from_name(name)
            .ok_or_else(|| CliError::Invalid(format!("unknown encoding '{name}'")))?;
        request = request.force_encoding(encoding);
    }
    Ok(request)
}
