use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use yp_core::voice::{build_content_system_prompt, enforce_voice, validate_voice, VoiceRegistry};
use yp_core::ContentType;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum VoiceSubcommand {
    /// List every voice profile
    List,

    /// Check content against a voice; exits non-zero on violations
    Lint {
        /// Profile id, e.g. JAMES or ADAM_COS
        #[arg(long)]
        profile: String,
        /// File to check (default: stdin)
        file: Option<PathBuf>,
    },

    /// Apply automatic term replacements and print the result
    Fix {
        #[arg(long)]
        profile: String,
        /// File to fix (default: stdin)
        file: Option<PathBuf>,
    },

    /// Print the content-generation system prompt for a voice
    Prompt {
        #[arg(long)]
        profile: String,
        /// pillar, spoke, qa, or drill
        #[arg(long)]
        content_type: ContentType,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(_root: &Path, subcmd: VoiceSubcommand, json: bool) -> anyhow::Result<()> {
    let registry = VoiceRegistry::builtin();
    match subcmd {
        VoiceSubcommand::List => list(&registry, json),
        VoiceSubcommand::Lint { profile, file } => lint(&registry, &profile, file.as_deref(), json),
        VoiceSubcommand::Fix { profile, file } => {
            let voice = registry.get(&profile)?;
            print!("{}", enforce_voice(&read_content(file.as_deref())?, voice));
            Ok(())
        }
        VoiceSubcommand::Prompt {
            profile,
            content_type,
        } => {
            let voice = registry.get(&profile)?;
            println!("{}", build_content_system_prompt(voice, content_type));
            Ok(())
        }
    }
}

fn read_content(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}

fn list(registry: &VoiceRegistry, json: bool) -> anyhow::Result<()> {
    let profiles = registry.list();
    if json {
        return print_json(&profiles);
    }
    let rows = profiles
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                p.title.clone(),
                p.domains.join(", "),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "TITLE", "DOMAINS"], rows);
    Ok(())
}

fn lint(registry: &VoiceRegistry, profile: &str, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let voice = registry.get(profile)?;
    let report = validate_voice(&read_content(file)?, voice);

    if json {
        print_json(&report)?;
    } else if report.is_valid {
        println!("No voice violations for {profile}.");
    } else {
        for v in &report.violations {
            println!("- {v}");
        }
    }

    if !report.is_valid {
        anyhow::bail!("{} voice violation(s) for {profile}", report.violations.len());
    }
    Ok(())
}
