use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use std::sync::Arc;
use tom_agent::{AnthropicGenerator, SmartClassifier};
use yp_core::config::Config;
use yp_core::intent::IntentClassifier;
use yp_core::mode::ModeDetector;
use yp_core::persona::Persona;
use yp_core::{Mode, TomUser};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TomSubcommand {
    /// Detect the personality mode for a message
    Mode {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Classify a message's intent (pattern table; model fallback with --user)
    Classify {
        /// Classify on behalf of this user, enabling the model fallback
        #[arg(long)]
        user: Option<TomUser>,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Print the system prompt Tom would use
    Prompt {
        #[arg(long)]
        user: TomUser,
        /// jarvis, robbins, lasso, or auto
        #[arg(long)]
        mode: Option<Mode>,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Route a message to a tool as if it arrived over WhatsApp
    Route {
        #[arg(long)]
        user: TomUser,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: TomSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TomSubcommand::Mode { message } => mode(&message.join(" "), json),
        TomSubcommand::Classify { user, message } => classify(root, user, &message.join(" "), json),
        TomSubcommand::Prompt {
            user,
            mode,
            message,
        } => prompt(user, mode, &message.join(" ")),
        TomSubcommand::Route { user, message } => route(root, user, &message.join(" "), json),
    }
}

fn mode(message: &str, json: bool) -> anyhow::Result<()> {
    let detected = ModeDetector::builtin()?.detect(message);
    if json {
        print_json(&serde_json::json!({ "mode": detected }))
    } else {
        println!("{detected}");
        Ok(())
    }
}

fn classify(root: &Path, user: Option<TomUser>, message: &str, json: bool) -> anyhow::Result<()> {
    let fast = IntentClassifier::builtin()?;

    let result = match user {
        None => fast.classify_fast(message),
        Some(user) => {
            let config = Config::load(root).context("failed to load config")?;
            let tom = &config.tom;
            let generator = AnthropicGenerator::from_env(tom.models.clone(), tom.request_timeout())?;
            let smart = SmartClassifier::new(fast, Arc::new(generator), tom.fast_confidence_threshold);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(smart.classify(message, &user.cos_profile_id()))
        }
    };

    if json {
        print_json(&result)
    } else {
        println!("{} ({:.2})", result.intent, result.confidence);
        Ok(())
    }
}

fn prompt(user: TomUser, mode: Option<Mode>, message: &str) -> anyhow::Result<()> {
    let persona = Persona::builtin()?;
    println!("{}", persona.build_system_prompt(user, message, mode));
    Ok(())
}

fn route(root: &Path, user: TomUser, message: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let router = tom_agent::router_from_config(&config.tom).context("failed to build router")?;

    let rt = tokio::runtime::Runtime::new()?;
    let routed = rt.block_on(router.route(user, message));

    if json {
        return print_json(&serde_json::json!({ "routed": routed }));
    }
    match routed {
        Some(r) => println!("{}: {}", r.tool, r.result.kind()),
        None => println!("not routed (conversational reply)"),
    }
    Ok(())
}
