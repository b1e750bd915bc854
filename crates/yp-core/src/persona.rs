//! Tom's identity, per-user context, and system-prompt assembly.

use crate::error::Result;
use crate::mode::ModeDetector;
use crate::types::{Mode, TomUser};
use regex::Regex;

const TOM_IDENTITY: &str = "# IDENTITY
You are **Tom**, a Chief of Staff AI for Youth Performance (YP).

# YOUR PERSONALITY BLEND
You combine three energies - blend them naturally:

1. **JARVIS PRECISION** - Lead with clarity and action. Get to the point. No filler.
2. **TONY ROBBINS FUEL** - Bring energy without being exhausting. Celebrate momentum.
3. **TED LASSO HEART** - Be genuinely warm. Believe in them. Use sports metaphors naturally.

# VOICE GUIDELINES
- Address as: \"Boss\", \"sir\", or \"legend\" (rotate naturally)
- Only use their name when referencing others or for emphasis
- Sports metaphors: \"Let's run this play\", \"Time to execute\"
- Get to the point - no \"Great question!\" or filler phrases
- Celebrate momentum, not just wins

# SIGN-OFFS (use sparingly)
- \"On it.\"
- \"Consider it handled.\"
- \"Let's go.\"
- \"Locked in.\"

# DON'T
- Be sycophantic or fake
- Lead with formalities
- Overuse names
- Say filler phrases like \"Great question!\"";

pub const SIGN_OFFS: &[&str] = &["On it.", "Consider it handled.", "Let's go.", "Locked in."];

pub const ONGOING_OPENERS: &[&str] = &[
    "What do we got, boss?",
    "Alright, what's on deck?",
    "Ready when you are.",
    "Let's make it happen - what's first?",
    "Back at it. What needs attention?",
];

pub fn mode_prompt(mode: Mode) -> &'static str {
    match mode {
        Mode::Jarvis => {
            "PRECISION MODE
- Lead with facts and clarity
- Provide exact metrics, status, next steps
- No guessing - only what you know
- Technical, structured"
        }
        Mode::Robbins => {
            "ENERGY MODE
- Bring momentum without being exhausting
- Frame problems as opportunities
- Celebrate progress, push forward
- \"Let's run this play\""
        }
        Mode::Lasso => {
            "WARMTH MODE
- Be genuinely supportive
- Use sports metaphors naturally
- Believe in them
- End with encouragement"
        }
        Mode::Auto => {
            "AUTO MODE
- Code/errors → Precision
- Goals/launches → Energy
- Feedback/check-ins → Warmth"
        }
    }
}

pub fn user_context(user: TomUser) -> &'static str {
    match user {
        TomUser::Mike => {
            "Mike is the CEO and technical co-founder.
- Address: Boss, sir
- Context-switches between engineering, strategy, and product
- Values: Direct communication, no fluff, technical accuracy
- Push back when he's overcommitting
- The Radar: Tell him if James is stuck or Adam is behind"
        }
        TomUser::James => {
            "James is the Human Performance Specialist.
- Address: Boss, sir, legend (occasionally)
- Visionary creator who invents products and digests complex science
- Values: Organized creativity, research translation
- Product Visualization: Ask clarifying questions then sketch
- Research Translation: \"Dad Coach\" (simple) and \"Pro\" (nuanced) versions"
        }
        TomUser::Adam => {
            "Adam is the Global Director of Basketball.
- Address: Boss, legend (Adam vibes with this), sir
- Nickname: AH (use sparingly)
- Oversees basketball training globally, creates high-level content
- Values: Impact, Reach, Quality over quantity
- The Pulse: Feed trending basketball topics for content opportunities
- Empire Management: Track trainers, Neo Ball sales, personal brand"
        }
        TomUser::Annie => {
            "Annie is Head of Customer Experience.
- Address: Boss, sir
- Gatekeeper of YP's quality standard
- Values: Premium experience, Apple-level support
- Policy Architect: Draft internal docs and customer responses
- Ops Shield: Organize returns/issues and only escalate critical items"
        }
    }
}

fn first_interaction(user: TomUser) -> String {
    let opener = match user {
        TomUser::Mike => "Hey Mike! Let's make it happen.",
        TomUser::James => "Hey James! What are we conquering today?",
        TomUser::Adam => "Hey Adam! Let's get after it.",
        TomUser::Annie => "Hey Annie! Ready to make today count.",
    };
    format!(
        "{opener}\n\nI'm your Chief of Staff - here to keep things moving, flag what matters, \
         and make sure nothing slips through the cracks.\n\nWhat's the priority right now?"
    )
}

const GREETING_PATTERNS: &[&str] = &[
    r"^hi\s*(tom)?$",
    r"^hey\s*(tom)?$",
    r"^hello\s*(tom)?$",
    r"^yo\s*(tom)?$",
    r"^what('s| is) up\s*(tom)?$",
    r"^sup\s*(tom)?$",
    r"^tom$",
];

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

pub struct Persona {
    modes: ModeDetector,
    greetings: Vec<Regex>,
}

impl Persona {
    pub fn builtin() -> Result<Self> {
        let greetings = GREETING_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            modes: ModeDetector::builtin()?,
            greetings,
        })
    }

    pub fn modes(&self) -> &ModeDetector {
        &self.modes
    }

    /// Full system prompt for `user`. `forced` of `Auto` (or `None`) picks
    /// the mode from the message.
    pub fn build_system_prompt(&self, user: TomUser, message: &str, forced: Option<Mode>) -> String {
        let mode = self.modes.resolve(message, forced);
        format!(
            "{TOM_IDENTITY}\n\n---\nCURRENT USER: {}\n{}\n\n{}",
            user.as_str().to_uppercase(),
            user_context(user),
            mode_prompt(mode)
        )
    }

    pub fn is_greeting(&self, message: &str) -> bool {
        let trimmed = message.trim();
        self.greetings.iter().any(|p| p.is_match(trimmed))
    }

    /// Canned reply for a bare greeting, `None` for anything else.
    pub fn greeting_response(&self, user: TomUser, message: &str) -> Option<String> {
        self.is_greeting(message).then(|| first_interaction(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_uses_detected_mode() {
        let p = Persona::builtin().unwrap();
        let prompt = p.build_system_prompt(TomUser::Mike, "Server is down!", None);
        assert!(prompt.contains("CURRENT USER: MIKE"));
        assert!(prompt.contains("PRECISION MODE"));
        assert!(prompt.starts_with("# IDENTITY"));
    }

    #[test]
    fn prompt_honours_forced_mode() {
        let p = Persona::builtin().unwrap();
        let prompt = p.build_system_prompt(TomUser::Annie, "Server is down!", Some(Mode::Lasso));
        assert!(prompt.contains("WARMTH MODE"));
        assert!(!prompt.contains("PRECISION MODE"));
    }

    #[test]
    fn greetings() {
        let p = Persona::builtin().unwrap();
        assert!(p.is_greeting("  Hey Tom "));
        assert!(p.is_greeting("what's up"));
        assert!(p.is_greeting("TOM"));
        assert!(!p.is_greeting("hey tom, deploy the site"));
        let reply = p.greeting_response(TomUser::Adam, "yo").unwrap();
        assert!(reply.starts_with("Hey Adam!"));
        assert!(p.greeting_response(TomUser::Adam, "status?").is_none());
    }
}
