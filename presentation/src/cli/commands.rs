//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::{Agent, Role};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript with every step and vote
    Full,
    /// Only the final answer and the vote summary
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Answer => council_domain::OutputFormat::Answer,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for ai-council
#[derive(Parser, Debug)]
#[command(name = "ai-council")]
#[command(author, version, about = "AI Council - Multiple LLM agents debate and vote on an answer")]
#[command(long_about = r#"
AI Council runs a structured debate between LLM agents and decides the
outcome by vote.

The debate walks fixed phases:
1. Propose:     thinkers propose solutions
2. Critique:    critics challenge the proposals
3. Revise:      thinkers revise, critics re-evaluate
4. Specialists: any other roles weigh in
5. Verdict:     judges give the final answer
6. Vote:        every agent votes APPROVE / REJECT / NEEDS REVISION

Without approval the thinkers revise again, up to --max-rounds times.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/ai-council/config.toml   Global config

Example:
  ai-council "Should we rewrite the billing service in Rust?"
  ai-council -f design.md -u https://example.com/rfc "Review this design"
  ai-council -a a=Alice,thinker,groq,llama-3.3-70b-versatile \
             -a b=Bob,judge,google,gemini-2.0-flash "Is P = NP?"
"#)]
pub struct Cli {
    /// The question to put to the council
    pub question: Option<String>,

    /// Council member as id=name,role,provider,model (repeatable; replaces the configured council)
    #[arg(short, long = "agent", value_name = "SPEC", value_parser = parse_agent)]
    pub agents: Vec<Agent>,

    /// File to attach as context (repeatable)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// URL to fetch and attach as context (repeatable)
    #[arg(short, long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Maximum revision rounds after a non-approving vote
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Output format (defaults to the configured format, then "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Plain progress lines instead of a spinner
    #[arg(long)]
    pub plain: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Show provider rate limits and API key status and exit
    #[arg(long)]
    pub providers: bool,

    /// Append the debate transcript as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write daily-rotated diagnostic logs into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Parse `id=name,role,provider,model`.
///
/// An empty name falls back to the id.
pub fn parse_agent(spec: &str) -> Result<Agent, String> {
    let (id, rest) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected id=name,role,provider,model, got {:?}", spec))?;

    let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
    let [name, role, provider, model] = fields.as_slice() else {
        return Err(format!(
            "expected 4 comma-separated fields after '=', got {}",
            fields.len()
        ));
    };

    let id = id.trim();
    if id.is_empty() {
        return Err("agent id must not be empty".to_string());
    }
    if role.is_empty() || provider.is_empty() || model.is_empty() {
        return Err(format!("role, provider and model are required in {:?}", spec));
    }

    let name: &str = if name.is_empty() { id } else { name };
    Ok(Agent::new(id, name, Role::from_id(role), *provider, *model))
}
