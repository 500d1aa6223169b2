//! Command-line arguments.
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "nle-agent")]
#[command(about = "Roll out a language agent on MiniHack tasks", long_about = None)]
#[command(version)]
pub struct Args {
    /// Results are written to `<output-dir>/<exp-name>.json`
    #[arg(long, default_value = "test")]
    pub exp_name: String,

    /// Run a single task instead of the whole catalog
    #[arg(long, value_name = "TASK_ID")]
    pub task: Option<String>,

    /// `random`, `gpt`, or the URL of a likelihood service
    #[arg(long, default_value = "random", value_parser = parse_actor)]
    pub actor: ActorKind,

    #[arg(long, default_value_t = 10)]
    pub num_rollouts: usize,

    #[arg(long)]
    pub max_episode_steps: Option<usize>,

    /// Worked examples prepended to every chat conversation
    #[arg(long, default_value_t = 4)]
    pub fewshot: usize,

    /// Sampling temperature of the likelihood actor; 0 picks the best action
    #[arg(long, default_value_t = 1.0)]
    pub action_temp: f64,

    /// Show the few-shot explanations before each answer
    #[arg(long)]
    pub cot: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// TOML file with `[chat]`, `[retry]` and `[bridge]` tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Task catalog to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Few-shot examples to use instead of the built-in ones
    #[arg(long, value_name = "FILE")]
    pub fewshot_file: Option<PathBuf>,

    /// Engine bridge command, overriding the configured one
    #[arg(last = true, value_name = "BRIDGE")]
    pub bridge: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorKind {
    Random,
    Chat,
    /// Log-likelihood actor scored by the service at this URL.
    Likelihood(String),
}

fn parse_actor(value: &str) -> Result<ActorKind, String> {
    match value {
        "" => Err("actor must not be empty".to_string()),
        "random" => Ok(ActorKind::Random),
        "gpt" => Ok(ActorKind::Chat),
        url => Ok(ActorKind::Likelihood(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_match_a_random_rollout() {
        let args = Args::parse_from(["nle-agent"]);
        assert_eq!(args.exp_name, "test");
        assert_eq!(args.actor, ActorKind::Random);
        assert_eq!(args.num_rollouts, 10);
        assert_eq!(args.fewshot, 4);
        assert!(args.fewshot_file.is_none());
        assert!(args.bridge.is_empty());
    }

    #[test]
    fn unknown_actor_names_a_likelihood_service() {
        let args = Args::parse_from(["nle-agent", "--actor", "http://localhost:8000/score"]);
        assert_eq!(
            args.actor,
            ActorKind::Likelihood("http://localhost:8000/score".to_string())
        );

        let args = Args::parse_from([
            "nle-agent",
            "--actor",
            "gpt",
            "--cot",
            "--fewshot-file",
            "shots.ron",
        ]);
        assert_eq!(args.actor, ActorKind::Chat);
        assert!(args.cot);
        assert_eq!(args.fewshot_file.as_deref(), Some(Path::new("shots.ron")));
    }

    #[test]
    fn trailing_arguments_form_the_bridge_command() {
        let args = Args::parse_from([
            "nle-agent",
            "--task",
            "MiniHack-Eat-v0",
            "--",
            "python",
            "-m",
            "nle_bridge",
        ]);
        assert_eq!(args.task.as_deref(), Some("MiniHack-Eat-v0"));
        assert_eq!(args.bridge, vec!["python", "-m", "nle_bridge"]);
    }
}
