//! Rollout binary.
//!
//! Composition root: loads configuration, installs logging, builds the chosen
//! actor and the engine bridge, then rolls the actor out over the selected
//! tasks and writes `<output-dir>/<exp-name>.json`.
//!
//! # Examples
//!
//! ```bash
//! # Random baseline on one task, engine hosted by the configured bridge
//! nle-agent --task MiniHack-Eat-v0 --num-rollouts 5
//!
//! # Chat actor with chain-of-thought examples and a custom bridge command
//! OPENAI_API_KEY=... nle-agent --actor gpt --cot -- python3 -m nle_bridge
//! ```
mod cli;
mod config;
mod logging;

use std::sync::Arc;

use agent_runtime::{
    ActorPolicy, BridgeFactory, ChatActor, HttpLikelihood, LogitActor, OpenAiChat, RandomActor,
    RolloutConfig, RolloutDriver,
};
use anyhow::{Context, Result};
use clap::Parser;
use nle_content::{FewShotLibrary, TaskCatalog};

use cli::{ActorKind, Args};
use config::AgentConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // 1. Load configuration (file, then environment, then command line)
    let mut config = AgentConfig::load(args.config.as_deref())?;
    config.bridge.override_with(&args.bridge);

    // 2. Setup logging
    let _guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!("Starting rollouts: experiment={}", args.exp_name);
    tracing::info!("Actor: {:?}", args.actor);
    tracing::info!(
        "Bridge: {} {}",
        config.bridge.program,
        config.bridge.args.join(" ")
    );

    // 3. Load content
    let catalog = match &args.catalog {
        Some(path) => TaskCatalog::from_path(path)?,
        None => TaskCatalog::embedded()?,
    };

    // 4. Build the actor
    let mut actor = build_actor(&args, &config, &catalog)?;

    // 5. Run
    let factory = BridgeFactory::new(config.bridge.program.clone(), config.bridge.args.clone());
    let driver = RolloutDriver::new(
        RolloutConfig {
            exp_name: args.exp_name.clone(),
            output_dir: args.output_dir.clone(),
            num_rollouts: args.num_rollouts,
            max_episode_steps: args.max_episode_steps,
        },
        catalog,
    );
    let tasks = driver.tasks(args.task.as_deref())?;
    tracing::info!("Running {} task(s)", tasks.len());

    let results = driver.run(&tasks, &factory, actor.as_mut()).await?;

    tracing::info!(
        "Rollouts complete, results written to {}",
        driver.config().results_path().display()
    );
    for (task, stats) in results.iter() {
        tracing::info!(
            "{}: reward={:.3} success={:.3} death={:.3}",
            task,
            stats.reward,
            stats.success,
            stats.death
        );
    }

    Ok(())
}

fn build_actor(
    args: &Args,
    config: &AgentConfig,
    catalog: &TaskCatalog,
) -> Result<Box<dyn ActorPolicy>> {
    let actor: Box<dyn ActorPolicy> = match &args.actor {
        ActorKind::Random => match args.seed {
            Some(seed) => Box::new(RandomActor::seeded(seed)),
            None => Box::new(RandomActor::new()),
        },
        ActorKind::Chat => {
            let library = match &args.fewshot_file {
                Some(path) => FewShotLibrary::from_path(path)?,
                None => FewShotLibrary::embedded()?,
            };
            let examples = library
                .resolve(catalog, args.fewshot)
                .context("Failed to resolve few-shot examples")?;
            tracing::info!(
                "Chat model {} with {} example(s), cot={}",
                config.chat.model,
                examples.len(),
                args.cot
            );

            let completion = Arc::new(OpenAiChat::new(config.chat.clone()));
            let actor =
                ChatActor::new(completion, examples, args.cot).with_retry(config.retry.policy());
            match args.seed {
                Some(seed) => Box::new(actor.with_seed(seed)),
                None => Box::new(actor),
            }
        }
        ActorKind::Likelihood(endpoint) => {
            tracing::info!(
                "Likelihood service {} at temperature {}",
                endpoint,
                args.action_temp
            );

            let model = Arc::new(HttpLikelihood::new(endpoint.clone()));
            let actor = LogitActor::new(model, args.action_temp);
            match args.seed {
                Some(seed) => Box::new(actor.with_seed(seed)),
                None => Box::new(actor),
            }
        }
    };

    Ok(actor)
}
