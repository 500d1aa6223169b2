mod common;

use std::sync::Arc;

use agent_runtime::actors::{ChatActor, Domain, LogitActor, RandomActor};
use agent_runtime::completion::{CompletionError, RetryPolicy};
use agent_runtime::translate::{ActionEntry, AdmissibleActions, LanguageObservation};
use agent_runtime::{ActorPolicy, RuntimeError};
use common::{StubChat, StubLikelihood};
use nle_content::{FewShotLibrary, TaskCatalog};

fn menu(phrases: &[&str]) -> AdmissibleActions {
    AdmissibleActions::new(
        phrases
            .iter()
            .map(|p| ActionEntry::new(*p, [p.split_whitespace().last().unwrap_or("north")]))
            .collect(),
    )
    .unwrap()
}

fn observation() -> LanguageObservation {
    LanguageObservation::new(vec![
        "You have a yellow potion".to_string(),
        "HP: 16/16".to_string(),
        "You see a stairs down near east.".to_string(),
    ])
}

#[tokio::test]
async fn random_actor_picks_zap_one_time_in_nine() {
    let actions = menu(&["move north", "zap wand east"]);
    let mut actor = RandomActor::seeded(42);
    actor.reset("anything");

    let draws = 20_000;
    let mut zaps = 0;
    for _ in 0..draws {
        let choice = actor.choose_action(&observation(), &actions).await.unwrap();
        if choice.phrase == "zap wand east" {
            zaps += 1;
        }
        assert!(choice.generation.is_empty());
        assert_eq!(choice.tokens_used, 0);
    }

    let frequency = zaps as f64 / draws as f64;
    assert!(
        (frequency - 1.0 / 9.0).abs() < 0.01,
        "zap frequency {frequency}"
    );
}

#[tokio::test]
async fn chat_actor_follows_the_reply() {
    let chat = Arc::new(
        StubChat::new().reply("The stairs are east.\n\nI choose to: C) move east.", 123),
    );
    let mut actor = ChatActor::new(chat.clone(), Vec::new(), false).with_seed(1);
    actor.reset("navigate to the stairs down.");

    let actions = menu(&["move north", "move south", "move east", "move west"]);
    let choice = actor.choose_action(&observation(), &actions).await.unwrap();

    assert_eq!(choice.phrase, "move east");
    assert_eq!(choice.sequence, vec!["east"]);
    assert_eq!(choice.tokens_used, 123);
    assert!(choice.generation.contains("I choose to: C) move east."));

    let requests = chat.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].system.as_deref(),
        Some(Domain::NetHack.system_message().as_str())
    );
    assert_eq!(
        requests[0].turns,
        vec![
            "Your task is to navigate to the stairs down.\n\nGame Description:\n\
             You have a yellow potion\nHP: 16/16\nYou see a stairs down near east.\n\n\
             Choose the best action.\nA) move north\nB) move south\nC) move east\nD) move west"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn chat_reply_without_marker_is_scored_whole() {
    let chat = Arc::new(StubChat::new().reply("attack the kobold", 5));
    let mut actor = ChatActor::new(chat, Vec::new(), false).with_seed(3);
    actor.reset("kill.");

    let actions = menu(&["move north", "attack the kobold", "move south"]);
    let choice = actor.choose_action(&observation(), &actions).await.unwrap();
    assert_eq!(choice.phrase, "attack the kobold");
}

#[tokio::test]
async fn chat_ties_are_broken_among_the_best_matches_only() {
    let actions = menu(&["move north", "attack the kobold", "move south"]);
    for seed in 0..20 {
        let chat = Arc::new(StubChat::new().reply("I choose to: A) move", 1));
        let mut actor = ChatActor::new(chat, Vec::new(), false).with_seed(seed);
        actor.reset("go.");
        let choice = actor.choose_action(&observation(), &actions).await.unwrap();
        assert_ne!(choice.phrase, "attack the kobold");
    }
}

#[tokio::test]
async fn chat_unrelated_reply_falls_back_to_uniform() {
    let actions = menu(&["move north", "move south"]);
    let chat = Arc::new(StubChat::new().reply("I choose to: Z) dance wildly", 1));
    let mut actor = ChatActor::new(chat, Vec::new(), false).with_seed(9);
    actor.reset("go.");
    let choice = actor.choose_action(&observation(), &actions).await.unwrap();
    assert!(choice.phrase == "move north" || choice.phrase == "move south");
}

#[tokio::test]
async fn chat_prompt_carries_few_shot_examples() {
    let catalog = TaskCatalog::embedded().unwrap();
    let examples = FewShotLibrary::embedded()
        .unwrap()
        .resolve(&catalog, 4)
        .unwrap();

    let chat = Arc::new(StubChat::new().reply("I choose to: A) move north", 1));
    let mut actor = ChatActor::new(chat.clone(), examples, true).with_seed(0);
    actor.reset("navigate to the stairs down.");
    actor
        .choose_action(&observation(), &menu(&["move north"]))
        .await
        .unwrap();

    let requests = chat.requests.lock().unwrap();
    let turns = &requests[0].turns;
    assert_eq!(turns.len(), 9);
    assert!(turns[0].starts_with(
        "Your task is to put on the ring and navigate to the stairs down.\n\nGame Description:\n"
    ));
    assert!(turns[1].starts_with("The first step of my task is to put on the ring."));
    assert!(turns[1].ends_with("\n\nI choose to: H) move southeast"));
    assert!(turns[5].ends_with("I choose to: I) pick up a robe"));
}

#[tokio::test]
async fn chat_invalid_request_drops_oldest_example() {
    let catalog = TaskCatalog::embedded().unwrap();
    let examples = FewShotLibrary::embedded()
        .unwrap()
        .resolve(&catalog, 2)
        .unwrap();

    let chat = Arc::new(
        StubChat::new()
            .fail(CompletionError::InvalidRequest("context too long".to_string()))
            .reply("I choose to: A) move north", 1),
    );
    let mut actor = ChatActor::new(chat.clone(), examples, false)
        .with_retry(RetryPolicy::immediate(5))
        .with_seed(0);
    actor.reset("go.");
    let choice = actor
        .choose_action(&observation(), &menu(&["move north"]))
        .await
        .unwrap();
    assert_eq!(choice.phrase, "move north");

    let requests = chat.requests.lock().unwrap();
    assert_eq!(requests[0].turns.len(), 5);
    assert_eq!(requests[1].turns.len(), 3);
    assert_eq!(requests[1].turns[..], requests[0].turns[2..]);
}

#[tokio::test]
async fn chat_exhausted_retries_surface_as_error() {
    let chat = Arc::new(
        StubChat::new()
            .fail(CompletionError::ServiceUnavailable("down".to_string()))
            .fail(CompletionError::ServiceUnavailable("down".to_string()))
            .fail(CompletionError::ServiceUnavailable("down".to_string())),
    );
    let mut actor = ChatActor::new(chat.clone(), Vec::new(), false)
        .with_retry(RetryPolicy::immediate(3));
    actor.reset("go.");

    let result = actor.choose_action(&observation(), &menu(&["move north"])).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Completion(CompletionError::Exhausted { tries: 3, .. }))
    ));
    assert_eq!(chat.calls(), 3);
}

#[tokio::test]
async fn logit_actor_at_zero_temperature_picks_a_maximum() {
    let model = Arc::new(
        StubLikelihood::new()
            .score("move north", -2.0)
            .score("move south", -1.0)
            .score("move east", -1.0)
            .score("move west", -0.5)
            .baseline("move west", 0.0)
            .baseline("move south", -3.0)
            .baseline("move east", -3.0),
    );
    let actions = menu(&["move north", "move south", "move east", "move west"]);

    // Relative scores: north -2, south 2, east 2, west -0.5.
    for seed in 0..20 {
        let mut actor = LogitActor::new(model.clone(), 0.0).with_seed(seed);
        actor.reset("go.");
        let choice = actor.choose_action(&observation(), &actions).await.unwrap();
        assert!(
            choice.phrase == "move south" || choice.phrase == "move east",
            "picked {}",
            choice.phrase
        );
    }
}

#[tokio::test]
async fn logit_baselines_are_cached_per_task() {
    let model = Arc::new(StubLikelihood::new());
    let mut actor = LogitActor::new(model.clone(), 1.0).with_seed(0);

    actor.reset("first.");
    actor
        .choose_action(&observation(), &menu(&["move north", "move south"]))
        .await
        .unwrap();
    actor
        .choose_action(&observation(), &menu(&["move north", "move south"]))
        .await
        .unwrap();
    assert_eq!(model.baseline_calls(), 1);

    // A new phrase only needs its own baseline.
    actor
        .choose_action(&observation(), &menu(&["move north", "move east"]))
        .await
        .unwrap();
    assert_eq!(model.baseline_calls(), 2);
    {
        let prompts = model.prompts.lock().unwrap();
        let baseline_batches: Vec<_> = prompts
            .iter()
            .filter(|(p, _)| common::is_baseline_prompt(p))
            .map(|(_, c)| c.clone())
            .collect();
        assert_eq!(baseline_batches[1], vec!["move east"]);
    }

    // Same task again keeps the cache.
    actor.reset("first.");
    actor
        .choose_action(&observation(), &menu(&["move north"]))
        .await
        .unwrap();
    assert_eq!(model.baseline_calls(), 2);

    // A different task recomputes.
    actor.reset("second.");
    actor
        .choose_action(&observation(), &menu(&["move north"]))
        .await
        .unwrap();
    assert_eq!(model.baseline_calls(), 3);
    assert_eq!(actor.baselines().len(), 1);
}

#[tokio::test]
async fn logit_all_unscorable_picks_uniformly() {
    let model = Arc::new(
        StubLikelihood::new()
            .score("move north", f64::NEG_INFINITY)
            .score("move south", f64::NEG_INFINITY),
    );
    let mut actor = LogitActor::new(model, 0.5).with_seed(4);
    actor.reset("go.");
    let choice = actor
        .choose_action(&observation(), &menu(&["move north", "move south"]))
        .await
        .unwrap();
    assert!(choice.phrase == "move north" || choice.phrase == "move south");
}

#[tokio::test]
async fn logit_prompt_uses_flattened_observation() {
    let model = Arc::new(StubLikelihood::new());
    let mut actor = LogitActor::new(model.clone(), 1.0).with_seed(0);
    actor.reset("go.");
    actor
        .choose_action(&observation(), &menu(&["move north"]))
        .await
        .unwrap();

    let prompts = model.prompts.lock().unwrap();
    let (prompt, _) = prompts.last().unwrap();
    assert!(prompt.ends_with(
        "You have a yellow potion. HP: 16/16. You see a stairs down near east. \nYou choose to:"
    ));
    assert!(prompt.contains(" Your task is to go. "));
}
