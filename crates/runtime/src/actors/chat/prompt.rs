//! Few-shot conversation layout for the chat policy.
use nle_content::PromptExample;

/// Letter label of the `index`-th menu entry ("A", "B", ..).
pub(crate) fn menu_letter(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}

/// User turn presenting one decision.
pub(crate) fn decision_turn<'a, S, A>(task: &str, state: S, admissible: A) -> String
where
    S: IntoIterator<Item = &'a str>,
    A: IntoIterator<Item = &'a str>,
{
    let state = state.into_iter().collect::<Vec<_>>().join("\n");
    let menu = admissible
        .into_iter()
        .enumerate()
        .map(|(i, action)| format!("{}) {}", menu_letter(i), action))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Your task is to {task}\n\nGame Description:\n{state}\n\nChoose the best action.\n{menu}")
}

/// Assistant turn answering a worked example.
pub(crate) fn answer_turn(example: &PromptExample, use_cot: bool) -> String {
    let explanation = if use_cot {
        format!("{}\n\n", example.explanation)
    } else {
        String::new()
    };
    format!(
        "{explanation}I choose to: {}) {}",
        menu_letter(example.chosen),
        example.action
    )
}

/// Alternating user/assistant turns for every example, then the current
/// decision as the final user turn.
pub(crate) fn build_turns<'a, S, A>(
    examples: &[PromptExample],
    use_cot: bool,
    task: &str,
    state: S,
    admissible: A,
) -> Vec<String>
where
    S: IntoIterator<Item = &'a str>,
    A: IntoIterator<Item = &'a str>,
{
    let mut turns = Vec::with_capacity(examples.len() * 2 + 1);
    for example in examples {
        turns.push(decision_turn(
            &example.task,
            example.state.iter().map(String::as_str),
            example.admissible.iter().map(String::as_str),
        ));
        turns.push(answer_turn(example, use_cot));
    }
    turns.push(decision_turn(task, state, admissible));
    turns
}
