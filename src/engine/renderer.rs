//! Node rendering: turns a node into the outbound presentation the
//! gateway delivers.

use crate::engine::types::{Button, ButtonAction, Presentation};
use crate::error::{Result, VocabotError};
use crate::voc::{is_url, Node, NodeType};
use rand::seq::SliceRandom;

/// Render a node into a presentation.
///
/// When a node carries several prompt phrasings one is picked uniformly at
/// random, so re-rendering the same node may word itself differently. A
/// node with no prompt at all is a vocabulary defect: `MissingPrompt`
/// propagates to the controller's recovery policy.
pub fn render(node_name: &str, node: &Node) -> Result<Presentation> {
    let text = node
        .prompt_variants()
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| VocabotError::MissingPrompt(node_name.to_string()))?;

    Ok(Presentation {
        text,
        photo: node.photo.clone(),
        buttons: render_buttons(node),
    })
}

/// Plain nodes take free text and get no buttons. Variant nodes get one
/// button per answer, in declared order: a direct link button when the
/// goto is an external URL, otherwise an action button carrying the
/// answer's ordinal as its payload.
fn render_buttons(node: &Node) -> Option<Vec<Button>> {
    if node.node_type != NodeType::Variant {
        return None;
    }

    let buttons: Vec<Button> = node
        .answers()
        .iter()
        .enumerate()
        .map(|(i, answer)| Button {
            label: answer.label().to_string(),
            action: if is_url(&answer.goto) {
                ButtonAction::OpenLink(answer.goto.clone())
            } else {
                ButtonAction::Goto(i)
            },
        })
        .collect();

    if buttons.is_empty() {
        None
    } else {
        Some(buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voc::Vocabulary;

    #[test]
    fn test_single_prompt_renders_exactly() {
        let voc = Vocabulary::parse("default: a\nnodes:\n  a: {q: \"Cats are great\"}\n").unwrap();
        let p = render("a", voc.node("a").unwrap()).unwrap();
        assert_eq!(p.text, "Cats are great");
        assert_eq!(p.photo, None);
        assert_eq!(p.buttons, None);
    }

    #[test]
    fn test_multi_prompt_picks_one_of_the_variants() {
        let voc =
            Vocabulary::parse("default: a\nnodes:\n  a:\n    q: [one, two, three]\n").unwrap();
        let node = voc.node("a").unwrap();
        // The pick is random by design: assert membership, not equality.
        for _ in 0..20 {
            let p = render("a", node).unwrap();
            assert!(["one", "two", "three"].contains(&p.text.as_str()));
        }
    }

    #[test]
    fn test_missing_prompt_is_an_error() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a: {q: hi}\n  broken:\n    a: {words: x, goto: a}\n",
        )
        .unwrap();
        let err = render("broken", voc.node("broken").unwrap()).unwrap_err();
        assert!(matches!(err, VocabotError::MissingPrompt(name) if name == "broken"));
    }

    #[test]
    fn test_photo_is_carried_through() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a: {q: hi, photo: \"https://example.com/cat.jpg\"}\n",
        )
        .unwrap();
        let p = render("a", voc.node("a").unwrap()).unwrap();
        assert_eq!(p.photo.as_deref(), Some("https://example.com/cat.jpg"));
    }

    #[test]
    fn test_plain_node_renders_no_buttons() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a:\n    q: hi\n    a: {words: ok, goto: a}\n",
        )
        .unwrap();
        let p = render("a", voc.node("a").unwrap()).unwrap();
        assert_eq!(p.buttons, None);
    }

    #[test]
    fn test_variant_node_renders_indexed_and_link_buttons() {
        let voc = Vocabulary::parse(
            r#"
default: ask
nodes:
  ask:
    q: "Sure?"
    type: variant
    a:
      - {name: "Yes", goto: yes_node}
      - {name: "No", goto: "https://example.com"}
  yes_node: {q: ok}
"#,
        )
        .unwrap();
        let p = render("ask", voc.node("ask").unwrap()).unwrap();
        let buttons = p.buttons.unwrap();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].label, "Yes");
        assert_eq!(buttons[0].action, ButtonAction::Goto(0));
        assert_eq!(buttons[1].label, "No");
        assert_eq!(
            buttons[1].action,
            ButtonAction::OpenLink("https://example.com".to_string())
        );
    }

    #[test]
    fn test_variant_node_without_answers_has_no_keyboard() {
        let voc =
            Vocabulary::parse("default: a\nnodes:\n  a: {q: hi, type: variant}\n").unwrap();
        let p = render("a", voc.node("a").unwrap()).unwrap();
        assert_eq!(p.buttons, None);
    }
}
