//! Answer matching: decides which answer of the current node an inbound
//! event selects, and therefore the name of the next node.

use crate::engine::types::EventKind;
use crate::error::Result;
use crate::morph::Normalizer;
use crate::voc::{is_url, Node, NodeType};

/// Match an event against a node's answers.
///
/// Returns the matched answer's goto, or `None` when nothing matches —
/// NoMatch is normal control flow (the controller re-prompts), never an
/// error. Event kinds that make no sense for the node type (text on a
/// variant node, button press on a plain node) are NoMatch as well.
pub async fn match_event(
    node: &Node,
    event: &EventKind,
    normalizer: &dyn Normalizer,
) -> Result<Option<String>> {
    match (node.node_type, event) {
        (NodeType::Plain, EventKind::Text(text)) => match_plain(node, text, normalizer).await,
        (NodeType::Variant, EventKind::Button(payload)) => Ok(match_variant(node, payload)),
        _ => Ok(None),
    }
}

/// Free-text matching for plain nodes.
///
/// Answers form a priority list: the first answer whose first trigger word
/// fires wins. The literal `*` trigger is an unconditional catch-all and
/// short-circuits everything after it. A regular trigger fires when its
/// lemma set intersects the lemma set of any token of the message, so one
/// configured lemma covers every inflection the normalizer folds into it.
async fn match_plain(
    node: &Node,
    text: &str,
    normalizer: &dyn Normalizer,
) -> Result<Option<String>> {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();

    for answer in node.answers() {
        for trigger in answer.trigger_words() {
            if trigger == "*" {
                return Ok(Some(answer.goto.clone()));
            }

            let trigger_lemmas = normalizer.normalize(&trigger.to_lowercase()).await?;
            for token in &tokens {
                let token_lemmas = normalizer.normalize(token).await?;
                if !trigger_lemmas.is_disjoint(&token_lemmas) {
                    return Ok(Some(answer.goto.clone()));
                }
            }
        }
    }

    Ok(None)
}

/// Positional matching for variant nodes: the payload is the decimal
/// ordinal of the pressed button. Anything that is not an in-bounds index
/// is NoMatch. No content comparison occurs.
///
/// An index landing on a URL goto is NoMatch too: that answer renders as a
/// direct-link button which never produces a callback, so such a payload
/// can only be stale or forged and must not move the session.
fn match_variant(node: &Node, payload: &str) -> Option<String> {
    let index: usize = payload.parse().ok()?;
    let answer = node.answers().get(index)?;
    if is_url(&answer.goto) {
        return None;
    }
    Some(answer.goto.clone())
}
