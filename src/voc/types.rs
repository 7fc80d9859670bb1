use serde::Deserialize;
use std::collections::HashMap;

/// YAML shape helper: a field that may hold one value or a list of values.
///
/// Vocabulary authors write `q: "Hi"` or `q: ["Hi", "Hello"]`, a single
/// answer mapping or a list of them. Both deserialize into this.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// How a node interprets the user's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Free text, matched by lemma equivalence against trigger words
    #[default]
    Plain,
    /// Button selection, matched by ordinal position
    Variant,
}

/// One possible answer of a node and the destination it leads to.
#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    /// Destination: another node's name, or an absolute URL for link buttons
    pub goto: String,
    /// Trigger words for plain nodes; the literal `*` matches any input
    #[serde(default)]
    pub words: Option<OneOrMany<String>>,
    /// Button caption for variant nodes
    #[serde(default)]
    pub name: Option<String>,
}

impl Answer {
    /// Trigger words in declared order; empty when the vocabulary defines none.
    pub fn trigger_words(&self) -> &[String] {
        self.words.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }

    /// Button caption; variant answers without one are a vocabulary defect
    /// reported by `Vocabulary::validate`.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// One state of the dialog graph.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    /// Prompt text; when several are given one is picked at random per render
    #[serde(rename = "q")]
    pub prompts: Option<OneOrMany<String>>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    /// Expected answers in priority order. A node with none is a de facto
    /// terminal: no input ever matches, the user only sees the wrong phrase.
    #[serde(rename = "a", default)]
    pub answers: Option<OneOrMany<Answer>>,
    /// Node-specific override of the vocabulary-wide wrong phrase
    #[serde(default)]
    pub wrong: Option<String>,
    /// Optional image sent with the prompt as its caption
    #[serde(default)]
    pub photo: Option<String>,
}

impl Node {
    pub fn prompt_variants(&self) -> &[String] {
        self.prompts.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }

    pub fn answers(&self) -> &[Answer] {
        self.answers.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }
}

/// The full dialog graph, loaded once and shared read-only by all sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    /// Entry point and reset target
    #[serde(default = "default_entry_node")]
    pub default: String,
    /// Vocabulary-wide "didn't understand" message
    #[serde(default)]
    pub wrong: Option<String>,
    pub nodes: HashMap<String, Node>,
}

fn default_entry_node() -> String {
    "begin".to_string()
}
