//! Vocabulary store: the dialog graph, loaded once from a YAML file and
//! shared read-only by every session for the process lifetime.

pub mod types;

pub use types::{Answer, Node, NodeType, OneOrMany, Vocabulary};

use crate::error::{Result, VocabotError};
use std::path::Path;
use url::Url;

/// True when the string is a syntactically valid absolute URL with a host.
///
/// Gotos that look like URLs are external links, not graph transitions.
/// Bare node names fail to parse as absolute URLs, and schemes without a
/// host part (`mailto:`, `tel:`) are deliberately not treated as links.
pub fn is_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(u) => u.has_host(),
        Err(_) => false,
    }
}

impl Vocabulary {
    /// Load a vocabulary from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            VocabotError::Config(format!("Failed to read vocabulary {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Parse a vocabulary from YAML text.
    ///
    /// Fails with `Config` when the document is malformed or when the
    /// default node is missing from `nodes`. Gotos are NOT checked here:
    /// dangling transitions surface at traversal time as `UnknownNode`
    /// (run `validate` for an eager report).
    pub fn parse(text: &str) -> Result<Self> {
        let voc: Vocabulary = serde_yaml_ng::from_str(text)
            .map_err(|e| VocabotError::Config(format!("Malformed vocabulary: {}", e)))?;

        if !voc.nodes.contains_key(&voc.default) {
            return Err(VocabotError::Config(format!(
                "Default node '{}' is not defined in nodes",
                voc.default
            )));
        }

        Ok(voc)
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Result<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| VocabotError::UnknownNode(name.to_string()))
    }

    /// Name of the entry/reset node.
    pub fn default_node(&self) -> &str {
        &self.default
    }

    /// Vocabulary-wide "didn't understand" message, if configured.
    pub fn global_wrong_phrase(&self) -> Option<&str> {
        self.wrong.as_deref()
    }

    /// Eager graph lint. Returns one finding per defect; an empty vec means
    /// the graph is clean. The runtime never calls this: per the engine's
    /// contract a broken goto fails late, at traversal time, and the
    /// controller recovers by resetting the session. This exists for the
    /// `check` command and the simulator so authors see defects up front.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();

        let mut names: Vec<&String> = self.nodes.keys().collect();
        names.sort();

        for name in names {
            let node = &self.nodes[name];

            if node.prompt_variants().is_empty() {
                findings.push(format!("node '{}': no prompt (q)", name));
            }

            for (i, answer) in node.answers().iter().enumerate() {
                if !is_url(&answer.goto) && !self.nodes.contains_key(&answer.goto) {
                    findings.push(format!(
                        "node '{}' answer {}: goto '{}' does not exist",
                        name, i, answer.goto
                    ));
                }

                match node.node_type {
                    NodeType::Plain => {
                        if answer.trigger_words().is_empty() {
                            findings.push(format!(
                                "node '{}' answer {}: plain answer has no words",
                                name, i
                            ));
                        }
                    }
                    NodeType::Variant => {
                        if answer.name.is_none() {
                            findings.push(format!(
                                "node '{}' answer {}: variant answer has no name",
                                name, i
                            ));
                        }
                    }
                }
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS_VOC: &str = r#"
default: begin
wrong: "I did not get that"
nodes:
  begin:
    q: "Hi, name a pet"
    a:
      - words: cat
        goto: cats
      - words: "*"
        goto: fallback
  cats:
    q:
      - "Cats are great"
      - "Meow!"
  fallback:
    q: "OK then"
"#;

    #[test]
    fn test_parse_pets_vocabulary() {
        let voc = Vocabulary::parse(PETS_VOC).unwrap();
        assert_eq!(voc.default_node(), "begin");
        assert_eq!(voc.global_wrong_phrase(), Some("I did not get that"));
        assert_eq!(voc.nodes.len(), 3);

        let begin = voc.node("begin").unwrap();
        assert_eq!(begin.node_type, NodeType::Plain);
        assert_eq!(begin.answers().len(), 2);
        assert_eq!(begin.answers()[0].goto, "cats");

        // terminal node by construction: prompt but no answers
        let cats = voc.node("cats").unwrap();
        assert!(cats.answers().is_empty());
        assert_eq!(cats.prompt_variants().len(), 2);
    }

    #[test]
    fn test_parse_single_answer_mapping() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a:\n    q: hi\n    a: {words: ok, goto: a}\n",
        )
        .unwrap();
        assert_eq!(voc.node("a").unwrap().answers().len(), 1);
    }

    #[test]
    fn test_unknown_node_lookup() {
        let voc = Vocabulary::parse(PETS_VOC).unwrap();
        let err = voc.node("dogs").unwrap_err();
        assert!(matches!(err, VocabotError::UnknownNode(name) if name == "dogs"));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = Vocabulary::parse("nodes: [not, a, mapping").unwrap_err();
        assert!(matches!(err, VocabotError::Config(_)));
    }

    #[test]
    fn test_missing_nodes_key_is_config_error() {
        let err = Vocabulary::parse("default: begin\n").unwrap_err();
        assert!(matches!(err, VocabotError::Config(_)));
    }

    #[test]
    fn test_default_node_must_exist() {
        let err = Vocabulary::parse("default: nope\nnodes:\n  a:\n    q: hi\n").unwrap_err();
        assert!(matches!(err, VocabotError::Config(msg) if msg.contains("nope")));
    }

    #[test]
    fn test_default_node_falls_back_to_begin() {
        let voc = Vocabulary::parse("nodes:\n  begin:\n    q: hi\n").unwrap();
        assert_eq!(voc.default_node(), "begin");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voc.yaml");
        std::fs::write(&path, PETS_VOC).unwrap();
        let voc = Vocabulary::load(&path).unwrap();
        assert_eq!(voc.default_node(), "begin");

        let err = Vocabulary::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, VocabotError::Config(_)));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://example.com/path?x=1"));
        assert!(!is_url("begin"));
        assert!(!is_url("some_node_name"));
        assert!(!is_url("mailto:user@example.com"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_validate_reports_dangling_goto() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a:\n    q: hi\n    a: {words: ok, goto: missing}\n",
        )
        .unwrap();
        let findings = voc.validate();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("missing"));
    }

    #[test]
    fn test_validate_accepts_url_goto() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a:\n    q: hi\n    type: variant\n    a: {name: Site, goto: \"https://example.com\"}\n",
        )
        .unwrap();
        assert!(voc.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_missing_prompt_and_labels() {
        let voc = Vocabulary::parse(
            "default: a\nnodes:\n  a:\n    type: variant\n    a: {goto: a}\n",
        )
        .unwrap();
        let findings = voc.validate();
        assert!(findings.iter().any(|f| f.contains("no prompt")));
        assert!(findings.iter().any(|f| f.contains("no name")));
    }
}
