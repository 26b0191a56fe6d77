//! Decision-tree content format the catalog is extracted from.
//!
//! The tree maps node ids to nodes; terminal nodes carry a `result`. Node order
//! in the source document is preserved so the extracted catalog is stable.

use super::super::domain::Candidate;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;

/// Maximum options a question node may offer before validation complains.
pub const MAX_NODE_OPTIONS: usize = 10;

/// Id of the node every walk starts from.
pub const START_NODE: &str = "start";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeOption {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub next_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<TreeOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Candidate>,
}

impl TreeNode {
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }
}

/// Outcome of [`TreeStructure::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// One step through the static tree, used for path summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStep {
    pub node_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStructure {
    nodes: Vec<(String, TreeNode)>,
}

impl TreeStructure {
    pub fn from_nodes(nodes: Vec<(String, TreeNode)>) -> Self {
        Self { nodes }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes
            .iter()
            .find(|(node_id, _)| node_id == id)
            .map(|(_, node)| node)
    }

    /// Terminal results in document order.
    pub fn results(&self) -> impl Iterator<Item = &Candidate> {
        self.nodes.iter().filter_map(|(_, node)| node.result.as_ref())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lookup table for repeated walks. Borrowing the tree ties the index to
    /// this version of the content; a reloaded tree needs a new index.
    pub fn index(&self) -> TreeIndex<'_> {
        TreeIndex::new(self)
    }

    pub fn validate(&self) -> TreeValidation {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        if self.node(START_NODE).is_none() {
            errors.push(format!("Tree must have a \"{START_NODE}\" node"));
        }

        for (node_id, node) in &self.nodes {
            if !seen.insert(node_id.as_str()) {
                errors.push(format!("Node \"{node_id}\" is defined more than once"));
            }

            if node.question.is_none() && node.result.is_none() {
                errors.push(format!(
                    "Node \"{node_id}\" must have either a question or result"
                ));
            }

            let options = node.options.as_deref().unwrap_or_default();
            if node.result.is_none() && options.is_empty() {
                errors.push(format!("Non-terminal node \"{node_id}\" must have options"));
            }

            if node.result.is_some() && node.options.is_some() {
                errors.push(format!("Terminal node \"{node_id}\" should not have options"));
            }

            if options.len() > MAX_NODE_OPTIONS {
                errors.push(format!(
                    "Node \"{node_id}\" has too many options ({}). Consider splitting into sub-categories.",
                    options.len()
                ));
            }

            for (position, option) in options.iter().enumerate() {
                if option.text.is_empty() {
                    errors.push(format!("Node \"{node_id}\" option {position} is missing text"));
                }
                if option.next_id.is_empty() {
                    errors.push(format!(
                        "Node \"{node_id}\" option {position} is missing nextId"
                    ));
                } else if self.node(&option.next_id).is_none() {
                    errors.push(format!(
                        "Node \"{node_id}\" option {position} references non-existent node \"{}\"",
                        option.next_id
                    ));
                }
            }
        }

        TreeValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Renders walked steps as "question → answer", skipping steps whose node
    /// is missing or asks nothing.
    pub fn path_summary(&self, steps: &[TreeStep]) -> Vec<String> {
        steps
            .iter()
            .filter_map(|step| {
                let question = self.node(&step.node_id)?.question.as_deref()?;
                Some(format!("{question} → {}", step.answer))
            })
            .collect()
    }
}

impl Serialize for TreeStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.nodes.iter().map(|(id, node)| (id, node)))
    }
}

impl<'de> Deserialize<'de> for TreeStructure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedNodes)
    }
}

struct OrderedNodes;

impl<'de> Visitor<'de> for OrderedNodes {
    type Value = TreeStructure;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of node ids to tree nodes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut nodes = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((id, mut node)) = access.next_entry::<String, TreeNode>()? {
            if node.id.is_empty() {
                node.id = id.clone();
            }
            nodes.push((id, node));
        }
        Ok(TreeStructure { nodes })
    }
}

/// Node and option lookups over one loaded tree.
#[derive(Debug)]
pub struct TreeIndex<'a> {
    nodes: HashMap<&'a str, &'a TreeNode>,
}

impl<'a> TreeIndex<'a> {
    fn new(tree: &'a TreeStructure) -> Self {
        let mut nodes = HashMap::with_capacity(tree.len());
        for (id, node) in tree.nodes() {
            nodes.entry(id).or_insert(node);
        }
        Self { nodes }
    }

    pub fn node(&self, id: &str) -> Option<&'a TreeNode> {
        self.nodes.get(id).copied()
    }

    /// Id of the node reached by choosing `option_text` at `current_id`.
    pub fn walk(&self, current_id: &str, option_text: &str) -> Option<&'a str> {
        self.node(current_id)?
            .options
            .as_deref()?
            .iter()
            .find(|option| option.text == option_text)
            .map(|option| option.next_id.as_str())
    }

    pub fn is_terminal(&self, id: &str) -> bool {
        self.node(id).map(TreeNode::is_terminal).unwrap_or(false)
    }
}
