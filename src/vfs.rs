use crate::error::ShellError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved name of the root directory. Always the first path segment.
pub const ROOT_SEGMENT: &str = "~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Dir,
    File,
}

/// One node of the site map. Children are kept sorted so `ls` output is
/// stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    pub fn dir(page: Option<&str>) -> Self {
        Self {
            kind: NodeKind::Dir,
            page: page.map(str::to_string),
            children: BTreeMap::new(),
        }
    }

    pub fn file() -> Self {
        Self {
            kind: NodeKind::File,
            page: None,
            children: BTreeMap::new(),
        }
    }

    pub fn with_child(mut self, name: &str, child: TreeNode) -> Self {
        self.children.insert(name.to_string(), child);
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

/// Read-only site map built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualFileTree {
    root: TreeNode,
}

impl VirtualFileTree {
    /// Validates the definition and wraps it. The tree is never mutated
    /// afterwards.
    pub fn new(root: TreeNode) -> Result<Self, ShellError> {
        if !root.is_dir() {
            return Err(ShellError::InvalidConfig("filesystem root must be a directory".into()));
        }
        validate_node(ROOT_SEGMENT, &root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Walk `path` from the root. The first segment must be the root
    /// segment; every following one must be a child of the previous node.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Result<&TreeNode, ShellError> {
        let mut segments = path.iter().map(AsRef::as_ref);
        match segments.next() {
            Some(ROOT_SEGMENT) => {}
            Some(other) => return Err(ShellError::NotFound(other.to_string())),
            None => return Err(ShellError::NotFound(String::new())),
        }
        let mut node = &self.root;
        for segment in segments {
            node = node
                .children
                .get(segment)
                .ok_or_else(|| ShellError::NotFound(segment.to_string()))?;
        }
        Ok(node)
    }

    /// Every page id referenced anywhere in the tree, depth first.
    pub fn page_ids(&self) -> Vec<&str> {
        let mut pages = Vec::new();
        collect_pages(&self.root, &mut pages);
        pages
    }
}

fn collect_pages<'a>(node: &'a TreeNode, out: &mut Vec<&'a str>) {
    if let Some(page) = &node.page {
        out.push(page);
    }
    for child in node.children.values() {
        collect_pages(child, out);
    }
}

fn validate_node(name: &str, node: &TreeNode) -> Result<(), ShellError> {
    if node.kind == NodeKind::File && !node.children.is_empty() {
        return Err(ShellError::InvalidConfig(format!("file '{}' cannot have children", name)));
    }
    for (child_name, child) in &node.children {
        validate_segment(child_name)?;
        validate_node(child_name, child)?;
    }
    Ok(())
}

// names must survive whitespace tokenizing and '/' splitting
fn validate_segment(name: &str) -> Result<(), ShellError> {
    let reserved = matches!(name, "." | ".." | ROOT_SEGMENT);
    if name.is_empty() || reserved || name.contains('/') || name.contains(char::is_whitespace) {
        return Err(ShellError::InvalidConfig(format!("invalid segment name '{}'", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VirtualFileTree {
        let projects = TreeNode::dir(Some("projects-page"))
            .with_child("project1", TreeNode::dir(Some("project1-page")))
            .with_child("README", TreeNode::file());
        let root = TreeNode::dir(Some("home-page"))
            .with_child("about", TreeNode::dir(Some("about-page")))
            .with_child("projects", projects);
        VirtualFileTree::new(root).unwrap()
    }

    #[test]
    fn test_resolve_root() {
        let tree = sample();
        let node = tree.resolve(&["~"]).unwrap();
        assert_eq!(node.page.as_deref(), Some("home-page"));
    }

    #[test]
    fn test_resolve_nested() {
        let tree = sample();
        let node = tree.resolve(&["~", "projects", "project1"]).unwrap();
        assert_eq!(node.page.as_deref(), Some("project1-page"));
    }

    #[test]
    fn test_resolve_stops_at_first_missing_segment() {
        let tree = sample();
        let err = tree.resolve(&["~", "nope", "project1"]).unwrap_err();
        assert_eq!(err, ShellError::NotFound("nope".into()));
    }

    #[test]
    fn test_resolve_requires_root_segment() {
        let tree = sample();
        assert!(tree.resolve(&["about"]).is_err());
        assert!(tree.resolve::<&str>(&[]).is_err());
    }

    #[test]
    fn test_file_with_children_is_rejected() {
        let bad = TreeNode::file().with_child("x", TreeNode::file());
        let root = TreeNode::dir(None).with_child("bad", bad);
        assert!(matches!(VirtualFileTree::new(root), Err(ShellError::InvalidConfig(_))));
    }

    #[test]
    fn test_reserved_segment_names_are_rejected() {
        for name in ["..", ".", "~", "a b", "a/b", ""] {
            let root = TreeNode::dir(None).with_child(name, TreeNode::dir(None));
            assert!(VirtualFileTree::new(root).is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"type":"dir","page":"home-page","children":{"about":{"type":"dir","page":"about-page"}}}"#;
        let root: TreeNode = serde_json::from_str(json).unwrap();
        let tree = VirtualFileTree::new(root).unwrap();
        assert_eq!(tree.page_ids(), vec!["home-page", "about-page"]);
    }
}
