use crate::error::ShellError;
use crate::vfs::{TreeNode, VirtualFileTree, ROOT_SEGMENT};
use std::fmt;
use std::rc::Rc;

/// The current working directory as a sequence of segments.
///
/// Never empty and always starts at [`ROOT_SEGMENT`]. Only the navigator can
/// change it, and only to prefixes that resolve in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    segments: Vec<String>,
}

impl PathState {
    pub fn root() -> Self {
        Self {
            segments: vec![ROOT_SEGMENT.to_string()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    fn push(&mut self, segment: &str) {
        self.segments.push(segment.to_string());
    }

    fn pop(&mut self) -> Result<(), ShellError> {
        if self.is_root() {
            return Err(ShellError::AlreadyAtRoot);
        }
        self.segments.pop();
        Ok(())
    }

    fn reset(&mut self) {
        self.segments.truncate(1);
    }
}

impl Default for PathState {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Result of a successful move: the page the new location is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub page: Option<String>,
}

/// Owns the working directory and moves it around the tree.
#[derive(Debug, Clone)]
pub struct Navigator {
    tree: Rc<VirtualFileTree>,
    path: PathState,
}

impl Navigator {
    pub fn new(tree: Rc<VirtualFileTree>) -> Self {
        Self {
            tree,
            path: PathState::root(),
        }
    }

    pub fn tree(&self) -> &VirtualFileTree {
        &self.tree
    }

    pub fn path(&self) -> &PathState {
        &self.path
    }

    pub fn current_node(&self) -> &TreeNode {
        // path only ever holds resolvable prefixes, the fallback is unreachable
        self.node_at(&self.path)
    }

    fn node_at(&self, path: &PathState) -> &TreeNode {
        self.tree
            .resolve(path.segments())
            .unwrap_or_else(|_| self.tree.root())
    }

    /// Move by a single segment: `..`, `~`, `/`, `.` or a child name.
    pub fn descend(&mut self, segment: &str) -> Result<Navigation, ShellError> {
        let mut next = self.path.clone();
        self.step(&mut next, segment, segment)?;
        Ok(self.commit(next))
    }

    /// `cd` entry point. Handles compound targets such as `projects/project1`,
    /// `../contact` or `~/about`; nothing changes unless every step succeeds.
    pub fn change_directory(&mut self, target: &str) -> Result<Navigation, ShellError> {
        let next = self.resolve_target(target)?;
        Ok(self.commit(next))
    }

    /// Work out where `target` points without moving there.
    pub fn resolve_target(&self, target: &str) -> Result<PathState, ShellError> {
        let mut next = self.path.clone();
        let relative = if target == "/" || target == ROOT_SEGMENT {
            next.reset();
            ""
        } else if let Some(rest) = target.strip_prefix("~/").or_else(|| target.strip_prefix('/')) {
            next.reset();
            rest
        } else {
            target
        };

        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            self.step(&mut next, segment, target)?;
        }
        Ok(next)
    }

    /// Node at `target`, relative to the current directory.
    pub fn lookup(&self, target: &str) -> Result<&TreeNode, ShellError> {
        let path = self.resolve_target(target)?;
        Ok(self.node_at(&path))
    }

    fn step(&self, path: &mut PathState, segment: &str, target: &str) -> Result<(), ShellError> {
        match segment {
            ".." => path.pop(),
            ROOT_SEGMENT | "/" => {
                path.reset();
                Ok(())
            }
            "." => Ok(()),
            name => {
                let child = self
                    .node_at(path)
                    .children
                    .get(name)
                    .ok_or_else(|| ShellError::DirectoryNotFound(target.to_string()))?;
                if !child.is_dir() {
                    return Err(ShellError::NotADirectory(target.to_string()));
                }
                path.push(name);
                Ok(())
            }
        }
    }

    fn commit(&mut self, next: PathState) -> Navigation {
        if next != self.path {
            log::debug!("cwd {} -> {}", self.path, next);
        }
        self.path = next;
        Navigation {
            page: self.current_node().page.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> Navigator {
        let projects = TreeNode::dir(Some("projects-page"))
            .with_child("project1", TreeNode::dir(Some("project1-page")))
            .with_child("README", TreeNode::file());
        let root = TreeNode::dir(Some("home-page"))
            .with_child("about", TreeNode::dir(Some("about-page")))
            .with_child("blank", TreeNode::dir(None))
            .with_child("projects", projects);
        Navigator::new(Rc::new(VirtualFileTree::new(root).unwrap()))
    }

    fn segments(nav: &Navigator) -> Vec<&str> {
        nav.path().segments().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_descend_and_back() {
        let mut nav = navigator();
        let moved = nav.descend("about").unwrap();
        assert_eq!(moved.page.as_deref(), Some("about-page"));
        assert_eq!(segments(&nav), vec!["~", "about"]);

        let back = nav.descend("..").unwrap();
        assert_eq!(back.page.as_deref(), Some("home-page"));
        assert_eq!(segments(&nav), vec!["~"]);
    }

    #[test]
    fn test_parent_at_root_is_warning_noop() {
        let mut nav = navigator();
        assert_eq!(nav.descend(".."), Err(ShellError::AlreadyAtRoot));
        assert_eq!(segments(&nav), vec!["~"]);
    }

    #[test]
    fn test_missing_directory_leaves_path() {
        let mut nav = navigator();
        nav.descend("projects").unwrap();
        let err = nav.descend("nonexistent").unwrap_err();
        assert_eq!(err, ShellError::DirectoryNotFound("nonexistent".into()));
        assert_eq!(segments(&nav), vec!["~", "projects"]);
    }

    #[test]
    fn test_cannot_enter_file() {
        let mut nav = navigator();
        nav.descend("projects").unwrap();
        assert_eq!(nav.descend("README"), Err(ShellError::NotADirectory("README".into())));
        assert_eq!(nav.path().depth(), 2);
    }

    #[test]
    fn test_reset_to_root() {
        for target in ["~", "/"] {
            let mut nav = navigator();
            nav.descend("projects").unwrap();
            nav.descend("project1").unwrap();
            let moved = nav.descend(target).unwrap();
            assert!(nav.path().is_root());
            assert_eq!(moved.page.as_deref(), Some("home-page"));
        }
    }

    #[test]
    fn test_dot_reactivates_current_page() {
        let mut nav = navigator();
        nav.descend("about").unwrap();
        let moved = nav.descend(".").unwrap();
        assert_eq!(moved.page.as_deref(), Some("about-page"));
        assert_eq!(nav.path().depth(), 2);
    }

    #[test]
    fn test_node_without_page() {
        let mut nav = navigator();
        assert_eq!(nav.descend("blank").unwrap().page, None);
    }

    #[test]
    fn test_compound_target() {
        let mut nav = navigator();
        nav.change_directory("projects/project1").unwrap();
        assert_eq!(segments(&nav), vec!["~", "projects", "project1"]);

        nav.change_directory("../../about").unwrap();
        assert_eq!(segments(&nav), vec!["~", "about"]);

        nav.change_directory("~/projects/").unwrap();
        assert_eq!(segments(&nav), vec!["~", "projects"]);

        nav.change_directory("/about").unwrap();
        assert_eq!(segments(&nav), vec!["~", "about"]);
    }

    #[test]
    fn test_compound_target_is_all_or_nothing() {
        let mut nav = navigator();
        let err = nav.change_directory("projects/missing").unwrap_err();
        assert_eq!(err, ShellError::DirectoryNotFound("projects/missing".into()));
        assert!(nav.path().is_root());

        assert_eq!(nav.change_directory("about/../.."), Err(ShellError::AlreadyAtRoot));
        assert!(nav.path().is_root());
    }

    #[test]
    fn test_every_child_round_trips() {
        let mut nav = navigator();
        let dirs: Vec<String> = nav
            .current_node()
            .children
            .iter()
            .filter(|(_, n)| n.is_dir())
            .map(|(name, _)| name.clone())
            .collect();
        for name in dirs {
            let before = nav.path().clone();
            nav.change_directory(&name).unwrap();
            nav.change_directory("..").unwrap();
            assert_eq!(nav.path(), &before);
        }
    }

    #[test]
    fn test_display_joins_segments() {
        let mut nav = navigator();
        nav.change_directory("projects/project1").unwrap();
        assert_eq!(nav.path().to_string(), "~/projects/project1");
    }

    #[test]
    fn test_lookup_does_not_move() {
        let nav = navigator();
        let node = nav.lookup("projects").unwrap();
        assert_eq!(node.children.len(), 2);
        assert!(nav.path().is_root());
    }
}
