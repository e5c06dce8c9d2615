use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::navigator::Navigator;
use crate::output::{OutputLine, Style};
use crate::vfs::TreeNode;

/// ls [target]
/// List the sections below the current directory (or below `target`).
pub struct LsCommand;

impl Command for LsCommand {
    fn usage(&self) -> &'static str {
        "ls"
    }

    fn summary(&self) -> &'static str {
        "List available pages/sections"
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let node = match args.first() {
            Some(target) => match lookup(&ctx.navigator, target)? {
                Target::Dir(node) => node,
                // ls on a file just echoes its name back
                Target::File(name) => {
                    return Ok(Outcome::Immediate(vec![OutputLine::new(name, Style::File)]));
                }
            },
            None => ctx.navigator.current_node(),
        };

        if node.children.is_empty() {
            return Err(ShellError::EmptyDirectory);
        }

        // children is a BTreeMap, so this is already sorted by name
        let mut lines = Vec::with_capacity(node.children.len() + 2);
        lines.push(OutputLine::blank());
        for (name, child) in &node.children {
            let style = if child.is_dir() { Style::Folder } else { Style::File };
            lines.push(OutputLine::new(format!("  {}", name), style));
        }
        lines.push(OutputLine::blank());
        Ok(Outcome::Immediate(lines))
    }
}

enum Target<'a> {
    Dir(&'a TreeNode),
    File(String),
}

fn lookup<'a>(navigator: &'a Navigator, target: &str) -> Result<Target<'a>, ShellError> {
    let missing = || ShellError::NoSuchEntry {
        command: "ls".to_string(),
        target: target.to_string(),
    };

    match navigator.lookup(target) {
        Ok(node) => Ok(Target::Dir(node)),
        Err(ShellError::NotADirectory(_)) => {
            // the walk hit a file; only fine if it was the last segment
            let trimmed = target.trim_end_matches('/');
            let (parent, name) = match trimmed.rsplit_once('/') {
                Some(("", name)) => ("/", name),
                Some((parent, name)) => (parent, name),
                None => (".", trimmed),
            };
            match navigator.lookup(parent).ok().and_then(|dir| dir.children.get(name)) {
                Some(node) if !node.is_dir() => Ok(Target::File(name.to_string())),
                _ => Err(missing()),
            }
        }
        Err(ShellError::DirectoryNotFound(_)) => Err(missing()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;

    fn listing(outcome: Outcome) -> Vec<OutputLine> {
        match outcome {
            Outcome::Immediate(lines) => lines,
            _ => panic!("ls is immediate"),
        }
    }

    #[test]
    fn test_ls_root_sorted() {
        let mut ctx = context();
        let lines = listing(LsCommand.execute(&[], &mut ctx).unwrap());
        let names: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            names,
            vec!["", "  about", "  certifications", "  contact", "  experience", "  projects", ""]
        );
        assert!(lines[1..lines.len() - 1].iter().all(|l| l.style == Style::Folder));
    }

    #[test]
    fn test_ls_styles_files() {
        let mut ctx = context();
        let lines = listing(LsCommand.execute(&["projects".to_string()], &mut ctx).unwrap());
        let readme = lines.iter().find(|l| l.text == "  README").unwrap();
        assert_eq!(readme.style, Style::File);
        let project = lines.iter().find(|l| l.text == "  project1").unwrap();
        assert_eq!(project.style, Style::Folder);
        // listing a target does not move
        assert!(ctx.navigator.path().is_root());
    }

    #[test]
    fn test_ls_empty_directory() {
        let mut ctx = context();
        ctx.navigator.change_directory("about").unwrap();
        let err = LsCommand.execute(&[], &mut ctx).err().unwrap();
        assert_eq!(err, ShellError::EmptyDirectory);
        assert_eq!(err.to_string(), "Empty directory");
    }

    #[test]
    fn test_ls_unknown_target() {
        let mut ctx = context();
        let err = LsCommand.execute(&["nowhere".to_string()], &mut ctx).err().unwrap();
        assert_eq!(err.to_string(), "ls: nowhere: No such file or directory");
        assert_eq!(err.style(), Style::Error);

        let err = LsCommand.execute(&["projects/README/x".to_string()], &mut ctx).err().unwrap();
        assert_eq!(err.to_string(), "ls: projects/README/x: No such file or directory");
    }

    #[test]
    fn test_ls_file_target_lists_itself() {
        let mut ctx = context();
        let lines = listing(LsCommand.execute(&["projects/README".to_string()], &mut ctx).unwrap());
        assert_eq!(lines, vec![OutputLine::new("README", Style::File)]);

        ctx.navigator.change_directory("projects").unwrap();
        let lines = listing(LsCommand.execute(&["README".to_string()], &mut ctx).unwrap());
        assert_eq!(lines, vec![OutputLine::new("README", Style::File)]);
    }
}
