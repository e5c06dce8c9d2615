use crate::command::CommandRegistry;
use crate::navigator::Navigator;
use crate::output::{OutputLine, Style};

/// Result of pressing Tab on the current input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabCompletion {
    Unchanged,
    /// Exactly one match: the whole new input buffer.
    Replaced(String),
    /// Several matches, sorted. The buffer stays as it is.
    Candidates(Vec<String>),
}

impl TabCompletion {
    /// The candidate listing as terminal lines, framed by blanks like `ls`.
    pub fn listing(&self) -> Vec<OutputLine> {
        match self {
            TabCompletion::Candidates(names) => std::iter::once(OutputLine::blank())
                .chain(names.iter().map(|n| OutputLine::new(format!("  {}", n), Style::Folder)))
                .chain(std::iter::once(OutputLine::blank()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Complete the first word against command names, any later word against the
/// children of the directory it points into (`projects/pr` looks in
/// `projects`).
pub fn complete(input: &str, navigator: &Navigator, registry: &CommandRegistry) -> TabCompletion {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return TabCompletion::Unchanged;
    }

    let ends_with_space = trimmed.ends_with(char::is_whitespace);
    let words: Vec<&str> = trimmed.split_whitespace().collect();

    if words.len() == 1 && !ends_with_space {
        let prefix = words[0].to_lowercase();
        let matches: Vec<String> = registry
            .get_command_names()
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect();
        return settle(matches, |name| format!("{} ", name));
    }

    let (head, word) = if ends_with_space {
        (trimmed, "")
    } else {
        let cut = trimmed.len() - words[words.len() - 1].len();
        (&trimmed[..cut], words[words.len() - 1])
    };

    // "projects/pro" -> complete "pro" inside projects/
    let (dir, prefix) = match word.rfind('/') {
        Some(i) => (&word[..=i], &word[i + 1..]),
        None => ("", word),
    };

    let node = if dir.is_empty() {
        navigator.current_node()
    } else {
        match navigator.lookup(dir) {
            Ok(node) => node,
            Err(_) => return TabCompletion::Unchanged,
        }
    };

    let matches: Vec<String> = node
        .children
        .keys()
        .filter(|name| name.starts_with(prefix))
        .cloned()
        .collect();
    settle(matches, |name| format!("{}{}{}", head, dir, name))
}

fn settle(mut matches: Vec<String>, replace: impl FnOnce(&str) -> String) -> TabCompletion {
    match matches.len() {
        0 => TabCompletion::Unchanged,
        1 => TabCompletion::Replaced(replace(&matches[0])),
        _ => {
            matches.sort();
            TabCompletion::Candidates(matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioConfig;
    use std::rc::Rc;

    fn setup() -> (Navigator, CommandRegistry) {
        let tree = PortfolioConfig::builtin().unwrap().build_tree().unwrap();
        (Navigator::new(Rc::new(tree)), CommandRegistry::default_commands())
    }

    #[test]
    fn test_command_name_completion() {
        let (nav, reg) = setup();
        assert_eq!(complete("wh", &nav, &reg), TabCompletion::Replaced("whoami ".into()));
        assert_eq!(
            complete("c", &nav, &reg),
            TabCompletion::Candidates(vec!["cd".into(), "clear".into(), "crypto".into()])
        );
        assert_eq!(complete("zzz", &nav, &reg), TabCompletion::Unchanged);
        assert_eq!(complete("   ", &nav, &reg), TabCompletion::Unchanged);
    }

    #[test]
    fn test_argument_completion() {
        let (nav, reg) = setup();
        assert_eq!(complete("cd ab", &nav, &reg), TabCompletion::Replaced("cd about".into()));
        assert_eq!(
            complete("cd c", &nav, &reg),
            TabCompletion::Candidates(vec!["certifications".into(), "contact".into()])
        );
        assert_eq!(complete("cd x", &nav, &reg), TabCompletion::Unchanged);
    }

    #[test]
    fn test_nested_and_relative_completion() {
        let (mut nav, reg) = setup();
        assert_eq!(
            complete("cd projects/R", &nav, &reg),
            TabCompletion::Replaced("cd projects/README".into())
        );
        assert_eq!(
            complete("ls projects/", &nav, &reg),
            TabCompletion::Candidates(vec!["README".into(), "project1".into(), "project2".into()])
        );

        nav.change_directory("projects").unwrap();
        assert_eq!(complete("cd ../ab", &nav, &reg), TabCompletion::Replaced("cd ../about".into()));
        assert_eq!(complete("cd nowhere/x", &nav, &reg), TabCompletion::Unchanged);
    }

    #[test]
    fn test_listing_frames_candidates() {
        let lines = TabCompletion::Candidates(vec!["a".into(), "b".into()]).listing();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].text, "  a");
        assert!(TabCompletion::Unchanged.listing().is_empty());
    }
}
