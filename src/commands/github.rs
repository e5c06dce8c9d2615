use super::fetch_json;
use crate::command::{Category, Command, CommandResult};
use crate::context::TerminalContext;
use crate::output::{DeferredOutput, OutputLine};
use serde::Deserialize;

/// github
/// Public profile numbers for the configured GitHub account.
pub struct GithubCommand;

#[derive(Debug, Deserialize)]
struct Profile {
    login: String,
    #[serde(default)]
    name: Option<String>,
    public_repos: u32,
    followers: u32,
    following: u32,
    #[serde(default)]
    bio: Option<String>,
}

impl Command for GithubCommand {
    fn usage(&self) -> &'static str {
        "github"
    }

    fn summary(&self) -> &'static str {
        "My GitHub statistics"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        fetch_json(ctx, &ctx.config.apis.github, "Fetching GitHub stats...", "GitHub stats", |p: Profile| {
            Ok(format_profile(p))
        })
    }
}

fn format_profile(p: Profile) -> DeferredOutput {
    let bio = p.bio.filter(|b| !b.trim().is_empty());
    DeferredOutput::lines(vec![
        OutputLine::blank(),
        OutputLine::success(format!("🐙 GitHub Stats - @{}", p.login)),
        OutputLine::plain(format!("   Name: {}", p.name.as_deref().unwrap_or(&p.login))),
        OutputLine::plain(format!("   Public Repos: {}", p.public_repos)),
        OutputLine::plain(format!("   Followers: {}", p.followers)),
        OutputLine::plain(format!("   Following: {}", p.following)),
        OutputLine::plain(format!("   Bio: {}", bio.as_deref().unwrap_or("No bio"))),
        OutputLine::blank(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Outcome;
    use crate::commands::testing::context_with;
    use crate::error::ShellError;
    use futures::executor::block_on;

    const URL: &str = "https://api.github.com/users/AlphaBeast97";

    fn run(body: &str) -> Result<DeferredOutput, ShellError> {
        let mut ctx = context_with(&[(URL, body)]);
        match GithubCommand.execute(&[], &mut ctx).unwrap() {
            Outcome::Deferred { lines, pending } => {
                assert_eq!(lines, vec![OutputLine::info("Fetching GitHub stats...")]);
                block_on(pending)
            }
            _ => panic!("github is deferred"),
        }
    }

    #[test]
    fn test_profile_without_bio() {
        let body = r#"{"login":"AlphaBeast97","name":"Saad","public_repos":12,"followers":3,"following":5,"bio":null}"#;
        let texts: Vec<String> = run(body).unwrap().lines.into_iter().map(|l| l.text).collect();
        assert_eq!(texts[1], "🐙 GitHub Stats - @AlphaBeast97");
        assert_eq!(texts[2], "   Name: Saad");
        assert_eq!(texts[3], "   Public Repos: 12");
        assert_eq!(texts[6], "   Bio: No bio");
    }

    #[test]
    fn test_rate_limited_response() {
        let body = r#"{"message":"API rate limit exceeded"}"#;
        assert_eq!(run(body).unwrap_err(), ShellError::NetworkFetchFailure("GitHub stats".into()));
    }
}
