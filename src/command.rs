use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::output::{DeferredOutput, OutputLine};
use futures::future::LocalBoxFuture;
use std::collections::HashMap;

/// What a handler hands back to the dispatcher.
pub enum Outcome {
    Immediate(Vec<OutputLine>),
    /// `lines` render now, `pending` renders whenever it settles.
    Deferred {
        lines: Vec<OutputLine>,
        pending: LocalBoxFuture<'static, Result<DeferredOutput, ShellError>>,
    },
    ClearScreen,
}

impl Outcome {
    pub fn line(line: OutputLine) -> Self {
        Outcome::Immediate(vec![line])
    }

    pub fn empty() -> Self {
        Outcome::Immediate(Vec::new())
    }
}

pub type CommandResult = Result<Outcome, ShellError>;

/// Section a command is listed under in `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Navigation,
    Info,
    Network,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Navigation => "Navigation:",
            Category::Info => "Info:",
            Category::Network => "Easter Eggs (API Powered):",
        }
    }
}

pub trait Command {
    /// e.g. `cd <page>`
    fn usage(&self) -> &'static str;
    fn summary(&self) -> &'static str;
    fn category(&self) -> Category;
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult;
}

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Names are case-insensitive.
    pub fn register_command(&mut self, name: &str, cmd: Box<dyn Command>) {
        self.commands.insert(name.to_lowercase(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(&name.to_lowercase()).map(Box::as_ref)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_commands() -> Self {
        use crate::commands::*;

        let mut reg = Self::new();
        reg.register_command("help", Box::new(help::HelpCommand));
        reg.register_command("ls", Box::new(ls::LsCommand));
        reg.register_command("cd", Box::new(cd::CdCommand));
        reg.register_command("pwd", Box::new(pwd::PwdCommand));
        reg.register_command("clear", Box::new(clear::ClearCommand));
        reg.register_command("whoami", Box::new(whoami::WhoamiCommand));
        reg.register_command("date", Box::new(date::DateCommand));
        reg.register_command("echo", Box::new(echo::EchoCommand));
        reg.register_command("weather", Box::new(weather::WeatherCommand));
        reg.register_command("joke", Box::new(joke::JokeCommand));
        reg.register_command("fact", Box::new(fact::FactCommand));
        reg.register_command("crypto", Box::new(crypto::CryptoCommand));
        reg.register_command("github", Box::new(github::GithubCommand));
        reg
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::default_commands()
    }
}

/// Split a trimmed line into a lower-cased command name and its arguments.
pub fn parse_input(input: &str) -> Option<(String, Vec<String>)> {
    let mut parts = input.split_whitespace();
    let cmd = parts.next()?.to_lowercase();
    let args = parts.map(str::to_string).collect();
    Some((cmd, args))
}

/// Look up and run one command line. Empty input is a no-op.
pub fn run_command(input: &str, ctx: &mut TerminalContext, registry: &CommandRegistry) -> CommandResult {
    let (cmd, args) = match parse_input(input.trim()) {
        Some(parsed) => parsed,
        None => return Ok(Outcome::empty()),
    };

    match registry.get(&cmd) {
        Some(command) => command.execute(&args, ctx),
        None => Err(ShellError::UnknownCommand(cmd)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_lowercases_name_only() {
        let (cmd, args) = parse_input("ECHO Hello   World").unwrap();
        assert_eq!(cmd, "echo");
        assert_eq!(args, vec!["Hello", "World"]);
        assert!(parse_input("   ").is_none());
    }

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        let reg = CommandRegistry::default_commands();
        assert!(reg.get("LS").is_some());
        assert!(reg.get("Cd").is_some());
        assert!(reg.get("rm").is_none());
    }

    #[test]
    fn test_default_command_set() {
        let reg = CommandRegistry::default_commands();
        assert_eq!(
            reg.get_command_names(),
            vec![
                "cd", "clear", "crypto", "date", "echo", "fact", "github", "help", "joke", "ls", "pwd",
                "weather", "whoami"
            ]
        );
    }
}
