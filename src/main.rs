// terminal REPL for the portfolio shell, pages are read from disk
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = repl::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod repl {
    use futures::executor::block_on;
    use portfolio_terminal::{
        logging, Dispatcher, HeadlessRenderer, LocalFileClient, OutputLine, PendingOutput, PortfolioConfig,
        ShellError, Style, TabCompletion, TerminalContext,
    };
    use std::cell::RefCell;
    use std::io::{self, BufRead, Write};
    use std::path::{Path, PathBuf};
    use std::rc::Rc;
    use std::time::Duration;

    fn color(style: Style) -> &'static str {
        match style {
            Style::Plain | Style::File => "",
            Style::Info => "\x1b[36m",
            Style::Success => "\x1b[32m",
            Style::Warning => "\x1b[33m",
            Style::Error => "\x1b[31m",
            Style::Folder | Style::Prompt => "\x1b[34m",
            Style::Heading => "\x1b[1;32m",
        }
    }

    fn print_lines<'a>(lines: impl IntoIterator<Item = &'a OutputLine>) {
        for line in lines {
            match color(line.style) {
                "" => println!("{}", line.text),
                code => println!("{}{}\x1b[0m", code, line.text),
            }
        }
    }

    fn drive(pending: PendingOutput) {
        let output = block_on(pending);
        print_lines(&output.lines);
        if let Some(delayed) = output.delayed {
            std::thread::sleep(Duration::from_millis(u64::from(delayed.after_ms)));
            print_lines(&delayed.lines);
        }
    }

    /// `portfolio-terminal [config.json]`. Page urls resolve against the
    /// config file's directory (or the working directory for the built-in
    /// config).
    fn load() -> Result<(PortfolioConfig, PathBuf), ShellError> {
        match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| ShellError::InvalidConfig(format!("{}: {}", path, e)))?;
                let base = Path::new(&path).parent().map(Path::to_path_buf).unwrap_or_default();
                Ok((PortfolioConfig::from_json(&json)?, base))
            }
            None => Ok((PortfolioConfig::builtin()?, PathBuf::from("."))),
        }
    }

    pub fn run() -> Result<(), ShellError> {
        let (config, base) = load()?;
        logging::init(config.log_level());

        let renderer = Rc::new(RefCell::new(HeadlessRenderer::new()));
        let http = Rc::new(LocalFileClient::new(base));
        let ctx = TerminalContext::new(Rc::new(config), renderer, http)?;
        let mut dispatcher = Dispatcher::new(ctx);

        print_lines(&dispatcher.welcome_banner());
        drive(dispatcher.start());

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            print!("{}{}\x1b[0m ", color(Style::Prompt), dispatcher.prompt());
            let _ = stdout.flush();

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let input = input.trim();
            if input == "exit" {
                break;
            }

            // a trailing tab asks for completion instead of running the line
            if let Some(partial) = input.strip_suffix("\\t") {
                match dispatcher.complete(partial) {
                    TabCompletion::Replaced(line) => println!("{}", line),
                    candidates => print_lines(&candidates.listing()),
                }
                continue;
            }

            let dispatch = dispatcher.dispatch(input);
            if dispatch.clear_screen {
                print!("\x1b[2J\x1b[H");
            }
            // the prompt was already echoed by the terminal itself
            print_lines(dispatch.lines.iter().filter(|l| l.style != Style::Prompt));
            if let Some(pending) = dispatch.pending {
                drive(pending);
            }
        }
        Ok(())
    }
}
