use crate::command::CommandRegistry;
use crate::config::PortfolioConfig;
use crate::error::ShellError;
use crate::history::CommandHistory;
use crate::navigator::Navigator;
use crate::net::HttpClient;
use crate::presenter::{PageLoader, PagePresenter, Renderer};
use std::cell::RefCell;
use std::rc::Rc;

/// Per-session state handed to every command.
pub struct TerminalContext {
    pub config: Rc<PortfolioConfig>,
    pub navigator: Navigator,
    pub history: CommandHistory,
    pub presenter: PagePresenter,
    pub http: Rc<dyn HttpClient>,
    registry: Option<Rc<CommandRegistry>>,
}

impl TerminalContext {
    pub fn new(
        config: Rc<PortfolioConfig>,
        renderer: Rc<RefCell<dyn Renderer>>,
        http: Rc<dyn HttpClient>,
    ) -> Result<Self, ShellError> {
        let tree = Rc::new(config.build_tree()?);
        let loader = PageLoader::new(Rc::clone(&http), config.pages.clone());
        let presenter = PagePresenter::new(renderer, Rc::new(loader))
            .with_gallery(&config.gallery_page, config.achievements.clone());

        Ok(Self {
            navigator: Navigator::new(tree),
            history: CommandHistory::new(),
            presenter,
            http,
            config,
            registry: None,
        })
    }

    /// `saad@portfolio:~/projects$`
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$",
            self.config.prompt.user,
            self.config.prompt.host,
            self.navigator.path()
        )
    }

    pub fn get_command_registry(&self) -> Option<&Rc<CommandRegistry>> {
        self.registry.as_ref()
    }

    pub fn set_command_registry(&mut self, registry: Rc<CommandRegistry>) {
        self.registry = Some(registry);
    }
}
