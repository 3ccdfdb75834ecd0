//! Routes a parsed subcommand to its implementation.
//!
//! The dispatcher owns the collaborators a command may need (home, store,
//! installer, environment, server launcher) so tests can swap any of them.

use crate::agents::installer::AgentInstaller;
use crate::agents::scaffold::ScriptKind;
use crate::cli::{Cli, Commands};
use crate::commands;
use crate::config::{ConfigResolver, Environment};
use crate::error::Result;
use crate::home::Home;
use crate::server::browser::{BrowserHook, PostStartHook};
use crate::server::{ProcessLauncher, ServerLauncher};
use crate::store::ConfigStore;
use clap::CommandFactory;
use std::cell::RefCell;
use std::path::PathBuf;

pub struct Dispatcher<'a> {
    home: &'a Home,
    env: &'a dyn Environment,
    store: ConfigStore,
    installer: AgentInstaller,
    launcher: RefCell<Option<Box<dyn ServerLauncher>>>,
    open_browser: bool,
    workdir: Option<PathBuf>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(home: &'a Home, env: &'a dyn Environment) -> Self {
        Self {
            home,
            env,
            store: ConfigStore::new(home),
            installer: AgentInstaller::new(home),
            launcher: RefCell::new(None),
            open_browser: true,
            workdir: None,
        }
    }

    pub fn with_installer(mut self, installer: AgentInstaller) -> Self {
        self.installer = installer;
        self
    }

    /// Use `launcher` for `run` instead of locating the server program.
    pub fn with_launcher(self, launcher: Box<dyn ServerLauncher>) -> Self {
        *self.launcher.borrow_mut() = Some(launcher);
        self
    }

    /// Print the chat address instead of opening a browser.
    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }

    /// Folder `new` and `fun` treat as the current directory.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn dispatch(&self, command: Option<&Commands>) -> Result<()> {
        let Some(command) = command else {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        };

        match command {
            Commands::Set { assignment, value } => {
                commands::set::execute(&self.store, assignment.as_deref(), value.as_deref())
            }
            Commands::List => commands::list::execute(&self.installer),
            Commands::Install { name } => {
                commands::install::execute(&self.installer, name.as_deref())
            }
            Commands::Run { folder } => self.run(folder.as_deref()),
            Commands::New { name } => {
                commands::new::execute(ScriptKind::Agent, name.as_deref(), &self.workdir()?)
            }
            Commands::Fun { name } => {
                commands::new::execute(ScriptKind::Function, name.as_deref(), &self.workdir()?)
            }
            Commands::View { port } => commands::view::execute(*port, self.hook().as_ref()),
        }
    }

    fn run(&self, folder: Option<&std::path::Path>) -> Result<()> {
        let entries = self.store.load()?;
        let resolver = ConfigResolver::new(self.home, &entries, self.env);

        commands::run::execute(&resolver, folder, |resolver| {
            if let Some(launcher) = self.launcher.borrow_mut().take() {
                return Ok(launcher);
            }
            let launcher =
                ProcessLauncher::locate(&resolver.server_command())?.with_hook(self.hook());
            Ok(Box::new(launcher) as Box<dyn ServerLauncher>)
        })
    }

    fn hook(&self) -> Box<dyn PostStartHook> {
        if self.open_browser {
            Box::new(BrowserHook::detect())
        } else {
            Box::new(BrowserHook::print_only())
        }
    }

    fn workdir(&self) -> Result<PathBuf> {
        match &self.workdir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}
