//! Runner glue class for the descriptor

use crate::config::Config;
use pkg_meta::TestRunner;

/// Renders the `setup.py test` command class from a configuration.
///
/// The glue borrows the configuration it was built from; nothing about the
/// active runner is stored anywhere else.
#[derive(Debug, Clone, Copy)]
pub struct RunnerGlue<'a> {
    config: &'a Config,
    runner: TestRunner,
}

impl<'a> RunnerGlue<'a> {
    /// Glue for the configured runner, `None` without a `test_runner`.
    pub fn new(config: &'a Config) -> Option<Self> {
        config.runner().map(|runner| Self { config, runner })
    }

    pub fn runner(&self) -> TestRunner {
        self.runner
    }

    /// Arguments passed to the runner by `setup.py test`.
    pub fn test_args(&self) -> Vec<String> {
        self.config.list_attr("runner_args").unwrap_or_default()
    }

    /// Python source of the command class.
    pub fn source(&self) -> String {
        self.runner
            .template(&self.test_args(), self.config.str_attr("tests_dir"))
    }
}
