//! Test runner variants
//!
//! A project selects its runner through the free-text `test_runner`
//! attribute. Each variant owns its dependency names, its default argument
//! template and the `run_tests` body of the descriptor glue class.

use crate::literal::{repr, str_repr};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Name of the glue class written into the descriptor.
pub const GLUE_CLASS: &str = "PkgMetaTest";

const PYTEST_ARGS: &[&str] = &["-v", "-rx", "--cov-report", "term-missing", "--cov"];
const NOSE_ARGS: &[&str] = &[
    "-v",
    "-d",
    "--with-coverage",
    "--cov-report",
    "term-missing",
    "--cov",
];

/// Supported test runners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestRunner {
    /// Library-discovery runner
    Pytest,
    /// Coverage-aware runner
    Nose,
    /// Zero-dependency runner, the fallback for anything unrecognized
    Unittest,
}

impl TestRunner {
    /// Select a variant from free text, case-insensitively by prefix.
    pub fn select(value: &str) -> Self {
        let lowered = value.trim().to_lowercase();
        if lowered.starts_with("pytest") {
            Self::Pytest
        } else if lowered.starts_with("nose") {
            Self::Nose
        } else {
            Self::Unittest
        }
    }

    /// Canonical name, also the module imported by the glue class.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pytest => "pytest",
            Self::Nose => "nose",
            Self::Unittest => "unittest",
        }
    }

    /// The package that must be present in `tests_require`.
    pub fn dependency(&self) -> Option<&'static str> {
        match self {
            Self::Pytest => Some("pytest"),
            Self::Nose => Some("nose"),
            Self::Unittest => None,
        }
    }

    /// Coverage companion added when coverage targets the package name.
    pub fn coverage_dependency(&self) -> Option<&'static str> {
        match self {
            Self::Pytest => Some("pytest-cov"),
            Self::Nose => Some("nose-cov"),
            Self::Unittest => None,
        }
    }

    /// Default argument template; the coverage target follows it.
    pub fn default_args(&self) -> &'static [&'static str] {
        match self {
            Self::Pytest => PYTEST_ARGS,
            Self::Nose => NOSE_ARGS,
            Self::Unittest => &[],
        }
    }

    /// Whether the variant manages `runner_args` at all.
    pub fn computes_args(&self) -> bool {
        !matches!(self, Self::Unittest)
    }

    /// Arguments that point the runner at `tests_dir`.
    pub fn tests_dir_args(&self, tests_dir: &str) -> Vec<String> {
        match self {
            Self::Pytest => vec![tests_dir.to_string()],
            Self::Nose => vec!["-w".to_string(), tests_dir.to_string()],
            Self::Unittest => Vec::new(),
        }
    }

    /// Number of arguments following the default template in a
    /// default-shaped argument list: the coverage target plus any
    /// `tests_dir` arguments.
    pub fn trailing_len(&self, has_tests_dir: bool) -> usize {
        let dir_len = match self {
            Self::Pytest => 1,
            Self::Nose => 2,
            Self::Unittest => 0,
        };
        1 + if has_tests_dir { dir_len } else { 0 }
    }

    /// Whether `args` has the shape of an engine-computed default list.
    pub fn is_default_shaped(&self, args: &[String], has_tests_dir: bool) -> bool {
        let defaults = self.default_args();
        args.len() == defaults.len() + self.trailing_len(has_tests_dir)
            && args.iter().zip(defaults).all(|(arg, default)| arg == default)
    }

    /// Python source of the descriptor glue class.
    pub fn template(&self, runner_args: &[String], tests_dir: Option<&str>) -> String {
        let args = Value::Array(runner_args.iter().cloned().map(Value::String).collect());
        let name = self.name();
        let mut out = format!(
            r#"from setuptools.command.test import test as TestCommand


class {GLUE_CLASS}(TestCommand):
    """TestCommand subclass to enable setup.py test."""

    def finalize_options(self):
        """Find our package name and test options to fill out test_args."""

        TestCommand.finalize_options(self)
        self.test_args = {args}
        self.test_suite = True

    def run_tests(self):
        """{name} discovery and test execution."""

        import {name}
"#,
            args = repr(&args),
        );
        match self {
            Self::Pytest => out.push_str("        raise SystemExit(pytest.main(self.test_args))\n"),
            Self::Nose => {
                out.push_str("        raise SystemExit(nose.main(argv=self.test_args))\n")
            }
            Self::Unittest => out.push_str(&format!(
                r#"        import os

        test_suite = unittest.defaultTestLoader.discover(
            os.path.abspath({dir})
        )
        raise SystemExit(unittest.TextTestRunner().run(test_suite))
"#,
                dir = str_repr(tests_dir.unwrap_or(".")),
            )),
        }
        out
    }
}

impl FromStr for TestRunner {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::select(s))
    }
}

impl fmt::Display for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
