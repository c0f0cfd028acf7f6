//! Test runner activation
//!
//! Selects the runner named by `test_runner`, keeps `tests_require` and
//! `runner_args` in step with it, and binds `cmdclass["test"]` to the glue
//! class written into the descriptor.

use crate::config::Config;
use pkg_meta::TestRunner;
use pkg_meta::runner::GLUE_CLASS;
use serde_json::{Map, Value};

/// Apply runner wiring to `config`.
///
/// Without a `test_runner` the wiring of a previous runner is withdrawn
/// and the user's own `tests_require` and `runner_args`, if any, count as
/// configured.
pub(crate) fn activate(config: &mut Config) {
    let base = tests_require_base(config);
    config.user_tests_require = base.clone();

    let Some(runner) = config.runner() else {
        deactivate(config, base);
        return;
    };
    config
        .attrs
        .insert("test_runner".into(), Value::from(runner.name()));

    let mut tests_require = resolve_tests_require(config, runner, base);
    let runner_args = resolve_runner_args(config, runner, &mut tests_require);

    match &tests_require {
        Some(tests_require) => {
            config
                .attrs
                .insert("tests_require".into(), strings(tests_require));
        }
        None => {
            config.attrs.remove("tests_require");
        }
    }
    config.engine_tests_require = tests_require;
    config.attrs.insert("runner_args".into(), strings(&runner_args));
    bind_cmdclass(config);

    tracing::debug!(
        runner = %runner,
        configured_runner_args = config.configured_runner_args,
        configured_tests_require = config.configured_tests_require,
        "Test runner activated"
    );
}

/// Remove what a previous activation added, keeping user values.
fn deactivate(config: &mut Config, base: Option<Vec<String>>) {
    match &base {
        Some(base) => {
            config.attrs.insert("tests_require".into(), strings(base));
        }
        None => {
            config.attrs.remove("tests_require");
        }
    }
    if config.engine_runner_args.is_some()
        && config.list_attr("runner_args") == config.engine_runner_args
    {
        config.attrs.remove("runner_args");
    }
    unbind_cmdclass(config);

    config.configured_tests_require = base.is_some();
    config.configured_runner_args = config.contains("runner_args");
    config.engine_tests_require = None;
    config.engine_runner_args = None;
}

/// The user's part of `tests_require`.
///
/// A value still equal to the engine's last output is replaced by what
/// the user had before runner dependencies were added.
fn tests_require_base(config: &Config) -> Option<Vec<String>> {
    let current = config.list_attr("tests_require");
    if current.is_some() && current == config.engine_tests_require {
        config.user_tests_require.clone()
    } else {
        current
    }
}

fn resolve_tests_require(
    config: &mut Config,
    runner: TestRunner,
    base: Option<Vec<String>>,
) -> Option<Vec<String>> {
    let Some(dependency) = runner.dependency() else {
        config.configured_tests_require = base.is_some();
        return base;
    };

    let mut tests_require = match base {
        None => {
            config.configured_tests_require = false;
            Vec::new()
        }
        Some(base) => {
            let engine_shaped = base == [dependency]
                || runner
                    .coverage_dependency()
                    .is_some_and(|cov| base == [dependency, cov]);
            config.configured_tests_require = !engine_shaped;
            base
        }
    };
    push_unique(&mut tests_require, dependency);
    Some(tests_require)
}

fn resolve_runner_args(
    config: &mut Config,
    runner: TestRunner,
    tests_require: &mut Option<Vec<String>>,
) -> Vec<String> {
    let tests_dir = config.str_attr("tests_dir").map(str::to_string);
    let current = config.list_attr("runner_args");

    let engine_owned = match &current {
        None => true,
        Some(args) => {
            config.engine_runner_args.as_ref() == Some(args)
                || (runner.computes_args() && runner.is_default_shaped(args, tests_dir.is_some()))
        }
    };

    if !engine_owned {
        config.configured_runner_args = true;
        return current.unwrap_or_default();
    }

    let defaults = runner.default_args();
    let mut args: Vec<String> = defaults.iter().take(2).map(|arg| arg.to_string()).collect();
    if let Some(name) = config.name().filter(|_| runner.computes_args()) {
        args = defaults.iter().map(|arg| arg.to_string()).collect();
        args.push(name.to_string());
        if let (Some(cov), Some(tests_require)) = (runner.coverage_dependency(), tests_require.as_mut()) {
            push_unique(tests_require, cov);
        }
    }
    if let Some(tests_dir) = &tests_dir {
        args.extend(runner.tests_dir_args(tests_dir));
    }

    config.configured_runner_args = false;
    config.engine_runner_args = Some(args.clone());
    args
}

fn bind_cmdclass(config: &mut Config) {
    let glue = Value::from(GLUE_CLASS);
    match config.attrs.get_mut("cmdclass") {
        Some(Value::Object(cmdclass)) => {
            cmdclass.insert("test".into(), glue);
        }
        _ => {
            config
                .attrs
                .insert("cmdclass".into(), Value::Object(Map::from_iter([("test".to_string(), glue)])));
        }
    }
}

fn unbind_cmdclass(config: &mut Config) {
    let Some(Value::Object(cmdclass)) = config.attrs.get_mut("cmdclass") else {
        return;
    };
    if cmdclass.get("test").and_then(Value::as_str) == Some(GLUE_CLASS) {
        cmdclass.shift_remove("test");
    }
    if cmdclass.is_empty() {
        config.attrs.remove("cmdclass");
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

fn strings(items: &[String]) -> Value {
    Value::Array(items.iter().map(|item| Value::from(item.as_str())).collect())
}

#[cfg(test)]
mod tests {
    use crate::config::merge;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    fn config(values: Value) -> crate::Config {
        let Value::Object(explicit) = values else {
            panic!("expected an object");
        };
        merge(Map::new(), explicit).unwrap()
    }

    fn args(config: &crate::Config) -> Vec<String> {
        config.list_attr("runner_args").unwrap()
    }

    #[test]
    fn test_pytest_defaults_track_name() {
        let mut config = config(json!({"name": "x", "test_runner": "pytest"}));
        assert_eq!(args(&config), vec!["-v", "-rx", "--cov-report", "term-missing", "--cov", "x"]);
        assert_eq!(config.get("tests_require"), Some(&json!(["pytest", "pytest-cov"])));
        assert!(!config.is_configured_runner_args());
        assert!(!config.is_configured_tests_require());

        config.set("name", json!("y")).unwrap();
        assert_eq!(args(&config).last().map(String::as_str), Some("y"));
    }

    #[test]
    fn test_custom_runner_args_survive_rename() {
        let mut config = config(json!({
            "name": "x",
            "test_runner": "pytest",
            "runner_args": ["-vv", "--pdb"],
        }));
        config.set("name", json!("y")).unwrap();

        assert_eq!(args(&config), vec!["-vv", "--pdb"]);
        assert!(config.is_configured_runner_args());
    }

    #[test]
    fn test_runner_args_without_name() {
        let mut config = config(json!({"test_runner": "nose"}));
        assert_eq!(args(&config), vec!["-v", "-d"]);
        assert_eq!(config.get("tests_require"), Some(&json!(["nose"])));

        config.set("name", json!("demo")).unwrap();
        assert_eq!(args(&config).last().map(String::as_str), Some("demo"));
        assert_eq!(config.get("tests_require"), Some(&json!(["nose", "nose-cov"])));
        assert!(!config.is_configured_runner_args());
    }

    #[test]
    fn test_tests_dir_positions() {
        let pytest = config(json!({"name": "demo", "test_runner": "pytest", "tests_dir": "somewhere"}));
        assert_eq!(args(&pytest).last().map(String::as_str), Some("somewhere"));

        let nose = config(json!({"name": "demo", "test_runner": "nose", "tests_dir": "somewhere"}));
        let nose_args = args(&nose);
        assert_eq!(&nose_args[nose_args.len() - 2..], &["-w", "somewhere"]);
    }

    #[test]
    fn test_tests_dir_added_later_is_threaded_in() {
        let mut config = config(json!({"name": "demo", "test_runner": "pytest"}));
        config.set("tests_dir", json!("tests")).unwrap();
        config.verify().unwrap();

        let args = args(&config);
        assert_eq!(args.len(), 7);
        assert_eq!(&args[5..], &["demo", "tests"]);
    }

    #[test]
    fn test_additional_tests_require() {
        let mut config = config(json!({
            "name": "test",
            "test_runner": "pytest",
            "tests_require": ["my_thing"],
        }));
        assert_eq!(
            config.get("tests_require"),
            Some(&json!(["my_thing", "pytest", "pytest-cov"]))
        );
        assert!(config.is_configured_tests_require());

        config.set("name", json!("changed")).unwrap();
        assert_eq!(args(&config).last().map(String::as_str), Some("changed"));
    }

    #[test]
    fn test_string_tests_require_becomes_list() {
        let config = config(json!({"test_runner": "nose", "tests_require": "mock"}));
        assert_eq!(config.get("tests_require"), Some(&json!(["mock", "nose"])));
    }

    #[test]
    fn test_runner_name_is_normalized() {
        let nose = config(json!({"test_runner": "NoseTests"}));
        assert_eq!(nose.str_attr("test_runner"), Some("nose"));

        let config = config(json!({"test_runner": "green"}));
        assert_eq!(config.str_attr("test_runner"), Some("unittest"));
        assert_eq!(config.get("runner_args"), Some(&json!([])));
        assert!(!config.is_configured_runner_args());
    }

    #[test]
    fn test_cmdclass_keeps_user_entries() {
        let config = config(json!({"test_runner": "pytest", "cmdclass": {"foo": "MyFooClass"}}));
        assert_eq!(
            config.get("cmdclass"),
            Some(&json!({"foo": "MyFooClass", "test": "PkgMetaTest"}))
        );
    }

    #[test]
    fn test_removing_runner_withdraws_wiring() {
        let mut config = config(json!({"name": "demo", "test_runner": "pytest"}));
        config.unset("test_runner").unwrap();

        assert!(!config.contains("cmdclass"));
        assert!(!config.contains("runner_args"));
        assert!(!config.contains("tests_require"));
        assert!(!config.is_configured_runner_args());
        assert!(!config.is_configured_tests_require());
        assert_eq!(
            crate::project::project(&config),
            Map::from_iter([("name".to_string(), json!("demo"))])
        );
        assert!(!crate::render(&config).contains("cmdclass="));
    }

    #[test]
    fn test_removing_runner_keeps_user_values() {
        let mut config = config(json!({
            "name": "demo",
            "test_runner": "nose",
            "tests_require": ["mock"],
            "runner_args": ["-vv"],
            "cmdclass": {"foo": "MyFooClass"},
        }));
        config.unset("test_runner").unwrap();

        assert_eq!(config.get("cmdclass"), Some(&json!({"foo": "MyFooClass"})));
        assert_eq!(config.get("tests_require"), Some(&json!(["mock"])));
        assert_eq!(args(&config), vec!["-vv"]);
        assert!(config.is_configured_runner_args());
        assert!(config.is_configured_tests_require());
    }

    #[test]
    fn test_switching_runner_replaces_dependencies() {
        let mut config = config(json!({"name": "demo", "test_runner": "pytest"}));
        config.set("test_runner", json!("nose")).unwrap();

        assert_eq!(config.get("tests_require"), Some(&json!(["nose", "nose-cov"])));
        assert_eq!(args(&config).first().map(String::as_str), Some("-v"));
        assert!(!config.is_configured_tests_require());
        assert!(!crate::project::project(&config).contains_key("tests_require"));
    }

    #[test]
    fn test_switching_runner_keeps_user_dependencies() {
        let mut config = config(json!({
            "name": "demo",
            "test_runner": "pytest",
            "tests_require": ["mock"],
        }));
        config.set("test_runner", json!("nose")).unwrap();
        assert_eq!(config.get("tests_require"), Some(&json!(["mock", "nose", "nose-cov"])));
        assert!(config.is_configured_tests_require());

        config.set("test_runner", json!("unittest")).unwrap();
        assert_eq!(config.get("tests_require"), Some(&json!(["mock"])));
    }

    #[test]
    fn test_verify_is_idempotent() {
        let mut config = config(json!({"name": "demo", "test_runner": "nose", "tests_dir": "t"}));
        let before = config.get("runner_args").cloned();
        config.verify().unwrap();
        config.verify().unwrap();
        assert_eq!(config.get("runner_args").cloned(), before);
        assert_eq!(config.get("tests_require"), Some(&json!(["nose", "nose-cov"])));
    }
}
