use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use tempfile::TempDir;

use crate::agent::AgentKind;
use crate::config::environment::{env_string, env_usize};
use crate::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_PATH};

const ENV_KEYS: &[&str] = &[
    "AI_LINTER_CONFIG",
    "AI_LINTER_AGENT",
    "AI_LINTER_MAX_RETRIES",
    "AI_LINTER_CONCURRENCY",
    "AI_LINTER_OUTPUT",
    "AI_LINTER_MODEL_FAST",
    "AI_LINTER_MODEL_REVIEW",
];

fn env_lock<'a>() -> MutexGuard<'a, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clears every `AI_LINTER_*` variable, then applies `vars`.
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let keys = ENV_KEYS
            .iter()
            .copied()
            .chain(vars.iter().map(|(key, _)| *key))
            .chain(["HOME"]);
        let saved = keys
            .map(|key| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();

        for key in ENV_KEYS {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in vars {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.iter().rev() {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn write_config(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("config.json");
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn defaults_without_file_or_env() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();
    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let config = Config::load().unwrap();
    assert_eq!(config.agent.kind, AgentKind::Claude);
    assert_eq!(config.agent.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(config.run.concurrency, DEFAULT_CONCURRENCY);
    assert_eq!(config.run.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
    assert!(!config.run.verbose);
    assert!(config.models.fast.is_none());
}

#[test]
fn config_file_lives_under_home() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();
    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let config_dir = temp_home.path().join(".ai-linter");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config"),
        r#"{ "agent": { "kind": "qwen" }, "run": { "concurrency": 2 } }"#,
    )
    .unwrap();

    let config = Config::load().unwrap();
    assert_eq!(config.agent.kind, AgentKind::Qwen);
    assert_eq!(config.run.concurrency, 2);
}

#[test]
fn load_from_env_only() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("AI_LINTER_AGENT", Some("qwen")),
        ("AI_LINTER_MAX_RETRIES", Some("5")),
        ("AI_LINTER_CONCURRENCY", Some("8")),
        ("AI_LINTER_MODEL_FAST", Some("qwen-turbo")),
        ("AI_LINTER_MODEL_REVIEW", Some("  ")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.agent.kind, AgentKind::Qwen);
    assert_eq!(config.agent.max_retries, 5);
    assert_eq!(config.run.concurrency, 8);
    assert_eq!(config.models.fast.as_deref(), Some("qwen-turbo"));
    assert_eq!(config.models.review, None);
}

#[test]
fn load_prefers_env_over_file() {
    let _lock = env_lock();
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"{
            "agent": { "kind": "claude", "max_retries": 2 },
            "models": { "fast": "file-fast", "review": "file-review" },
            "run": { "concurrency": 3, "output": "file-report.md", "verbose": true }
        }"#,
    );

    let _env = EnvGuard::new(&[
        ("AI_LINTER_CONFIG", Some(path.as_str())),
        ("AI_LINTER_CONCURRENCY", Some("7")),
        ("AI_LINTER_MODEL_REVIEW", Some("env-review")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.agent.max_retries, 2);
    assert_eq!(config.run.concurrency, 7);
    assert_eq!(config.run.output, PathBuf::from("file-report.md"));
    assert!(config.run.verbose);
    assert_eq!(config.models.fast.as_deref(), Some("file-fast"));
    assert_eq!(config.models.review.as_deref(), Some("env-review"));
}

#[test]
fn empty_config_file_is_ignored() {
    let _lock = env_lock();
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "   \n");
    let _env = EnvGuard::new(&[("AI_LINTER_CONFIG", Some(path.as_str()))]);

    let config = Config::load().unwrap();
    assert_eq!(config.run.concurrency, DEFAULT_CONCURRENCY);
}

#[test]
fn malformed_config_file_is_an_error() {
    let _lock = env_lock();
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, r#"{ "agent": { "kind": "gpt" } }"#);
    let _env = EnvGuard::new(&[("AI_LINTER_CONFIG", Some(path.as_str()))]);

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains("Failed parsing JSON config"));
}

#[test]
fn unknown_agent_in_env_is_an_error() {
    let _lock = env_lock();
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::new(&[
        ("AI_LINTER_CONFIG", Some(temp.path().join("none").to_str().unwrap())),
        ("AI_LINTER_AGENT", Some("gpt")),
    ]);

    let err = Config::load().unwrap_err();
    assert!(format!("{err:#}").contains("Unknown agent 'gpt'"));
}

#[test]
fn zero_concurrency_is_rejected() {
    let err = Config::builder()
        .with_run(|run| run.concurrency = 0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("concurrency must be a positive integer"));

    let err = Config::builder()
        .with_agent(|agent| agent.max_retries = 0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("max retries"));
}

#[test]
fn model_overrides_fall_back_to_adapter_defaults() {
    let config = Config::builder()
        .with_models(|models| models.review = Some("opus".to_string()))
        .build()
        .unwrap();
    let claude = AgentKind::Claude.adapter();
    let qwen = AgentKind::Qwen.adapter();

    assert_eq!(config.models.fast_model(claude).as_deref(), Some("haiku"));
    assert_eq!(config.models.review_model(claude).as_deref(), Some("opus"));
    assert_eq!(config.models.fast_model(qwen), None);
}

#[test]
fn test_env_string() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[("AI_LINTER_TEST_VAR", Some("test_value"))]);

    assert_eq!(
        env_string("AI_LINTER_TEST_VAR").unwrap(),
        Some("test_value".to_string())
    );
    assert_eq!(env_string("AI_LINTER_NONEXISTENT_VAR").unwrap(), None);
}

#[test]
fn test_env_usize() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("AI_LINTER_TEST_USIZE", Some("123")),
        ("AI_LINTER_TEST_BAD", Some("-1")),
    ]);

    assert_eq!(env_usize("AI_LINTER_TEST_USIZE").unwrap(), Some(123));
    assert_eq!(env_usize("AI_LINTER_NONEXISTENT_VAR").unwrap(), None);
    assert!(env_usize("AI_LINTER_TEST_BAD").is_err());
}
