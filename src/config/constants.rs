pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const DEFAULT_OUTPUT_PATH: &str = "ai-linter-report.md";
pub const CONFIG_DIR_NAME: &str = ".ai-linter";
pub const CONFIG_FILE_NAME: &str = "config";
pub const CONFIG_PATH_ENV: &str = "AI_LINTER_CONFIG";
