use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub api_addr: String,
    pub model_path: PathBuf,
    pub encoders_dir: PathBuf,
    pub background_enabled: bool,
    pub background_path: PathBuf,
    pub max_background_bytes: u64,
    pub cors_origins: Vec<String>,
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_addr = lookup("ATTRITION_API_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "127.0.0.1:8501".to_string());

        let model_path = path_or(lookup("ATTRITION_MODEL_PATH"), default_model_path);
        let encoders_dir = path_or(lookup("ATTRITION_ENCODERS_DIR"), default_artifact_dir);
        let background_path = path_or(lookup("ATTRITION_BACKGROUND_PATH"), default_background_path);
        let background_enabled = parse_bool(lookup("ATTRITION_BACKGROUND_ENABLED"), true);
        let max_background_bytes = lookup("ATTRITION_MAX_BACKGROUND_BYTES")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(clamp_background_bytes)
            .unwrap_or(4 * 1024 * 1024);

        let cors_origins = normalize_origins(
            lookup("ATTRITION_CORS_ORIGIN")
                .as_deref()
                .unwrap_or("http://localhost:8501,http://127.0.0.1:8501"),
        );

        CoreConfig {
            api_addr,
            model_path,
            encoders_dir,
            background_enabled,
            background_path,
            max_background_bytes,
            cors_origins,
        }
    }

    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn path_or(value: Option<String>, default: fn() -> PathBuf) -> PathBuf {
    match value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => default(),
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn normalize_origins(value: &str) -> Vec<String> {
    let mut origins = Vec::new();
    for entry in value.split(',') {
        let trimmed = entry.trim().trim_end_matches('/');
        if trimmed.is_empty() || origins.iter().any(|known| known == trimmed) {
            continue;
        }
        origins.push(trimmed.to_string());
    }
    origins
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models")
}

fn default_model_path() -> PathBuf {
    default_artifact_dir().join("decision_tree_attrition.json")
}

fn default_background_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("ibm_logo2.png")
}

fn clamp_background_bytes(value: u64) -> u64 {
    let normalized = if value < 64 * 1024 { 64 * 1024 } else { value };
    normalized.min(32 * 1024 * 1024)
}
