use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB v3 API key (search, top rated, posters)
    pub tmdb_api_key: String,

    /// KOBIS open API key (daily box office)
    pub kobis_api_key: String,

    /// OpenAI API key for keyword and description generation
    pub openai_api_key: String,

    /// Hugging Face inference token, sent as a bearer token when present
    #[serde(default)]
    pub huggingface_api_token: Option<String>,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base prepended to TMDB `poster_path` values
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    #[serde(default = "default_tmdb_web_url")]
    pub tmdb_web_url: String,

    #[serde(default = "default_kobis_api_url")]
    pub kobis_api_url: String,

    #[serde(default = "default_imdb_base_url")]
    pub imdb_base_url: String,

    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    #[serde(default = "default_huggingface_api_url")]
    pub huggingface_api_url: String,

    #[serde(default = "default_translate_api_url")]
    pub translate_api_url: String,

    /// Retry attempts for transient upstream failures
    #[serde(default = "default_http_retries")]
    pub http_retries: u32,

    /// Exponential backoff seed in seconds
    #[serde(default = "default_http_backoff_factor")]
    pub http_backoff_factor: f64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_web_url() -> String {
    "https://www.themoviedb.org".to_string()
}

fn default_kobis_api_url() -> String {
    "http://www.kobis.or.kr/kobisopenapi/webservice/rest".to_string()
}

fn default_imdb_base_url() -> String {
    "https://www.imdb.com".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_huggingface_api_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_translate_api_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_http_retries() -> u32 {
    3
}

fn default_http_backoff_factor() -> f64 {
    0.3
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables; `.env` is read by `main`
    pub fn from_env() -> anyhow::Result<Self> {
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "a".to_string()),
            ("KOBIS_API_KEY".to_string(), "b".to_string()),
            ("OPENAI_API_KEY".to_string(), "c".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.http_retries, 3);
        assert!((config.http_backoff_factor - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert!(config.huggingface_api_token.is_none());
    }

    #[test]
    fn test_upstream_urls_and_retries_from_env() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "a".to_string()),
            ("KOBIS_API_KEY".to_string(), "b".to_string()),
            ("OPENAI_API_KEY".to_string(), "c".to_string()),
            ("IMDB_BASE_URL".to_string(), "http://127.0.0.1:4010".to_string()),
            ("HTTP_RETRIES".to_string(), "0".to_string()),
            ("HTTP_BACKOFF_FACTOR".to_string(), "0".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.imdb_base_url, "http://127.0.0.1:4010");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.http_retries, 0);
        assert_eq!(config.http_backoff_factor, 0.0);
    }

    #[test]
    fn test_missing_required_key_fails() {
        let vars = vec![("TMDB_API_KEY".to_string(), "a".to_string())];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
