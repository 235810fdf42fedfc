use poem::middleware::Cors;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

/// Initialize CORS middleware for cross-origin requests
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///   (default: "http://localhost:3000,http://localhost:8080")
///
/// Any method and header is allowed, with credentials.
pub fn init_cors(allowed_origins: Option<String>) -> Cors {
    let allowed_origins = allowed_origins.unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());

    Cors::new()
        .allow_origins(parse_origins(&allowed_origins))
        .allow_credentials(true)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_and_trim_origins() {
        let origins = parse_origins(" http://a.test , ,http://b.test");

        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn should_parse_default_origins() {
        assert_eq!(
            parse_origins(DEFAULT_ALLOWED_ORIGINS),
            vec!["http://localhost:3000", "http://localhost:8080"]
        );
    }
}
