use crate::ConfigError;
use std::path::Path;

/// Loads a newline-separated domain list from a file
///
/// Blank lines and surrounding whitespace are ignored. An empty list is a
/// configuration error: a crawl run needs at least one domain.
pub fn load_domains(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let domains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if domains.is_empty() {
        return Err(ConfigError::EmptyDomainList);
    }

    Ok(domains)
}
