use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid seed '{0}'. Expected comma-separated integers (e.g., '0,1,2').")]
    InvalidSeed(String),

    #[error("The seed list '{0}' contains no seeds.")]
    EmptySeedList(String),

    #[error("The tier list '{0}' names no tiers.")]
    EmptyProfileList(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),
}

/// Parses a comma-separated seed list; blank items are ignored.
pub fn parse_seeds(raw: &str) -> Result<Vec<i64>, ParseError> {
    let seeds = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<i64>()
                .map_err(|_| ParseError::InvalidSeed(item.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if seeds.is_empty() {
        return Err(ParseError::EmptySeedList(raw.to_string()));
    }
    Ok(seeds)
}

/// Parses a comma-separated list of tier names.
pub fn parse_profiles(raw: &str) -> Result<Vec<String>, ParseError> {
    let names: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(ParseError::EmptyProfileList(raw.to_string()));
    }
    Ok(names)
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str), ParseError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidAssignment(raw.to_string())),
    }
}
