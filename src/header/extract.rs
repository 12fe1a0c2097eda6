use super::errors::ExtractError;

/// Supported authorization header schemes.
///
/// A closed enumeration rather than free-form strings, so the parser's
/// contract is exhaustive: both schemes share one extraction algorithm
/// parameterized only by the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Bearer,
    ApiKey,
}

impl Scheme {
    /// Header keyword for this scheme.
    pub fn keyword(&self) -> &'static str {
        match self {
            Scheme::Bearer => "Bearer",
            Scheme::ApiKey => "ApiKey",
        }
    }
}

/// Extract a credential from an authorization header value.
///
/// Trims surrounding whitespace, requires a case-insensitive match of the
/// scheme keyword as a prefix token (the keyword must be followed by
/// whitespace or end-of-string, not merely appear as a substring), strips
/// it, and trims again.
///
/// # Arguments
/// * `header` - Raw header value, or `None` if the header is absent
/// * `scheme` - Expected authorization scheme
///
/// # Returns
/// The credential string with scheme and whitespace removed
///
/// # Errors
/// * `MissingCredential` - Header absent, empty, wrong scheme, or nothing
///   remains after stripping the scheme
pub fn extract(header: Option<&str>, scheme: Scheme) -> Result<String, ExtractError> {
    let value = header.ok_or(ExtractError::MissingCredential)?.trim();
    let keyword = scheme.keyword();

    if value.len() < keyword.len() {
        return Err(ExtractError::MissingCredential);
    }

    // Byte-wise comparison: a match implies the prefix is ASCII, so the
    // slice below lands on a character boundary.
    let (prefix, rest) = value.as_bytes().split_at(keyword.len());
    if !prefix.eq_ignore_ascii_case(keyword.as_bytes()) {
        return Err(ExtractError::MissingCredential);
    }
    if !rest.is_empty() && !rest[0].is_ascii_whitespace() {
        return Err(ExtractError::MissingCredential);
    }

    let credential = value[keyword.len()..].trim();
    if credential.is_empty() {
        return Err(ExtractError::MissingCredential);
    }

    Ok(credential.to_string())
}
