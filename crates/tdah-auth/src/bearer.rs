use crate::error::AuthError;

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// # Errors
///
/// `Missing` when there is no header or the token part is empty; `Invalid`
/// when another scheme is used.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.map(str::trim).ok_or(AuthError::Missing)?;
    if value.is_empty() {
        return Err(AuthError::Missing);
    }
    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Invalid);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(Some("bearer   xyz ")).unwrap(), "xyz");
    }

    #[test]
    fn absent_or_empty_is_missing() {
        assert!(matches!(bearer_token(None), Err(AuthError::Missing)));
        assert!(matches!(bearer_token(Some("")), Err(AuthError::Missing)));
        assert!(matches!(bearer_token(Some("Bearer")), Err(AuthError::Missing)));
        assert!(matches!(bearer_token(Some("Bearer   ")), Err(AuthError::Missing)));
    }

    #[test]
    fn other_scheme_is_invalid() {
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::Invalid)
        ));
    }
}
