/// Domains whose users may register.
pub const ALLOWED_DOMAINS: &[&str] = &["productdock.com", "codecentric.com"];

/// Returns everything after the last `@`, or the whole input when there is none.
pub fn email_domain(email: &str) -> &str {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain,
        None => email,
    }
}

/// Checks the domain of an already validated address against [`ALLOWED_DOMAINS`].
///
/// The comparison is case-sensitive: `user@CODECENTRIC.COM` is not allowed.
pub fn email_domain_allowed(email: &str) -> bool {
    let domain = email_domain(email);
    ALLOWED_DOMAINS.contains(&domain)
}
