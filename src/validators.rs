//! Format validation for gateway API keys.
//!
//! Keys issued by the gateway follow a fixed shape: an environment marker
//! (`s` for sandbox, `p` for production), a kind infix (`priv` or `pub`),
//! and an alphanumeric body, joined by hyphens — e.g.
//! `s-priv-2a10IfKd7vN9eGh4`.

/// Kind of an API key, derived from its infix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// A private (secret) key, infix `priv`.
    Private,
    /// A public (publishable) key, infix `pub`.
    Public,
}

/// Environment a key belongs to, derived from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEnvironment {
    /// Sandbox/test keys, prefix `s`.
    Sandbox,
    /// Production keys, prefix `p`.
    Production,
}

fn split_key(key: &str) -> Option<(KeyEnvironment, KeyKind, &str)> {
    let mut parts = key.splitn(3, '-');
    let env = match parts.next()? {
        "s" => KeyEnvironment::Sandbox,
        "p" => KeyEnvironment::Production,
        _ => return None,
    };
    let kind = match parts.next()? {
        "priv" => KeyKind::Private,
        "pub" => KeyKind::Public,
        _ => return None,
    };
    let body = parts.next()?;
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((env, kind, body))
}

/// Returns true if `key` is a well-formed private key.
#[must_use]
pub fn is_valid_private_key(key: &str) -> bool {
    matches!(split_key(key), Some((_, KeyKind::Private, _)))
}

/// Returns true if `key` is a well-formed public key.
#[must_use]
pub fn is_valid_public_key(key: &str) -> bool {
    matches!(split_key(key), Some((_, KeyKind::Public, _)))
}

/// Returns the environment a well-formed key belongs to.
#[must_use]
pub fn key_environment(key: &str) -> Option<KeyEnvironment> {
    split_key(key).map(|(env, _, _)| env)
}
