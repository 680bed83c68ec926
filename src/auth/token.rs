use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

pub const TOKEN_LEN: usize = 60;

/// Generates an opaque bearer token: 60 alphanumeric characters from
/// the OS CSPRNG. Purely a lookup key, no structure and no expiry;
/// a token stays valid until the user's row is rotated past it.
pub fn generate_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_60_alphanumeric_chars() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_are_not_reused() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }
}
