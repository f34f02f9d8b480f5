/// Base URL of the relay. Empty means same origin, which is how the backend
/// serves the compiled site; `BACKEND_URL` at build time points elsewhere.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_has_no_trailing_slash() {
        assert!(!get_backend_url().ends_with('/'));
    }
}
