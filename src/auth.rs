pub struct Token(String);

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.trim().to_owned())
    }
}

impl Token {
    /// Reads a token supplied on the command line or through `GITHUB_TOKEN`.
    /// Blank values count as missing.
    pub fn from_optional(value: Option<&str>) -> Option<Self> {
        value
            .map(Self::from)
            .filter(|token| !token.as_str().is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<redacted>")
    }
}
