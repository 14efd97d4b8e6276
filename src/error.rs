pub type ScrollworkResult<T> = Result<T, ScrollworkError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrollworkError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("routing error: {0}")]
    Routing(String),

    #[error("script error: {0}")]
    Script(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollworkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn routing(msg: impl Into<String>) -> Self {
        Self::Routing(msg.into())
    }

    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ScrollworkError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ScrollworkError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            ScrollworkError::routing("x")
                .to_string()
                .contains("routing error:")
        );
        assert!(
            ScrollworkError::script("x")
                .to_string()
                .contains("script error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ScrollworkError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
