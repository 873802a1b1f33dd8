use crate::tokenize::Whitespace;

/// Nesting limit used by [`ParseOptions::strict`].
pub const STRICT_MAX_DEPTH: usize = 128;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Which bytes the tokenizer skips between tokens
    pub whitespace: Whitespace,

    /// Maximum array/object nesting, `None` for unbounded
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Basic whitespace and a bounded nesting depth.
    pub const fn strict() -> Self {
        Self {
            whitespace: Whitespace::Basic,
            max_depth: Some(STRICT_MAX_DEPTH),
        }
    }

    /// Any ASCII whitespace, no nesting limit. Deep enough input can
    /// exhaust the stack.
    pub const fn lenient() -> Self {
        Self {
            whitespace: Whitespace::Ascii,
            max_depth: None,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.whitespace, Whitespace::Basic);
        assert_eq!(options.max_depth, Some(STRICT_MAX_DEPTH));
        assert_eq!(options, ParseOptions::strict());
    }

    #[test]
    fn test_presets() {
        assert_eq!(ParseOptions::strict().max_depth, Some(STRICT_MAX_DEPTH));
        assert_eq!(ParseOptions::lenient().whitespace, Whitespace::Ascii);
        assert_eq!(ParseOptions::lenient().max_depth, None);
    }
}
