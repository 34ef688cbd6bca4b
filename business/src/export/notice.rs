use std::fmt;

/// User-visible alert raised by the share fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Native share errored; the text went to the clipboard instead.
    ShareFailedCopied,
    /// There is no native share on this device; the text went to the clipboard.
    ShareUnavailableCopied,
    /// Neither share nor clipboard worked.
    ShareAndCopyFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::ShareFailedCopied => {
                "Sharing failed, so the link was copied to the clipboard instead."
            }
            Self::ShareUnavailableCopied => {
                "Sharing is not available on this device, so the link was copied to the clipboard instead."
            }
            Self::ShareAndCopyFailed => "Sharing and copying to the clipboard both failed.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::ShareAndCopyFailed)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
