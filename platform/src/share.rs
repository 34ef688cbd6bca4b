//! Native share surface probing.
//!
//! Desktop platforms expose no share sheet to this app, and the browser's
//! Web Share API hands back non-`Send` promises that cannot satisfy the
//! [`Sharer`] contract. Both therefore report share as unavailable, which
//! sends every share through the clipboard fallback.

use qrgen_business::{ShareError, SharePayload, Sharer};

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSharer;

impl Sharer for UnsupportedSharer {
    fn is_available(&self) -> bool {
        false
    }

    fn can_share(&self, _payload: &SharePayload) -> bool {
        false
    }

    async fn share(&self, _payload: SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Failed("native share is not supported".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_sharer_reports_unavailable() {
        let sharer = UnsupportedSharer;
        let payload = SharePayload {
            title: "QR Code".to_owned(),
            text: "https://a.b".to_owned(),
            url: Some("https://a.b".to_owned()),
            files: Vec::new(),
        };

        assert!(!sharer.is_available());
        assert!(!sharer.can_share(&payload));
        assert!(matches!(
            sharer.share(payload).await,
            Err(ShareError::Failed(_))
        ));
    }
}
