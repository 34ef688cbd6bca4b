//! Branch coverage for the export pipeline against in-memory capabilities.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::TimeDelta;
use tokio::sync::Notify;

use super::*;
use crate::capability::{SaveError, ShareError, SharePayload, Sharer};
use crate::clock::ManualClock;
use crate::payload::GeneratePayload;
use crate::render::{QrRenderer, RenderOptions, RenderedSurface, Renderer as _};
use crate::test_utils::{MockClipboard, MockSaver, MockSharer, RecordingNotifier};

type MockPipeline<S = MockSharer> =
    ExportPipeline<MockClipboard, S, MockSaver, RecordingNotifier, ManualClock>;

struct Fixture<S = MockSharer> {
    clipboard: MockClipboard,
    sharer: S,
    saver: MockSaver,
    notifier: RecordingNotifier,
    clock: ManualClock,
}

impl<S: Sharer + Clone> Fixture<S> {
    fn new(clipboard: MockClipboard, sharer: S) -> Self {
        Self {
            clipboard,
            sharer,
            saver: MockSaver::ok(),
            notifier: RecordingNotifier::default(),
            clock: ManualClock::default(),
        }
    }

    fn pipeline(&self, url: &str, title: &str) -> MockPipeline<S> {
        let payload = GeneratePayload::new(url, title).expect("valid payload");
        let surface = QrRenderer
            .render(payload.url(), &RenderOptions::default())
            .expect("render should succeed");
        self.pipeline_with_surface(payload, surface)
    }

    fn pipeline_with_surface(
        &self,
        payload: GeneratePayload,
        surface: RenderedSurface,
    ) -> MockPipeline<S> {
        ExportPipeline::with_clock(
            payload,
            Arc::new(surface),
            Capabilities {
                clipboard: self.clipboard.clone(),
                sharer: self.sharer.clone(),
                saver: self.saver.clone(),
                notifier: self.notifier.clone(),
            },
            self.clock.clone(),
        )
    }
}

fn fixture(sharer: MockSharer) -> Fixture {
    Fixture::new(MockClipboard::ok(), sharer)
}

/// A surface whose RGBA buffer is valid but that `image` refuses to encode.
fn unencodable_surface() -> RenderedSurface {
    RenderedSurface::from_rgba(0, 0, Vec::new()).expect("empty buffer matches 0x0")
}

mod download {
    use super::*;

    #[test]
    fn saves_png_under_fixed_filename() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx.pipeline("https://x", "T");

        assert_eq!(pipeline.download(), DownloadOutcome::Saved);

        let saved = fx.saver.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "qrcode.png");
        assert!(saved[0].1.starts_with(&[0x89, b'P', b'N', b'G']), "not a PNG");
        assert!(fx.clipboard.writes().is_empty(), "download must not copy");
        assert!(fx.notifier.notices().is_empty(), "download never alerts");
    }

    #[test]
    fn honours_configured_filename() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx.pipeline("https://x", "").filename("code.png");
        pipeline.download();
        assert_eq!(fx.saver.saved()[0].0, "code.png");
    }

    #[test]
    fn unserializable_surface_is_a_silent_no_op() {
        let fx = fixture(MockSharer::ok());
        let payload = GeneratePayload::new("https://x", "").expect("valid payload");
        let pipeline = fx.pipeline_with_surface(payload, unencodable_surface());

        assert_eq!(pipeline.download(), DownloadOutcome::SerializationUnavailable);
        assert!(fx.saver.saved().is_empty());
        assert!(fx.notifier.notices().is_empty());
    }

    #[test]
    fn saver_errors_are_reported_not_alerted() {
        let mut fx = fixture(MockSharer::ok());
        fx.saver = MockSaver::failing(SaveError::Cancelled);
        assert_eq!(
            fx.pipeline("https://x", "").download(),
            DownloadOutcome::Cancelled
        );

        fx.saver = MockSaver::failing(SaveError::Io {
            filename: "qrcode.png".to_owned(),
            reason: "disk full".to_owned(),
        });
        assert_eq!(
            fx.pipeline("https://x", "").download(),
            DownloadOutcome::SaveFailed
        );
        assert!(fx.notifier.notices().is_empty());
    }
}

mod copy {
    use super::*;

    #[tokio::test]
    async fn writes_title_and_url() {
        let fx = fixture(MockSharer::ok());
        assert!(fx.pipeline("https://x", "T").copy_to_clipboard().await);
        assert_eq!(fx.clipboard.writes(), vec!["T\nhttps://x".to_owned()]);
    }

    #[tokio::test]
    async fn writes_bare_url_without_title() {
        let fx = fixture(MockSharer::ok());
        assert!(fx.pipeline("https://x", "").copy_to_clipboard().await);
        assert_eq!(fx.clipboard.writes(), vec!["https://x".to_owned()]);
    }

    #[tokio::test]
    async fn success_flag_reverts_after_two_seconds() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx.pipeline("https://x", "");

        assert!(!pipeline.copy_success());
        assert!(pipeline.copy_to_clipboard().await);
        assert!(pipeline.copy_success(), "flag must be set immediately");

        fx.clock.advance_ms(1999);
        assert!(pipeline.copy_success());

        fx.clock.advance_ms(1);
        assert!(!pipeline.copy_success(), "flag must clear by 2000ms");
        assert!(pipeline.copy_feedback_left().is_none());
    }

    #[tokio::test]
    async fn second_copy_extends_window() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx.pipeline("https://x", "");

        pipeline.copy_to_clipboard().await;
        fx.clock.advance_ms(1500);
        pipeline.copy_to_clipboard().await;
        fx.clock.advance_ms(1500);
        assert!(pipeline.copy_success(), "window restarts on the last copy");

        fx.clock.advance_ms(500);
        assert!(!pipeline.copy_success());
    }

    #[tokio::test]
    async fn configured_window_is_used() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx
            .pipeline("https://x", "")
            .copy_feedback(TimeDelta::milliseconds(100));
        pipeline.copy_to_clipboard().await;
        fx.clock.advance_ms(100);
        assert!(!pipeline.copy_success());
    }

    #[tokio::test]
    async fn failure_leaves_flag_unchanged() {
        let fx = Fixture::new(MockClipboard::failing(), MockSharer::ok());
        let pipeline = fx.pipeline("https://x", "T");

        assert!(!pipeline.copy_to_clipboard().await);
        assert!(!pipeline.copy_success());
        assert_eq!(fx.clipboard.writes().len(), 1);
    }
}

mod share {
    use super::*;

    #[tokio::test]
    async fn shares_png_when_files_are_accepted() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx.pipeline("https://x", "T");

        assert_eq!(pipeline.share().await, ShareOutcome::Shared);

        let shared = fx.sharer.shared();
        assert_eq!(shared.len(), 1);
        let payload = &shared[0];
        assert_eq!(payload.title, "T");
        assert_eq!(payload.text, "T\nhttps://x");
        assert_eq!(payload.url, None);
        assert_eq!(payload.files.len(), 1);
        assert_eq!(payload.files[0].name, "qrcode.png");
        assert_eq!(payload.files[0].mime_type, "image/png");

        assert!(fx.clipboard.writes().is_empty());
        assert!(fx.notifier.notices().is_empty());
        assert!(!pipeline.is_sharing());
    }

    #[tokio::test]
    async fn falls_back_to_text_share_without_file_support() {
        let fx = fixture(MockSharer::ok().text_only());
        let pipeline = fx.pipeline("https://x", "");

        assert_eq!(pipeline.share().await, ShareOutcome::Shared);

        let shared = fx.sharer.shared();
        assert_eq!(
            shared,
            vec![SharePayload {
                title: "QR Code".to_owned(),
                text: "https://x".to_owned(),
                url: Some("https://x".to_owned()),
                files: Vec::new(),
            }]
        );
    }

    #[tokio::test]
    async fn unavailable_share_copies_and_alerts() {
        let fx = fixture(MockSharer::unavailable());
        let pipeline = fx.pipeline("https://a.b", "");

        assert_eq!(
            pipeline.share().await,
            ShareOutcome::CopiedInstead(FallbackReason::ShareUnavailable)
        );
        assert_eq!(fx.clipboard.writes(), vec!["https://a.b".to_owned()]);
        assert_eq!(fx.notifier.notices(), vec![Notice::ShareUnavailableCopied]);
        assert!(fx.sharer.shared().is_empty());
        assert!(!pipeline.is_sharing());
        assert!(pipeline.copy_success());
    }

    #[tokio::test]
    async fn share_error_copies_with_distinct_notice() {
        let fx = fixture(MockSharer::failing("NotAllowedError"));
        let pipeline = fx.pipeline("https://a.b", "T");

        assert_eq!(
            pipeline.share().await,
            ShareOutcome::CopiedInstead(FallbackReason::ShareFailed)
        );
        assert_eq!(fx.clipboard.writes(), vec!["T\nhttps://a.b".to_owned()]);
        assert_eq!(fx.notifier.notices(), vec![Notice::ShareFailedCopied]);
        assert_ne!(
            Notice::ShareFailedCopied.message(),
            Notice::ShareUnavailableCopied.message()
        );
        assert!(!pipeline.is_sharing());
    }

    #[tokio::test]
    async fn share_and_copy_failure_is_surfaced() {
        let fx = Fixture::new(MockClipboard::failing(), MockSharer::failing("boom"));
        let pipeline = fx.pipeline("https://a.b", "");

        assert_eq!(pipeline.share().await, ShareOutcome::Failed);
        assert_eq!(fx.clipboard.writes().len(), 1);
        assert_eq!(fx.notifier.notices(), vec![Notice::ShareAndCopyFailed]);
        assert!(Notice::ShareAndCopyFailed.is_error());
        assert!(!pipeline.is_sharing());
    }

    #[tokio::test]
    async fn unavailable_share_and_copy_failure_is_surfaced() {
        let fx = Fixture::new(MockClipboard::failing(), MockSharer::unavailable());
        let pipeline = fx.pipeline("https://a.b", "");

        assert_eq!(pipeline.share().await, ShareOutcome::Failed);
        assert_eq!(fx.notifier.notices(), vec![Notice::ShareAndCopyFailed]);
    }

    #[tokio::test]
    async fn abort_is_silent() {
        let fx = fixture(MockSharer::aborting());
        let pipeline = fx.pipeline("https://a.b", "T");

        assert_eq!(pipeline.share().await, ShareOutcome::Cancelled);
        assert!(fx.clipboard.writes().is_empty(), "abort must not fall back");
        assert!(fx.notifier.notices().is_empty(), "abort must not alert");
        assert_eq!(pipeline.share_state(), ShareState::default());
    }

    #[tokio::test]
    async fn serialization_failure_falls_back_like_share_error() {
        let fx = fixture(MockSharer::ok());
        let payload = GeneratePayload::new("https://a.b", "").expect("valid payload");
        let pipeline = fx.pipeline_with_surface(payload, unencodable_surface());

        assert_eq!(
            pipeline.share().await,
            ShareOutcome::CopiedInstead(FallbackReason::ShareFailed)
        );
        assert!(fx.sharer.shared().is_empty(), "share must not be invoked");
        assert_eq!(fx.notifier.notices(), vec![Notice::ShareFailedCopied]);
    }

    #[tokio::test]
    async fn pipeline_can_share_again_after_settling() {
        let fx = fixture(MockSharer::ok());
        let pipeline = fx.pipeline("https://a.b", "");
        assert_eq!(pipeline.share().await, ShareOutcome::Shared);
        assert_eq!(pipeline.share().await, ShareOutcome::Shared);
        assert_eq!(fx.sharer.shared().len(), 2);
    }
}

mod single_flight {
    use super::*;

    /// Sharer whose `share` blocks until the test releases it.
    #[derive(Clone, Default)]
    struct GatedSharer {
        entered: Arc<Notify>,
        release: Arc<Notify>,
        calls: Arc<AtomicUsize>,
    }

    impl Sharer for GatedSharer {
        fn is_available(&self) -> bool {
            true
        }

        fn can_share(&self, _payload: &SharePayload) -> bool {
            true
        }

        async fn share(&self, _payload: SharePayload) -> Result<(), ShareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn second_share_is_rejected_while_first_is_pending() {
        let sharer = GatedSharer::default();
        let fx = Fixture::new(MockClipboard::ok(), sharer.clone());
        let pipeline = fx.pipeline("https://a.b", "");

        let first = pipeline.share();
        let second = async {
            sharer.entered.notified().await;
            assert!(pipeline.is_sharing());
            let outcome = pipeline.share().await;
            sharer.release.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, ShareOutcome::Shared);
        assert_eq!(second, ShareOutcome::Busy);
        assert_eq!(sharer.calls.load(Ordering::SeqCst), 1);
        assert!(fx.clipboard.writes().is_empty());
        assert!(!pipeline.is_sharing());
    }

    #[tokio::test]
    async fn copy_runs_during_a_pending_share() {
        let sharer = GatedSharer::default();
        let fx = Fixture::new(MockClipboard::ok(), sharer.clone());
        let pipeline = fx.pipeline("https://a.b", "T");

        let first = pipeline.share();
        let copy = async {
            sharer.entered.notified().await;
            let copied = pipeline.copy_to_clipboard().await;
            sharer.release.notify_one();
            copied
        };

        let (shared, copied) = tokio::join!(first, copy);
        assert_eq!(shared, ShareOutcome::Shared);
        assert!(copied);
        assert_eq!(fx.clipboard.writes(), vec!["T\nhttps://a.b".to_owned()]);
    }

    #[tokio::test]
    async fn dropping_share_future_releases_flag() {
        let sharer = GatedSharer::default();
        let fx = Fixture::new(MockClipboard::ok(), sharer.clone());
        let pipeline = fx.pipeline("https://a.b", "");

        {
            let pending = pipeline.share();
            tokio::pin!(pending);
            tokio::select! {
                _ = &mut pending => panic!("share should still be pending"),
                () = sharer.entered.notified() => {}
            }
            assert!(pipeline.is_sharing());
        }

        assert!(!pipeline.is_sharing(), "drop must reset the sharing flag");
    }
}
