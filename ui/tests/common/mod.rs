use egui_kittest::Harness;
use qrgen_business::AppConfig;
use qrgen_platform::DirectorySaver;
use qrgen_ui::QrGenApp;
use qrgen_ui::export::UiSaver;
use qrgen_ui::state::State;

/// Frames to run after an input so its effects show up.
pub const UI_PROPAGATION_FRAMES: usize = 3;

/// Harness plus a scratch directory that downloads land in.
pub struct TestCtx<'a, T = State> {
    dir: tempfile::TempDir,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn download_dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn settle(&mut self) {
        for _ in 0..UI_PROPAGATION_FRAMES {
            self.harness.step();
        }
    }
}

impl<'a> TestCtx<'a, QrGenApp> {
    pub fn new_app() -> Self {
        Self::new_app_with_config(AppConfig::default())
    }

    pub fn new_app_with_config(config: AppConfig) -> Self {
        let (dir, state) = setup_test_state(config);
        let app = QrGenApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self { dir, harness }
    }

    /// Fills in the form directly and presses the generate button.
    #[allow(unused)]
    pub fn generate(&mut self, url: &str, title: &str) {
        use kittest::Queryable as _;

        let form = self.harness.state_mut().state_mut().generator.form_mut();
        form.set_url(url);
        form.set_title(title);
        self.harness.step();

        self.harness.get_by_label("Generate QR Code").click();
        self.settle();
    }

    /// Clicks a button and gives spawned export tasks a chance to finish.
    #[allow(unused)]
    pub async fn click_and_wait(&mut self, label: &str) {
        use kittest::Queryable as _;

        self.harness.get_by_label(label).click();
        self.harness.step();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        self.settle();
    }
}

fn setup_test_state(config: AppConfig) -> (tempfile::TempDir, State) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let saver = UiSaver::new(DirectorySaver::new(dir.path()));
    (dir, State::with_saver(config, saver))
}
