use std::path::PathBuf;

use crate::{
    backend::ModelArtifact,
    command::DEFAULT_MODEL_PATH,
    tui::{ScreenStack, Tui},
    view::screens::FormScreen,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FormArg {
    /// Path to the charge model file (JSON format), read on every prediction
    #[clap(long = "model", default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,
}

impl Default for FormArg {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

pub(crate) fn run(arg: &FormArg) -> anyhow::Result<()> {
    let FormArg { model_path } = arg;
    tracing::info!(model = %model_path.display(), "starting form session");

    let screen = FormScreen::new(ModelArtifact::new(model_path));
    let mut app = ScreenStack::new(Box::new(screen));
    Tui::new().run(&mut app)?;
    Ok(())
}
