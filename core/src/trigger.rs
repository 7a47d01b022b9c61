//! The click handler.
//!
//! Every click builds a fresh [`AddModel`], so the graph is reloaded each
//! time and nothing carries over between clicks.

use tracing::info;

use crate::assets::AssetSource;
use crate::error::Result;
use crate::inference::{AddModel, InferenceEngine, TensorflowEngine, HEIGHT, MODEL_FILE, WIDTH};

/// Tracing target for click output.
pub const LOG_TAG: &str = "tfdemo";

/// Handle a click with the TensorFlow engine and the bundled graph.
pub fn click<A: AssetSource + ?Sized>(assets: &A) -> Result<[f32; HEIGHT * WIDTH]> {
    click_with::<TensorflowEngine, A>(assets, MODEL_FILE)
}

/// Handle a click with any engine and graph.
pub fn click_with<E: InferenceEngine, A: AssetSource + ?Sized>(
    assets: &A,
    uri: &str,
) -> Result<[f32; HEIGHT * WIDTH]> {
    info!(target: LOG_TAG, "click: ");

    let mut model = AddModel::<E>::load_from(assets, uri)?;
    let result = model.compute_add_result()?;
    for value in &result {
        info!(target: LOG_TAG, "click: {}", value);
    }
    Ok(result)
}
