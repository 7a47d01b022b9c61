//! Model inference module.
//!
//! [`InferenceEngine`] is the feed / run / fetch capability, backed here by
//! [`TensorflowEngine`]. [`AddModel`] drives an engine with fixed-shape
//! two-element tensors.

mod engine;
mod model;
mod tensorflow;

pub use engine::{check_dims, InferenceEngine};
pub use model::{
    AddModel, InferenceResult, TensorData, ADD_INPUTS, HEIGHT, INPUT_NAME, MODEL_FILE,
    OUTPUT_NAME, WIDTH,
};
pub use tensorflow::TensorflowEngine;
