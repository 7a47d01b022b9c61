//! tfdemo-rs: run a bundled TensorFlow graph on two fixed inputs.
//!
//! The crate loads a frozen TensorFlow graph from an asset bundle, feeds it
//! the 1x2 tensor `[1.0, 3.0]`, runs it, and returns the 1x2 output. The
//! `click` command does this once and logs each output element.
//!
//! Graphs are executed in process by tract; the [`inference::InferenceEngine`]
//! trait is the seam for other backends.
//!
//! # Example
//!
//! ```ignore
//! use tfdemo_rs::assets::AssetDir;
//! use tfdemo_rs::inference::AddModel;
//!
//! // Load the bundled graph
//! let mut model = AddModel::load(&AssetDir::new("assets"))?;
//!
//! // Feed [1, 3], run, fetch
//! let result = model.compute_add_result()?;
//! println!("{:?}", result); // [2.0, 6.0] for the bundled doubling graph
//! ```
//!
//! # Regenerating the bundled graph
//!
//! ```bash
//! make test-fixtures
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod trigger;

// Re-export commonly used types
pub use assets::{AssetDir, AssetSource};
pub use error::{Result, TfDemoError};
pub use inference::{AddModel, InferenceEngine, InferenceResult, TensorData, TensorflowEngine};
