//! The inference engine capability.
//!
//! An engine owns one loaded graph and exposes the feed / run / fetch cycle:
//! bind named inputs, execute the graph for a set of named outputs, then
//! copy those outputs out. [`AddModel`](super::AddModel) only talks to this
//! trait, so any backend that can do the cycle can sit behind it.

use crate::assets::AssetSource;
use crate::error::{Result, TfDemoError};

/// A loaded computation graph that can be fed, run and fetched.
pub trait InferenceEngine: Sized {
    /// Load the graph stored at `uri` in the asset bundle.
    ///
    /// # Errors
    ///
    /// Returns [`TfDemoError::FileNotFound`] when the asset does not exist
    /// and [`TfDemoError::ModelLoad`] when it is not a valid graph.
    fn load<A: AssetSource + ?Sized>(assets: &A, uri: &str) -> Result<Self>;

    /// Bind `data`, laid out with shape `dims`, to the input node `name`.
    fn feed(&mut self, name: &str, data: &[f32], dims: &[usize]) -> Result<()>;

    /// Execute the graph with every fed input, computing `output_names`.
    ///
    /// Inputs fed before the call are consumed by it.
    fn run(&mut self, output_names: &[&str]) -> Result<()>;

    /// Copy the computed output `name` into `out`.
    fn fetch(&mut self, name: &str, out: &mut [f32]) -> Result<()>;

    /// Names of the graph's declared input nodes.
    fn input_names(&self) -> Vec<String>;

    /// Names of the graph's declared output nodes.
    fn output_names(&self) -> Vec<String>;
}

/// Check that `data` holds exactly as many elements as `dims` describes.
pub fn check_dims(name: &str, data: &[f32], dims: &[usize]) -> Result<()> {
    let expected: usize = dims.iter().product();
    if expected != data.len() {
        return Err(TfDemoError::tensor(format!(
            "{}: shape {:?} needs {} elements, got {}",
            name,
            dims,
            expected,
            data.len()
        )));
    }
    Ok(())
}
