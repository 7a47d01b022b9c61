//! The two-input inference wrapper.
//!
//! [`AddModel`] feeds a fixed 1x2 float tensor into a graph's `input` node,
//! runs it, and reads back the 1x2 tensor at its `output` node.

use ndarray::{Array2, ArrayD};
use std::time::Instant;
use tracing::{debug, info_span};

use super::engine::InferenceEngine;
use super::tensorflow::TensorflowEngine;
use crate::assets::AssetSource;
use crate::error::{Result, TfDemoError};

/// Asset URI of the bundled graph.
pub const MODEL_FILE: &str = "file:///android_asset/doubler.pb";

/// Rows in the input and output tensors.
pub const HEIGHT: usize = 1;
/// Columns in the input and output tensors.
pub const WIDTH: usize = 2;

/// Name of the graph's input node.
pub const INPUT_NAME: &str = "input";
/// Name of the graph's output node.
pub const OUTPUT_NAME: &str = "output";

/// Values fed by [`AddModel::compute_add_result`].
pub const ADD_INPUTS: [f32; HEIGHT * WIDTH] = [1.0, 3.0];

/// Tensor data extracted from inference results.
#[derive(Debug, Clone)]
pub struct TensorData {
    /// The tensor data as a dynamic-dimensional array.
    pub data: ArrayD<f32>,
}

impl TensorData {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the tensor is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in row-major order.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}

/// Result of one timed inference.
#[derive(Debug)]
pub struct InferenceResult {
    /// The `output` tensor, shaped `[HEIGHT, WIDTH]`.
    pub output: TensorData,
    /// Wall-clock time for feed, run and fetch, in milliseconds.
    pub latency_ms: f64,
}

/// A loaded graph that maps two floats to two floats.
///
/// The engine is owned for the wrapper's whole lifetime and released when
/// the wrapper is dropped, whether construction finished or inference
/// failed part way.
///
/// # Example
///
/// ```ignore
/// use tfdemo_rs::assets::AssetDir;
/// use tfdemo_rs::inference::AddModel;
///
/// let mut model = AddModel::load(&AssetDir::new("assets"))?;
/// let result = model.compute_add_result()?;
/// assert_eq!(result, [2.0, 6.0]);
/// ```
pub struct AddModel<E = TensorflowEngine> {
    engine: E,
}

impl<E: InferenceEngine> AddModel<E> {
    /// Load the bundled graph at [`MODEL_FILE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is missing or is not a valid graph.
    pub fn load<A: AssetSource + ?Sized>(assets: &A) -> Result<Self> {
        Self::load_from(assets, MODEL_FILE)
    }

    /// Load a graph from an arbitrary asset URI.
    pub fn load_from<A: AssetSource + ?Sized>(assets: &A, uri: &str) -> Result<Self> {
        let engine = E::load(assets, uri)?;
        debug!(uri, "inference wrapper ready");
        Ok(Self::with_engine(engine))
    }

    /// Wrap an already loaded engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Borrow the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run the graph on [`ADD_INPUTS`].
    ///
    /// # Errors
    ///
    /// Returns an error if the graph rejects the feed, fails to run, or
    /// produces an output of the wrong size.
    pub fn compute_add_result(&mut self) -> Result<[f32; HEIGHT * WIDTH]> {
        self.compute(ADD_INPUTS)
    }

    /// Run the graph on `inputs`.
    pub fn compute(&mut self, inputs: [f32; HEIGHT * WIDTH]) -> Result<[f32; HEIGHT * WIDTH]> {
        let mut outputs = [0.0f32; HEIGHT * WIDTH];

        info_span!("feed")
            .in_scope(|| self.engine.feed(INPUT_NAME, &inputs, &[HEIGHT, WIDTH]))?;
        info_span!("run").in_scope(|| self.engine.run(&[OUTPUT_NAME]))?;
        info_span!("fetch").in_scope(|| self.engine.fetch(OUTPUT_NAME, &mut outputs))?;

        Ok(outputs)
    }

    /// Run the graph on `inputs` and report the output with timing.
    pub fn infer(&mut self, inputs: [f32; HEIGHT * WIDTH]) -> Result<InferenceResult> {
        let start = Instant::now();
        let values = self.compute(inputs)?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let data = Array2::from_shape_vec((HEIGHT, WIDTH), values.to_vec())
            .map_err(|e| TfDemoError::tensor(format!("Array shape error: {}", e)))?
            .into_dyn();

        Ok(InferenceResult {
            output: TensorData { data },
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetDir;

    /// Engine that applies `y = 2x + offset` and records what it saw.
    struct Affine {
        offset: f32,
        fed: Option<(String, Vec<f32>, Vec<usize>)>,
        computed: Option<Vec<f32>>,
        runs: usize,
    }

    impl Affine {
        fn new(offset: f32) -> Self {
            Self {
                offset,
                fed: None,
                computed: None,
                runs: 0,
            }
        }
    }

    impl InferenceEngine for Affine {
        fn load<A: AssetSource + ?Sized>(assets: &A, uri: &str) -> Result<Self> {
            let path = assets.resolve(uri)?;
            if path.file_name().and_then(|n| n.to_str()) == Some("missing.pb") {
                return Err(TfDemoError::FileNotFound(path));
            }
            Ok(Self::new(0.0))
        }

        fn feed(&mut self, name: &str, data: &[f32], dims: &[usize]) -> Result<()> {
            self.fed = Some((name.to_string(), data.to_vec(), dims.to_vec()));
            Ok(())
        }

        fn run(&mut self, output_names: &[&str]) -> Result<()> {
            if output_names != [OUTPUT_NAME] {
                return Err(TfDemoError::inference("unknown output"));
            }
            let (name, data, _) = self
                .fed
                .take()
                .ok_or_else(|| TfDemoError::inference("nothing fed"))?;
            if name != INPUT_NAME {
                return Err(TfDemoError::inference(format!("unknown input {}", name)));
            }
            self.computed = Some(data.iter().map(|x| 2.0 * x + self.offset).collect());
            self.runs += 1;
            Ok(())
        }

        fn fetch(&mut self, _name: &str, out: &mut [f32]) -> Result<()> {
            let computed = self
                .computed
                .as_ref()
                .ok_or_else(|| TfDemoError::tensor("not computed"))?;
            if computed.len() != out.len() {
                return Err(TfDemoError::tensor("length mismatch"));
            }
            out.copy_from_slice(computed);
            Ok(())
        }

        fn input_names(&self) -> Vec<String> {
            vec![INPUT_NAME.to_string()]
        }

        fn output_names(&self) -> Vec<String> {
            vec![OUTPUT_NAME.to_string()]
        }
    }

    #[test]
    fn feeds_fixed_inputs_with_fixed_shape() {
        let mut model = AddModel::with_engine(Affine::new(0.5));
        let out = model.compute_add_result().unwrap();
        assert_eq!(out, [2.5, 6.5]);
        assert_eq!(model.engine().runs, 1);
    }

    #[test]
    fn each_call_runs_the_engine_again() {
        let mut model = AddModel::with_engine(Affine::new(0.0));
        let first = model.compute_add_result().unwrap();
        let second = model.compute_add_result().unwrap();
        assert_eq!(first, second);
        assert_eq!(model.engine().runs, 2);
    }

    #[test]
    fn infer_reports_one_by_two_tensor() {
        let mut model = AddModel::with_engine(Affine::new(0.0));
        let result = model.infer([4.0, -1.0]).unwrap();
        assert_eq!(result.output.shape(), &[HEIGHT, WIDTH]);
        assert_eq!(result.output.to_vec(), vec![8.0, -2.0]);
        assert!(result.latency_ms >= 0.0);
    }

    #[test]
    fn load_errors_propagate() {
        let assets = AssetDir::new("/bundle");
        let err = match AddModel::<Affine>::load_from(&assets, "missing.pb") {
            Ok(_) => panic!("missing asset loaded"),
            Err(e) => e,
        };
        assert!(err.is_load_failure());

        assert!(AddModel::<Affine>::load(&assets).is_ok());
    }
}
