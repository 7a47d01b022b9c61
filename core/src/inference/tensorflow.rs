//! In-process execution of frozen TensorFlow graphs.
//!
//! Graphs are parsed from `GraphDef` protobufs with tract. Parsing happens
//! once, at load time; a run plan is built on every `run` from the names
//! and shapes of whatever was fed.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;
use tract_tensorflow::prelude::*;
use tract_tensorflow::tract_core::framework::Framework;
use tract_tensorflow::tract_hir::infer::Factoid;
use tract_tensorflow::Tensorflow;

use super::engine::{check_dims, InferenceEngine};
use crate::assets::AssetSource;
use crate::error::{Result, TfDemoError};

/// Process-wide TensorFlow op registry, built on first use.
fn framework() -> &'static Tensorflow {
    static FRAMEWORK: OnceLock<Tensorflow> = OnceLock::new();
    FRAMEWORK.get_or_init(|| {
        debug!("initializing tensorflow op registry");
        tensorflow()
    })
}

/// A frozen TensorFlow graph with pending inputs and computed outputs.
pub struct TensorflowEngine {
    uri: String,
    graph: InferenceModel,
    fed: Vec<(String, Tensor)>,
    fetched: HashMap<String, Tensor>,
}

impl TensorflowEngine {
    /// Parse a serialized `GraphDef`.
    pub fn from_bytes(uri: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let uri = uri.into();
        let graph = framework()
            .model_for_read(&mut &bytes[..])
            .map_err(|e| TfDemoError::model_load(format!("{}: {:#}", uri, e)))?;
        debug!(%uri, nodes = graph.nodes().len(), "graph loaded");

        Ok(Self {
            uri,
            graph,
            fed: Vec::new(),
            fetched: HashMap::new(),
        })
    }

    /// The asset URI this graph was loaded from.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn node_names(&self, outlets: &[OutletId]) -> Vec<String> {
        outlets
            .iter()
            .map(|o| self.graph.node(o.node).name.clone())
            .collect()
    }

    fn execute(&self, output_names: &[&str]) -> TractResult<TVec<TValue>> {
        let mut model = self.graph.clone();

        // Fed shapes must agree with what each input node declares.
        let mut facts = Vec::with_capacity(self.fed.len());
        for (name, tensor) in &self.fed {
            let node = self.graph.node_id_by_name(name)?;
            let declared = self.graph.outlet_fact(OutletId::new(node, 0))?;
            let fed = InferenceFact::dt_shape(f32::datum_type(), tensor.shape().to_vec());
            let fact = declared.unify(&fed).map_err(|e| {
                e.context(format!(
                    "{}: fed shape {:?} does not match declared {:?}",
                    name,
                    tensor.shape(),
                    declared
                ))
            })?;
            facts.push(fact);
        }

        let input_names: Vec<&str> = self.fed.iter().map(|(name, _)| name.as_str()).collect();
        model.set_input_names(&input_names)?;
        for (ix, fact) in facts.into_iter().enumerate() {
            model.set_input_fact(ix, fact)?;
        }
        model.set_output_names(output_names)?;

        let plan = model.into_optimized()?.into_runnable()?;
        let inputs: TVec<TValue> = self.fed.iter().map(|(_, t)| t.clone().into()).collect();
        plan.run(inputs)
    }
}

/// Requested outputs must be non-empty and distinct.
fn check_output_names(output_names: &[&str]) -> Result<()> {
    if output_names.is_empty() {
        return Err(TfDemoError::inference("no outputs requested"));
    }
    for (ix, name) in output_names.iter().enumerate() {
        if output_names[..ix].contains(name) {
            return Err(TfDemoError::inference(format!(
                "output {} requested more than once",
                name
            )));
        }
    }
    Ok(())
}

impl InferenceEngine for TensorflowEngine {
    fn load<A: AssetSource + ?Sized>(assets: &A, uri: &str) -> Result<Self> {
        let bytes = assets.open(uri)?;
        Self::from_bytes(uri, &bytes)
    }

    fn feed(&mut self, name: &str, data: &[f32], dims: &[usize]) -> Result<()> {
        check_dims(name, data, dims)?;
        let tensor = Tensor::from_shape(dims, data)
            .map_err(|e| TfDemoError::tensor(format!("{}: {:#}", name, e)))?;

        match self.fed.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = tensor,
            None => self.fed.push((name.to_string(), tensor)),
        }
        Ok(())
    }

    fn run(&mut self, output_names: &[&str]) -> Result<()> {
        self.fetched.clear();
        let result = check_output_names(output_names).and_then(|_| {
            self.execute(output_names)
                .map_err(|e| TfDemoError::inference(format!("{:#}", e)))
        });
        self.fed.clear();
        let outputs = result?;

        for (name, value) in output_names.iter().zip(outputs) {
            self.fetched.insert(name.to_string(), value.into_tensor());
        }
        Ok(())
    }

    fn fetch(&mut self, name: &str, out: &mut [f32]) -> Result<()> {
        let tensor = self
            .fetched
            .get(name)
            .ok_or_else(|| TfDemoError::tensor(format!("output {} was not computed", name)))?;
        let data = tensor
            .as_slice::<f32>()
            .map_err(|e| TfDemoError::tensor(format!("{}: {:#}", name, e)))?;

        if data.len() != out.len() {
            return Err(TfDemoError::tensor(format!(
                "{}: graph produced {} elements, buffer holds {}",
                name,
                data.len(),
                out.len()
            )));
        }
        out.copy_from_slice(data);
        Ok(())
    }

    fn input_names(&self) -> Vec<String> {
        self.node_names(&self.graph.inputs)
    }

    fn output_names(&self) -> Vec<String> {
        self.node_names(&self.graph.outputs)
    }
}

impl Drop for TensorflowEngine {
    fn drop(&mut self) {
        debug!(uri = %self.uri, "releasing graph");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_a_load_error() {
        let err = match TensorflowEngine::from_bytes("junk.pb", &[0xff, 0xff, 0xff, 0x01]) {
            Ok(_) => panic!("garbage parsed as a graph"),
            Err(e) => e,
        };
        assert!(err.is_load_failure(), "unexpected error: {}", err);
    }

    #[test]
    fn output_names_must_be_distinct() {
        assert!(check_output_names(&["output"]).is_ok());
        assert!(check_output_names(&["a", "b"]).is_ok());

        let err = check_output_names(&["output", "output"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Inference failed: output output requested more than once"
        );
        assert!(matches!(
            check_output_names(&[]),
            Err(TfDemoError::Inference(_))
        ));
    }
}
