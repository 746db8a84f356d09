//! Weight loading from safetensors files.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use tracing::debug;

/// Name, dtype and shape of one tensor stored in a weights file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorInfo {
    /// Tensor name, e.g. `conv1.weight`.
    pub name: String,
    /// Element type as written in the file.
    pub dtype: String,
    /// Tensor dimensions.
    pub shape: Vec<usize>,
}

impl TensorInfo {
    /// Number of elements in the tensor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns true for tensors with a zero-sized dimension.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read model file: {}", path.display()))
}

/// Loads a safetensors file into a `VarBuilder` on `device`.
///
/// All tensors are materialized eagerly, so a successful return means the
/// whole file was readable.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The safetensors data is invalid or holds no tensors
/// - A tensor uses an unsupported dtype
pub fn load_safetensors(path: impl AsRef<Path>, device: &Device) -> Result<VarBuilder<'static>> {
    let path = path.as_ref();
    let data = read_file(path)?;
    let tensors = SafeTensors::deserialize(&data)
        .with_context(|| format!("Failed to parse safetensors: {}", path.display()))?;

    if tensors.names().is_empty() {
        anyhow::bail!("No tensors in {}", path.display());
    }

    let mut weights: HashMap<String, Tensor> = HashMap::new();
    for (name, view) in tensors.tensors() {
        let dtype = to_candle_dtype(view.dtype())?;
        let tensor = Tensor::from_raw_buffer(view.data(), dtype, view.shape(), device)
            .with_context(|| format!("Failed to create tensor '{name}'"))?;
        weights.insert(name, tensor);
    }

    debug!("Loaded {} tensors from {}", weights.len(), path.display());
    Ok(VarBuilder::from_tensors(weights, DType::F32, device))
}

/// Lists the tensors stored in a safetensors file without loading them.
///
/// Entries are sorted by name.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn inspect_safetensors(path: impl AsRef<Path>) -> Result<Vec<TensorInfo>> {
    let path = path.as_ref();
    let data = read_file(path)?;
    let tensors = SafeTensors::deserialize(&data)
        .with_context(|| format!("Failed to parse safetensors: {}", path.display()))?;

    let mut infos: Vec<TensorInfo> = tensors
        .tensors()
        .into_iter()
        .map(|(name, view)| TensorInfo {
            name,
            dtype: format!("{:?}", view.dtype()),
            shape: view.shape().to_vec(),
        })
        .collect();
    infos.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(infos)
}

fn to_candle_dtype(dtype: safetensors::Dtype) -> Result<DType> {
    use safetensors::Dtype as S;
    Ok(match dtype {
        S::F32 => DType::F32,
        S::F64 => DType::F64,
        S::F16 => DType::F16,
        S::BF16 => DType::BF16,
        S::U8 => DType::U8,
        S::U32 => DType::U32,
        S::I64 => DType::I64,
        other => anyhow::bail!("Unsupported dtype: {other:?}"),
    })
}
