use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::{PaddingParams, Tokenizer};

use crate::error::EmbedError;
use crate::provider::Embedder;

/// Local BERT embedding backend. Weights come from `HuggingFace` Hub; a
/// whole batch is padded to a common length and embedded in one forward pass.
#[derive(Clone)]
pub struct CandleEmbedder {
    model: Arc<BertModel>,
    tokenizer: Tokenizer,
    device: Device,
}

impl std::fmt::Debug for CandleEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleEmbedder")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl CandleEmbedder {
    /// Download and load a BERT embedding model from `HuggingFace` Hub.
    ///
    /// # Errors
    ///
    /// Returns an error if any model file cannot be fetched or parsed.
    pub fn load(repo_id: &str, device: &Device) -> Result<Self, EmbedError> {
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| EmbedError::ModelLoad(format!("hub client: {e}")))?;
        let repo = api.model(repo_id.to_owned());
        let fetch = |file: &str| {
            repo.get(file).map_err(|e| {
                EmbedError::ModelLoad(format!("failed to fetch {file} from {repo_id}: {e}"))
            })
        };

        let config: BertConfig = serde_json::from_str(
            &std::fs::read_to_string(fetch("config.json")?)
                .map_err(|e| EmbedError::ModelLoad(format!("unreadable config.json: {e}")))?,
        )?;

        let mut tokenizer = Tokenizer::from_file(fetch("tokenizer.json")?)
            .map_err(|e| EmbedError::ModelLoad(format!("tokenizer: {e}")))?;
        // Pad to the longest sequence in each batch so inputs stack into a
        // single tensor.
        tokenizer.with_padding(Some(PaddingParams::default()));

        let weights = fetch("model.safetensors")?;
        // SAFETY: the downloaded safetensors file is not modified while the
        // mmap is live.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)? };
        let model = BertModel::load(vb, &config)?;

        Ok(Self {
            model: Arc::new(model),
            tokenizer,
            device: device.clone(),
        })
    }

    /// One forward pass over the padded batch, then mean pooling restricted
    /// to non-padding positions and L2 normalization per row.
    fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedError::Inference(format!("batch tokenization failed: {e}")))?;

        let ids: Vec<Vec<u32>> = encodings.iter().map(|e| e.get_ids().to_vec()).collect();
        let masks: Vec<Vec<u32>> = encodings
            .iter()
            .map(|e| e.get_attention_mask().to_vec())
            .collect();

        let input_ids = Tensor::new(ids, &self.device)?;
        let attention_mask = Tensor::new(masks, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Padding positions must not contribute to the pooled vector.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;

        let norm = pooled.sqr()?.sum_keepdim(1)?.sqrt()?;
        let normalized = pooled.broadcast_div(&norm)?;
        normalized.to_vec2::<f32>().map_err(EmbedError::Candle)
    }
}

impl Embedder for CandleEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // The forward pass is CPU/GPU-bound; hop off the async runtime once
        // for the whole batch.
        let this = self.clone();
        let owned = texts.to_vec();
        tokio::task::spawn_blocking(move || this.embed_all(&owned))
            .await
            .map_err(|e| EmbedError::Inference(format!("embedding task panicked: {e}")))?
    }

    fn name(&self) -> &'static str {
        "candle"
    }
}
