use candle_core::{D, DType, Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::scoring::{ClassifierOutput, LabelScore};

use super::device::select_device;
use super::error::ModelError;
use super::pipeline::TextClassifier;
use super::utils::{ensure_model_files, load_tokenizer_with_truncation};

/// Classification metadata read from a Hugging Face `config.json`.
#[derive(Debug, Deserialize)]
struct HeadConfig {
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    id2label: BTreeMap<String, String>,
    #[serde(default)]
    problem_type: Option<String>,
}

impl HeadConfig {
    fn labels(&self) -> Result<Vec<String>, ModelError> {
        let mut indexed = self
            .id2label
            .iter()
            .map(|(idx, label)| {
                idx.parse::<usize>()
                    .map(|idx| (idx, label.clone()))
                    .map_err(|_| ModelError::InvalidConfig {
                        reason: format!("non-numeric id2label key '{}'", idx),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if indexed.is_empty() {
            return Err(ModelError::InvalidConfig {
                reason: "config.json has no id2label mapping".to_string(),
            });
        }

        indexed.sort_by_key(|(idx, _)| *idx);
        Ok(indexed.into_iter().map(|(_, label)| label).collect())
    }

    fn is_roberta(&self) -> bool {
        matches!(
            self.model_type.as_deref(),
            Some("roberta") | Some("xlm-roberta") | Some("camembert")
        )
    }

    fn activation(&self) -> Activation {
        if self.problem_type.as_deref() == Some("multi_label_classification") {
            Activation::Sigmoid
        } else {
            Activation::Softmax
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    Sigmoid,
    Softmax,
}

/// BERT encoder with the standard `BertForSequenceClassification` head.
struct BertHead {
    bert: BertModel,
    pooler: Option<Linear>,
    classifier: Linear,
}

impl BertHead {
    fn load(vb: VarBuilder, config: &BertConfig, num_labels: usize) -> candle_core::Result<Self> {
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        let hidden_size = config.hidden_size;
        let pooler = if vb.contains_tensor("bert.pooler.dense.weight") {
            Some(candle_nn::linear(
                hidden_size,
                hidden_size,
                vb.pp("bert.pooler.dense"),
            )?)
        } else {
            None
        };
        let classifier = candle_nn::linear(hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            pooler,
            classifier,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> candle_core::Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let cls_token = output.i((.., 0, ..))?;
        let pooled = match &self.pooler {
            Some(pooler) => pooler.forward(&cls_token)?.tanh()?,
            None => cls_token,
        };
        self.classifier.forward(&pooled)
    }
}

enum Head {
    Bert(BertHead),
    Roberta(XLMRobertaForSequenceClassification),
}

impl Head {
    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> candle_core::Result<Tensor> {
        match self {
            Head::Bert(head) => head.forward(input_ids, token_type_ids, attention_mask),
            Head::Roberta(model) => model.forward(input_ids, attention_mask, token_type_ids),
        }
    }
}

/// Candle-backed sequence classifier (BERT or RoBERTa family).
#[derive(Clone)]
pub struct SequenceClassifier {
    model_id: String,
    device: Device,
    head: Arc<Head>,
    tokenizer: Arc<Tokenizer>,
    labels: Vec<String>,
    activation: Activation,
}

impl std::fmt::Debug for SequenceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceClassifier")
            .field("model_id", &self.model_id)
            .field("device", &format!("{:?}", self.device))
            .field("labels", &self.labels)
            .field("activation", &self.activation)
            .finish()
    }
}

impl SequenceClassifier {
    /// Loads a classifier from a directory holding `config.json`, `model.safetensors` and
    /// `tokenizer.json`.
    pub fn load(model_id: &str, model_dir: &Path, max_seq_len: usize) -> Result<Self, ModelError> {
        ensure_model_files(model_dir)?;

        let device = select_device();
        let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
        let head_config: HeadConfig =
            serde_json::from_str(&config_content).map_err(|e| ModelError::InvalidConfig {
                reason: format!("Failed to parse config: {}", e),
            })?;
        let labels = head_config.labels()?;
        let activation = head_config.activation();

        info!(
            model_id,
            model_dir = %model_dir.display(),
            num_labels = labels.len(),
            ?activation,
            "Loading classifier"
        );

        let weights_path = model_dir.join("model.safetensors");
        // SAFETY: the weights file is memory-mapped read-only and must not be modified while
        // the model is alive.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device) }
            .map_err(|e| ModelError::ModelLoadFailed {
                reason: format!("Failed to map weights: {}", e),
            })?;

        let is_roberta = head_config.is_roberta()
            || vb.contains_tensor("roberta.embeddings.word_embeddings.weight");

        let head = if is_roberta {
            let config: RobertaConfig =
                serde_json::from_str(&config_content).map_err(|e| ModelError::InvalidConfig {
                    reason: format!("Failed to parse RoBERTa config: {}", e),
                })?;
            let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, vb)
                .map_err(|e| ModelError::ModelLoadFailed {
                    reason: format!("Failed to load RoBERTa model: {}", e),
                })?;
            Head::Roberta(model)
        } else {
            let config: BertConfig =
                serde_json::from_str(&config_content).map_err(|e| ModelError::InvalidConfig {
                    reason: format!("Failed to parse BERT config: {}", e),
                })?;
            let model = BertHead::load(vb, &config, labels.len()).map_err(|e| {
                ModelError::ModelLoadFailed {
                    reason: format!("Failed to load BERT model: {}", e),
                }
            })?;
            Head::Bert(model)
        };

        let tokenizer = load_tokenizer_with_truncation(model_dir, max_seq_len)?;

        info!(model_id, "Classifier loaded successfully");

        Ok(Self {
            model_id: model_id.to_string(),
            device,
            head: Arc::new(head),
            tokenizer: Arc::new(tokenizer),
            labels,
            activation,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    fn to_tensor(&self, data: &[u32]) -> Result<Tensor, ModelError> {
        Ok(Tensor::new(data, &self.device)?.unsqueeze(0)?)
    }
}

impl TextClassifier for SequenceClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn classify(&self, text: &str) -> Result<ClassifierOutput, ModelError> {
        let tokens =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| ModelError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input_ids = self.to_tensor(tokens.get_ids())?;
        let type_ids = self.to_tensor(tokens.get_type_ids())?;
        let attention_mask = self.to_tensor(tokens.get_attention_mask())?;

        let logits = self
            .head
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| ModelError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let probs = match self.activation {
            Activation::Sigmoid => candle_nn::ops::sigmoid(&logits)?,
            Activation::Softmax => candle_nn::ops::softmax(&logits, D::Minus1)?,
        };
        let probs = probs.squeeze(0)?.to_vec1::<f32>()?;

        if probs.len() != self.labels.len() {
            return Err(ModelError::InferenceFailed {
                reason: format!(
                    "expected {} scores, model produced {}",
                    self.labels.len(),
                    probs.len()
                ),
            });
        }

        let records: Vec<LabelScore> = self
            .labels
            .iter()
            .zip(probs)
            .map(|(label, score)| LabelScore::new(label.clone(), score))
            .collect();

        let output = ClassifierOutput::top(records).ok_or_else(|| ModelError::InferenceFailed {
            reason: "model produced no scores".to_string(),
        })?;

        if let ClassifierOutput::Single(top) = &output {
            debug!(
                model_id = %self.model_id,
                top_label = %top.label,
                top_score = top.score,
                "Classified text"
            );
        }

        Ok(output)
    }
}
