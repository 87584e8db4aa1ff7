//! Artifact adapter: loads the trained scaler and random-forest classifier
//! from their JSON exports.
//!
//! The artifacts are the Rust-side counterpart of the training pipeline's
//! serialized estimators: `scaler.json` holds the standard scaler's per-column
//! mean and scale, `model.json` holds the forest as flat node arrays
//! (`children_left`, `children_right`, `feature`, `threshold`, `value`).
//!
//! Loading is all-or-nothing: if either file is missing or corrupt the whole
//! asset set is unavailable. Both artifacts carry `feature_names`, which must
//! match the encoder's `EXPECTED_COLUMNS` exactly; a drifted artifact fails
//! here at startup instead of producing misordered predictions later.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{FeatureVector, EXPECTED_COLUMNS, FEATURE_COUNT};
use crate::ports::{Classifier, FeatureScaler, InferenceError};

const SCALER_FILE: &str = "scaler.json";
const MODEL_FILE: &str = "model.json";

/// Leaf marker used by the export for `children_*` entries.
const LEAF: i64 = -1;

/// Errors raised while loading model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid artifact format in {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("artifact schema mismatch in {path}: {detail}")]
    Schema { path: PathBuf, detail: String },
}

/// Scaler parameters exported by the training pipeline.
#[derive(Debug, Clone, Deserialize)]
struct ExportedScaler {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// One decision tree in flat-array form.
#[derive(Debug, Clone, Deserialize)]
struct ExportedTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    /// Per-node class sample counts `[class0, class1]`
    value: Vec<[f64; 2]>,
}

/// Forest parameters exported by the training pipeline.
#[derive(Debug, Clone, Deserialize)]
struct ExportedForest {
    feature_names: Vec<String>,
    trees: Vec<ExportedTree>,
}

/// The trained standard scaler: feature-wise `(x - mean) / scale`.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        let raw = features.as_slice();
        if raw.len() != self.mean.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.mean.len(),
                got: raw.len(),
            });
        }

        Ok(raw
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| (x - mean) / scale)
            .collect())
    }
}

/// The trained random-forest classifier.
///
/// Probability of the high-risk class is the mean over trees of the leaf's
/// class-1 sample fraction; the label follows the 0.5 threshold.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<ExportedTree>,
    n_features: usize,
}

impl RandomForest {
    /// Walk one tree to its leaf and return the class-1 fraction there.
    fn tree_proba(tree: &ExportedTree, scaled: &[f64]) -> Result<f64, InferenceError> {
        let node_count = tree.children_left.len();
        let mut node = 0usize;

        // A well-formed tree reaches a leaf in at most node_count steps.
        for _ in 0..node_count {
            let left = tree.children_left[node];
            let right = tree.children_right[node];
            if left == LEAF && right == LEAF {
                let [neg, pos] = tree.value[node];
                return Ok(pos / (neg + pos));
            }

            let feature = tree.feature[node] as usize;
            let next = if scaled[feature] <= tree.threshold[node] {
                left
            } else {
                right
            };
            node = next as usize;
        }

        Err(InferenceError::MalformedModel(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }

    fn check_width(&self, scaled: &[f64]) -> Result<(), InferenceError> {
        if scaled.len() != self.n_features {
            return Err(InferenceError::DimensionMismatch {
                expected: self.n_features,
                got: scaled.len(),
            });
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn predict(&self, scaled: &[f64]) -> Result<u8, InferenceError> {
        let proba = self.predict_proba(scaled)?;
        Ok(u8::from(proba[1] >= 0.5))
    }

    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], InferenceError> {
        self.check_width(scaled)?;

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += Self::tree_proba(tree, scaled)?;
        }
        let p1 = sum / self.trees.len() as f64;
        Ok([1.0 - p1, p1])
    }
}

/// Immutable handles to the loaded model artifacts, shared for the process
/// lifetime.
#[derive(Debug)]
pub struct ModelAssets {
    pub scaler: std::sync::Arc<StandardScaler>,
    pub classifier: std::sync::Arc<RandomForest>,
}

impl ModelAssets {
    /// Load both artifacts from `dir`. No partial load: any failure makes the
    /// whole asset set unavailable.
    ///
    /// # Errors
    /// Returns `AssetError` if either file is missing, unparseable, or fails
    /// schema validation against the encoder's expected columns.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let scaler_path = dir.join(SCALER_FILE);
        let model_path = dir.join(MODEL_FILE);

        let scaler = load_scaler(&scaler_path)?;
        let classifier = load_forest(&model_path)?;

        tracing::info!(
            "Loaded model assets from {:?} ({} trees, {} features)",
            dir,
            classifier.trees.len(),
            classifier.n_features
        );

        Ok(Self {
            scaler: std::sync::Arc::new(scaler),
            classifier: std::sync::Arc::new(classifier),
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AssetError::Format {
        path: path.to_path_buf(),
        source,
    })
}

fn schema_error(path: &Path, detail: impl Into<String>) -> AssetError {
    AssetError::Schema {
        path: path.to_path_buf(),
        detail: detail.into(),
    }
}

fn check_feature_names(path: &Path, names: &[String]) -> Result<(), AssetError> {
    if names.len() != FEATURE_COUNT {
        return Err(schema_error(
            path,
            format!(
                "expected {FEATURE_COUNT} feature names, got {}",
                names.len()
            ),
        ));
    }
    for (i, (actual, expected)) in names.iter().zip(EXPECTED_COLUMNS.iter()).enumerate() {
        if actual != expected {
            return Err(schema_error(
                path,
                format!("column {i} is {actual:?}, expected {expected:?}"),
            ));
        }
    }
    Ok(())
}

fn load_scaler(path: &Path) -> Result<StandardScaler, AssetError> {
    let exported: ExportedScaler = read_json(path)?;
    check_feature_names(path, &exported.feature_names)?;

    if exported.mean.len() != FEATURE_COUNT || exported.scale.len() != FEATURE_COUNT {
        return Err(schema_error(
            path,
            format!(
                "mean/scale lengths ({}, {}) do not match feature count",
                exported.mean.len(),
                exported.scale.len()
            ),
        ));
    }
    if let Some(i) = exported
        .scale
        .iter()
        .position(|&s| !s.is_finite() || s == 0.0)
    {
        return Err(schema_error(path, format!("scale[{i}] must be finite and non-zero")));
    }

    Ok(StandardScaler {
        mean: exported.mean,
        scale: exported.scale,
    })
}

fn load_forest(path: &Path) -> Result<RandomForest, AssetError> {
    let exported: ExportedForest = read_json(path)?;
    check_feature_names(path, &exported.feature_names)?;

    if exported.trees.is_empty() {
        return Err(schema_error(path, "forest contains no trees"));
    }

    for (t, tree) in exported.trees.iter().enumerate() {
        let n = tree.children_left.len();
        if n == 0 {
            return Err(schema_error(path, format!("tree {t} has no nodes")));
        }
        if tree.children_right.len() != n
            || tree.feature.len() != n
            || tree.threshold.len() != n
            || tree.value.len() != n
        {
            return Err(schema_error(
                path,
                format!("tree {t} node arrays have inconsistent lengths"),
            ));
        }

        for node in 0..n {
            let left = tree.children_left[node];
            let right = tree.children_right[node];
            let is_leaf = left == LEAF && right == LEAF;

            if is_leaf {
                let [neg, pos] = tree.value[node];
                if neg < 0.0 || pos < 0.0 || neg + pos <= 0.0 {
                    return Err(schema_error(
                        path,
                        format!("tree {t} leaf {node} has invalid class counts"),
                    ));
                }
            } else {
                if left < 0 || right < 0 || left as usize >= n || right as usize >= n {
                    return Err(schema_error(
                        path,
                        format!("tree {t} node {node} has child index out of range"),
                    ));
                }
                let feature = tree.feature[node];
                if feature < 0 || feature as usize >= FEATURE_COUNT {
                    return Err(schema_error(
                        path,
                        format!("tree {t} node {node} splits on unknown feature {feature}"),
                    ));
                }
            }
        }
    }

    Ok(RandomForest {
        trees: exported.trees,
        n_features: FEATURE_COUNT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{encode, fixtures::baseline_profile};
    use serde_json::json;
    use std::path::Path;
    use tempfile::tempdir;

    fn identity_scaler_json() -> serde_json::Value {
        json!({
            "feature_names": EXPECTED_COLUMNS,
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT],
        })
    }

    /// A two-tree forest splitting on age (column 0): one tree says 0.8 for
    /// age > 50, the other says 0.6, so old patients score 0.7.
    fn stump_forest_json() -> serde_json::Value {
        let stump = |pos_left: f64, pos_right: f64| {
            json!({
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [50.0, -2.0, -2.0],
                "value": [
                    [50.0, 50.0],
                    [(100.0 - pos_left), pos_left],
                    [(100.0 - pos_right), pos_right],
                ],
            })
        };
        json!({
            "feature_names": EXPECTED_COLUMNS,
            "trees": [stump(10.0, 80.0), stump(30.0, 60.0)],
        })
    }

    fn write_assets(dir: &Path, scaler: &serde_json::Value, model: &serde_json::Value) {
        std::fs::write(dir.join(SCALER_FILE), scaler.to_string()).expect("write scaler");
        std::fs::write(dir.join(MODEL_FILE), model.to_string()).expect("write model");
    }

    #[test]
    fn test_load_and_predict() {
        let temp = tempdir().expect("tempdir");
        write_assets(temp.path(), &identity_scaler_json(), &stump_forest_json());

        let assets = ModelAssets::load(temp.path()).expect("load assets");

        let mut profile = baseline_profile();
        profile.age = 62;
        let scaled = assets
            .scaler
            .transform(&encode(&profile))
            .expect("transform");

        let proba = assets.classifier.predict_proba(&scaled).expect("proba");
        assert!((proba[1] - 0.7).abs() < 1e-9);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
        assert_eq!(assets.classifier.predict(&scaled).expect("predict"), 1);

        profile.age = 40;
        let scaled = assets
            .scaler
            .transform(&encode(&profile))
            .expect("transform");
        let proba = assets.classifier.predict_proba(&scaled).expect("proba");
        assert!((proba[1] - 0.2).abs() < 1e-9);
        assert_eq!(assets.classifier.predict(&scaled).expect("predict"), 0);
    }

    #[test]
    fn test_scaler_transform_math() {
        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![1.0; FEATURE_COUNT];
        mean[0] = 45.0; // age
        scale[0] = 10.0;

        let temp = tempdir().expect("tempdir");
        let scaler_json = json!({
            "feature_names": EXPECTED_COLUMNS,
            "mean": mean,
            "scale": scale,
        });
        write_assets(temp.path(), &scaler_json, &stump_forest_json());
        let assets = ModelAssets::load(temp.path()).expect("load assets");

        let mut profile = baseline_profile();
        profile.age = 65;
        let scaled = assets
            .scaler
            .transform(&encode(&profile))
            .expect("transform");
        assert!((scaled[0] - 2.0).abs() < 1e-9);
        // Untouched columns pass through as-is.
        assert!((scaled[6] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = tempdir().expect("tempdir");
        // Only write the model: the scaler is missing, so the whole set fails.
        std::fs::write(temp.path().join(MODEL_FILE), stump_forest_json().to_string())
            .expect("write model");

        let err = ModelAssets::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let temp = tempdir().expect("tempdir");
        std::fs::write(temp.path().join(SCALER_FILE), "{not json").expect("write scaler");
        std::fs::write(temp.path().join(MODEL_FILE), stump_forest_json().to_string())
            .expect("write model");

        let err = ModelAssets::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, AssetError::Format { .. }));
    }

    #[test]
    fn test_wrong_feature_names_fail_fast() {
        let temp = tempdir().expect("tempdir");
        let mut names: Vec<&str> = EXPECTED_COLUMNS.to_vec();
        names.swap(0, 1); // misordered schema
        let scaler_json = json!({
            "feature_names": names,
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT],
        });
        write_assets(temp.path(), &scaler_json, &stump_forest_json());

        let err = ModelAssets::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, AssetError::Schema { .. }));
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[3] = 0.0;
        let scaler_json = json!({
            "feature_names": EXPECTED_COLUMNS,
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": scale,
        });
        write_assets(temp.path(), &scaler_json, &stump_forest_json());

        let err = ModelAssets::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, AssetError::Schema { .. }));
    }

    #[test]
    fn test_inconsistent_tree_arrays_are_rejected() {
        let temp = tempdir().expect("tempdir");
        let model_json = json!({
            "feature_names": EXPECTED_COLUMNS,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2],
                "threshold": [50.0, -2.0, -2.0],
                "value": [[50.0, 50.0], [90.0, 10.0], [20.0, 80.0]],
            }],
        });
        write_assets(temp.path(), &identity_scaler_json(), &model_json);

        let err = ModelAssets::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, AssetError::Schema { .. }));
    }

    #[test]
    fn test_dimension_mismatch_is_distinguishable() {
        let temp = tempdir().expect("tempdir");
        write_assets(temp.path(), &identity_scaler_json(), &stump_forest_json());
        let assets = ModelAssets::load(temp.path()).expect("load assets");

        let short = vec![1.0; 3];
        let err = assets.classifier.predict_proba(&short).expect_err("must fail");
        assert_eq!(
            err,
            InferenceError::DimensionMismatch {
                expected: FEATURE_COUNT,
                got: 3,
            }
        );
    }

    #[test]
    fn test_shipped_artifacts_load() {
        let assets = ModelAssets::load(Path::new("models")).expect("shipped artifacts load");

        let scaled = assets
            .scaler
            .transform(&encode(&baseline_profile()))
            .expect("transform");
        let proba = assets.classifier.predict_proba(&scaled).expect("proba");
        assert!((0.0..=1.0).contains(&proba[1]));
    }
}
