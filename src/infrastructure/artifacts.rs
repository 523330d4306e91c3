use crate::config::ArtifactConfig;
use crate::domain::ports::EnsembleMember;
use crate::domain::schema::{ModelSchema, VocabularySet};
use crate::infrastructure::smartcore_member::{RegressionTree, TreeMember};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Everything the pipeline needs from the training side, loaded once at
/// process start and read-only afterwards.
///
/// A missing or corrupt artifact file is a startup failure: the loader
/// returns an error and the process should abort rather than degrade per
/// request.
pub struct ArtifactSet {
    pub members: Vec<Box<dyn EnsembleMember>>,
    pub schema: ModelSchema,
    pub vocabularies: VocabularySet,
}

impl std::fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("members", &self.members.len())
            .field("schema", &self.schema)
            .field("vocabularies", &self.vocabularies)
            .finish()
    }
}

impl ArtifactSet {
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let trees: Vec<RegressionTree> =
            read_json(&config.ensemble_path).context("loading ensemble artifact")?;
        anyhow::ensure!(
            !trees.is_empty(),
            "ensemble artifact {} contains no members",
            config.ensemble_path.display()
        );

        let schema: ModelSchema =
            read_json(&config.schema_path).context("loading column schema artifact")?;
        anyhow::ensure!(
            !schema.feature_columns.is_empty(),
            "column schema {} declares no feature columns",
            config.schema_path.display()
        );

        let vocabularies: VocabularySet =
            read_json(&config.vocab_path).context("loading vocabulary artifact")?;

        info!(
            members = trees.len(),
            columns = schema.feature_columns.len(),
            "artifact set loaded"
        );

        let members = trees
            .into_iter()
            .map(|tree| Box::new(TreeMember::new(tree)) as Box<dyn EnsembleMember>)
            .collect();

        Ok(Self {
            members,
            schema,
            vocabularies,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("deserializing {}", path.display()))
}
