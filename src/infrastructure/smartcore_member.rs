use crate::domain::ports::EnsembleMember;
use crate::domain::schema::FeatureVector;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_regressor::DecisionTreeRegressor;

pub type RegressionTree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// One decision tree of the loaded regression forest, adapted to the
/// ensemble-member port.
pub struct TreeMember {
    tree: RegressionTree,
}

impl TreeMember {
    pub fn new(tree: RegressionTree) -> Self {
        Self { tree }
    }
}

impl EnsembleMember for TreeMember {
    fn predict(&self, vector: &FeatureVector) -> Result<f64, String> {
        let input_matrix = match DenseMatrix::from_2d_vec(&vec![vector.as_slice().to_vec()]) {
            Ok(m) => m,
            Err(e) => return Err(format!("Matrix creation failed: {e}")),
        };

        match self.tree.predict(&input_matrix) {
            Ok(predictions) => predictions
                .first()
                .copied()
                .ok_or_else(|| "No prediction returned".to_string()),
            Err(e) => Err(format!("Prediction failed: {e}")),
        }
    }
}
