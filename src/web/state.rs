use tokio::sync::RwLock;

use crate::prelude::*;
use crate::regression::model::Model;

/// Model which the predictions are made with, replaced as a whole by each successful training.
#[derive(Clone, Default)]
pub struct CurrentModel(Arc<RwLock<Model>>);

impl CurrentModel {
    pub async fn get(&self) -> Model {
        *self.0.read().await
    }

    pub async fn replace(&self, model: Model) {
        *self.0.write().await = model;
    }
}
