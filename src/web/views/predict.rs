use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::regression::requests::PredictRequest;
use crate::regression::responses::PredictResponse;
use crate::web::state::CurrentModel;

#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn post_predict(
    Json(request): Json<PredictRequest>,
    Data(current_model): Data<&CurrentModel>,
) -> Result<Response> {
    match current_model.get().await.predict(request.x_value) {
        Ok(prediction) => {
            debug!(request.x_value, prediction);
            Ok(Json(PredictResponse { prediction }).into_response())
        }
        Err(error) => {
            info!("{:#}", error);
            Ok(error.into_response())
        }
    }
}
