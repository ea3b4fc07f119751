use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use tokio::task::spawn_blocking;

use crate::helpers::tracing::format_elapsed;
use crate::prelude::*;
use crate::regression::requests::TrainRequest;
use crate::regression::responses::TrainResponse;
use crate::regression::{self, fit};
use crate::web::state::CurrentModel;

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post_train(
    Json(request): Json<TrainRequest>,
    Data(current_model): Data<&CurrentModel>,
) -> Result<Response> {
    let start_instant = Instant::now();
    debug!(n_points = request.x_values.len());

    let fit = spawn_blocking(move || -> regression::error::Result<_> {
        fit(&request.dataset()?, &request.hyperparameters()?)
    })
    .await?;
    let fit = match fit {
        Ok(fit) => fit,
        Err(error) => {
            info!("{:#}", error);
            return Ok(error.into_response());
        }
    };

    current_model.replace(fit.model).await;
    info!(
        slope = fit.model.slope,
        intercept = fit.model.intercept,
        mse = fit.metrics.mse,
        r_squared = fit.metrics.r_squared,
        elapsed = format_elapsed(start_instant).as_str(),
        "trained",
    );
    Ok(Json(TrainResponse::from(&fit)).into_response())
}
