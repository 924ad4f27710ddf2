//! HTTP eval endpoint.
//!
//! A single route, `POST /eval`, takes `{"code": "<source>"}` and answers
//! `{"result": "<inspect-or-errors>", "isError": <bool>}`. Every request
//! evaluates under a fresh environment; parser diagnostics are
//! newline-joined.

use std::error::Error;
use std::net::SocketAddr;

use axum::{routing::post, Json, Router};
use log::info;
use serde::{Deserialize, Serialize};

use crate::evaluate;
use crate::object::{Environment, Object};

#[derive(Debug, Deserialize)]
pub struct EvalRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct EvalResponse {
    pub result: String,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

async fn handle_evaluate(Json(request): Json<EvalRequest>) -> Json<EvalResponse> {
    Json(evaluate_code(&request.code))
}

fn evaluate_code(code: &str) -> EvalResponse {
    let env = Environment::new();
    let (result, errors) = evaluate(code, &env);

    if !errors.is_empty() {
        return EvalResponse {
            result: errors.join("\n"),
            is_error: true,
        };
    }

    let result = result.unwrap_or(Object::Null);
    EvalResponse {
        is_error: result.is_error(),
        result: result.inspect(),
    }
}

/// Serve the eval endpoint on localhost. Blocks the calling thread; the
/// async runtime lives inside so the CLI surface stays synchronous.
pub fn serve(port: u16) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let app = Router::new().route("/eval", post(handle_evaluate));
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Running server on port :{port}");
        axum::serve(listener, app).await?;

        Ok(())
    })
}
