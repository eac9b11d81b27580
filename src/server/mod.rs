//! HTTP shell over the rendering pipeline
//!
//! A thin layer: routes map to renderer calls, pipeline errors map to status
//! codes. Not-found errors become 404; everything else becomes 500, with the
//! diagnostic text included only when the config allows it.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::render::PageRenderer;
use crate::Blogd;

/// Server state shared across requests
struct ServerState {
    renderer: PageRenderer,
    expose_errors: bool,
}

/// Start the blog server
pub async fn start(blog: &Blogd, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        renderer: PageRenderer::new(blog)?,
        expose_errors: blog.config.expose_errors,
    });

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/index/") }))
        .route("/index/", get(index_handler))
        .route("/blog/", get(list_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/about/", get(about_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Handle "localhost" specially; it is not a bindable address literal.
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("serving blog at http://{}:{}", ip, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    page(state.renderer.render_index(), &state)
}

async fn list_handler(State(state): State<Arc<ServerState>>) -> Response {
    page(state.renderer.render_post_list(), &state)
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    page(state.renderer.render_post(&slug), &state)
}

async fn about_handler(State(state): State<Arc<ServerState>>) -> Response {
    page(state.renderer.render_about(), &state)
}

/// Map a pipeline result onto a response
fn page(result: crate::error::Result<String>, state: &ServerState) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(&e, state.expose_errors),
    }
}

fn error_response(err: &Error, expose: bool) -> Response {
    let status = status_for(err);
    if status == StatusCode::NOT_FOUND {
        tracing::debug!("not found: {}", err);
        return (status, "404 page not found").into_response();
    }

    tracing::error!("render failed: {}", err);
    let body = if expose {
        format!("internal error: {}", err)
    } else {
        "internal error".to_string()
    };
    (status, body).into_response()
}

/// Status mapping for the pipeline error taxonomy
fn status_for(err: &Error) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = Error::NotFound("missing".to_string());
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_pipeline_errors_map_to_500() {
        let malformed = Error::MalformedPost {
            slug: "x".to_string(),
            reason: "bad date".to_string(),
        };
        assert_eq!(status_for(&malformed), StatusCode::INTERNAL_SERVER_ERROR);

        let storage = Error::Storage {
            path: "/tmp/p".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(status_for(&storage), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
