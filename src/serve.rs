//! HTTP server for browsing extracted documentation.
//!
//! The model is built once before the server starts and only read by the
//! handlers.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::Error;
use crate::model::Documentation;
use crate::render::{create_renderer, json::to_json, RenderOptions};

/// Pages are rendered once up front; handlers hand out copies.
pub struct ServerState {
    page: String,
    packages_json: String,
    types: BTreeMap<String, String>,
}

impl ServerState {
    pub fn new(doc: &Documentation, options: &RenderOptions) -> Result<Self, Error> {
        Ok(Self {
            page: create_renderer("html", options)?.render(doc)?,
            packages_json: to_json(doc)?,
            types: doc.type_index(),
        })
    }
}

/// Listen address and page rendering settings.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    pub render: RenderOptions,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            render: RenderOptions::default(),
        }
    }
}

/// Create the documentation router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/packages", get(packages_handler))
        .route("/api/types", get(types_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn packages_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.packages_json.clone(),
    )
}

async fn types_handler(State(state): State<Arc<ServerState>>) -> Json<BTreeMap<String, String>> {
    Json(state.types.clone())
}

/// Serve `doc` until the process is stopped.
pub async fn serve(doc: &Documentation, config: ServeConfig) -> anyhow::Result<()> {
    let state = ServerState::new(doc, &config.render)?;
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("documentation server listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decl, FileDoc, Package, TypeDecl, TypeNode};

    fn state() -> Arc<ServerState> {
        let doc = Documentation {
            packages: vec![Package {
                name: "geo".to_string(),
                files: vec![FileDoc {
                    name: "geo/point.go".to_string(),
                    doc: None,
                    decls: vec![Decl::Type(TypeDecl {
                        name: "Point".to_string(),
                        doc: None,
                        ty: TypeNode::Ident("int".to_string()),
                    })],
                }],
            }],
        };
        Arc::new(ServerState::new(&doc, &RenderOptions::default()).unwrap())
    }

    #[tokio::test]
    async fn index_serves_html() {
        let Html(page) = index_handler(State(state())).await;
        assert!(page.contains("<h1>package geo</h1>"));
    }

    #[tokio::test]
    async fn types_serves_index() {
        let Json(types) = types_handler(State(state())).await;
        assert_eq!(types.get("Point").map(String::as_str), Some("geo/point.go"));
    }

    #[tokio::test]
    async fn packages_serves_model() {
        let response = packages_handler(State(state())).await.into_response();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn default_address() {
        assert_eq!(ServeConfig::default().addr.to_string(), "127.0.0.1:8080");
    }
}
