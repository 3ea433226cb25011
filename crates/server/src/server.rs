use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{charges, expenses, funds, payment_transfers, recurring, reimbursements, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<user::Model> = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/payment-transfers", get(payment_transfers::list))
        .route("/payment-transfers/stats", get(payment_transfers::stats))
        .route("/payment-transfers/refresh", post(payment_transfers::refresh))
        .route(
            "/payment-transfers/generate-recurring",
            post(payment_transfers::generate_recurring),
        )
        .route("/payment-transfers/{id}", get(payment_transfers::get_detail))
        .route(
            "/payment-transfers/{id}/execute",
            post(payment_transfers::execute),
        )
        .route("/budgets", post(funds::budget_new))
        .route("/funds", post(funds::fund_new))
        .route("/funds/move-items", post(funds::move_items))
        .route("/reimbursements", post(reimbursements::submit))
        .route("/reimbursements/{id}/review", post(reimbursements::review))
        .route("/charges", post(charges::submit))
        .route("/charges/{id}/review", post(charges::review))
        .route("/direct-expenses", post(expenses::direct_new))
        .route("/planned-expenses", post(expenses::planned_new))
        .route("/recurring-transfers", post(recurring::create))
        .route("/recurring-transfers/{id}/status", post(recurring::set_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::{ActiveValue, Database};
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        let alice = user::ActiveModel {
            username: ActiveValue::Set("alice".to_string()),
            password: ActiveValue::Set("password".to_string()),
        };
        user::Entity::insert(alice).exec(&db).await.unwrap();

        let engine = Engine::builder().database(db.clone()).build().await.unwrap();
        router(ServerState {
            engine: Arc::new(engine),
            db,
        })
    }

    fn basic_auth() -> String {
        format!(
            "Basic {}",
            base64::prelude::BASE64_STANDARD.encode("alice:password")
        )
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, basic_auth());
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn requests_without_credentials_are_rejected() {
        let router = test_router().await;

        let request = Request::builder()
            .method(Method::GET)
            .uri("/payment-transfers?budget_type=circle")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        // Missing credentials are rejected before any handler runs.
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn reconciliation_flow_over_http() {
        let router = test_router().await;

        let (status, budget) = send(
            &router,
            Method::POST,
            "/budgets",
            Some(json!({"name": "Casa", "budget_type": "circle", "group_id": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let budget_id = budget["id"].as_str().unwrap().to_string();

        let (status, fund) = send(
            &router,
            Method::POST,
            "/funds",
            Some(json!({"budget_id": budget_id, "name": "Spese comuni"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let fund_id = fund["id"].as_str().unwrap().to_string();

        let (status, reimbursement) = send(
            &router,
            Method::POST,
            "/reimbursements",
            Some(json!({
                "fund_id": fund_id,
                "recipient_user_id": null,
                "amount_minor": 12_000,
                "description": "groceries",
                "expense_date": "2026-03-10",
                "receipt_url": null,
                "notes": null
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reimbursement_id = reimbursement["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &router,
            Method::POST,
            &format!("/reimbursements/{reimbursement_id}/review"),
            Some(json!({"action": "approve", "notes": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, transfers) = send(
            &router,
            Method::POST,
            "/payment-transfers/refresh",
            Some(json!({"budget_type": "circle", "group_id": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transfers.as_array().unwrap().len(), 1);
        assert_eq!(transfers[0]["total_amount_minor"], 12_000);
        let transfer_id = transfers[0]["id"].as_str().unwrap().to_string();

        let (status, executed) = send(
            &router,
            Method::POST,
            &format!("/payment-transfers/{transfer_id}/execute"),
            Some(json!({"budget_type": "circle", "group_id": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(executed["transfer"]["status"], "executed");
        assert!(executed["carry_forward_debt_minor"].is_null());

        // Double execution is a conflict with no side effects.
        let (status, _) = send(
            &router,
            Method::POST,
            &format!("/payment-transfers/{transfer_id}/execute"),
            Some(json!({"budget_type": "circle", "group_id": null})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, stats) = send(
            &router,
            Method::GET,
            "/payment-transfers/stats?budget_type=circle",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["executed_count"], 1);
        assert_eq!(stats["executed_total_minor"], 12_000);
    }

    #[tokio::test]
    async fn generate_recurring_reports_zero_when_idle() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/payment-transfers/generate-recurring",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
    }
}
