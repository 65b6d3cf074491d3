use std::time::Duration;

use axum::{extract::RawQuery, http::StatusCode, routing::get, Router};

/// 고정 응답을 돌려주는 로컬 서버를 띄우고 base URL을 반환
pub(crate) async fn serve_fixture(
    path: &'static str,
    query: &'static str,
    status: StatusCode,
    body: &'static str,
) -> String {
    serve_fixture_delayed(path, query, status, body, Duration::ZERO).await
}

pub(crate) async fn serve_fixture_delayed(
    path: &'static str,
    query: &'static str,
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> String {
    let app = Router::new().route(
        path,
        get(move |RawQuery(q): RawQuery| async move {
            tokio::time::sleep(delay).await;
            if q.as_deref().unwrap_or("") != query {
                return (StatusCode::BAD_REQUEST, "unexpected query");
            }
            (status, body)
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
