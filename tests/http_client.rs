use std::net::SocketAddr;

use axum::Router;
use chatgto_client::api::{CASH_GAME, ClientError, HttpPracticeApi, PracticeApi};
use chatgto_client::model::AttemptRequest;
use chatgto_client::pages::training::FETCH_FAILED;
use chatgto_client::pages::{LandingPage, TrainingPage, TrainingState};
use chatgto_client::stub;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

async fn spawn_stub() -> anyhow::Result<(String, JoinHandle<()>)> {
    let app: Router = stub::router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    sleep(Duration::from_millis(25)).await;
    Ok((format!("http://{addr}/"), server))
}

async fn closed_port() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn training_flow_against_stub_backend() -> anyhow::Result<()> {
    let (base_url, server) = spawn_stub().await?;
    let api = HttpPracticeApi::new(base_url)?;
    assert!(!api.base_url().ends_with('/'));

    let mut landing = LandingPage::new();
    assert_eq!(landing.status(), "loading...");
    landing.load(&api).await;
    assert_eq!(landing.status(), "ok");

    let available = api.scenarios(CASH_GAME).await?;
    assert_eq!(available.len(), 4);

    let mut page = TrainingPage::new(ChaCha8Rng::seed_from_u64(21));
    page.load(&api).await;
    let scenario = page.scenario().cloned().expect("scenario ready");
    assert!(available.iter().any(|s| s.id == scenario.id));

    let correct = scenario
        .correct_action
        .as_ref()
        .map(|action| action.action.clone())
        .expect("stub scenarios carry a correct action");
    assert!(page.submit(&api, &correct).await);
    let feedback = page.feedback().expect("feedback held");
    assert!(feedback.is_correct);
    assert_eq!(feedback.ev_difference, 0.0);

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test]
async fn rejected_attempt_maps_to_status_error() -> anyhow::Result<()> {
    let (base_url, server) = spawn_stub().await?;
    let api = HttpPracticeApi::new(base_url)?;

    let err = api
        .submit_attempt(&AttemptRequest {
            scenario_id: "missing".to_string(),
            action: "Fold".to_string(),
        })
        .await
        .expect_err("unknown scenario");
    assert!(matches!(err, ClientError::Status(404)));

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_surfaces_errors() -> anyhow::Result<()> {
    let api = HttpPracticeApi::new(closed_port().await?)?;

    let err = api.health().await.expect_err("nothing listening");
    assert!(matches!(err, ClientError::Transport(_)));

    let mut landing = LandingPage::new();
    landing.load(&api).await;
    assert_eq!(landing.status(), "unavailable");

    let mut page = TrainingPage::new(ChaCha8Rng::seed_from_u64(3));
    page.load(&api).await;
    assert_eq!(page.state(), &TrainingState::Error(FETCH_FAILED.to_string()));
    Ok(())
}

#[tokio::test]
async fn malformed_body_collapses_to_page_error() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/v1/practice/scenarios/:category",
        axum::routing::get(|| async { "definitely not json" }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    sleep(Duration::from_millis(25)).await;

    let api = HttpPracticeApi::new(format!("http://{addr}"))?;
    let err = api.scenarios(CASH_GAME).await.expect_err("body is not json");
    assert!(matches!(err, ClientError::Decode(_)));

    let mut page = TrainingPage::new(ChaCha8Rng::seed_from_u64(4));
    page.load(&api).await;
    assert_eq!(page.state(), &TrainingState::Error(FETCH_FAILED.to_string()));

    server.abort();
    let _ = server.await;
    Ok(())
}
