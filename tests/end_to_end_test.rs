mod common;

use anyhow::Result;
use common::{names, spawn_server};
use shuffle_lunch::app::{compute_api, edge_api};
use shuffle_lunch::domain::model::parse_participants;
use shuffle_lunch::{
    ForwardingProxy, GroupingRequest, HttpShuffleBackend, RandomSource, ShuffleApiClient,
    ShuffleError, ShuffleService,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::assert_ok;

async fn start_stack(random: RandomSource) -> Result<String> {
    let compute_url = spawn_server(compute_api::build_router(ShuffleService::new(random))).await;
    let backend = HttpShuffleBackend::new(&compute_url, Duration::from_secs(5))?;
    let proxy = ForwardingProxy::new(Arc::new(backend));
    Ok(spawn_server(edge_api::build_router(proxy, None)).await)
}

#[tokio::test]
async fn test_text_area_input_through_both_hops() -> Result<()> {
    let edge_url = start_stack(RandomSource::Entropy).await?;
    let client = ShuffleApiClient::new(&edge_url, Duration::from_secs(5))?;

    let participants = parse_participants("Alice\n\nBob\n  \nCharlie\nDave");
    assert_eq!(participants, names(&["Alice", "Bob", "Charlie", "Dave"]));

    let result = assert_ok!(client.shuffle(&GroupingRequest::by_size(participants, 2)).await);

    assert_eq!(result.groups.len(), 2);
    let mut members: Vec<String> = result.groups.into_iter().flatten().collect();
    members.sort();
    assert_eq!(members, names(&["Alice", "Bob", "Charlie", "Dave"]));
    Ok(())
}

#[tokio::test]
async fn test_validation_message_reaches_client() -> Result<()> {
    let edge_url = start_stack(RandomSource::Entropy).await?;
    let client = ShuffleApiClient::new(&edge_url, Duration::from_secs(5))?;

    let err = client
        .shuffle(&GroupingRequest::by_count(
            names(&["Alice", "Bob", "Charlie", "Dave", "Eve"]),
            6,
        ))
        .await
        .unwrap_err();

    match err {
        ShuffleError::Upstream { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "num_groups must be between 1 and 5");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_fixed_seed_is_reproducible_end_to_end() -> Result<()> {
    let edge_url = start_stack(RandomSource::Seeded(77)).await?;
    let client = ShuffleApiClient::new(&edge_url, Duration::from_secs(5))?;
    let request = GroupingRequest::by_count(
        names(&["Alice", "Bob", "Charlie", "Dave", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack"]),
        3,
    );

    let first = client.shuffle(&request).await?;
    let second = client.shuffle(&request).await?;

    assert_eq!(first, second);
    let mut sizes: Vec<usize> = first.groups.iter().map(Vec::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3, 4]);
    Ok(())
}

#[tokio::test]
async fn test_compute_service_down() -> Result<()> {
    let backend = HttpShuffleBackend::new("http://127.0.0.1:1", Duration::from_secs(2))?;
    let edge_url =
        spawn_server(edge_api::build_router(ForwardingProxy::new(Arc::new(backend)), None)).await;
    let client = ShuffleApiClient::new(&edge_url, Duration::from_secs(5))?;

    let err = client
        .shuffle(&GroupingRequest::by_size(
            names(&["Alice", "Bob", "Charlie", "Dave"]),
            2,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ShuffleError::Upstream { status: 500, .. }));
    assert_eq!(err.user_friendly_message(), "failed to reach shuffle service");
    Ok(())
}
