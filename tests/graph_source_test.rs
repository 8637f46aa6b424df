use nci::data::{DataSource, GraphSource, UNKNOWN_BOROUGH};
use nci::{Dashboard, NciError, Visualization, RenderedChart};
use nci_graph::{MemoryClient, Session};
use std::sync::Arc;
use std::time::Duration;

fn complaint_graph() -> MemoryClient {
    MemoryClient::new()
        .with_complaint("10001", "Noise", 120)
        .with_complaint("10001", "Illegal Parking", 45)
        .with_complaint("11201", "Heat", 30)
        .with_complaint("10451", "Noise", 12)
        .with_borough("10001", "MANHATTAN")
        .with_borough("11201", "BROOKLYN")
}

async fn open(client: Arc<MemoryClient>) -> Arc<Session> {
    Arc::new(Session::open(client, Duration::from_secs(2)).await.unwrap())
}

#[tokio::test]
async fn test_graph_backed_dashboard() {
    let session = open(Arc::new(complaint_graph())).await;
    let dashboard = Dashboard::new(Box::new(GraphSource::new(session.clone())))
        .with_graph(session);

    assert_eq!(dashboard.zip_codes().await.unwrap(), vec!["10001", "10451", "11201"]);

    let records = dashboard.records("10451").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].borough, UNKNOWN_BOROUGH);

    let edges = dashboard.edges("10001").await.unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].target, "Noise");
    assert_eq!(edges[0].weight, 120);

    match dashboard.chart("10001", Visualization::TopBoroughsOverall).await.unwrap() {
        RenderedChart::Bar { bars, .. } => {
            assert_eq!(bars[0].label, "MANHATTAN");
            assert_eq!(bars[0].count, 2);
        }
        other => panic!("unexpected chart: {other:?}"),
    }
}

#[tokio::test]
async fn test_zip_without_edges_gives_root_only_graph() {
    let session = open(Arc::new(complaint_graph())).await;
    let dashboard = Dashboard::new(Box::new(GraphSource::new(session.clone())))
        .with_graph(session);

    let graph = dashboard.graph("10003").await.unwrap();
    assert!(graph.links.is_empty());
    assert_eq!(graph.nodes.len(), 1);
}

#[tokio::test]
async fn test_unreachable_store_is_fatal() {
    let client = Arc::new(MemoryClient::unreachable());
    let err = Session::open(client.clone(), Duration::from_secs(1)).await.unwrap_err();
    let err: NciError = err.into();
    assert!(matches!(err, NciError::GraphStoreUnavailable(_)));
    assert!(client.is_closed());
}

#[tokio::test]
async fn test_session_released_with_dashboard() {
    let client = Arc::new(complaint_graph());
    {
        let session = open(client.clone()).await;
        let source = GraphSource::new(session.clone());
        assert_eq!(source.load().await.unwrap().len(), 4);
        let dashboard = Dashboard::new(Box::new(source)).with_graph(session);
        assert!(dashboard.has_graph());
    }
    assert!(client.is_closed());
}
