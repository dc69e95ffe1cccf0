// End-to-end probing against loopback endpoints
//
// Drives the real TCP and HTTP strategies through NetTest and checks what
// ends up in the per-site statistics.

use std::time::Duration;

use netprobe_integration_tests::{closed_port, init_tracing, HttpEndpoint, TcpEndpoint, TestResult};
use netprobe_sdk::{NetTest, ProbeConfig, ProbeKind, Target, FAILED_ELAPSED_MS};

fn config(interval_ms: u64) -> ProbeConfig {
    ProbeConfig {
        interval_ms,
        timeout_ms: 2_000,
        ..Default::default()
    }
}

async fn eventually(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}

/// Connect/disconnect against a live listener records a sample
#[tokio::test]
async fn tcp_probe_records_sample() -> TestResult<()> {
    init_tracing();
    let endpoint = TcpEndpoint::spawn().await?;
    let net_test = NetTest::new(config(1_000))?;
    let site = net_test.add_site(Target::connect("127.0.0.1", endpoint.port()))?;
    assert_eq!(site.probe_kind(), ProbeKind::Tcp);

    let stats = net_test.test_site(&site).await;
    assert!(!stats.last_failed(), "probe to {} failed", endpoint.addr());
    assert_eq!(stats.count, 1);
    assert!(stats.average >= 0.0);
    assert!(eventually(|| endpoint.accepted() == 1).await);
    Ok(())
}

/// A refused connection is recorded as -1 and leaves the buffer empty
#[tokio::test]
async fn refused_port_is_failure() -> TestResult<()> {
    init_tracing();
    let port = closed_port().await?;
    let net_test = NetTest::new(config(1_000))?;
    let site = net_test.add_site(Target::connect("127.0.0.1", port))?;

    let stats = net_test.test_site(&site).await;
    assert_eq!(stats.last_elapsed_ms, FAILED_ELAPSED_MS);
    assert_eq!(stats.count, 0);
    assert_eq!(stats.attempts, 1);
    Ok(())
}

/// HTTP 500 after a good response keeps the earlier sample untouched
#[tokio::test]
async fn http_500_keeps_buffer() -> TestResult<()> {
    init_tracing();
    let endpoint = HttpEndpoint::spawn(200).await?;
    let net_test = NetTest::new(config(1_000))?;
    let site = net_test.add_site(Target::l7(endpoint.url("/health")))?;
    assert_eq!(site.probe_kind(), ProbeKind::Http);

    let ok = net_test.test_site(&site).await;
    assert!(!ok.last_failed());
    assert_eq!(ok.count, 1);
    let window = site.samples();

    endpoint.set_status(500);
    let failed = net_test.test_site(&site).await;
    assert_eq!(failed.last_elapsed_ms, FAILED_ELAPSED_MS);
    assert_eq!(failed.count, 1);
    assert_eq!(failed.average, ok.average);
    assert_eq!(site.samples(), window);
    assert_eq!(endpoint.requests(), 2);
    Ok(())
}

/// Background loop keeps sampling both strategies until stopped
#[tokio::test]
async fn background_loop_against_loopback() -> TestResult<()> {
    init_tracing();
    let tcp = TcpEndpoint::spawn().await?;
    let http = HttpEndpoint::spawn(200).await?;
    let dead = closed_port().await?;

    let net_test = NetTest::new(config(20))?;
    let tcp_site = net_test.add_site(Target::connect("127.0.0.1", tcp.port()).with_samples(3))?;
    let http_site = net_test.add_site(Target::l7(http.url("/")).with_samples(3))?;
    let dead_site = net_test.add_site(Target::connect("127.0.0.1", dead))?;

    assert!(net_test.start()?);
    assert!(eventually(|| tcp_site.stats().count == 3 && http_site.stats().count == 3).await);
    assert!(net_test.stop().await);
    assert!(!net_test.is_running());

    assert!(dead_site.stats().attempts >= 2);
    assert!(dead_site.stats().last_failed());

    let ranked = net_test.sorted_sites();
    assert_eq!(ranked.last().map(|s| s.id()), Some(dead_site.id()));

    let text = netprobe_telemetry::dump_prometheus();
    assert!(text.contains("netprobe_probes_total"));
    assert!(text.contains("netprobe_cycles_total"));

    net_test.dispose();
    Ok(())
}
