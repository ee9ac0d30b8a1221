//! Periodic roster report.
//!
//! Logs the peer count and allocation counters at `info`, and every record at
//! `debug`, until the shutdown flag flips.

use oc_peer_registry::PeerRegistryApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Run the report loop. Returns the number of reports emitted.
pub async fn roster_report(
    api: Arc<dyn PeerRegistryApi>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    ticker.tick().await;

    let mut reports = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                log_roster(api.as_ref());
                reports += 1;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    debug!(reports, "Roster report stopped");
    reports
}

fn log_roster(api: &dyn PeerRegistryApi) {
    let stats = api.stats();
    info!(
        peers = stats.peers,
        addresses_allocated = stats.addresses_allocated,
        addresses_remaining = stats.addresses_remaining,
        "Roster report"
    );
    for peer in api.peers() {
        debug!(
            node_id = %peer.node_id,
            endpoint = %peer.endpoint,
            virtual_ip = %peer.virtual_ip,
            "Peer"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_peer_registry::{JoinRequest, RegistryConfig, RegistryService};
    use std::net::{IpAddr, Ipv4Addr};

    fn api() -> Arc<dyn PeerRegistryApi> {
        let service = RegistryService::new(RegistryConfig::default()).unwrap();
        service
            .join(
                JoinRequest::new("A", "k", 1),
                IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            )
            .unwrap();
        Arc::new(service)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_on_each_period_until_shutdown() {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(roster_report(api(), Duration::from_secs(5), rx));

        tokio::time::sleep(Duration::from_secs(16)).await;
        tx.send(true).unwrap();

        assert_eq!(task.await.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_sender_dropped() {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(roster_report(api(), Duration::from_secs(60), rx));
        drop(tx);
        assert_eq!(task.await.unwrap(), 0);
    }
}
