use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use misguard_core::{AnalysisResult, BackendClient};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Receive commands from the UI and run each request on its own task, so a
/// slow analyze call never delays the next health probe.
pub async fn run_listener(
    client: BackendClient,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let client = client.clone();
        let tx = event_tx.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                event = execute(&client, cmd) => {
                    let _ = tx.send(event);
                }
            }
        });
    }
    tracing::debug!("backend listener stopped");
}

async fn execute(client: &BackendClient, cmd: BackendCommand) -> BackendEvent {
    match cmd {
        BackendCommand::Probe { base_url } => {
            let connected = client.probe(&base_url).await;
            BackendEvent::StatusProbed {
                base_url,
                connected,
            }
        }
        BackendCommand::Analyze {
            generation,
            base_url,
            request,
        } => {
            let result = match client.analyze(&base_url, &request).await {
                Ok(report) => AnalysisResult::Success(report),
                Err(e) => {
                    tracing::warn!(generation, url = %base_url, error = %e, "analyze request failed");
                    AnalysisResult::failure()
                }
            };
            BackendEvent::AnalysisFinished { generation, result }
        }
    }
}
