//! Coordination task implementation
//!
//! The task is the only owner of the held value. It moves through
//! `WaitingForFirstValue -> Serving -> Stopped`, and may jump straight from
//! waiting to stopped if the inbound channel closes before any put.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::messages::{CellPhase, GetRequest, PutRequest};

/// Phase shared between the task and the cell handle
#[derive(Debug, Clone)]
pub(crate) struct PhaseCell(Arc<AtomicU8>);

impl PhaseCell {
    pub(crate) fn new(phase: CellPhase) -> Self {
        Self(Arc::new(AtomicU8::new(phase.as_u8())))
    }

    pub(crate) fn load(&self) -> CellPhase {
        CellPhase::from_u8(self.0.load(Ordering::Acquire))
    }

    fn store(&self, phase: CellPhase) {
        debug!(%phase, "PhaseCell::store: called");
        self.0.store(phase.as_u8(), Ordering::Release);
    }
}

/// Run the coordination task until the inbound channel closes
///
/// Reads that arrive before the first value stay queued on `get_rx`; they
/// are answered once serving starts, or failed when the task exits.
pub(crate) async fn run<T>(
    mut put_rx: mpsc::Receiver<PutRequest<T>>,
    mut get_rx: mpsc::Receiver<GetRequest<T>>,
    phase: PhaseCell,
) where
    T: Clone + Send + 'static,
{
    info!("Latest coordination task started");
    phase.store(CellPhase::WaitingForFirstValue);

    if let Some(PutRequest { value, ack }) = put_rx.recv().await {
        debug!("run: received first value");
        phase.store(CellPhase::Serving);
        let _ = ack.send(());
        serve(value, &mut put_rx, &mut get_rx).await;
    } else {
        debug!("run: inbound closed before first value");
    }

    // Dropping the receivers fails every queued put and get
    drop(get_rx);
    drop(put_rx);
    phase.store(CellPhase::Stopped);
    info!("Latest coordination task stopped");
}

/// Serving loop
///
/// Accepting a fresher value and answering a read with the current one race
/// each other; `select!` picks among ready branches at random.
async fn serve<T>(mut current: T, put_rx: &mut mpsc::Receiver<PutRequest<T>>, get_rx: &mut mpsc::Receiver<GetRequest<T>>)
where
    T: Clone + Send + 'static,
{
    let mut puts: u64 = 1;
    let mut gets: u64 = 0;

    loop {
        tokio::select! {
            req = put_rx.recv() => match req {
                Some(PutRequest { value, ack }) => {
                    current = value;
                    puts += 1;
                    // A cancelled put still counts; the value is already in place
                    let _ = ack.send(());
                }
                None => {
                    debug!("serve: inbound closed");
                    break;
                }
            },
            req = get_rx.recv() => match req {
                Some(GetRequest { reply }) => {
                    gets += 1;
                    let _ = reply.send(current.clone());
                }
                None => {
                    debug!("serve: outbound closed");
                    break;
                }
            },
        }
    }

    debug!(puts, gets, "serve: exiting");
}
