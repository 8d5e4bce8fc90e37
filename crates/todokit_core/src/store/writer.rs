//! Background persistence writer.
//!
//! # Responsibility
//! - Move gateway writes off the mutation path.
//! - Keep persisted state converging on the newest in-memory snapshot.
//!
//! # Invariants
//! - Queued snapshots are coalesced latest-wins before each write, so two
//!   overlapping writes can never settle out of mutation order.
//! - Write failures are logged and never surfaced to the mutation path.
//! - Dropping the writer drains the queue before the thread exits.

use crate::storage::{PersistenceGateway, TASKS_KEY};
use log::{debug, error};
use std::sync::mpsc::{Receiver, Sender, SyncSender, TryRecvError};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

enum Command {
    Persist(String),
    Flush(SyncSender<()>),
}

pub(crate) struct PersistWriter {
    gateway: Arc<dyn PersistenceGateway>,
    tx: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistWriter {
    pub(crate) fn spawn(gateway: Arc<dyn PersistenceGateway>) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_gateway = Arc::clone(&gateway);
        let spawned = std::thread::Builder::new()
            .name("todokit-persist".to_string())
            .spawn(move || run(&*worker_gateway, &rx));

        match spawned {
            Ok(handle) => Self {
                gateway,
                tx: Some(tx),
                handle: Some(handle),
            },
            Err(err) => {
                // No worker thread available; fall back to inline writes so
                // mutations still persist, just on the caller's thread.
                error!(
                    "event=writer_spawn module=store status=error error_code=thread_spawn_failed error={err}"
                );
                Self {
                    gateway,
                    tx: None,
                    handle: None,
                }
            }
        }
    }

    /// Hands one serialized task-list snapshot to the writer.
    pub(crate) fn enqueue(&self, blob: String) {
        let blob = match &self.tx {
            Some(tx) => match tx.send(Command::Persist(blob)) {
                Ok(()) => return,
                // Worker gone (panicked); reclaim the snapshot and write
                // inline so the mutation still persists.
                Err(mpsc::SendError(Command::Persist(blob))) => blob,
                Err(_) => return,
            },
            None => blob,
        };
        write_blob(&*self.gateway, &blob);
    }

    /// Blocks until every snapshot enqueued so far has settled.
    pub(crate) fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::sync_channel(0);
        if tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for PersistWriter {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain remaining snapshots
        // and exit; joining bounds shutdown on the final write.
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(gateway: &dyn PersistenceGateway, rx: &Receiver<Command>) {
    while let Ok(command) = rx.recv() {
        let mut pending_blob = None;
        let mut pending_acks = Vec::new();
        collect(command, &mut pending_blob, &mut pending_acks);

        // Coalesce whatever has queued up behind the first command.
        loop {
            match rx.try_recv() {
                Ok(command) => collect(command, &mut pending_blob, &mut pending_acks),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if let Some(blob) = pending_blob {
            write_blob(gateway, &blob);
        }
        for ack in pending_acks {
            let _ = ack.send(());
        }
    }
}

fn collect(command: Command, blob: &mut Option<String>, acks: &mut Vec<SyncSender<()>>) {
    match command {
        Command::Persist(snapshot) => *blob = Some(snapshot),
        Command::Flush(ack) => acks.push(ack),
    }
}

fn write_blob(gateway: &dyn PersistenceGateway, blob: &str) {
    match gateway.write(TASKS_KEY, blob) {
        Ok(()) => {
            debug!(
                "event=tasks_persist module=store status=ok bytes={}",
                blob.len()
            );
        }
        Err(err) => {
            // In-memory state is not rolled back; the divergence is only
            // visible after a restart that reads the stale blob.
            error!(
                "event=tasks_persist module=store status=error error_code=write_failed error={err}"
            );
        }
    }
}
