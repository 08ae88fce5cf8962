//! Single-writer actor for database mutations.
//!
//! SQLite allows one writer at a time; instead of letting concurrent
//! requests race for the write lock, every mutation is sent to one
//! background task that owns a dedicated connection and executes jobs
//! serially, each inside an `IMMEDIATE` transaction. A job therefore sees
//! a consistent snapshot for its read-check-then-write sequence, and its
//! effects commit or roll back as a unit.

use std::any::Any;
use std::sync::Arc;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::Result;

// A job takes the writer's connection and returns a type-erased result so
// jobs with different return types can share one channel.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection.
    ///
    /// The job runs inside an immediate transaction: returning `Err` rolls
    /// every statement of the job back, and the typed error is handed back
    /// to the caller unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns the background writer task and returns a handle to it.
///
/// The actor acquires a single connection from the pool and holds it for
/// its whole lifetime; it terminates when the last `WriteHandle` is
/// dropped.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> =
                conn.immediate_transaction::<_, crate::errors::Error, _>(|c| job(c));

            // Ignore error if the receiver has dropped (e.g., request cancelled).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
