use anyhow::Result;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// Minimal actor trait. `Self: Sized` avoids object-safety issues when using `Context<Self>`.
#[async_trait::async_trait]
pub trait Actor: Send + Sized + 'static {
    type Msg: Send + 'static;

    /// Handle a single message. Return `Err` to stop the actor.
    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()>;

    /// Called once after the loop exits, whatever the reason.
    async fn stopped(&mut self) {}
}

/// Runtime context for an actor instance.
pub struct Context<A: Actor> {
    addr: Addr<A>,
    cancel: CancellationToken,
    stop: bool,
}

impl<A: Actor> Context<A> {
    pub fn addr(&self) -> Addr<A> {
        self.addr.clone()
    }

    /// Token shared with every task the actor spawns; cancelled on shutdown.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request a graceful stop after processing the current message.
    pub fn stop(&mut self) {
        self.stop = true;
    }
}

/// Address for sending messages to an actor.
pub struct Addr<A: Actor>(mpsc::Sender<A::Msg>);

impl<A: Actor> Clone for Addr<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Actor> Addr<A> {
    /// Async send; awaits backpressure. Returns the message if the actor is gone.
    pub async fn send(&self, msg: A::Msg) -> std::result::Result<(), A::Msg> {
        self.0.send(msg).await.map_err(|e| e.0)
    }

    /// Try to send without waiting. Returns the message if the mailbox is full or closed.
    pub fn try_send(&self, msg: A::Msg) -> std::result::Result<(), A::Msg> {
        self.0.try_send(msg).map_err(|e| e.into_inner())
    }

    /// Blocking send for use outside the runtime, e.g. a terminal input thread.
    ///
    /// Panics if called from within an async context.
    pub fn blocking_send(&self, msg: A::Msg) -> std::result::Result<(), A::Msg> {
        self.0.blocking_send(msg).map_err(|e| e.0)
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

/// Handle to a running actor task.
pub struct ActorHandle<A: Actor> {
    pub addr: Addr<A>,
    pub task: JoinHandle<Result<()>>,
}

/// Spawn an actor with a bounded mailbox.
///
/// The loop ends when `handle` returns `Err`, `ctx.stop()` is called, every
/// `Addr` is dropped, or `cancel` fires.
///
/// ```
/// # use anyhow::Result;
/// # use async_trait::async_trait;
/// # use claimcheck_runtime::actor::{self, Actor, Context};
/// # use tokio_util::sync::CancellationToken;
/// # struct Accumulator(u8);
/// # #[async_trait]
/// # impl Actor for Accumulator {
/// #     type Msg = u8;
/// #     async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
/// #         self.0 += msg;
/// #         if self.0 >= 5 {
/// #             ctx.stop();
/// #         }
/// #         Ok(())
/// #     }
/// # }
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let actor::ActorHandle { addr, task } =
///         actor::spawn_actor(Accumulator(0), 8, CancellationToken::new());
///     addr.send(2).await.unwrap();
///     addr.send(3).await.unwrap();
///     drop(addr);
///     task.await.unwrap().unwrap();
/// });
/// ```
pub fn spawn_actor<A: Actor>(
    mut actor: A,
    capacity: usize,
    cancel: CancellationToken,
) -> ActorHandle<A> {
    let (tx, mut rx) = mpsc::channel::<A::Msg>(capacity);
    let addr = Addr(tx);
    let mut ctx = Context {
        addr: addr.clone(),
        cancel: cancel.clone(),
        stop: false,
    };

    let task = tokio::spawn(async move {
        let outcome = loop {
            tokio::select! {
                _ = cancel.cancelled() => break Ok(()),
                maybe_msg = rx.recv() => {
                    let Some(msg) = maybe_msg else { break Ok(()) };
                    if let Err(e) = actor.handle(msg, &mut ctx).await {
                        tracing::error!(target: "claimcheck-actors", error = ?e, "actor returned error; stopping");
                        break Err(e);
                    }
                    if ctx.stop {
                        break Ok(());
                    }
                }
            }
        };
        actor.stopped().await;
        outcome
    });

    ActorHandle { addr, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    struct Counter {
        seen: Arc<AtomicU32>,
        stopped: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl Actor for Counter {
        type Msg = u32;

        async fn handle(&mut self, msg: u32, ctx: &mut Context<Self>) -> Result<()> {
            if msg == 0 {
                anyhow::bail!("zero is not allowed");
            }
            let total = self.seen.fetch_add(msg, Ordering::SeqCst) + msg;
            if total >= 10 {
                ctx.stop();
            }
            Ok(())
        }

        async fn stopped(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    fn counter() -> (Counter, Arc<AtomicU32>, Arc<AtomicBool>) {
        let seen = Arc::new(AtomicU32::new(0));
        let stopped = Arc::new(AtomicBool::new(false));
        (
            Counter {
                seen: seen.clone(),
                stopped: stopped.clone(),
            },
            seen,
            stopped,
        )
    }

    #[tokio::test]
    async fn stops_when_asked() {
        let (actor, seen, stopped) = counter();
        let ActorHandle { addr, task } = spawn_actor(actor, 4, CancellationToken::new());
        addr.send(4).await.unwrap();
        addr.send(6).await.unwrap();
        task.await.unwrap().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 10);
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn handler_error_stops_with_err() {
        let (actor, _, stopped) = counter();
        let ActorHandle { addr, task } = spawn_actor(actor, 4, CancellationToken::new());
        addr.send(0).await.unwrap();
        assert!(task.await.unwrap().is_err());
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancellation_ends_the_loop() {
        let (actor, _, stopped) = counter();
        let cancel = CancellationToken::new();
        let ActorHandle { addr, task } = spawn_actor(actor, 4, cancel.clone());
        cancel.cancel();
        task.await.unwrap().unwrap();
        assert!(stopped.load(Ordering::SeqCst));
        assert!(addr.is_closed());
    }
}
