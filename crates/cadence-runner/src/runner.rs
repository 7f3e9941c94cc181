//! Session runner task

use cadence_api::{Command, Event, EventPayload, SessionSnapshot};
use cadence_config::RunnerConfig;
use cadence_core::{CoreEvent, SessionEngine};
use cadence_util::Clock;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::{RunnerError, RunnerResult};

/// Buffered events per subscriber before it starts lagging
const EVENT_CAPACITY: usize = 100;

enum RunnerMessage {
    Command(Command),
    Shutdown,
}

/// Spawns session engines onto the tokio runtime
pub struct SessionRunner;

impl SessionRunner {
    /// Move an engine into its own task and start serving commands.
    ///
    /// Commands and ticks are handled one at a time in arrival order; a
    /// command that is queued when a tick is due goes first. The tick timer
    /// only runs while the engine has a countdown in progress.
    pub fn spawn<I, C>(engine: SessionEngine<I, C>, config: RunnerConfig) -> RunnerHandle
    where
        I: Send + 'static,
        C: Clock + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        let task = tokio::spawn(run(
            engine,
            config,
            command_rx,
            event_tx.clone(),
            snapshot_tx,
        ));

        RunnerHandle {
            commands: CommandSender { tx: command_tx },
            event_tx,
            snapshot_rx,
            task,
        }
    }
}

/// Cloneable sender for commands into a running session
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<RunnerMessage>,
}

impl CommandSender {
    pub fn send(&self, command: Command) -> RunnerResult<()> {
        self.tx
            .send(RunnerMessage::Command(command))
            .map_err(|_| RunnerError::Closed)
    }
}

/// Handle to a spawned runner
pub struct RunnerHandle {
    commands: CommandSender,
    event_tx: broadcast::Sender<Event>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl RunnerHandle {
    /// Queue a command for the engine
    pub fn send(&self, command: Command) -> RunnerResult<()> {
        self.commands.send(command)
    }

    /// Get a sender that can be moved into other tasks
    pub fn commander(&self) -> CommandSender {
        self.commands.clone()
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Latest published snapshot (refreshed after every command and tick)
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch snapshots as they are published
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop any session in progress, emit `Shutdown` and wait for the task
    /// to finish.
    pub async fn shutdown(self) -> RunnerResult<()> {
        // A closed channel means the task already exited
        let _ = self.commands.tx.send(RunnerMessage::Shutdown);
        self.task.await?;
        Ok(())
    }
}

async fn run<I, C: Clock>(
    mut engine: SessionEngine<I, C>,
    config: RunnerConfig,
    mut command_rx: mpsc::UnboundedReceiver<RunnerMessage>,
    event_tx: broadcast::Sender<Event>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
) {
    let mut ticker = tokio::time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        tick_interval_ms = config.tick_interval.as_millis() as u64,
        "Session runner started"
    );

    loop {
        tokio::select! {
            biased;

            message = command_rx.recv() => {
                let command = match message {
                    Some(RunnerMessage::Command(command)) => command,
                    Some(RunnerMessage::Shutdown) | None => break,
                };

                debug!(command = ?command, "Command received");
                let was_ticking = engine.needs_tick();
                let events = engine.handle_command(command);
                publish(&engine, events, &event_tx, &snapshot_tx);

                if !was_ticking && engine.needs_tick() {
                    ticker.reset();
                }
            }

            _ = ticker.tick(), if engine.needs_tick() => {
                let events = engine.tick();
                publish(&engine, events, &event_tx, &snapshot_tx);
            }
        }
    }

    info!("Shutting down session runner");

    let events = engine.stop();
    publish(&engine, events, &event_tx, &snapshot_tx);
    let _ = event_tx.send(Event::new(EventPayload::Shutdown));

    info!("Session runner stopped");
}

fn publish<I, C: Clock>(
    engine: &SessionEngine<I, C>,
    events: Vec<CoreEvent>,
    event_tx: &broadcast::Sender<Event>,
    snapshot_tx: &watch::Sender<SessionSnapshot>,
) {
    for event in events {
        // No subscribers is fine
        let _ = event_tx.send(Event::new(event.into()));
    }
    snapshot_tx.send_replace(engine.snapshot());
}
