use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use super::{
    bus::EventBus,
    events::GameEvent,
    handler::{EventError, GameEventHandler},
};

/// Attempts after the first before a retryable failure is given up on
const MAX_RETRIES: u32 = 3;
const HANDLER_TIMEOUT: Duration = Duration::from_secs(10);

/// Routes one game's events to a handler
pub struct GameSubscription {
    game_id: String,
    handler: Arc<dyn GameEventHandler>,
    event_bus: EventBus,
}

impl GameSubscription {
    pub fn new(game_id: String, handler: Arc<dyn GameEventHandler>, event_bus: EventBus) -> Self {
        Self {
            game_id,
            handler,
            event_bus,
        }
    }

    /// Subscribes immediately, then spawns a task feeding events to the
    /// handler until the game's channel closes
    pub async fn start(self) -> JoinHandle<()> {
        let game_id = self.game_id.clone();
        let handler_name = self.handler.handler_name();

        info!(
            game_id = %game_id,
            handler = handler_name,
            "Starting game subscription"
        );

        let mut receiver = self.event_bus.subscribe(&game_id).await;

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(
                            game_id = %game_id,
                            handler = handler_name,
                            missed = missed,
                            "Subscriber fell behind, events dropped"
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                // Failures are logged inside; the next event still gets handled
                let _ = handle_with_retry(self.handler.as_ref(), &game_id, event).await;
            }

            info!(
                game_id = %game_id,
                handler = handler_name,
                "Game subscription ended - no more events"
            );
        })
    }
}

/// Runs the handler on one event, retrying retryable failures and timeouts
/// with exponential backoff
async fn handle_with_retry(
    handler: &dyn GameEventHandler,
    game_id: &str,
    event: GameEvent,
) -> Result<(), EventError> {
    let handler_name = handler.handler_name();
    let event_type = event.event_type();

    for attempt in 0..=MAX_RETRIES {
        let handling = handler.handle_game_event(game_id, event.clone());
        let result = match timeout(HANDLER_TIMEOUT, handling).await {
            Ok(result) => result,
            Err(_elapsed) => Err(EventError::Timeout),
        };

        match result {
            Ok(()) => {
                if attempt > 0 {
                    info!(
                        game_id = %game_id,
                        handler = handler_name,
                        event_type = event_type,
                        attempt = attempt + 1,
                        "Handler succeeded after retry"
                    );
                }
                return Ok(());
            }
            Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                warn!(
                    game_id = %game_id,
                    handler = handler_name,
                    event_type = event_type,
                    attempt = attempt + 1,
                    error = %e,
                    "Handler failed, will retry"
                );
                sleep(Duration::from_millis(100 * 2_u64.pow(attempt))).await;
            }
            Err(e) => {
                error!(
                    game_id = %game_id,
                    handler = handler_name,
                    event_type = event_type,
                    attempt = attempt + 1,
                    error = %e,
                    "Handler failed permanently"
                );
                return Err(e);
            }
        }
    }

    Err(EventError::Timeout)
}
