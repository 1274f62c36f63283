//! Producer tasks feeding the actor queue.
//!
//! Both tasks only hold a [`WeakSender`]: they never keep the actor alive.

use std::time::Duration;

use log::trace;
use tokio::sync::mpsc::WeakSender;
use tokio::sync::{oneshot, watch};
use tokio::time;

use crate::actor::EngineMsg;

/// Send `Gravity` every period until the period becomes `None` or the actor is gone.
///
/// A new period restarts the wait.
pub(crate) async fn gravity_loop(
    tx: WeakSender<EngineMsg>,
    mut period: watch::Receiver<Option<Duration>>,
) {
    loop {
        let current = *period.borrow_and_update();
        let Some(interval) = current else {
            trace!("gravity stopped");
            return;
        };

        tokio::select! {
            changed = period.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            _ = time::sleep(interval) => {
                let Some(sender) = tx.upgrade() else {
                    return;
                };
                if sender.send(EngineMsg::Gravity).await.is_err() {
                    return;
                }
            }
        }
    }
}

/// Drop piece `piece_id` one row per step until the actor answers `false`.
pub(crate) async fn hard_drop(tx: WeakSender<EngineMsg>, piece_id: u32, step: Duration) {
    loop {
        let Some(sender) = tx.upgrade() else {
            return;
        };
        let (reply, answer) = oneshot::channel();
        if sender
            .send(EngineMsg::HardDropStep { piece_id, reply })
            .await
            .is_err()
        {
            return;
        }
        drop(sender);

        match answer.await {
            Ok(true) => time::sleep(step).await,
            _ => {
                trace!("hard drop of piece {piece_id} done");
                return;
            }
        }
    }
}
