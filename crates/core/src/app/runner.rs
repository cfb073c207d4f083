use tracing::debug;

use crate::client::Backend;

use super::{AppState, Effect, Msg};

/// Runs one network effect and returns the message that answers it.
///
/// `Effect::OpenLink` depends on the front end and yields `None`.
pub async fn execute(backend: &dyn Backend, effect: Effect) -> Option<Msg> {
    match effect {
        Effect::Analyze {
            request_id,
            request,
        } => Some(Msg::AnalysisFinished {
            request_id,
            result: backend.analyze(&request).await,
        }),
        Effect::FetchHistory => Some(match backend.history().await {
            Ok(history) => Msg::HistoryLoaded(history),
            Err(err) => Msg::HistoryFailed(err),
        }),
        Effect::CheckHealth => Some(Msg::HealthChecked(backend.health().await)),
        Effect::OpenLink(_) => None,
    }
}

/// Applies `msg` and keeps executing the resulting effects one at a time
/// until none are left. Effects `execute` cannot handle are returned.
pub async fn drive(state: &mut AppState, backend: &dyn Backend, msg: Msg) -> Vec<Effect> {
    let mut pending = state.update(msg);
    let mut unhandled = Vec::new();

    while !pending.is_empty() {
        let effect = pending.remove(0);
        debug!("executing {:?}", effect);
        match execute(backend, effect.clone()).await {
            Some(reply) => pending.extend(state.update(reply)),
            None => unhandled.push(effect),
        }
    }

    unhandled
}
