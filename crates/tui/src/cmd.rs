//! Effect execution: turns [`Effect`]s into background tasks whose results
//! come back to the event loop as [`Outcome`]s.

use std::sync::Arc;

use groundwork_api::ApiError;
use groundwork_engine::ProspectGateway;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{Effect, Outcome};

/// Spawn one task per effect.
///
/// Every handle resolves to an [`Outcome`]: when the request task panics or
/// is cancelled, the outcome carries [`ApiError::Interrupted`] so the screen
/// that issued the effect leaves its busy state.
pub fn spawn_effects(effects: Vec<Effect>, gateway: &Arc<dyn ProspectGateway>) -> Vec<JoinHandle<Outcome>> {
    effects
        .into_iter()
        .map(|effect| {
            let gateway = Arc::clone(gateway);
            let interrupted = failure_for(&effect);
            tokio::spawn(async move {
                let request = tokio::spawn(async move { run_effect(effect, gateway.as_ref()).await });
                match request.await {
                    Ok(outcome) => outcome,
                    Err(error) => {
                        warn!(%error, "effect task failed");
                        interrupted(ApiError::Interrupted(error.to_string()))
                    }
                }
            })
        })
        .collect()
}

pub async fn run_effect(effect: Effect, gateway: &dyn ProspectGateway) -> Outcome {
    debug!(?effect, "running effect");
    match effect {
        Effect::Submit { form, submission } => Outcome::Submitted {
            form,
            result: submission.dispatch(gateway).await,
        },
        Effect::LoadProspect { form, id } => Outcome::Loaded {
            form,
            result: gateway.fetch(&id).await,
        },
        Effect::ListProspects => Outcome::Listed(gateway.list().await),
        Effect::DeleteProspect(id) => Outcome::Deleted(gateway.delete(&id).await),
    }
}

/// The failed [`Outcome`] matching `effect`, for when its task never returns one.
fn failure_for(effect: &Effect) -> Box<dyn FnOnce(ApiError) -> Outcome + Send> {
    match *effect {
        Effect::Submit { form, .. } => Box::new(move |error| Outcome::Submitted { form, result: Err(error) }),
        Effect::LoadProspect { form, .. } => Box::new(move |error| Outcome::Loaded { form, result: Err(error) }),
        Effect::ListProspects => Box::new(|error| Outcome::Listed(Err(error))),
        Effect::DeleteProspect(_) => Box::new(|error| Outcome::Deleted(Err(error))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use groundwork_engine::Submission;
    use groundwork_types::ProspectId;
    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct LoggingGateway {
        calls: Mutex<Vec<String>>,
    }

    impl LoggingGateway {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ProspectGateway for LoggingGateway {
        async fn submit_contact(&self, _payload: &Value) -> Result<(), ApiError> {
            self.log("contact".into());
            Ok(())
        }
        async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
            self.log("create".into());
            Ok(payload.clone())
        }
        async fn update(&self, id: &ProspectId, payload: &Value) -> Result<Value, ApiError> {
            self.log(format!("update {id}"));
            Ok(payload.clone())
        }
        async fn fetch(&self, id: &ProspectId) -> Result<Value, ApiError> {
            self.log(format!("fetch {id}"));
            Ok(json!({"name": "Jane"}))
        }
        async fn list(&self) -> Result<Vec<Value>, ApiError> {
            self.log("list".into());
            Ok(vec![json!({"_id": "p1"})])
        }
        async fn delete(&self, id: &ProspectId) -> Result<(), ApiError> {
            self.log(format!("delete {id}"));
            Err(ApiError::Status {
                status: 404,
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn effects_map_to_gateway_calls() {
        let gateway = LoggingGateway::default();
        let id = ProspectId::new("p1");

        let submit = Effect::Submit {
            form: 3,
            submission: Submission::Update(id.clone(), json!({})),
        };
        let outcome = run_effect(submit, &gateway).await;
        assert!(matches!(outcome, Outcome::Submitted { form: 3, result: Ok(()) }));
        let load = Effect::LoadProspect { form: 4, id: id.clone() };
        assert!(matches!(run_effect(load, &gateway).await, Outcome::Loaded { form: 4, result: Ok(_) }));
        assert!(matches!(run_effect(Effect::ListProspects, &gateway).await, Outcome::Listed(Ok(rows)) if rows.len() == 1));
        assert!(matches!(run_effect(Effect::DeleteProspect(id), &gateway).await, Outcome::Deleted(Err(_))));

        assert_eq!(*gateway.calls.lock().unwrap(), ["update p1", "fetch p1", "list", "delete p1"]);
    }

    #[tokio::test]
    async fn spawned_effects_report_back() {
        let gateway: Arc<dyn ProspectGateway> = Arc::new(LoggingGateway::default());
        let handles = spawn_effects(vec![Effect::ListProspects], &gateway);
        assert_eq!(handles.len(), 1);
        for handle in handles {
            assert!(matches!(handle.await.unwrap(), Outcome::Listed(Ok(_))));
        }
    }

    struct PanickingGateway;

    #[async_trait]
    impl ProspectGateway for PanickingGateway {
        async fn submit_contact(&self, _payload: &Value) -> Result<(), ApiError> {
            panic!("gateway exploded")
        }
        async fn create(&self, _payload: &Value) -> Result<Value, ApiError> {
            panic!("gateway exploded")
        }
        async fn update(&self, _id: &ProspectId, _payload: &Value) -> Result<Value, ApiError> {
            panic!("gateway exploded")
        }
        async fn fetch(&self, _id: &ProspectId) -> Result<Value, ApiError> {
            panic!("gateway exploded")
        }
        async fn list(&self) -> Result<Vec<Value>, ApiError> {
            panic!("gateway exploded")
        }
        async fn delete(&self, _id: &ProspectId) -> Result<(), ApiError> {
            panic!("gateway exploded")
        }
    }

    #[tokio::test]
    async fn panicked_effects_still_report_a_failure() {
        let gateway: Arc<dyn ProspectGateway> = Arc::new(PanickingGateway);
        let effects = vec![
            Effect::Submit {
                form: 9,
                submission: Submission::Contact(json!({})),
            },
            Effect::LoadProspect {
                form: 9,
                id: ProspectId::new("p1"),
            },
            Effect::ListProspects,
        ];
        let mut outcomes = Vec::new();
        for handle in spawn_effects(effects, &gateway) {
            outcomes.push(handle.await.unwrap());
        }

        assert!(matches!(
            outcomes.as_slice(),
            [
                Outcome::Submitted { form: 9, result: Err(ApiError::Interrupted(_)) },
                Outcome::Loaded { form: 9, result: Err(ApiError::Interrupted(_)) },
                Outcome::Listed(Err(ApiError::Interrupted(_))),
            ]
        ));
    }
}
