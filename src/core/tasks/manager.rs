use std::sync::{
    mpsc,
    Arc,
};

use tokio::runtime::Runtime;
use tracing::{
    debug,
    warn,
};

use super::TaskResult;
use crate::{
    api::ApiClient,
    capture,
    core::StatsError,
    session::LoadTicket,
};

/// Runs network work off the UI thread. Every spawned job reports back through the
/// channel drained by [`TaskManager::poll_results`].
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, StatsError> {
        let runtime = Arc::new(
            Runtime::new().map_err(|e| StatsError::Runtime(format!("TaskManager runtime: {e}")))?,
        );

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            debug!(task = result.task_type(), "Task finished");
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Issues the records and activity fetches as two independent jobs. Neither waits for
    /// the other and they may finish in any order.
    pub fn load_dashboard(&self, ticket: LoadTicket, chat_id: &str, api: &ApiClient) {
        let (sender, runtime) = self.task_context();

        let tasks_api = api.clone();
        let tasks_chat = chat_id.to_string();
        let tasks_sender = sender.clone();
        runtime.spawn(async move {
            let result = tasks_api.get_tasks(&tasks_chat).await.map_err(|e| e.to_string());
            if let Err(e) = &result {
                warn!(chat_id = %tasks_chat, "Fetching task records failed: {e}");
            }
            let _ = tasks_sender.send(TaskResult::TasksLoaded { ticket, result });
        });

        let activity_api = api.clone();
        let activity_chat = chat_id.to_string();
        runtime.spawn(async move {
            let result = activity_api.get_activity(&activity_chat).await.map_err(|e| e.to_string());
            if let Err(e) = &result {
                warn!(chat_id = %activity_chat, "Fetching activity failed: {e}");
            }
            let _ = sender.send(TaskResult::ActivityLoaded { ticket, result });
        });
    }

    pub fn authorize(&self, api: &ApiClient, api_key: String) {
        let (sender, runtime) = self.task_context();
        let api = api.clone();

        runtime.spawn(async move {
            let result = capture::authorize(&api, &api_key).await;
            let _ = sender.send(TaskResult::Authorized(result));
        });
    }

    /// Sends an already validated selection. Validation happens on the caller's side so
    /// a blocked capture never reaches the runtime.
    pub fn submit_term(&self, api: &ApiClient, api_key: String, term: String) {
        let (sender, runtime) = self.task_context();
        let api = api.clone();

        runtime.spawn(async move {
            let result = capture::submit(&api, &api_key, &term).await;
            let _ = sender.send(TaskResult::TermCaptured { term, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::{
        Duration,
        Instant,
    };

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::session::DashboardSession;

    fn wait_for(manager: &mut TaskManager, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(manager.poll_results());
            std::thread::sleep(Duration::from_millis(10));
        }
        results
    }

    #[test]
    fn dashboard_fetches_complete_independently() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/get_tasks/1001");
            then.status(200).json_body(json!({
                "tasks": [{
                    "content": "Halcyon",
                    "forgot_counter": 0,
                    "sdate": 1,
                    "ndate": 2,
                    "status": "active"
                }]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/get_activity/1001");
            then.status(503);
        });

        let mut manager = TaskManager::new().unwrap();
        let api = ApiClient::new(server.base_url(), server.base_url()).unwrap();
        let ticket = DashboardSession::mount("1001").ticket();
        manager.load_dashboard(ticket, "1001", &api);

        let results = wait_for(&mut manager, 2);
        assert_eq!(results.len(), 2);

        for result in results {
            match result {
                TaskResult::TasksLoaded { ticket: issued, result } => {
                    assert_eq!(issued, ticket);
                    assert_eq!(result.unwrap()[0].content, "Halcyon");
                }
                TaskResult::ActivityLoaded { ticket: issued, result } => {
                    assert_eq!(issued, ticket);
                    assert!(result.is_err());
                }
                other => panic!("unexpected task result: {:?}", other.task_type()),
            }
        }
    }
}
