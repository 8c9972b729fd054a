use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use room_relay::{
    gateway::{
        ConnectionManager, FrameHandler, GatewayBot, GatewayFrame, GatewayReceiveHandler,
        InMemoryConnectionManager, SendPayload,
    },
    DispatchOutcome, EventDispatcher, InMemorySubscriptionRepository, InboundMessage,
    RelayConfig, SubscriptionModel, SubscriptionRepository,
};

use super::mocks::MockBot;

pub const PLATFORM: &str = "iirose";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub dispatcher: Arc<EventDispatcher>,
    pub bot: Arc<MockBot>,
    pub repository: Arc<InMemorySubscriptionRepository>,
}

pub struct TestSetupBuilder {
    config: RelayConfig,
    subscriptions: Vec<SubscriptionModel>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            config: RelayConfig::default(),
            subscriptions: vec![],
        }
    }

    pub fn with_admins(mut self, admins: &[&str]) -> Self {
        self.config.admin_list = admins.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_subscription(mut self, uid: &str, status: bool) -> Self {
        self.subscriptions.push(SubscriptionModel::new(uid, status));
        self
    }

    pub fn including_sender(mut self) -> Self {
        self.config.exclude_sender = false;
        self
    }

    fn into_parts(self) -> (Arc<RelayConfig>, Arc<InMemorySubscriptionRepository>) {
        let repository = Arc::new(InMemorySubscriptionRepository::with_subscriptions(
            self.subscriptions,
        ));
        (Arc::new(self.config), repository)
    }

    pub fn build(self) -> TestSetup {
        let (config, repository) = self.into_parts();
        let bot = Arc::new(MockBot::new());
        let dispatcher = Arc::new(EventDispatcher::new(
            config,
            repository.clone(),
            bot.clone(),
        ));

        TestSetup {
            dispatcher,
            bot,
            repository,
        }
    }

    /// Wires the real gateway path: frames in, SEND frames out
    pub async fn build_gateway(self) -> GatewayHarness {
        let (config, repository) = self.into_parts();
        let connection_manager: Arc<dyn ConnectionManager> =
            Arc::new(InMemoryConnectionManager::new());
        let (tx, outbound) = mpsc::unbounded_channel();
        connection_manager
            .add_gateway(config.platform.clone(), tx)
            .await;

        let bot = Arc::new(GatewayBot::new(connection_manager.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(config, repository.clone(), bot));

        GatewayHarness {
            handler: GatewayReceiveHandler::new(dispatcher),
            outbound,
            repository,
            connection_manager,
        }
    }
}

pub fn message(user_id: &str, channel_id: &str, content: &str) -> InboundMessage {
    InboundMessage {
        platform: PLATFORM.to_string(),
        user_id: user_id.to_string(),
        username: user_id.to_string(),
        content: content.to_string(),
        channel_id: channel_id.to_string(),
    }
}

impl TestSetup {
    pub async fn post_public(&self, user_id: &str, content: &str) -> DispatchOutcome {
        self.dispatcher
            .dispatch(&message(user_id, "public", content))
            .await
            .unwrap()
    }

    pub async fn post_private(&self, user_id: &str, content: &str) -> DispatchOutcome {
        self.dispatcher
            .dispatch(&message(user_id, &format!("private:{}", user_id), content))
            .await
            .unwrap()
    }

    pub async fn status_of(&self, uid: &str) -> Option<bool> {
        self.repository
            .get_subscription(uid)
            .await
            .unwrap()
            .map(|s| s.status)
    }
}

pub struct GatewayHarness {
    pub handler: GatewayReceiveHandler,
    pub outbound: mpsc::UnboundedReceiver<String>,
    pub repository: Arc<InMemorySubscriptionRepository>,
    pub connection_manager: Arc<dyn ConnectionManager>,
}

impl GatewayHarness {
    pub async fn send_frame(&self, frame: serde_json::Value) -> Option<String> {
        self.handler.handle_frame(PLATFORM, frame.to_string()).await
    }

    pub async fn post(&self, user_id: &str, channel_id: &str, content: &str) {
        self.post_from(PLATFORM, user_id, channel_id, content).await;
    }

    /// Connects a second adapter for another platform and returns its outbound channel
    pub async fn connect_platform(&self, platform: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connection_manager
            .add_gateway(platform.to_string(), tx)
            .await;
        rx
    }

    pub async fn post_from(&self, platform: &str, user_id: &str, channel_id: &str, content: &str) {
        let mut inbound = message(user_id, channel_id, content);
        inbound.platform = platform.to_string();
        let frame = serde_json::json!({
            "type": "MESSAGE",
            "payload": inbound,
        });
        assert!(self
            .handler
            .handle_frame(platform, frame.to_string())
            .await
            .is_none());
    }

    /// Next SEND frame written to the adapter, if one arrives soon
    pub async fn next_send(&mut self) -> Option<SendPayload> {
        let raw = tokio::time::timeout(Duration::from_millis(500), self.outbound.recv())
            .await
            .ok()??;
        let frame = GatewayFrame::parse(&raw).unwrap();
        Some(serde_json::from_value(frame.payload).unwrap())
    }

    /// Collects SEND frames until the adapter channel goes quiet
    pub async fn drain_sends(&mut self) -> Vec<SendPayload> {
        let mut sends = Vec::new();
        while let Ok(Some(raw)) =
            tokio::time::timeout(Duration::from_millis(100), self.outbound.recv()).await
        {
            let frame = GatewayFrame::parse(&raw).unwrap();
            sends.push(serde_json::from_value(frame.payload).unwrap());
        }
        sends
    }
}
