use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::SubscriptionModel;
use crate::shared::AppError;

/// Trait for subscription repository operations
///
/// Reads and writes are independent calls; a toggle is a read followed by a
/// write and is not atomic across them.
#[async_trait]
pub trait SubscriptionRepository {
    async fn get_subscription(&self, uid: &str) -> Result<Option<SubscriptionModel>, AppError>;

    /// All records with `status = true`
    async fn list_subscribers(&self) -> Result<Vec<SubscriptionModel>, AppError>;

    async fn create_subscription(&self, subscription: &SubscriptionModel) -> Result<(), AppError>;
    async fn set_status(&self, uid: &str, status: bool) -> Result<(), AppError>;
}

/// In-memory implementation of SubscriptionRepository for development and testing
///
/// Data is lost when the process exits.
pub struct InMemorySubscriptionRepository {
    subscriptions: Mutex<HashMap<String, SubscriptionModel>>,
}

impl Default for InMemorySubscriptionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySubscriptionRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated records
    pub fn with_subscriptions(subscriptions: Vec<SubscriptionModel>) -> Self {
        let map = subscriptions
            .into_iter()
            .map(|sub| (sub.uid.clone(), sub))
            .collect();

        Self {
            subscriptions: Mutex::new(map),
        }
    }

    /// Returns the current number of records, subscribed or not
    pub fn record_count(&self) -> usize {
        self.lock().map(|subs| subs.len()).unwrap_or(0)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, SubscriptionModel>>, AppError> {
        self.subscriptions
            .lock()
            .map_err(|_| AppError::DatabaseError("subscription store poisoned".to_string()))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    #[instrument(skip(self))]
    async fn get_subscription(&self, uid: &str) -> Result<Option<SubscriptionModel>, AppError> {
        debug!(uid = %uid, "Fetching subscription from memory");

        let subscription = self.lock()?.get(uid).cloned();

        match &subscription {
            Some(s) => debug!(uid = %uid, status = s.status, "Subscription found in memory"),
            None => debug!(uid = %uid, "Subscription not found in memory"),
        }

        Ok(subscription)
    }

    #[instrument(skip(self))]
    async fn list_subscribers(&self) -> Result<Vec<SubscriptionModel>, AppError> {
        let mut subscribers: Vec<SubscriptionModel> = self
            .lock()?
            .values()
            .filter(|s| s.is_active())
            .cloned()
            .collect();
        subscribers.sort_by(|a, b| a.uid.cmp(&b.uid));

        debug!(subscriber_count = subscribers.len(), "Subscribers listed from memory");
        Ok(subscribers)
    }

    #[instrument(skip(self, subscription))]
    async fn create_subscription(&self, subscription: &SubscriptionModel) -> Result<(), AppError> {
        debug!(uid = %subscription.uid, status = subscription.status, "Creating subscription in memory");

        let mut subscriptions = self.lock()?;
        if subscriptions.contains_key(&subscription.uid) {
            warn!(uid = %subscription.uid, "Subscription already exists in memory");
            return Err(AppError::DatabaseError(
                "Subscription already exists".to_string(),
            ));
        }
        subscriptions.insert(subscription.uid.clone(), subscription.clone());

        debug!(uid = %subscription.uid, "Subscription created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(&self, uid: &str, status: bool) -> Result<(), AppError> {
        debug!(uid = %uid, status, "Updating subscription status in memory");

        let mut subscriptions = self.lock()?;
        match subscriptions.get_mut(uid) {
            Some(subscription) => {
                subscription.status = status;
                debug!(uid = %uid, "Subscription updated successfully in memory");
                Ok(())
            }
            None => {
                warn!(uid = %uid, "Subscription not found for update in memory");
                Err(AppError::NotFound("Subscription not found".to_string()))
            }
        }
    }
}

/// PostgreSQL implementation of subscription repository
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Declares the two-column table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS relay_subscriptions (uid TEXT PRIMARY KEY, status BOOLEAN NOT NULL DEFAULT FALSE)"
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to ensure subscription schema");
            AppError::DatabaseError(e.to_string())
        })?;

        info!("Subscription schema ready");
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    #[instrument(skip(self))]
    async fn get_subscription(&self, uid: &str) -> Result<Option<SubscriptionModel>, AppError> {
        debug!(uid = %uid, "Fetching subscription from database");

        let subscription = sqlx::query_as::<_, SubscriptionModel>(
            "SELECT uid, status FROM relay_subscriptions WHERE uid = $1",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, uid = %uid, "Failed to fetch subscription from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(subscription)
    }

    #[instrument(skip(self))]
    async fn list_subscribers(&self) -> Result<Vec<SubscriptionModel>, AppError> {
        let subscribers = sqlx::query_as::<_, SubscriptionModel>(
            "SELECT uid, status FROM relay_subscriptions WHERE status = TRUE ORDER BY uid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list subscribers from database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(subscriber_count = subscribers.len(), "Subscribers listed from database");
        Ok(subscribers)
    }

    #[instrument(skip(self, subscription))]
    async fn create_subscription(&self, subscription: &SubscriptionModel) -> Result<(), AppError> {
        debug!(uid = %subscription.uid, "Creating subscription in database");

        sqlx::query("INSERT INTO relay_subscriptions (uid, status) VALUES ($1, $2)")
            .bind(&subscription.uid)
            .bind(subscription.status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, uid = %subscription.uid, "Failed to create subscription in database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(&self, uid: &str, status: bool) -> Result<(), AppError> {
        debug!(uid = %uid, status, "Updating subscription status in database");

        let result = sqlx::query("UPDATE relay_subscriptions SET status = $2 WHERE uid = $1")
            .bind(uid)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, uid = %uid, "Failed to update subscription in database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(uid = %uid, "Subscription not found for update");
            return Err(AppError::NotFound("Subscription not found".to_string()));
        }

        Ok(())
    }
}
