// Command dispatcher.
// Parses a message, fetches forecasts, applies the golf rule, and updates the tracked store.

use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;

use crate::golf;
use crate::store::{TrackedEntry, TrackedStore, tracking_key};
use crate::weather::ForecastProvider;

use super::command::{Command, ForecastRequest};
use super::reply;

/// Who sent a command, and from where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: String,
    pub channel_id: Option<u64>,
}

impl Requester {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id: None,
        }
    }

    pub fn in_channel(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }
}

/// Turns chat commands into replies using an injected provider and store.
pub struct Dispatcher {
    provider: Box<dyn ForecastProvider>,
    store: Mutex<TrackedStore>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Dispatcher {
    pub fn new(provider: impl ForecastProvider + 'static, store: TrackedStore) -> Self {
        Self {
            provider: Box::new(provider),
            store: Mutex::new(store),
            today: local_today,
        }
    }

    /// Override the clock used to prune past-dated tracked forecasts.
    #[cfg(test)]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Handle one message. Returns `None` when the text is not a command for this bot.
    pub async fn handle_command(&self, raw: &str, requester: &Requester) -> Option<String> {
        let command = match Command::parse(raw)? {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(user = %requester.user_id, "Rejected command: {}", e);
                return Some(reply::input_error(&e));
            }
        };
        tracing::debug!(user = %requester.user_id, ?command, "Handling command");

        let text = match command {
            Command::Weather(request) => self.weather(&request).await,
            Command::Track(request) => self.track(&request, requester).await,
            Command::Tracked => self.tracked().await,
            Command::Untrack(request) => self.untrack(&request).await,
            Command::Clear => self.clear().await,
            Command::Help => reply::USAGE.to_string(),
        };
        Some(text)
    }

    async fn weather(&self, request: &ForecastRequest) -> String {
        match self
            .provider
            .get_forecast(&request.location, request.date)
            .await
        {
            Ok(forecast) => reply::forecast(&forecast, &golf::is_good_for_golf(&forecast)),
            Err(e) => {
                tracing::warn!(location = %request.location, date = %request.date, "Forecast failed: {}", e);
                reply::forecast_error(&e, &request.location, request.date)
            }
        }
    }

    async fn track(&self, request: &ForecastRequest, requester: &Requester) -> String {
        let forecast = match self
            .provider
            .get_forecast(&request.location, request.date)
            .await
        {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::warn!(location = %request.location, date = %request.date, "Forecast failed: {}", e);
                return reply::forecast_error(&e, &request.location, request.date);
            }
        };

        let mut text = reply::forecast(&forecast, &golf::is_good_for_golf(&forecast));
        let key = tracking_key(&request.location, request.date);
        let entry = TrackedEntry::new(&key, forecast)
            .requested_by(&requester.user_id)
            .in_channel(requester.channel_id);

        let saved = self.store.lock().await.add(entry);
        text.push_str("\n\n");
        match saved {
            Ok(()) => {
                tracing::info!(%key, user = %requester.user_id, "Tracking forecast");
                text.push_str(&reply::tracking_started(&request.location, request.date));
            }
            Err(e) => {
                tracing::warn!(%key, "Could not save tracked forecast: {}", e);
                text.push_str(reply::SAVE_FAILED);
            }
        }
        text
    }

    async fn tracked(&self) -> String {
        let today = (self.today)();
        let (pruned, entries) = {
            let mut store = self.store.lock().await;
            if store.is_empty() {
                return "No weather forecasts are being tracked at the moment.".to_string();
            }
            let pruned = store.prune_before(today);
            let entries: Vec<TrackedEntry> = store
                .list()
                .into_iter()
                .filter(|entry| entry.forecast.date >= today)
                .cloned()
                .collect();
            (pruned, entries)
        };

        let mut message = String::from("📋 **Weather Updates For All Tracked Locations:**\n\n");
        match pruned {
            Ok(removed) => {
                for entry in removed {
                    message.push_str(&format!(
                        "• **{}** on **{}** - REMOVED (past date)\n",
                        entry.forecast.location,
                        entry.forecast.date.format("%Y-%m-%d")
                    ));
                }
            }
            Err(e) => {
                tracing::warn!("Could not prune past forecasts: {}", e);
                message.push_str("⚠️ Could not remove past-dated forecasts.\n");
            }
        }

        let mut updates = Vec::new();
        for entry in entries {
            let location = query_location(&entry);
            let date = entry.forecast.date;
            match self.provider.get_forecast(&location, date).await {
                Ok(forecast) => {
                    message.push('\n');
                    message.push_str(&reply::forecast(
                        &forecast,
                        &golf::is_good_for_golf(&forecast),
                    ));
                    message.push('\n');
                    updates.push((entry.key, forecast));
                }
                Err(e) => {
                    tracing::warn!(key = %entry.key, "Tracked forecast refresh failed: {}", e);
                    message.push_str(&format!(
                        "• **{}** on **{}** - Failed to fetch weather data.\n",
                        entry.forecast.location,
                        date.format("%Y-%m-%d")
                    ));
                }
            }
        }

        if let Err(e) = self.store.lock().await.refresh(updates) {
            tracing::warn!("Could not save refreshed forecasts: {}", e);
        }
        message
    }

    async fn untrack(&self, request: &ForecastRequest) -> String {
        let date = request.date.format("%Y-%m-%d").to_string();
        match self
            .store
            .lock()
            .await
            .remove(&request.location, request.date)
        {
            Ok(true) => {
                tracing::info!(location = %request.location, %date, "Stopped tracking forecast");
                format!(
                    "Removed forecast for **{}** on **{}** from tracking.",
                    request.location, date
                )
            }
            Ok(false) => format!(
                "No forecast found for **{}** on **{}**.",
                request.location, date
            ),
            Err(e) => {
                tracing::warn!("Could not save tracked forecasts: {}", e);
                "⚠️ Could not save the tracked forecast list.".to_string()
            }
        }
    }

    async fn clear(&self) -> String {
        match self.store.lock().await.clear() {
            Ok(()) => {
                tracing::info!("Cleared tracked forecasts");
                "Stopped tracking all forecasts.".to_string()
            }
            Err(e) => {
                tracing::warn!("Could not clear tracked forecasts: {}", e);
                "⚠️ Could not save the tracked forecast list.".to_string()
            }
        }
    }
}

/// Location to query for a tracked entry: the name the user typed, recovered from the key.
fn query_location(entry: &TrackedEntry) -> String {
    entry
        .key
        .rsplit_once('|')
        .map(|(location, _)| location.to_string())
        .filter(|location| !location.is_empty())
        .unwrap_or_else(|| entry.forecast.location.clone())
}
