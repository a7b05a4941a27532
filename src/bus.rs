use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

/// Topic published after the active locale changed (payload: `{"locale": code}`).
pub const LANGUAGE_CHANGED: &str = "app:language-changed";
/// Topic published after the theme mode changed (payload: `{"mode": code}`).
pub const THEME_CHANGED: &str = "app:theme-changed";
/// Topic published after a contact submission was delivered.
pub const CONTACT_FORM_SUBMITTED: &str = "app:contact-form-submitted";

type Handler = Box<dyn Fn(&Value) + Send>;

/// Synchronous in-process pub/sub.
///
/// Handlers run in subscription order, under the bus lock. Subscribers must
/// forward work (e.g. over a channel) instead of publishing from inside a
/// handler.
#[derive(Default)]
pub struct EventBus {
    topics: Mutex<HashMap<String, Vec<Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, topic: &str, handler: F)
    where
        F: Fn(&Value) + Send + 'static,
    {
        let mut topics = self.topics.lock().unwrap();
        topics
            .entry(topic.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Publish `payload` to every subscriber of `topic`, in subscription
    /// order. Publishing to a topic with no subscribers is a no-op.
    pub fn publish(&self, topic: &str, payload: Value) {
        let topics = self.topics.lock().unwrap();
        let Some(handlers) = topics.get(topic) else {
            log::debug!("bus: no subscribers for {}", topic);
            return;
        };
        log::debug!("bus: {} -> {} subscriber(s)", topic, handlers.len());
        for handler in handlers {
            handler(&payload);
        }
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .unwrap()
            .get(topic)
            .map(|h| h.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn delivers_in_subscription_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            bus.subscribe("test:order", move |_| {
                seen.lock().unwrap().push(tag);
            });
        }

        bus.publish("test:order", json!({}));
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish("test:nobody-home", json!({"x": 1}));
        assert_eq!(bus.subscriber_count("test:nobody-home"), 0);
    }

    #[test]
    fn payload_reaches_handler() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = hits.clone();

        bus.subscribe(LANGUAGE_CHANGED, move |payload| {
            assert_eq!(payload["locale"], "en");
            hits_in.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(LANGUAGE_CHANGED, json!({"locale": "en"}));
        bus.publish(LANGUAGE_CHANGED, json!({"locale": "en"}));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
