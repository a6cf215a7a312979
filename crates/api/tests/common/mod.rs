#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono_tz::Tz;
use slotwise_api::ApiState;
use slotwise_core::availability::AvailabilityEngine;
use slotwise_core::business_hours::BusinessHours;
use slotwise_core::store::AppointmentStore;
use slotwise_db::mock::InMemoryAppointmentStore;
use slotwise_notify::{MessageReceipt, NotifyError, SmsGateway};

/// Gateway double that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingSms {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsGateway for RecordingSms {
    async fn send(&self, to: &str, body: &str) -> Result<MessageReceipt, NotifyError> {
        if self.fail {
            return Err(NotifyError::Gateway {
                status: 503,
                body: "gateway down".to_string(),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), body.to_string()));

        Ok(MessageReceipt {
            sid: format!("SM{}", sent.len()),
            status: Some("queued".to_string()),
        })
    }
}

pub fn state(
    store: Arc<dyn AppointmentStore>,
    sms: Option<Arc<RecordingSms>>,
) -> Arc<ApiState> {
    Arc::new(ApiState {
        store,
        engine: AvailabilityEngine::new(BusinessHours::default(), Tz::UTC),
        sms: sms.map(|gateway| gateway as Arc<dyn SmsGateway>),
        max_range_days: 62,
        default_client_timezone: "America/New_York".to_string(),
    })
}

pub fn server(state: Arc<ApiState>) -> TestServer {
    TestServer::new(slotwise_api::app(state)).unwrap()
}

/// Server backed by an empty in-memory store, plus handles to its collaborators.
pub fn in_memory_server(
    sms: Option<Arc<RecordingSms>>,
) -> (TestServer, Arc<InMemoryAppointmentStore>) {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let server = server(state(store.clone(), sms));
    (server, store)
}
