use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotwise_api::{ApiState, config::ApiConfig};
use slotwise_core::store::AppointmentStore;
use slotwise_db::{create_pool, schema::initialize_database, store::PgAppointmentStore};
use slotwise_notify::{SmsGateway, TwilioConfig, TwilioSms};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    slotwise_api::init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let store: Arc<dyn AppointmentStore> = Arc::new(PgAppointmentStore::new(db_pool));

    // SMS is optional; without Twilio credentials bookings still work
    let sms: Option<Arc<dyn SmsGateway>> = match TwilioConfig::from_env() {
        Some(twilio) => {
            info!("Twilio SMS enabled for sender {}", twilio.phone_number);
            Some(Arc::new(TwilioSms::new(twilio)))
        }
        None => {
            warn!("Twilio not configured; SMS notifications are disabled");
            None
        }
    };

    let state = Arc::new(ApiState::from_config(&config, store, sms));

    // Start API server
    slotwise_api::start_server(config, state).await?;

    Ok(())
}
