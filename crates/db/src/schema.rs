use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

// Executed one at a time: prepared statements cannot hold several commands.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        customer_name VARCHAR(255) NOT NULL,
        customer_email VARCHAR(255) NULL,
        customer_phone VARCHAR(64) NOT NULL,
        customer_address TEXT NULL,
        service_type VARCHAR(255) NULL,
        scheduled_date TIMESTAMP WITH TIME ZONE NOT NULL,
        duration_minutes INTEGER NOT NULL DEFAULT 60,
        status VARCHAR(32) NOT NULL DEFAULT 'scheduled',
        notes TEXT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_status CHECK (status IN ('scheduled', 'confirmed', 'cancelled', 'completed')),
        CONSTRAINT positive_duration CHECK (duration_minutes > 0)
    )
    "#,
    // At most one active appointment may start at a given instant.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uniq_active_appointment_start
        ON appointments(scheduled_date)
        WHERE status NOT IN ('cancelled', 'completed')
    "#,
    "CREATE INDEX IF NOT EXISTS idx_appointments_scheduled_date ON appointments(scheduled_date)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
