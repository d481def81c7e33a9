//! SQL implementation of the lead repository

use crate::error::DbError;
use crate::repositories::lead::{BookingRecord, CallRecord, LeadRepository};
use crate::DbClient;
use bookline_common::services::BoxFuture;
use tracing::{debug, error, info};

/// SQL implementation of the lead repository
#[derive(Debug, Clone)]
pub struct SqlLeadRepository {
    db_client: DbClient,
}

impl SqlLeadRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl LeadRepository for SqlLeadRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async move {
            debug!("Initializing lead schema");

            let meetings = r#"
                CREATE TABLE IF NOT EXISTS meetings (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    full_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    company_name TEXT NOT NULL,
                    start_time TEXT NOT NULL,
                    goal TEXT NOT NULL,
                    monthly_budget INTEGER NOT NULL,
                    google_calendar_event_id TEXT,
                    client_number TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )
            "#;

            let call_history = r#"
                CREATE TABLE IF NOT EXISTS call_history (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    full_name TEXT NOT NULL,
                    email TEXT,
                    company_name TEXT NOT NULL,
                    goal TEXT NOT NULL,
                    monthly_budget INTEGER NOT NULL,
                    resulted_in_meeting BOOLEAN NOT NULL,
                    disqualification_reason TEXT,
                    client_number TEXT,
                    call_duration_seconds INTEGER NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )
            "#;

            self.db_client.execute(meetings).await?;
            self.db_client.execute(call_history).await?;

            info!("Lead schema initialized successfully");
            Ok(())
        })
    }

    fn save_booking(&self, record: BookingRecord) -> BoxFuture<'_, (), DbError> {
        Box::pin(async move {
            debug!("Saving booking for lead: {}", record.full_name);

            let query = r#"
                INSERT INTO meetings (
                    full_name, email, company_name, start_time, goal,
                    monthly_budget, google_calendar_event_id, client_number
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#;

            sqlx::query(query)
                .bind(&record.full_name)
                .bind(&record.email)
                .bind(&record.company_name)
                .bind(&record.start_time)
                .bind(&record.goal)
                .bind(record.monthly_budget)
                .bind(&record.google_calendar_event_id)
                .bind(&record.client_number)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert booking: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            info!("Booking saved to meetings table");
            Ok(())
        })
    }

    fn log_call(&self, record: CallRecord) -> BoxFuture<'_, (), DbError> {
        Box::pin(async move {
            debug!("Logging call for: {}", record.full_name);

            let query = r#"
                INSERT INTO call_history (
                    full_name, email, company_name, goal, monthly_budget,
                    resulted_in_meeting, disqualification_reason,
                    client_number, call_duration_seconds
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#;

            sqlx::query(query)
                .bind(&record.full_name)
                .bind(&record.email)
                .bind(&record.company_name)
                .bind(&record.goal)
                .bind(record.monthly_budget)
                .bind(record.resulted_in_meeting)
                .bind(&record.disqualification_reason)
                .bind(&record.client_number)
                .bind(record.call_duration_seconds)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert call log: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            info!("Call logged to call_history table");
            Ok(())
        })
    }
}
