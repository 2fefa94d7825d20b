/// Access to the clinic's appointment collection.
///
/// The full collection is fetched once when the calendar opens and kept in
/// memory until the next explicit refresh. A failed fetch leaves an empty
/// list and a banner message; nothing is retried automatically.

use chrono::FixedOffset;
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::calendar::AppointmentCalendar;
use crate::error::ApiError;
use crate::models::Appointment;

/// Banner text shown when the appointment list could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load appointments";

/// Anything that can produce the appointment collection.
#[allow(async_fn_in_trait)]
pub trait AppointmentApi {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, ApiError>;
}

/// REST client for `GET {api_url}/appointments`.
pub struct HttpAppointmentApi {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpAppointmentApi {
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    /// Use a preconfigured client, e.g. one with custom proxy or timeout settings.
    pub fn with_client(client: reqwest::Client, api_url: &str, token: Option<String>) -> Self {
        HttpAppointmentApi {
            client,
            endpoint: format!("{}/appointments", api_url.trim_end_matches('/')),
            token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AppointmentApi for HttpAppointmentApi {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        debug!("GET {}", self.endpoint);

        let mut request = self.client.get(&self.endpoint);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        decode_appointments(body)
    }
}

/// Decode a response body that is either a bare array of appointments or
/// an object carrying them under `appointments`.
///
/// Records that cannot be decoded are skipped with a warning.
pub fn decode_appointments(body: Value) -> Result<Vec<Appointment>, ApiError> {
    let records = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("appointments") {
            Some(Value::Array(items)) => items,
            _ => return Err(ApiError::UnexpectedBody),
        },
        _ => return Err(ApiError::UnexpectedBody),
    };

    let mut appointments = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Appointment>(record) {
            Ok(appointment) => appointments.push(appointment),
            Err(e) => warn!("skipping unreadable appointment record: {}", e),
        }
    }
    Ok(appointments)
}

/// In-memory appointment list for the lifetime of the calendar.
#[derive(Debug, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    error: Option<String>,
    loaded: bool,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the collection, replacing whatever was held before.
    pub async fn load<A: AppointmentApi>(&mut self, api: &A) {
        match api.fetch_appointments().await {
            Ok(appointments) => {
                info!("loaded {} appointments", appointments.len());
                self.appointments = appointments;
                self.error = None;
            }
            Err(e) => {
                error!("failed to load appointments: {}", e);
                self.appointments.clear();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.loaded = true;
    }

    /// Re-fetch after appointments were created or changed elsewhere.
    pub async fn refresh<A: AppointmentApi>(&mut self, api: &A) {
        debug!("refreshing appointments");
        self.load(api).await;
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True until the first fetch has completed, successfully or not.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// Index the held appointments for display in `offset`.
    pub fn calendar(&self, offset: FixedOffset) -> AppointmentCalendar {
        AppointmentCalendar::new(&self.appointments, offset)
    }
}
