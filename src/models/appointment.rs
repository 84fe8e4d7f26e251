//! Appointment model and related types

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Active,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Active => "active",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AppointmentStatus::Active),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Invalid appointment status: {}", s)),
        }
    }
}

// SQLx conversion for AppointmentStatus (stored as text)
impl sqlx::Type<Postgres> for AppointmentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for AppointmentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for AppointmentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Appointment row from the database.
///
/// `time_slot` is timezone-naive; all stored instants are in the
/// deployment's local civil time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Appointment {
    pub id: i32,
    pub department_id: i32,
    /// Booked slot (local civil time, ISO 8601 without offset)
    pub time_slot: NaiveDateTime,
    /// Citizen name
    pub user_name: String,
    pub phone_number: String,
    /// 12-digit national identifier
    pub iin: String,
    /// Service name from the branch catalogue
    pub service: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Appointment with owning department details joined in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AppointmentDetails {
    pub id: i32,
    pub department_id: i32,
    pub department_name: String,
    pub department_address: String,
    pub time_slot: NaiveDateTime,
    pub user_name: String,
    pub phone_number: String,
    pub iin: String,
    pub service: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Create appointment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAppointment {
    pub department_id: i32,
    /// Requested slot (ISO 8601 local datetime, no timezone offset)
    pub time_slot: NaiveDateTime,
    #[validate(length(min = 1, max = 200, message = "Name must not be empty"))]
    pub user_name: String,
    #[validate(length(min = 5, max = 20, message = "Phone number must be 5 to 20 characters"))]
    pub phone_number: String,
    /// National identifier, exactly 12 decimal digits
    pub iin: String,
    /// Requested service (must belong to the branch catalogue)
    pub service: String,
}

impl CreateAppointment {
    /// True when the IIN is exactly 12 decimal digits
    pub fn iin_is_valid(&self) -> bool {
        self.iin.len() == 12 && self.iin.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(iin: &str) -> CreateAppointment {
        CreateAppointment {
            department_id: 1,
            time_slot: NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            user_name: "Айгерим Нурланова".to_string(),
            phone_number: "77012345678".to_string(),
            iin: iin.to_string(),
            service: "Консультация".to_string(),
        }
    }

    #[test]
    fn test_iin_valid() {
        assert!(request("990101350123").iin_is_valid());
    }

    #[test]
    fn test_iin_wrong_length() {
        assert!(!request("12345678901").iin_is_valid());
        assert!(!request("1234567890123").iin_is_valid());
        assert!(!request("").iin_is_valid());
    }

    #[test]
    fn test_iin_non_digits() {
        assert!(!request("99010135012a").iin_is_valid());
        assert!(!request("9901 1350123").iin_is_valid());
        // Unicode digits are not decimal ASCII digits
        assert!(!request("٩٩٠١٠١٣٥٠١٢٣").iin_is_valid());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [AppointmentStatus::Active, AppointmentStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>(), Ok(status));
        }
        assert!("done".parse::<AppointmentStatus>().is_err());
    }
}
