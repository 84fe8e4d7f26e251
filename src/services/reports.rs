//! Tabular report export
//!
//! Renders the administrator appointment report as CSV, one row per
//! appointment with the owning department joined in.

use crate::{error::AppResult, models::appointment::AppointmentDetails, repository::Repository};

const HEADER: &str = "id,department,address,time_slot,user_name,phone_number,iin,service,status";

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Render all appointments as a CSV document
    pub async fn appointments_csv(&self) -> AppResult<String> {
        let appointments = self.repository.appointments.list_all().await?;
        Ok(render_csv(&appointments))
    }
}

fn render_csv(appointments: &[AppointmentDetails]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for a in appointments {
        let row = [
            a.id.to_string(),
            a.department_name.clone(),
            a.department_address.clone(),
            a.time_slot.format("%Y-%m-%d %H:%M").to_string(),
            a.user_name.clone(),
            a.phone_number.clone(),
            a.iin.clone(),
            a.service.clone(),
            a.status.to_string(),
        ];
        let escaped: Vec<String> = row.iter().map(|f| escape_field(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    out
}

/// Quote a field when it contains a separator, quote or newline
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::AppointmentStatus;
    use chrono::{NaiveDate, Utc};

    fn details() -> AppointmentDetails {
        AppointmentDetails {
            id: 7,
            department_id: 1,
            department_name: "ЦОН района Есиль".to_string(),
            department_address: "г. Астана, район Есиль, ул. Мангилик Ел, 30".to_string(),
            time_slot: NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            user_name: "Айгерим Нурланова".to_string(),
            phone_number: "77012345678".to_string(),
            iin: "990101350123".to_string(),
            service: "Категории D,E,A,D1".to_string(),
            status: AppointmentStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_render_rows() {
        let csv = render_csv(&[details()]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HEADER));

        let row = lines.next().unwrap();
        assert!(row.starts_with("7,"));
        assert!(row.contains("2025-06-02 09:30"));
        // Service names with commas stay a single quoted field
        assert!(row.contains("\"Категории D,E,A,D1\""));
        assert!(row.ends_with(",active"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_empty() {
        let csv = render_csv(&[]);
        assert_eq!(csv, format!("{}\n", HEADER));
    }
}
