//! Department (service branch) model and the service catalogue

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Services offered by regular branches
pub const REGULAR_SERVICES: &[&str] = &[
    "Консультация",
    "Услуги НПЦЗем",
    "Нәтиже",
    "Социальные услуги",
    "Льготные категории",
    "Выдача документов",
];

/// Services offered by extended (driver/vehicle) branches
pub const EXTENDED_SERVICES: &[&str] = &[
    "Механика B",
    "Категории D,E,A,D1",
    "Категория C1",
    "Категория C",
    "B автомат",
    "Осмотр ТС",
    "Регистрация (перерегистрация) ТС",
    "СРТС и доверенности",
    "Водительское удостоверение",
    "Льготное окно ВУ",
    "Выдача СРТС",
];

/// Kind of a service branch, deciding which service catalogue applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentKind {
    /// Regular public-service branch
    Standard,
    /// Extended branch additionally handling driver and vehicle services
    Extended,
}

impl DepartmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentKind::Standard => "standard",
            DepartmentKind::Extended => "extended",
        }
    }

    /// Catalogue of service names bookable at branches of this kind
    pub fn services(&self) -> &'static [&'static str] {
        match self {
            DepartmentKind::Standard => REGULAR_SERVICES,
            DepartmentKind::Extended => EXTENDED_SERVICES,
        }
    }

    /// Whether `service` may be booked at a branch of this kind
    pub fn offers(&self, service: &str) -> bool {
        self.services().contains(&service)
    }
}

impl std::fmt::Display for DepartmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DepartmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(DepartmentKind::Standard),
            "extended" => Ok(DepartmentKind::Extended),
            _ => Err(format!("Invalid department kind: {}", s)),
        }
    }
}

// SQLx conversion for DepartmentKind (stored as text)
impl sqlx::Type<Postgres> for DepartmentKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for DepartmentKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for DepartmentKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// A physical service branch
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    /// Branch display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Branch kind (decides the service catalogue)
    pub kind: DepartmentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lookup() {
        assert_eq!(DepartmentKind::Standard.services(), REGULAR_SERVICES);
        assert_eq!(DepartmentKind::Extended.services(), EXTENDED_SERVICES);
    }

    #[test]
    fn test_offers() {
        assert!(DepartmentKind::Standard.offers("Консультация"));
        assert!(!DepartmentKind::Standard.offers("Водительское удостоверение"));
        assert!(DepartmentKind::Extended.offers("Водительское удостоверение"));
        assert!(!DepartmentKind::Extended.offers("Консультация"));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [DepartmentKind::Standard, DepartmentKind::Extended] {
            assert_eq!(kind.as_str().parse::<DepartmentKind>(), Ok(kind));
        }
        assert!("special".parse::<DepartmentKind>().is_err());
    }
}
