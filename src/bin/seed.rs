//! Seed data generator: creates the Astana branch list and a week of
//! random appointments for development and demos.

use chrono::{Duration, Local, NaiveDate};
use rand::{seq::SliceRandom, Rng};
use sqlx::postgres::PgPoolOptions;

use tson_server::{
    booking::generate_slots,
    config::AppConfig,
    models::department::DepartmentKind,
};

const DEPARTMENTS: &[(&str, &str, DepartmentKind)] = &[
    (
        "СпецЦОН №1 (Сарыарка)",
        "г. Астана, район Сарыарка, ул. №20-40, здание 2",
        DepartmentKind::Extended,
    ),
    (
        "ЦОН района Алматы",
        "г. Астана, район Алматы, ул. К. Сатпаева, 25",
        DepartmentKind::Standard,
    ),
    (
        "ЦОН района Есиль",
        "г. Астана, район Есиль, ул. Мангилик Ел, 30",
        DepartmentKind::Standard,
    ),
    (
        "ЦОН района Байконур",
        "г. Астана, район Байконур, ул. Иманова, 20/1",
        DepartmentKind::Standard,
    ),
    (
        "ЦОН района Нура",
        "г. Астана, район Нура, проспект Кабанбай батыра, 6/3",
        DepartmentKind::Standard,
    ),
];

const NAMES: &[&str] = &[
    "Айгерим Нурланова",
    "Данияр Сериков",
    "Гульнара Абенова",
    "Ерлан Касымов",
    "Мадина Оспанова",
    "Арман Жумабеков",
    "Салтанат Ахметова",
    "Нурсултан Бекетов",
];

/// Probability that any given slot gets a seeded appointment
const FILL_RATE: f64 = 0.3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("Resetting tables...");
    sqlx::query("TRUNCATE appointments, departments RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await?;

    println!("Adding departments...");
    let mut department_ids = Vec::new();
    for (name, address, kind) in DEPARTMENTS {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO departments (name, address, kind) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(address)
        .bind(kind)
        .fetch_one(&pool)
        .await?;
        department_ids.push((id, *kind));
    }
    println!("{} departments added.", department_ids.len());

    let start_date = Local::now().date_naive();
    let end_date = start_date + Duration::days(7);
    println!("Generating appointments from {} to {}...", start_date, end_date);

    let mut rng = rand::thread_rng();
    let mut count = 0usize;
    let mut day = start_date;
    while day <= end_date {
        for slot in slots_for(day, &config) {
            for (department_id, kind) in &department_ids {
                if rng.gen::<f64>() >= FILL_RATE {
                    continue;
                }

                let phone = format!("77{:08}", rng.gen_range(10_000_000u32..100_000_000u32));
                let iin: String = (0..12).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
                let name = NAMES.choose(&mut rng).expect("name list is not empty");
                let service = kind.services().choose(&mut rng).expect("catalogue is not empty");

                // The partial unique index keeps re-runs from double booking
                sqlx::query(
                    r#"
                    INSERT INTO appointments
                        (department_id, time_slot, user_name, phone_number, iin, service, status)
                    VALUES ($1, $2, $3, $4, $5, $6, 'active')
                    ON CONFLICT (department_id, time_slot) WHERE status = 'active'
                    DO NOTHING
                    "#,
                )
                .bind(department_id)
                .bind(slot)
                .bind(*name)
                .bind(phone)
                .bind(iin)
                .bind(*service)
                .execute(&pool)
                .await?;
                count += 1;
            }
        }
        day += Duration::days(1);
    }

    println!("{} appointments generated.", count);
    Ok(())
}

fn slots_for(date: NaiveDate, config: &AppConfig) -> Vec<chrono::NaiveDateTime> {
    generate_slots(
        date,
        config.booking.opening_hour,
        config.booking.closing_hour,
        config.booking.slot_minutes,
    )
}
