//! Seed data shared by the integration tests.
//!
//! Thirty rentals with ids 1..=30. For rental `n`:
//! - `price_per_day = 5000 + 1000 * n`
//! - `lat = 30 + n`, `lng = -120 + n`
//! - `vehicle_year = 1970 + n`
//! - owner is user `(n % 3) + 1`

use anyhow::Context as _;
use sqlx::PgPool;

pub const RENTAL_COUNT: usize = 30;

const SEED_USERS: &str = "
    INSERT INTO users (id, first_name, last_name)
    VALUES (1, 'John', 'Smith'),
           (2, 'Jane', 'Doe'),
           (3, 'Sam', 'Taylor')";

const SEED_RENTALS: &str = "
    INSERT INTO rentals (id, user_id, name, type, description, sleeps, price_per_day,
                         home_city, home_state, home_zip, home_country,
                         vehicle_make, vehicle_model, vehicle_year, vehicle_length,
                         lat, lng, primary_image_url)
    SELECT n,
           (n % 3) + 1,
           'Rental ' || n,
           CASE WHEN n % 2 = 0 THEN 'camper-van' ELSE 'trailer' END,
           'Rental number ' || n,
           2 + n % 5,
           5000 + 1000 * n,
           'Costa Mesa', 'CA', '92627', 'US',
           'Volkswagen', 'Bay Window', 1970 + n, 15.5,
           30 + n, -120 + n,
           'https://img.example.com/' || n || '.jpg'
    FROM generate_series(1, 30) AS n";

pub async fn seed_rentals(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(SEED_USERS)
        .execute(pool)
        .await
        .context("seed users")?;
    sqlx::query(SEED_RENTALS)
        .execute(pool)
        .await
        .context("seed rentals")?;
    Ok(())
}

pub fn price_of(id: i64) -> i64 {
    5000 + 1000 * id
}
