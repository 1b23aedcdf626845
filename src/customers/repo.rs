use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{translate, AppError, Op};
use crate::users::repo::UserType;

/// A customer is the user identity plus the profile row; reads always join
/// both tables.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub mail: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<i32>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_type: UserType,
}

const SELECT_CUSTOMER: &str = r#"
    SELECT c.mail, c.name, c.address, c.zip, c.phone, u.created_at, u.user_type
    FROM customers c
    JOIN users u ON u.mail = c.mail
"#;

/// Creates the user row and the profile row under one identity. Both inserts
/// commit together or not at all.
#[allow(clippy::too_many_arguments)]
pub async fn create_customer(
    db: &PgPool,
    mail: &str,
    password_hash: &str,
    name: Option<&str>,
    address: Option<&str>,
    zip: Option<i32>,
    phone: Option<&str>,
) -> Result<Customer, AppError> {
    let mut tx = db
        .begin()
        .await
        .map_err(|e| translate(Op::Create, "customer", e))?;

    sqlx::query(
        r#"
        INSERT INTO users (mail, password_hash, user_type)
        VALUES ($1, $2, 'CUSTOMER')
        "#,
    )
    .bind(mail)
    .bind(password_hash)
    .execute(&mut *tx)
    .await
    .map_err(|e| translate(Op::Create, "customer", e))?;

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (mail, name, address, zip, phone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING mail, name, address, zip, phone,
                  (SELECT created_at FROM users WHERE mail = $1) AS created_at,
                  (SELECT user_type FROM users WHERE mail = $1) AS user_type
        "#,
    )
    .bind(mail)
    .bind(name)
    .bind(address)
    .bind(zip)
    .bind(phone)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| translate(Op::Create, "customer", e))?;

    tx.commit()
        .await
        .map_err(|e| translate(Op::Create, "customer", e))?;
    Ok(customer)
}

pub async fn update_customer(
    db: &PgPool,
    mail: &str,
    name: Option<&str>,
    address: Option<&str>,
    zip: Option<i32>,
    phone: Option<&str>,
) -> Result<Customer, AppError> {
    sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers c
        SET name = $2, address = $3, zip = $4, phone = $5
        FROM users u
        WHERE c.mail = $1 AND u.mail = c.mail
        RETURNING c.mail, c.name, c.address, c.zip, c.phone, u.created_at, u.user_type
        "#,
    )
    .bind(mail)
    .bind(name)
    .bind(address)
    .bind(zip)
    .bind(phone)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Update, "customer", e))
}

/// Deletes the user identity; the profile row and all bookings go with it
/// through the cascades.
pub async fn delete_customer(db: &PgPool, mail: &str) -> Result<(), AppError> {
    sqlx::query_as::<_, (String,)>(
        r#"
        DELETE FROM users
        WHERE mail = $1 AND mail IN (SELECT mail FROM customers)
        RETURNING mail
        "#,
    )
    .bind(mail)
    .fetch_one(db)
    .await
    .map(|_| ())
    .map_err(|e| translate(Op::Delete, "customer", e))
}

pub async fn find_all(db: &PgPool) -> Result<Vec<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(SELECT_CUSTOMER)
        .fetch_all(db)
        .await
        .map_err(|e| translate(Op::Read, "customer", e))
}

pub async fn find_by_mail(db: &PgPool, mail: &str) -> Result<Customer, AppError> {
    sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE c.mail = $1"))
        .bind(mail)
        .fetch_one(db)
        .await
        .map_err(|e| translate(Op::Read, "customer", e))
}

/// Customers having at least one booking.
pub async fn find_with_trips(db: &PgPool) -> Result<Vec<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        "{SELECT_CUSTOMER} WHERE EXISTS (SELECT 1 FROM trip_infos ti WHERE ti.customer_mail = c.mail)"
    ))
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "customer", e))
}

/// All customers, oldest account first.
pub async fn find_all_order_by_creation(db: &PgPool) -> Result<Vec<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} ORDER BY u.created_at ASC"))
        .fetch_all(db)
        .await
        .map_err(|e| translate(Op::Read, "customer", e))
}

/// Customers owning a booking whose window exceeds seven days.
pub async fn find_one_week(db: &PgPool) -> Result<Vec<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        "{SELECT_CUSTOMER} WHERE EXISTS (
            SELECT 1 FROM trip_infos ti
            WHERE ti.customer_mail = c.mail
              AND ti.last_date - ti.initial_date > INTERVAL '7 days'
        )"
    ))
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "customer", e))
}

pub async fn find_by_address(db: &PgPool, address: &str) -> Result<Vec<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE c.address = $1"))
        .bind(address)
        .fetch_all(db)
        .await
        .map_err(|e| translate(Op::Read, "customer", e))
}

pub async fn find_by_name_containing(
    db: &PgPool,
    partial_name: &str,
) -> Result<Vec<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        "{SELECT_CUSTOMER} WHERE c.name ILIKE '%' || $1 || '%'"
    ))
    .bind(partial_name)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "customer", e))
}

// Ignored by default: these hit a live database. Point DATABASE_URL at a
// scratch Postgres and run `cargo test -- --ignored` to exercise the SQL
// predicates and the schema cascades.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tripinfo;
    use crate::trips::{self, repo::TripType};
    use time::Duration;

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("test database should accept connections");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations should apply");
        pool
    }

    fn unique_mail(tag: &str) -> String {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("{tag}-{nanos}@example.test")
    }

    #[tokio::test]
    #[ignore = "needs Postgres; run with -- --ignored"]
    async fn one_week_filter_matches_only_bookings_longer_than_seven_days() {
        let db = pool().await;
        let long_mail = unique_mail("long");
        let short_mail = unique_mail("short");
        create_customer(&db, &long_mail, "HASH", Some("Long Stay"), None, None, None)
            .await
            .expect("customer insert");
        create_customer(&db, &short_mail, "HASH", Some("Short Stay"), None, None, None)
            .await
            .expect("customer insert");

        let trip = trips::repo::create_trip(&db, TripType::Nature, Some("fjords"), &[])
            .await
            .expect("trip insert");
        let now = OffsetDateTime::now_utc();
        tripinfo::repo::create_trip_info(&db, trip.trip_id, &long_mail, now, now + Duration::days(10))
            .await
            .expect("booking insert");
        tripinfo::repo::create_trip_info(&db, trip.trip_id, &short_mail, now, now + Duration::days(3))
            .await
            .expect("booking insert");

        let mails: Vec<String> = find_one_week(&db)
            .await
            .expect("query")
            .into_iter()
            .map(|c| c.mail)
            .collect();
        assert!(mails.contains(&long_mail));
        assert!(!mails.contains(&short_mail));

        delete_customer(&db, &long_mail).await.expect("cleanup");
        delete_customer(&db, &short_mail).await.expect("cleanup");
        trips::repo::delete_trip(&db, trip.trip_id).await.expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "needs Postgres; run with -- --ignored"]
    async fn deleting_a_customer_cascades_to_profile_and_bookings() {
        let db = pool().await;
        let mail = unique_mail("cascade");
        create_customer(&db, &mail, "HASH", Some("Cascade"), None, None, None)
            .await
            .expect("customer insert");
        let trip = trips::repo::create_trip(&db, TripType::Culture, None, &[])
            .await
            .expect("trip insert");
        let now = OffsetDateTime::now_utc();
        tripinfo::repo::create_trip_info(&db, trip.trip_id, &mail, now, now + Duration::days(5))
            .await
            .expect("booking insert");

        delete_customer(&db, &mail).await.expect("delete");

        assert!(matches!(find_by_mail(&db, &mail).await, Err(AppError::NotFound)));
        assert!(matches!(
            crate::users::repo::find_by_mail(&db, &mail).await,
            Err(AppError::NotFound)
        ));
        let bookings = tripinfo::repo::find_all_by_customer(&db, &mail)
            .await
            .expect("query");
        assert!(bookings.is_empty());

        trips::repo::delete_trip(&db, trip.trip_id).await.expect("cleanup");
    }
}
