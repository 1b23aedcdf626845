use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{translate, AppError, Op};

/// Booking record linking one customer to one trip over a date window,
/// keyed by the composite (trip, customer) identity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TripInfo {
    pub trip_id: i64,
    pub customer_mail: String,
    #[serde(with = "time::serde::rfc3339")]
    pub initial_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_date: OffsetDateTime,
}

impl TripInfo {
    /// A booking is active while its end date lies in the future.
    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        self.last_date > now
    }
}

pub async fn create_trip_info(
    db: &PgPool,
    trip_id: i64,
    customer_mail: &str,
    initial_date: OffsetDateTime,
    last_date: OffsetDateTime,
) -> Result<TripInfo, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        INSERT INTO trip_infos (trip_id, customer_mail, initial_date, last_date)
        VALUES ($1, $2, $3, $4)
        RETURNING trip_id, customer_mail, initial_date, last_date
        "#,
    )
    .bind(trip_id)
    .bind(customer_mail)
    .bind(initial_date)
    .bind(last_date)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Create, "trip info", e))
}

pub async fn update_trip_info(
    db: &PgPool,
    trip_id: i64,
    customer_mail: &str,
    initial_date: OffsetDateTime,
    last_date: OffsetDateTime,
) -> Result<TripInfo, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        UPDATE trip_infos
        SET initial_date = $3, last_date = $4
        WHERE trip_id = $1 AND customer_mail = $2
        RETURNING trip_id, customer_mail, initial_date, last_date
        "#,
    )
    .bind(trip_id)
    .bind(customer_mail)
    .bind(initial_date)
    .bind(last_date)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Update, "trip info", e))
}

pub async fn delete_trip_info(
    db: &PgPool,
    trip_id: i64,
    customer_mail: &str,
) -> Result<(), AppError> {
    sqlx::query_as::<_, (i64,)>(
        r#"
        DELETE FROM trip_infos
        WHERE trip_id = $1 AND customer_mail = $2
        RETURNING trip_id
        "#,
    )
    .bind(trip_id)
    .bind(customer_mail)
    .fetch_one(db)
    .await
    .map(|_| ())
    .map_err(|e| translate(Op::Delete, "trip info", e))
}

pub async fn find_by_id(
    db: &PgPool,
    trip_id: i64,
    customer_mail: &str,
) -> Result<TripInfo, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        SELECT trip_id, customer_mail, initial_date, last_date
        FROM trip_infos
        WHERE trip_id = $1 AND customer_mail = $2
        "#,
    )
    .bind(trip_id)
    .bind(customer_mail)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Read, "trip info", e))
}

pub async fn find_all_by_trip(db: &PgPool, trip_id: i64) -> Result<Vec<TripInfo>, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        SELECT trip_id, customer_mail, initial_date, last_date
        FROM trip_infos
        WHERE trip_id = $1
        ORDER BY initial_date
        "#,
    )
    .bind(trip_id)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip info", e))
}

pub async fn find_all_by_customer(
    db: &PgPool,
    customer_mail: &str,
) -> Result<Vec<TripInfo>, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        SELECT trip_id, customer_mail, initial_date, last_date
        FROM trip_infos
        WHERE customer_mail = $1
        ORDER BY initial_date
        "#,
    )
    .bind(customer_mail)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip info", e))
}

/// Bookings of the customer whose end date lies after `now`.
pub async fn find_active_by_customer(
    db: &PgPool,
    customer_mail: &str,
    now: OffsetDateTime,
) -> Result<Vec<TripInfo>, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        SELECT trip_id, customer_mail, initial_date, last_date
        FROM trip_infos
        WHERE customer_mail = $1 AND last_date > $2
        ORDER BY initial_date
        "#,
    )
    .bind(customer_mail)
    .bind(now)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip info", e))
}

/// Bookings of the customer whose end date lies before `now`.
pub async fn find_inactive_by_customer(
    db: &PgPool,
    customer_mail: &str,
    now: OffsetDateTime,
) -> Result<Vec<TripInfo>, AppError> {
    sqlx::query_as::<_, TripInfo>(
        r#"
        SELECT trip_id, customer_mail, initial_date, last_date
        FROM trip_infos
        WHERE customer_mail = $1 AND last_date < $2
        ORDER BY initial_date
        "#,
    )
    .bind(customer_mail)
    .bind(now)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip info", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn booking(initial: OffsetDateTime, last: OffsetDateTime) -> TripInfo {
        TripInfo {
            trip_id: 1,
            customer_mail: "ana@example.com".into(),
            initial_date: initial,
            last_date: last,
        }
    }

    #[test]
    fn booking_ending_in_the_future_is_active() {
        let now = OffsetDateTime::now_utc();
        let b = booking(now - Duration::days(2), now + Duration::days(3));
        assert!(b.is_active(now));
    }

    #[test]
    fn booking_ending_in_the_past_is_inactive() {
        let now = OffsetDateTime::now_utc();
        let b = booking(now - Duration::days(10), now - Duration::days(3));
        assert!(!b.is_active(now));
    }

    #[test]
    fn classification_is_exclusive() {
        let now = OffsetDateTime::now_utc();
        for offset in [-30, -1, 1, 30] {
            let b = booking(now - Duration::days(40), now + Duration::days(offset));
            let active = b.is_active(now);
            let inactive = b.last_date < now;
            assert!(active != inactive, "offset {offset} classified as both or neither");
        }
    }
}
