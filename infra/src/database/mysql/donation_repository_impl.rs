//! MySQL implementation of the DonationRepository trait.
//!
//! Category links are kept in `donation_categories` with their position so
//! a donation reads back its categories in submission order.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use gh_core::domain::entities::Donation;
use gh_core::errors::DomainError;
use gh_core::repositories::DonationRepository;

use super::{column, db_error, optional_uuid_column, uuid_column};

const SELECT_DONATIONS: &str = r#"
    SELECT d.id, d.quantity, d.street, d.city, d.zip_code, d.pick_up_date, d.pick_up_time,
           d.pick_up_comment, d.phone_number, d.institution_id, d.user_id, d.created_at,
           d.received, d.received_at, dc.category_id
    FROM donations d
    LEFT JOIN donation_categories dc ON dc.donation_id = d.id
"#;

const ORDER: &str = "ORDER BY d.created_at, d.id, dc.position";

pub struct MySqlDonationRepository {
    pool: MySqlPool,
}

impl MySqlDonationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Fold joined donation/category rows, which must be ordered by donation
    fn rows_to_donations(rows: &[MySqlRow]) -> Result<Vec<Donation>, DomainError> {
        let mut donations: Vec<Donation> = Vec::new();

        for row in rows {
            let id = uuid_column(row, "id")?;
            let category_id = optional_uuid_column(row, "category_id")?;

            if donations.last().map(|d| d.id) != Some(id) {
                donations.push(Self::row_to_donation(row, id)?);
            }
            if let (Some(category_id), Some(donation)) = (category_id, donations.last_mut()) {
                donation.category_ids.push(category_id);
            }
        }

        Ok(donations)
    }

    fn row_to_donation(row: &MySqlRow, id: Uuid) -> Result<Donation, DomainError> {
        Ok(Donation {
            id,
            quantity: column(row, "quantity")?,
            street: column(row, "street")?,
            city: column(row, "city")?,
            zip_code: column(row, "zip_code")?,
            pick_up_date: column::<NaiveDate>(row, "pick_up_date")?,
            pick_up_time: column::<NaiveTime>(row, "pick_up_time")?,
            pick_up_comment: column(row, "pick_up_comment")?,
            phone_number: column(row, "phone_number")?,
            category_ids: Vec::new(),
            institution_id: optional_uuid_column(row, "institution_id")?,
            user_id: optional_uuid_column(row, "user_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            received: column(row, "received")?,
            received_at: column::<Option<DateTime<Utc>>>(row, "received_at")?,
        })
    }

    async fn select(&self, condition: Option<&str>, value: Option<String>) -> Result<Vec<Donation>, DomainError> {
        let query = match condition {
            Some(condition) => format!("{} WHERE {} {}", SELECT_DONATIONS, condition, ORDER),
            None => format!("{} {}", SELECT_DONATIONS, ORDER),
        };
        let mut query = sqlx::query(&query);
        if let Some(value) = value {
            query = query.bind(value);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list donations"))?;

        Self::rows_to_donations(&rows)
    }
}

#[async_trait]
impl DonationRepository for MySqlDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DomainError> {
        Ok(self
            .select(Some("d.id = ?"), Some(id.to_string()))
            .await?
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<Donation>, DomainError> {
        self.select(None, None).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Donation>, DomainError> {
        self.select(Some("d.user_id = ?"), Some(user_id.to_string()))
            .await
    }

    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<Donation>, DomainError> {
        self.select(
            Some("d.id IN (SELECT donation_id FROM donation_categories WHERE category_id = ?)"),
            Some(category_id.to_string()),
        )
        .await
    }

    async fn find_by_institution_id(
        &self,
        institution_id: Uuid,
    ) -> Result<Vec<Donation>, DomainError> {
        self.select(Some("d.institution_id = ?"), Some(institution_id.to_string()))
            .await
    }

    async fn save(&self, donation: Donation) -> Result<Donation, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO donations (
                id, quantity, street, city, zip_code, pick_up_date, pick_up_time,
                pick_up_comment, phone_number, institution_id, user_id, created_at,
                received, received_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                quantity = VALUES(quantity),
                street = VALUES(street),
                city = VALUES(city),
                zip_code = VALUES(zip_code),
                pick_up_date = VALUES(pick_up_date),
                pick_up_time = VALUES(pick_up_time),
                pick_up_comment = VALUES(pick_up_comment),
                phone_number = VALUES(phone_number),
                institution_id = VALUES(institution_id),
                user_id = VALUES(user_id),
                received = VALUES(received),
                received_at = VALUES(received_at)
            "#,
        )
        .bind(donation.id.to_string())
        .bind(donation.quantity)
        .bind(&donation.street)
        .bind(&donation.city)
        .bind(&donation.zip_code)
        .bind(donation.pick_up_date)
        .bind(donation.pick_up_time)
        .bind(&donation.pick_up_comment)
        .bind(&donation.phone_number)
        .bind(donation.institution_id.map(|id| id.to_string()))
        .bind(donation.user_id.map(|id| id.to_string()))
        .bind(donation.created_at)
        .bind(donation.received)
        .bind(donation.received_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("save donation"))?;

        sqlx::query("DELETE FROM donation_categories WHERE donation_id = ?")
            .bind(donation.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("clear donation categories"))?;

        for (position, category_id) in donation.category_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO donation_categories (donation_id, category_id, position) VALUES (?, ?, ?)",
            )
            .bind(donation.id.to_string())
            .bind(category_id.to_string())
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(db_error("link donation category"))?;
        }

        tx.commit().await.map_err(db_error("commit donation"))?;
        Ok(donation)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        // Category links cascade
        let result = sqlx::query("DELETE FROM donations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete donation"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM donations")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count donations"))?;

        let total: i64 = column(&row, "total")?;
        Ok(total.max(0) as u64)
    }

    async fn sum_quantity(&self) -> Result<u64, DomainError> {
        // SUM over INT yields DECIMAL; cast keeps it integral
        let row = sqlx::query("SELECT CAST(COALESCE(SUM(quantity), 0) AS SIGNED) AS bags FROM donations")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("sum donation quantity"))?;

        let bags: i64 = column(&row, "bags")?;
        Ok(bags.max(0) as u64)
    }
}
