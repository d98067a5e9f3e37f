use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::library::{LibraryError, LibraryResult, MemberStatus};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;

pub(crate) const MEMBER_COLUMNS: &str = "id, name, email, membership_number, status, created_at, updated_at";

#[derive(Debug)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self {
            pool,
        }
    }
}

#[async_trait]
impl Repository<MemberEntity> for PgMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<MemberEntity> {
        let sql = format!("INSERT INTO members (name, email, membership_number, status, created_at, updated_at) \
                           VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}", MEMBER_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(&entity.name)
            .bind(&entity.email)
            .bind(&entity.membership_number)
            .bind(entity.status.to_string())
            .bind(entity.created_at)
            .bind(entity.updated_at)
            .fetch_one(&self.pool)
            .await?;
        map_to_member(&row)
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let res = sqlx::query("UPDATE members SET name = $2, email = $3, membership_number = $4, status = $5, \
                               updated_at = $6 WHERE id = $1")
            .bind(entity.id)
            .bind(&entity.name)
            .bind(&entity.email)
            .bind(&entity.membership_number)
            .bind(entity.status.to_string())
            .bind(entity.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() as usize)
    }

    async fn get(&self, id: i64) -> LibraryResult<MemberEntity> {
        let sql = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => map_to_member(&row),
            None => Err(LibraryError::not_found(format!("member not found for {}", id).as_str())),
        }
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let res = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() as usize)
    }

    async fn find_all(&self) -> LibraryResult<Vec<MemberEntity>> {
        let sql = format!("SELECT {} FROM members ORDER BY id", MEMBER_COLUMNS);
        let rows = sqlx::query(sql.as_str()).fetch_all(&self.pool).await?;
        rows.iter().map(map_to_member).collect()
    }
}

impl MemberRepository for PgMemberRepository {}

pub(crate) fn map_to_member(row: &PgRow) -> LibraryResult<MemberEntity> {
    let status: String = row.try_get("status")?;
    Ok(MemberEntity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        membership_number: row.try_get("membership_number")?,
        status: MemberStatus::try_from(status.as_str())?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
