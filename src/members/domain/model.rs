use chrono::NaiveDateTime;
use crate::core::domain::Identifiable;
use crate::core::library::MemberStatus;

// MemberEntity abstracts a library member who can borrow books.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct MemberEntity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub membership_number: String,
    pub status: MemberStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(name: &str, email: &str, membership_number: &str, now: NaiveDateTime) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            email: email.to_string(),
            membership_number: membership_number.to_string(),
            status: MemberStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> i64 {
        self.id
    }
}
