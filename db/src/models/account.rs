//! The three kinds of login account behind one lookup interface.

use sea_orm::{DbConn, DbErr};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{Display, EnumString};

use super::{admin, student, teacher};

/// Role carried in access tokens and used by route guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// Infers the role from the login id prefix: `S`, `T` or `A`.
    pub fn from_account_id(account_id: &str) -> Option<Role> {
        match account_id.trim().chars().next()?.to_ascii_uppercase() {
            'S' => Some(Role::Student),
            'T' => Some(Role::Teacher),
            'A' => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A loaded account row of any role.
#[derive(Debug, Clone)]
pub enum Account {
    Student(student::Model),
    Teacher(teacher::Model),
    Admin(admin::Model),
}

impl Account {
    /// Looks up an account by its public login id within a role table.
    pub async fn find(db: &DbConn, role: Role, account_id: &str) -> Result<Option<Account>, DbErr> {
        Ok(match role {
            Role::Student => student::Model::find_by_student_id(db, account_id)
                .await?
                .map(Account::Student),
            Role::Teacher => teacher::Model::find_by_staff_id(db, account_id)
                .await?
                .map(Account::Teacher),
            Role::Admin => admin::Model::find_by_admin_id(db, account_id)
                .await?
                .map(Account::Admin),
        })
    }

    /// Looks up an account by row id within a role table.
    pub async fn find_by_id(db: &DbConn, role: Role, id: i64) -> Result<Option<Account>, DbErr> {
        use sea_orm::EntityTrait;

        Ok(match role {
            Role::Student => student::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Account::Student),
            Role::Teacher => teacher::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Account::Teacher),
            Role::Admin => admin::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Account::Admin),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            Account::Student(_) => Role::Student,
            Account::Teacher(_) => Role::Teacher,
            Account::Admin(_) => Role::Admin,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Account::Student(s) => s.id,
            Account::Teacher(t) => t.id,
            Account::Admin(a) => a.id,
        }
    }

    pub fn account_id(&self) -> &str {
        match self {
            Account::Student(s) => &s.student_id,
            Account::Teacher(t) => &t.staff_id,
            Account::Admin(a) => &a.admin_id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Account::Student(s) => &s.username,
            Account::Teacher(t) => &t.username,
            Account::Admin(a) => &a.username,
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        match self {
            Account::Student(s) => s.verify_password(password),
            Account::Teacher(t) => t.verify_password(password),
            Account::Admin(a) => a.verify_password(password),
        }
    }

    pub async fn set_password(&self, db: &DbConn, password: &str) -> Result<(), DbErr> {
        match self {
            Account::Student(s) => student::Model::set_password(db, s.id, password).await,
            Account::Teacher(t) => teacher::Model::set_password(db, t.id, password).await,
            Account::Admin(a) => admin::Model::set_password(db, a.id, password).await,
        }
    }

    /// Public profile: `username` and `role` plus the role specific fields.
    pub fn profile(&self) -> Value {
        let mut profile = json!({
            "username": self.username(),
            "role": self.role(),
        });

        let extra = match self {
            Account::Student(s) => json!({
                "student_id": s.student_id,
                "college": s.college,
                "major": s.major,
                "grade": s.grade,
                "enrollment_year": s.enrollment_year,
                "intro": s.intro,
                "contact_email": s.contact_email,
            }),
            Account::Teacher(t) => json!({
                "staff_id": t.staff_id,
                "department": t.department,
                "expertise": t.expertise,
                "intro": t.intro,
                "contact_email": t.contact_email,
                "office_location": t.office_location,
            }),
            Account::Admin(a) => json!({
                "admin_id": a.admin_id,
                "permissions": a.permissions,
            }),
        };

        if let (Some(base), Value::Object(extra)) = (profile.as_object_mut(), extra) {
            base.extend(extra);
        }
        profile
    }
}
