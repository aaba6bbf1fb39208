//! Domain model for people registered in the vaccination records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Cpf, PersonId, PersonName, RecordStatus, non_blank};
use crate::pagination::SortKey;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: PersonName,
    pub cpf: Cpf,
    pub status: RecordStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Person {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

/// Data required to register a person. New people always start active.
#[derive(Clone, Debug, Deserialize)]
pub struct NewPerson {
    pub name: PersonName,
    pub cpf: Cpf,
}

impl NewPerson {
    #[must_use]
    pub fn new(name: PersonName, cpf: Cpf) -> Self {
        Self { name, cpf }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdatePerson {
    pub name: PersonName,
    pub cpf: Cpf,
}

impl UpdatePerson {
    #[must_use]
    pub fn new(name: PersonName, cpf: Cpf) -> Self {
        Self { name, cpf }
    }
}

/// Sparse search criteria. `id` matches exactly, text fields match a
/// case-insensitive substring; `None` imposes no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub cpf: Option<String>,
}

impl PersonFilter {
    #[must_use]
    pub fn new(id: Option<i32>, name: Option<String>, cpf: Option<String>) -> Self {
        Self {
            id,
            name: non_blank(name),
            cpf: non_blank(cpf),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.cpf.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersonSort {
    #[default]
    Id,
    Name,
    Cpf,
}

impl SortKey for PersonSort {
    fn from_column(name: &str) -> Option<Self> {
        match name {
            "id" | "codigo" => Some(PersonSort::Id),
            "name" | "nome" => Some(PersonSort::Name),
            "cpf" => Some(PersonSort::Cpf),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            PersonSort::Id => "codigo",
            PersonSort::Name => "nome",
            PersonSort::Cpf => "cpf",
        }
    }
}
