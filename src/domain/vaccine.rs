use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{RecordStatus, VaccineDescription, VaccineId, VaccineName, non_blank};
use crate::pagination::SortKey;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vaccine {
    pub id: VaccineId,
    pub name: VaccineName,
    pub description: VaccineDescription,
    pub status: RecordStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Vaccine {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewVaccine {
    pub name: VaccineName,
    pub description: VaccineDescription,
}

impl NewVaccine {
    #[must_use]
    pub fn new(name: VaccineName, description: VaccineDescription) -> Self {
        Self { name, description }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateVaccine {
    pub name: VaccineName,
    pub description: VaccineDescription,
}

impl UpdateVaccine {
    #[must_use]
    pub fn new(name: VaccineName, description: VaccineDescription) -> Self {
        Self { name, description }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VaccineFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl VaccineFilter {
    #[must_use]
    pub fn new(id: Option<i32>, name: Option<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: non_blank(name),
            description: non_blank(description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.description.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VaccineSort {
    #[default]
    Id,
    Name,
    Description,
}

impl SortKey for VaccineSort {
    fn from_column(name: &str) -> Option<Self> {
        match name {
            "id" | "codigo" => Some(VaccineSort::Id),
            "name" | "nome" => Some(VaccineSort::Name),
            "description" | "descricao" => Some(VaccineSort::Description),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            VaccineSort::Id => "codigo",
            VaccineSort::Name => "nome",
            VaccineSort::Description => "descricao",
        }
    }
}
