//! Forms for registering, editing and searching vaccines.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{VaccineDescription, VaccineId, VaccineName};
use crate::domain::vaccine::{NewVaccine, UpdateVaccine, Vaccine, VaccineFilter, VaccineSort};
use crate::forms::{FormError, not_blank, page_request};
use crate::pagination::{PageRequest, PageRequestError};

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct VaccineForm {
    #[serde(default, rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, rename = "nome")]
    #[validate(custom(function = "not_blank", message = "O nome da vacina é obrigatório"))]
    pub name: String,
    #[serde(default, rename = "descricao")]
    #[validate(custom(
        function = "not_blank",
        message = "A descrição da vacina é obrigatória"
    ))]
    pub description: String,
}

impl VaccineForm {
    pub fn to_new_vaccine(&self) -> Result<NewVaccine, FormError> {
        self.validate()?;
        Ok(NewVaccine::new(
            VaccineName::new(self.name.as_str())?,
            VaccineDescription::new(self.description.as_str())?,
        ))
    }

    pub fn to_update_vaccine(&self) -> Result<(VaccineId, UpdateVaccine), FormError> {
        let id = VaccineId::new(self.id.ok_or(FormError::MissingId)?)?;
        self.validate()?;
        let updates = UpdateVaccine::new(
            VaccineName::new(self.name.as_str())?,
            VaccineDescription::new(self.description.as_str())?,
        );
        Ok((id, updates))
    }
}

impl From<&Vaccine> for VaccineForm {
    fn from(vaccine: &Vaccine) -> Self {
        Self {
            id: Some(vaccine.id.get()),
            name: vaccine.name.to_string(),
            description: vaccine.description.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VaccineSearchForm {
    #[serde(default, rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing)]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl VaccineSearchForm {
    pub fn filter(&self) -> VaccineFilter {
        VaccineFilter::new(self.id, self.name.clone(), self.description.clone())
    }

    pub fn page_request(&self) -> Result<PageRequest<VaccineSort>, PageRequestError> {
        page_request(self.page, self.size, self.sort.as_deref())
    }

    /// Query string reproducing these criteria, without the page index.
    pub fn link_query(&self) -> String {
        serde_html_form::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FORM_ERRORS_KEY, decode};

    #[test]
    fn blank_description_is_rejected() {
        let form: VaccineForm = decode(b"nome=BCG&descricao=").unwrap();
        let errors = form.to_new_vaccine().unwrap_err().into_field_errors();
        assert_eq!(
            errors["description"],
            vec!["A descrição da vacina é obrigatória".to_string()]
        );
    }

    #[test]
    fn markup_only_description_is_rejected_after_sanitizing() {
        let form: VaccineForm =
            decode(b"nome=BCG&descricao=%3Cscript%3Ealert(1)%3C%2Fscript%3E").unwrap();
        let errors = form.to_new_vaccine().unwrap_err().into_field_errors();
        assert!(errors.contains_key(FORM_ERRORS_KEY));
    }

    #[test]
    fn description_keeps_safe_text() {
        let form: VaccineForm = decode(b"nome=BCG&descricao=Dose+%3Cb%3Eunica%3C%2Fb%3E").unwrap();
        let new_vaccine = form.to_new_vaccine().unwrap();
        assert_eq!(new_vaccine.description.as_str(), "Dose <b>unica</b>");
    }

    #[test]
    fn search_form_reads_description_filter() {
        let form: VaccineSearchForm = decode(b"descricao=dose&sort=descricao,desc").unwrap();
        assert_eq!(form.filter().description.as_deref(), Some("dose"));
        assert_eq!(
            form.page_request().unwrap().sort().key,
            VaccineSort::Description
        );
    }
}
