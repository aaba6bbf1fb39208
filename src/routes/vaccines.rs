//! Routes for registering, searching, editing and removing vaccines.

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::notification::Outcome;
use crate::forms::vaccine::{VaccineForm, VaccineSearchForm};
use crate::forms::{FieldErrors, RecordIdForm, decode};
use crate::repository::DieselRepository;
use crate::routes::{
    Section, base_context, completed, failed, invalid_search, is_htmx, render_template, render_with,
    show_outcome, swapped_fragment,
};
use crate::services::{ServiceError, vaccine as vaccine_service};

pub const VACCINES: Section = Section {
    prefix: "/vacinas",
    label: "Vacina",
    templates: "vaccines",
    nav: "vacinas",
};

fn render_form(
    req: &HttpRequest,
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &str,
    form: &VaccineForm,
    errors: &FieldErrors,
) -> HttpResponse {
    let mut context = base_context(flash_messages, VACCINES.nav);
    context.insert("form", form);
    context.insert("errors", errors);
    render_template(tera, &VACCINES.template(page, is_htmx(req)), &context)
}

#[get("/vacinas/todas")]
/// Table with every active vaccine.
pub async fn show_all_vaccines(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match vaccine_service::list_active_vaccines(repo.get_ref()) {
        Ok(vaccines) => {
            let mut context = base_context(&flash_messages, VACCINES.nav);
            context.insert("vaccines", &vaccines);
            render_template(&tera, &VACCINES.template("all", is_htmx(&req)), &context)
        }
        Err(err) => failed(&req, &VACCINES, err),
    }
}

#[get("/vacinas/cadastrar")]
pub async fn show_register_vaccine(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &req,
        &tera,
        &flash_messages,
        "register",
        &VaccineForm::default(),
        &FieldErrors::new(),
    )
}

#[post("/vacinas/cadastrar")]
/// Save a new vaccine; invalid input re-renders the form with field messages.
pub async fn register_vaccine(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let form: VaccineForm = match decode(&body) {
        Ok(form) => form,
        Err(err) => return failed(&req, &VACCINES, err.into()),
    };

    match vaccine_service::register_vaccine(repo.get_ref(), &form) {
        Ok(_) => completed(&req, &VACCINES, Outcome::Cadastro),
        Err(ServiceError::Validation(errors)) => {
            render_form(&req, &tera, &flash_messages, "register", &form, &errors)
        }
        Err(err) => failed(&req, &VACCINES, err),
    }
}

#[get("/vacinas/sucesso/{outcome}")]
pub async fn show_vaccine_outcome(
    req: HttpRequest,
    outcome: web::Path<Outcome>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_outcome(
        &req,
        &tera,
        &flash_messages,
        &VACCINES,
        outcome.into_inner(),
    )
}

#[get("/vacinas/abrirpesquisar")]
pub async fn show_search_vaccines(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, VACCINES.nav);
    context.insert("criteria", &VaccineSearchForm::default());
    render_template(&tera, &VACCINES.template("search", is_htmx(&req)), &context)
}

#[get("/vacinas/pesquisar")]
/// Filtered, paginated search. Page links repeat the current criteria.
pub async fn search_vaccines(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = decode::<VaccineSearchForm>(req.query_string().as_bytes())
        .map_err(ServiceError::from)
        .and_then(|form| vaccine_service::search_vaccines(repo.get_ref(), form));

    match result {
        Ok(data) => {
            let mut context = base_context(&flash_messages, VACCINES.nav);
            context.insert("criteria", &data.criteria);
            context.insert("results", &data.results);
            if is_htmx(&req) {
                render_with(
                    swapped_fragment(),
                    &tera,
                    &VACCINES.template("results", true),
                    &context,
                )
            } else {
                render_template(&tera, &VACCINES.template("results", false), &context)
            }
        }
        Err(ServiceError::BadRequest(message)) => {
            invalid_search(&req, &tera, &flash_messages, &VACCINES, &message)
        }
        Err(err) => failed(&req, &VACCINES, err),
    }
}

#[post("/vacinas/abriralterar")]
/// Edit form for the posted vaccine id.
pub async fn show_edit_vaccine(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let result = decode::<RecordIdForm>(&body)
        .and_then(|form| form.id())
        .map_err(ServiceError::from)
        .and_then(|id| vaccine_service::load_vaccine(repo.get_ref(), id));

    match result {
        Ok(vaccine) => render_form(
            &req,
            &tera,
            &flash_messages,
            "edit",
            &VaccineForm::from(&vaccine),
            &FieldErrors::new(),
        ),
        Err(err) => failed(&req, &VACCINES, err),
    }
}

#[post("/vacinas/alterar")]
pub async fn update_vaccine(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let form: VaccineForm = match decode(&body) {
        Ok(form) => form,
        Err(err) => return failed(&req, &VACCINES, err.into()),
    };

    match vaccine_service::update_vaccine(repo.get_ref(), &form) {
        Ok(_) => completed(&req, &VACCINES, Outcome::Alteracao),
        Err(ServiceError::Validation(errors)) if form.id.is_some() => {
            render_form(&req, &tera, &flash_messages, "edit", &form, &errors)
        }
        Err(err) => failed(&req, &VACCINES, err),
    }
}

#[post("/vacinas/remover")]
/// Soft delete: the vaccine is marked inactive, never removed.
pub async fn remove_vaccine(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = decode::<RecordIdForm>(&body)
        .and_then(|form| form.id())
        .map_err(ServiceError::from)
        .and_then(|id| vaccine_service::deactivate_vaccine(repo.get_ref(), id));

    match result {
        Ok(_) => completed(&req, &VACCINES, Outcome::Remocao),
        Err(err) => failed(&req, &VACCINES, err),
    }
}
