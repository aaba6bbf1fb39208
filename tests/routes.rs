use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;
use vaccine_control::configure;
use vaccine_control::domain::person::NewPerson;
use vaccine_control::domain::types::{Cpf, PersonName, RecordStatus};
use vaccine_control::repository::{DieselRepository, PersonReader, PersonWriter, VaccineReader};
use vaccine_control::routes::{alert_level_to_str, load_templates};

mod common;

fn flash_framework() -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(Key::from(&[7u8; 64])).build();
    FlashMessagesFramework::builder(store).build()
}

fn templates() -> Tera {
    load_templates("templates/**/*").expect("templates parse")
}

macro_rules! init_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .wrap(flash_framework())
                .configure(configure)
                .app_data(web::Data::new(templates()))
                .app_data(web::Data::new(DieselRepository::new($db.pool()))),
        )
        .await
    };
}

fn form_post(uri: &str, body: &'static str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(body)
}

fn seed_person(repo: &DieselRepository, name: &str, cpf: &str) -> i32 {
    let new_person = NewPerson::new(PersonName::new(name).unwrap(), Cpf::new(cpf).unwrap());
    repo.create_person(&new_person).unwrap().id.get()
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn test_index_renders() {
    let db = common::TestDb::new("routes_index.db");
    let app = init_app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Controle de Vacinação"));
}

#[actix_web::test]
async fn test_register_person_redirects_to_success_page() {
    let db = common::TestDb::new("routes_register_person.db");
    let app = init_app!(db);

    let req = form_post("/pessoas/cadastrar", "nome=Ana&cpf=111").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/pessoas/sucesso/cadastro"
    );

    let people = DieselRepository::new(db.pool()).list_active_people().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name.as_str(), "Ana");
}

#[actix_web::test]
async fn test_htmx_register_person_sets_hx_location() {
    let db = common::TestDb::new("routes_htmx_register_person.db");
    let app = init_app!(db);

    let req = form_post("/pessoas/cadastrar", "nome=Ana&cpf=111")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let location = resp
        .headers()
        .get("HX-Location")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(location.contains(r#""path":"/pessoas/sucesso/cadastro""#));
    assert!(location.contains(r##""target":"#main""##));
}

#[actix_web::test]
async fn test_htmx_register_person_with_blank_name_rerenders_form() {
    let db = common::TestDb::new("routes_register_invalid.db");
    let app = init_app!(db);

    let req = form_post("/pessoas/cadastrar", "nome=+&cpf=111")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("HX-Location").is_none());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("O nome da pessoa é obrigatório"));
    assert!(!body.contains("<html"));

    let people = DieselRepository::new(db.pool()).list_active_people().unwrap();
    assert!(people.is_empty());
}

#[actix_web::test]
async fn test_htmx_search_returns_fragment_with_active_matches() {
    let db = common::TestDb::new("routes_search_people.db");
    let repo = DieselRepository::new(db.pool());
    seed_person(&repo, "Ana", "111");
    seed_person(&repo, "Anamaria", "222");
    let bruno = seed_person(&repo, "Bruno", "333");
    repo.set_person_status(bruno.try_into().unwrap(), RecordStatus::Inactive)
        .unwrap();
    let app = init_app!(db);

    let req = test::TestRequest::get()
        .uri("/pessoas/pesquisar?codigo=&nome=ANA&cpf=")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("HX-Trigger-After-Swap").unwrap(),
        "htmlAtualizado"
    );
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Anamaria"));
    assert!(!body.contains("Bruno"));
    assert!(body.contains("2 registro(s) encontrado(s)"));
}

#[actix_web::test]
async fn test_search_with_unknown_sort_is_bad_request() {
    let db = common::TestDb::new("routes_search_unknown_sort.db");
    let app = init_app!(db);

    let req = test::TestRequest::get()
        .uri("/pessoas/pesquisar?sort=senha,asc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("unknown sort column"));
    assert!(body.contains("Pesquisar Pessoas"));
}

#[actix_web::test]
async fn test_search_with_negative_page_is_bad_request() {
    let db = common::TestDb::new("routes_search_negative_page.db");
    let app = init_app!(db);

    let req = test::TestRequest::get()
        .uri("/vacinas/pesquisar?nome=bcg&page=-1")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_search_with_unreachable_page_is_bad_request() {
    let db = common::TestDb::new("routes_search_unreachable_page.db");
    let repo = DieselRepository::new(db.pool());
    seed_person(&repo, "Ana", "111");
    let app = init_app!(db);

    let req = test::TestRequest::get()
        .uri("/pessoas/pesquisar?nome=ana&page=9223372036854775807")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("past the last addressable row"));
}

#[actix_web::test]
async fn test_remove_person_marks_inactive() {
    let db = common::TestDb::new("routes_remove_person.db");
    let repo = DieselRepository::new(db.pool());
    let id = seed_person(&repo, "Ana", "111");
    let app = init_app!(db);

    let req = form_post("/pessoas/remover", "codigo=1")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let location = resp
        .headers()
        .get("HX-Location")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(location.contains("/pessoas/sucesso/remocao"));

    assert!(repo.list_active_people().unwrap().is_empty());
    let stored = repo
        .get_person_by_id(id.try_into().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RecordStatus::Inactive);
}

#[actix_web::test]
async fn test_edit_unknown_person_redirects_to_search() {
    let db = common::TestDb::new("routes_edit_unknown.db");
    let app = init_app!(db);

    let req = form_post("/pessoas/abriralterar", "codigo=42").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/pessoas/abrirpesquisar"
    );
}

#[actix_web::test]
async fn test_update_person_changes_stored_values() {
    let db = common::TestDb::new("routes_update_person.db");
    let repo = DieselRepository::new(db.pool());
    let id = seed_person(&repo, "Ana", "111");
    let app = init_app!(db);

    let req = form_post("/pessoas/abriralterar", "codigo=1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = form_post("/pessoas/alterar", "codigo=1&nome=Ana+Paula&cpf=111").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/pessoas/sucesso/alteracao"
    );

    let stored = repo
        .get_person_by_id(id.try_into().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.name.as_str(), "Ana Paula");
}

#[actix_web::test]
async fn test_success_page_variants() {
    let db = common::TestDb::new("routes_success_page.db");
    let app = init_app!(db);

    let req = test::TestRequest::get()
        .uri("/pessoas/sucesso/cadastro")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Cadastro de Pessoa Efetuado com Sucesso"));

    let req = test::TestRequest::get()
        .uri("/pessoas/sucesso/cadastro")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("HX-Trigger-After-Swap").unwrap(),
        "htmlAtualizado"
    );
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Pessoa cadastrada com sucesso!"));
    assert!(body.contains("data-timer=\"4000\""));
    assert!(body.contains("Cadastro de Pessoa"));
}

#[actix_web::test]
async fn test_unknown_outcome_is_not_found() {
    let db = common::TestDb::new("routes_unknown_outcome.db");
    let app = init_app!(db);

    let req = test::TestRequest::get()
        .uri("/vacinas/sucesso/desconhecido")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_register_vaccine_and_list_all() {
    let db = common::TestDb::new("routes_register_vaccine.db");
    let app = init_app!(db);

    let req = form_post("/vacinas/cadastrar", "nome=BCG&descricao=Dose+unica").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::get()
        .uri("/vacinas/todas")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("BCG"));
    assert!(body.contains("Dose unica"));

    let vaccines = DieselRepository::new(db.pool())
        .list_active_vaccines()
        .unwrap();
    assert_eq!(vaccines.len(), 1);
}

#[actix_web::test]
async fn test_vaccine_description_searches_as_typed_and_renders_escaped() {
    let db = common::TestDb::new("routes_vaccine_description.db");
    let app = init_app!(db);

    let req = form_post(
        "/vacinas/cadastrar",
        "nome=DTP&descricao=Difteria+%26+T%C3%A9tano+%3C3+doses%3Cscript%3Ex%3C%2Fscript%3E",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::get()
        .uri("/vacinas/pesquisar?descricao=DIFTERIA+%26+T%C3%89TANO")
        .insert_header(("HX-Request", "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("1 registro(s) encontrado(s)"));
    assert!(body.contains("Difteria &amp; Tétano &lt;3 doses"));
    assert!(!body.contains("<script>x"));

    let req = form_post("/vacinas/abriralterar", "codigo=1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Difteria &amp; Tétano"));
    assert!(!body.contains("&amp;amp;"));
}
