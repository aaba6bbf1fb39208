#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{MIGRATIONS, configure, run, run_migrations};

#[cfg(feature = "server")]
mod server {
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use diesel::sqlite::SqliteConnection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    use crate::db::{DbPool, establish_connection_pool, get_connection};
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::load_templates;
    use crate::routes::main::show_index;
    use crate::routes::people::{
        register_person, remove_person, search_people, show_all_people, show_edit_person,
        show_person_outcome, show_register_person, show_search_people, update_person,
    };
    use crate::routes::vaccines::{
        register_vaccine, remove_vaccine, search_vaccines, show_all_vaccines, show_edit_vaccine,
        show_register_vaccine, show_search_vaccines, show_vaccine_outcome, update_vaccine,
    };

    pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

    /// Applies pending schema migrations.
    pub fn run_migrations(pool: &DbPool) -> std::io::Result<()> {
        let mut conn = get_connection(pool)
            .map_err(|e| std::io::Error::other(format!("Failed to get connection: {e}")))?;
        let conn: &mut SqliteConnection = &mut conn;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
        for version in applied {
            log::info!("Applied migration {version}");
        }
        Ok(())
    }

    /// Registers every page of the application.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(show_index)
            .service(show_all_people)
            .service(show_register_person)
            .service(register_person)
            .service(show_person_outcome)
            .service(show_search_people)
            .service(search_people)
            .service(show_edit_person)
            .service(update_person)
            .service(remove_person)
            .service(show_all_vaccines)
            .service(show_register_vaccine)
            .service(register_vaccine)
            .service(show_vaccine_outcome)
            .service(show_search_vaccines)
            .service(search_vaccines)
            .service(show_edit_vaccine)
            .service(update_vaccine)
            .service(remove_vaccine);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;
        run_migrations(&pool)?;

        let repo = DieselRepository::new(pool);

        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = load_templates(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Listening on http://{}:{}",
            server_config.address,
            server_config.port
        );

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(configure)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
