use crate::configuration::Settings;
use crate::connectors::{
    AssetStoreClient, AssetStoreConnector, EmailClient, EmailConnector, IdentityClient,
    IdentityConnector, RecordStoreClient, RecordStoreConnector,
};
use crate::middleware;
use crate::models;
use crate::routes;
use crate::services::{AdminPolicy, ContentService, SettingsService};
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

fn into_io_error(err: impl std::error::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

pub async fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let record_store: Arc<dyn RecordStoreConnector> =
        Arc::new(RecordStoreClient::new(&settings.record_store).map_err(into_io_error)?);
    let asset_store: Arc<dyn AssetStoreConnector> =
        Arc::new(AssetStoreClient::new(&settings.asset_store).map_err(into_io_error)?);
    let identity: Arc<dyn IdentityConnector> =
        Arc::new(IdentityClient::new(&settings.identity).map_err(into_io_error)?);
    let email: Arc<dyn EmailConnector> =
        Arc::new(EmailClient::new(&settings.email).map_err(into_io_error)?);

    let projects = web::Data::new(ContentService::<models::Project>::new(
        record_store.clone(),
        asset_store.clone(),
    ));
    let certificates = web::Data::new(ContentService::<models::Certificate>::new(
        record_store.clone(),
        asset_store.clone(),
    ));
    let site_settings = web::Data::new(SettingsService::new(record_store));
    let admin_policy = web::Data::new(AdminPolicy::new(settings.admin_identity.clone()));
    let identity = web::Data::new(identity);
    let email = web::Data::new(email);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/projects")
                    .service(routes::project::get::list)
                    .service(routes::project::get::item)
                    .service(routes::project::add::item)
                    .service(routes::project::update::item)
                    .service(routes::project::delete::item),
            )
            .service(
                web::scope("/certificates")
                    .service(routes::certificate::get::list)
                    .service(routes::certificate::get::item)
                    .service(routes::certificate::add::item)
                    .service(routes::certificate::update::item)
                    .service(routes::certificate::delete::item),
            )
            .service(
                web::scope("/settings")
                    .service(routes::settings::get::item)
                    .service(routes::settings::update::item),
            )
            .service(web::scope("/gate").service(routes::gate::status))
            .service(web::scope("/contact").service(routes::contact::send))
            .app_data(projects.clone())
            .app_data(certificates.clone())
            .app_data(site_settings.clone())
            .app_data(admin_policy.clone())
            .app_data(identity.clone())
            .app_data(email.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
