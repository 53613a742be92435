use std::sync::Arc;

use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl,
    club_event::EventRepositoryImpl,
    health::HealthCheckRepositoryImpl,
    image::ImageHostRepositoryImpl,
    mail::{GmailRepositoryImpl, LoggingMailRepositoryImpl},
    registration::RegistrationRepositoryImpl,
    resource::ResourceRepositoryImpl,
    user::UserRepositoryImpl,
    workshop::WorkshopRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::repository::{
    auth::AuthRepository, club_event::EventRepository, health::HealthCheckRepository,
    image::ImageRepository, mail::MailRepository, registration::RegistrationRepository,
    resource::ResourceRepository, user::UserRepository, workshop::WorkshopRepository,
};
use shared::config::AppConfig;

/// Every repository the handlers reach, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub health_check: Arc<dyn HealthCheckRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub user: Arc<dyn UserRepository>,
    pub event: Arc<dyn EventRepository>,
    pub registration: Arc<dyn RegistrationRepository>,
    pub workshop: Arc<dyn WorkshopRepository>,
    pub resource: Arc<dyn ResourceRepository>,
    pub image: Arc<dyn ImageRepository>,
    pub mail: Arc<dyn MailRepository>,
}

#[derive(Clone)]
pub struct AppRegistry {
    repositories: Repositories,
    app_base_url: Arc<str>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let mail: Arc<dyn MailRepository> = match app_config.mail.gmail_access_token.clone() {
            Some(token) => Arc::new(GmailRepositoryImpl::new(
                token,
                app_config.mail.sender.clone(),
            )),
            None => {
                tracing::warn!("GMAIL_ACCESS_TOKEN is not set; outgoing mail is only logged");
                Arc::new(LoggingMailRepositoryImpl)
            }
        };

        let repositories = Repositories {
            health_check: Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            auth: Arc::new(AuthRepositoryImpl::new(
                pool.clone(),
                redis_client.clone(),
                app_config.auth.ttl,
                app_config.auth.verification_ttl,
                app_config.auth.password_reset_ttl,
            )),
            user: Arc::new(UserRepositoryImpl::new(pool.clone())),
            event: Arc::new(EventRepositoryImpl::new(pool.clone())),
            registration: Arc::new(RegistrationRepositoryImpl::new(pool.clone())),
            workshop: Arc::new(WorkshopRepositoryImpl::new(pool.clone())),
            resource: Arc::new(ResourceRepositoryImpl::new(pool.clone())),
            image: Arc::new(ImageHostRepositoryImpl::new(&app_config.image_host)),
            mail,
        };

        Self::from_repositories(repositories, &app_config.mail.app_base_url)
    }

    pub fn from_repositories(repositories: Repositories, app_base_url: &str) -> Self {
        Self {
            repositories,
            app_base_url: Arc::from(app_base_url.trim_end_matches('/')),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.repositories.health_check.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.repositories.auth.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.repositories.user.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.repositories.event.clone()
    }

    pub fn registration_repository(&self) -> Arc<dyn RegistrationRepository> {
        self.repositories.registration.clone()
    }

    pub fn workshop_repository(&self) -> Arc<dyn WorkshopRepository> {
        self.repositories.workshop.clone()
    }

    pub fn resource_repository(&self) -> Arc<dyn ResourceRepository> {
        self.repositories.resource.clone()
    }

    pub fn image_repository(&self) -> Arc<dyn ImageRepository> {
        self.repositories.image.clone()
    }

    pub fn mail_repository(&self) -> Arc<dyn MailRepository> {
        self.repositories.mail.clone()
    }

    // メールに載せるリンクの組み立て用
    pub fn app_url(&self, path: &str) -> String {
        format!("{}{}", self.app_base_url, path)
    }
}
