use crate::article::{ArticleCommentRoutes, ArticleRoutes};
use crate::membership::UserRoutes;
use crate::notification::SubscriptionRoutes;
use baasic_core::{ApiRequest, CoreError, ModelMapper, SdkConfig};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(CoreError),
    #[error("Failed to build {resource} routes: {source}")]
    Routes {
        resource: &'static str,
        #[source]
        source: CoreError,
    },
}

/// Composition root for a single Baasic application.
///
/// Holds the configuration, the resolved API base URL and every route set,
/// all built from the same [`ModelMapper`]. Cheap to clone and safe to share
/// between threads.
#[derive(Debug, Clone)]
pub struct BaasicApp {
    config: SdkConfig,
    api_url: Url,
    mapper: ModelMapper,

    pub articles: ArticleRoutes,
    pub article_comments: ArticleCommentRoutes,
    pub users: UserRoutes,
    pub subscriptions: SubscriptionRoutes,
}

impl BaasicApp {
    /// Validates `config` and builds every route set.
    ///
    /// Fails when the configuration has no application identifier or does not
    /// form a valid URL.
    pub fn new(config: SdkConfig) -> Result<Self, AppError> {
        let api_url = config.api_url().map_err(AppError::Config)?;
        let mapper = ModelMapper::from_config(&config);

        let articles = ArticleRoutes::new(mapper.clone()).map_err(routes_failed("article"))?;
        let article_comments =
            ArticleCommentRoutes::new(mapper.clone()).map_err(routes_failed("article comment"))?;
        let users = UserRoutes::new(mapper.clone()).map_err(routes_failed("user"))?;
        let subscriptions =
            SubscriptionRoutes::new(mapper.clone()).map_err(routes_failed("subscription"))?;

        info!(
            application = %config.application_identifier,
            api_url = %api_url,
            "Baasic application ready"
        );

        Ok(Self {
            config,
            api_url,
            mapper,
            articles,
            article_comments,
            users,
            subscriptions,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn mapper(&self) -> &ModelMapper {
        &self.mapper
    }

    /// Base URL relative routes are resolved against.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Turns the request URI into an absolute URL. HAL links that are already
    /// absolute are returned as they are.
    pub fn absolute_url(&self, request: &ApiRequest) -> Result<Url, CoreError> {
        let url = request.resolve_against(&self.api_url)?;
        debug!(%request, %url, "Resolved request URL");
        Ok(url)
    }
}

fn routes_failed(resource: &'static str) -> impl FnOnce(CoreError) -> AppError {
    move |source| AppError::Routes { resource, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_application_identifier() {
        let err = BaasicApp::new(SdkConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_route_sets_share_configured_mapper() {
        let mut config = SdkConfig::new("blog");
        config.model_property_name = "payload".to_owned();

        let app = BaasicApp::new(config).unwrap();
        assert_eq!(app.mapper().model_property(), "payload");
        assert_eq!(app.api_url().as_str(), "https://api.baasic.com/v1/blog/");
    }
}
