//! # Route Set Declarations
//!
//! Route sets are near-identical: a path, a key property, a list of find
//! filters and a few actions. [`resource_routes!`](crate::resource_routes)
//! generates the struct, its [`BaseRoute`](crate::BaseRoute) impl, one method
//! per action and a `<action>_template()` accessor for each fallback template.
//!
//! ```rust
//! use baasic_core::{resource_routes, BaseRoute, ModelMapper};
//! use serde_json::json;
//!
//! resource_routes! {
//!     /// Routes for blog posts.
//!     pub struct PostRoutes => "posts" {
//!         key: "id",
//!         filters: ["tags"],
//!         actions: {
//!             publish => (Put, "publish", "publish"),
//!         }
//!     }
//! }
//!
//! let posts = PostRoutes::new(ModelMapper::default()).unwrap();
//! assert_eq!(posts.find("news").uri, "posts/?searchQuery=news");
//! assert_eq!(posts.publish(json!({"id": 7})).uri, "posts/7/publish");
//! assert_eq!(posts.publish_template().as_str(), "posts/{id}/publish");
//! ```

/// Declares a route set. See the [module docs](crate::macros).
///
/// Each action reads `name => (Method, "relation", "suffix")`, where `Method`
/// is an [`HttpMethod`](crate::HttpMethod) variant, `relation` the HAL link
/// name and `suffix` the last segment of the fallback template.
#[macro_export]
macro_rules! resource_routes {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $path:literal {
            key: $key:literal,
            filters: [$($filter:literal),* $(,)?],
            actions: {
                $($action:ident => ($method:ident, $rel:literal, $suffix:literal)),* $(,)?
            } $(,)?
        }
    ) => {
        $crate::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone)]
            $vis struct $name {
                route: $crate::ResourceRoute,
                mapper: $crate::ModelMapper,
                $([<$action _route>]: $crate::ActionRoute,)*
            }

            impl $name {
                pub const PATH: &'static str = $path;

                pub fn new(mapper: $crate::ModelMapper) -> ::std::result::Result<Self, $crate::CoreError> {
                    let route = $crate::ResourceRoute::new($path, $key, &[$($filter),*])?;
                    Ok(Self {
                        $([<$action _route>]: route.action($crate::HttpMethod::$method, $rel, $suffix)?,)*
                        route,
                        mapper,
                    })
                }

                $(
                    pub fn $action(&self, data: $crate::Value) -> $crate::ApiRequest {
                        $crate::BaseRoute::perform(self, &self.[<$action _route>], data)
                    }

                    pub fn [<$action _template>](&self) -> &$crate::UriTemplate {
                        self.[<$action _route>].template()
                    }
                )*
            }

            impl $crate::BaseRoute for $name {
                fn route(&self) -> &$crate::ResourceRoute {
                    &self.route
                }

                fn mapper(&self) -> &$crate::ModelMapper {
                    &self.mapper
                }
            }
        }
    };
}
