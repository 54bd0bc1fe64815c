//! # Resource Routes
//!
//! Every Baasic resource exposes the same handful of operations over a
//! collection path: find, get, create, update, remove, batch variants and a
//! few resource-specific actions (publish, approve, lock, ...).
//!
//! [`ResourceRoute`] holds the standard templates for one path. The
//! [`BaseRoute`] trait turns those templates into [`ApiRequest`]s: a route set
//! only has to hand out its `ResourceRoute` and a [`ModelMapper`] to get the
//! whole CRUD surface for free. Resource-specific actions are described by
//! [`ActionRoute`] and run through [`BaseRoute::perform`].
//!
//! | Operation | Template | Relation |
//! |-----------|----------|----------|
//! | `find` | `{path}/{?searchQuery,page,rpp,sort,embed,fields,...}` | |
//! | `get` | `{path}/{key}/{?embed,fields}` | |
//! | `create` | `{path}` | |
//! | `update` | `{path}/{key}` | `put` |
//! | `remove` | `{path}/{key}` | `delete` |
//! | batch | `{path}/batch` | |
//! | action | `{path}/{key}/<suffix>` | per action |

use crate::error::CoreError;
use crate::hal::{HalParser, HalResource, LinkResolver};
use crate::mapper::ModelMapper;
use crate::options::{FindQuery, ParameterMap};
use crate::request::{ApiRequest, HttpMethod};
use crate::uri_template::UriTemplate;
use crate::utility::is_object;
use serde_json::Value;
use tracing::{debug, instrument};

/// Query parameters every find template accepts.
pub const FIND_PARAMS: [&str; 6] = ["searchQuery", "page", "rpp", "sort", "embed", "fields"];

pub const UPDATE_REL: &str = "put";
pub const REMOVE_REL: &str = "delete";

/// Standard templates for one resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoute {
    path: String,
    key_property: String,
    find: UriTemplate,
    get: UriTemplate,
    create: UriTemplate,
    update: UriTemplate,
    remove: UriTemplate,
    batch: UriTemplate,
}

impl ResourceRoute {
    /// Builds the templates for `path`. `filters` are appended to the find
    /// query list after the standard parameters.
    pub fn new(path: &str, key_property: &str, filters: &[&str]) -> Result<Self, CoreError> {
        let path = path.trim_end_matches('/');
        let query: Vec<&str> = FIND_PARAMS.iter().chain(filters).copied().collect();
        let item = format!("{path}/{{{key_property}}}");

        Ok(Self {
            find: UriTemplate::parse(&format!("{path}/{{?{}}}", query.join(",")))?,
            get: UriTemplate::parse(&format!("{item}/{{?embed,fields}}"))?,
            create: UriTemplate::parse(path)?,
            update: UriTemplate::parse(&item)?,
            remove: UriTemplate::parse(&item)?,
            batch: UriTemplate::parse(&format!("{path}/batch"))?,
            path: path.to_owned(),
            key_property: key_property.to_owned(),
        })
    }

    /// Describes an action reachable under `rel`, falling back to
    /// `{path}/{key}/<suffix>`.
    pub fn action(&self, method: HttpMethod, rel: &str, suffix: &str) -> Result<ActionRoute, CoreError> {
        let template = UriTemplate::parse(&format!(
            "{}/{{{}}}/{}",
            self.path, self.key_property, suffix
        ))?;
        Ok(ActionRoute {
            method,
            rel: rel.to_owned(),
            template,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn key_property(&self) -> &str {
        &self.key_property
    }

    pub fn find_template(&self) -> &UriTemplate {
        &self.find
    }

    pub fn get_template(&self) -> &UriTemplate {
        &self.get
    }

    pub fn create_template(&self) -> &UriTemplate {
        &self.create
    }

    pub fn update_template(&self) -> &UriTemplate {
        &self.update
    }

    pub fn remove_template(&self) -> &UriTemplate {
        &self.remove
    }

    pub fn batch_template(&self) -> &UriTemplate {
        &self.batch
    }
}

/// A resource-specific operation: verb, HAL relation and fallback template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRoute {
    method: HttpMethod,
    rel: String,
    template: UriTemplate,
}

impl ActionRoute {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn template(&self) -> &UriTemplate {
        &self.template
    }
}

/// Standard operations shared by every route set.
///
/// Implementors provide [`route`](BaseRoute::route) and
/// [`mapper`](BaseRoute::mapper); every operation below has a default
/// implementation built on them.
pub trait BaseRoute {
    fn route(&self) -> &ResourceRoute;

    fn mapper(&self) -> &ModelMapper;

    /// Lists resources matching a phrase or an option bag.
    #[instrument(skip_all, fields(resource = self.route().path()))]
    fn find(&self, query: impl Into<FindQuery>) -> ApiRequest {
        let params = self.mapper().find_params(query);
        let uri = self.route().find_template().expand(&params);
        debug!(%uri, "Built find request");
        ApiRequest::get(uri)
    }

    /// Fetches a single resource by key (or by an object of lookup fields).
    #[instrument(skip_all, fields(resource = self.route().path()))]
    fn get(&self, key: impl Into<Value>, options: Option<&Value>) -> ApiRequest {
        let params = self
            .mapper()
            .key_params(key, options, Some(self.route().key_property()));
        let uri = self.route().get_template().expand(&params);
        debug!(%uri, "Built get request");
        ApiRequest::get(uri)
    }

    /// Posts a new resource. `data` may be the payload or a model envelope.
    #[instrument(skip_all, fields(resource = self.route().path()))]
    fn create(&self, data: Value) -> ApiRequest {
        let model = unwrap_model(self.mapper(), self.mapper().create_params(data));
        let path_params = match &model {
            Value::Object(fields) => fields.clone(),
            _ => ParameterMap::new(),
        };
        let uri = self.route().create_template().expand(&path_params);
        debug!(%uri, "Built create request");
        ApiRequest::post(uri, model)
    }

    /// Puts a changed resource to its `put` link, or to the item template.
    #[instrument(skip_all, fields(resource = self.route().path()))]
    fn update(&self, data: Value) -> ApiRequest {
        let (uri, body) = self.resolve_target(UPDATE_REL, self.route().update_template(), data);
        debug!(%uri, "Built update request");
        ApiRequest::put(uri, body)
    }

    /// Deletes a resource through its `delete` link, or the item template.
    /// `data` may also be a bare key.
    #[instrument(skip_all, fields(resource = self.route().path()))]
    fn remove(&self, data: Value) -> ApiRequest {
        let (uri, _) = self.resolve_target(REMOVE_REL, self.route().remove_template(), data);
        debug!(%uri, "Built remove request");
        ApiRequest::delete(uri)
    }

    /// Runs a resource-specific action. Only `DELETE` actions go without a body.
    #[instrument(skip_all, fields(resource = self.route().path(), rel = action.rel()))]
    fn perform(&self, action: &ActionRoute, data: Value) -> ApiRequest {
        let (uri, body) = self.resolve_target(action.rel(), action.template(), data);
        debug!(%uri, method = %action.method(), "Built action request");
        let body = (action.method() != HttpMethod::Delete).then_some(body);
        ApiRequest::new(action.method(), uri, body)
    }

    fn batch_create(&self, items: Vec<Value>) -> ApiRequest {
        let uri = self.route().batch_template().expand(&ParameterMap::new());
        ApiRequest::post(uri, Value::Array(items))
    }

    fn batch_update(&self, items: Vec<Value>) -> ApiRequest {
        let uri = self.route().batch_template().expand(&ParameterMap::new());
        ApiRequest::put(uri, Value::Array(items))
    }

    /// Deletes several resources at once; the body lists their keys.
    #[instrument(skip_all, fields(resource = self.route().path(), count = items.len()))]
    fn batch_remove(&self, items: &[Value]) -> ApiRequest {
        let ids = self
            .mapper()
            .batch_remove_ids(items, Some(self.route().key_property()));
        debug!(ids = ids.len(), "Built batch remove request");
        let uri = self.route().batch_template().expand(&ParameterMap::new());
        ApiRequest::delete(uri).with_body(Value::Array(ids))
    }

    /// Picks the URI for `rel` on the resource in `data` and returns it with
    /// the plain resource body.
    ///
    /// A bare key (anything that is not an object) is looked up through the
    /// fallback template.
    fn resolve_target(&self, rel: &str, fallback: &UriTemplate, data: Value) -> (String, Value) {
        let model = unwrap_model(self.mapper(), self.mapper().update_params(data));
        let resource = if is_object(&model) {
            HalParser.parse_resource(model)
        } else {
            let key = Some(self.route().key_property());
            HalResource::from_fields(self.mapper().key_params(model, None, key))
        };
        let uri = LinkResolver.resolve(&resource, rel, fallback);
        (uri, resource.into_value())
    }
}

fn unwrap_model(mapper: &ModelMapper, mut params: ParameterMap) -> Value {
    params.remove(mapper.model_property()).unwrap_or(Value::Null)
}
